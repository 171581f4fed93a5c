use crate::config::ResolvedConfig;
use crate::downloader::download_kits;
use crate::errors::AppResult;
use crate::fetcher::{fetch_catalog, fetch_kits, product_summary, PortsClient};
use crate::menu::select_from_list;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

const PRODUCT_MENU_TITLE: &str = "Open Source Products";

fn command() -> Command<'static> {
    Command::new("vms-openkits")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a TOML configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("no_cache")
                .long("no-cache")
                .help("Always fetch pages from the network and do not write the cache")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cache_dir")
                .long("cache-dir")
                .help("Directory for cached HTML pages")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("insecure")
                .short('k')
                .long("insecure")
                .help("Do not verify TLS certificates")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory that downloaded kits are written to")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Resolves the configuration from an optional TOML file and the flags
/// given on the command line. Flags win over file values.
fn resolve_config(matches: &ArgMatches) -> AppResult<ResolvedConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ResolvedConfig::from_toml_file(path)?,
        None => ResolvedConfig::default(),
    };
    if matches.get_one::<bool>("no_cache") == Some(&true) {
        config.use_cache = false;
    }
    if let Some(dir) = matches.get_one::<PathBuf>("cache_dir") {
        config.cache_dir = dir.clone();
    }
    if matches.get_one::<bool>("insecure") == Some(&true) {
        config.verify_ssl = false;
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output") {
        config.download_dir = dir.clone();
    }
    Ok(config)
}

/// Parses command-line arguments and runs an interactive session on the
/// terminal.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a network or file
/// operation fails during the session.
pub async fn cli() -> AppResult<()> {
    let matches = command().get_matches();
    let config = resolve_config(&matches)?;
    let client = PortsClient::new(config)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_session(&client, &mut input, &mut output).await
}

/// Runs the product → kit → download loop until the user exits the
/// product menu.
///
/// The catalog is fetched once up front. For every selected product its kits
/// are listed; an empty kit selection goes on to the next product, otherwise
/// the chosen kits are downloaded.
pub async fn run_session<R: BufRead, W: Write>(
    client: &PortsClient,
    input: &mut R,
    output: &mut W,
) -> AppResult<()> {
    let catalog = fetch_catalog(client).await?;
    let entries: Vec<String> = catalog
        .open_source()
        .into_iter()
        .map(product_summary)
        .collect();

    loop {
        let product_indices = select_from_list(input, output, &entries, PRODUCT_MENU_TITLE)?;
        if product_indices.is_empty() {
            writeln!(output, "Operation terminated by user request")?;
            info!("Session ended by user");
            return Ok(());
        }

        for product in catalog.select(&product_indices) {
            let kits = fetch_kits(client, product).await?;
            let title = format!("Downloadable kits for {}", product.title);
            let kit_indices = select_from_list(input, output, &kits.names(), &title)?;
            if kit_indices.is_empty() {
                continue;
            }
            download_kits(client, &kits, &kit_indices, output).await?;
        }
    }
}
