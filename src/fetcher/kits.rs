use super::PortsClient;
use crate::constants::{DOWNLOAD_LIST_SELECTOR, KIT_URL_PATTERN, PRODUCT_CACHE_PREFIX};
use crate::errors::AppResult;
use crate::models::{KitList, Product};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{info, warn};
use url::Url;

/// Cached regex matching vendor kit URLs.
static KIT_URL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Cached CSS selector for the download list container.
static DOWNLOAD_LIST_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Cached CSS selector for anchors with an `href`.
static ANCHOR_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// Fetches a product's detail page (or its cached copy) and extracts its kits.
///
/// The page URL is the configured base URL joined with the product link and
/// the cache file is named after the product id. Products without a usable
/// id are always fetched from the network.
///
/// # Errors
///
/// Returns an error if the base URL or link is invalid, or the page cannot be
/// retrieved. A product without a link yields an empty list.
pub async fn fetch_kits(client: &PortsClient, product: &Product) -> AppResult<KitList> {
    let Some(link) = product.link.as_deref() else {
        warn!(product = %product.title, "Product has no detail page link");
        return Ok(KitList::new());
    };

    let url = client.config().base_url()?.join(link)?;
    let cache_name = product_cache_name(product);
    if cache_name.is_none() {
        warn!(
            product = %product.title,
            id = %product.id,
            "Product id unusable as cache key, not caching"
        );
    }
    let page_text = client.fetch_page(&url, cache_name.as_deref()).await?;

    let kits = parse_kit_links(&page_text);
    info!(product = %product.title, kits = kits.len(), "Kit links parsed");
    Ok(kits)
}

/// Parses a product detail page and returns its kit links.
///
/// Exactly one download list container must be present; zero or several
/// give an empty list. Inside it, every anchor whose `href` contains a
/// vendor kit URL contributes an entry named after the archive file, with
/// the URL rewritten to `https` (the page links carry an `http` scheme that
/// the server does not answer on).
pub fn parse_kit_links(html: &str) -> KitList {
    let document = Html::parse_document(html);

    let list_selector = DOWNLOAD_LIST_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(DOWNLOAD_LIST_SELECTOR)
            .expect("DOWNLOAD_LIST_SELECTOR is a valid CSS selector")
    });
    let anchor_selector = ANCHOR_SELECTOR.get_or_init(|| {
        Selector::parse("a[href]").expect("anchor selector is a valid CSS selector")
    });
    let kit_regex = KIT_URL_REGEX.get_or_init(|| {
        Regex::new(KIT_URL_PATTERN).expect("KIT_URL_PATTERN is a valid regex pattern")
    });

    let containers: Vec<_> = document.select(list_selector).collect();
    if containers.len() != 1 {
        warn!(
            selector = DOWNLOAD_LIST_SELECTOR,
            found = containers.len(),
            "Expected exactly one download list"
        );
        return KitList::new();
    }

    let mut kits = KitList::new();
    for href in containers[0]
        .select(anchor_selector)
        .filter_map(|a| a.value().attr("href"))
    {
        let Some(caps) = kit_regex.captures(href) else {
            continue;
        };
        let (Some(full), Some(file)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let Some(url) = to_https(full.as_str()) else {
            warn!(href, "Skipping kit link with unparseable URL");
            continue;
        };
        let name = file.as_str().rsplit('/').next().unwrap_or(file.as_str());
        kits.insert(name.to_string(), url);
    }

    kits
}

/// Cache file name for a product's detail page, or `None` when the id is
/// empty or not a plain token.
fn product_cache_name(product: &Product) -> Option<String> {
    let id = product.id.as_str();
    if id.is_empty()
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some(format!("{PRODUCT_CACHE_PREFIX}{id}.html"))
}

fn to_https(link: &str) -> Option<String> {
    let mut url = Url::parse(link).ok()?;
    if url.scheme() != "https" {
        url.set_scheme("https").ok()?;
    }
    Some(url.to_string())
}
