use super::PortsClient;
use crate::constants::{
    CATALOG_CACHE_FILE, CATALOG_CONTAINER_ID, CATALOG_RESOURCES_PATTERN, OPEN_SOURCE_MARKER,
};
use crate::errors::AppResult;
use crate::models::{Catalog, Platform, PlatformRelease, Product};
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Cached regex for the `resources:` assignment in the catalog script.
static RESOURCES_REGEX: OnceLock<Regex> = OnceLock::new();

/// Cached selector for the script block inside the catalog container.
static CONTAINER_SCRIPT_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// Width of the `NNN - ` prefix the menu puts before each entry.
const SUMMARY_INDENT: usize = 3 + " - ".len();

/// Fetches the catalog page (or its cached copy) and parses it.
///
/// # Errors
///
/// Returns an error only when the page cannot be retrieved. A page without
/// the expected data yields an empty catalog.
pub async fn fetch_catalog(client: &PortsClient) -> AppResult<Catalog> {
    let url = client.config().catalog_url()?;
    let page_text = client.fetch_page(&url, Some(CATALOG_CACHE_FILE)).await?;
    let catalog = parse_catalog(&page_text);
    info!(
        products = catalog.products().len(),
        open_source = catalog.open_source().len(),
        "Catalog parsed"
    );
    Ok(catalog)
}

/// Extracts the product list embedded in the catalog page.
///
/// The list lives in the first `<script>` of the element with id
/// [`CATALOG_CONTAINER_ID`], as a JSON array assigned to `resources:`.
/// A missing container, script or assignment, or an unparseable array,
/// gives an empty catalog.
pub fn parse_catalog(html: &str) -> Catalog {
    let document = Html::parse_document(html);

    let selector = CONTAINER_SCRIPT_SELECTOR.get_or_init(|| {
        Selector::parse(&format!("#{CATALOG_CONTAINER_ID} script"))
            .expect("catalog container selector is a valid CSS selector")
    });
    let resources_regex = RESOURCES_REGEX.get_or_init(|| {
        Regex::new(CATALOG_RESOURCES_PATTERN).expect("CATALOG_RESOURCES_PATTERN is a valid regex")
    });

    let Some(script) = document.select(selector).next() else {
        warn!(container = CATALOG_CONTAINER_ID, "No product script found on catalog page");
        return Catalog::default();
    };
    let script_text: String = script.text().collect();

    let Some(blob) = resources_regex
        .captures(&script_text)
        .and_then(|c| c.get(1))
    else {
        warn!("No product data found in catalog script");
        return Catalog::default();
    };

    let entries: Vec<Value> = match serde_json::from_str(blob.as_str()) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Catalog product data is not a JSON array");
            return Catalog::default();
        }
    };

    let products = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawProduct>(entry) {
            Ok(raw) => Some(raw.into_product()),
            Err(e) => {
                warn!(error = %e, "Skipping malformed catalog entry");
                None
            }
        })
        .collect();

    Catalog::new(products)
}

/// Multi-line menu text for a product: the title, then one indented line per
/// platform it has been ported to.
pub fn product_summary(product: &Product) -> String {
    let mut entry = product.title.clone();
    for platform in Platform::ALL {
        let release = product.release(platform);
        if !release.is_available() {
            continue;
        }
        let version = release.version.as_deref().unwrap_or_default();
        entry.push('\n');
        entry.push_str(&" ".repeat(SUMMARY_INDENT));
        match release.release_date.as_deref() {
            Some(date) if !date.is_empty() => {
                entry.push_str(&format!("{platform}: {version} ({date})"))
            }
            _ => entry.push_str(&format!("{platform}: {version}")),
        }
    }
    entry
}

/// Catalog entry as the vendor serialises it. Only the fields we use are
/// declared; the rest are ignored.
#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    alpha: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    alpha_release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    integrity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    integrity_release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    x86: Option<String>,
    // x86 is the current platform and carries the unprefixed date key
    #[serde(default, deserialize_with = "lenient_string")]
    release_date: Option<String>,
    #[serde(default)]
    open_source: Option<Vec<RawChoice>>,
    #[serde(default)]
    link: Option<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawChoice {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(default)]
    url: Option<RawHref>,
}

#[derive(Debug, Deserialize)]
struct RawHref {
    #[serde(default)]
    href: Option<String>,
}

impl RawProduct {
    fn into_product(self) -> Product {
        let open_source = self
            .open_source
            .as_ref()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.name.as_deref())
            == Some(OPEN_SOURCE_MARKER);
        let link = self.link.and_then(|l| l.url).and_then(|u| u.href);

        Product {
            id: self.id.unwrap_or_default(),
            title: self.title,
            alpha: PlatformRelease {
                version: self.alpha,
                release_date: self.alpha_release_date,
            },
            integrity: PlatformRelease {
                version: self.integrity,
                release_date: self.integrity_release_date,
            },
            x86: PlatformRelease {
                version: self.x86,
                release_date: self.release_date,
            },
            open_source,
            link,
            index: None,
        }
    }
}

/// Accepts strings as-is and numbers as their decimal text; anything else
/// (null, bool, objects) is treated as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
