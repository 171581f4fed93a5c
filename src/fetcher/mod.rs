//! Page retrieval and scraping for the vendor site.
//!
//! [`PortsClient`] owns the HTTP client and the HTML cache. The catalog and
//! kit scrapers take it by reference; their `parse_*` halves work on plain
//! HTML so they can be tested offline.

mod catalog;
mod kits;
mod page_cache;

// Re-export public API
pub use catalog::{fetch_catalog, parse_catalog, product_summary};
pub use kits::{fetch_kits, parse_kit_links};
pub use page_cache::PortsClient;
