//! vms-openkits library
//!
//! This crate provides the core functionality for the `vms-openkits` binary.
//! Implementation and tests live in their modules.
//!
//! ## Overview
//!
//! - [`fetcher`] - Retrieves (and caches) the catalog and product pages and scrapes them
//! - [`menu`] - Numbered console menus with comma/hyphen range selection
//! - [`downloader`] - Downloads the selected kit archives
//! - [`cli`] - Command-line parsing and the interactive session loop
//! - [`models`] - Products, the catalog and kit lists
//! - [`config`] - Configuration defaults and TOML loading
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use vms_openkits::{config::ResolvedConfig, errors::AppResult, fetcher};
//!
//! # async fn example() -> AppResult<()> {
//! let client = fetcher::PortsClient::new(ResolvedConfig::default())?;
//! let catalog = fetcher::fetch_catalog(&client).await?;
//! for product in catalog.open_source() {
//!     println!("{}", fetcher::product_summary(product));
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod fetcher;
pub mod menu;
pub mod models;
pub mod ui;
