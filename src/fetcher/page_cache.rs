use crate::config::ResolvedConfig;
use crate::errors::AppResult;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};
use url::Url;

/// Client value passed to every stage of a session.
///
/// Wraps one `reqwest::Client` (built once, with certificate verification as
/// configured) together with the resolved configuration that decides where
/// pages are cached and files are saved.
#[derive(Debug, Clone)]
pub struct PortsClient {
    http: reqwest::Client,
    config: ResolvedConfig,
}

impl PortsClient {
    /// Builds the HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the TLS backend cannot be initialised.
    pub fn new(config: ResolvedConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        if !config.verify_ssl {
            debug!("TLS certificate verification disabled");
        }

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Path of the cache file called `name`.
    pub fn cache_path(&self, name: &str) -> PathBuf {
        self.config.cache_dir.join(name)
    }

    /// Returns the page text at `url`.
    ///
    /// With caching enabled an existing `cache_name` file is returned
    /// without touching the network; otherwise the page is fetched and, when
    /// caching is enabled, written to `cache_name` before returning. A
    /// `cache_name` of `None` always fetches and never writes.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` for failed requests and non-success statuses,
    /// and `IoError` if the cache cannot be read or written.
    pub async fn fetch_page(&self, url: &Url, cache_name: Option<&str>) -> AppResult<String> {
        let cache_file = match cache_name {
            Some(name) if self.config.use_cache => Some(self.cache_path(name)),
            _ => None,
        };

        if let Some(cache_file) = &cache_file {
            if fs::try_exists(cache_file).await? {
                info!(cache_file = %cache_file.display(), "Using cached page");
                return Ok(fs::read_to_string(cache_file).await?);
            }
        }

        info!(url = %url, "Retrieving page");
        let page_text = self
            .http
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if let Some(cache_file) = &cache_file {
            fs::create_dir_all(&self.config.cache_dir).await?;
            fs::write(cache_file, &page_text).await?;
            debug!(cache_file = %cache_file.display(), bytes = page_text.len(), "Page cached");
        }

        Ok(page_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cached_page_skips_network() {
        let temp_dir = TempDir::new().unwrap();
        let config = ResolvedConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            ..ResolvedConfig::default()
        };
        std::fs::write(temp_dir.path().join("products.html"), "<html>cached</html>").unwrap();

        let client = PortsClient::new(config).unwrap();
        // Port 9 (discard) is never reached when the cache hits.
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let text = client.fetch_page(&url, Some("products.html")).await.unwrap();
        assert_eq!(text, "<html>cached</html>");
    }

    #[tokio::test]
    async fn test_disabled_cache_ignores_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = ResolvedConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            use_cache: false,
            ..ResolvedConfig::default()
        };
        std::fs::write(temp_dir.path().join("products.html"), "<html>cached</html>").unwrap();

        let client = PortsClient::new(config).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        assert!(client.fetch_page(&url, Some("products.html")).await.is_err());
    }

    #[tokio::test]
    async fn test_uncached_page_ignores_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = ResolvedConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            ..ResolvedConfig::default()
        };
        std::fs::write(temp_dir.path().join("product-.html"), "<html>other</html>").unwrap();

        let client = PortsClient::new(config).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        assert!(client.fetch_page(&url, None).await.is_err());
    }
}
