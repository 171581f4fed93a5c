use crate::constants::{CATALOG_URL, PRODUCT_BASE_URL};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Resolved configuration with all values filled in (no Options).
///
/// Every field has a default, so a TOML file only needs the keys it wants to
/// change. Command-line flags are applied on top of the loaded values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Page holding the product catalog
    pub catalog_url: String,
    /// Base that relative product links are joined onto
    pub base_url: String,
    /// Read and write the HTML cache
    pub use_cache: bool,
    /// Directory for cached HTML pages
    pub cache_dir: PathBuf,
    /// Verify TLS certificates (some corporate proxies need this off)
    pub verify_ssl: bool,
    /// Directory that downloaded kits are written to
    pub download_dir: PathBuf,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            catalog_url: CATALOG_URL.to_string(),
            base_url: PRODUCT_BASE_URL.to_string(),
            use_cache: true,
            cache_dir: PathBuf::from("cache"),
            verify_ssl: true,
            download_dir: PathBuf::from("."),
            user_agent: format!("vms-openkits/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Unknown keys are rejected so typos are not silently ignored, and both
    /// URLs must parse.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, and `InvalidInput` if the
    /// TOML is malformed, has unknown keys, or holds an unparseable URL.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured URLs are usable.
    pub fn validate(&self) -> AppResult<()> {
        for (key, value) in [("catalog_url", &self.catalog_url), ("base_url", &self.base_url)] {
            Url::parse(value)
                .map_err(|e| AppError::InvalidInput(format!("{key} '{value}': {e}")))?;
        }
        Ok(())
    }

    pub fn catalog_url(&self) -> AppResult<Url> {
        Ok(Url::parse(&self.catalog_url)?)
    }

    pub fn base_url(&self) -> AppResult<Url> {
        Ok(Url::parse(&self.base_url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let config = ResolvedConfig::default();
        assert_eq!(config.catalog_url, "https://products.vmssoftware.com");
        assert!(config.use_cache);
        assert!(config.verify_ssl);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert!(config.user_agent.starts_with("vms-openkits/"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            use_cache = false
            verify_ssl = false
            download_dir = "kits"
            "#,
        )
        .unwrap();

        let config = ResolvedConfig::from_toml_file(tmp.path()).unwrap();
        assert!(!config.use_cache);
        assert!(!config.verify_ssl);
        assert_eq!(config.download_dir, PathBuf::from("kits"));
        assert_eq!(config.base_url, "https://products.vmssoftware.com");
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
    }

    #[test]
    fn unknown_key_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "use_cahce = true\n").unwrap();

        let err = ResolvedConfig::from_toml_file(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn bad_url_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "catalog_url = \"not a url\"\n").unwrap();

        let err = ResolvedConfig::from_toml_file(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("catalog_url"));
    }
}
