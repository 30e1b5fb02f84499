//! Runtime configuration resolved from environment overrides.

use std::path::PathBuf;

/// Default scraping API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.devnova.icu/api/tools/puppeteer";

/// Default origin the quote fragments are scraped from.
pub const DEFAULT_SOURCE_URL: &str = "https://quotes.toscrape.com";

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scraping API endpoint (`QUOTEDECK_API_URL`).
    pub api_url: String,
    /// Source site origin (`QUOTEDECK_SOURCE_URL`).
    pub source_url: String,
    /// Data directory for the store and session history (`QUOTEDECK_DATA_DIR`).
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let api_url = read_env_string("QUOTEDECK_API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let source_url = read_env_string("QUOTEDECK_SOURCE_URL")
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let data_dir = read_env_string("QUOTEDECK_DATA_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self {
            api_url,
            source_url,
            data_dir,
        }
    }

    /// Directory holding the key-value store files.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".quotedeck")
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so every override is exercised in one test
    // to keep parallel test runs honest.
    #[test]
    fn test_env_overrides_and_defaults() {
        std::env::remove_var("QUOTEDECK_API_URL");
        std::env::remove_var("QUOTEDECK_SOURCE_URL");
        std::env::remove_var("QUOTEDECK_DATA_DIR");

        let cfg = Config::from_env();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
        assert!(cfg.store_dir().ends_with("store"));

        std::env::set_var("QUOTEDECK_SOURCE_URL", "https://example.com/");
        std::env::set_var("QUOTEDECK_DATA_DIR", "/tmp/qd-test");
        let cfg = Config::from_env();
        // Trailing slash is normalized away so link building can concatenate.
        assert_eq!(cfg.source_url, "https://example.com");
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/qd-test"));

        std::env::remove_var("QUOTEDECK_SOURCE_URL");
        std::env::remove_var("QUOTEDECK_DATA_DIR");
    }
}
