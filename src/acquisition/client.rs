//! HTTP client for the hosted scraping API.
//!
//! One POST per acquisition. The endpoint drives a headless browser on its
//! side, applies the configured extractors, and returns per-quote HTML
//! fragments; nothing browser-shaped runs locally.

use crate::acquisition::ScrapeError;
use crate::config::Config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Render budget the remote browser gets, in milliseconds.
pub const RENDER_TIMEOUT_MS: u64 = 30_000;

/// Overall client-side timeout. The remote spends up to the render budget
/// plus the caller's settle wait, so this leaves headroom on top.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

/// CSS selector the remote extractor applies per quote.
const QUOTE_SELECTOR: &str = ".quote";

// ── Wire types ────────────────────────────────────────────────────────────

/// Request payload for the scraping endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub url: String,
    #[serde(rename = "type")]
    pub request_type: String,
    pub wait_until: String,
    pub timeout: u64,
    pub wait_for_timeout: u64,
    pub viewport: Viewport,
    pub extractors: Extractors,
}

#[derive(Debug, Clone, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Extractors {
    pub selectors: SelectorMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorMap {
    pub quotes: SelectorSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorSpec {
    pub selector: String,
    pub multiple: bool,
    #[serde(rename = "type")]
    pub result_type: String,
}

/// Response envelope. Everything past `success` is optional on the wire;
/// missing layers are a protocol mismatch, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    pub standard: Option<StandardData>,
}

#[derive(Debug, Deserialize)]
pub struct StandardData {
    pub custom: Option<CustomData>,
}

#[derive(Debug, Deserialize)]
pub struct CustomData {
    pub quotes: Option<Vec<String>>,
}

// ── Client ────────────────────────────────────────────────────────────────

/// Client bound to one scraping endpoint and one source origin.
#[derive(Clone)]
pub struct ScrapeClient {
    client: reqwest::Client,
    endpoint: Url,
    source_origin: String,
}

impl ScrapeClient {
    /// Build a client from configuration. Fails when the endpoint URL is
    /// malformed.
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.api_url)
            .with_context(|| format!("invalid scraping API URL: {}", config.api_url))?;

        let client = reqwest::Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .user_agent(concat!("quotedeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            endpoint,
            source_origin: config.source_url.trim_end_matches('/').to_string(),
        })
    }

    /// Origin relative hrefs are resolved against.
    pub fn source_origin(&self) -> &str {
        &self.source_origin
    }

    /// Build the request payload for one page.
    pub fn request_for(&self, page: u32, wait: Duration) -> ScrapeRequest {
        ScrapeRequest {
            url: format!("{}/page/{}/", self.source_origin, page),
            request_type: "data".to_string(),
            wait_until: "networkidle2".to_string(),
            timeout: RENDER_TIMEOUT_MS,
            wait_for_timeout: wait.as_millis() as u64,
            viewport: Viewport {
                width: 1920,
                height: 1080,
            },
            extractors: Extractors {
                selectors: SelectorMap {
                    quotes: SelectorSpec {
                        selector: QUOTE_SELECTOR.to_string(),
                        multiple: true,
                        result_type: "html".to_string(),
                    },
                },
            },
        }
    }

    /// Fetch the raw quote fragments for one page.
    pub async fn fetch_fragments(&self, page: u32, wait: Duration) -> Result<Vec<String>, ScrapeError> {
        let body = self.request_for(page, wait);
        tracing::debug!("scraping {} via {}", body.url, self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
            });
        }

        let parsed: ScrapeResponse = response
            .json()
            .await
            .map_err(|e| ScrapeError::Protocol(format!("body was not valid JSON: {e}")))?;

        if !parsed.success {
            return Err(ScrapeError::Protocol(
                "success flag missing or false".to_string(),
            ));
        }

        parsed
            .data
            .and_then(|d| d.standard)
            .and_then(|s| s.custom)
            .and_then(|c| c.quotes)
            .ok_or_else(|| ScrapeError::Protocol("missing quotes payload".to_string()))
    }

    /// Connectivity probe: one OPTIONS request to the endpoint. Returns the
    /// HTTP status; transport failures map to [`ScrapeError::Network`].
    pub async fn probe(&self) -> Result<u16, ScrapeError> {
        let response = self
            .client
            .request(reqwest::Method::OPTIONS, self.endpoint.clone())
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ScrapeClient {
        let config = Config {
            api_url: "https://api.devnova.icu/api/tools/puppeteer".to_string(),
            source_url: "https://quotes.toscrape.com".to_string(),
            data_dir: std::env::temp_dir(),
        };
        ScrapeClient::new(&config).unwrap()
    }

    #[test]
    fn test_request_shape_matches_wire_contract() {
        let req = client().request_for(3, Duration::from_millis(1500));
        let json = serde_json::to_value(&req).unwrap();

        assert_json_diff::assert_json_eq!(
            json,
            serde_json::json!({
                "url": "https://quotes.toscrape.com/page/3/",
                "type": "data",
                "waitUntil": "networkidle2",
                "timeout": 30000,
                "waitForTimeout": 1500,
                "viewport": { "width": 1920, "height": 1080 },
                "extractors": {
                    "selectors": {
                        "quotes": {
                            "selector": ".quote",
                            "multiple": true,
                            "type": "html"
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = Config {
            api_url: "not a url".to_string(),
            source_url: "https://quotes.toscrape.com".to_string(),
            data_dir: std::env::temp_dir(),
        };
        assert!(ScrapeClient::new(&config).is_err());
    }

    #[test]
    fn test_response_tolerates_missing_layers() {
        let parsed: ScrapeResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.data.is_none());

        let parsed: ScrapeResponse =
            serde_json::from_str(r#"{"success": true, "data": {"standard": null}}"#).unwrap();
        assert!(parsed.data.unwrap().standard.is_none());

        let parsed: ScrapeResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!parsed.success);
    }
}
