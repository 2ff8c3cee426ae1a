//! HTTP utilities for upstream REST API calls

use super::error::FetchError;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let char_count = body.chars().count();
    let truncated = if char_count > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for upstream API calls
#[derive(Clone)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client
    ///
    /// No request timeout is configured: a hung request keeps its view loading.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("placedash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a single GET request and parse the body into `T`.
    ///
    /// Non-success statuses are reported as [`FetchError::Http`] without looking
    /// at the body, so a malformed error page never turns into a parse failure.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse {}: {} - {}", url, e, sanitize_for_log(&body));
            FetchError::from(e)
        })
    }
}

/// Format a fetch error for display
/// Generic notices only, raw upstream details stay in the log file
pub fn format_fetch_error(error: &FetchError) -> String {
    match error {
        FetchError::Http { status: 404 } => "Resource not found.".to_string(),
        FetchError::Http { status: 429 } => {
            "Rate limit exceeded. Please try again later.".to_string()
        },
        FetchError::Http { status } if *status >= 500 => {
            "API temporarily unavailable. Please try again.".to_string()
        },
        FetchError::Http { status } => format!("Request failed (HTTP {}).", status),
        FetchError::Network(_) => {
            "Request failed. Check your network connection and try again.".to_string()
        },
        FetchError::Parse(_) => "The API returned unexpected data.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_is_char_boundary_safe() {
        let body = "é".repeat(300);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn test_format_fetch_error_messages() {
        assert_eq!(
            format_fetch_error(&FetchError::Http { status: 404 }),
            "Resource not found."
        );
        assert!(format_fetch_error(&FetchError::Http { status: 503 }).contains("unavailable"));
        assert_eq!(
            format_fetch_error(&FetchError::Http { status: 418 }),
            "Request failed (HTTP 418)."
        );
        assert!(format_fetch_error(&FetchError::Network("refused".into())).contains("network"));
        assert!(format_fetch_error(&FetchError::Parse("eof".into())).contains("unexpected"));
    }
}
