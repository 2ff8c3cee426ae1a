//! Placeholder API Client
//!
//! Resource fetcher bound to one API base URL. Every call is a single GET
//! attempt; retrying is left to the caller.

use super::error::FetchError;
use super::http::ApiHttpClient;
use super::types::{Comment, Post, User};
use crate::resource::QueryKey;
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use url::Url;

/// Public JSONPlaceholder instance
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Main API client
#[derive(Clone)]
pub struct PlaceholderClient {
    http: ApiHttpClient,
    base_url: Url,
}

impl PlaceholderClient {
    /// Create a new client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = ApiHttpClient::new()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL for a query key
    pub fn url_for(&self, key: &QueryKey) -> Result<Url, FetchError> {
        key.url(&self.base_url)
            .map_err(|e| FetchError::Parse(format!("invalid request URL for {}: {}", key, e)))
    }

    /// Fetch a collection query (`users`, `posts?userId=1`, ...)
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
    ) -> Result<Vec<T>, FetchError> {
        let url = self.url_for(key)?;
        let items: Vec<T> = self.http.get_json(&url).await?;
        tracing::debug!("Fetched {} records for {}", items.len(), key);
        Ok(items)
    }

    /// Fetch a single-record query (`users/1`, ...)
    pub async fn fetch_record<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<T, FetchError> {
        let url = self.url_for(key)?;
        self.http.get_json(&url).await
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    pub async fn users(&self) -> Result<Vec<User>, FetchError> {
        self.fetch_collection(&QueryKey::users()).await
    }

    pub async fn user(&self, id: u64) -> Result<User, FetchError> {
        self.fetch_record(&QueryKey::user(id)).await
    }

    /// All posts, or only the posts of `user_id`
    pub async fn posts(&self, user_id: Option<u64>) -> Result<Vec<Post>, FetchError> {
        let key = match user_id {
            Some(id) => QueryKey::posts_by_user(id),
            None => QueryKey::posts(),
        };
        self.fetch_collection(&key).await
    }

    pub async fn post(&self, id: u64) -> Result<Post, FetchError> {
        self.fetch_record(&QueryKey::post(id)).await
    }

    /// All comments, or only the comments on `post_id`
    pub async fn comments(&self, post_id: Option<u64>) -> Result<Vec<Comment>, FetchError> {
        let key = match post_id {
            Some(id) => QueryKey::comments_for_post(id),
            None => QueryKey::comments(),
        };
        self.fetch_collection(&key).await
    }

    pub async fn comment(&self, id: u64) -> Result<Comment, FetchError> {
        self.fetch_record(&QueryKey::comment(id)).await
    }
}

/// Parse and validate the API base URL, ensuring a trailing slash
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("Invalid API URL: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("API URL must use http or https: {}", raw);
    }
    if url.cannot_be_a_base() {
        bail!("API URL cannot be used as a base: {}", raw);
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_trailing_slash() {
        let url = normalize_base_url("https://jsonplaceholder.typicode.com").unwrap();
        assert_eq!(url.as_str(), "https://jsonplaceholder.typicode.com/");

        let url = normalize_base_url("http://localhost:3000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn test_normalize_drops_query_and_fragment() {
        let url = normalize_base_url("http://localhost:3000/?x=1#top").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_normalize_rejects_bad_urls() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert!(normalize_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_url_for_uses_base_path() {
        let client = PlaceholderClient::new("http://localhost:3000/api").unwrap();
        let url = client.url_for(&QueryKey::posts_by_user(2)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/posts?userId=2");
    }

    #[test]
    fn test_url_build_failure_is_not_a_network_error() {
        // Bypasses normalize_base_url to get a base no path can join under
        let client = PlaceholderClient {
            http: ApiHttpClient::new().unwrap(),
            base_url: Url::parse("mailto:someone@example.com").unwrap(),
        };

        let err = client.url_for(&QueryKey::users()).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert_eq!(err.status(), None);
    }
}
