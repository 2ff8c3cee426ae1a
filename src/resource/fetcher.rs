//! Resource Fetcher
//!
//! The [`Fetcher`] trait is the seam between the query cache and the network.
//! The cache only ever sees keys and payloads, so tests swap in fakes.

use super::key::{QueryKey, ResourceType};
use super::payload::Payload;
use crate::api::client::PlaceholderClient;
use crate::api::error::FetchError;
use crate::api::types::{Comment, Post, User};
use std::future::Future;

/// Source of query results.
///
/// One call is one attempt: implementations must not retry.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, key: &QueryKey) -> impl Future<Output = Result<Payload, FetchError>> + Send;
}

impl Fetcher for PlaceholderClient {
    async fn fetch(&self, key: &QueryKey) -> Result<Payload, FetchError> {
        let single = key.is_single_record();

        let payload: Payload = match (key.resource, single) {
            (ResourceType::Users, false) => self.fetch_collection::<User>(key).await?.into(),
            (ResourceType::Users, true) => self.fetch_record::<User>(key).await?.into(),
            (ResourceType::Posts, false) => self.fetch_collection::<Post>(key).await?.into(),
            (ResourceType::Posts, true) => self.fetch_record::<Post>(key).await?.into(),
            (ResourceType::Comments, false) => {
                self.fetch_collection::<Comment>(key).await?.into()
            },
            (ResourceType::Comments, true) => self.fetch_record::<Comment>(key).await?.into(),
        };

        Ok(payload)
    }
}
