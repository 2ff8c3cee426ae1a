//! Resource abstraction layer
//!
//! Describes what can be fetched from the upstream API independently of how
//! it is fetched or cached.
//!
//! # Architecture
//!
//! - [`key`] - Resource types, filters and the [`QueryKey`] identifying a query
//! - [`payload`] - Typed, cheaply clonable query results
//! - [`fetcher`] - The [`Fetcher`] trait and its HTTP implementation
//!
//! # Example
//!
//! ```ignore
//! use placedash::api::PlaceholderClient;
//! use placedash::resource::{Fetcher, QueryKey};
//!
//! async fn posts_of(client: &PlaceholderClient, user_id: u64) -> usize {
//!     match client.fetch(&QueryKey::posts_by_user(user_id)).await {
//!         Ok(payload) => payload.len(),
//!         Err(_) => 0,
//!     }
//! }
//! ```

pub mod fetcher;
pub mod key;
pub mod payload;

pub use fetcher::Fetcher;
pub use key::{Filter, QueryKey, ResourceType};
pub use payload::Payload;
