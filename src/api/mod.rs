//! Upstream API interaction module
//!
//! This module talks to the read-only JSONPlaceholder REST API and turns its
//! loosely typed JSON into strongly typed records at the fetch boundary.
//!
//! # Module Structure
//!
//! - [`client`] - Resource fetcher bound to an API base URL
//! - [`http`] - HTTP utilities for GET calls and user-facing error notices
//! - [`types`] - `User`, `Post` and `Comment` record shapes
//! - [`error`] - Fetch error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use placedash::api::client::PlaceholderClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = PlaceholderClient::new("https://jsonplaceholder.typicode.com")?;
//!     let users = client.users().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{PlaceholderClient, DEFAULT_API_URL};
pub use error::FetchError;
pub use types::{Address, Comment, Company, Geo, Location, Post, User};
