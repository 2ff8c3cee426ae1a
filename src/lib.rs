//! placedash core
//!
//! Data layer behind the placedash terminal dashboard: fetching users, posts and
//! comments from a JSONPlaceholder-compatible API, memoizing them per query key,
//! and deriving the joined/filtered views the UI renders.
//!
//! # Module Structure
//!
//! - [`api`] - HTTP client, record types and the fetch error taxonomy
//! - [`resource`] - Resource types, query keys, payloads and the [`resource::Fetcher`] seam
//! - [`cache`] - Per-key query cache with in-flight deduplication
//! - [`derive`] - Pure join/aggregate functions over fetched collections
//! - [`view`] - Routes, dependency sets and the view state machine
//! - [`config`] - Persistent user configuration

pub mod api;
pub mod cache;
pub mod config;
pub mod derive;
pub mod resource;
pub mod view;

/// Version injected at compile time via PLACEDASH_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("PLACEDASH_VERSION") {
    Some(v) => v,
    None => "dev",
};
