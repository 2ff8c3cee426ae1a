//! Views
//!
//! A view is a route plus the dependency set it needs resolved. This module
//! turns cache entries into the `{status, data?, error?}` result the
//! presentation layer consumes; the presentation layer never reaches into the
//! cache or the fetcher itself.
//!
//! # Module Structure
//!
//! - [`route`] - Routes, parsing and dependency sets
//! - [`state`] - The Loading / Error / Ready state machine
//! - [`data`] - Derived, serialisable per-view data
//! - [`active`] - Tracking the route on screen across refetches and navigation

pub mod active;
pub mod data;
pub mod route;
pub mod state;

pub use active::ActiveView;
pub use data::{derive_view, PostRow, ViewData};
pub use route::{Route, RouteParseError};
pub use state::{gather, ViewState, ViewStatus};

use crate::cache::{QueryCache, QueryEntry};
use crate::resource::Fetcher;
use futures::stream::{FuturesUnordered, StreamExt};

/// Resolve `route` to completion.
///
/// All dependencies are fetched concurrently. The first dependency to fail
/// ends the wait with its error, whatever the others are doing; otherwise the
/// view is derived once every dependency has succeeded. Never returns Loading
/// unless the cache is torn down mid-wait.
pub async fn load_view<F: Fetcher>(cache: &QueryCache<F>, route: Route, search: &str) -> ViewState<ViewData> {
    let keys = route.dependencies();
    let mut settled: Vec<Option<QueryEntry>> = vec![None; keys.len()];

    let mut waiting: FuturesUnordered<_> = keys
        .iter()
        .enumerate()
        .map(|(position, key)| async move { (position, cache.settled(key).await) })
        .collect();

    while let Some((position, entry)) = waiting.next().await {
        if let Some(err) = entry.error() {
            tracing::warn!("View {} failed on {}: {}", route, entry.key, err);
            return ViewState::Error(err.clone());
        }
        settled[position] = Some(entry);
    }

    let entries: Vec<QueryEntry> = settled.into_iter().flatten().collect();
    match gather(&entries) {
        ViewState::Ready(payloads) => match derive_view(route, &payloads, search) {
            Ok(data) => ViewState::Ready(data),
            Err(err) => ViewState::Error(err),
        },
        ViewState::Loading => ViewState::Loading,
        ViewState::Error(err) => ViewState::Error(err),
    }
}
