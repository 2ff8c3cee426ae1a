//! View state machine
//!
//! A view depending on N keys is `Error` as soon as any dependency failed,
//! otherwise `Loading` while any is pending, otherwise `Ready`.

use crate::api::error::FetchError;
use crate::cache::{QueryEntry, QueryState};
use crate::resource::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Error,
    Ready,
}

impl ViewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewStatus::Loading => "loading",
            ViewStatus::Error => "error",
            ViewStatus::Ready => "ready",
        }
    }
}

/// Result object handed to the presentation layer: `{status, data?, error?}`
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(FetchError),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn status(&self) -> ViewStatus {
        match self {
            ViewState::Loading => ViewStatus::Loading,
            ViewState::Error(_) => ViewStatus::Error,
            ViewState::Ready(_) => ViewStatus::Ready,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Error(err) => ViewState::Error(err),
            ViewState::Ready(data) => ViewState::Ready(f(data)),
        }
    }
}

/// Combine dependency entries into one view state.
///
/// The first failed entry (in dependency order) wins over any pending one;
/// payloads of a Ready result keep the order of `entries`.
pub fn gather(entries: &[QueryEntry]) -> ViewState<Vec<Payload>> {
    if let Some(err) = entries.iter().find_map(QueryEntry::error) {
        return ViewState::Error(err.clone());
    }

    let mut payloads = Vec::with_capacity(entries.len());
    for entry in entries {
        match &entry.state {
            QueryState::Success(payload) => payloads.push(payload.clone()),
            QueryState::Pending => return ViewState::Loading,
            QueryState::Error(err) => return ViewState::Error(err.clone()),
        }
    }

    ViewState::Ready(payloads)
}
