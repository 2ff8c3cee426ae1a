//! Cache entry records

use crate::api::error::FetchError;
use crate::resource::{Payload, QueryKey};

/// Coarse status of an entry, without its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Pending,
    Success(Payload),
    Error(FetchError),
}

/// Snapshot of one cached query.
///
/// `attempt` identifies the fetch attempt that owns the entry; a pending entry
/// moves to success or error exactly once per attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEntry {
    pub key: QueryKey,
    pub attempt: u64,
    pub state: QueryState,
}

impl QueryEntry {
    pub fn pending(key: QueryKey, attempt: u64) -> Self {
        Self {
            key,
            attempt,
            state: QueryState::Pending,
        }
    }

    pub fn status(&self) -> QueryStatus {
        match self.state {
            QueryState::Pending => QueryStatus::Pending,
            QueryState::Success(_) => QueryStatus::Success,
            QueryState::Error(_) => QueryStatus::Error,
        }
    }

    pub fn value(&self) -> Option<&Payload> {
        match &self.state {
            QueryState::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, QueryState::Pending)
    }

    /// Success or error: no further transition for this attempt
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }
}
