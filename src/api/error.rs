//! Fetch error taxonomy

use thiserror::Error;

/// Why a single fetch attempt failed.
///
/// Errors are stored in cache entries and handed to every view depending on
/// the failed key, so they are cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure, no response was received
    #[error("network failure: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("API request failed: HTTP {status}")]
    Http { status: u16 },

    /// Success status but the body did not match the expected record shape,
    /// or a request URL that could not be built
    #[error("malformed data: {0}")]
    Parse(String),
}

impl FetchError {
    /// HTTP status, when the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        assert_eq!(FetchError::Http { status: 404 }.status(), Some(404));
        assert_eq!(FetchError::Network("refused".into()).status(), None);
        assert_eq!(FetchError::Parse("eof".into()).status(), None);
    }

    #[test]
    fn test_not_found() {
        assert!(FetchError::Http { status: 404 }.is_not_found());
        assert!(!FetchError::Http { status: 500 }.is_not_found());
    }

    #[test]
    fn test_parse_error_from_serde() {
        let err: FetchError = serde_json::from_str::<Vec<u64>>("{").unwrap_err().into();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
