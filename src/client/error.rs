//! Error type for stats backend calls

use std::fmt;

/// Errors that can occur while talking to the stats backend
///
/// Every StatsClient call reports failure through this type. Nothing is
/// retried here; the next scheduled poll or the next user action is the retry.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection refused, reset, timed out, DNS failure...
    Network(String),
    /// Backend answered with a non-2xx status
    Status { status: u16, body: String },
    /// Body was not valid JSON or was missing required fields
    Decode(String),
    /// Rejected locally before any request was issued
    InvalidInput(String),
}

impl FetchError {
    /// Short tag used in log lines and the status strip
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::InvalidInput(_) => "invalid-input",
        }
    }

    /// True when the error never left the process
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "Backend returned HTTP {}", status)
                } else {
                    write!(f, "Backend returned HTTP {}: {}", status, body)
                }
            }
            Self::Decode(msg) => write!(f, "Malformed response: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = FetchError::Status {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned HTTP 503: busy");

        let bare = FetchError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "Backend returned HTTP 404");
    }

    #[test]
    fn only_invalid_input_is_local() {
        assert!(FetchError::InvalidInput("empty".into()).is_local());
        assert!(!FetchError::Network("refused".into()).is_local());
        assert!(!FetchError::Decode("eof".into()).is_local());
    }

    #[test]
    fn serde_errors_map_to_decode() {
        let err: FetchError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert_eq!(err.kind(), "decode");
    }
}
