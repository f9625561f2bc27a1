use thiserror::Error;

/// Why a lookup that reached (or tried to reach) the network produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Upstream answered with a status other than 200.
    Status(u16),
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    Transport(String),
    /// Upstream answered 200 but the payload carried an error message
    /// (the Red List API does this for invalid tokens).
    Api(String),
    /// Upstream resolved no species for the name.
    NotFound,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Status(code) => write!(f, "HTTP {}", code),
            FailureReason::Transport(msg) => write!(f, "transport error: {}", msg),
            FailureReason::Api(msg) => write!(f, "red list api error: {}", msg),
            FailureReason::NotFound => write!(f, "species not found"),
        }
    }
}

/// Every way a species lookup can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Required configuration (the API credential) is missing or unreadable.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The species name was empty after trimming.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The request failed or upstream answered without a usable species.
    #[error("lookup failed: {0}")]
    LookupFailed(FailureReason),
    /// The response body could not be interpreted.
    #[error("lookup failed: malformed response: {0}")]
    MalformedResponse(String),
}

impl LookupError {
    /// HTTP status carried by the error, if upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::LookupFailed(FailureReason::Status(code)) => Some(*code),
            _ => None,
        }
    }

    /// True for errors raised after a request was attempted.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            LookupError::LookupFailed(_) | LookupError::MalformedResponse(_)
        )
    }
}
