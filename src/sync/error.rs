/// Failures surfaced by the data-sync client. Snapshots carry the last
/// failure by value, hence the owned string payloads.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("The request did not complete within the configured timeout.")]
    Timeout,
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("The server responded with status {status}.")]
    ServerError { status: u16, body: String },
    #[error("Rate limit exceeded for {0}.")]
    RateLimited(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl SyncError {
    /// Transient failures are worth another attempt. Client errors are
    /// terminal, and retrying an undecodable payload is unlikely to
    /// produce a decodable one.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Timeout | SyncError::Transport(_) => true,
            SyncError::ServerError { status, .. } => *status >= 500,
            SyncError::RateLimited(_) | SyncError::Malformed(_) => false,
        }
    }
}
