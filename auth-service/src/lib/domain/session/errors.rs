use thiserror::Error;

/// Error for session store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session storage failed: {0}")]
    Storage(String),

    #[error("Session record is corrupt: {0}")]
    Corrupt(String),
}
