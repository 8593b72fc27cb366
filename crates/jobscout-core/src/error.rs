use thiserror::Error;

/// Application-wide error types for jobscout.
#[derive(Error, Debug)]
pub enum AppError {
    /// Server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// DNS or connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Embedded JSON or JSON-LD failed to parse.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Site-list or keyword-list problem.
    #[error("config error: {0}")]
    Config(String),

    /// Reading or writing a flat file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// True for transport-level failures. A transport error skips the
    /// current fetch but never aborts the crawl.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::Timeout(_) | AppError::Network(_)
        )
    }
}
