use thiserror::Error;

/// Every way an invocation can fail.
///
/// Nothing is retried or recovered from; the first error aborts the
/// operation that raised it and is handed back to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote payload is missing a field we rely on, or has the wrong shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The export attribute is not a field of both Artist and Track.
    #[error("Invalid attribute '{0}', expected one of: name, id, uri")]
    InvalidAttribute(String),

    /// Transport-level failure on any remote call.
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("Spotify API responded with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
