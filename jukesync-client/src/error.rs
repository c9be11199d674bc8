use thiserror::Error;

/// Unified error type for all server communication.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured server URL could not be parsed.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request failed below the HTTP layer (connection, middleware).
    #[error("Request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// The request failed at the HTTP layer or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("Server returned unexpected status {status}")]
    UnexpectedStatus { status: reqwest::StatusCode },

    /// Poller was stopped.
    #[error("State poller stopped")]
    PollerStopped,
}

/// Convenience type alias for Results with `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
