use thiserror::Error;

/// Errors surfaced by the session shell.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Login endpoint answered non-2xx, or the request itself failed
    #[error("{0}")]
    Authentication(String),

    /// Overview request failed or returned something that is not JSON
    #[error("Failed to load overview: {0}")]
    Overview(String),
}
