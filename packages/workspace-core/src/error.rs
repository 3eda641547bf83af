use thiserror::Error;

/// Failures surfaced by workspace operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// Rejected locally, before any network call (e.g. blank code).
    /// Surfaced inline next to the offending control.
    #[error("{0}")]
    Validation(String),
    /// Transport failure or timeout. Surfaced as a dismissible message;
    /// previously displayed results are kept.
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success response from the judge or catalog.
    #[error("{message}")]
    Server {
        code: Option<String>,
        message: String,
    },
    /// Corrupted locally persisted state. Recovered with defaults and never
    /// shown to the user.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WorkspaceError {
    /// Build a server error, keeping the server's message verbatim when it
    /// sent one.
    pub fn server(code: Option<String>, message: Option<String>) -> Self {
        Self::Server {
            code,
            message: message
                .unwrap_or_else(|| "The server returned an unexpected error".to_string()),
        }
    }
}
