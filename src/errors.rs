//! Error types for sensegraph-rs.

/// Alias for Results returning [`SensegraphError`].
pub type Result<T> = std::result::Result<T, SensegraphError>;

/// Top-level error type for sensegraph-rs.
#[derive(Debug, thiserror::Error)]
pub enum SensegraphError {
    /// Graph construction was requested with neither a topic list nor a
    /// user identifier, or the runtime configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(#[from] KbError),
}

/// Knowledge-base client errors.
///
/// A failed lookup is fatal to the graph being built from it; the
/// orchestrator isolates these per entity rather than aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("API error: HTTP {status} — {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
