use thiserror::Error;

/// Message shown when an upstream failure carries no usable `message` field.
pub const FALLBACK_MESSAGE: &str = "City not found";

/// A failed weather lookup. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Upstream answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request could not be sent or its body could not be read.
    #[error("{0}")]
    Transport(String),

    /// The body arrived but did not have the expected shape.
    #[error("{0}")]
    Malformed(String),
}

impl QueryError {
    /// Build a `Rejected` error from a status and the raw error body.
    ///
    /// Uses the body's `message` field when present and non-blank.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        QueryError::Rejected { status, message }
    }
}
