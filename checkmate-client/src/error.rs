//! Client error types

use thiserror::Error;

/// Client error type
///
/// Transport failures and server-side rejections are normalized into one
/// taxonomy so call sites handle failure through a single channel.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (no response, timeout, abort)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Response body was not the expected JSON shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No session; the operation requires a logged-in user
    #[error("User not logged in")]
    NotLoggedIn,

    /// Local precondition failed (empty field, invalid email, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unit id not present in the current draft
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Payment refused locally: nothing is owed
    #[error("Nothing owed on this receipt")]
    NothingOwed,

    /// Payment refused locally: a payment request is already outstanding
    #[error("Payment already in progress")]
    PaymentPending,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Server rejection with the backend's message, or a fallback when the
    /// backend sent none
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected(message.unwrap_or_else(|| "Request rejected by server".to_string()))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
