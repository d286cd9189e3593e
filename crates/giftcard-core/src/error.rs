//! Error types for the card format engine
//!
//! The engine has exactly two failure modes. Both are raised before any work
//! is done for the call, so there is never partial output.

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// The product name is not in the catalog
    #[error("Card not supported: {0}")]
    NotFound(String),

    /// A caller-supplied argument is outside its accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CardError {
    /// Create a not-found error for a product name
    pub fn not_found(name: impl Into<String>) -> Self {
        CardError::NotFound(name.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CardError::InvalidArgument(msg.into())
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CardError::NotFound(_) => "NOT_FOUND",
            CardError::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, CardError>;
