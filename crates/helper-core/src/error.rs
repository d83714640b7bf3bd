use thiserror::Error;

/// All errors produced by the matching and resource-lookup core.
///
/// Every variant is a recoverable condition meant to be turned into a
/// user-facing message by the caller. Failing to find a mentor is not an
/// error; see [`crate::matching::MatchOutcome::NoMatchFound`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A resource with the same (location, category, title) already exists.
    #[error("Resource '{title}' already exists under {category} in {location}")]
    DuplicateResource {
        location: String,
        category: String,
        title: String,
    },

    /// A mentor with the same email is already registered.
    #[error("A mentor with email {0} is already registered")]
    DuplicateMentor(String),

    /// No mentor is registered under the given email.
    #[error("No mentor found with email: {0}")]
    NotFound(String),

    /// No resource matches the given (location, category, title).
    #[error("No resource '{title}' found under {category} in {location}")]
    ResourceNotFound {
        location: String,
        category: String,
        title: String,
    },

    /// A record field is missing or malformed.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl CoreError {
    /// Shorthand for building a [`CoreError::Validation`].
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the helper crates.
pub type Result<T> = std::result::Result<T, CoreError>;
