//! Error types for front desk operations.

use thiserror::Error;

/// Errors raised by the directory, patient records and assignment queue.
///
/// Every operation that returns one of these leaves its store untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Type mismatch: {message}")]
    TypeMismatch { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },
}

impl DeskError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict { message: message.into() }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState { message: message.into() }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    /// `NotFound` is an expected outcome of assignment (the caller may
    /// requeue and retry later). Every other kind is caller misuse.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias used across the library.
pub type DeskResult<T> = Result<T, DeskError>;

/// Unified application error for the binary.
///
/// Startup (config, roster loading) and desk failures all surface
/// through this type so `main` can log them and exit.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Roster I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Desk error: {0}")]
    Desk(#[from] DeskError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_found_is_recoverable() {
        assert!(DeskError::not_found("no doctor").is_recoverable());
        assert!(!DeskError::invalid_state("empty queue").is_recoverable());
        assert!(!DeskError::conflict("duplicate").is_recoverable());
        assert!(!DeskError::type_mismatch("not a patient").is_recoverable());
        assert!(!DeskError::invalid_argument("bad id").is_recoverable());
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = DeskError::not_found("No available doctor in department: ENT");
        assert_eq!(
            err.to_string(),
            "Not found: No available doctor in department: ENT"
        );
    }

    #[test]
    fn app_error_wraps_desk_error() {
        let app: AppError = DeskError::conflict("dup").into();
        assert_eq!(app.to_string(), "Desk error: Conflict: dup");
    }
}
