//! Error types for vnlunar.

use thiserror::Error;

/// Errors that can occur while generating lunar calendar events.
///
/// A lunar date that has no Gregorian counterpart in the scanned window is
/// not an error; the locator reports it as `None`.
#[derive(Error, Debug)]
pub enum LunarError {
    #[error("{0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for vnlunar operations.
pub type LunarResult<T> = Result<T, LunarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message_is_passed_through() {
        let err = LunarError::Format("invalid format: foo".into());
        assert_eq!(err.to_string(), "invalid format: foo");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LunarError = io.into();
        assert!(matches!(err, LunarError::Io(_)));
        assert_eq!(err.to_string(), "IO error: missing");
    }
}
