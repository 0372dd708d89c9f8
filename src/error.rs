//! Error types for the `fincontrol` library.

/// All errors that can occur when using the `fincontrol` library.
#[derive(Debug, thiserror::Error)]
pub enum FinControlError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// A required form field was left empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// An amount could not be parsed as a finite, non-negative number.
    #[error("invalid amount: \"{input}\"")]
    InvalidAmount {
        /// The raw input that failed to parse.
        input: String,
    },

    /// A date could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date (expected YYYY-MM-DD): \"{input}\"")]
    InvalidDate {
        /// The raw input that failed to parse.
        input: String,
    },

    /// Login was attempted with an empty email or password.
    #[error("email and password are required")]
    MissingCredentials,

    /// A report is already being generated by the same generator.
    #[error("a report is already being generated")]
    ReportInProgress,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FinControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = FinControlError::from(serde_err);
        assert!(matches!(err, FinControlError::Serialization(_)));
        let msg = err.to_string();
        assert!(msg.contains("serialization error"));
    }

    #[test]
    fn error_storage_display() {
        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "quota exceeded");
        let err = FinControlError::Storage(Box::new(inner));
        let msg = err.to_string();
        assert!(msg.contains("storage error"));
        assert!(msg.contains("quota exceeded"));
    }

    #[test]
    fn error_missing_field_names_the_field() {
        let err = FinControlError::MissingField {
            field: "description",
        };
        assert_eq!(err.to_string(), "missing required field: description");
    }

    #[test]
    fn error_invalid_amount_quotes_input() {
        let err = FinControlError::InvalidAmount {
            input: "abc".to_owned(),
        };
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinControlError>();
    }
}
