// ⚠️ Extraction Errors
// Structured failures for document- and transaction-level problems

use thiserror::Error;

/// Errors raised while turning a transaction document into purchase summaries
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input text is not valid JSON
    #[error("Invalid JSON format in transaction file: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Input parsed, but the top level is not a JSON object
    #[error("Transaction document must be a JSON object")]
    NotAnObject,

    /// A required field is absent (or null)
    #[error("missing field: {field}")]
    MissingField { field: String },

    /// A field is present but has the wrong shape
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

impl ExtractError {
    pub fn missing(field: impl Into<String>) -> Self {
        ExtractError::MissingField { field: field.into() }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ExtractError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Field path this error points at, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ExtractError::MissingField { field } | ExtractError::InvalidField { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }
}

/// Result alias for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = ExtractError::missing("datetime");
        assert_eq!(err.to_string(), "missing field: datetime");
        assert_eq!(err.field(), Some("datetime"));
    }

    #[test]
    fn test_invalid_field_message() {
        let err = ExtractError::invalid("products[0].price.total", "expected a number");
        assert_eq!(
            err.to_string(),
            "invalid field products[0].price.total: expected a number"
        );
    }

    #[test]
    fn test_invalid_json_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{\"transactions\": [").unwrap_err();
        let err: ExtractError = serde_err.into();
        assert!(matches!(err, ExtractError::InvalidJson(_)));
        assert!(err.field().is_none());
    }
}
