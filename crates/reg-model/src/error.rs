//! Error types for the record model.

use thiserror::Error;

/// Errors raised while interpreting model identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Collection name is not one of the known submission sources.
    #[error("unknown collection: {name}")]
    UnknownCollection { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::UnknownCollection {
            name: "admins".to_string(),
        };
        assert_eq!(err.to_string(), "unknown collection: admins");
    }
}
