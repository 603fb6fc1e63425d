//! Store Errors
//!
//! TigerStyle: One error type for every backend, typed by outcome.

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by a [`StudentStore`](super::StudentStore).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The id does not resolve to an existing record.
    #[error("student not found: {id}")]
    NotFound {
        /// The id that was looked up
        id: String,
    },

    /// Missing required field, out-of-range gpa, or duplicate unique field.
    #[error("{0}")]
    Validation(String),

    /// Connectivity or any other unexpected backend failure.
    #[error("{0}")]
    Failure(String),
}

impl StoreError {
    /// Create a not-found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a duplicate-key validation error for a unique field.
    #[must_use]
    pub fn duplicate(field: &str, value: &str) -> Self {
        Self::Validation(format!("duplicate key: {field} \"{value}\" already exists"))
    }

    /// Create a backend failure.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Check if this is a not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_field() {
        let err = StoreError::duplicate("email", "ann@x.com");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "duplicate key: email \"ann@x.com\" already exists"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "student not found: abc");
    }
}
