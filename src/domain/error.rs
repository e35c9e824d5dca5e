use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Insufficient stock: {message}")]
    InsufficientStock { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Transient storage contention (serialization failure, deadlock).
    /// Callers may retry the operation.
    #[error("Storage conflict: {message}")]
    StorageConflict { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn insufficient_stock(message: impl Into<String>) -> Self {
        Self::InsufficientStock {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn storage_conflict(message: impl Into<String>) -> Self {
        Self::StorageConflict {
            message: message.into(),
        }
    }

    /// Whether the error is transient contention worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Sweet not found");
        assert_eq!(error.to_string(), "Not found: Sweet not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Resource already exists");
        assert_eq!(error.to_string(), "Conflict: Resource already exists");
    }

    #[test]
    fn test_insufficient_stock_error() {
        let error = DomainError::insufficient_stock("Insufficient stock. Only 3 available.");
        assert_eq!(
            error.to_string(),
            "Insufficient stock: Insufficient stock. Only 3 available."
        );
        assert!(!error.is_transient());
    }

    #[test]
    fn test_transient_classification() {
        assert!(DomainError::storage_conflict("serialization failure").is_transient());
        assert!(!DomainError::storage("connection refused").is_transient());
        assert!(!DomainError::not_found("x").is_transient());
    }
}
