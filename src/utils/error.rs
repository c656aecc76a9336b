use crate::domain::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Quantity exceeds available stock for product {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    #[error("Invalid quantity '{input}': {reason}")]
    InvalidQuantityInput { input: String, reason: String },

    #[error("Product {product_id} not found in catalog")]
    ProductNotFound { product_id: ProductId },

    #[error("Product {product_id} is not in the cart")]
    LineNotFound { product_id: ProductId },

    #[error("Unrecognized command: {input}")]
    InvalidCommand { input: String },

    #[error("Persisted cart under '{key}' is malformed: {source}")]
    MalformedPersistedState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected cart operation, recovered by leaving the cart unchanged.
    Rejection,
    /// Bad user input at the view boundary.
    Input,
    Persistence,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::StockExceeded { .. }
            | CartError::ProductNotFound { .. }
            | CartError::LineNotFound { .. } => ErrorCategory::Rejection,
            CartError::InvalidQuantityInput { .. } | CartError::InvalidCommand { .. } => {
                ErrorCategory::Input
            }
            CartError::MalformedPersistedState { .. }
            | CartError::StorageError { .. }
            | CartError::IoError(_)
            | CartError::SerializationError(_) => ErrorCategory::Persistence,
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Rejection | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Persistence => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    /// Message shown to the shopper in a notification.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::StockExceeded { .. } => "Quantity exceeds available stock".to_string(),
            CartError::InvalidQuantityInput { .. } => "Invalid quantity".to_string(),
            CartError::ProductNotFound { .. } => "Product not found".to_string(),
            CartError::LineNotFound { .. } => "Product is not in the cart".to_string(),
            CartError::InvalidCommand { input } => format!("Unknown command: {}", input),
            CartError::MalformedPersistedState { .. } => {
                "Saved cart could not be read and was reset".to_string()
            }
            CartError::StorageError { .. } | CartError::IoError(_) => {
                "Cart could not be saved".to_string()
            }
            CartError::SerializationError(_) => "Cart data could not be encoded".to_string(),
            CartError::ConfigError { message } => format!("Configuration error: {}", message),
            CartError::ConfigValidationError { field, message } => {
                format!("Invalid configuration in {}: {}", field, message)
            }
            CartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration in {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CartError::StockExceeded { available, .. } => {
                format!("Choose a quantity of at most {}", available)
            }
            CartError::InvalidQuantityInput { .. } => {
                "Enter a whole number greater than zero".to_string()
            }
            CartError::ProductNotFound { .. } => {
                "Use 'show' to list the product ids in the catalog".to_string()
            }
            CartError::LineNotFound { .. } => "Add the product to the cart first".to_string(),
            CartError::InvalidCommand { .. } => "Type 'help' to list the commands".to_string(),
            CartError::MalformedPersistedState { .. } => {
                "No action needed, the cart starts empty".to_string()
            }
            CartError::StorageError { .. } | CartError::IoError(_) => {
                "Check that the storage directory exists and is writable".to_string()
            }
            CartError::SerializationError(_) => "Report this as a bug".to_string(),
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. } => {
                "Fix the command line flags or the catalog file and retry".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_low_severity() {
        let err = CartError::StockExceeded {
            product_id: 1,
            requested: 6,
            available: 5,
        };
        assert_eq!(err.category(), ErrorCategory::Rejection);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Quantity exceeds available stock");
        assert!(err.recovery_suggestion().contains('5'));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = CartError::ConfigValidationError {
            field: "catalog".to_string(),
            message: "expected a table".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_encode_failures_are_persistence_errors() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = CartError::from(json_err);
        assert!(matches!(err, CartError::SerializationError(_)));
        assert_eq!(err.category(), ErrorCategory::Persistence);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "Cart data could not be encoded");
    }
}
