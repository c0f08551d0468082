//! # Booking Error Types
//!
//! Typed error handling for the pawtrip storefront.
//! The pricing calculator itself never fails; everything around it
//! (catalog lookups, booking validation, config) returns `BookingResult<T>`.

use thiserror::Error;

/// Core error type for catalog and booking operations
#[derive(Debug, Error)]
pub enum BookingError {
    /// Configuration errors (missing catalog, bad env values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Product exists but is not bookable
    #[error("Product is not available: {product_id}")]
    ProductUnavailable { product_id: String },

    /// Guest/dog counts do not fit the product
    #[error("Invalid participants: {message}")]
    InvalidParticipants { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BookingError::Configuration(_) => 500,
            BookingError::InvalidRequest(_) => 400,
            BookingError::ProductNotFound { .. } => 404,
            BookingError::ProductUnavailable { .. } => 409,
            BookingError::InvalidParticipants { .. } => 422,
            BookingError::Serialization(_) => 500,
            BookingError::Internal(_) => 500,
        }
    }

    /// Returns true if the caller can fix the request and try again
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    pub(crate) fn participants(message: impl Into<String>) -> Self {
        BookingError::InvalidParticipants {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for BookingError {
    fn from(err: toml::de::Error) -> Self {
        BookingError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Serialization(err.to_string())
    }
}

/// Result type alias for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BookingError::InvalidRequest("test".into()).status_code(), 400);
        assert_eq!(
            BookingError::ProductNotFound {
                product_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(BookingError::participants("no dogs").status_code(), 422);
        assert_eq!(BookingError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_client_errors() {
        assert!(BookingError::ProductUnavailable {
            product_id: "x".into()
        }
        .is_client_error());
        assert!(!BookingError::Configuration("missing".into()).is_client_error());
    }

    #[test]
    fn test_toml_error_conversion() {
        let err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let converted: BookingError = err.into();
        assert!(matches!(converted, BookingError::Serialization(_)));
    }
}
