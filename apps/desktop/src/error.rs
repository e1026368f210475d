//! # API Error Type
//!
//! Unified error type for desktop commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Garden Product Manager                 │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── DbError::NotFound          → NOT_FOUND                     │
//! │         ├── DbError::Validation        → VALIDATION_ERROR              │
//! │         ├── DbError::UniqueViolation   → VALIDATION_ERROR              │
//! │         └── engine errors              → DATABASE_ERROR (logged,       │
//! │                                          generic message)              │
//! │                                                                         │
//! │  UI receives: { "code": "NOT_FOUND", "message": "Order not found: 9" } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use garden_core::CoreError;
use garden_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// API error returned from desktop commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::Validation(e) => ApiError::from(e),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection busy")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyOrder => ApiError::validation(err.to_string()),
            CoreError::OrderIdExhausted { .. } => {
                tracing::error!("{}", err);
                ApiError::new(ErrorCode::Internal, "No order id available")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Errors that stop the application before it serves any command.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Store unreachable, directory uncreatable or migration failed.
    #[error("Database startup failed: {0}")]
    Database(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::ValidationError;

    #[test]
    fn test_not_found_maps_to_code() {
        let err = ApiError::from(DbError::not_found("Order", "9"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: 9");
    }

    #[test]
    fn test_validation_passes_message_through() {
        let err = ApiError::from(DbError::from(CoreError::EmptyOrder));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cannot create an order with no items");

        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        }));
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_exhausted_order_ids_are_internal() {
        let err = ApiError::from(DbError::from(CoreError::OrderIdExhausted { max: i64::MAX }));
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_engine_errors_are_generic() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Product", "42")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }
}
