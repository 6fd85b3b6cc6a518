//! # CLI Error Type
//!
//! Unified error type for `wholesale` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Command Function  →  AppResult<String>                                 │
//! │         │                                                               │
//! │         ├── ConfigError      ─┐                                         │
//! │         ├── ValidationError  ─┤                                         │
//! │         └── DbError          ─┴──► AppError { code, message }           │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                       stderr: "error: <message>"                        │
//! │                       --json: {"code": "...", "message": "..."}         │
//! │                       exit status from ErrorCode                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::process::ExitCode;
use wholesale_core::ValidationError;
use wholesale_db::DbError;

use crate::config::ConfigError;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json` this is what lands on stderr:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Sale not found: 550e8400-..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error categories, each with its own exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Sale id does not exist
    NotFound,

    /// Input rejected by a business rule or argument parser
    ValidationError,

    /// Storage failed
    DatabaseError,

    /// Config file or environment is unusable
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this category.
    pub fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::NotFound => 3,
            ErrorCode::ValidationError => 2,
            ErrorCode::ConfigError => 4,
            ErrorCode::DatabaseError | ErrorCode::Internal => 1,
        }
    }
}

impl AppError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts database errors to CLI errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::Validation(e) => AppError::validation(e.to_string()),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, format!("Database connection failed: {}", e))
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Failed to encode JSON: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for CLI commands.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: AppError = DbError::not_found("Sale", "abc").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Sale not found: abc");
        assert_eq!(err.code.exit_status(), 3);
    }

    #[test]
    fn test_validation_maps_to_validation_error() {
        let err: AppError = DbError::Validation(ValidationError::Required {
            field: "customer_name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "customer_name is required");
    }

    #[test]
    fn test_storage_errors_hide_sql() {
        let err: AppError = DbError::QueryFailed("no such table: sales".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("sales"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(AppError::not_found("Sale", "x")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Sale not found: x");
    }
}
