use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Converts Diesel errors into structured `AppError` variants.
///
/// Applied to every diesel error leaving a repository, so services only ever
/// see `Duplicate`, `Validation`, `NotFound` or an opaque `Database` error.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        // PostgreSQL reports "Key (field)=(value)" in DETAIL, not in the primary message
        let message = match info.details() {
            Some(details) => format!("{}\n{}", info.message(), details),
            None => info.message().to_string(),
        };
        let constraint_name = info.constraint_name();

        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(&message, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(&message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(&message, constraint_name).map(
                    |(entity, field, referenced_value)| AppError::Validation {
                        field,
                        reason: format!(
                            "Invalid reference from {} with value '{}'",
                            entity, referenced_value
                        ),
                    },
                )
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(&message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    },
                )
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{:?}: {}", kind, message),
        })
    }
}
