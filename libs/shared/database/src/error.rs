use thiserror::Error;

/// Failure reported by any of the cell stores.
///
/// Constraint violations are classified so that services can turn them into
/// domain errors; everything else stays opaque and is surfaced as a storage
/// failure with its cause attached.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn unique(constraint: &str) -> Self {
        StoreError::UniqueViolation { constraint: constraint.to_string() }
    }

    pub fn foreign_key(constraint: &str) -> Self {
        StoreError::ForeignKeyViolation { constraint: constraint.to_string() }
    }

    /// Name of the violated constraint, if this is a constraint violation.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation { constraint }
            | StoreError::ForeignKeyViolation { constraint } => Some(constraint),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                if db_err.is_unique_violation() {
                    StoreError::UniqueViolation { constraint }
                } else if db_err.is_foreign_key_violation() {
                    StoreError::ForeignKeyViolation { constraint }
                } else {
                    StoreError::Database(sqlx::Error::Database(db_err))
                }
            }
            other => StoreError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_becomes_not_found() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn other_sqlx_errors_stay_opaque() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolTimedOut)));
        assert_eq!(err.constraint(), None);
    }

    #[test]
    fn constraint_helpers_expose_name() {
        assert_eq!(StoreError::unique("patients_identity_number_key").constraint(), Some("patients_identity_number_key"));
        assert_eq!(StoreError::foreign_key("appointments_patient_fkey").constraint(), Some("appointments_patient_fkey"));
    }
}
