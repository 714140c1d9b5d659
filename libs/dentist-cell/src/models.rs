use serde::{Deserialize, Serialize};

use shared_database::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dentist {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub license: String,
}

impl Dentist {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A dentist that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDentist {
    pub first_name: String,
    pub last_name: String,
    pub license: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDentistRequest {
    pub first_name: String,
    pub last_name: String,
    pub license: String,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDentistRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub license: Option<String>,
}

impl UpdateDentistRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.license.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DentistError {
    #[error("Dentist not found")]
    NotFound,

    #[error("A dentist with license {0} already exists")]
    LicenseTaken(String),

    #[error("Dentist still has appointments and cannot be deleted")]
    InUse,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for DentistError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => DentistError::NotFound,
            StoreError::ForeignKeyViolation { .. } => DentistError::InUse,
            other => DentistError::Storage(other),
        }
    }
}
