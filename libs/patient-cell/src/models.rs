use serde::{Deserialize, Serialize};

use shared_database::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    #[serde(alias = "dni")]
    pub identity_number: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub release_date: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub identity_number: String,
    pub release_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    #[serde(alias = "dni")]
    pub identity_number: String,
    pub release_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    #[serde(alias = "dni")]
    pub identity_number: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchAddressRequest {
    pub address: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("A patient with identity number {0} already exists")]
    IdentityNumberTaken(String),

    #[error("Patient still has appointments and cannot be deleted")]
    InUse,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for PatientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => PatientError::NotFound,
            StoreError::ForeignKeyViolation { .. } => PatientError::InUse,
            other => PatientError::Storage(other),
        }
    }
}
