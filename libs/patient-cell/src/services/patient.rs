use std::sync::Arc;

use tracing::{debug, info};

use shared_database::{constraints, StoreError};
use shared_utils::dates::normalize_date;

use crate::models::{CreatePatientRequest, NewPatient, Patient, PatientError, UpdatePatientRequest};
use crate::store::PatientStore;

pub struct PatientService {
    store: Arc<dyn PatientStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        debug!("Creating new patient profile for: {}", request.identity_number);

        let new_patient = NewPatient {
            first_name: required("first_name", &request.first_name)?,
            last_name: required("last_name", &request.last_name)?,
            address: required("address", &request.address)?,
            identity_number: required("identity_number", &request.identity_number)?,
            release_date: release_date(&request.release_date)?,
        };

        self.ensure_identity_available(&new_patient.identity_number, None).await?;

        let identity_number = new_patient.identity_number.clone();
        let patient = self
            .store
            .insert(new_patient)
            .await
            .map_err(|e| map_write_error(e, &identity_number))?;

        info!("Patient {} created with ID {}", patient.full_name(), patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, id: i64) -> Result<Patient, PatientError> {
        debug!("Fetching patient profile: {}", id);
        Ok(self.store.get(id).await?)
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn update_patient(
        &self,
        id: i64,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Updating patient profile: {}", id);

        let mut patient = self.store.get(id).await?;

        if let Some(first_name) = request.first_name {
            patient.first_name = required("first_name", &first_name)?;
        }
        if let Some(last_name) = request.last_name {
            patient.last_name = required("last_name", &last_name)?;
        }
        if let Some(address) = request.address {
            patient.address = required("address", &address)?;
        }
        if let Some(date) = request.release_date {
            patient.release_date = release_date(&date)?;
        }
        if let Some(identity_number) = request.identity_number {
            patient.identity_number = required("identity_number", &identity_number)?;
            self.ensure_identity_available(&patient.identity_number, Some(id)).await?;
        }

        self.store
            .update(&patient)
            .await
            .map_err(|e| map_write_error(e, &patient.identity_number))?;

        info!("Patient {} updated", id);
        Ok(patient)
    }

    /// Changes only the address and returns the stored patient.
    pub async fn patch_address(&self, id: i64, address: &str) -> Result<Patient, PatientError> {
        let address = required("address", address)?;
        self.store.patch_address(id, &address).await?;
        info!("Patient {} address updated", id);
        self.get_patient(id).await
    }

    pub async fn delete_patient(&self, id: i64) -> Result<(), PatientError> {
        debug!("Deleting patient {}", id);
        self.store.delete(id).await?;
        info!("Patient {} deleted", id);
        Ok(())
    }

    async fn ensure_identity_available(
        &self,
        identity_number: &str,
        owner: Option<i64>,
    ) -> Result<(), PatientError> {
        match self.store.find_by_identity_number(identity_number).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(PatientError::IdentityNumberTaken(identity_number.to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, PatientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PatientError::ValidationError(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn release_date(raw: &str) -> Result<String, PatientError> {
    normalize_date(raw).map_err(PatientError::ValidationError)
}

fn map_write_error(err: StoreError, identity_number: &str) -> PatientError {
    match err.constraint() {
        Some(constraints::PATIENT_IDENTITY_NUMBER) => {
            PatientError::IdentityNumberTaken(identity_number.to_string())
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_database::{ReferenceRegistry, Referenced};

    use crate::store::{InMemoryPatientStore, MockPatientStore};

    fn service_with(references: Arc<ReferenceRegistry>) -> PatientService {
        PatientService::new(Arc::new(InMemoryPatientStore::new(references)))
    }

    fn service() -> PatientService {
        service_with(Arc::new(ReferenceRegistry::new()))
    }

    fn intake(identity_number: &str) -> CreatePatientRequest {
        CreatePatientRequest {
            first_name: "Lucia".to_string(),
            last_name: "Fernandez".to_string(),
            address: "Av. 22 # 40".to_string(),
            identity_number: identity_number.to_string(),
            release_date: "30/03/2024".to_string(),
        }
    }

    #[tokio::test]
    async fn intake_normalizes_release_date() {
        let patient = service().create_patient(intake("538434")).await.unwrap();
        assert_eq!(patient.release_date, "2024-03-30");
        assert_eq!(patient.full_name(), "Lucia Fernandez");
    }

    #[tokio::test]
    async fn invalid_release_date_fails_validation() {
        let mut request = intake("538434");
        request.release_date = "someday".to_string();
        assert_matches!(service().create_patient(request).await, Err(PatientError::ValidationError(_)));
    }

    #[tokio::test]
    async fn identity_number_must_be_unique() {
        let service = service();
        service.create_patient(intake("538434")).await.unwrap();

        let result = service.create_patient(intake("538434")).await;
        assert_matches!(result, Err(PatientError::IdentityNumberTaken(number)) if number == "538434");
    }

    #[tokio::test]
    async fn update_merges_present_fields() {
        let service = service();
        let created = service.create_patient(intake("538434")).await.unwrap();

        let updated = service
            .update_patient(
                created.id,
                UpdatePatientRequest {
                    first_name: Some("Lucía".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Lucía");
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.identity_number, created.identity_number);
    }

    #[tokio::test]
    async fn update_rejects_taken_identity_number() {
        let service = service();
        service.create_patient(intake("538434")).await.unwrap();
        let other = service.create_patient(intake("700001")).await.unwrap();

        let result = service
            .update_patient(
                other.id,
                UpdatePatientRequest {
                    identity_number: Some("538434".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert_matches!(result, Err(PatientError::IdentityNumberTaken(_)));
    }

    #[tokio::test]
    async fn patch_address_changes_only_address() {
        let service = service();
        let created = service.create_patient(intake("538434")).await.unwrap();

        let patched = service.patch_address(created.id, "Calle 9 # 12").await.unwrap();
        assert_eq!(patched.address, "Calle 9 # 12");
        assert_eq!(patched.first_name, created.first_name);

        assert_matches!(service.patch_address(created.id, "  ").await, Err(PatientError::ValidationError(_)));
        assert_matches!(service.patch_address(404, "Calle 1").await, Err(PatientError::NotFound));
    }

    #[tokio::test]
    async fn delete_respects_appointment_references() {
        let references = Arc::new(ReferenceRegistry::new());
        let service = service_with(references.clone());
        let created = service.create_patient(intake("538434")).await.unwrap();

        assert!(references.acquire(Referenced::Patient, created.id));
        assert_matches!(service.delete_patient(created.id).await, Err(PatientError::InUse));

        references.release(Referenced::Patient, created.id);
        assert!(service.delete_patient(created.id).await.is_ok());
        assert_matches!(service.get_patient(created.id).await, Err(PatientError::NotFound));
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let mut store = MockPatientStore::new();
        store
            .expect_get()
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolClosed)));

        let service = PatientService::new(Arc::new(store));
        assert_matches!(service.get_patient(1).await, Err(PatientError::Storage(_)));
    }
}
