use std::sync::Arc;

use tracing::{debug, info};

use shared_database::{constraints, StoreError};

use crate::models::{CreateDentistRequest, Dentist, DentistError, NewDentist, UpdateDentistRequest};
use crate::store::DentistStore;

pub struct DentistService {
    store: Arc<dyn DentistStore>,
}

impl DentistService {
    pub fn new(store: Arc<dyn DentistStore>) -> Self {
        Self { store }
    }

    pub async fn create_dentist(&self, request: CreateDentistRequest) -> Result<Dentist, DentistError> {
        debug!("Creating dentist with license {}", request.license);

        let new_dentist = NewDentist {
            first_name: required("first_name", &request.first_name)?,
            last_name: required("last_name", &request.last_name)?,
            license: required("license", &request.license)?,
        };

        self.ensure_license_available(&new_dentist.license, None).await?;

        let license = new_dentist.license.clone();
        let dentist = self
            .store
            .insert(new_dentist)
            .await
            .map_err(|e| map_write_error(e, &license))?;

        info!("Dentist {} created with ID {}", dentist.full_name(), dentist.id);
        Ok(dentist)
    }

    pub async fn get_dentist(&self, id: i64) -> Result<Dentist, DentistError> {
        debug!("Fetching dentist {}", id);
        Ok(self.store.get(id).await?)
    }

    pub async fn list_dentists(&self) -> Result<Vec<Dentist>, DentistError> {
        Ok(self.store.list_all().await?)
    }

    /// Merges the present fields of `request` into the stored dentist.
    pub async fn update_dentist(
        &self,
        id: i64,
        request: UpdateDentistRequest,
    ) -> Result<Dentist, DentistError> {
        debug!("Updating dentist {}", id);

        let mut dentist = self.store.get(id).await?;

        if let Some(first_name) = request.first_name {
            dentist.first_name = required("first_name", &first_name)?;
        }
        if let Some(last_name) = request.last_name {
            dentist.last_name = required("last_name", &last_name)?;
        }
        if let Some(license) = request.license {
            dentist.license = required("license", &license)?;
            self.ensure_license_available(&dentist.license, Some(id)).await?;
        }

        self.store
            .update(&dentist)
            .await
            .map_err(|e| map_write_error(e, &dentist.license))?;

        info!("Dentist {} updated", id);
        Ok(dentist)
    }

    /// Like [`update_dentist`](Self::update_dentist) but refuses an empty patch.
    pub async fn patch_dentist(
        &self,
        id: i64,
        request: UpdateDentistRequest,
    ) -> Result<Dentist, DentistError> {
        if request.is_empty() {
            return Err(DentistError::ValidationError(
                "no data provided for updating dentist".to_string(),
            ));
        }
        self.update_dentist(id, request).await
    }

    pub async fn delete_dentist(&self, id: i64) -> Result<(), DentistError> {
        debug!("Deleting dentist {}", id);
        self.store.delete(id).await?;
        info!("Dentist {} deleted", id);
        Ok(())
    }

    async fn ensure_license_available(&self, license: &str, owner: Option<i64>) -> Result<(), DentistError> {
        match self.store.find_by_license(license).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(DentistError::LicenseTaken(license.to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, DentistError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DentistError::ValidationError(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn map_write_error(err: StoreError, license: &str) -> DentistError {
    match err.constraint() {
        Some(constraints::DENTIST_LICENSE) => DentistError::LicenseTaken(license.to_string()),
        _ => err.into(),
    }
}
