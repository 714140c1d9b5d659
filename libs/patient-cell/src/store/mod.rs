mod memory;
mod postgres;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use shared_database::StoreError;

use crate::models::{NewPatient, Patient};

pub use memory::InMemoryPatientStore;
pub use postgres::PostgresPatientStore;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Patient>, StoreError>;

    async fn get(&self, id: i64) -> Result<Patient, StoreError>;

    async fn find_by_identity_number(&self, identity_number: &str) -> Result<Option<Patient>, StoreError>;

    async fn insert(&self, patient: NewPatient) -> Result<Patient, StoreError>;

    async fn update(&self, patient: &Patient) -> Result<(), StoreError>;

    async fn patch_address(&self, id: i64, address: &str) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
