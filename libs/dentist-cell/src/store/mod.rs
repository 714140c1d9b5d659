mod memory;
mod postgres;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use shared_database::StoreError;

use crate::models::{Dentist, NewDentist};

pub use memory::InMemoryDentistStore;
pub use postgres::PostgresDentistStore;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DentistStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Dentist>, StoreError>;

    async fn get(&self, id: i64) -> Result<Dentist, StoreError>;

    async fn find_by_license(&self, license: &str) -> Result<Option<Dentist>, StoreError>;

    async fn insert(&self, dentist: NewDentist) -> Result<Dentist, StoreError>;

    /// Overwrites every column of an existing row.
    async fn update(&self, dentist: &Dentist) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
