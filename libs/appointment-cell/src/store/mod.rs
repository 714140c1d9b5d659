mod memory;
mod postgres;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use shared_database::StoreError;

use crate::models::{Appointment, NewAppointment};

pub use memory::InMemoryAppointmentStore;
pub use postgres::PostgresAppointmentStore;

/// Persistence for appointments.
///
/// Implementations must reject a second appointment for the same patient or
/// the same dentist at one date and hour, reporting a unique violation named
/// after the slot constraint that was hit.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError>;

    async fn get(&self, id: i64) -> Result<Appointment, StoreError>;

    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError>;

    /// Rewrites date, hour and description of an existing row.
    async fn update(&self, appointment: &Appointment) -> Result<(), StoreError>;

    async fn patch_description(&self, id: i64, description: &str) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn list_by_patient_identity(&self, identity_number: &str) -> Result<Vec<Appointment>, StoreError>;
}
