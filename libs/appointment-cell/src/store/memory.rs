use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use dentist_cell::DentistStore;
use patient_cell::PatientStore;
use shared_database::{constraints, ReferenceRegistry, Referenced, StoreError};

use super::AppointmentStore;
use crate::models::{Appointment, NewAppointment};

#[derive(Debug, Clone)]
struct Row {
    id: i64,
    patient_id: i64,
    dentist_id: i64,
    date: String,
    hour: String,
    description: String,
}

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

impl Table {
    /// Name of the slot constraint `candidate` would break, if any.
    fn slot_violation(&self, candidate: &Row) -> Option<&'static str> {
        let others = self.rows.values().filter(|row| row.id != candidate.id);
        for row in others {
            if row.date != candidate.date || row.hour != candidate.hour {
                continue;
            }
            if row.patient_id == candidate.patient_id {
                return Some(constraints::APPOINTMENT_PATIENT_SLOT);
            }
            if row.dentist_id == candidate.dentist_id {
                return Some(constraints::APPOINTMENT_DENTIST_SLOT);
            }
        }
        None
    }
}

/// Appointment rows kept in process. Patients and dentists are joined in
/// from their own stores on every read, like the Postgres store does.
pub struct InMemoryAppointmentStore {
    table: RwLock<Table>,
    patients: Arc<dyn PatientStore>,
    dentists: Arc<dyn DentistStore>,
    references: Arc<ReferenceRegistry>,
}

impl InMemoryAppointmentStore {
    pub fn new(
        patients: Arc<dyn PatientStore>,
        dentists: Arc<dyn DentistStore>,
        references: Arc<ReferenceRegistry>,
    ) -> Self {
        Self {
            table: RwLock::new(Table::default()),
            patients,
            dentists,
            references,
        }
    }

    async fn join(&self, row: Row) -> Result<Appointment, StoreError> {
        Ok(Appointment {
            id: row.id,
            patient: self.patients.get(row.patient_id).await?,
            dentist: self.dentists.get(row.dentist_id).await?,
            date: row.date,
            hour: row.hour,
            description: row.description,
        })
    }

    async fn join_all(&self, rows: Vec<Row>) -> Result<Vec<Appointment>, StoreError> {
        let mut appointments = Vec::with_capacity(rows.len());
        for row in rows {
            appointments.push(self.join(row).await?);
        }
        Ok(appointments)
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        let rows: Vec<Row> = self.table.read().await.rows.values().cloned().collect();
        self.join_all(rows).await
    }

    async fn get(&self, id: i64) -> Result<Appointment, StoreError> {
        let row = self
            .table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        self.join(row).await
    }

    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        let mut table = self.table.write().await;

        let mut row = Row {
            id: 0,
            patient_id: appointment.patient.id,
            dentist_id: appointment.dentist.id,
            date: appointment.date,
            hour: appointment.hour,
            description: appointment.description,
        };
        if let Some(constraint) = table.slot_violation(&row) {
            return Err(StoreError::unique(constraint));
        }

        // Foreign keys: the referenced rows must still exist when the reference is taken.
        if !self.references.acquire(Referenced::Patient, row.patient_id) {
            return Err(StoreError::foreign_key(constraints::APPOINTMENT_PATIENT_FK));
        }
        if !self.references.acquire(Referenced::Dentist, row.dentist_id) {
            self.references.release(Referenced::Patient, row.patient_id);
            return Err(StoreError::foreign_key(constraints::APPOINTMENT_DENTIST_FK));
        }

        table.next_id += 1;
        row.id = table.next_id;
        table.rows.insert(row.id, row.clone());

        Ok(Appointment {
            id: row.id,
            patient: appointment.patient,
            dentist: appointment.dentist,
            date: row.date,
            hour: row.hour,
            description: row.description,
        })
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let current = table.rows.get(&appointment.id).ok_or(StoreError::NotFound)?;

        let candidate = Row {
            date: appointment.date.clone(),
            hour: appointment.hour.clone(),
            description: appointment.description.clone(),
            ..current.clone()
        };
        if let Some(constraint) = table.slot_violation(&candidate) {
            return Err(StoreError::unique(constraint));
        }

        table.rows.insert(candidate.id, candidate);
        Ok(())
    }

    async fn patch_description(&self, id: i64, description: &str) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.description = description.to_string();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let row = self
            .table
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound)?;
        self.references.release(Referenced::Patient, row.patient_id);
        self.references.release(Referenced::Dentist, row.dentist_id);
        Ok(())
    }

    async fn list_by_patient_identity(&self, identity_number: &str) -> Result<Vec<Appointment>, StoreError> {
        let Some(patient) = self.patients.find_by_identity_number(identity_number).await? else {
            return Ok(Vec::new());
        };

        let rows: Vec<Row> = self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|row| row.patient_id == patient.id)
            .cloned()
            .collect();
        self.join_all(rows).await
    }
}
