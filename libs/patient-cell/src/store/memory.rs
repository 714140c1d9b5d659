use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_database::{constraints, ReferenceRegistry, Referenced, StoreError};

use super::PatientStore;
use crate::models::{NewPatient, Patient};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Patient>,
}

impl Table {
    fn identity_taken(&self, identity_number: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| row.identity_number == identity_number && Some(row.id) != except)
    }
}

pub struct InMemoryPatientStore {
    table: RwLock<Table>,
    references: Arc<ReferenceRegistry>,
}

impl InMemoryPatientStore {
    pub fn new(references: Arc<ReferenceRegistry>) -> Self {
        Self {
            table: RwLock::new(Table::default()),
            references,
        }
    }
}

#[async_trait]
impl PatientStore for InMemoryPatientStore {
    async fn list_all(&self) -> Result<Vec<Patient>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Patient, StoreError> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_identity_number(&self, identity_number: &str) -> Result<Option<Patient>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|row| row.identity_number == identity_number)
            .cloned())
    }

    async fn insert(&self, patient: NewPatient) -> Result<Patient, StoreError> {
        let mut table = self.table.write().await;
        if table.identity_taken(&patient.identity_number, None) {
            return Err(StoreError::unique(constraints::PATIENT_IDENTITY_NUMBER));
        }

        table.next_id += 1;
        let stored = Patient {
            id: table.next_id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            address: patient.address,
            identity_number: patient.identity_number,
            release_date: patient.release_date,
        };
        table.rows.insert(stored.id, stored.clone());
        self.references.register(Referenced::Patient, stored.id);
        Ok(stored)
    }

    async fn update(&self, patient: &Patient) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&patient.id) {
            return Err(StoreError::NotFound);
        }
        if table.identity_taken(&patient.identity_number, Some(patient.id)) {
            return Err(StoreError::unique(constraints::PATIENT_IDENTITY_NUMBER));
        }
        table.rows.insert(patient.id, patient.clone());
        Ok(())
    }

    async fn patch_address(&self, id: i64, address: &str) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.address = address.to_string();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if !self.references.retire(Referenced::Patient, id) {
            return Err(StoreError::foreign_key(constraints::APPOINTMENT_PATIENT_FK));
        }
        table.rows.remove(&id);
        Ok(())
    }
}
