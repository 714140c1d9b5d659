use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_database::{constraints, ReferenceRegistry, Referenced, StoreError};

use super::DentistStore;
use crate::models::{Dentist, NewDentist};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Dentist>,
}

impl Table {
    fn license_taken(&self, license: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| row.license == license && Some(row.id) != except)
    }
}

/// Process-local dentist table with the same constraints as the SQL schema.
pub struct InMemoryDentistStore {
    table: RwLock<Table>,
    references: Arc<ReferenceRegistry>,
}

impl InMemoryDentistStore {
    pub fn new(references: Arc<ReferenceRegistry>) -> Self {
        Self {
            table: RwLock::new(Table::default()),
            references,
        }
    }
}

#[async_trait]
impl DentistStore for InMemoryDentistStore {
    async fn list_all(&self) -> Result<Vec<Dentist>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Dentist, StoreError> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_license(&self, license: &str) -> Result<Option<Dentist>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|row| row.license == license).cloned())
    }

    async fn insert(&self, dentist: NewDentist) -> Result<Dentist, StoreError> {
        let mut table = self.table.write().await;
        if table.license_taken(&dentist.license, None) {
            return Err(StoreError::unique(constraints::DENTIST_LICENSE));
        }

        table.next_id += 1;
        let stored = Dentist {
            id: table.next_id,
            first_name: dentist.first_name,
            last_name: dentist.last_name,
            license: dentist.license,
        };
        table.rows.insert(stored.id, stored.clone());
        self.references.register(Referenced::Dentist, stored.id);
        Ok(stored)
    }

    async fn update(&self, dentist: &Dentist) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&dentist.id) {
            return Err(StoreError::NotFound);
        }
        if table.license_taken(&dentist.license, Some(dentist.id)) {
            return Err(StoreError::unique(constraints::DENTIST_LICENSE));
        }
        table.rows.insert(dentist.id, dentist.clone());
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if !self.references.retire(Referenced::Dentist, id) {
            return Err(StoreError::foreign_key(constraints::APPOINTMENT_DENTIST_FK));
        }
        table.rows.remove(&id);
        Ok(())
    }
}
