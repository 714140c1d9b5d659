use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use shared_database::StoreError;

use super::PatientStore;
use crate::models::{NewPatient, Patient};

const PATIENT_COLUMNS: &str = "id, first_name, last_name, address, identity_number, release_date";

#[derive(Clone)]
pub struct PostgresPatientStore {
    pool: PgPool,
}

impl PostgresPatientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn patient_from_row(row: &PgRow) -> Result<Patient, sqlx::Error> {
    Ok(Patient {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        address: row.try_get("address")?,
        identity_number: row.try_get("identity_number")?,
        release_date: row.try_get("release_date")?,
    })
}

#[async_trait]
impl PatientStore for PostgresPatientStore {
    async fn list_all(&self) -> Result<Vec<Patient>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {} FROM patients ORDER BY id", PATIENT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        let patients = rows
            .iter()
            .map(patient_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(patients)
    }

    async fn get(&self, id: i64) -> Result<Patient, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM patients WHERE id = $1", PATIENT_COLUMNS))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(patient_from_row(&row)?)
    }

    async fn find_by_identity_number(&self, identity_number: &str) -> Result<Option<Patient>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM patients WHERE identity_number = $1",
            PATIENT_COLUMNS
        ))
        .bind(identity_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(patient_from_row).transpose()?)
    }

    async fn insert(&self, patient: NewPatient) -> Result<Patient, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO patients (first_name, last_name, address, identity_number, release_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            PATIENT_COLUMNS
        ))
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(&patient.address)
        .bind(&patient.identity_number)
        .bind(&patient.release_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(patient_from_row(&row)?)
    }

    async fn update(&self, patient: &Patient) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE patients
             SET first_name = $1, last_name = $2, address = $3, identity_number = $4, release_date = $5
             WHERE id = $6",
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(&patient.address)
        .bind(&patient.identity_number)
        .bind(&patient.release_date)
        .bind(patient.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn patch_address(&self, id: i64, address: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE patients SET address = $1 WHERE id = $2")
            .bind(address)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
