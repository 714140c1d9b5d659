use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use dentist_cell::Dentist;
use patient_cell::Patient;
use shared_database::StoreError;

use super::AppointmentStore;
use crate::models::{Appointment, NewAppointment};

const APPOINTMENT_SELECT: &str = "
    SELECT a.id, a.date, a.hour, a.description,
           p.id AS patient_id, p.first_name AS patient_first_name,
           p.last_name AS patient_last_name, p.address AS patient_address,
           p.identity_number AS patient_identity_number,
           p.release_date AS patient_release_date,
           d.id AS dentist_id, d.first_name AS dentist_first_name,
           d.last_name AS dentist_last_name, d.license AS dentist_license
    FROM appointments a
    JOIN patients p ON p.id = a.patient_id
    JOIN dentists d ON d.id = a.dentist_id";

#[derive(Clone)]
pub struct PostgresAppointmentStore {
    pool: PgPool,
}

impl PostgresAppointmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn appointment_from_row(row: &PgRow) -> Result<Appointment, sqlx::Error> {
    Ok(Appointment {
        id: row.try_get("id")?,
        patient: Patient {
            id: row.try_get("patient_id")?,
            first_name: row.try_get("patient_first_name")?,
            last_name: row.try_get("patient_last_name")?,
            address: row.try_get("patient_address")?,
            identity_number: row.try_get("patient_identity_number")?,
            release_date: row.try_get("patient_release_date")?,
        },
        dentist: Dentist {
            id: row.try_get("dentist_id")?,
            first_name: row.try_get("dentist_first_name")?,
            last_name: row.try_get("dentist_last_name")?,
            license: row.try_get("dentist_license")?,
        },
        date: row.try_get("date")?,
        hour: row.try_get("hour")?,
        description: row.try_get("description")?,
    })
}

fn appointments_from_rows(rows: &[PgRow]) -> Result<Vec<Appointment>, StoreError> {
    Ok(rows
        .iter()
        .map(appointment_from_row)
        .collect::<Result<Vec<_>, _>>()?)
}

#[async_trait]
impl AppointmentStore for PostgresAppointmentStore {
    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        let rows = sqlx::query(&format!("{} ORDER BY a.id", APPOINTMENT_SELECT))
            .fetch_all(&self.pool)
            .await?;
        appointments_from_rows(&rows)
    }

    async fn get(&self, id: i64) -> Result<Appointment, StoreError> {
        let row = sqlx::query(&format!("{} WHERE a.id = $1", APPOINTMENT_SELECT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(appointment_from_row(&row)?)
    }

    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO appointments (patient_id, dentist_id, date, hour, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(appointment.patient.id)
        .bind(appointment.dentist.id)
        .bind(&appointment.date)
        .bind(&appointment.hour)
        .bind(&appointment.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(Appointment {
            id,
            patient: appointment.patient,
            dentist: appointment.dentist,
            date: appointment.date,
            hour: appointment.hour,
            description: appointment.description,
        })
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE appointments SET date = $1, hour = $2, description = $3 WHERE id = $4",
        )
        .bind(&appointment.date)
        .bind(&appointment.hour)
        .bind(&appointment.description)
        .bind(appointment.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn patch_description(&self, id: i64, description: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE appointments SET description = $1 WHERE id = $2")
            .bind(description)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_by_patient_identity(&self, identity_number: &str) -> Result<Vec<Appointment>, StoreError> {
        let rows = sqlx::query(&format!(
            "{} WHERE p.identity_number = $1 ORDER BY a.date, a.hour",
            APPOINTMENT_SELECT
        ))
        .bind(identity_number)
        .fetch_all(&self.pool)
        .await?;
        appointments_from_rows(&rows)
    }
}
