use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use shared_database::StoreError;

use super::DentistStore;
use crate::models::{Dentist, NewDentist};

const SELECT_DENTIST: &str = "SELECT id, first_name, last_name, license FROM dentists";

#[derive(Clone)]
pub struct PostgresDentistStore {
    pool: PgPool,
}

impl PostgresDentistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn dentist_from_row(row: &PgRow) -> Result<Dentist, sqlx::Error> {
    Ok(Dentist {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        license: row.try_get("license")?,
    })
}

#[async_trait]
impl DentistStore for PostgresDentistStore {
    async fn list_all(&self) -> Result<Vec<Dentist>, StoreError> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_DENTIST))
            .fetch_all(&self.pool)
            .await?;
        let dentists = rows
            .iter()
            .map(dentist_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(dentists)
    }

    async fn get(&self, id: i64) -> Result<Dentist, StoreError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_DENTIST))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(dentist_from_row(&row)?)
    }

    async fn find_by_license(&self, license: &str) -> Result<Option<Dentist>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE license = $1", SELECT_DENTIST))
            .bind(license)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(dentist_from_row).transpose()?)
    }

    async fn insert(&self, dentist: NewDentist) -> Result<Dentist, StoreError> {
        let row = sqlx::query(
            "INSERT INTO dentists (first_name, last_name, license) VALUES ($1, $2, $3)
             RETURNING id, first_name, last_name, license",
        )
        .bind(&dentist.first_name)
        .bind(&dentist.last_name)
        .bind(&dentist.license)
        .fetch_one(&self.pool)
        .await?;
        Ok(dentist_from_row(&row)?)
    }

    async fn update(&self, dentist: &Dentist) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE dentists SET first_name = $1, last_name = $2, license = $3 WHERE id = $4",
        )
        .bind(&dentist.first_name)
        .bind(&dentist.last_name)
        .bind(&dentist.license)
        .bind(dentist.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM dentists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
