use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extract::{ApiJson, ApiPath};

use crate::models::{CreateDentistRequest, DentistError, UpdateDentistRequest};
use crate::services::DentistService;

impl From<DentistError> for AppError {
    fn from(err: DentistError) -> Self {
        match err {
            DentistError::NotFound => AppError::NotFound("dentist not found".to_string()),
            DentistError::LicenseTaken(_) | DentistError::InUse => AppError::Conflict(err.to_string()),
            DentistError::ValidationError(msg) => AppError::ValidationError(msg),
            DentistError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn create_dentist(
    State(service): State<Arc<DentistService>>,
    ApiJson(request): ApiJson<CreateDentistRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let dentist = service.create_dentist(request).await?;
    Ok((StatusCode::CREATED, Json(json!(dentist))))
}

#[axum::debug_handler]
pub async fn get_dentist(
    State(service): State<Arc<DentistService>>,
    ApiPath(dentist_id): ApiPath<i64>,
) -> Result<Json<Value>, AppError> {
    let dentist = service.get_dentist(dentist_id).await?;
    Ok(Json(json!(dentist)))
}

#[axum::debug_handler]
pub async fn list_dentists(
    State(service): State<Arc<DentistService>>,
) -> Result<Json<Value>, AppError> {
    let dentists = service.list_dentists().await?;
    Ok(Json(json!(dentists)))
}

#[axum::debug_handler]
pub async fn update_dentist(
    State(service): State<Arc<DentistService>>,
    ApiPath(dentist_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateDentistRequest>,
) -> Result<Json<Value>, AppError> {
    let dentist = service.update_dentist(dentist_id, request).await?;
    Ok(Json(json!(dentist)))
}

#[axum::debug_handler]
pub async fn patch_dentist(
    State(service): State<Arc<DentistService>>,
    ApiPath(dentist_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateDentistRequest>,
) -> Result<Json<Value>, AppError> {
    let dentist = service.patch_dentist(dentist_id, request).await?;
    Ok(Json(json!(dentist)))
}

#[axum::debug_handler]
pub async fn delete_dentist(
    State(service): State<Arc<DentistService>>,
    ApiPath(dentist_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    service.delete_dentist(dentist_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
