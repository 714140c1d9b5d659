use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extract::{ApiJson, ApiPath};

use crate::models::{CreatePatientRequest, PatchAddressRequest, PatientError, UpdatePatientRequest};
use crate::services::PatientService;

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound => AppError::NotFound("patient not found".to_string()),
            PatientError::IdentityNumberTaken(_) | PatientError::InUse => {
                AppError::Conflict(err.to_string())
            }
            PatientError::ValidationError(msg) => AppError::ValidationError(msg),
            PatientError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn create_patient(
    State(service): State<Arc<PatientService>>,
    ApiJson(request): ApiJson<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let patient = service.create_patient(request).await?;
    Ok((StatusCode::CREATED, Json(json!(patient))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(service): State<Arc<PatientService>>,
    ApiPath(patient_id): ApiPath<i64>,
) -> Result<Json<Value>, AppError> {
    let patient = service.get_patient(patient_id).await?;
    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(service): State<Arc<PatientService>>,
) -> Result<Json<Value>, AppError> {
    let patients = service.list_patients().await?;
    Ok(Json(json!(patients)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(service): State<Arc<PatientService>>,
    ApiPath(patient_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = service.update_patient(patient_id, request).await?;
    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn patch_patient_address(
    State(service): State<Arc<PatientService>>,
    ApiPath(patient_id): ApiPath<i64>,
    ApiJson(request): ApiJson<PatchAddressRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = service.patch_address(patient_id, &request.address).await?;
    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(service): State<Arc<PatientService>>,
    ApiPath(patient_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    service.delete_patient(patient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
