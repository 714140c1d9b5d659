use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extract::{ApiJson, ApiPath};

use crate::models::{
    AppointmentError, CreateAppointmentRequest, CreateByIdentityRequest, PatchDescriptionRequest,
    PatchOutcome, UpdateAppointmentRequest,
};
use crate::services::AppointmentService;

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound => AppError::NotFound("appointment not found".to_string()),
            AppointmentError::PatientNotFound => AppError::NotFound("patient not found".to_string()),
            AppointmentError::DentistNotFound => AppError::NotFound("dentist not found".to_string()),
            AppointmentError::PatientConflict { .. } | AppointmentError::DentistConflict { .. } => {
                AppError::Conflict(err.to_string())
            }
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(service): State<Arc<AppointmentService>>,
    ApiJson(request): ApiJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = service.create_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn create_by_identity_and_license(
    State(service): State<Arc<AppointmentService>>,
    ApiJson(request): ApiJson<CreateByIdentityRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = service.create_by_identity_and_license(request).await?;
    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<AppointmentService>>,
    ApiPath(appointment_id): ApiPath<i64>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.get_appointment(appointment_id).await?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(service): State<Arc<AppointmentService>>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.list_appointments().await?;
    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn list_patient_appointments(
    State(service): State<Arc<AppointmentService>>,
    ApiPath(identity_number): ApiPath<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.list_by_patient_identity(&identity_number).await?;
    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(service): State<Arc<AppointmentService>>,
    ApiPath(appointment_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.update_appointment(appointment_id, request).await?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn patch_appointment_description(
    State(service): State<Arc<AppointmentService>>,
    ApiPath(appointment_id): ApiPath<i64>,
    ApiJson(request): ApiJson<PatchDescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = service
        .patch_description(appointment_id, &request.description)
        .await?;

    let message = match &outcome {
        PatchOutcome::Updated(_) => "description updated",
        PatchOutcome::Unchanged(_) => "description already up to date",
    };

    Ok(Json(json!({
        "updated": outcome.was_updated(),
        "message": message,
        "appointment": outcome.appointment(),
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(service): State<Arc<AppointmentService>>,
    ApiPath(appointment_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    service.delete_appointment(appointment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
