use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use shared_utils::auth::{auth_middleware, SharedVerifier};

use crate::handlers::*;
use crate::services::AppointmentService;

pub fn appointment_routes(service: Arc<AppointmentService>, verifier: SharedVerifier) -> Router {
    let protected_routes = Router::new()
        .route("/", post(create_appointment))
        .route("/dni-license", post(create_by_identity_and_license))
        .route("/{id}", put(update_appointment).delete(delete_appointment))
        .route("/{id}/description", patch(patch_appointment_description))
        .route_layer(middleware::from_fn_with_state(verifier, auth_middleware));

    Router::new()
        .route("/", get(list_appointments))
        .route("/{id}", get(get_appointment))
        .route("/patient/{dni}", get(list_patient_appointments))
        .merge(protected_routes)
        .with_state(service)
}
