use axum::{routing::get, Router};

use appointment_cell::appointment_routes;
use dentist_cell::dentist_routes;
use patient_cell::patient_routes;
use shared_utils::auth::SharedVerifier;

use crate::state::Services;

pub fn create_router(services: Services, verifier: SharedVerifier) -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .nest("/dentists", dentist_routes(services.dentists, verifier.clone()))
        .nest("/patients", patient_routes(services.patients, verifier.clone()))
        .nest(
            "/appointments",
            appointment_routes(services.appointments, verifier),
        )
}
