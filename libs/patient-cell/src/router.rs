use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::auth::{auth_middleware, SharedVerifier};

use crate::handlers::*;
use crate::services::PatientService;

pub fn patient_routes(service: Arc<PatientService>, verifier: SharedVerifier) -> Router {
    let protected_routes = Router::new()
        .route("/", post(create_patient))
        .route(
            "/{id}",
            put(update_patient)
                .patch(patch_patient_address)
                .delete(delete_patient),
        )
        .route_layer(middleware::from_fn_with_state(verifier, auth_middleware));

    Router::new()
        .route("/", get(list_patients))
        .route("/{id}", get(get_patient))
        .merge(protected_routes)
        .with_state(service)
}
