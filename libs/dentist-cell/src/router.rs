use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::auth::{auth_middleware, SharedVerifier};

use crate::handlers;
use crate::services::DentistService;

pub fn dentist_routes(service: Arc<DentistService>, verifier: SharedVerifier) -> Router {
    // Writes require the clinic token
    let protected_routes = Router::new()
        .route("/", post(handlers::create_dentist))
        .route(
            "/{id}",
            put(handlers::update_dentist)
                .patch(handlers::patch_dentist)
                .delete(handlers::delete_dentist),
        )
        .route_layer(middleware::from_fn_with_state(verifier, auth_middleware));

    let public_routes = Router::new()
        .route("/", get(handlers::list_dentists))
        .route("/{id}", get(handlers::get_dentist));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(service)
}
