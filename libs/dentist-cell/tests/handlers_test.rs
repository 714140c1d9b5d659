// libs/dentist-cell/tests/handlers_test.rs
use std::sync::Arc;

use axum::{http::StatusCode, Router};
use serde_json::json;
use tower::ServiceExt;

use dentist_cell::{dentist_routes, DentistService, InMemoryDentistStore};
use shared_database::ReferenceRegistry;
use shared_utils::test_utils::{read_json, TestConfig, TestRequest, TEST_TOKEN};

fn create_test_app() -> Router {
    let store = InMemoryDentistStore::new(Arc::new(ReferenceRegistry::new()));
    let service = Arc::new(DentistService::new(Arc::new(store)));
    dentist_routes(service, TestConfig::default().verifier())
}

async fn seed_dentist(app: &Router, license: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(TestRequest::json(
            "POST",
            "/",
            Some(TEST_TOKEN),
            &json!({"first_name": "Daniel", "last_name": "Rodriguez", "license": license}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_dentist_requires_token() {
    let app = create_test_app();
    let body = json!({"first_name": "Daniel", "last_name": "Rodriguez", "license": "AXMER"});

    let response = app
        .clone()
        .oneshot(TestRequest::json("POST", "/", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(response).await["error"], "token not found");

    let response = app
        .oneshot(TestRequest::json("POST", "/", Some("wrong"), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(response).await["error"], "invalid token");
}

#[tokio::test]
async fn test_create_and_get_dentist() {
    let app = create_test_app();
    let id = seed_dentist(&app, "AXMER").await;

    let response = app.oneshot(TestRequest::get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let dentist = read_json(response).await;
    assert_eq!(dentist["license"], "AXMER");
    assert_eq!(dentist["first_name"], "Daniel");
}

#[tokio::test]
async fn test_list_dentists_is_public() {
    let app = create_test_app();
    seed_dentist(&app, "AXMER").await;
    seed_dentist(&app, "BQ77").await;

    let response = app.oneshot(TestRequest::get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicate_license_conflicts() {
    let app = create_test_app();
    seed_dentist(&app, "AXMER").await;

    let response = app
        .oneshot(TestRequest::json(
            "POST",
            "/",
            Some(TEST_TOKEN),
            &json!({"first_name": "Ana", "last_name": "Lopez", "license": "AXMER"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_patch_dentist_license() {
    let app = create_test_app();
    let id = seed_dentist(&app, "AXMER").await;

    let response = app
        .clone()
        .oneshot(TestRequest::json(
            "PATCH",
            &format!("/{}", id),
            Some(TEST_TOKEN),
            &json!({"license": "NEW-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["license"], "NEW-1");

    let response = app
        .oneshot(TestRequest::json("PATCH", &format!("/{}", id), Some(TEST_TOKEN), &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_dentist() {
    let app = create_test_app();
    let id = seed_dentist(&app, "AXMER").await;

    let response = app
        .clone()
        .oneshot(TestRequest::delete(&format!("/{}", id), Some(TEST_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(TestRequest::delete(&format!("/{}", id), Some(TEST_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(TestRequest::get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
