//! Extractors whose rejections are reported as [`AppError`] JSON bodies.

use axum::extract::{FromRequest, FromRequestParts};

use shared_models::error::AppError;

/// `axum::Json` that answers malformed or incomplete bodies with 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` that answers unparsable segments with 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
