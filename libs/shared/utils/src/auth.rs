use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use headers::{Header, HeaderMapExt};
use http::{HeaderName, HeaderValue};
use sha2::{digest::Output, Digest, Sha256};
use tracing::debug;

use shared_models::error::AppError;

static TOKEN_HEADER: HeaderName = HeaderName::from_static("token");

/// The shared-secret `TOKEN` header carried by write requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken(pub String);

impl ApiToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Header for ApiToken {
    fn name() -> &'static HeaderName {
        &TOKEN_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let token = value.to_str().map_err(|_| headers::Error::invalid())?;
        Ok(ApiToken(token.to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

/// Decides whether a presented credential may perform write operations.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, presented: &str) -> bool;
}

pub type SharedVerifier = Arc<dyn CredentialVerifier>;

/// Compares the presented token against a single configured secret.
///
/// Only the SHA-256 digest of the secret is kept, and comparison happens on
/// digests so the running time does not depend on how many leading bytes of
/// the raw token match. An empty secret rejects every token.
pub struct StaticTokenVerifier {
    digest: Option<Output<Sha256>>,
}

impl StaticTokenVerifier {
    pub fn new(secret: &str) -> Self {
        let digest = if secret.is_empty() {
            None
        } else {
            Some(Sha256::digest(secret.as_bytes()))
        };
        Self { digest }
    }

    pub fn shared(secret: &str) -> SharedVerifier {
        Arc::new(Self::new(secret))
    }
}

impl CredentialVerifier for StaticTokenVerifier {
    fn verify(&self, presented: &str) -> bool {
        match &self.digest {
            Some(expected) => Sha256::digest(presented.as_bytes()) == *expected,
            None => false,
        }
    }
}

// Middleware guarding write routes
pub async fn auth_middleware(
    State(verifier): State<SharedVerifier>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .typed_try_get::<ApiToken>()
        .map_err(|_| AppError::Auth("invalid token".to_string()))?
        .filter(|token| !token.as_str().is_empty())
        .ok_or_else(|| AppError::Auth("token not found".to_string()))?;

    if !verifier.verify(token.as_str()) {
        debug!("Rejected {} {} with invalid token", request.method(), request.uri().path());
        return Err(AppError::Auth("invalid token".to_string()));
    }

    Ok(next.run(request).await)
}
