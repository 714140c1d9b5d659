pub mod auth;
pub mod dates;
pub mod extract;
pub mod test_utils;

pub use auth::{auth_middleware, ApiToken, CredentialVerifier, SharedVerifier, StaticTokenVerifier};
pub use extract::{ApiJson, ApiPath};
