pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::*;
pub use router::dentist_routes;
pub use services::DentistService;
pub use store::{DentistStore, InMemoryDentistStore, PostgresDentistStore};
