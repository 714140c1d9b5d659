pub mod constraints;
pub mod error;
pub mod memory;
pub mod postgres;

pub use error::StoreError;
pub use memory::{ReferenceRegistry, Referenced};
pub use postgres::connect;
