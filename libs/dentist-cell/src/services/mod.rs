pub mod dentist;

pub use dentist::DentistService;
