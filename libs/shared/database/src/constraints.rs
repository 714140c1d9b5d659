//! Constraint names declared in `migrations/`. The in-memory stores report
//! violations under the same names so callers handle both backends alike.

pub const DENTIST_LICENSE: &str = "dentists_license_key";
pub const PATIENT_IDENTITY_NUMBER: &str = "patients_identity_number_key";

pub const APPOINTMENT_PATIENT_SLOT: &str = "appointments_patient_slot_key";
pub const APPOINTMENT_DENTIST_SLOT: &str = "appointments_dentist_slot_key";

pub const APPOINTMENT_PATIENT_FK: &str = "appointments_patient_fkey";
pub const APPOINTMENT_DENTIST_FK: &str = "appointments_dentist_fkey";
