use serde::{Deserialize, Serialize};

use dentist_cell::Dentist;
use patient_cell::Patient;
use shared_database::StoreError;

/// A booked slot. Patient and dentist are embedded as they were when the
/// appointment was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient: Patient,
    pub dentist: Dentist,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub hour: String,
    pub description: String,
}

impl Appointment {
    pub fn slot(&self) -> Slot<'_> {
        Slot {
            patient_id: self.patient.id,
            dentist_id: self.dentist.id,
            date: &self.date,
            hour: &self.hour,
        }
    }
}

/// The tuple the no-double-booking rule is checked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub patient_id: i64,
    pub dentist_id: i64,
    pub date: &'a str,
    pub hour: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient: Patient,
    pub dentist: Dentist,
    pub date: String,
    pub hour: String,
    pub description: String,
}

impl NewAppointment {
    pub fn slot(&self) -> Slot<'_> {
        Slot {
            patient_id: self.patient.id,
            dentist_id: self.dentist.id,
            date: &self.date,
            hour: &self.hour,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: i64,
    pub dentist_id: i64,
    pub date: String,
    pub hour: String,
    #[serde(default)]
    pub description: String,
}

/// Booking addressed by the patient's identity number and the dentist's
/// license instead of ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateByIdentityRequest {
    #[serde(alias = "dni", alias = "patient_dni")]
    pub patient_identity_number: String,
    #[serde(alias = "dentist_license")]
    pub license: String,
    pub date: String,
    pub hour: String,
    #[serde(default)]
    pub description: String,
}

/// `None` keeps the stored value. An empty description clears it; an empty
/// date or hour is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub date: Option<String>,
    pub hour: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchDescriptionRequest {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Updated(Appointment),
    /// The description already had the requested value; nothing was written.
    Unchanged(Appointment),
}

impl PatchOutcome {
    pub fn was_updated(&self) -> bool {
        matches!(self, PatchOutcome::Updated(_))
    }

    pub fn appointment(&self) -> &Appointment {
        match self {
            PatchOutcome::Updated(appointment) | PatchOutcome::Unchanged(appointment) => appointment,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Patient {patient_id} already has an appointment on {date} at {hour}")]
    PatientConflict {
        patient_id: i64,
        date: String,
        hour: String,
    },

    #[error("Dentist {dentist_id} already has an appointment on {date} at {hour}")]
    DentistConflict {
        dentist_id: i64,
        date: String,
        hour: String,
    },

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Dentist not found")]
    DentistNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for AppointmentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppointmentError::NotFound,
            other => AppointmentError::Storage(other),
        }
    }
}
