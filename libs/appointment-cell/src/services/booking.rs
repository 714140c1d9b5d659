use std::sync::Arc;

use tracing::{debug, info, warn};

use dentist_cell::{Dentist, DentistStore};
use patient_cell::{Patient, PatientStore};
use shared_database::{constraints, StoreError};
use shared_utils::dates::{normalize_date, normalize_hour};

use crate::models::{
    Appointment, AppointmentError, CreateAppointmentRequest, CreateByIdentityRequest,
    NewAppointment, PatchOutcome, Slot, UpdateAppointmentRequest,
};
use crate::services::conflict::{find_conflict, Conflict};
use crate::store::AppointmentStore;

/// Books, moves and cancels appointments while keeping every patient and
/// every dentist to at most one appointment per date and hour.
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentStore>,
    patients: Arc<dyn PatientStore>,
    dentists: Arc<dyn DentistStore>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        patients: Arc<dyn PatientStore>,
        dentists: Arc<dyn DentistStore>,
    ) -> Self {
        Self {
            appointments,
            patients,
            dentists,
        }
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Booking patient {} with dentist {} on {} at {}",
            request.patient_id, request.dentist_id, request.date, request.hour
        );

        let date = date(&request.date)?;
        let hour = hour(&request.hour)?;
        let patient = self.patient(request.patient_id).await?;
        let dentist = self.dentist(request.dentist_id).await?;

        self.book(NewAppointment {
            patient,
            dentist,
            date,
            hour,
            description: request.description,
        })
        .await
    }

    /// Same rules as [`create_appointment`](Self::create_appointment), with the
    /// patient found by identity number and the dentist by license.
    pub async fn create_by_identity_and_license(
        &self,
        request: CreateByIdentityRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Booking patient {} with dentist license {}",
            request.patient_identity_number, request.license
        );

        let date = date(&request.date)?;
        let hour = hour(&request.hour)?;

        let patient = self
            .patients
            .find_by_identity_number(request.patient_identity_number.trim())
            .await
            .map_err(AppointmentError::Storage)?
            .ok_or(AppointmentError::PatientNotFound)?;
        let dentist = self
            .dentists
            .find_by_license(request.license.trim())
            .await
            .map_err(AppointmentError::Storage)?
            .ok_or(AppointmentError::DentistNotFound)?;

        self.book(NewAppointment {
            patient,
            dentist,
            date,
            hour,
            description: request.description,
        })
        .await
    }

    pub async fn get_appointment(&self, id: i64) -> Result<Appointment, AppointmentError> {
        Ok(self.appointments.get(id).await?)
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.appointments.list_all().await?)
    }

    /// Appointments of the patient with this identity number. An unknown
    /// identity number yields an empty list.
    pub async fn list_by_patient_identity(
        &self,
        identity_number: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self
            .appointments
            .list_by_patient_identity(identity_number.trim())
            .await?)
    }

    pub async fn update_appointment(
        &self,
        id: i64,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment {}", id);

        let mut appointment = self.appointments.get(id).await?;
        if let Some(raw) = request.date {
            appointment.date = date(&raw)?;
        }
        if let Some(raw) = request.hour {
            appointment.hour = hour(&raw)?;
        }
        if let Some(description) = request.description {
            appointment.description = description;
        }

        let existing = self.appointments.list_all().await?;
        if let Some(conflict) = find_conflict(&existing, appointment.slot(), Some(id)) {
            return Err(rejected(conflict, appointment.slot()));
        }

        self.appointments
            .update(&appointment)
            .await
            .map_err(|e| map_write_error(e, appointment.slot()))?;

        info!("Appointment {} moved to {} {}", id, appointment.date, appointment.hour);
        Ok(appointment)
    }

    /// Rewrites only the description. Never runs the conflict check.
    pub async fn patch_description(
        &self,
        id: i64,
        description: &str,
    ) -> Result<PatchOutcome, AppointmentError> {
        let mut appointment = self.appointments.get(id).await?;
        if appointment.description == description {
            debug!("Appointment {} description unchanged", id);
            return Ok(PatchOutcome::Unchanged(appointment));
        }

        self.appointments.patch_description(id, description).await?;
        appointment.description = description.to_string();

        info!("Appointment {} description updated", id);
        Ok(PatchOutcome::Updated(appointment))
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<(), AppointmentError> {
        self.appointments.delete(id).await?;
        info!("Appointment {} deleted", id);
        Ok(())
    }

    async fn book(&self, appointment: NewAppointment) -> Result<Appointment, AppointmentError> {
        let existing = self.appointments.list_all().await?;
        if let Some(conflict) = find_conflict(&existing, appointment.slot(), None) {
            return Err(rejected(conflict, appointment.slot()));
        }

        let stored = match self.appointments.insert(appointment.clone()).await {
            Ok(stored) => stored,
            Err(e) => return Err(map_write_error(e, appointment.slot())),
        };

        info!(
            "Appointment {} booked for patient {} with dentist {}",
            stored.id, stored.patient.id, stored.dentist.id
        );
        Ok(stored)
    }

    async fn patient(&self, id: i64) -> Result<Patient, AppointmentError> {
        self.patients.get(id).await.map_err(|e| match e {
            StoreError::NotFound => AppointmentError::PatientNotFound,
            other => AppointmentError::Storage(other),
        })
    }

    async fn dentist(&self, id: i64) -> Result<Dentist, AppointmentError> {
        self.dentists.get(id).await.map_err(|e| match e {
            StoreError::NotFound => AppointmentError::DentistNotFound,
            other => AppointmentError::Storage(other),
        })
    }
}

fn date(raw: &str) -> Result<String, AppointmentError> {
    normalize_date(raw).map_err(AppointmentError::ValidationError)
}

fn hour(raw: &str) -> Result<String, AppointmentError> {
    normalize_hour(raw).map_err(AppointmentError::ValidationError)
}

fn patient_conflict(slot: Slot<'_>) -> AppointmentError {
    AppointmentError::PatientConflict {
        patient_id: slot.patient_id,
        date: slot.date.to_string(),
        hour: slot.hour.to_string(),
    }
}

fn dentist_conflict(slot: Slot<'_>) -> AppointmentError {
    AppointmentError::DentistConflict {
        dentist_id: slot.dentist_id,
        date: slot.date.to_string(),
        hour: slot.hour.to_string(),
    }
}

fn rejected(conflict: Conflict, slot: Slot<'_>) -> AppointmentError {
    match conflict {
        Conflict::Patient { with } => {
            warn!(
                "Rejected booking: patient {} already has appointment {} on {} at {}",
                slot.patient_id, with, slot.date, slot.hour
            );
            patient_conflict(slot)
        }
        Conflict::Dentist { with } => {
            warn!(
                "Rejected booking: dentist {} already has appointment {} on {} at {}",
                slot.dentist_id, with, slot.date, slot.hour
            );
            dentist_conflict(slot)
        }
    }
}

/// Turns constraint violations raised by the store into the same errors the
/// scan would have produced.
fn map_write_error(err: StoreError, slot: Slot<'_>) -> AppointmentError {
    match err.constraint() {
        Some(constraints::APPOINTMENT_PATIENT_SLOT) => {
            warn!("Patient slot taken concurrently: {:?}", slot);
            patient_conflict(slot)
        }
        Some(constraints::APPOINTMENT_DENTIST_SLOT) => {
            warn!("Dentist slot taken concurrently: {:?}", slot);
            dentist_conflict(slot)
        }
        Some(constraints::APPOINTMENT_PATIENT_FK) => AppointmentError::PatientNotFound,
        Some(constraints::APPOINTMENT_DENTIST_FK) => AppointmentError::DentistNotFound,
        _ => err.into(),
    }
}
