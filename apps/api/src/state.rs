use std::sync::Arc;

use tracing::info;

use appointment_cell::{
    AppointmentService, AppointmentStore, InMemoryAppointmentStore, PostgresAppointmentStore,
};
use dentist_cell::{DentistService, DentistStore, InMemoryDentistStore, PostgresDentistStore};
use patient_cell::{InMemoryPatientStore, PatientService, PatientStore, PostgresPatientStore};
use shared_config::{AppConfig, StorageBackend};
use shared_database::ReferenceRegistry;

/// One service per cell, sharing a single set of stores.
#[derive(Clone)]
pub struct Services {
    pub dentists: Arc<DentistService>,
    pub patients: Arc<PatientService>,
    pub appointments: Arc<AppointmentService>,
}

impl Services {
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        match config.storage_backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage, records are lost on shutdown");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let pool = shared_database::connect(config).await?;
                let patients: Arc<dyn PatientStore> = Arc::new(PostgresPatientStore::new(pool.clone()));
                let dentists: Arc<dyn DentistStore> = Arc::new(PostgresDentistStore::new(pool.clone()));
                let appointments: Arc<dyn AppointmentStore> = Arc::new(PostgresAppointmentStore::new(pool));
                Ok(Self::wire(appointments, patients, dentists))
            }
        }
    }

    pub fn in_memory() -> Self {
        let references = Arc::new(ReferenceRegistry::new());
        let patients: Arc<dyn PatientStore> = Arc::new(InMemoryPatientStore::new(references.clone()));
        let dentists: Arc<dyn DentistStore> = Arc::new(InMemoryDentistStore::new(references.clone()));
        let appointments: Arc<dyn AppointmentStore> = Arc::new(InMemoryAppointmentStore::new(
            patients.clone(),
            dentists.clone(),
            references,
        ));
        Self::wire(appointments, patients, dentists)
    }

    fn wire(
        appointments: Arc<dyn AppointmentStore>,
        patients: Arc<dyn PatientStore>,
        dentists: Arc<dyn DentistStore>,
    ) -> Self {
        Self {
            appointments: Arc::new(AppointmentService::new(
                appointments,
                patients.clone(),
                dentists.clone(),
            )),
            patients: Arc::new(PatientService::new(patients)),
            dentists: Arc::new(DentistService::new(dentists)),
        }
    }
}
