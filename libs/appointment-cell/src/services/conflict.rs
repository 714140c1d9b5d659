//! Double-booking detection.
//!
//! A slot is taken for a patient when another appointment has the same
//! patient, date and hour; likewise for a dentist. The store's unique
//! constraints are the final guard, this scan only turns the common case
//! into a precise error before a write is attempted.

use crate::models::{Appointment, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Patient { with: i64 },
    Dentist { with: i64 },
}

/// Returns the first clash between `candidate` and `existing`, skipping the
/// appointment whose id is `exclude`. For each record the patient clash is
/// checked before the dentist clash.
pub fn find_conflict(
    existing: &[Appointment],
    candidate: Slot<'_>,
    exclude: Option<i64>,
) -> Option<Conflict> {
    existing
        .iter()
        .filter(|appointment| Some(appointment.id) != exclude)
        .find_map(|appointment| clash(appointment, candidate))
}

fn clash(booked: &Appointment, candidate: Slot<'_>) -> Option<Conflict> {
    let slot = booked.slot();
    if slot.date != candidate.date || slot.hour != candidate.hour {
        return None;
    }
    if slot.patient_id == candidate.patient_id {
        return Some(Conflict::Patient { with: booked.id });
    }
    if slot.dentist_id == candidate.dentist_id {
        return Some(Conflict::Dentist { with: booked.id });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentist_cell::Dentist;
    use patient_cell::Patient;

    fn appointment(id: i64, patient_id: i64, dentist_id: i64, hour: &str) -> Appointment {
        Appointment {
            id,
            patient: Patient {
                id: patient_id,
                first_name: "P".to_string(),
                last_name: patient_id.to_string(),
                address: "-".to_string(),
                identity_number: patient_id.to_string(),
                release_date: "2024-01-01".to_string(),
            },
            dentist: Dentist {
                id: dentist_id,
                first_name: "D".to_string(),
                last_name: dentist_id.to_string(),
                license: dentist_id.to_string(),
            },
            date: "2024-03-30".to_string(),
            hour: hour.to_string(),
            description: String::new(),
        }
    }

    fn slot(patient_id: i64, dentist_id: i64, hour: &str) -> Slot<'_> {
        Slot {
            patient_id,
            dentist_id,
            date: "2024-03-30",
            hour,
        }
    }

    #[test]
    fn patient_and_dentist_clashes() {
        let existing = vec![appointment(1, 10, 20, "09:00")];

        assert_eq!(
            find_conflict(&existing, slot(10, 21, "09:00"), None),
            Some(Conflict::Patient { with: 1 })
        );
        assert_eq!(
            find_conflict(&existing, slot(11, 20, "09:00"), None),
            Some(Conflict::Dentist { with: 1 })
        );
        assert_eq!(find_conflict(&existing, slot(11, 21, "09:00"), None), None);
    }

    #[test]
    fn patient_clash_wins_on_same_record() {
        let existing = vec![appointment(1, 10, 20, "09:00")];
        assert_eq!(
            find_conflict(&existing, slot(10, 20, "09:00"), None),
            Some(Conflict::Patient { with: 1 })
        );
    }

    #[test]
    fn other_hours_never_clash() {
        let existing = vec![appointment(1, 10, 20, "09:00")];
        assert_eq!(find_conflict(&existing, slot(10, 20, "09:30"), None), None);
    }

    #[test]
    fn excluded_record_is_skipped() {
        let existing = vec![appointment(1, 10, 20, "09:00"), appointment(2, 11, 21, "10:00")];

        assert_eq!(find_conflict(&existing, slot(10, 20, "09:00"), Some(1)), None);
        assert_eq!(
            find_conflict(&existing, slot(10, 21, "10:00"), Some(1)),
            Some(Conflict::Dentist { with: 2 })
        );
    }
}
