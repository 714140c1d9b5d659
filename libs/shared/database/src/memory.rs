use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Tables that appointments point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Referenced {
    Patient,
    Dentist,
}

/// Foreign-key bookkeeping shared between the in-memory stores.
///
/// Patient and dentist stores `register` every row they insert and `retire`
/// it on delete. The appointment store can only `acquire` a reference to a
/// registered row, and a row with live references cannot be retired,
/// mirroring the foreign keys and `ON DELETE RESTRICT` of the Postgres schema.
/// Both checks happen under the same lock, so a delete can never slip between
/// an existence check and the reference that depends on it.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    // Present key = live row; value = number of appointments pointing at it.
    rows: Mutex<HashMap<(Referenced, i64), usize>>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, HashMap<(Referenced, i64), usize>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn register(&self, target: Referenced, id: i64) {
        self.rows().entry((target, id)).or_insert(0);
    }

    /// Takes a reference to a live row. Returns `false` when the row does not exist.
    pub fn acquire(&self, target: Referenced, id: i64) -> bool {
        match self.rows().get_mut(&(target, id)) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn release(&self, target: Referenced, id: i64) {
        if let Some(count) = self.rows().get_mut(&(target, id)) {
            *count = count.saturating_sub(1);
        }
    }

    /// Forgets a row that is about to be deleted. Returns `false`, leaving the
    /// row registered, while anything still references it.
    pub fn retire(&self, target: Referenced, id: i64) -> bool {
        let mut rows = self.rows();
        match rows.get(&(target, id)) {
            Some(count) if *count > 0 => false,
            _ => {
                rows.remove(&(target, id));
                true
            }
        }
    }

    pub fn is_referenced(&self, target: Referenced, id: i64) -> bool {
        self.rows().get(&(target, id)).is_some_and(|count| *count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_references_per_target() {
        let registry = ReferenceRegistry::new();
        registry.register(Referenced::Patient, 1);
        registry.register(Referenced::Dentist, 1);
        assert!(registry.acquire(Referenced::Patient, 1));
        assert!(registry.acquire(Referenced::Patient, 1));

        assert!(registry.is_referenced(Referenced::Patient, 1));
        assert!(!registry.is_referenced(Referenced::Dentist, 1));

        registry.release(Referenced::Patient, 1);
        assert!(registry.is_referenced(Referenced::Patient, 1));
        registry.release(Referenced::Patient, 1);
        assert!(!registry.is_referenced(Referenced::Patient, 1));
    }

    #[test]
    fn acquire_requires_a_registered_row() {
        let registry = ReferenceRegistry::new();
        assert!(!registry.acquire(Referenced::Patient, 7));
        assert!(!registry.is_referenced(Referenced::Patient, 7));

        registry.register(Referenced::Patient, 7);
        assert!(registry.retire(Referenced::Patient, 7));
        assert!(!registry.acquire(Referenced::Patient, 7));
    }

    #[test]
    fn retire_refuses_referenced_rows() {
        let registry = ReferenceRegistry::new();
        registry.register(Referenced::Dentist, 3);
        assert!(registry.acquire(Referenced::Dentist, 3));

        assert!(!registry.retire(Referenced::Dentist, 3));
        assert!(registry.acquire(Referenced::Dentist, 3));

        registry.release(Referenced::Dentist, 3);
        registry.release(Referenced::Dentist, 3);
        assert!(registry.retire(Referenced::Dentist, 3));
    }

    #[test]
    fn releasing_unknown_reference_is_harmless() {
        let registry = ReferenceRegistry::new();
        registry.release(Referenced::Dentist, 42);
        assert!(!registry.is_referenced(Referenced::Dentist, 42));
        assert!(registry.retire(Referenced::Dentist, 42));
    }
}
