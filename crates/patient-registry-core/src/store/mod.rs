//! Persistence layer for the patient registry.
//!
//! The whole collection is one serialized document: a mapping from patient
//! id to record fields (the id is the map key, never duplicated inside the
//! value). Implementations load and save the full document; nothing is
//! cached between calls.

mod json_file;

pub use json_file::JsonFileStore;

use std::collections::BTreeMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::models::Patient;

/// The full stored collection: patient id → record.
pub type PatientMap = BTreeMap<String, Patient>;

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed patient document: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage contract for the patient collection.
///
/// Kept deliberately narrow (whole-document load and save) so backends are
/// trivially swappable; tests inject [`MemoryStore`].
pub trait PatientStore {
    /// Read and parse the entire persisted document.
    fn load(&self) -> StoreResult<PatientMap>;

    /// Serialize and overwrite the entire document.
    fn save(&self, patients: &PatientMap) -> StoreResult<()>;
}

/// In-memory store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: Mutex<PatientMap>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with records.
    pub fn with_patients(patients: PatientMap) -> Self {
        Self {
            patients: Mutex::new(patients),
        }
    }
}

impl PatientStore for MemoryStore {
    fn load(&self) -> StoreResult<PatientMap> {
        let guard = self.patients.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, patients: &PatientMap) -> StoreResult<()> {
        let mut guard = self.patients.lock().unwrap_or_else(|e| e.into_inner());
        *guard = patients.clone();
        Ok(())
    }
}
