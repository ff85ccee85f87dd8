//! Patient Registry Core Library
//!
//! Record management over patient health records kept in a single flat
//! document, with two derived metrics (BMI and a categorical verdict)
//! recomputed on every write.
//!
//! # Architecture
//!
//! ```text
//! caller (CLI / any RPC binding)
//!         │
//!         ▼
//! PatientRegistry ── validate / merge / derive ──► models
//!         │
//!         ▼
//! PatientStore (load / save whole document)
//!         │
//!         ▼
//! patients.json (or MemoryStore in tests)
//! ```
//!
//! Every operation loads the collection fresh and mutating operations write
//! the whole document back; no state is cached between calls.
//!
//! # Modules
//!
//! - [`models`]: Patient record, validation, derived-metric computation
//! - [`store`]: whole-document persistence ([`JsonFileStore`], [`MemoryStore`])

pub mod models;
pub mod store;

// Re-export commonly used types
pub use models::{
    Gender, Patient, PatientAttributes, PatientUpdate, ValidationError, Verdict,
};
pub use store::{JsonFileStore, MemoryStore, PatientMap, PatientStore, StoreError};

use std::str::FromStr;

use log::{debug, info};
use thiserror::Error;

// =========================================================================
// Error Type
// =========================================================================

/// Errors surfaced by registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A field violated its constraint (carries field name + constraint).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with the given id exists.
    #[error("patient not found: {0}")]
    NotFound(String),

    /// A record with the given id already exists.
    #[error("patient already exists: {0}")]
    Conflict(String),

    /// Unrecognized sort field or order.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Underlying persistence failure.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

// =========================================================================
// Sort Parameters
// =========================================================================

/// Numeric field a patient listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    fn key(self, patient: &Patient) -> f64 {
        match self {
            SortField::Height => patient.height,
            SortField::Weight => patient.weight,
            SortField::Bmi => patient.bmi,
        }
    }
}

impl FromStr for SortField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            _ => Err(RegistryError::InvalidArgument(format!(
                "sort field must be one of height, weight, bmi (got `{s}`)"
            ))),
        }
    }
}

/// Sort direction. Ascending unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(RegistryError::InvalidArgument(format!(
                "order must be asc or desc (got `{s}`)"
            ))),
        }
    }
}

// =========================================================================
// Registry Service
// =========================================================================

/// The registry: all record operations over an injected store.
///
/// Stateless between calls; every operation round-trips through the store,
/// so the last successful write is always the authoritative state.
pub struct PatientRegistry<S> {
    store: S,
}

impl<S: PatientStore> PatientRegistry<S> {
    /// Create a registry over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return every stored record, keyed by id.
    pub fn list(&self) -> RegistryResult<PatientMap> {
        Ok(self.store.load()?)
    }

    /// Return one record by id.
    pub fn get(&self, id: &str) -> RegistryResult<Patient> {
        let patients = self.store.load()?;
        patients
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Return all records ordered by a numeric field.
    ///
    /// The sort is stable: records with equal keys keep their store
    /// iteration order in both directions (descending reverses the
    /// comparator, not the output).
    pub fn sort_by(&self, field: SortField, order: SortOrder) -> RegistryResult<Vec<Patient>> {
        let patients = self.store.load()?;
        debug!("sorting {} patient(s) by {:?} {:?}", patients.len(), field, order);

        let mut records: Vec<Patient> = patients.into_values().collect();
        records.sort_by(|a, b| {
            let ord = field.key(a).total_cmp(&field.key(b));
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(records)
    }

    /// Validate and insert a new record under the given id.
    pub fn create(&self, id: &str, attrs: PatientAttributes) -> RegistryResult<Patient> {
        let mut patients = self.store.load()?;
        if patients.contains_key(id) {
            return Err(RegistryError::Conflict(id.to_string()));
        }

        let patient = Patient::from_attributes(attrs)?;
        patients.insert(id.to_string(), patient.clone());
        self.store.save(&patients)?;

        info!("created patient {id}");
        Ok(patient)
    }

    /// Merge a partial update onto an existing record.
    ///
    /// The full merged field set is re-validated (not just the touched
    /// fields) and the derived metrics are recomputed, so a record can never
    /// be edited into an invalid or stale-derived state.
    pub fn update(&self, id: &str, update: PatientUpdate) -> RegistryResult<Patient> {
        let mut patients = self.store.load()?;
        let current = patients
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        let merged = Patient::from_attributes(update.apply_to(current))?;
        patients.insert(id.to_string(), merged.clone());
        self.store.save(&patients)?;

        info!("updated patient {id}");
        Ok(merged)
    }

    /// Remove a record by id.
    pub fn delete(&self, id: &str) -> RegistryResult<()> {
        let mut patients = self.store.load()?;
        if patients.remove(id).is_none() {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.store.save(&patients)?;

        info!("deleted patient {id}");
        Ok(())
    }
}
