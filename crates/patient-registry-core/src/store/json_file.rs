//! Flat JSON file store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use super::{PatientMap, PatientStore, StoreResult};

/// Stores the whole patient collection as a single JSON document on disk.
///
/// Saves go through a named temp file in the target's directory followed by
/// an atomic rename, so a crash mid-write never leaves a truncated document
/// behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is not touched until the first `load`/`save`; a missing file
    /// surfaces as an error on `load`. Use [`init_if_missing`] to bootstrap
    /// a fresh deployment.
    ///
    /// [`init_if_missing`]: JsonFileStore::init_if_missing
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty `{}` document if the backing file does not exist yet.
    pub fn init_if_missing(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        info!("initializing empty patient document at {}", self.path.display());
        self.save(&PatientMap::new())
    }

    fn parent_dir(&self) -> &Path {
        self.path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."))
    }
}

impl PatientStore for JsonFileStore {
    fn load(&self) -> StoreResult<PatientMap> {
        debug!("loading patient document from {}", self.path.display());
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, patients: &PatientMap) -> StoreResult<()> {
        debug!(
            "saving {} patient(s) to {}",
            patients.len(),
            self.path.display()
        );
        // Temp file must live on the same filesystem as the target for the
        // rename to be atomic.
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        serde_json::to_writer(&mut tmp, patients)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Patient, PatientAttributes, Verdict};
    use crate::store::StoreError;

    fn sample() -> Patient {
        Patient::from_attributes(PatientAttributes {
            name: "John Doe".into(),
            city: "New York".into(),
            age: 30,
            gender: Gender::Male,
            height: 1.75,
            weight: 70.0,
        })
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("patients.json"));

        let mut map = PatientMap::new();
        map.insert("P001".into(), sample());
        store.save(&map).unwrap();

        assert_eq!(store.load().unwrap(), map);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.load(), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_load_malformed_document_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        fs::write(&path, b"not json at all").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_init_if_missing_bootstraps_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("patients.json"));

        store.init_if_missing().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_init_if_missing_preserves_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("patients.json"));

        let mut map = PatientMap::new();
        map.insert("P001".into(), sample());
        store.save(&map).unwrap();

        store.init_if_missing().unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_document_shape_matches_flat_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        let store = JsonFileStore::new(&path);

        let mut map = PatientMap::new();
        map.insert("P001".into(), sample());
        store.save(&map).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        let record = &raw["P001"];
        assert_eq!(record["name"], "John Doe");
        assert_eq!(record["gender"], "male");
        assert_eq!(record["bmi"], 22.86);
        assert_eq!(record["verdict"], "Normal weight");
        // The id is the key, never a field of the value.
        assert!(record.get("id").is_none());
    }

    #[test]
    fn test_verdict_label_round_trips_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        fs::write(
            &path,
            br#"{"P002":{"name":"Ana","city":"Lisbon","age":41,"gender":"female","height":1.62,"weight":55.0,"bmi":20.96,"verdict":"Normal weight"}}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(path);
        let map = store.load().unwrap();
        assert_eq!(map["P002"].verdict, Verdict::NormalWeight);
    }
}
