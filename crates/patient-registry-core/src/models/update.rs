//! Partial patient updates with absent-means-unchanged semantics.

use serde::{Deserialize, Serialize};

use super::{Gender, Patient, PatientAttributes};

/// A partial update to a patient record.
///
/// Every field is optional; `None` leaves the stored value untouched. The
/// struct is exhaustive over the editable attributes, so adding a field to
/// [`PatientAttributes`] forces this type (and the merge) to be revisited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// True when no field is set (applying it would be a no-op merge).
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// Merge this update onto an existing record, producing the candidate
    /// attribute set for re-validation.
    ///
    /// Derived fields are intentionally absent from the result; the caller
    /// re-derives them by validating the merged attributes.
    pub fn apply_to(&self, current: &Patient) -> PatientAttributes {
        PatientAttributes {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            city: self.city.clone().unwrap_or_else(|| current.city.clone()),
            age: self.age.unwrap_or(current.age),
            gender: self.gender.unwrap_or(current.gender),
            height: self.height.unwrap_or(current.height),
            weight: self.weight.unwrap_or(current.weight),
        }
    }
}
