//! Patient record model, field validation, and derived-metric computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field failed its constraint check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {constraint}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable description of the violated constraint.
    pub constraint: String,
}

impl ValidationError {
    fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

/// Patient gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ValidationError::new(
                "gender",
                format!("must be one of male, female, other (got `{s}`)"),
            )),
        }
    }
}

/// Categorical BMI classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obesity,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Underweight => "Underweight",
            Verdict::NormalWeight => "Normal weight",
            Verdict::Overweight => "Overweight",
            Verdict::Obesity => "Obesity",
        };
        f.write_str(s)
    }
}

impl Verdict {
    /// Classify a BMI value.
    ///
    /// The [24.9, 25.0) band falls through to `Obesity`. That reproduces the
    /// legacy classifier's cutoffs exactly (its Normal/Overweight boundary
    /// sits at 24.9 on one side and 25.0 on the other) and is kept rather
    /// than corrected so existing stored verdicts stay reproducible.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 24.9 {
            Verdict::NormalWeight
        } else if (25.0..29.9).contains(&bmi) {
            Verdict::Overweight
        } else {
            Verdict::Obesity
        }
    }
}

/// Compute BMI from height (meters) and weight (kilograms), rounded to two
/// decimal places.
pub fn bmi(height_m: f64, weight_kg: f64) -> f64 {
    let raw = weight_kg / (height_m * height_m);
    (raw * 100.0).round() / 100.0
}

/// Caller-supplied patient fields, prior to validation.
///
/// The record identifier is not part of the attributes; it lives as the map
/// key in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientAttributes {
    /// Patient name
    pub name: String,
    /// City of residence
    pub city: String,
    /// Age in years, strictly between 0 and 120
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Height in meters, strictly positive
    pub height: f64,
    /// Weight in kilograms, strictly positive
    pub weight: f64,
}

/// A validated patient record with derived metrics.
///
/// `bmi` and `verdict` are always recomputed from `height`/`weight` during
/// construction; they are never accepted from callers as authoritative input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Patient name
    pub name: String,
    /// City of residence
    pub city: String,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Body-mass index, derived from height/weight
    pub bmi: f64,
    /// Categorical BMI classification, derived from bmi
    pub verdict: Verdict,
}

impl Patient {
    /// Validate a candidate field set and produce a fully derived record.
    pub fn from_attributes(attrs: PatientAttributes) -> Result<Self, ValidationError> {
        if attrs.name.is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if attrs.city.is_empty() {
            return Err(ValidationError::new("city", "must not be empty"));
        }
        if attrs.age == 0 || attrs.age >= 120 {
            return Err(ValidationError::new(
                "age",
                format!("must be strictly between 0 and 120 (got {})", attrs.age),
            ));
        }
        if attrs.height.is_nan() || attrs.height <= 0.0 {
            return Err(ValidationError::new(
                "height",
                format!("must be strictly positive (got {})", attrs.height),
            ));
        }
        if attrs.weight.is_nan() || attrs.weight <= 0.0 {
            return Err(ValidationError::new(
                "weight",
                format!("must be strictly positive (got {})", attrs.weight),
            ));
        }

        let bmi = bmi(attrs.height, attrs.weight);
        let verdict = Verdict::from_bmi(bmi);

        Ok(Self {
            name: attrs.name,
            city: attrs.city,
            age: attrs.age,
            gender: attrs.gender,
            height: attrs.height,
            weight: attrs.weight,
            bmi,
            verdict,
        })
    }

    /// Extract the caller-editable attributes (without derived fields).
    pub fn attributes(&self) -> PatientAttributes {
        PatientAttributes {
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        }
    }
}
