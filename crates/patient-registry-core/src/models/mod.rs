//! Domain models for the patient registry.

mod patient;
mod update;

pub use patient::*;
pub use update::*;
