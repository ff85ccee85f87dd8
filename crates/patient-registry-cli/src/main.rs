//! Command-line frontend for the patient registry.
//!
//! Thin request/response mapping onto `patient_registry_core`: each
//! subcommand corresponds to one registry operation, results are printed as
//! pretty JSON on stdout, errors exit non-zero via anyhow.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use patient_registry_core::{
    Gender, JsonFileStore, PatientAttributes, PatientRegistry, PatientUpdate, SortField,
    SortOrder,
};

#[derive(Parser)]
#[command(name = "patient-registry", about = "Manage patient records with derived BMI metrics")]
struct Cli {
    /// Path to the patients JSON document
    #[arg(long, default_value = "patients.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty patient document if none exists
    Init,

    /// List every patient record
    List,

    /// Show one patient by id
    Get { id: String },

    /// List patients ordered by a numeric field
    Sort {
        /// Sort field: height, weight, or bmi
        #[arg(long = "by", default_value = "height")]
        field: String,
        /// Sort order: asc or desc
        #[arg(long, default_value = "asc")]
        order: String,
    },

    /// Create a new patient record
    Create {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        age: u32,
        /// male, female, or other
        #[arg(long)]
        gender: String,
        /// Height in meters
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },

    /// Update fields of an existing patient (omitted flags stay unchanged)
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        /// male, female, or other
        #[arg(long)]
        gender: Option<String>,
        /// Height in meters
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Delete a patient by id
    Delete { id: String },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let store = JsonFileStore::new(&cli.file);
    let registry = PatientRegistry::new(store);

    match cli.command {
        Command::Init => {
            registry.store().init_if_missing()?;
            println!("initialized {}", cli.file.display());
        }
        Command::List => {
            let patients = registry.list()?;
            println!("{}", serde_json::to_string_pretty(&patients)?);
        }
        Command::Get { id } => {
            let patient = registry.get(&id)?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        Command::Sort { field, order } => {
            let field: SortField = field.parse()?;
            let order: SortOrder = order.parse()?;
            let patients = registry.sort_by(field, order)?;
            println!("{}", serde_json::to_string_pretty(&patients)?);
        }
        Command::Create {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        } => {
            let gender: Gender = gender.parse()?;
            let patient = registry.create(
                &id,
                PatientAttributes {
                    name,
                    city,
                    age,
                    gender,
                    height,
                    weight,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        Command::Update {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        } => {
            let gender = gender.map(|g| g.parse::<Gender>()).transpose()?;
            let patient = registry.update(
                &id,
                PatientUpdate {
                    name,
                    city,
                    age,
                    gender,
                    height,
                    weight,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        Command::Delete { id } => {
            registry.delete(&id)?;
            println!("deleted {id}");
        }
    }

    Ok(())
}
