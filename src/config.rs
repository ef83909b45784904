use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::{Result, StorageError};
use crate::parcel::{Cost, Parcel, ParcelRef};
use crate::storage::ParcelStorage;

/// Intake manifest loaded from a TOML file: the parcels an office starts with.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Manifest {
    /// Office the parcels belong to unless they name another one.
    #[serde(default)]
    pub office: OfficeConfig,
    #[serde(default)]
    pub parcels: Vec<ParcelEntry>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OfficeConfig {
    /// Office number given to parcels without `office_number`.
    #[serde(default)]
    pub number: i32,
}

/// One `[[parcels]]` table.
#[derive(Debug, Deserialize, Clone)]
pub struct ParcelEntry {
    pub weight: f64,
    /// Decimal string, e.g. `"5.00"`.
    pub cost: Cost,
    pub volume: f64,
    #[serde(default)]
    pub office_number: Option<i32>,
}

impl Manifest {
    /// Load a manifest from a TOML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&content)?;
        info!(path = ?path, parcels = manifest.parcels.len(), "Manifest loaded");
        Ok(manifest)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)
            .map_err(|e| StorageError::Config(format!("Invalid TOML: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        for (i, entry) in self.parcels.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(StorageError::Config(format!(
                    "parcels[{i}]: weight must be a non-negative number"
                )));
            }
            if !entry.volume.is_finite() || entry.volume < 0.0 {
                return Err(StorageError::Config(format!(
                    "parcels[{i}]: volume must be a non-negative number"
                )));
            }
            if entry.cost.is_negative() {
                return Err(StorageError::Config(format!("parcels[{i}]: cost must not be negative")));
            }
        }
        Ok(())
    }

    /// Fresh parcel handles, one per entry, in file order.
    pub fn into_parcels(self) -> Vec<ParcelRef> {
        let default_office = self.office.number;
        self.parcels
            .into_iter()
            .map(|e| {
                let office = e.office_number.unwrap_or(default_office);
                ParcelRef::new(Parcel::new(e.weight, e.cost, e.volume, office))
            })
            .collect()
    }
}

impl ParcelStorage {
    /// Seed a storage with the parcels listed in `manifest`.
    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        Self::with_parcels(manifest.into_parcels())
    }
}
