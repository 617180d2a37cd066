use super::text::{self, TextError};
use crate::core::models::site::{SiteQuantity, SiteSnapshot};
use crate::core::thermo::error::ThermoError;
use nalgebra::{DMatrix, DVector};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read '{path}': {source}", path = path.display())]
    File {
        path: PathBuf,
        #[source]
        source: TextError,
    },

    #[error("'{path}' holds {found} values but the frame has {expected} sites", path = path.display())]
    SiteCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Shape(#[from] ThermoError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Energetics,
    Volumetrics,
}

/// On-disk layout of per-site insertion data.
///
/// For a system `sys`, a timestep `step` and species labels `t = 1..=N`:
///
/// ```text
/// {energetics_dir}/{sys}/occupying{t}_{step}.txt   per-site energies, species t on the site
/// {energetics_dir}/{sys}/vacant_{step}.txt         per-site energies, site vacant
/// {energetics_dir}/{sys}/enthalpy_{step}.txt       enthalpy per atom (one value)
/// {volumetrics_dir}/{sys}/occupying{t}_{step}.txt  per-site volumes, species t on the site
/// {volumetrics_dir}/{sys}/vacant_{step}.txt        per-site volumes, site vacant
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub energetics_dir: PathBuf,
    pub volumetrics_dir: PathBuf,
}

impl DatasetLayout {
    pub fn new(energetics_dir: impl Into<PathBuf>, volumetrics_dir: impl Into<PathBuf>) -> Self {
        Self {
            energetics_dir: energetics_dir.into(),
            volumetrics_dir: volumetrics_dir.into(),
        }
    }

    fn system_dir(&self, kind: QuantityKind, system: &str) -> PathBuf {
        match kind {
            QuantityKind::Energetics => self.energetics_dir.join(system),
            QuantityKind::Volumetrics => self.volumetrics_dir.join(system),
        }
    }

    /// `species_label` is 1-based, matching the simulation's type numbering.
    pub fn occupying_path(
        &self,
        kind: QuantityKind,
        system: &str,
        species_label: usize,
        step: u64,
    ) -> PathBuf {
        self.system_dir(kind, system)
            .join(format!("occupying{}_{}.txt", species_label, step))
    }

    pub fn vacant_path(&self, kind: QuantityKind, system: &str, step: u64) -> PathBuf {
        self.system_dir(kind, system)
            .join(format!("vacant_{}.txt", step))
    }

    pub fn enthalpy_path(&self, system: &str, step: u64) -> PathBuf {
        self.system_dir(QuantityKind::Energetics, system)
            .join(format!("enthalpy_{}.txt", step))
    }

    /// Loads one quantity, stacking the occupying files of species `1..=num_species`
    /// as rows `0..num_species`.
    #[instrument(level = "debug", skip(self))]
    pub fn load_quantity(
        &self,
        kind: QuantityKind,
        system: &str,
        step: u64,
        num_species: usize,
    ) -> Result<SiteQuantity, DatasetError> {
        if num_species == 0 {
            return Err(ThermoError::NoSpecies.into());
        }

        let vacant_path = self.vacant_path(kind, system, step);
        let vacant = read_file(&vacant_path)?;
        let num_sites = vacant.len();

        let mut occupying = Vec::with_capacity(num_species * num_sites);
        for label in 1..=num_species {
            let path = self.occupying_path(kind, system, label, step);
            let row = read_file(&path)?;
            if row.len() != num_sites {
                return Err(DatasetError::SiteCount {
                    path,
                    expected: num_sites,
                    found: row.len(),
                });
            }
            occupying.extend(row);
        }

        debug!(num_species, num_sites, "Loaded site-resolved data.");

        let occupying = DMatrix::from_row_iterator(num_species, num_sites, occupying);
        Ok(SiteQuantity::new(DVector::from_vec(vacant), occupying)?)
    }

    /// Loads a full frame: energetics, volumetrics and enthalpy per atom.
    pub fn load_snapshot(
        &self,
        system: &str,
        step: u64,
        num_species: usize,
    ) -> Result<SiteSnapshot, DatasetError> {
        let energetics = self.load_quantity(QuantityKind::Energetics, system, step, num_species)?;
        let volumetrics =
            self.load_quantity(QuantityKind::Volumetrics, system, step, num_species)?;

        let enthalpy_path = self.enthalpy_path(system, step);
        let enthalpy_per_atom =
            text::read_scalar_from_path(&enthalpy_path).map_err(|source| DatasetError::File {
                path: enthalpy_path.clone(),
                source,
            })?;

        Ok(SiteSnapshot::new(
            energetics,
            volumetrics,
            enthalpy_per_atom,
        )?)
    }
}

fn read_file(path: &Path) -> Result<Vec<f64>, DatasetError> {
    text::read_values_from_path(path).map_err(|source| DatasetError::File {
        path: path.to_path_buf(),
        source,
    })
}
