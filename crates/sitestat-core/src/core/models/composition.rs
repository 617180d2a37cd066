use crate::core::thermo::chemical_potential::{validate_concentrations, validate_species_indices};
use crate::core::thermo::error::ThermoError;
use tracing::warn;

const CONCENTRATION_SUM_TOLERANCE: f64 = 1e-6;

/// Bulk composition of a system: which species each data row belongs to and
/// the target concentration of that species.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    species: Vec<usize>,
    concentrations: Vec<f64>,
}

impl Composition {
    /// Species indices must be a permutation of `0..N` and concentrations
    /// nonnegative. Concentrations that do not sum to one are accepted with a
    /// warning.
    pub fn new(species: Vec<usize>, concentrations: Vec<f64>) -> Result<Self, ThermoError> {
        if species.len() != concentrations.len() {
            return Err(ThermoError::shape(
                "concentrations",
                (species.len(),),
                (concentrations.len(),),
            ));
        }
        validate_species_indices(&species)?;
        validate_concentrations(&concentrations)?;

        let total: f64 = concentrations.iter().sum();
        if (total - 1.0).abs() > CONCENTRATION_SUM_TOLERANCE {
            warn!(total, "Concentrations do not sum to one.");
        }

        Ok(Self {
            species,
            concentrations,
        })
    }

    /// Equiatomic composition over species `0..num_species`.
    pub fn uniform(num_species: usize) -> Result<Self, ThermoError> {
        if num_species == 0 {
            return Err(ThermoError::NoSpecies);
        }
        Self::new(
            (0..num_species).collect(),
            vec![1.0 / num_species as f64; num_species],
        )
    }

    /// Species numbered `0..N` in row order.
    pub fn from_concentrations(concentrations: Vec<f64>) -> Result<Self, ThermoError> {
        Self::new((0..concentrations.len()).collect(), concentrations)
    }

    pub fn species(&self) -> &[usize] {
        &self.species
    }

    pub fn concentrations(&self) -> &[f64] {
        &self.concentrations
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
