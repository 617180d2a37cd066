use thiserror::Error;

/// Precondition failures raised by the thermodynamics engine.
///
/// Every variant is detected before any numeric work starts. Floating-point
/// overflow during exponentiation is deliberately not represented here: it
/// surfaces as `inf`/`NaN` in the returned values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ThermoError {
    #[error("Shape mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: String,
        found: String,
    },

    #[error("At least one species is required")]
    NoSpecies,

    #[error("At least one site is required")]
    NoSites,

    #[error("Species indices must be a permutation of 0..{num_species}, got {indices:?}")]
    InvalidSpeciesIndices {
        num_species: usize,
        indices: Vec<usize>,
    },

    #[error("Concentration of species {species} must be finite and nonnegative, got {value}")]
    InvalidConcentration { species: usize, value: f64 },

    #[error("Least-squares solve failed: {0}")]
    Solver(&'static str),
}

impl ThermoError {
    pub(crate) fn shape(
        what: &'static str,
        expected: impl std::fmt::Debug,
        found: impl std::fmt::Debug,
    ) -> Self {
        Self::ShapeMismatch {
            what,
            expected: format!("{:?}", expected),
            found: format!("{:?}", found),
        }
    }
}
