use crate::core::models::composition::Composition;
use crate::core::thermo::error::ThermoError;
use crate::core::thermo::units::{linspace, temperature_to_beta};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Grid of inverse temperatures (1/eV) the vacancy curves are evaluated on.
#[derive(Debug, Clone, PartialEq)]
pub enum BetaGrid {
    /// `num` evenly spaced values from `start` to `stop` inclusive.
    Linear { start: f64, stop: f64, num: usize },
    /// Temperatures in kelvin, converted to beta.
    Temperatures(Vec<f64>),
    Values(Vec<f64>),
}

impl BetaGrid {
    pub fn betas(&self) -> Vec<f64> {
        match self {
            BetaGrid::Linear { start, stop, num } => linspace(*start, *stop, *num),
            BetaGrid::Temperatures(temperatures) => temperatures
                .iter()
                .map(|&t| temperature_to_beta(t))
                .collect(),
            BetaGrid::Values(values) => values.clone(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            BetaGrid::Linear { start, stop, num } => {
                if *num == 0 {
                    return Err(invalid("beta_grid.num", "must be at least 1"));
                }
                if !start.is_finite() || !stop.is_finite() {
                    return Err(invalid("beta_grid", "start and stop must be finite"));
                }
                if *start <= 0.0 || *stop <= 0.0 {
                    return Err(invalid("beta_grid", "start and stop must be positive"));
                }
            }
            BetaGrid::Temperatures(temperatures) => validate_temperatures(
                "beta_grid.temperatures",
                temperatures,
            )?,
            BetaGrid::Values(values) => {
                if values.is_empty() {
                    return Err(invalid("beta_grid.values", "must not be empty"));
                }
                if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
                    return Err(invalid(
                        "beta_grid.values",
                        format!("{} is not a positive finite beta", bad),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Bulk concentrations used to anchor the chemical potentials.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConcentrationSpec {
    /// `1 / N` for every species.
    #[default]
    Uniform,
    /// One value per species, in species order.
    Explicit(Vec<f64>),
}

impl ConcentrationSpec {
    pub fn composition(&self, num_species: usize) -> Result<Composition, ThermoError> {
        match self {
            ConcentrationSpec::Uniform => Composition::uniform(num_species),
            ConcentrationSpec::Explicit(values) => {
                if values.len() != num_species {
                    return Err(ThermoError::shape(
                        "concentrations",
                        (num_species,),
                        (values.len(),),
                    ));
                }
                Composition::from_concentrations(values.clone())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub beta_grid: BetaGrid,
    pub concentrations: ConcentrationSpec,
    /// Temperatures (K) evaluated per frame by the sweep workflow.
    pub sweep_temperatures: Vec<f64>,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    beta_grid: Option<BetaGrid>,
    concentrations: Option<ConcentrationSpec>,
    sweep_temperatures: Option<Vec<f64>>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn beta_grid(mut self, grid: BetaGrid) -> Self {
        self.beta_grid = Some(grid);
        self
    }
    pub fn concentrations(mut self, spec: ConcentrationSpec) -> Self {
        self.concentrations = Some(spec);
        self
    }
    pub fn sweep_temperatures(mut self, temperatures: Vec<f64>) -> Self {
        self.sweep_temperatures = Some(temperatures);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let beta_grid = self
            .beta_grid
            .ok_or(ConfigError::MissingParameter("beta_grid"))?;
        beta_grid.validate()?;

        let sweep_temperatures = self.sweep_temperatures.unwrap_or_default();
        if !sweep_temperatures.is_empty() {
            validate_temperatures("sweep_temperatures", &sweep_temperatures)?;
        }

        Ok(AnalysisConfig {
            beta_grid,
            concentrations: self.concentrations.unwrap_or_default(),
            sweep_temperatures,
        })
    }
}

fn validate_temperatures(parameter: &'static str, temperatures: &[f64]) -> Result<(), ConfigError> {
    if temperatures.is_empty() {
        return Err(invalid(parameter, "must not be empty"));
    }
    if let Some(bad) = temperatures.iter().find(|t| !t.is_finite() || **t <= 0.0) {
        return Err(invalid(
            parameter,
            format!("{} K is not a positive finite temperature", bad),
        ));
    }
    Ok(())
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        parameter,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_beta_grid() {
        let result = AnalysisConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("beta_grid")));
    }

    #[test]
    fn build_applies_defaults() {
        let config = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Linear {
                start: 10.0,
                stop: 30.0,
                num: 3,
            })
            .build()
            .unwrap();
        assert_eq!(config.concentrations, ConcentrationSpec::Uniform);
        assert!(config.sweep_temperatures.is_empty());
        assert_eq!(config.beta_grid.betas(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn build_rejects_empty_linear_grid() {
        let result = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Linear {
                start: 10.0,
                stop: 30.0,
                num: 0,
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "beta_grid.num",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_non_positive_temperatures() {
        let result = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Temperatures(vec![300.0, 0.0]))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Values(vec![10.0]))
            .sweep_temperatures(vec![-200.0])
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "sweep_temperatures",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_non_finite_beta_values() {
        let result = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Values(vec![1.0, f64::NAN]))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn build_rejects_non_positive_beta_grid() {
        let result = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Linear {
                start: -5.0,
                stop: 0.0,
                num: 3,
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "beta_grid",
                ..
            })
        ));

        let result = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Linear {
                start: 10.0,
                stop: 0.0,
                num: 3,
            })
            .build();
        assert!(result.is_err());

        let result = AnalysisConfigBuilder::new()
            .beta_grid(BetaGrid::Values(vec![0.0, -1.0]))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "beta_grid.values",
                ..
            })
        ));
    }

    #[test]
    fn temperature_grid_converts_to_beta() {
        let grid = BetaGrid::Temperatures(vec![1000.0]);
        let betas = grid.betas();
        assert!((betas[0] - temperature_to_beta(1000.0)).abs() < 1e-12);
    }

    #[test]
    fn explicit_concentrations_must_cover_every_species() {
        let spec = ConcentrationSpec::Explicit(vec![0.5, 0.5]);
        assert!(spec.composition(2).is_ok());
        assert!(matches!(
            spec.composition(3),
            Err(ThermoError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn uniform_concentrations_follow_species_count() {
        let composition = ConcentrationSpec::Uniform.composition(4).unwrap();
        assert_eq!(composition.concentrations(), &[0.25; 4]);
    }
}
