use super::error::ThermoError;
use nalgebra::{DMatrix, DVectorView};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Boltzmann-weighted site averages over competing occupations.
///
/// Each site has `N + 1` states: occupied by one of the `N` species, with
/// weight `exp(beta * E_form[t, s])`, or vacant with weight 1. Per site the
/// vacancy probability is `p_s = 1 / (1 + sum_t exp(beta * E_form[t, s]))`,
/// and the global quantities are
///
/// ```text
/// concentration(beta)  = mean_s p_s
/// quantity(beta, Q)    = mean_s(sum_t Q[t, s] exp(beta E[t, s]) / (1 + sum_t exp(beta E[t, s]))^2)
///                        / concentration(beta)
/// ```
///
/// Both are evaluated through a per-site log-sum-exp so that large `beta * E`
/// does not overflow; the result is algebraically identical to the direct form.
/// Every `beta` is evaluated independently of the others.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationCalculator {
    energetics: DMatrix<f64>,
    volumetrics: DMatrix<f64>,
}

impl FormationCalculator {
    /// Creates a calculator from formation energy and formation volume arrays.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::ShapeMismatch`] if the two arrays differ in shape.
    pub fn new(energetics: DMatrix<f64>, volumetrics: DMatrix<f64>) -> Result<Self, ThermoError> {
        if energetics.shape() != volumetrics.shape() {
            return Err(ThermoError::shape(
                "volumetric formation array",
                energetics.shape(),
                volumetrics.shape(),
            ));
        }
        Ok(Self {
            energetics,
            volumetrics,
        })
    }

    pub fn energetics(&self) -> &DMatrix<f64> {
        &self.energetics
    }

    pub fn volumetrics(&self) -> &DMatrix<f64> {
        &self.volumetrics
    }

    pub fn num_species(&self) -> usize {
        self.energetics.nrows()
    }

    pub fn num_sites(&self) -> usize {
        self.energetics.ncols()
    }

    /// Site-averaged vacancy concentration at inverse temperature `beta`.
    pub fn concentration(&self, beta: f64) -> f64 {
        let log_vacancy = self.log_vacancy_probabilities(beta);
        let num_sites = log_vacancy.len() as f64;
        (log_sum_exp(&log_vacancy) - num_sites.ln()).exp()
    }

    /// Thermodynamic average of a formation array `quantity` at `beta`.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::ShapeMismatch`] if `quantity` does not share the
    /// shape of the formation energy array.
    pub fn formation_quantity(
        &self,
        beta: f64,
        quantity: &DMatrix<f64>,
    ) -> Result<f64, ThermoError> {
        if quantity.shape() != self.energetics.shape() {
            return Err(ThermoError::shape(
                "formation quantity array",
                self.energetics.shape(),
                quantity.shape(),
            ));
        }
        Ok(self.vacancy_weighted_average(beta, quantity))
    }

    pub fn formation_energy(&self, beta: f64) -> f64 {
        self.vacancy_weighted_average(beta, &self.energetics)
    }

    pub fn formation_volume(&self, beta: f64) -> f64 {
        self.vacancy_weighted_average(beta, &self.volumetrics)
    }

    pub fn concentrations(&self, betas: &[f64]) -> Vec<f64> {
        map_betas(betas, |beta| self.concentration(beta))
    }

    pub fn formation_energies(&self, betas: &[f64]) -> Vec<f64> {
        map_betas(betas, |beta| self.formation_energy(beta))
    }

    pub fn formation_volumes(&self, betas: &[f64]) -> Vec<f64> {
        map_betas(betas, |beta| self.formation_volume(beta))
    }

    /// `ln p_s` for every site.
    fn log_vacancy_probabilities(&self, beta: f64) -> Vec<f64> {
        self.energetics
            .column_iter()
            .map(|column| -log_partition(beta, column))
            .collect()
    }

    // mean_s(p_s * qbar_s) / mean_s(p_s), where qbar_s is the occupation-weighted
    // quantity at site s. Weights are rescaled by max_s p_s before summing.
    fn vacancy_weighted_average(&self, beta: f64, quantity: &DMatrix<f64>) -> f64 {
        let per_site: Vec<(f64, f64)> = self
            .energetics
            .column_iter()
            .zip(quantity.column_iter())
            .map(|(energies, values)| {
                let log_z = log_partition(beta, energies);
                let occupied_average: f64 = energies
                    .iter()
                    .zip(values.iter())
                    .map(|(&e, &q)| q * (beta * e - log_z).exp())
                    .sum();
                (-log_z, occupied_average)
            })
            .collect();

        let max_log_p = per_site
            .iter()
            .map(|&(log_p, _)| log_p)
            .fold(f64::NEG_INFINITY, f64::max);

        let (weighted, total_weight) =
            per_site
                .iter()
                .fold((0.0, 0.0), |(weighted, total), &(log_p, average)| {
                    let weight = (log_p - max_log_p).exp();
                    (weighted + weight * average, total + weight)
                });

        weighted / total_weight
    }
}

/// `ln(1 + sum_t exp(beta * e_t))` over one site's column, shifted by the
/// largest exponent (including the vacant state's zero).
fn log_partition(beta: f64, energies: DVectorView<'_, f64>) -> f64 {
    let shift = energies
        .iter()
        .fold(0.0_f64, |acc, &e| acc.max(beta * e));
    let shifted_sum: f64 = (-shift).exp()
        + energies
            .iter()
            .map(|&e| (beta * e - shift).exp())
            .sum::<f64>();
    shift + shifted_sum.ln()
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|&v| (v - max).exp()).sum::<f64>().ln()
}

fn map_betas<F>(betas: &[f64], evaluate: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let values = betas.iter().map(|&beta| evaluate(beta)).collect();

    #[cfg(feature = "parallel")]
    let values = betas.par_iter().map(|&beta| evaluate(beta)).collect();

    values
}
