use super::error::ThermoError;
use itertools::Itertools;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument, warn};

/// Solves for per-species chemical potentials from site-resolved energetics.
///
/// Row `i` of `occupying_energies` and `concentrations[i]` belong to species
/// `species[i]`. The unknowns are indexed by species index, so the returned
/// vector satisfies `mu[species[i]]` for row `i` and is unchanged when the
/// species listing is permuted consistently with the rows and concentrations.
///
/// The linear system has one equation per unordered pair of species,
///
/// ```text
/// mu_a - mu_b = mean_s(E[a, s] - E[b, s])
/// ```
///
/// and one anchor equation `sum_t c_t * mu_t = enthalpy_per_atom`. It is solved
/// in the least-squares sense through an SVD, discarding singular values below
/// `eps * max(rows, cols) * sigma_max`.
///
/// A rank-deficient system is not an error: the minimum-norm solution is
/// returned and callers must not read it as a unique physical answer.
///
/// # Errors
///
/// Fails before solving if the species, energy rows and concentrations
/// disagree in length, if there are no species or no sites, if the species
/// indices are not a permutation of `0..N`, or if a concentration is negative
/// or non-finite.
#[instrument(level = "debug", skip_all, fields(num_species = species.len()))]
pub fn solve_chemical_potentials(
    species: &[usize],
    occupying_energies: &DMatrix<f64>,
    concentrations: &[f64],
    enthalpy_per_atom: f64,
) -> Result<DVector<f64>, ThermoError> {
    let (num_species, num_sites) = occupying_energies.shape();

    if species.len() != num_species {
        return Err(ThermoError::shape(
            "species indices",
            (num_species,),
            (species.len(),),
        ));
    }
    if concentrations.len() != num_species {
        return Err(ThermoError::shape(
            "concentrations",
            (num_species,),
            (concentrations.len(),),
        ));
    }
    validate_species_indices(species)?;
    validate_concentrations(concentrations)?;
    if num_sites == 0 {
        return Err(ThermoError::NoSites);
    }

    let pairs: Vec<(usize, usize)> = (0..num_species).tuple_combinations().collect();
    let num_equations = pairs.len() + 1;

    let mut coefficients = DMatrix::zeros(num_equations, num_species);
    let mut rhs = DVector::zeros(num_equations);

    for (equation, &(first, second)) in pairs.iter().enumerate() {
        coefficients[(equation, species[first])] = 1.0;
        coefficients[(equation, species[second])] = -1.0;
        rhs[equation] =
            (occupying_energies.row(first) - occupying_energies.row(second)).mean();
    }

    let anchor = pairs.len();
    for (row, &concentration) in concentrations.iter().enumerate() {
        coefficients[(anchor, species[row])] = concentration;
    }
    rhs[anchor] = enthalpy_per_atom;

    debug!(
        num_equations,
        num_species, "Assembled chemical potential system."
    );

    least_squares(coefficients, &rhs)
}

fn least_squares(
    coefficients: DMatrix<f64>,
    rhs: &DVector<f64>,
) -> Result<DVector<f64>, ThermoError> {
    let (rows, cols) = coefficients.shape();
    let svd = coefficients.svd(true, true);

    let sigma_max = svd.singular_values.max();
    let cutoff = f64::EPSILON * rows.max(cols) as f64 * sigma_max;

    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();
    if rank < cols {
        warn!(
            rank,
            unknowns = cols,
            "Chemical potential system is rank deficient; returning the minimum-norm solution."
        );
    }

    svd.solve(rhs, cutoff).map_err(ThermoError::Solver)
}

pub(crate) fn validate_species_indices(species: &[usize]) -> Result<(), ThermoError> {
    if species.is_empty() {
        return Err(ThermoError::NoSpecies);
    }
    let mut seen = vec![false; species.len()];
    for &index in species {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(ThermoError::InvalidSpeciesIndices {
                    num_species: species.len(),
                    indices: species.to_vec(),
                });
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_concentrations(concentrations: &[f64]) -> Result<(), ThermoError> {
    if let Some((species, &value)) = concentrations
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_finite() || **c < 0.0)
    {
        return Err(ThermoError::InvalidConcentration { species, value });
    }
    Ok(())
}
