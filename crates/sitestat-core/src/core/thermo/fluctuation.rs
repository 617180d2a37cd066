use nalgebra::DVector;

/// Occupation-number fluctuation of a site in equilibrium with the species
/// reservoirs at inverse temperature `beta`.
///
/// With fugacities `f_t = exp(beta * mu_t)` the fluctuation is
/// `sqrt(1 - sum_t f_t^2 / (sum_t f_t)^2)`. The fugacities are rescaled by the
/// largest one before summing, which leaves the ratio unchanged.
pub fn occupation_fluctuation(beta: f64, chemical_potentials: &DVector<f64>) -> f64 {
    let exponents = chemical_potentials.map(|mu| beta * mu);
    let shift = exponents.max();
    let fugacities = exponents.map(|x| (x - shift).exp());

    let sum = fugacities.sum();
    let sum_of_squares = fugacities.norm_squared();

    (1.0 - sum_of_squares / (sum * sum)).max(0.0).sqrt()
}

pub fn occupation_fluctuations(betas: &[f64], chemical_potentials: &DVector<f64>) -> Vec<f64> {
    betas
        .iter()
        .map(|&beta| occupation_fluctuation(beta, chemical_potentials))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn equal_potentials_give_maximal_fluctuation() {
        let mu = DVector::from_vec(vec![-4.0; 4]);
        let expected = (1.0 - 1.0 / 4.0_f64).sqrt();
        assert!((occupation_fluctuation(12.0, &mu) - expected).abs() < TOLERANCE);
    }

    #[test]
    fn zero_beta_treats_all_species_alike() {
        let mu = DVector::from_vec(vec![-4.0, -3.1, -5.6]);
        let expected = (1.0 - 1.0 / 3.0_f64).sqrt();
        assert!((occupation_fluctuation(0.0, &mu) - expected).abs() < TOLERANCE);
    }

    #[test]
    fn single_species_has_no_fluctuation() {
        let mu = DVector::from_vec(vec![-4.2]);
        assert_eq!(occupation_fluctuation(20.0, &mu), 0.0);
    }

    #[test]
    fn dominant_species_suppresses_fluctuation_at_large_beta() {
        let mu = DVector::from_vec(vec![-3.0, -5.0]);
        let cold = occupation_fluctuation(1000.0, &mu);
        let warm = occupation_fluctuation(1.0, &mu);
        assert!(cold.is_finite());
        assert!(cold < 1e-100);
        assert!(warm > cold);
    }

    #[test]
    fn grid_matches_pointwise_evaluation() {
        let mu = DVector::from_vec(vec![-3.9, -4.3]);
        let betas = [10.0, 20.0, 30.0];
        let values = occupation_fluctuations(&betas, &mu);
        for (value, &beta) in values.iter().zip(betas.iter()) {
            assert_eq!(*value, occupation_fluctuation(beta, &mu));
        }
    }
}
