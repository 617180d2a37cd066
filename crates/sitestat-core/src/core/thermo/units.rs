/// Boltzmann constant in eV/K, at the precision the energetics data is produced with.
pub const BOLTZMANN_CONSTANT_EV_PER_K: f64 = 8.615e-5;

/// Converts a temperature in kelvin to an inverse temperature in 1/eV.
#[inline]
pub fn temperature_to_beta(temperature: f64) -> f64 {
    1.0 / (BOLTZMANN_CONSTANT_EV_PER_K * temperature)
}

/// Converts an inverse temperature in 1/eV back to kelvin.
///
/// The map is its own inverse, so this is the same formula as
/// [`temperature_to_beta`].
#[inline]
pub fn beta_to_temperature(beta: f64) -> f64 {
    1.0 / (BOLTZMANN_CONSTANT_EV_PER_K * beta)
}

/// `num` evenly spaced values from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| {
                    if i == num - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn conversion_round_trips_through_beta() {
        for temperature in [200.0, 650.0, 1000.0] {
            let beta = temperature_to_beta(temperature);
            assert!((beta_to_temperature(beta) - temperature).abs() < TOLERANCE);
        }
    }

    #[test]
    fn room_temperature_beta_is_about_forty() {
        let beta = temperature_to_beta(300.0);
        assert!((beta - 38.69).abs() < 0.01);
    }

    #[test]
    fn linspace_includes_both_endpoints() {
        let grid = linspace(10.0, 30.0, 5);
        assert_eq!(grid, vec![10.0, 15.0, 20.0, 25.0, 30.0]);
    }

    #[test]
    fn linspace_handles_degenerate_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }
}
