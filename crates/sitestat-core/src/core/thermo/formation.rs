use super::error::ThermoError;
use nalgebra::{DMatrix, DVector};

/// Builds the local formation (penalty) array for one physical quantity.
///
/// Entry `(t, s)` is `vacant[s] - occupying[t, s]`, plus `chemical_potentials[t]`
/// when chemical potentials are supplied. The vacant vector is replicated across
/// species and the chemical potentials across sites as outer products, so the
/// correction is uniform per species and never per site.
///
/// # Errors
///
/// Returns [`ThermoError::ShapeMismatch`] if `vacant` does not have one entry per
/// site (column) of `occupying`, or if `chemical_potentials` does not have one
/// entry per species (row).
pub fn formation_array(
    occupying: &DMatrix<f64>,
    vacant: &DVector<f64>,
    chemical_potentials: Option<&DVector<f64>>,
) -> Result<DMatrix<f64>, ThermoError> {
    let (num_species, num_sites) = occupying.shape();

    if vacant.len() != num_sites {
        return Err(ThermoError::shape(
            "vacant vector",
            (num_sites,),
            (vacant.len(),),
        ));
    }

    let species_ones = DVector::from_element(num_species, 1.0);
    let mut formation = &species_ones * vacant.transpose() - occupying;

    if let Some(potentials) = chemical_potentials {
        if potentials.len() != num_species {
            return Err(ThermoError::shape(
                "chemical potential vector",
                (num_species,),
                (potentials.len(),),
            ));
        }
        let site_ones = DVector::from_element(num_sites, 1.0);
        formation += potentials * site_ones.transpose();
    }

    Ok(formation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupying() -> DMatrix<f64> {
        DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
    }

    #[test]
    fn subtracts_occupying_rows_from_vacant_vector() {
        let vacant = DVector::from_vec(vec![10.0, 20.0, 30.0]);
        let formation = formation_array(&occupying(), &vacant, None).unwrap();
        assert_eq!(
            formation,
            DMatrix::from_row_slice(2, 3, &[9.0, 18.0, 27.0, 6.0, 15.0, 24.0])
        );
    }

    #[test]
    fn adds_chemical_potential_uniformly_along_each_species_row() {
        let vacant = DVector::zeros(3);
        let potentials = DVector::from_vec(vec![0.5, -1.0]);
        let formation = formation_array(&occupying(), &vacant, Some(&potentials)).unwrap();
        assert_eq!(
            formation,
            DMatrix::from_row_slice(2, 3, &[-0.5, -1.5, -2.5, -5.0, -6.0, -7.0])
        );
    }

    #[test]
    fn zero_chemical_potentials_match_no_correction() {
        let vacant = DVector::from_vec(vec![0.3, -0.7, 1.1]);
        let without = formation_array(&occupying(), &vacant, None).unwrap();
        let with_zeros = formation_array(&occupying(), &vacant, Some(&DVector::zeros(2))).unwrap();
        assert_eq!(without, with_zeros);
    }

    #[test]
    fn rejects_vacant_vector_with_wrong_site_count() {
        let occupying = DMatrix::zeros(3, 10);
        let vacant = DVector::zeros(9);
        let result = formation_array(&occupying, &vacant, None);
        assert!(matches!(
            result,
            Err(ThermoError::ShapeMismatch {
                what: "vacant vector",
                ..
            })
        ));
    }

    #[test]
    fn rejects_chemical_potentials_with_wrong_species_count() {
        let vacant = DVector::zeros(3);
        let potentials = DVector::zeros(3);
        let result = formation_array(&occupying(), &vacant, Some(&potentials));
        assert!(matches!(
            result,
            Err(ThermoError::ShapeMismatch {
                what: "chemical potential vector",
                ..
            })
        ));
    }
}
