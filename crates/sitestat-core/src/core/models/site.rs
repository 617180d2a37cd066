use crate::core::thermo::error::ThermoError;
use crate::core::thermo::formation;
use nalgebra::{DMatrix, DVector};

/// One physical quantity (energy or volume) resolved per site and occupation.
///
/// `occupying[(t, s)]` is the value of the whole system with site `s` occupied by
/// species `t`; `vacant[s]` is the value with site `s` vacant. The vacant vector
/// always has one entry per site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteQuantity {
    vacant: DVector<f64>,
    occupying: DMatrix<f64>,
}

impl SiteQuantity {
    pub fn new(vacant: DVector<f64>, occupying: DMatrix<f64>) -> Result<Self, ThermoError> {
        if vacant.len() != occupying.ncols() {
            return Err(ThermoError::shape(
                "vacant vector",
                (occupying.ncols(),),
                (vacant.len(),),
            ));
        }
        Ok(Self { vacant, occupying })
    }

    pub fn vacant(&self) -> &DVector<f64> {
        &self.vacant
    }

    pub fn occupying(&self) -> &DMatrix<f64> {
        &self.occupying
    }

    pub fn num_species(&self) -> usize {
        self.occupying.nrows()
    }

    pub fn num_sites(&self) -> usize {
        self.occupying.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.occupying.shape()
    }

    pub fn formation_array(
        &self,
        chemical_potentials: Option<&DVector<f64>>,
    ) -> Result<DMatrix<f64>, ThermoError> {
        formation::formation_array(&self.occupying, &self.vacant, chemical_potentials)
    }
}

/// Energetics and volumetrics of a single simulation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSnapshot {
    pub energetics: SiteQuantity,
    pub volumetrics: SiteQuantity,
    pub enthalpy_per_atom: f64,
}

impl SiteSnapshot {
    pub fn new(
        energetics: SiteQuantity,
        volumetrics: SiteQuantity,
        enthalpy_per_atom: f64,
    ) -> Result<Self, ThermoError> {
        if energetics.shape() != volumetrics.shape() {
            return Err(ThermoError::shape(
                "volumetrics",
                energetics.shape(),
                volumetrics.shape(),
            ));
        }
        Ok(Self {
            energetics,
            volumetrics,
            enthalpy_per_atom,
        })
    }

    pub fn num_species(&self) -> usize {
        self.energetics.num_species()
    }

    pub fn num_sites(&self) -> usize {
        self.energetics.num_sites()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantity(num_species: usize, num_sites: usize) -> SiteQuantity {
        SiteQuantity::new(
            DVector::zeros(num_sites),
            DMatrix::from_element(num_species, num_sites, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn site_quantity_rejects_vacant_vector_of_wrong_length() {
        let result = SiteQuantity::new(DVector::zeros(9), DMatrix::zeros(3, 10));
        assert!(matches!(result, Err(ThermoError::ShapeMismatch { .. })));
    }

    #[test]
    fn site_quantity_reports_its_dimensions() {
        let q = quantity(3, 7);
        assert_eq!(q.num_species(), 3);
        assert_eq!(q.num_sites(), 7);
        assert_eq!(q.shape(), (3, 7));
    }

    #[test]
    fn site_quantity_builds_its_formation_array() {
        let q = quantity(2, 3);
        let formation = q.formation_array(None).unwrap();
        assert_eq!(formation, DMatrix::from_element(2, 3, -1.0));
    }

    #[test]
    fn snapshot_rejects_mismatched_energetics_and_volumetrics() {
        let result = SiteSnapshot::new(quantity(2, 4), quantity(2, 5), -4.0);
        assert!(matches!(
            result,
            Err(ThermoError::ShapeMismatch {
                what: "volumetrics",
                ..
            })
        ));
    }

    #[test]
    fn snapshot_accepts_matching_shapes() {
        let snapshot = SiteSnapshot::new(quantity(2, 4), quantity(2, 4), -4.0).unwrap();
        assert_eq!(snapshot.num_species(), 2);
        assert_eq!(snapshot.num_sites(), 4);
    }
}
