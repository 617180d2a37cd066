//! # Thermodynamics Module
//!
//! The statistical-thermodynamics engine for equilibrium vacancies.
//!
//! ## Overview
//!
//! Each lattice site competes between `N + 1` states: occupied by one of `N`
//! species, or vacant with the displaced atom moved into a bulk reservoir of its
//! species. The reservoir energies (chemical potentials) are not assumed; they are
//! solved from the site-resolved energetics and the bulk enthalpy per atom.
//!
//! ## Key Components
//!
//! - [`chemical_potential`] - Least-squares solve for per-species chemical potentials
//! - [`formation`] - Per-(species, site) formation arrays relative to the vacant state
//! - [`averaging`] - Boltzmann-weighted vacancy concentration and formation quantities
//! - [`fluctuation`] - Occupation-number fluctuation from the chemical potentials
//! - [`summary`] - Per-species statistics and histograms of formation arrays
//! - [`units`] - Temperature and inverse-temperature conversions
//!
//! ## Usage
//!
//! ```ignore
//! use sitestat::core::thermo::{averaging::FormationCalculator, formation, chemical_potential};
//!
//! let mu = chemical_potential::solve_chemical_potentials(&species, &occupying, &conc, h)?;
//! let energetics = formation::formation_array(&occupying, &vacant, Some(&mu))?;
//! let calculator = FormationCalculator::new(energetics, volumetrics)?;
//! let x_v = calculator.concentrations(&betas);
//! ```

pub mod averaging;
pub mod chemical_potential;
pub mod error;
pub mod fluctuation;
pub mod formation;
pub mod summary;
pub mod units;
