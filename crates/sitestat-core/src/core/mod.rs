//! # Core Module
//!
//! Stateless building blocks for site-resolved vacancy thermodynamics.
//!
//! ## Overview
//!
//! The core module holds the value types describing per-site simulation data, the
//! statistical-thermodynamics engine that turns those values into chemical
//! potentials and temperature-dependent vacancy properties, and the file I/O
//! that connects the engine to the simulation pipeline.
//!
//! ## Architecture
//!
//! - **Data Representation** ([`models`]) - Site-resolved quantities, frames and compositions
//! - **Thermodynamics** ([`thermo`]) - Chemical potentials, formation arrays and Boltzmann averages
//! - **File I/O** ([`io`]) - Numeric text files, dataset layout and CSV reports
//!
//! ## Scientific Foundation
//!
//! Every site is treated as an independent grand-canonical subsystem with one
//! vacant and `N` occupied states. The vacancy concentration and the formation
//! energy and volume follow from the site partition functions and their
//! derivatives with respect to inverse temperature.

pub mod io;
pub mod models;
pub mod thermo;
