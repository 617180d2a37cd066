//! Value types describing the per-site data of a simulated alloy.
//!
//! - [`site`] - Site-resolved quantities for vacant and occupied states, and a
//!   whole frame (energetics, volumetrics, enthalpy per atom)
//! - [`composition`] - Species indexing and bulk concentrations

pub mod composition;
pub mod site;
