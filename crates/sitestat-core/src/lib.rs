//! # SiteStat Core Library
//!
//! Site-resolved statistical thermodynamics of vacancies in multi-component
//! alloys: chemical potentials from insertion energetics, and the vacancy
//! concentration, formation energy and formation volume as functions of
//! inverse temperature.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Value types for per-site data (`SiteQuantity`,
//!   `SiteSnapshot`, `Composition`), the thermodynamic engine (chemical potential
//!   solver, formation arrays, Boltzmann averaging) and the file I/O around it.
//!
//! - **[`engine`]: Shared Plumbing.** Analysis configuration, the aggregated
//!   error type and progress events.
//!
//! - **[`workflows`]: The Public API.** Complete analyses of one frame
//!   (`vacancy`) or of a trajectory of frames (`sweep`).

pub mod core;
pub mod engine;
pub mod workflows;
