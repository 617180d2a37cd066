//! # Workflows Module
//!
//! High-level entry points that chain the core building blocks into complete
//! analyses.
//!
//! - **Vacancy Characteristics** ([`vacancy`]) - Chemical potentials, formation arrays
//!   and the concentration, formation energy and formation volume curves of one frame
//! - **Frame Sweep** ([`sweep`]) - The same quantities for many frames of a trajectory
//!   at a fixed set of temperatures

pub mod sweep;
pub mod vacancy;
