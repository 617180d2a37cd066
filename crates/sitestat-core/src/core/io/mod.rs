//! # I/O Module
//!
//! Reading the per-site insertion data produced by the simulation pipeline and
//! writing the derived curves.
//!
//! - [`text`] - Whitespace-separated numeric text files
//! - [`dataset`] - Directory layout of energetics/volumetrics frames
//! - [`report`] - CSV records for curves, fluctuations, histograms and sweeps

pub mod dataset;
pub mod report;
pub mod text;
