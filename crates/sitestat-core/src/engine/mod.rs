//! # Engine Module
//!
//! Configuration, error aggregation and progress plumbing shared by the
//! workflows.
//!
//! - **Configuration** ([`config`]) - Beta grids, concentrations and sweep temperatures
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping the core errors
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events

pub mod config;
pub mod error;
pub mod progress;
