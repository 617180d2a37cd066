use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One point of the vacancy curves on a beta grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveRecord {
    pub beta: f64,
    pub temperature: f64,
    pub concentration: f64,
    pub formation_energy: f64,
    pub formation_volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluctuationRecord {
    pub beta: f64,
    pub temperature: f64,
    pub fluctuation: f64,
}

/// One histogram bin of a species' local formation values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramRecord {
    pub species: String,
    pub quantity: &'static str,
    pub bin_start: f64,
    pub bin_end: f64,
    pub count: usize,
}

/// Vacancy characteristics of one frame at one temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRecord {
    pub step: u64,
    pub temperature: f64,
    pub beta: f64,
    pub concentration: f64,
    pub formation_energy: f64,
    pub formation_volume: f64,
}

/// Writes records as CSV with a header row derived from the record's fields.
pub fn write_records<W, R, I>(writer: W, records: I) -> Result<(), ReportError>
where
    W: Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_records_to_path<R, I>(path: &Path, records: I) -> Result<(), ReportError>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    write_records(File::create(path)?, records)
}
