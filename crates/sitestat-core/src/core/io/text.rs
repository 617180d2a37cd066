use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: '{value}' is not a number")]
    InvalidNumber { line: usize, value: String },
    #[error("Expected exactly one value, found {0}")]
    NotScalar(usize),
}

/// Reads whitespace-separated numbers in file order.
///
/// Blank lines and anything after a `#` are ignored. Multi-column files are
/// flattened row by row.
pub fn read_values(reader: impl BufRead) -> Result<Vec<f64>, TextError> {
    let mut values = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("");
        for token in content.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|_| TextError::InvalidNumber {
                    line: index + 1,
                    value: token.to_string(),
                })?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Reads a file that must contain exactly one number.
pub fn read_scalar(reader: impl BufRead) -> Result<f64, TextError> {
    match read_values(reader)?.as_slice() {
        [value] => Ok(*value),
        other => Err(TextError::NotScalar(other.len())),
    }
}

pub fn read_values_from_path(path: &Path) -> Result<Vec<f64>, TextError> {
    read_values(BufReader::new(File::open(path)?))
}

pub fn read_scalar_from_path(path: &Path) -> Result<f64, TextError> {
    read_scalar(BufReader::new(File::open(path)?))
}

/// Writes one value per line in full-precision scientific notation.
pub fn write_values(writer: &mut impl Write, values: &[f64]) -> Result<(), TextError> {
    for value in values {
        writeln!(writer, "{:.18e}", value)?;
    }
    Ok(())
}

pub fn write_values_to_path(path: &Path, values: &[f64]) -> Result<(), TextError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_values(&mut writer, values)?;
    writer.flush()?;
    Ok(())
}
