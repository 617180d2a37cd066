use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDataConfig {
    pub energetics_dir: Option<PathBuf>,
    pub volumetrics_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", tag = "type")]
pub enum FileBetaGrid {
    Linear {
        start: Option<f64>,
        stop: Option<f64>,
        num: Option<usize>,
    },
    Temperatures {
        values: Vec<f64>,
    },
    Values {
        values: Vec<f64>,
    },
}

impl Default for FileBetaGrid {
    fn default() -> Self {
        FileBetaGrid::Linear {
            start: None,
            stop: None,
            num: None,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSweepConfig {
    pub temperatures: Option<Vec<f64>>,
}

/// Type map of one system: species label (`"1"`, `"2"`, ...) to element name.
pub type FileTypeMap = BTreeMap<String, String>;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    #[serde(default)]
    pub systems: Vec<String>,
    pub final_step: Option<u64>,
    pub steps: Option<Vec<u64>>,
    pub data: Option<FileDataConfig>,
    #[serde(default)]
    pub type_maps: BTreeMap<String, FileTypeMap>,
    #[serde(default)]
    pub concentrations: BTreeMap<String, Vec<f64>>,
    pub beta_grid: Option<FileBetaGrid>,
    pub sweep: Option<FileSweepConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
