use sitestat::core::io::dataset::DatasetLayout;
use sitestat::engine::config::AnalysisConfig;
use std::path::{Path, PathBuf};

/// One configured alloy system.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    pub name: String,
    /// Element names in species order; entry `i` is type label `i + 1`.
    pub elements: Vec<String>,
    pub analysis: AnalysisConfig,
}

impl SystemConfig {
    pub fn num_species(&self) -> usize {
        self.elements.len()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub systems: Vec<SystemConfig>,
    pub final_step: u64,
    /// Timesteps visited by `sweep`; empty when not configured.
    pub steps: Vec<u64>,
    pub layout: DatasetLayout,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn ensure_output_dir(&self) -> std::io::Result<&Path> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(&self.output_dir)
    }
}
