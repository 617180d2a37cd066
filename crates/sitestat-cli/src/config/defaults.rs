use std::path::PathBuf;

pub struct DefaultsConfig {
    pub energetics_dir: PathBuf,
    pub volumetrics_dir: PathBuf,
    pub output_dir: PathBuf,
    pub beta_start: f64,
    pub beta_stop: f64,
    pub beta_num: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            energetics_dir: PathBuf::from("energetics_data"),
            volumetrics_dir: PathBuf::from("volumetrics_data"),
            output_dir: PathBuf::from("."),
            beta_start: 10.0,
            beta_stop: 30.0,
            beta_num: 10_000,
        }
    }
}
