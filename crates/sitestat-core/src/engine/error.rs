use super::config::ConfigError;
use crate::core::io::dataset::DatasetError;
use crate::core::thermo::error::ThermoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Thermodynamics error: {source}")]
    Thermo {
        #[from]
        source: ThermoError,
    },

    #[error("Dataset error: {source}")]
    Dataset {
        #[from]
        source: DatasetError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Frame {step} of system '{system}' failed: {reason}")]
    Frame {
        system: String,
        step: u64,
        reason: String,
    },
}
