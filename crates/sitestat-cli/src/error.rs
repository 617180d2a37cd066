use sitestat::core::io::dataset::DatasetError;
use sitestat::core::thermo::error::ThermoError;
use sitestat::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    SiteStatCore(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write '{path}': {source}", path = path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        CliError::SiteStatCore(e.into())
    }
}

impl From<ThermoError> for CliError {
    fn from(e: ThermoError) -> Self {
        CliError::SiteStatCore(e.into())
    }
}

impl CliError {
    pub fn output<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CliError::Output {
            path: path.into(),
            source: source.into(),
        }
    }
}
