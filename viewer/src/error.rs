use gridsnake_core::error::ConfigurationError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to read configuration file `{path}`: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("invalid configuration file `{path}`: {source}")]
    ConfigFormat {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("configuration file `{0}` does not exist")]
    MissingConfig(PathBuf),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to open log file: {0}")]
    LogFile(#[source] io::Error),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("failed to set up the terminal: {0}")]
    Terminal(#[source] io::Error),
    #[error("game cannot start: {0}")]
    Game(#[from] ConfigurationError),
}

/// A host resource that could not be released cleanly. Reported, never fatal.
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error("failed to restore the terminal: {0}")]
    Terminal(#[source] io::Error),
}
