use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Bring in specific errors from other modules we want to wrap
use crate::config::ConfigError;
use crate::parser::DataFormatError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data format error: {0}")]
    DataFormat(#[from] DataFormatError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;
