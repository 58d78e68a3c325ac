use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning GPX files into a track table.
#[derive(Error, Debug)]
pub enum TabulateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPX parsing error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("XML error: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("found {heart_rates} heart-rate values for {points} track points")]
    Consistency { heart_rates: usize, points: usize },

    #[error("failed to process {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<TabulateError>,
    },

    #[error("no input files given")]
    NoInputFiles,
}

impl TabulateError {
    /// Attach the file that was being processed when `self` occurred.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        TabulateError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for tabulation operations.
pub type Result<T> = std::result::Result<T, TabulateError>;
