// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for data loading, configuration and rendering.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column `{0}` in CSV header")]
    MissingColumn(&'static str),

    #[error("row {row}: unknown age group `{label}`")]
    UnknownAgeGroup { row: usize, label: String },

    #[error("row {row}: `{column}` is not a number: `{value}`")]
    InvalidPercentage {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("no data rows found")]
    EmptyDataset,

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create raster surface {width}x{height}")]
    Surface { width: i32, height: i32 },

    #[error("failed to read back rendered pixels")]
    ReadPixels,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("SVG writing failed: {0}")]
    Svg(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    /// True for failures of the input data (missing or malformed file).
    pub fn is_data_load(&self) -> bool {
        matches!(
            self,
            ChartError::Io { .. }
                | ChartError::Csv(_)
                | ChartError::MissingColumn(_)
                | ChartError::UnknownAgeGroup { .. }
                | ChartError::InvalidPercentage { .. }
                | ChartError::EmptyDataset
        )
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
