use std::path::PathBuf;
use thiserror::Error;

/// The main error type for trajlabel operations.
#[derive(Debug, Error)]
pub enum TrajlabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Trajectory file {path} must end with '_ball.csv'")]
    InvalidTrajectoryName { path: PathBuf },

    #[error("Unsupported shape type: {0}")]
    UnsupportedShape(String),

    #[error("Shape type '{shape_type}' needs {expected} point(s), got {found}")]
    InvalidShapePoints {
        shape_type: String,
        expected: usize,
        found: usize,
    },

    #[error("Frame {frame} exceeds current points length {len}")]
    FrameOutOfRange { frame: usize, len: usize },

    #[error("Failed to parse trajectory CSV from {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write trajectory CSV to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid trajectory CSV {path}: {message}")]
    CsvInvalid { path: PathBuf, message: String },

    #[error("No frame image for frame {frame} ({available} image(s) available)")]
    ImageNotFound { frame: usize, available: usize },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Invalid frame image name {path}: {message}")]
    InvalidImageName { path: PathBuf, message: String },

    #[error("Failed to write label file {path}: {source}")]
    LabelFileWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
