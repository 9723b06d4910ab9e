//! Per-frame label records and the writers that persist them.
//!
//! The trajectory store only assembles a [`LabelRecord`]; how it reaches disk
//! is up to the [`LabelFileWriter`] it is handed. [`JsonLabelFileWriter`]
//! produces labelme-compatible JSON.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TrajlabelError;
use crate::traj::Shape;

/// labelme release whose file layout the JSON writer follows.
pub const DEFAULT_LABELME_VERSION: &str = "5.5.0";

/// Everything a label record holds for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecord {
    pub version: String,

    pub flags: BTreeMap<String, bool>,

    pub shapes: Vec<Shape>,

    /// Image location relative to the record file.
    pub image_path: String,

    /// Inline base64 image; trajectory records never embed one.
    pub image_data: Option<String>,

    pub image_height: u32,

    pub image_width: u32,

    /// Extra top-level keys.
    #[serde(flatten)]
    pub other_data: serde_json::Map<String, serde_json::Value>,
}

/// Sink for label records.
pub trait LabelFileWriter {
    /// Persists `record` at `path`.
    fn write(&mut self, path: &Path, record: &LabelRecord) -> Result<(), TrajlabelError>;

    /// Version string to stamp into new records.
    fn version(&self) -> &str {
        DEFAULT_LABELME_VERSION
    }
}

/// Writes label records as pretty-printed labelme JSON files.
#[derive(Clone, Debug)]
pub struct JsonLabelFileWriter {
    version: String,
}

impl JsonLabelFileWriter {
    /// Creates a writer that stamps records with `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl Default for JsonLabelFileWriter {
    fn default() -> Self {
        Self::new(DEFAULT_LABELME_VERSION)
    }
}

impl LabelFileWriter for JsonLabelFileWriter {
    fn write(&mut self, path: &Path, record: &LabelRecord) -> Result<(), TrajlabelError> {
        let file = File::create(path).map_err(TrajlabelError::Io)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, record).map_err(|source| {
            TrajlabelError::LabelFileWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;

        writer.flush().map_err(TrajlabelError::Io)
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Keeps records in memory instead of writing files.
///
/// Useful for testing and for callers that post-process records.
#[derive(Clone, Debug, Default)]
pub struct MemoryLabelFileWriter {
    pub records: Vec<(PathBuf, LabelRecord)>,
}

impl LabelFileWriter for MemoryLabelFileWriter {
    fn write(&mut self, path: &Path, record: &LabelRecord) -> Result<(), TrajlabelError> {
        self.records.push((path.to_path_buf(), record.clone()));
        Ok(())
    }
}
