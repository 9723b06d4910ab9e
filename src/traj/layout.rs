//! Directory convention around a trajectory file.
//!
//! ```text
//! <root>/<csvdir>/<basename>_ball.csv
//! <root>/frame/<basename>/        extracted frame images
//! <root>/labelme/<basename>/      generated <frame>.json label records
//! ```
//!
//! `<root>` is always `<csvdir>/..`; the directories are not configurable
//! independently of the CSV location.

use std::path::{Path, PathBuf};

use crate::error::TrajlabelError;

/// File name suffix of a single-subject ball trajectory.
pub const TRAJECTORY_SUFFIX: &str = "_ball.csv";

const LABELME_DIR: &str = "labelme";
const FRAME_DIR: &str = "frame";

/// Paths derived from a trajectory CSV path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrajectoryLayout {
    csv_path: PathBuf,
    basename: String,
    labelme_dir: PathBuf,
    frame_dir: PathBuf,
}

impl TrajectoryLayout {
    /// Derives the layout for `csv_path`.
    ///
    /// # Errors
    /// [`TrajlabelError::InvalidTrajectoryName`] if the file name does not end
    /// with [`TRAJECTORY_SUFFIX`] or has nothing in front of it.
    pub fn from_csv_path(csv_path: &Path) -> Result<Self, TrajlabelError> {
        let basename = csv_path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(TRAJECTORY_SUFFIX))
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| TrajlabelError::InvalidTrajectoryName {
                path: csv_path.to_path_buf(),
            })?
            .to_string();

        let root = csv_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("..");

        Ok(Self {
            csv_path: csv_path.to_path_buf(),
            labelme_dir: root.join(LABELME_DIR).join(&basename),
            frame_dir: root.join(FRAME_DIR).join(&basename),
            basename,
        })
    }

    /// Path of the backing trajectory CSV.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Tracked-subject identifier (file name without the suffix).
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Directory holding generated label records.
    pub fn labelme_dir(&self) -> &Path {
        &self.labelme_dir
    }

    /// Directory holding extracted frame images.
    pub fn frame_dir(&self) -> &Path {
        &self.frame_dir
    }

    /// Output path of the label record for `frame`.
    pub fn label_path(&self, frame: usize) -> PathBuf {
        self.labelme_dir.join(format!("{frame}.json"))
    }

    /// Image reference stored inside a label record, relative to the record.
    pub fn image_ref(&self, image_name: &str) -> String {
        format!("../../{FRAME_DIR}/{}/{image_name}", self.basename)
    }
}
