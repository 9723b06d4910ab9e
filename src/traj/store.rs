//! The CSV-backed per-frame trajectory store.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::data_row::DataRow;
use super::frames::{self, ImageSize};
use super::io_csv;
use super::layout::TrajectoryLayout;
use crate::error::TrajlabelError;
use crate::labelfile::{LabelFileWriter, LabelRecord};

/// One tracked subject's trajectory, one [`DataRow`] per frame.
///
/// `points()[i].frame == i` holds for every row; the loader rejects files
/// where that cannot be arranged. Frame `i` also maps to the `i`-th entry of
/// the naturally sorted frame-image listing.
#[derive(Debug)]
pub struct TrajectoryStore {
    layout: TrajectoryLayout,
    points: Vec<DataRow>,
    images: Vec<String>,
    /// Frames of one video share a size; read from the first image used.
    image_size: OnceCell<ImageSize>,
}

impl TrajectoryStore {
    /// Opens and loads a `<basename>_ball.csv` trajectory.
    ///
    /// # Errors
    /// [`TrajlabelError::InvalidTrajectoryName`] for a wrong suffix, or any
    /// error from [`TrajectoryStore::load`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TrajlabelError> {
        let layout = TrajectoryLayout::from_csv_path(path.as_ref())?;
        let mut store = Self {
            layout,
            points: Vec::new(),
            images: Vec::new(),
            image_size: OnceCell::new(),
        };
        store.load(path)?;
        Ok(store)
    }

    /// Replaces the in-memory rows with the contents of `path` and rescans
    /// the frame images.
    ///
    /// Rows are cleared before parsing; on error the store is left empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), TrajlabelError> {
        let path = path.as_ref();
        self.points.clear();
        self.layout = TrajectoryLayout::from_csv_path(path)?;

        self.points = io_csv::read_trajectory_csv(path)?;
        debug!(path = %path.display(), rows = self.points.len(), "loaded trajectory");

        self.refresh_images()
    }

    /// Rescans the frame-image directory and forgets the cached image size.
    pub fn refresh_images(&mut self) -> Result<(), TrajlabelError> {
        self.images = frames::list_frame_images(self.layout.frame_dir())?;
        self.image_size = OnceCell::new();
        debug!(
            dir = %self.layout.frame_dir().display(),
            images = self.images.len(),
            "scanned frame images"
        );
        Ok(())
    }

    /// Writes the rows back to the trajectory CSV.
    ///
    /// With `point_only`, `W` and `H` are written as 0 for every row.
    pub fn save(&self, point_only: bool) -> Result<(), TrajlabelError> {
        io_csv::write_trajectory_csv(self.layout.csv_path(), &self.points, point_only)?;
        debug!(
            path = %self.layout.csv_path().display(),
            rows = self.points.len(),
            point_only,
            "saved trajectory"
        );
        Ok(())
    }

    /// Replaces the row at `row.frame`.
    ///
    /// # Errors
    /// [`TrajlabelError::FrameOutOfRange`] if the frame is past the end; the
    /// sequence is never extended.
    pub fn change_point(&mut self, row: DataRow) -> Result<(), TrajlabelError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(row.frame)
            .ok_or(TrajlabelError::FrameOutOfRange {
                frame: row.frame,
                len,
            })?;
        *slot = row;
        Ok(())
    }

    /// Writes the label record for `row` through `writer` and returns its
    /// path, `<labelme dir>/<frame>.json`.
    pub fn generate_label_file<W>(
        &self,
        row: &DataRow,
        writer: &mut W,
    ) -> Result<PathBuf, TrajlabelError>
    where
        W: LabelFileWriter + ?Sized,
    {
        let image_name =
            self.images
                .get(row.frame)
                .ok_or(TrajlabelError::ImageNotFound {
                    frame: row.frame,
                    available: self.images.len(),
                })?;
        let size = self.image_size_for(image_name)?;

        fs::create_dir_all(self.layout.labelme_dir()).map_err(TrajlabelError::Io)?;

        let record = LabelRecord {
            version: writer.version().to_string(),
            flags: BTreeMap::new(),
            shapes: row.shapes().collect(),
            image_path: self.layout.image_ref(image_name),
            image_data: None,
            image_height: size.height,
            image_width: size.width,
            other_data: serde_json::Map::new(),
        };

        let path = self.layout.label_path(row.frame);
        writer.write(&path, &record)?;
        Ok(path)
    }

    /// Writes the label record for the frame named by an image file such as
    /// `frame/rally1/12.jpg`.
    pub fn generate_label_file_by_image_path<W>(
        &self,
        image_path: impl AsRef<Path>,
        writer: &mut W,
    ) -> Result<PathBuf, TrajlabelError>
    where
        W: LabelFileWriter + ?Sized,
    {
        let frame = frames::image_path_to_frame(image_path.as_ref())?;
        let row = self.get(frame).ok_or(TrajlabelError::FrameOutOfRange {
            frame,
            len: self.points.len(),
        })?;
        self.generate_label_file(row, writer)
    }

    /// Writes a label record for every row, in frame order. Returns the
    /// number of records written.
    pub fn generate_label_files<W>(&self, writer: &mut W) -> Result<usize, TrajlabelError>
    where
        W: LabelFileWriter + ?Sized,
    {
        for row in &self.points {
            self.generate_label_file(row, writer)?;
        }
        Ok(self.points.len())
    }

    /// Size of the frame images, reading it from `image_name` on first use.
    fn image_size_for(&self, image_name: &str) -> Result<ImageSize, TrajlabelError> {
        if let Some(size) = self.image_size.get() {
            return Ok(*size);
        }
        let size = frames::read_image_size(&self.layout.frame_dir().join(image_name))?;
        Ok(*self.image_size.get_or_init(|| size))
    }

    /// The cached frame size, if a label record has been generated since the
    /// last scan.
    pub fn image_size(&self) -> Option<ImageSize> {
        self.image_size.get().copied()
    }

    pub fn points(&self) -> &[DataRow] {
        &self.points
    }

    pub fn get(&self, frame: usize) -> Option<&DataRow> {
        self.points.get(frame)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Naturally sorted frame-image file names.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn layout(&self) -> &TrajectoryLayout {
        &self.layout
    }
}
