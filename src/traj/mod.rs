//! Trajectory model for trajlabel.
//!
//! A trajectory is a per-frame record of one tracked ball: where its
//! bounding box is, or that it is absent. It lives in three forms:
//!
//! 1. **CSV rows** (`Frame,Visibility,X,Y,W,H`), the on-disk source of truth
//!    read and written by [`io_csv`].
//! 2. **[`DataRow`]s**, the in-memory form owned by a [`TrajectoryStore`].
//! 3. **[`Shape`] lists**, derived per frame for label records.
//!
//! The conversions are lossy in known ways: CSV values are integers, rows
//! with a zero coordinate collapse to the empty row, and point rows carry no
//! box so they produce no shapes.
//!
//! # Example
//!
//! ```
//! use trajlabel::traj::DataRow;
//!
//! let row = DataRow::from_shape("rectangle", 0, &[[95.0, 45.0], [105.0, 55.0]])?;
//! assert_eq!((row.center_x, row.center_y), (100.0, 50.0));
//!
//! let shapes: Vec<_> = row.shapes().collect();
//! assert_eq!(shapes[0].points, vec![[95.0, 45.0], [105.0, 55.0]]);
//! # Ok::<(), trajlabel::TrajlabelError>(())
//! ```

mod data_row;
pub mod frames;
mod geometry;
pub mod io_csv;
mod layout;
mod shape;
mod store;

pub use data_row::{CsvPoint, DataRow, ShapeKind, DEFAULT_BOX_SIZE};
pub use frames::{image_path_to_frame, ImageSize};
pub use geometry::{BBoxXYXY, Coord};
pub use layout::{TrajectoryLayout, TRAJECTORY_SUFFIX};
pub use shape::{Shape, BALL_LABEL};
pub use store::TrajectoryStore;
