//! Trajectory CSV reader and writer.
//!
//! # Format
//!
//! One row per video frame:
//! - `Frame`: zero-based frame index
//! - `Visibility`: 0 when the ball is not detected, nonzero otherwise
//! - `X`, `Y`: box center in pixels
//! - `W`, `H` (optional): box size in pixels, 20 when the column is absent
//!   or the field is blank
//!
//! # Normalization
//!
//! A row with a zero `X`, zero `Y` or zero `Visibility` is read as the
//! canonical empty row for its frame, dropping any `W`/`H` it carried.
//!
//! # Frame order
//!
//! Row `i` must describe frame `i`. Rows listed out of order are re-sorted
//! (with a warning); gaps and duplicate frames are rejected.
//!
//! # Writing
//!
//! The writer always emits `Frame,Visibility,X,Y,W,H` with integer-truncated
//! values. Point-only output zeroes `W` and `H`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::data_row::{DataRow, DEFAULT_BOX_SIZE};
use crate::error::TrajlabelError;

/// A single row as it appears in the trajectory CSV.
#[derive(Debug, Deserialize)]
struct TrajectoryCsvRow {
    #[serde(rename = "Frame")]
    frame: usize,
    #[serde(rename = "Visibility")]
    visibility: i32,
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
    #[serde(rename = "W", default)]
    w: Option<f64>,
    #[serde(rename = "H", default)]
    h: Option<f64>,
}

impl From<TrajectoryCsvRow> for DataRow {
    fn from(row: TrajectoryCsvRow) -> Self {
        DataRow {
            center_x: row.x,
            center_y: row.y,
            visibility: row.visibility,
            frame: row.frame,
            width: row.w.unwrap_or(DEFAULT_BOX_SIZE),
            height: row.h.unwrap_or(DEFAULT_BOX_SIZE),
        }
        .normalized()
    }
}

/// Reads and normalizes the rows of a trajectory CSV file.
///
/// # Errors
/// Returns an error if the file cannot be read, a row fails to parse (the
/// whole read aborts), or the frames are not exactly `0..n`.
pub fn read_trajectory_csv(path: &Path) -> Result<Vec<DataRow>, TrajlabelError> {
    let file = File::open(path).map_err(TrajlabelError::Io)?;
    parse_rows(BufReader::new(file), path)
}

/// Writes rows to a trajectory CSV file, replacing its contents.
///
/// The file is truncated before writing; a failure part way through leaves
/// a partial file behind.
pub fn write_trajectory_csv(
    path: &Path,
    rows: &[DataRow],
    point_only: bool,
) -> Result<(), TrajlabelError> {
    let file = File::create(path).map_err(TrajlabelError::Io)?;

    let writer = write_rows(BufWriter::new(file), rows, point_only, path)?;
    writer
        .into_inner()
        .map_err(|e| TrajlabelError::Io(e.into_error()))?
        .flush()
        .map_err(TrajlabelError::Io)?;

    Ok(())
}

/// Reads trajectory rows from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_trajectory_csv_str(csv_str: &str) -> Result<Vec<DataRow>, TrajlabelError> {
    from_trajectory_csv_slice(csv_str.as_bytes())
}

/// Reads trajectory rows from CSV bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_trajectory_csv_slice(bytes: &[u8]) -> Result<Vec<DataRow>, TrajlabelError> {
    parse_rows(bytes, Path::new("<bytes>"))
}

/// Writes trajectory rows to a CSV string.
///
/// Useful for testing without file I/O.
pub fn to_trajectory_csv_string(
    rows: &[DataRow],
    point_only: bool,
) -> Result<String, TrajlabelError> {
    let dummy_path = Path::new("<string>");
    let bytes = write_rows(Vec::new(), rows, point_only, dummy_path)?
        .into_inner()
        .map_err(|e| TrajlabelError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| TrajlabelError::CsvInvalid {
        path: dummy_path.to_path_buf(),
        message: format!("Invalid UTF-8 in output: {}", e),
    })
}

fn parse_rows<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<DataRow>, TrajlabelError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: TrajectoryCsvRow = result.map_err(|source| TrajlabelError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(DataRow::from(row));
    }

    ensure_contiguous_frames(&mut rows, path)?;
    Ok(rows)
}

fn write_rows<W: Write>(
    writer: W,
    rows: &[DataRow],
    point_only: bool,
    path: &Path,
) -> Result<csv::Writer<W>, TrajlabelError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Serializing the first row emits the header; an empty trajectory still
    // needs one.
    if rows.is_empty() {
        csv_writer
            .write_record(["Frame", "Visibility", "X", "Y", "W", "H"])
            .map_err(|source| TrajlabelError::CsvWrite {
                path: path.to_path_buf(),
                source,
            })?;
    }

    for row in rows {
        let mut point = row.point();
        if point_only {
            point.w = 0;
            point.h = 0;
        }
        csv_writer
            .serialize(point)
            .map_err(|source| TrajlabelError::CsvWrite {
                path: path.to_path_buf(),
                source,
            })?;
    }

    Ok(csv_writer)
}

/// Puts rows in frame order and checks that row `i` is frame `i`.
fn ensure_contiguous_frames(rows: &mut [DataRow], path: &Path) -> Result<(), TrajlabelError> {
    if !rows.windows(2).all(|pair| pair[0].frame <= pair[1].frame) {
        warn!(path = %path.display(), "trajectory rows out of frame order; sorting by frame");
        rows.sort_by_key(|row| row.frame);
    }

    for (index, row) in rows.iter().enumerate() {
        if row.frame != index {
            return Err(TrajlabelError::CsvInvalid {
                path: path.to_path_buf(),
                message: format!(
                    "row {} holds frame {}; frames must run 0..{} without gaps or duplicates",
                    index,
                    row.frame,
                    rows.len()
                ),
            });
        }
    }

    Ok(())
}
