#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// A trajectory laid out the way the annotation tool expects:
/// `<root>/csv/<name>_ball.csv` with frames in `<root>/frame/<name>/`.
pub struct TrajectoryFixture {
    pub root: tempfile::TempDir,
    pub csv_path: PathBuf,
}

impl TrajectoryFixture {
    pub fn frame_dir(&self) -> PathBuf {
        self.root.path().join("frame").join("rally1")
    }

    pub fn labelme_dir(&self) -> PathBuf {
        self.root.path().join("labelme").join("rally1")
    }
}

/// Writes `csv` as `rally1_ball.csv` and `frame_count` BMP frames named
/// `0.bmp`, `1.bmp`, ... of the given size.
pub fn trajectory_fixture(csv: &str, frame_count: usize, width: u32, height: u32) -> TrajectoryFixture {
    let root = tempfile::tempdir().expect("create temp dir");
    let csv_dir = root.path().join("csv");
    fs::create_dir_all(&csv_dir).expect("create csv dir");
    let csv_path = csv_dir.join("rally1_ball.csv");
    fs::write(&csv_path, csv).expect("write trajectory csv");

    let frame_dir = root.path().join("frame").join("rally1");
    for frame in 0..frame_count {
        write_bmp(&frame_dir.join(format!("{frame}.bmp")), width, height);
    }

    TrajectoryFixture { root, csv_path }
}
