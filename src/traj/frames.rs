//! Extracted frame images: listing, ordering and dimensions.

use std::cmp::Ordering;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use crate::error::TrajlabelError;

/// Pixel dimensions shared by every frame of a video.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Lists the file names directly inside `frame_dir`, naturally sorted.
///
/// A missing directory is not an error: trajectories can be edited before
/// frames are extracted, so an empty listing is returned instead.
pub fn list_frame_images(frame_dir: &Path) -> Result<Vec<String>, TrajlabelError> {
    if !frame_dir.is_dir() {
        warn!(dir = %frame_dir.display(), "frame directory not found; no images listed");
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(frame_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.map_err(|source| {
            TrajlabelError::Io(
                source
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory traversal loop")),
            )
        })?;

        if entry.file_type().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    Ok(names)
}

/// Compares two file names the way a file browser does: digit runs by
/// numeric value, everything else case-insensitively.
///
/// `"2.jpg" < "10.jpg"`, `"Frame9" < "frame10"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => break,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(x, y),
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => cmp_text(x, y),
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    // "007" vs "7", "A" vs "a": keep the order total and deterministic.
    a.cmp(b)
}

fn cmp_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

fn cmp_text(x: &str, y: &str) -> Ordering {
    x.chars()
        .flat_map(char::to_lowercase)
        .cmp(y.chars().flat_map(char::to_lowercase))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if is_digit {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

/// Reads the pixel dimensions of an image without decoding it.
pub fn read_image_size(path: &Path) -> Result<ImageSize, TrajlabelError> {
    let size = imagesize::size(path).map_err(|source| TrajlabelError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let to_u32 = |value: usize, axis: &str| {
        u32::try_from(value).map_err(|_| {
            TrajlabelError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{}: image {axis} {value} does not fit in u32", path.display()),
            ))
        })
    };

    Ok(ImageSize {
        width: to_u32(size.width, "width")?,
        height: to_u32(size.height, "height")?,
    })
}

/// Resolves a frame image path such as `frames/12.jpg` to frame index 12.
///
/// # Errors
/// [`TrajlabelError::InvalidImageName`] unless the file name is exactly
/// `<integer>.<extension>`.
pub fn image_path_to_frame(image_path: &Path) -> Result<usize, TrajlabelError> {
    let invalid = |message: String| TrajlabelError::InvalidImageName {
        path: image_path.to_path_buf(),
        message,
    };

    let name = image_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| invalid("missing file name".to_string()))?;

    let parts: Vec<&str> = name.split('.').collect();
    let [stem, _extension] = parts.as_slice() else {
        return Err(invalid(format!(
            "expected '<frame>.<ext>', found {} '.'-separated part(s)",
            parts.len()
        )));
    };

    stem.parse::<usize>()
        .map_err(|_| invalid(format!("'{stem}' is not a frame number")))
}
