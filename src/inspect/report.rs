//! Inspect report types and terminal formatting.

use std::fmt;

use serde::Serialize;

/// The result of inspecting a trajectory.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Row and image counts.
    pub summary: SummarySection,
    /// Where detections start, stop and drop out.
    pub coverage: CoverageSection,
    /// Box size statistics over rows that produce a shape.
    pub boxes: BoxStats,
}

/// Row and image counts for a trajectory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    /// Tracked-subject identifier.
    pub basename: String,
    /// Total number of rows.
    pub frames: usize,
    /// Rows with nonzero visibility.
    pub visible: usize,
    /// Rows with zero visibility.
    pub empty: usize,
    /// Visible rows with a non-degenerate box.
    pub boxed: usize,
    /// Visible rows with zero width or height.
    pub points_only: usize,
    /// Files in the frame-image directory.
    pub images: usize,
}

impl SummarySection {
    /// Returns true if there is not exactly one frame image per row.
    pub fn image_mismatch(&self) -> bool {
        self.images != self.frames
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CoverageSection {
    pub first_visible: Option<usize>,
    pub last_visible: Option<usize>,
    /// Longest run of consecutive empty frames.
    pub longest_gap: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct BoxStats {
    pub total: usize,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        let c = &self.coverage;
        let b = &self.boxes;

        writeln!(f, "Trajectory: {}", s.basename)?;
        writeln!(f)?;
        writeln!(f, "  Frames:        {:>8}", s.frames)?;
        writeln!(
            f,
            "  Visible:       {:>8}  ({})",
            s.visible,
            fmt_percent(s.visible, s.frames)
        )?;
        writeln!(f, "  Empty:         {:>8}", s.empty)?;
        writeln!(f, "  Boxes:         {:>8}", s.boxed)?;
        writeln!(f, "  Points only:   {:>8}", s.points_only)?;
        writeln!(f, "  Frame images:  {:>8}", s.images)?;
        if s.image_mismatch() {
            writeln!(
                f,
                "  ⚠ {} frame image(s) for {} row(s); frame indices will not line up",
                s.images, s.frames
            )?;
        }
        writeln!(f)?;

        match (c.first_visible, c.last_visible) {
            (Some(first), Some(last)) => {
                writeln!(f, "  Visible span:  frames {first}..={last}")?;
            }
            _ => writeln!(f, "  Visible span:  none")?,
        }
        writeln!(f, "  Longest gap:   {:>8} frame(s)", c.longest_gap)?;
        writeln!(f)?;

        if let (Some(min_w), Some(max_w), Some(min_h), Some(max_h)) =
            (b.min_width, b.max_width, b.min_height, b.max_height)
        {
            writeln!(f, "  Width  (px):   min {:>8.1}    max {:>8.1}", min_w, max_w)?;
            writeln!(f, "  Height (px):   min {:>8.1}    max {:>8.1}", min_h, max_h)?;
        } else {
            writeln!(f, "  No bounding boxes to measure.")?;
        }

        Ok(())
    }
}

fn fmt_percent(part: usize, total: usize) -> String {
    if total == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", (part as f64 / total as f64) * 100.0)
    }
}
