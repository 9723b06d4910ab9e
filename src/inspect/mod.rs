//! Trajectory inspection and statistics.
//!
//! This module summarizes a loaded trajectory: how many frames have a
//! detection, how many are boxes versus bare points, the longest run of
//! missed frames, and whether the frame-image listing lines up with the rows.

mod report;

pub use report::{BoxStats, CoverageSection, InspectReport, SummarySection};

use crate::traj::{DataRow, TrajectoryStore};

/// Inspect a trajectory store and produce a report.
pub fn inspect_store(store: &TrajectoryStore) -> InspectReport {
    let mut report = inspect_rows(store.points());
    report.summary.basename = store.layout().basename().to_string();
    report.summary.images = store.images().len();
    report
}

/// Inspect a bare row sequence. Image counts are left at zero.
pub fn inspect_rows(rows: &[DataRow]) -> InspectReport {
    InspectReport {
        summary: compute_summary(rows),
        coverage: compute_coverage(rows),
        boxes: compute_box_stats(rows),
    }
}

fn compute_summary(rows: &[DataRow]) -> SummarySection {
    let visible = rows.iter().filter(|row| !row.is_empty()).count();
    let boxed = rows.iter().filter(|row| row.shapes().next().is_some()).count();

    SummarySection {
        basename: String::new(),
        frames: rows.len(),
        visible,
        empty: rows.len() - visible,
        boxed,
        points_only: visible - boxed,
        images: 0,
    }
}

fn compute_coverage(rows: &[DataRow]) -> CoverageSection {
    let first_visible = rows.iter().find(|row| !row.is_empty()).map(|row| row.frame);
    let last_visible = rows.iter().rev().find(|row| !row.is_empty()).map(|row| row.frame);

    // Longest run of consecutive empty frames
    let mut longest_gap = 0;
    let mut current = 0;
    for row in rows {
        if row.is_empty() {
            current += 1;
            longest_gap = longest_gap.max(current);
        } else {
            current = 0;
        }
    }

    CoverageSection {
        first_visible,
        last_visible,
        longest_gap,
    }
}

fn compute_box_stats(rows: &[DataRow]) -> BoxStats {
    let mut stats = BoxStats::default();

    for row in rows.iter().filter(|row| row.shapes().next().is_some()) {
        stats.total += 1;
        stats.min_width = Some(stats.min_width.map_or(row.width, |m| m.min(row.width)));
        stats.max_width = Some(stats.max_width.map_or(row.width, |m| m.max(row.width)));
        stats.min_height = Some(stats.min_height.map_or(row.height, |m| m.min(row.height)));
        stats.max_height = Some(stats.max_height.map_or(row.height, |m| m.max(row.height)));
    }

    stats
}
