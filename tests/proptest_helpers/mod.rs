#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use trajlabel::traj::DataRow;

/// Tolerance for float comparisons on pixel coordinates.
pub const EPS_PX: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Pixel coordinate on a 4K frame, with a fractional part.
pub fn arb_coord() -> impl Strategy<Value = f64> {
    (0u32..4096, 0u32..100).prop_map(|(whole, frac)| whole as f64 + frac as f64 / 100.0)
}

pub fn arb_corner() -> impl Strategy<Value = [f64; 2]> {
    (arb_coord(), arb_coord()).prop_map(|(x, y)| [x, y])
}

/// A row for `frame`: visible box, visible point, or empty.
pub fn arb_row(frame: usize) -> BoxedStrategy<DataRow> {
    prop_oneof![
        (arb_corner(), arb_corner()).prop_map(move |(a, b)| {
            DataRow::from_shape("rectangle", frame, &[a, b]).expect("rectangle row")
        }),
        arb_corner().prop_map(move |p| DataRow::from_shape("point", frame, &[p]).expect("point row")),
        Just(DataRow::empty(frame)),
    ]
    .boxed()
}

/// A contiguous trajectory of up to `max_frames` rows.
pub fn arb_trajectory(max_frames: usize) -> BoxedStrategy<Vec<DataRow>> {
    (0..=max_frames)
        .prop_flat_map(|len| (0..len).map(arb_row).collect::<Vec<_>>())
        .boxed()
}

/// What a row looks like after a trip through the integer CSV grid and the
/// loader's normalization.
pub fn expected_after_csv(row: &DataRow) -> DataRow {
    let p = row.point();
    if p.x == 0 || p.y == 0 || p.visibility == 0 {
        DataRow::empty(row.frame)
    } else {
        DataRow {
            center_x: p.x as f64,
            center_y: p.y as f64,
            visibility: p.visibility as i32,
            frame: row.frame,
            width: p.w as f64,
            height: p.h as f64,
        }
    }
}
