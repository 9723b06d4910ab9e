//! Fuzz target for trajectory CSV parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the trajectory CSV parser,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trajlabel::traj::io_csv::from_trajectory_csv_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(rows) = from_trajectory_csv_slice(data) {
        for row in &rows {
            let _ = row.shapes().count();
        }
    }
});
