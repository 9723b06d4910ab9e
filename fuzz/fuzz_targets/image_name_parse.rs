//! Fuzz target for frame image name resolution.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use trajlabel::traj::image_path_to_frame;

fuzz_target!(|data: &str| {
    let _ = image_path_to_frame(Path::new(data));
});
