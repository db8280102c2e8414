#![no_main]

// This fuzz test validates that byte buffers of any size are either rejected up front
// or detiled completely, and never cause a panic.

use fb_detile::{detile_frame_bytes, DetileError, FrameGeometry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let geometry = FrameGeometry::new(32, 64).unwrap();
    let mut output = vec![0u8; geometry.frame_bytes()];

    match detile_frame_bytes(data, &mut output, geometry) {
        Ok(()) => assert_eq!(data.len(), geometry.frame_bytes()),
        Err(DetileError::InputSizeMismatch { expected, actual }) => {
            assert_eq!(expected, geometry.frame_bytes());
            assert_eq!(actual, data.len());
            assert!(output.iter().all(|&x| x == 0), "rejected input was partially decoded");
        }
        Err(e) => panic!("Unexpected error for {} byte input: {e}", data.len()),
    }
});
