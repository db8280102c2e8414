#![no_main]

// This fuzz test validates that detiling only moves pixels around: the output holds
// exactly the input's words, and the parallel path agrees with the sequential one.

use fb_detile::{detile_frame, detile_frame_parallel, FrameGeometry};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct FrameInput {
    /// Frame width in macro-tiles, minus one.
    pub mtile_cols: u8,
    /// Frame height in macro-tiles, minus one.
    pub mtile_rows: u8,
    /// Pixel words; repeated to fill the frame.
    pub words: Vec<u32>,
}

fuzz_target!(|input: FrameInput| {
    if input.words.is_empty() {
        return;
    }

    // Keep frames small enough for the fuzzer to iterate quickly.
    let width = (input.mtile_cols as usize % 8 + 1) * 32;
    let height = (input.mtile_rows as usize % 4 + 1) * 64;
    let geometry = FrameGeometry::new(width, height).unwrap();

    let tiled: Vec<u32> = input
        .words
        .iter()
        .copied()
        .cycle()
        .take(geometry.pixel_count())
        .collect();
    let mut linear = vec![0u32; tiled.len()];
    let mut linear_parallel = vec![0u32; tiled.len()];

    detile_frame(&tiled, &mut linear, geometry).unwrap();
    detile_frame_parallel(&tiled, &mut linear_parallel, geometry).unwrap();

    assert_eq!(
        linear, linear_parallel,
        "Parallel detile differs from sequential detile for {width}x{height} frame"
    );

    let mut expected = tiled.clone();
    let mut actual = linear;
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(
        expected, actual,
        "Detiled {width}x{height} frame is not a permutation of its input"
    );
});
