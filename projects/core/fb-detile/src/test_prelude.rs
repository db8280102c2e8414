//! Common test imports and utilities for detile tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Standard library imports commonly used in tests
pub use std::vec;
pub use std::vec::Vec;

// Core functionality from this crate
pub use crate::error::DetileError;
pub use crate::geometry::*;
pub use crate::mtile::UtileSlot;
use crate::tables::*;

/// Builds a tiled frame where source word `k` holds the value `k`.
///
/// After detiling, each output pixel holds the source address it was read from.
pub(crate) fn traced_frame(geometry: FrameGeometry) -> Vec<u32> {
    (0..geometry.pixel_count() as u32).collect()
}

/// Serializes words in native byte order, the way a frame dump stores them.
pub(crate) fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|x| x.to_ne_bytes()).collect()
}

/// Final slot of a micro-tile, found by searching the forward tables directly.
///
/// Independent of the inverse tables used by the decoder.
pub(crate) fn reference_locate(
    stream_index: usize,
    parity: Parity,
    column_variant: usize,
) -> UtileSlot {
    let (placement, row_order) = match parity {
        Parity::Even => (&EVEN_PLACEMENT, &EVEN_ROW_ORDER),
        Parity::Odd => (&ODD_PLACEMENT, &ODD_ROW_ORDER),
    };

    let (slot_row, slot_col) = (0..MTILE_SLOT_ROWS)
        .flat_map(|row| (0..MTILE_SLOT_COLS).map(move |col| (row, col)))
        .find(|&(row, col)| placement[row][col] as usize == stream_index)
        .unwrap();

    let final_row = row_order[column_variant]
        .iter()
        .position(|&x| x as usize == slot_row)
        .unwrap();

    UtileSlot {
        row: final_row as u8,
        col: slot_col as u8,
    }
}

/// Straightforward detiler used as the expected result in tests.
///
/// Walks every source word and computes its destination address directly.
pub(crate) fn reference_detile(input: &[u32], geometry: FrameGeometry) -> Vec<u32> {
    let width = geometry.width();
    let mut output = vec![0u32; geometry.pixel_count()];

    for (source_index, &value) in input.iter().enumerate() {
        let mtile_index = source_index / MTILE_WORDS;
        let stream_index = source_index % MTILE_WORDS / UTILE_WORDS;
        let word_index = source_index % UTILE_WORDS;

        let coord = MtileCoord::new(
            mtile_index / geometry.mtile_cols(),
            mtile_index % geometry.mtile_cols(),
        );
        let slot = reference_locate(stream_index, coord.parity(), coord.column_variant());

        let (pixel_row, pixel_col) = (0..UTILE_HEIGHT)
            .flat_map(|row| (0..UTILE_WIDTH).map(move |col| (row, col)))
            .find(|&(row, col)| UTILE_SOURCE_INDEX[row][col] as usize == word_index)
            .unwrap();

        let y = coord.row * MTILE_HEIGHT + slot.row as usize * UTILE_HEIGHT + pixel_row;
        let x = coord.col * MTILE_WIDTH + slot.col as usize * UTILE_WIDTH + pixel_col;
        output[y * width + x] = value;
    }

    output
}

/// Asserts two row-major frames are equal, reporting the first differing pixel.
pub(crate) fn assert_frames_match(expected: &[u32], actual: &[u32], geometry: FrameGeometry) {
    assert_eq!(expected.len(), actual.len(), "frame sizes differ");
    if let Some(index) = expected.iter().zip(actual).position(|(a, b)| a != b) {
        panic!(
            "frames differ at pixel ({}, {}): expected {}, got {}",
            index % geometry.width(),
            index / geometry.width(),
            expected[index],
            actual[index]
        );
    }
}

#[test]
fn validate_traced_frame_generator() {
    let geometry = FrameGeometry::new(32, 64).unwrap();
    let frame = traced_frame(geometry);
    assert_eq!(frame.len(), 2048);
    assert_eq!(frame[..4], [0, 1, 2, 3]);
    assert_eq!(frame[2047], 2047);
}

#[test]
fn validate_reference_detile_on_first_utile() {
    let geometry = FrameGeometry::new(32, 64).unwrap();
    let output = reference_detile(&traced_frame(geometry), geometry);
    assert_eq!(output[..8], [0, 1, 2, 3, 8, 9, 10, 11]);
    assert_eq!(output[32..40], [4, 5, 6, 7, 12, 13, 14, 15]);
}
