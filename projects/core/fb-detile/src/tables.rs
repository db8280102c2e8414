//! Constant tables describing the tiled memory layout.
//!
//! The forward tables are written the way the hardware documents them: for each
//! destination position, which stored element ends up there. The decoders don't
//! search these tables at runtime; [`crate::mtile::MtileLayout`] builds their
//! inverses at compile time.

use crate::geometry::{
    COLUMN_VARIANTS, MTILE_SLOT_COLS, MTILE_SLOT_ROWS, UTILE_HEIGHT, UTILE_WIDTH,
};

/// Index of the source word within a stored micro-tile, for each row-major
/// destination pixel `[row][col]`.
///
/// Micro-tiles are stored as 2x4 pixel quads: each pair of pixel rows holds the
/// left quad followed by the right quad.
pub const UTILE_SOURCE_INDEX: [[u8; UTILE_WIDTH]; UTILE_HEIGHT] = [
    [0, 1, 2, 3, 8, 9, 10, 11],
    [4, 5, 6, 7, 12, 13, 14, 15],
    [16, 17, 18, 19, 24, 25, 26, 27],
    [20, 21, 22, 23, 28, 29, 30, 31],
    [32, 33, 34, 35, 40, 41, 42, 43],
    [36, 37, 38, 39, 44, 45, 46, 47],
    [48, 49, 50, 51, 56, 57, 58, 59],
    [52, 53, 54, 55, 60, 61, 62, 63],
];

/// Stream index of the micro-tile occupying each physical slot `[slot_row][slot_col]`
/// of a macro-tile on an even grid row.
pub const EVEN_PLACEMENT: [[u8; MTILE_SLOT_COLS]; MTILE_SLOT_ROWS] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    [17, 16, 19, 18],
    [21, 20, 23, 22],
    [25, 24, 27, 26],
    [29, 28, 31, 30],
];

/// Physical slot row found at each final micro-tile row `[column_variant][final_row]`
/// of a macro-tile on an even grid row.
pub const EVEN_ROW_ORDER: [[u8; MTILE_SLOT_ROWS]; COLUMN_VARIANTS] = [
    [0, 4, 2, 6, 1, 5, 3, 7],
    [1, 5, 3, 7, 0, 4, 2, 6],
    [2, 6, 0, 4, 3, 7, 1, 5],
    [3, 7, 1, 5, 2, 6, 0, 4],
];

/// [`EVEN_PLACEMENT`] with the slot column pairs swapped, used on odd grid rows.
pub const ODD_PLACEMENT: [[u8; MTILE_SLOT_COLS]; MTILE_SLOT_ROWS] = [
    [2, 3, 0, 1],
    [6, 7, 4, 5],
    [10, 11, 8, 9],
    [14, 15, 12, 13],
    [19, 18, 17, 16],
    [23, 22, 21, 20],
    [27, 26, 25, 24],
    [31, 30, 29, 28],
];

/// [`EVEN_ROW_ORDER`] with the column variant pairs swapped, used on odd grid rows.
pub const ODD_ROW_ORDER: [[u8; MTILE_SLOT_ROWS]; COLUMN_VARIANTS] = [
    [1, 5, 3, 7, 0, 4, 2, 6],
    [0, 4, 2, 6, 1, 5, 3, 7],
    [3, 7, 1, 5, 2, 6, 0, 4],
    [2, 6, 0, 4, 3, 7, 1, 5],
];
