use crate::allocate::AllocateError;
use crate::geometry::Parity;
use thiserror::Error;

/// Errors that can occur while detiling a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetileError {
    /// The frame dimensions cannot be expressed as a whole number of macro-tiles.
    #[error("Invalid frame geometry {width}x{height} (width must be a non-zero multiple of 32, height a non-zero multiple of 64)")]
    InvalidGeometry {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The input byte buffer does not hold exactly one frame.
    #[error("Input size mismatch: expected {expected} bytes, got {actual}")]
    InputSizeMismatch {
        /// Size of one frame in bytes.
        expected: usize,
        /// Size of the provided input in bytes.
        actual: usize,
    },

    /// The input word buffer does not hold exactly one frame.
    #[error("Input pixel count mismatch: expected {expected} words, got {actual}")]
    PixelCountMismatch {
        /// Number of pixels in one frame.
        expected: usize,
        /// Number of words in the provided input.
        actual: usize,
    },

    /// Output buffer is too small to hold the detiled data.
    #[error("Output buffer too small: needed {needed}, got {actual}")]
    OutputBufferTooSmall {
        /// The required buffer size.
        needed: usize,
        /// The actual buffer size provided.
        actual: usize,
    },

    /// A micro-tile's stream index does not appear in the placement table.
    #[error("Micro-tile {stream_index} has no slot in the {parity:?} row placement table")]
    PlacementMiss {
        /// Position of the micro-tile within its macro-tile.
        stream_index: usize,
        /// Parity of the layout that was searched.
        parity: Parity,
    },

    /// A slot row does not appear in the row order table for the macro-tile's column variant.
    #[error("Slot row {slot_row} has no final row in the {parity:?} row order table for column variant {column_variant}")]
    RowOrderMiss {
        /// Physical slot row produced by the placement lookup.
        slot_row: usize,
        /// Grid column of the macro-tile modulo 4.
        column_variant: usize,
        /// Parity of the layout that was searched.
        parity: Parity,
    },

    /// The output frame could not be allocated.
    #[error(transparent)]
    Allocate(#[from] AllocateError),
}
