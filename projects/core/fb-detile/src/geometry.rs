//! Frame dimensions and tiling constants.
//!
//! The tiled layout only exists for frames whose width is a multiple of
//! [`MTILE_WIDTH`] and whose height is a multiple of [`MTILE_HEIGHT`].
//! [`FrameGeometry`] holds a validated pair of such dimensions; every other
//! quantity used while detiling is derived from it.

use crate::error::DetileError;

/// Size of a single pixel word in bytes.
pub const PIXEL_BYTES: usize = 4;

/// Width of a micro-tile in pixels.
pub const UTILE_WIDTH: usize = 8;
/// Height of a micro-tile in pixels.
pub const UTILE_HEIGHT: usize = 8;
/// Number of pixel words in a micro-tile.
pub const UTILE_WORDS: usize = UTILE_WIDTH * UTILE_HEIGHT;

/// Width of a macro-tile in pixels.
pub const MTILE_WIDTH: usize = 32;
/// Height of a macro-tile in pixels.
pub const MTILE_HEIGHT: usize = 64;
/// Micro-tile columns in a macro-tile.
pub const MTILE_SLOT_COLS: usize = MTILE_WIDTH / UTILE_WIDTH;
/// Micro-tile rows in a macro-tile.
pub const MTILE_SLOT_ROWS: usize = MTILE_HEIGHT / UTILE_HEIGHT;
/// Number of micro-tiles stored in a macro-tile.
pub const UTILES_PER_MTILE: usize = MTILE_SLOT_COLS * MTILE_SLOT_ROWS;
/// Number of pixel words in a macro-tile.
pub const MTILE_WORDS: usize = UTILES_PER_MTILE * UTILE_WORDS;

/// Number of column variants a macro-tile can have (grid column modulo 4).
pub const COLUMN_VARIANTS: usize = 4;

/// Validated dimensions of a tiled frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameGeometry {
    width: usize,
    height: usize,
}

impl FrameGeometry {
    /// The 1280x768 resolution produced by the display controller.
    pub const DEFAULT: Self = Self {
        width: 1280,
        height: 768,
    };

    /// Creates a new geometry.
    ///
    /// # Errors
    ///
    /// [`DetileError::InvalidGeometry`] if either dimension is zero, the width is not a
    /// multiple of [`MTILE_WIDTH`], the height is not a multiple of [`MTILE_HEIGHT`],
    /// or the frame size in bytes does not fit in a `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, DetileError> {
        let aligned = width != 0
            && height != 0
            && width.is_multiple_of(MTILE_WIDTH)
            && height.is_multiple_of(MTILE_HEIGHT);

        let fits = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(PIXEL_BYTES))
            .is_some();

        if !aligned || !fits {
            return Err(DetileError::InvalidGeometry { width, height });
        }

        Ok(Self { width, height })
    }

    /// Frame width in pixels. This is also the row stride of the output.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (words) in the frame.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Size of the frame in bytes, for both the tiled and the linear layout.
    #[inline]
    pub const fn frame_bytes(&self) -> usize {
        self.pixel_count() * PIXEL_BYTES
    }

    /// Number of macro-tile rows in the grid.
    #[inline]
    pub const fn mtile_rows(&self) -> usize {
        self.height / MTILE_HEIGHT
    }

    /// Number of macro-tile columns in the grid.
    #[inline]
    pub const fn mtile_cols(&self) -> usize {
        self.width / MTILE_WIDTH
    }

    /// Total number of macro-tiles in the frame.
    #[inline]
    pub const fn mtile_count(&self) -> usize {
        self.mtile_rows() * self.mtile_cols()
    }

    /// Words covered by one row of macro-tiles.
    ///
    /// This is the same in the tiled source (`mtile_cols` consecutive macro-tiles)
    /// and in the linear output (`MTILE_HEIGHT` consecutive pixel rows).
    #[inline]
    pub const fn band_words(&self) -> usize {
        self.width * MTILE_HEIGHT
    }
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parity of a macro-tile's grid row, selecting the placement table variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    /// Even grid row.
    Even,
    /// Odd grid row.
    Odd,
}

impl Parity {
    /// Parity of the given macro-tile grid row.
    #[inline]
    pub const fn of_row(row: usize) -> Self {
        if row % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// Position of a macro-tile in the frame's macro-tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MtileCoord {
    /// Grid row, counted in units of [`MTILE_HEIGHT`] pixels.
    pub row: usize,
    /// Grid column, counted in units of [`MTILE_WIDTH`] pixels.
    pub col: usize,
}

impl MtileCoord {
    /// Creates a new grid coordinate.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row parity of this macro-tile.
    #[inline]
    pub const fn parity(&self) -> Parity {
        Parity::of_row(self.row)
    }

    /// Column variant of this macro-tile, in `0..COLUMN_VARIANTS`.
    #[inline]
    pub const fn column_variant(&self) -> usize {
        self.col % COLUMN_VARIANTS
    }

    /// Offset of the macro-tile's top-left pixel in a row-major frame of the given width.
    #[inline]
    pub const fn pixel_offset(&self, width: usize) -> usize {
        self.row * MTILE_HEIGHT * width + self.col * MTILE_WIDTH
    }
}
