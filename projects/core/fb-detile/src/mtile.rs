//! # Macro-tile Decoding
//!
//! A macro-tile covers 64 rows x 32 columns of pixels and is stored as 32 consecutive
//! micro-tiles. The stream order of those micro-tiles does not match their spatial order;
//! placing micro-tile `i` takes two lookups:
//!
//! 1. The placement table of the macro-tile's row parity gives the physical slot
//!    (`slot_row` in `0..8`, `slot_col` in `0..4`) holding stream index `i`.
//! 2. The row order table of the same parity, indexed by the macro-tile's grid column
//!    modulo 4, gives the final micro-tile row at which `slot_row` appears.
//!
//! The micro-tile then lands at pixel `(final_row * 8, slot_col * 8)` inside the macro-tile.
//!
//! Both lookups are answered from inverse tables that [`MtileLayout::new`] computes at
//! compile time. Entries no table value maps to stay empty, and reaching one is reported
//! as a [`DetileError`] instead of placing the micro-tile at an arbitrary position.

use crate::error::DetileError;
use crate::geometry::{
    MtileCoord, Parity, COLUMN_VARIANTS, MTILE_HEIGHT, MTILE_SLOT_COLS, MTILE_SLOT_ROWS,
    MTILE_WIDTH, MTILE_WORDS, UTILES_PER_MTILE, UTILE_HEIGHT, UTILE_WIDTH, UTILE_WORDS,
};
use crate::tables::{EVEN_PLACEMENT, EVEN_ROW_ORDER, ODD_PLACEMENT, ODD_ROW_ORDER};
use crate::utile::decode_utile;

/// Position of a micro-tile within a macro-tile, in units of micro-tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtileSlot {
    /// Micro-tile row, in `0..8`.
    pub row: u8,
    /// Micro-tile column, in `0..4`.
    pub col: u8,
}

impl UtileSlot {
    /// Offset of the slot's top-left pixel relative to the macro-tile's top-left pixel,
    /// in a row-major frame with the given row stride.
    #[inline]
    pub const fn pixel_offset(&self, stride: usize) -> usize {
        self.row as usize * UTILE_HEIGHT * stride + self.col as usize * UTILE_WIDTH
    }
}

/// Micro-tile placement for macro-tiles of one row parity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtileLayout {
    parity: Parity,
    /// Physical slot of each stream index.
    slots: [Option<UtileSlot>; UTILES_PER_MTILE],
    /// Final row of each slot row, per column variant.
    final_rows: [[Option<u8>; MTILE_SLOT_ROWS]; COLUMN_VARIANTS],
}

impl MtileLayout {
    /// Layout of macro-tiles on even grid rows.
    pub const EVEN: Self = Self::new(Parity::Even, &EVEN_PLACEMENT, &EVEN_ROW_ORDER);

    /// Layout of macro-tiles on odd grid rows.
    pub const ODD: Self = Self::new(Parity::Odd, &ODD_PLACEMENT, &ODD_ROW_ORDER);

    /// Builds a layout from its forward tables.
    ///
    /// # Parameters
    ///
    /// - `parity`: The row parity this layout applies to
    /// - `placement`: Stream index stored in each physical slot `[slot_row][slot_col]`
    /// - `row_order`: Slot row found at each final row, `[column_variant][final_row]`
    ///
    /// Values that are out of range are ignored. If a table is not a bijection, some
    /// lookups have no answer and decoding fails with a [`DetileError`].
    pub const fn new(
        parity: Parity,
        placement: &[[u8; MTILE_SLOT_COLS]; MTILE_SLOT_ROWS],
        row_order: &[[u8; MTILE_SLOT_ROWS]; COLUMN_VARIANTS],
    ) -> Self {
        let mut slots = [None; UTILES_PER_MTILE];
        let mut slot_row = 0;
        while slot_row < MTILE_SLOT_ROWS {
            let mut slot_col = 0;
            while slot_col < MTILE_SLOT_COLS {
                let stream_index = placement[slot_row][slot_col] as usize;
                if stream_index < UTILES_PER_MTILE {
                    slots[stream_index] = Some(UtileSlot {
                        row: slot_row as u8,
                        col: slot_col as u8,
                    });
                }
                slot_col += 1;
            }
            slot_row += 1;
        }

        let mut final_rows = [[None; MTILE_SLOT_ROWS]; COLUMN_VARIANTS];
        let mut variant = 0;
        while variant < COLUMN_VARIANTS {
            let mut final_row = 0;
            while final_row < MTILE_SLOT_ROWS {
                let slot_row = row_order[variant][final_row] as usize;
                if slot_row < MTILE_SLOT_ROWS {
                    final_rows[variant][slot_row] = Some(final_row as u8);
                }
                final_row += 1;
            }
            variant += 1;
        }

        Self {
            parity,
            slots,
            final_rows,
        }
    }

    /// Layout used for macro-tiles of the given row parity.
    #[inline]
    pub const fn for_parity(parity: Parity) -> &'static Self {
        match parity {
            Parity::Even => &Self::EVEN,
            Parity::Odd => &Self::ODD,
        }
    }

    /// Row parity this layout applies to.
    #[inline]
    pub const fn parity(&self) -> Parity {
        self.parity
    }

    /// Physical slot holding the micro-tile at `stream_index`.
    ///
    /// # Errors
    ///
    /// [`DetileError::PlacementMiss`] if the placement table has no slot for `stream_index`.
    #[inline]
    pub fn physical_slot(&self, stream_index: usize) -> Result<UtileSlot, DetileError> {
        self.slots
            .get(stream_index)
            .copied()
            .flatten()
            .ok_or(DetileError::PlacementMiss {
                stream_index,
                parity: self.parity,
            })
    }

    /// Final micro-tile row of `slot_row` for a macro-tile with the given column variant.
    ///
    /// # Errors
    ///
    /// [`DetileError::RowOrderMiss`] if the row order table has no entry for `slot_row`.
    #[inline]
    pub fn final_row(&self, slot_row: usize, column_variant: usize) -> Result<u8, DetileError> {
        self.final_rows
            .get(column_variant)
            .and_then(|rows| rows.get(slot_row))
            .copied()
            .flatten()
            .ok_or(DetileError::RowOrderMiss {
                slot_row,
                column_variant,
                parity: self.parity,
            })
    }

    /// Final slot of the micro-tile at `stream_index`, combining both lookups.
    ///
    /// # Errors
    ///
    /// [`DetileError::PlacementMiss`] or [`DetileError::RowOrderMiss`] if either
    /// lookup has no answer.
    #[inline]
    pub fn locate(
        &self,
        stream_index: usize,
        column_variant: usize,
    ) -> Result<UtileSlot, DetileError> {
        let physical = self.physical_slot(stream_index)?;
        let row = self.final_row(physical.row as usize, column_variant)?;
        Ok(UtileSlot {
            row,
            col: physical.col,
        })
    }
}

/// Decodes one macro-tile into a row-major frame.
///
/// `output` must start at the macro-tile's top-left pixel; rows are `stride` words apart.
/// The layout is picked from the row parity of `coord`.
///
/// # Parameters
///
/// - `mtile`: The 32 stored micro-tiles of the macro-tile, in stream order
/// - `coord`: Grid position of the macro-tile
/// - `output`: The frame, starting at the macro-tile's top-left pixel
/// - `stride`: Width of the frame in pixels
///
/// # Errors
///
/// - [`DetileError::InvalidGeometry`] if `stride` is narrower than a macro-tile
/// - [`DetileError::OutputBufferTooSmall`] if `output` can't hold the macro-tile's footprint
#[inline]
pub fn decode_mtile<W: Copy>(
    mtile: &[W; MTILE_WORDS],
    coord: MtileCoord,
    output: &mut [W],
    stride: usize,
) -> Result<(), DetileError> {
    decode_mtile_with_layout(
        mtile,
        MtileLayout::for_parity(coord.parity()),
        coord.column_variant(),
        output,
        stride,
    )
}

/// Decodes one macro-tile using an explicit layout.
///
/// See [`decode_mtile`].
///
/// # Errors
///
/// In addition to the errors of [`decode_mtile`], returns the lookup error of the first
/// micro-tile that `layout` cannot place. Micro-tiles before it have already been written.
pub fn decode_mtile_with_layout<W: Copy>(
    mtile: &[W; MTILE_WORDS],
    layout: &MtileLayout,
    column_variant: usize,
    output: &mut [W],
    stride: usize,
) -> Result<(), DetileError> {
    if stride < MTILE_WIDTH {
        return Err(DetileError::InvalidGeometry {
            width: stride,
            height: MTILE_HEIGHT,
        });
    }

    let needed = (MTILE_HEIGHT - 1) * stride + MTILE_WIDTH;
    if output.len() < needed {
        return Err(DetileError::OutputBufferTooSmall {
            needed,
            actual: output.len(),
        });
    }

    let (utiles, _) = mtile.as_chunks::<UTILE_WORDS>();
    for (stream_index, utile) in utiles.iter().enumerate() {
        let slot = layout.locate(stream_index, column_variant)?;

        // Micro-tiles arrive in stream order and are rasterized before placement.
        let mut decoded = *utile;
        decode_utile(utile, &mut decoded);

        let origin = slot.pixel_offset(stride);
        for (row, pixels) in decoded.chunks_exact(UTILE_WIDTH).enumerate() {
            let start = origin + row * stride;
            output[start..start + UTILE_WIDTH].copy_from_slice(pixels);
        }
    }

    Ok(())
}
