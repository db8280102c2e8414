//! Frame detiling.
//!
//! Macro-tiles are stored in row-major grid order. One row of macro-tiles (a band)
//! occupies [`FrameGeometry::band_words`] words in the tiled source, and its footprint
//! is exactly the same number of consecutive words in the row-major output: 64 full
//! pixel rows. Bands are therefore independent of each other, which is what the
//! parallel path relies on.

use crate::error::DetileError;
use crate::geometry::{FrameGeometry, MtileCoord, MTILE_WIDTH, MTILE_WORDS};
use crate::mtile::decode_mtile;
#[cfg(feature = "multithreaded")]
use rayon::prelude::*;

/// Detiles a whole frame of pixel words into row-major order.
///
/// # Parameters
///
/// - `input`: The tiled frame, exactly [`FrameGeometry::pixel_count`] words
/// - `output`: Receives the row-major frame; must hold at least as many words as `input`
/// - `geometry`: Dimensions of the frame
///
/// # Errors
///
/// - [`DetileError::PixelCountMismatch`] if `input` does not hold exactly one frame
/// - [`DetileError::OutputBufferTooSmall`] if `output` is shorter than one frame
/// - Any lookup error raised while placing micro-tiles
///
/// # Examples
///
/// ```
/// use fb_detile::{detile_frame, FrameGeometry};
///
/// # fn main() -> Result<(), fb_detile::DetileError> {
/// let geometry = FrameGeometry::new(32, 64)?;
/// let tiled: Vec<u32> = (0..geometry.pixel_count() as u32).collect();
/// let mut linear = vec![0u32; tiled.len()];
///
/// detile_frame(&tiled, &mut linear, geometry)?;
/// assert_eq!(linear[..8], [0, 1, 2, 3, 8, 9, 10, 11]);
/// # Ok(())
/// # }
/// ```
pub fn detile_frame<W: Copy>(
    input: &[W],
    output: &mut [W],
    geometry: FrameGeometry,
) -> Result<(), DetileError> {
    validate_word_buffers(input.len(), output.len(), geometry)?;

    let band_words = geometry.band_words();
    let output = &mut output[..geometry.pixel_count()];
    for (row, (source, target)) in input
        .chunks_exact(band_words)
        .zip(output.chunks_exact_mut(band_words))
        .enumerate()
    {
        detile_band(source, target, row, geometry)?;
    }

    Ok(())
}

/// Detiles a whole frame, decoding bands of macro-tiles on the rayon thread pool.
///
/// Produces exactly the same output as [`detile_frame`].
///
/// # Errors
///
/// Same as [`detile_frame`]. If several bands fail, which error is returned is unspecified.
#[cfg(feature = "multithreaded")]
pub fn detile_frame_parallel<W: Copy + Send + Sync>(
    input: &[W],
    output: &mut [W],
    geometry: FrameGeometry,
) -> Result<(), DetileError> {
    validate_word_buffers(input.len(), output.len(), geometry)?;

    let band_words = geometry.band_words();
    let output = &mut output[..geometry.pixel_count()];
    input
        .par_chunks_exact(band_words)
        .zip(output.par_chunks_exact_mut(band_words))
        .enumerate()
        .try_for_each(|(row, (source, target))| detile_band(source, target, row, geometry))
}

/// Decodes one row of macro-tiles.
///
/// `source` holds the band's macro-tiles in grid column order, `target` the band's
/// 64 output pixel rows.
fn detile_band<W: Copy>(
    source: &[W],
    target: &mut [W],
    row: usize,
    geometry: FrameGeometry,
) -> Result<(), DetileError> {
    let (mtiles, _) = source.as_chunks::<MTILE_WORDS>();
    for (col, mtile) in mtiles.iter().enumerate() {
        let coord = MtileCoord::new(row, col);
        decode_mtile(
            mtile,
            coord,
            &mut target[col * MTILE_WIDTH..],
            geometry.width(),
        )?;
    }

    Ok(())
}

fn validate_word_buffers(
    input_len: usize,
    output_len: usize,
    geometry: FrameGeometry,
) -> Result<(), DetileError> {
    let expected = geometry.pixel_count();
    if input_len != expected {
        return Err(DetileError::PixelCountMismatch {
            expected,
            actual: input_len,
        });
    }

    if output_len < expected {
        return Err(DetileError::OutputBufferTooSmall {
            needed: expected,
            actual: output_len,
        });
    }

    Ok(())
}
