//! Validated entry points over raw byte buffers.
//!
//! Frame dumps are read from disk as bytes. These functions check the buffer sizes
//! against the frame geometry before doing anything else, then reinterpret the
//! buffers as 4-byte pixel words. Since words are only ever moved as a whole, the
//! byte order inside each pixel is left exactly as it was.

use crate::error::DetileError;
use crate::geometry::{FrameGeometry, PIXEL_BYTES};

/// Detiles a frame stored as raw bytes.
///
/// # Parameters
///
/// - `input`: The tiled frame, exactly [`FrameGeometry::frame_bytes`] long
/// - `output`: The output buffer to write the row-major frame to
/// - `geometry`: Dimensions of the frame
///
/// # Errors
///
/// - [`DetileError::InputSizeMismatch`] if `input` does not hold exactly one frame
/// - [`DetileError::OutputBufferTooSmall`] if `output` is smaller than `input`
/// - Any lookup error raised while placing micro-tiles
///
/// # Examples
///
/// ```
/// use fb_detile::{detile_frame_bytes, DetileError, FrameGeometry};
///
/// let geometry = FrameGeometry::DEFAULT;
/// let tiled = vec![0u8; geometry.frame_bytes() - 1];
/// let mut linear = vec![0u8; geometry.frame_bytes()];
///
/// // One byte short of a frame.
/// assert!(matches!(
///     detile_frame_bytes(&tiled, &mut linear, geometry),
///     Err(DetileError::InputSizeMismatch { .. })
/// ));
/// ```
pub fn detile_frame_bytes(
    input: &[u8],
    output: &mut [u8],
    geometry: FrameGeometry,
) -> Result<(), DetileError> {
    validate_byte_buffers(input.len(), output.len(), geometry)?;

    let (input_words, _) = input.as_chunks::<PIXEL_BYTES>();
    let (output_words, _) = output.as_chunks_mut::<PIXEL_BYTES>();
    crate::frame::detile_frame(input_words, output_words, geometry)
}

/// Detiles a frame stored as raw bytes on the rayon thread pool.
///
/// Produces exactly the same output as [`detile_frame_bytes`].
///
/// # Errors
///
/// Same as [`detile_frame_bytes`].
#[cfg(feature = "multithreaded")]
pub fn detile_frame_bytes_parallel(
    input: &[u8],
    output: &mut [u8],
    geometry: FrameGeometry,
) -> Result<(), DetileError> {
    validate_byte_buffers(input.len(), output.len(), geometry)?;

    let (input_words, _) = input.as_chunks::<PIXEL_BYTES>();
    let (output_words, _) = output.as_chunks_mut::<PIXEL_BYTES>();
    crate::frame::detile_frame_parallel(input_words, output_words, geometry)
}

/// Checks that `input_len` bytes are exactly one frame of the given geometry.
///
/// # Errors
///
/// [`DetileError::InputSizeMismatch`] if they are not.
pub fn validate_input_size(input_len: usize, geometry: FrameGeometry) -> Result<(), DetileError> {
    let expected = geometry.frame_bytes();
    if input_len != expected {
        return Err(DetileError::InputSizeMismatch {
            expected,
            actual: input_len,
        });
    }

    Ok(())
}

fn validate_byte_buffers(
    input_len: usize,
    output_len: usize,
    geometry: FrameGeometry,
) -> Result<(), DetileError> {
    validate_input_size(input_len, geometry)?;

    if output_len < input_len {
        return Err(DetileError::OutputBufferTooSmall {
            needed: input_len,
            actual: output_len,
        });
    }

    Ok(())
}
