use crate::geometry::{UTILE_WIDTH, UTILE_WORDS};
use crate::tables::UTILE_SOURCE_INDEX;

/// Reorders one stored micro-tile into row-major 8x8 order.
///
/// `output[row * 8 + col]` receives `input[UTILE_SOURCE_INDEX[row][col]]`.
/// Words are copied as a whole, so this works for any pixel word type.
///
/// # Parameters
///
/// - `input`: The 64 words of a micro-tile, in the order they are stored
/// - `output`: Receives the 64 words in row-major order
#[inline]
pub fn decode_utile<W: Copy>(input: &[W; UTILE_WORDS], output: &mut [W; UTILE_WORDS]) {
    for (output_row, source_row) in output
        .chunks_exact_mut(UTILE_WIDTH)
        .zip(UTILE_SOURCE_INDEX.iter())
    {
        for (pixel, &index) in output_row.iter_mut().zip(source_row) {
            *pixel = input[index as usize];
        }
    }
}
