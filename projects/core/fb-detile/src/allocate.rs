//! Aligned allocation of output frames.
//!
//! ## Useful APIs
//!
//! [`allocate_align_64`]: Allocates uninitialized memory aligned to 64 bytes.
//! [`detile_frame_to_alloc`]: Detiles a frame into a freshly allocated buffer.

use crate::error::DetileError;
use crate::geometry::FrameGeometry;
use crate::safe::validate_input_size;
use core::alloc::{Layout, LayoutError};
use safe_allocator_api::prelude::AllocError;
use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// An error that happened in memory allocation within the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// An error that occurred while creating a layout for allocation.
    #[error("Invalid layout provided. Likely due to `num_bytes` in `allocate_align_64` being larger than isize::MAX. {0}")]
    LayoutError(#[from] LayoutError),

    /// An error that occurred while allocating memory.
    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}

/// Allocates data with an alignment of 64 bytes.
///
/// # Parameters
///
/// - `num_bytes`: The number of bytes to allocate
///
/// # Returns
///
/// A [`RawAlloc`] containing the allocated data
pub fn allocate_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, 64)?;
    Ok(RawAlloc::new(layout)?)
}

/// How the macro-tile grid of a frame is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetileMode {
    /// One macro-tile after another on the calling thread.
    #[default]
    Sequential,
    /// Macro-tile rows distributed over the rayon thread pool.
    #[cfg(feature = "multithreaded")]
    Parallel,
}

impl DetileMode {
    /// Detiles a frame stored as raw bytes into `output` using this mode.
    ///
    /// # Errors
    ///
    /// Same as [`detile_frame_bytes`](crate::detile_frame_bytes).
    pub fn detile_bytes(
        self,
        input: &[u8],
        output: &mut [u8],
        geometry: FrameGeometry,
    ) -> Result<(), DetileError> {
        match self {
            DetileMode::Sequential => crate::safe::detile_frame_bytes(input, output, geometry),
            #[cfg(feature = "multithreaded")]
            DetileMode::Parallel => {
                crate::safe::detile_frame_bytes_parallel(input, output, geometry)
            }
        }
    }
}

/// Detiles a frame into a newly allocated, 64-byte aligned buffer.
///
/// The input size is validated before anything is allocated.
///
/// # Parameters
///
/// - `input`: The tiled frame, exactly [`FrameGeometry::frame_bytes`] long
/// - `geometry`: Dimensions of the frame
/// - `mode`: Whether to decode on the current thread or in parallel
///
/// # Errors
///
/// - [`DetileError::InputSizeMismatch`] if `input` does not hold exactly one frame
/// - [`DetileError::Allocate`] if the output buffer could not be allocated
/// - Any lookup error raised while placing micro-tiles
///
/// # Examples
///
/// ```
/// use fb_detile::{detile_frame_to_alloc, DetileMode, FrameGeometry};
///
/// # fn main() -> Result<(), fb_detile::DetileError> {
/// let geometry = FrameGeometry::new(32, 64)?;
/// let tiled = vec![0u8; geometry.frame_bytes()];
///
/// let linear = detile_frame_to_alloc(&tiled, geometry, DetileMode::Sequential)?;
/// assert_eq!(linear.len(), tiled.len());
/// # Ok(())
/// # }
/// ```
pub fn detile_frame_to_alloc(
    input: &[u8],
    geometry: FrameGeometry,
    mode: DetileMode,
) -> Result<RawAlloc, DetileError> {
    validate_input_size(input.len(), geometry)?;

    let mut output = allocate_align_64(geometry.frame_bytes())?;
    mode.detile_bytes(input, output.as_mut_slice(), geometry)?;
    Ok(output)
}
