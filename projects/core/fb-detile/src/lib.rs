#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

#[cfg(any(feature = "std", test))]
extern crate std;

/// Aligned allocation of output frames.
pub mod allocate;
/// Error types shared by all detile operations.
pub mod error;
/// Frame detiling: iterates the macro-tile grid of a whole frame.
pub mod frame;
/// Frame dimensions and tiling constants.
pub mod geometry;
/// Macro-tile placement and decoding.
pub mod mtile;
/// Validated entry points over raw byte buffers.
pub mod safe;
/// Constant tables describing the tiled memory layout.
pub mod tables;
/// Micro-tile decoding.
pub mod utile;

#[cfg(test)]
pub mod test_prelude;

pub use allocate::{allocate_align_64, detile_frame_to_alloc, AllocateError, DetileMode};
pub use error::DetileError;
pub use frame::detile_frame;
#[cfg(feature = "multithreaded")]
pub use frame::detile_frame_parallel;
pub use geometry::{FrameGeometry, MtileCoord, Parity};
pub use mtile::{decode_mtile, decode_mtile_with_layout, MtileLayout, UtileSlot};
pub use safe::detile_frame_bytes;
#[cfg(feature = "multithreaded")]
pub use safe::detile_frame_bytes_parallel;
pub use utile::decode_utile;
