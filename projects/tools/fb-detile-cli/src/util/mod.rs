mod mmap;
mod throughput;

pub use mmap::*;
pub use throughput::*;
