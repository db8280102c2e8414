use crate::error::CliError;
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::path::Path;

/// Opens a file in read-only mode and returns a handle.
///
/// # Arguments
///
/// * `path` - The path to the file to open.
///
/// # Returns
///
/// A read-only file handle on success, or a [`CliError`] if the file cannot be opened.
#[inline(always)]
pub fn open_read_handle(path: &Path) -> Result<ReadOnlyFileHandle, CliError> {
    ReadOnlyFileHandle::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates a memory mapping for reading over a whole file.
///
/// # Arguments
///
/// * `handle` - Handle to the file to mmap
/// * `path` - Path of the file, for error reporting
/// * `len` - Length of the file/mapping
///
/// # Returns
///
/// A memory mapping on success, or a [`CliError`] on failure.
#[inline(always)]
pub fn open_readonly_mmap<'a>(
    handle: &'a ReadOnlyFileHandle,
    path: &Path,
    len: usize,
) -> Result<ReadOnlyMmap<'a>, CliError> {
    ReadOnlyMmap::new(handle, 0, len).map_err(|source| CliError::Map {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates (or truncates) a file of exactly `len` bytes for writing.
///
/// # Arguments
///
/// * `path` - Where to create the file
/// * `len` - Size to preallocate for the file
///
/// # Returns
///
/// A read-write file handle on success, or a [`CliError`] on failure.
#[inline(always)]
pub fn open_write_handle(path: &Path, len: usize) -> Result<ReadWriteFileHandle, CliError> {
    ReadWriteFileHandle::create_preallocated(path, len as i64).map_err(|source| {
        CliError::Open {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Creates a memory mapping for writing over a whole file.
///
/// # Arguments
///
/// * `handle` - Handle to the output file to be mapped
/// * `path` - Path of the file, for error reporting
/// * `len` - Length of the file/mapping
///
/// # Returns
///
/// A memory mapping on success, or a [`CliError`] on failure.
#[inline(always)]
pub fn create_output_mapping<'a>(
    handle: &'a ReadWriteFileHandle,
    path: &Path,
    len: usize,
) -> Result<ReadWriteMmap<'a>, CliError> {
    ReadWriteMmap::new(handle, 0, len).map_err(|source| CliError::Map {
        path: path.to_path_buf(),
        source,
    })
}
