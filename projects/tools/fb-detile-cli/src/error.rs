use fb_detile::DetileError;
use lightweight_mmap::handles::HandleOpenError;
use lightweight_mmap::mmap::MmapError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid argument (`EINVAL`). Used for usage and input format errors.
pub const EXIT_INVALID_ARGUMENT: u8 = 22;
/// Out of memory (`ENOMEM`).
pub const EXIT_OUT_OF_MEMORY: u8 = 12;
/// Generic I/O error (`EIO`), for failures that carry no OS error code.
pub const EXIT_IO: u8 = 5;

#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong arguments; holds the parser's diagnostic and usage text.
    #[error("{0}")]
    Usage(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A file could not be opened or created for mapping.
    #[error("{}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: HandleOpenError,
    },
    #[error("{}: {source}", path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: MmapError,
    },
    #[error(transparent)]
    Detile(#[from] DetileError),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// I/O failures report the OS error code of the failing call where there is one.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => EXIT_INVALID_ARGUMENT,
            CliError::Io { source, .. } => source.raw_os_error().map_or(EXIT_IO, os_exit_code),
            CliError::Open { source, .. } => match source {
                HandleOpenError::FailedToOpenFileHandle(code, ..)
                | HandleOpenError::FailedToGetFileSize(code)
                | HandleOpenError::FailedToSetFileSize(code) => os_exit_code(*code),
                #[allow(unreachable_patterns)]
                _ => EXIT_IO,
            },
            CliError::Map { source, .. } => match source {
                MmapError::FailedToMapMemory(code) => os_exit_code(*code),
                _ => EXIT_IO,
            },
            CliError::Detile(DetileError::Allocate(_)) => EXIT_OUT_OF_MEMORY,
            CliError::Detile(_) => EXIT_INVALID_ARGUMENT,
        }
    }
}

/// Converts an OS error code into an exit code, falling back to `EIO` when it doesn't fit.
fn os_exit_code<C>(code: C) -> u8
where
    u8: TryFrom<C>,
{
    u8::try_from(code)
        .ok()
        .filter(|&code| code != 0)
        .unwrap_or(EXIT_IO)
}
