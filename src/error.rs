use std::path::PathBuf;

use thiserror::Error;

/// Process exit status for malformed or missing command-line arguments
/// (sysexits EX_USAGE).
pub const EXIT_USAGE: u8 = 64;

/// Process exit status when the image file cannot be opened, read or written
/// (sysexits EX_NOINPUT).
pub const EXIT_NOINPUT: u8 = 66;

#[derive(Error, Debug)]
pub enum NvImeiError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot access '{path}': {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid range: {0}")]
    Range(String),

    #[error("invalid IMEI: {0}")]
    Validation(String),

    #[error("invalid IMEI encoding: {0}")]
    Encoding(String),

    #[error("IMEI not found in image")]
    ImeiNotFound,

    #[error("unsupported image size {0:#x}: no known device has an nv_data of that size")]
    UnsupportedImage(u64),
}

impl NvImeiError {
    /// Maps the error to its conventional sysexits-style process exit status.
    ///
    /// Only `main` turns errors into exit codes; everything below the process
    /// boundary stays on `Result`.
    pub fn exit_code(&self) -> u8 {
        match self {
            NvImeiError::Usage(_) => EXIT_USAGE,
            NvImeiError::Access { .. } | NvImeiError::Io(_) => EXIT_NOINPUT,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, NvImeiError>;
