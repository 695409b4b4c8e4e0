//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`serde_json::Error`]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// File does not start with the `RST` magic
    #[error("file is not an rst string table")]
    #[diagnostic(help("rst files start with the bytes `RST`"))]
    InvalidMagic,

    /// Version byte is not one of the known header layouts
    #[error("unsupported rst version {0}")]
    #[diagnostic(help("supported versions are 2, 3, 4 and 5"))]
    UnsupportedVersion(u8),

    /// File ends early, or an entry points outside of the data block
    #[error("file is truncated")]
    Truncated,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
