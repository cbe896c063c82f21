//! Error types for `NuScene`

use thiserror::Error;

/// The error type for `NuScene` operations.
///
/// Every variant except [`Error::Io`] describes a file this decoder cannot
/// load; a load that fails leaves no partial scene behind.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Cursor Errors ====================
    /// A read or seek went past the end of the data.
    #[error("unexpected end of file: wanted {wanted} bytes at offset 0x{position:08X}")]
    UnexpectedEof {
        /// Cursor position when the read was attempted.
        position: usize,
        /// Number of bytes the read needed.
        wanted: usize,
    },

    /// A byte pattern searched for with `find` does not occur in the data.
    #[error("pattern {pattern:?} not found")]
    PatternNotFound {
        /// Printable form of the searched bytes.
        pattern: String,
    },

    // ==================== Container Errors ====================
    /// A required chunk tag is missing from the file.
    #[error("chunk {tag} not found")]
    ChunkNotFound {
        /// The (unreversed) chunk name, e.g. `MESH`.
        tag: String,
    },

    /// A chunk declares a version this decoder does not support.
    #[error("unsupported {chunk} version: 0x{version:X}")]
    UnsupportedVersion {
        /// Chunk name.
        chunk: &'static str,
        /// The version found in the file.
        version: u32,
    },

    /// A field the format defines as constant holds another value.
    #[error("{chunk}: {message}")]
    InvariantViolation {
        /// Chunk name.
        chunk: &'static str,
        /// What was expected and what was found.
        message: String,
    },

    /// A texture record carries a format tag that is not recognised.
    #[error("unsupported texture format tag: 0x{tag:08X}")]
    UnsupportedFormat {
        /// The raw format tag (`FourCC` or D3D format number).
        tag: u32,
    },

    /// A back-reference points at a buffer that was never introduced.
    #[error("{kind} buffer back-reference 0x{id:X} does not name an earlier buffer")]
    DanglingReference {
        /// Buffer kind (`vertex` or `index`).
        kind: &'static str,
        /// The referenced resource id.
        id: u32,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvariantViolation`].
    pub(crate) fn invariant(chunk: &'static str, message: impl Into<String>) -> Self {
        Error::InvariantViolation {
            chunk,
            message: message.into(),
        }
    }
}

/// A specialized Result type for `NuScene` operations.
pub type Result<T> = std::result::Result<T, Error>;
