//! Mapping error types.

use thiserror::Error;

/// An error raised while recording or serializing a source map.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A position that cannot be expressed with zero-based coordinates.
    #[error("invalid source position {line}:{column}: lines and columns start at 1")]
    InvalidPosition {
        /// The offending 1-based line.
        line: u32,
        /// The offending 1-based column.
        column: u32,
    },

    /// The finished map could not be serialized.
    #[error("failed to serialize source map: {0}")]
    Serialize(#[from] sourcemap::Error),

    /// The serialized map was not valid UTF-8.
    #[error("serialized source map is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}
