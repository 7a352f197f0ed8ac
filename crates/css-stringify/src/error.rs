//! Stringify error types.

use css_source_map::MappingError;
use thiserror::Error;

/// An error that aborts serialization.
#[derive(Debug, Error)]
pub enum StringifyError {
    /// A rule without selectors cannot open a block.
    #[error("malformed rule: selector list is empty")]
    EmptySelectors,

    /// A mapping could not be recorded or the map could not be encoded.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}
