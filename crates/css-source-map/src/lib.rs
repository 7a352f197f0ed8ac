//! Source map recording for css-stringify.
//!
//! The serializer tracks 1-based line/column positions while it writes. This
//! crate turns (generated, original, source, name) tuples expressed in those
//! positions into entries of a standard version 3 source map, delegating
//! the encoding itself to the `sourcemap` crate.

mod error;
mod line_col;
mod recorder;

pub use error::MappingError;
pub use line_col::LineCol;
pub use recorder::{MapOptions, Mapping, MappingRecorder, SourceMapOutput};
pub use sourcemap::SourceMap;
