//! Stylesheet tree to CSS serialization.
//!
//! This crate turns a parsed stylesheet back into CSS text. It handles:
//! - Indented or compressed output
//! - Comments, `@charset`, `@import`, `@media` and `@keyframes`
//! - Source maps with one mapping per positioned rule
//! - A trailing `sourceMappingURL` comment
//!
//! # Example
//!
//! ```
//! use css_ast::{CssDocument, Declaration, Node, Rule};
//! use css_stringify::{stringify, StringifyOptions};
//!
//! let doc = CssDocument::new(vec![Node::Rule(Rule::new(
//!     ["a"],
//!     vec![Declaration::property("b", "c")],
//! ))]);
//!
//! let output = stringify(&doc, &StringifyOptions::default()).unwrap();
//! assert_eq!(output.css, "a {\n  b: c\n}\n");
//! ```

mod error;
mod stringify;
mod visitor;
pub mod writer;

pub use error::StringifyError;
pub use stringify::{stringify, StringifyOptions, StringifyOutput};
pub use writer::{Indent, Writer};
