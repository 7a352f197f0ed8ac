//! Stylesheet syntax tree for css-stringify.
//!
//! These types describe a parsed CSS document: rules, declarations, comments
//! and the `@charset`, `@import`, `@media` and `@keyframes` at-rules. The
//! tree is produced by a CSS parser and consumed read-only by the
//! serializer. With the `serde` feature enabled it can be loaded from the
//! JSON representation emitted by common JavaScript CSS parsers.
//!
//! # Example
//!
//! ```
//! use css_ast::{CssDocument, Declaration, Node, Rule};
//!
//! let doc = CssDocument::new(vec![Node::Rule(Rule::new(
//!     ["a"],
//!     vec![Declaration::property("color", "red")],
//! ))]);
//! assert_eq!(doc.stylesheet.rules.len(), 1);
//! ```

mod ast;

pub use ast::*;
