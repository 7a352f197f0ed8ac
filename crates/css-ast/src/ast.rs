//! AST types for stylesheets.
//!
//! The shape mirrors the JSON produced by common CSS parsers: every node
//! carries a `type` tag and rules/declarations may carry a `position`.

use smol_str::SmolStr;

/// A complete parsed stylesheet, as handed over by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CssDocument {
    /// The stylesheet body.
    pub stylesheet: Stylesheet,
}

impl CssDocument {
    /// Creates a document from its top-level nodes.
    pub fn new(rules: Vec<Node>) -> Self {
        Self {
            stylesheet: Stylesheet { rules },
        }
    }
}

/// The body of a stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stylesheet {
    /// The top-level nodes in document order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<Node>,
}

/// A top-level (or media-nested) node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Node {
    /// A `/* ... */` comment.
    Comment(Comment),
    /// An `@charset` directive.
    Charset(Charset),
    /// An `@keyframes` block.
    Keyframes(Keyframes),
    /// An `@media` block.
    Media(Media),
    /// An `@import` directive.
    Import(Import),
    /// A style rule.
    Rule(Rule),
}

/// Discriminant of a [`Node`], mostly useful for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Comment,
    Charset,
    Keyframes,
    Media,
    Import,
    Rule,
}

impl NodeKind {
    /// The lowercase tag name used in serialized trees.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Comment => "comment",
            NodeKind::Charset => "charset",
            NodeKind::Keyframes => "keyframes",
            NodeKind::Media => "media",
            NodeKind::Import => "import",
            NodeKind::Rule => "rule",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Comment(_) => NodeKind::Comment,
            Node::Charset(_) => NodeKind::Charset,
            Node::Keyframes(_) => NodeKind::Keyframes,
            Node::Media(_) => NodeKind::Media,
            Node::Import(_) => NodeKind::Import,
            Node::Rule(_) => NodeKind::Rule,
        }
    }

}

/// A comment. The text excludes the `/*` and `*/` delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub comment: String,
}

impl Comment {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }
}

/// An `@charset "...";` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charset {
    /// The charset value, quotes included.
    pub charset: String,
}

/// An `@import ...;` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Import {
    /// Everything between `@import ` and the terminating `;`.
    pub import: String,
}

/// An `@media` block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Media {
    /// The media query list.
    pub media: String,
    /// Nested nodes; any node kind may appear here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<Node>,
}

/// An `@keyframes` block, possibly vendor prefixed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframes {
    /// The animation name.
    pub name: SmolStr,
    /// Vendor prefix including dashes, e.g. `-webkit-`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub vendor: Option<SmolStr>,
    /// The keyframe blocks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keyframes: Vec<Keyframe>,
}

/// A single keyframe such as `from`, `50%` or `0%, 100%`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    /// The keyframe selectors.
    pub values: Vec<String>,
    /// The declarations of this keyframe.
    #[cfg_attr(feature = "serde", serde(default))]
    pub declarations: Vec<Declaration>,
}

/// A style rule: a selector list and a declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// The selectors in source order.
    pub selectors: Vec<String>,
    /// The declarations in source order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub declarations: Vec<Declaration>,
    /// Where the rule starts in the original source.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub position: Option<Position>,
}

impl Rule {
    /// Creates a rule without position information.
    pub fn new<S: Into<String>>(
        selectors: impl IntoIterator<Item = S>,
        declarations: Vec<Declaration>,
    ) -> Self {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations,
            position: None,
        }
    }

    /// Attaches a start position.
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// An entry of a declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Declaration {
    /// A `property: value` pair.
    #[cfg_attr(feature = "serde", serde(rename = "declaration"))]
    Property(Property),
    /// A comment between declarations.
    Comment(Comment),
}

impl Declaration {
    /// Shorthand for a `property: value` declaration.
    pub fn property(property: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Declaration::Property(Property::new(property, value))
    }

    /// Shorthand for a comment declaration.
    pub fn comment(comment: impl Into<String>) -> Self {
        Declaration::Comment(Comment::new(comment))
    }
}

/// A `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub property: SmolStr,
    pub value: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub position: Option<Position>,
}

impl Property {
    pub fn new(property: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            position: None,
        }
    }
}

/// The source range of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// The start of the node.
    pub start: Location,
    /// The end of the node.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub end: Option<Location>,
    /// The file the node was parsed from.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub source: Option<String>,
}

impl Position {
    /// Creates a position from a 1-based start line and column.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            start: Location::new(line, column),
            end: None,
            source: None,
        }
    }

    /// Sets the file the node was parsed from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The originating file: the start location's own file first, then the
    /// position-wide source. Empty names count as absent.
    pub fn file(&self) -> Option<&str> {
        self.start
            .file
            .as_deref()
            .filter(|file| !file.is_empty())
            .or_else(|| self.source.as_deref().filter(|source| !source.is_empty()))
    }
}

/// A 1-based line/column location in the original source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Originating file, when the parser records it per location.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub file: Option<String>,
    /// Symbol name associated with this location.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            file: None,
            name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_node_kind() {
        let node = Node::Rule(Rule::new(["a"], vec![]));
        assert_eq!(node.kind(), NodeKind::Rule);
        assert_eq!(node.kind().to_string(), "rule");

        let node = Node::Comment(Comment::new("x"));
        assert_eq!(node.kind(), NodeKind::Comment);
    }

    #[test]
    fn test_rule_builder() {
        let rule = Rule::new(["a", "b"], vec![Declaration::property("c", "d")])
            .at(Position::new(3, 5));
        assert_eq!(rule.selectors, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(rule.position.as_ref().map(|p| p.start.line), Some(3));
        assert_eq!(rule.position.as_ref().map(|p| p.start.column), Some(5));
    }

    #[test]
    fn test_position_file_precedence() {
        let mut position = Position::new(1, 1).with_source("outer.css");
        assert_eq!(position.file(), Some("outer.css"));

        position.start.file = Some("inner.css".to_string());
        assert_eq!(position.file(), Some("inner.css"));

        assert_eq!(Position::new(1, 1).file(), None);
    }

    #[test]
    fn test_position_file_skips_empty_names() {
        let mut position = Position::new(1, 1).with_source("outer.css");
        position.start.file = Some(String::new());
        assert_eq!(position.file(), Some("outer.css"));

        let position = Position::new(1, 1).with_source("");
        assert_eq!(position.file(), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_parser_output() {
        let json = r#"{
            "type": "stylesheet",
            "stylesheet": {
                "rules": [
                    { "type": "charset", "charset": "\"utf-8\"" },
                    {
                        "type": "rule",
                        "selectors": ["a", "b"],
                        "declarations": [
                            { "type": "declaration", "property": "color", "value": "red" },
                            { "type": "comment", "comment": " note " }
                        ],
                        "position": {
                            "start": { "line": 2, "column": 1 },
                            "end": { "line": 4, "column": 2 },
                            "source": "input.css"
                        }
                    },
                    {
                        "type": "media",
                        "media": "print",
                        "rules": [{ "type": "import", "import": "url(\"x.css\")" }]
                    },
                    {
                        "type": "keyframes",
                        "name": "spin",
                        "vendor": "-webkit-",
                        "keyframes": [
                            {
                                "type": "keyframe",
                                "values": ["from"],
                                "declarations": []
                            }
                        ]
                    }
                ]
            }
        }"#;

        let doc: CssDocument = serde_json::from_str(json).unwrap();
        let rules = &doc.stylesheet.rules;
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0].kind(), NodeKind::Charset);

        let Node::Rule(rule) = &rules[1] else {
            panic!("expected a rule, got {:?}", rules[1].kind());
        };
        assert_eq!(rule.selectors, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            rule.declarations,
            vec![
                Declaration::property("color", "red"),
                Declaration::comment(" note "),
            ]
        );
        let position = rule.position.as_ref().unwrap();
        assert_eq!(position.start, Location::new(2, 1));
        assert_eq!(position.file(), Some("input.css"));

        let Node::Keyframes(keyframes) = &rules[3] else {
            panic!("expected keyframes");
        };
        assert_eq!(keyframes.vendor.as_deref(), Some("-webkit-"));
        assert_eq!(keyframes.keyframes[0].values, vec!["from".to_string()]);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{ "stylesheet": { "rules": [{ "type": "supports" }] } }"#;
        assert!(serde_json::from_str::<CssDocument>(json).is_err());
    }
}
