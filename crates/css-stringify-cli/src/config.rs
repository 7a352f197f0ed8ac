//! Configuration loading.

use crate::cli::Args;
use camino::Utf8Path;
use css_stringify::StringifyOptions;
use serde::Deserialize;
use std::fs;

/// Name of the configuration file looked up in the workspace.
pub const CONFIG_FILE: &str = "css-stringify.json";

/// Serializer defaults read from `css-stringify.json`.
///
/// Keys mirror the serializer options; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StringifyConfig {
    /// Omit indentation and line breaks.
    pub compress: Option<bool>,
    /// Indentation unit.
    pub indent: Option<String>,
    /// Generate a source map.
    pub map: Option<bool>,
    /// Append a sourceMappingURL comment (implies `map`).
    pub map_url: Option<String>,
    /// Generated file name recorded in the map.
    pub file: Option<String>,
    /// Source root recorded in the map.
    pub root_url: Option<String>,
    /// Default original file name.
    pub original: Option<String>,
}

impl StringifyConfig {
    /// Loads `css-stringify.json` from the workspace directory.
    ///
    /// A missing file yields the defaults; an unreadable one is reported and
    /// ignored.
    pub fn load(workspace: &Utf8Path) -> Self {
        Self::load_file(&workspace.join(CONFIG_FILE))
    }

    /// Loads configuration from an explicit path, with the same fallback
    /// behavior as [`StringifyConfig::load`].
    pub fn load_file(path: &Utf8Path) -> Self {
        if !path.exists() {
            tracing::debug!(%path, "no configuration file");
            return Self::default();
        }

        match Self::parse_file(path) {
            Ok(config) => {
                tracing::debug!(%path, "loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(%path, error = %e, "failed to parse configuration, using defaults");
                Self::default()
            }
        }
    }

    fn parse_file(path: &Utf8Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&content)
    }

    /// Parses configuration text. `//` and `/* */` comments are allowed.
    pub fn parse(content: &str) -> Result<Self, String> {
        serde_json::from_str(&strip_comments(content)).map_err(|e| e.to_string())
    }

    /// Builds serializer options; command-line values win over the file.
    pub fn to_options(&self, args: &Args) -> StringifyOptions {
        StringifyOptions {
            compress: args.compress || self.compress.unwrap_or(false),
            indent: args.indent.clone().or_else(|| self.indent.clone()),
            map: args.map || self.map.unwrap_or(false),
            map_url: args.map_url.clone().or_else(|| self.map_url.clone()),
            file: args.file.clone().or_else(|| self.file.clone()),
            root_url: args.root_url.clone().or_else(|| self.root_url.clone()),
            original: args.original.clone().or_else(|| self.original.clone()),
        }
    }
}

/// Lexer state for [`strip_comments`].
#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    String,
    Escape,
    LineComment,
    BlockComment,
}

/// Blanks out comments so the rest can be read as plain JSON.
fn strip_comments(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut state = Scan::Code;
    let mut chars = json.chars().peekable();

    while let Some(c) = chars.next() {
        state = match (state, c) {
            (Scan::Code, '"') => {
                out.push(c);
                Scan::String
            }
            (Scan::Code, '/') if chars.peek() == Some(&'/') => {
                chars.next();
                Scan::LineComment
            }
            (Scan::Code, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                Scan::BlockComment
            }
            (Scan::Code, _) => {
                out.push(c);
                Scan::Code
            }
            (Scan::String, '\\') => {
                out.push(c);
                Scan::Escape
            }
            (Scan::String, '"') => {
                out.push(c);
                Scan::Code
            }
            (Scan::String, _) | (Scan::Escape, _) => {
                out.push(c);
                Scan::String
            }
            (Scan::LineComment, '\n') => {
                out.push(c);
                Scan::Code
            }
            (Scan::LineComment, _) => Scan::LineComment,
            (Scan::BlockComment, '*') if chars.peek() == Some(&'/') => {
                chars.next();
                Scan::Code
            }
            (Scan::BlockComment, _) => Scan::BlockComment,
        };
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_comments() {
        let json = r#"{
            // line comment
            "indent": "\t", /* block */
            "mapUrl": "http://x/y.map"
        }"#;
        let cleaned = strip_comments(json);
        assert!(!cleaned.contains("comment"));
        assert!(!cleaned.contains("block"));
        assert!(cleaned.contains("\"http://x/y.map\""));
    }

    #[test]
    fn test_strip_comments_keeps_escaped_quotes() {
        let cleaned = strip_comments(r#"{"original": "a\"//b.css"}"#);
        assert_eq!(cleaned, r#"{"original": "a\"//b.css"}"#);
    }

    #[test]
    fn test_parse_camel_case_keys() {
        let config = StringifyConfig::parse(
            r#"{ "compress": true, "mapUrl": "out.css.map", "rootUrl": "/src/" }"#,
        )
        .unwrap();
        assert_eq!(config.compress, Some(true));
        assert_eq!(config.map_url.as_deref(), Some("out.css.map"));
        assert_eq!(config.root_url.as_deref(), Some("/src/"));
        assert_eq!(config.indent, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(StringifyConfig::parse(r#"{ "minify": true }"#).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Utf8Path::from_path(dir.path()).unwrap();
        assert_eq!(StringifyConfig::load(workspace), StringifyConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(workspace.join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(StringifyConfig::load(workspace), StringifyConfig::default());
    }

    #[test]
    fn test_load_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(workspace.join(CONFIG_FILE), r#"{ "indent": "    " }"#).unwrap();
        assert_eq!(
            StringifyConfig::load(workspace).indent.as_deref(),
            Some("    ")
        );
    }

    #[test]
    fn test_args_override_file() {
        let config = StringifyConfig {
            indent: Some("\t".to_string()),
            original: Some("from-config.css".to_string()),
            map: Some(true),
            ..Default::default()
        };
        let args = Args::parse_from(["css-stringify", "a.json", "--original", "cli.css"]);
        let options = config.to_options(&args);

        assert_eq!(options.indent.as_deref(), Some("\t"));
        assert_eq!(options.original.as_deref(), Some("cli.css"));
        assert!(options.map);
        assert!(!options.compress);
    }
}
