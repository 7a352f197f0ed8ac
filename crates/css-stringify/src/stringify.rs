//! Entry point tying the writer, visitor and mapping recorder together.

use crate::visitor::Visitor;
use crate::writer::{Writer, DEFAULT_INDENT};
use crate::StringifyError;
use css_ast::CssDocument;
use css_source_map::{MapOptions, MappingRecorder, SourceMap, SourceMapOutput};

/// Options for serialization.
#[derive(Debug, Clone, Default)]
pub struct StringifyOptions {
    /// Omit all indentation and line breaks.
    pub compress: bool,
    /// Indentation unit; two spaces when unset or empty. Ignored when
    /// compressing.
    pub indent: Option<String>,
    /// Generate a source map.
    pub map: bool,
    /// Generate a source map and append a `sourceMappingURL` comment
    /// pointing at this location.
    pub map_url: Option<String>,
    /// Name of the generated file, recorded in the map.
    pub file: Option<String>,
    /// Source root recorded in the map.
    pub root_url: Option<String>,
    /// Original file name for rules whose position names none. A node's own
    /// `start.file` or `position.source` wins over it.
    pub original: Option<String>,
}

impl StringifyOptions {
    /// The `sourceMappingURL` to append, if any.
    fn map_url(&self) -> Option<&str> {
        self.map_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Whether a source map has to be generated.
    pub fn wants_map(&self) -> bool {
        self.map || self.map_url().is_some()
    }

    /// The fallback original file name, if a non-empty one was given.
    fn original(&self) -> Option<&str> {
        self.original.as_deref().filter(|original| !original.is_empty())
    }

    fn indent_unit(&self) -> &str {
        self.indent
            .as_deref()
            .filter(|unit| !unit.is_empty())
            .unwrap_or(DEFAULT_INDENT)
    }
}

/// The result of serialization.
#[derive(Debug)]
pub struct StringifyOutput {
    /// The generated CSS.
    pub css: String,
    /// The serialized source map, when one was requested.
    pub map: Option<String>,
    /// The source map itself, when one was requested.
    pub source_map: Option<SourceMap>,
}

impl StringifyOutput {
    /// The generated CSS.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.css
    }

    /// Consumes the output, keeping only the CSS.
    pub fn into_css(self) -> String {
        self.css
    }
}

impl std::fmt::Display for StringifyOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.css)
    }
}

/// Serializes a stylesheet tree to CSS.
///
/// Rules carrying a position each contribute one mapping when a source map
/// is requested. Any error aborts the whole call.
pub fn stringify(
    document: &CssDocument,
    options: &StringifyOptions,
) -> Result<StringifyOutput, StringifyError> {
    let rules = &document.stylesheet.rules;
    tracing::debug!(
        nodes = rules.len(),
        compress = options.compress,
        map = options.wants_map(),
        "stringifying stylesheet"
    );

    let writer = Writer::new(options.indent_unit(), options.compress);
    let recorder = options.wants_map().then(|| {
        MappingRecorder::new(&MapOptions {
            file: options.file.clone(),
            source_root: options.root_url.clone(),
        })
    });

    let mut visitor = Visitor::new(writer, recorder, options.original());
    visitor.nodes(rules)?;
    let (mut writer, recorder) = visitor.finish();

    if let Some(url) = options.map_url() {
        writer.push_trailer(&format!("\n/*# sourceMappingURL={url} */"));
    }

    let (map, source_map) = match recorder {
        Some(recorder) => {
            let mappings = recorder.len();
            let SourceMapOutput { map, json } = recorder.finish()?;
            tracing::debug!(mappings, "source map finalized");
            (Some(json), Some(map))
        }
        None => (None, None),
    };

    let css = writer.into_string();
    tracing::debug!(bytes = css.len(), "stylesheet stringified");

    Ok(StringifyOutput {
        css,
        map,
        source_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_map() {
        assert!(!StringifyOptions::default().wants_map());

        let options = StringifyOptions {
            map: true,
            ..Default::default()
        };
        assert!(options.wants_map());

        let options = StringifyOptions {
            map_url: Some("a.map".to_string()),
            ..Default::default()
        };
        assert!(options.wants_map());
    }

    #[test]
    fn test_empty_map_url_is_unset() {
        let options = StringifyOptions {
            map_url: Some(String::new()),
            ..Default::default()
        };
        assert!(!options.wants_map());
        let output = stringify(&CssDocument::default(), &options).unwrap();
        assert_eq!(output.css, "");
        assert!(output.map.is_none());
    }

    #[test]
    fn test_empty_original_is_unset() {
        let options = StringifyOptions {
            original: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(options.original(), None);
    }

    #[test]
    fn test_indent_unit() {
        assert_eq!(StringifyOptions::default().indent_unit(), "  ");

        let options = StringifyOptions {
            indent: Some("\t".to_string()),
            ..Default::default()
        };
        assert_eq!(options.indent_unit(), "\t");
    }
}
