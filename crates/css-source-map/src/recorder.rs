//! Mapping recorder for collecting source map entries during serialization.

use crate::{LineCol, MappingError};
use sourcemap::{SourceMap, SourceMapBuilder};

/// Settings recorded in the header of the generated map.
#[derive(Debug, Clone, Default)]
pub struct MapOptions {
    /// Name of the generated file (`file`).
    pub file: Option<String>,
    /// Prefix for all sources (`sourceRoot`).
    pub source_root: Option<String>,
}

/// A single mapping from a generated position to an original position.
///
/// Both positions are 1-based, exactly as the writer and the parser count
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping<'a> {
    /// Where the mapped text starts in the generated output.
    pub generated: LineCol,
    /// Where the mapped text starts in the original source.
    pub original: LineCol,
    /// The original file the text came from.
    pub source: &'a str,
    /// Symbol name attached to the mapping.
    pub name: Option<&'a str>,
}

/// A finished source map.
#[derive(Debug)]
pub struct SourceMapOutput {
    /// The decoded map, as built by the encoder.
    pub map: SourceMap,
    /// The serialized JSON form of `map`.
    pub json: String,
}

/// Collects mappings for one serialization and encodes them at the end.
pub struct MappingRecorder {
    builder: SourceMapBuilder,
    len: usize,
}

impl std::fmt::Debug for MappingRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingRecorder")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl MappingRecorder {
    /// Creates an empty recorder.
    ///
    /// A missing `file` is recorded as the empty string so the field is
    /// always present in the output.
    pub fn new(options: &MapOptions) -> Self {
        let file = options.file.as_deref().unwrap_or("");
        let mut builder = SourceMapBuilder::new(Some(file));
        builder.set_source_root(options.source_root.as_deref());
        Self { builder, len: 0 }
    }

    /// Returns the number of recorded mappings.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Records a mapping.
    ///
    /// Columns are shifted to zero-based as the map format requires. The
    /// encoder counts lines from zero as well, so lines are shifted too;
    /// the serialized `mappings` are the same as for a 1-based-line encoder.
    /// Sources are deduplicated in first-seen order. An empty name counts
    /// as no name.
    pub fn record(&mut self, mapping: Mapping<'_>) -> Result<(), MappingError> {
        let (dst_line, dst_col) = mapping.generated.to_zero_based()?;
        let (src_line, src_col) = mapping.original.to_zero_based()?;
        let name = mapping.name.filter(|name| !name.is_empty());

        tracing::trace!(
            generated = %mapping.generated,
            original = %mapping.original,
            source = mapping.source,
            "recording mapping"
        );

        self.builder.add(
            dst_line,
            dst_col,
            src_line,
            src_col,
            Some(mapping.source),
            name,
            false,
        );
        self.len += 1;
        Ok(())
    }

    /// Finalizes the map and serializes it to JSON.
    pub fn finish(self) -> Result<SourceMapOutput, MappingError> {
        let map = self.builder.into_sourcemap();
        let mut buf = Vec::new();
        map.to_writer(&mut buf)?;
        let json = String::from_utf8(buf)?;
        Ok(SourceMapOutput { map, json })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mapping<'a>(generated: (u32, u32), original: (u32, u32), source: &'a str) -> Mapping<'a> {
        Mapping {
            generated: LineCol::new(generated.0, generated.1),
            original: LineCol::new(original.0, original.1),
            source,
            name: None,
        }
    }

    #[test]
    fn test_empty_recorder() {
        let recorder = MappingRecorder::new(&MapOptions::default());
        assert!(recorder.is_empty());

        let output = recorder.finish().unwrap();
        assert_eq!(output.map.get_token_count(), 0);

        let json: serde_json::Value = serde_json::from_str(&output.json).unwrap();
        assert_eq!(json["version"], 3);
        assert_eq!(json["file"], "");
        assert!(json.get("sourceRoot").is_none());
    }

    #[test]
    fn test_header_fields() {
        let recorder = MappingRecorder::new(&MapOptions {
            file: Some("out.css".to_string()),
            source_root: Some("http://example.com/css/".to_string()),
        });
        let output = recorder.finish().unwrap();

        let json: serde_json::Value = serde_json::from_str(&output.json).unwrap();
        assert_eq!(json["file"], "out.css");
        assert_eq!(json["sourceRoot"], "http://example.com/css/");
    }

    #[test]
    fn test_record_shifts_to_zero_based() {
        let mut recorder = MappingRecorder::new(&MapOptions::default());
        recorder
            .record(mapping((2, 3), (10, 5), "input.css"))
            .unwrap();
        assert_eq!(recorder.len(), 1);

        let output = recorder.finish().unwrap();
        let token = output.map.tokens().next().unwrap();
        assert_eq!(token.get_dst_line(), 1);
        assert_eq!(token.get_dst_col(), 2);
        assert_eq!(token.get_src_line(), 9);
        assert_eq!(token.get_src_col(), 4);
        assert_eq!(token.get_source(), Some("input.css"));
        assert_eq!(token.get_name(), None);
    }

    #[test]
    fn test_sources_deduplicated_in_first_seen_order() {
        let mut recorder = MappingRecorder::new(&MapOptions::default());
        recorder.record(mapping((1, 1), (1, 1), "b.css")).unwrap();
        recorder.record(mapping((2, 1), (4, 1), "a.css")).unwrap();
        recorder.record(mapping((3, 1), (9, 1), "b.css")).unwrap();

        let output = recorder.finish().unwrap();
        let json: serde_json::Value = serde_json::from_str(&output.json).unwrap();
        assert_eq!(json["sources"], serde_json::json!(["b.css", "a.css"]));
    }

    #[test]
    fn test_named_mapping() {
        let mut recorder = MappingRecorder::new(&MapOptions::default());
        recorder
            .record(Mapping {
                name: Some("button"),
                ..mapping((1, 1), (1, 1), "a.css")
            })
            .unwrap();
        recorder
            .record(Mapping {
                name: Some(""),
                ..mapping((2, 1), (2, 1), "a.css")
            })
            .unwrap();

        let output = recorder.finish().unwrap();
        assert_eq!(output.map.tokens().next().unwrap().get_name(), Some("button"));
        assert_eq!(output.map.tokens().nth(1).unwrap().get_name(), None);
    }

    #[test]
    fn test_zero_column_is_rejected() {
        let mut recorder = MappingRecorder::new(&MapOptions::default());
        let err = recorder
            .record(mapping((1, 1), (1, 0), "a.css"))
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidPosition { .. }));
        assert!(recorder.is_empty());
    }
}
