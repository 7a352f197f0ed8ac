//! Tree traversal emitting CSS text for each node kind.

use crate::writer::{Indent, Writer};
use crate::StringifyError;
use css_ast::{Charset, Comment, Declaration, Import, Keyframe, Keyframes, Media, Node, Rule};
use css_source_map::{LineCol, Mapping, MappingRecorder};

/// Source name used when neither the node nor the options name a file.
const UNKNOWN_SOURCE: &str = "?";

/// Walks a stylesheet in document order, driving the writer and recorder.
pub(crate) struct Visitor<'o> {
    writer: Writer,
    recorder: Option<MappingRecorder>,
    /// Fallback original file for rules whose position names none.
    original: Option<&'o str>,
}

impl<'o> Visitor<'o> {
    pub(crate) fn new(
        writer: Writer,
        recorder: Option<MappingRecorder>,
        original: Option<&'o str>,
    ) -> Self {
        Self {
            writer,
            recorder,
            original,
        }
    }

    pub(crate) fn finish(self) -> (Writer, Option<MappingRecorder>) {
        (self.writer, self.recorder)
    }

    /// Emits sibling nodes with a bare line break between consecutive ones
    /// and none after the last.
    fn each<T>(
        &mut self,
        items: &[T],
        mut emit: impl FnMut(&mut Self, &T) -> Result<(), StringifyError>,
    ) -> Result<(), StringifyError> {
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            emit(self, item)?;
            if i != last {
                self.writer.newline();
            }
        }
        Ok(())
    }

    pub(crate) fn nodes(&mut self, nodes: &[Node]) -> Result<(), StringifyError> {
        self.each(nodes, Self::visit)
    }

    fn visit(&mut self, node: &Node) -> Result<(), StringifyError> {
        tracing::trace!(kind = %node.kind(), line = self.writer.position().line, "visiting node");
        match node {
            Node::Comment(comment) => {
                self.comment(comment);
                Ok(())
            }
            Node::Charset(charset) => {
                self.charset(charset);
                Ok(())
            }
            Node::Keyframes(keyframes) => self.keyframes(keyframes),
            Node::Media(media) => self.media(media),
            Node::Import(import) => {
                self.import(import);
                Ok(())
            }
            Node::Rule(rule) => self.rule(rule),
        }
    }

    fn comment(&mut self, comment: &Comment) {
        if self.writer.is_compressed() {
            return;
        }
        self.writer
            .writeln(&format!("/*{}*/", comment.comment), Indent::Level);
        // The comment's own line breaks were copied verbatim.
        let newlines = comment.comment.matches('\n').count() as u32;
        self.writer.add_lines(newlines);
    }

    fn import(&mut self, import: &Import) {
        self.writer
            .write(&format!("@import {};", import.import), Indent::Level);
    }

    fn charset(&mut self, charset: &Charset) {
        self.writer
            .writeln(&format!("@charset {};", charset.charset), Indent::Level);
    }

    fn media(&mut self, media: &Media) -> Result<(), StringifyError> {
        self.writer
            .write(&format!("@media {}", media.media), Indent::Level);
        self.open_block();
        self.each(&media.rules, Self::visit)?;
        self.close_block();
        Ok(())
    }

    fn keyframes(&mut self, keyframes: &Keyframes) -> Result<(), StringifyError> {
        let vendor = keyframes.vendor.as_deref().unwrap_or("");
        self.writer.write(
            &format!("@{vendor}keyframes {}", keyframes.name),
            Indent::Level,
        );
        self.open_block();
        self.each(&keyframes.keyframes, |this, keyframe| {
            this.keyframe(keyframe);
            Ok(())
        })?;
        self.close_block();
        Ok(())
    }

    fn keyframe(&mut self, keyframe: &Keyframe) {
        self.writer.write(&keyframe.values.join(", "), Indent::Level);
        self.open_block();
        self.declarations(&keyframe.declarations);
        self.close_block();
    }

    fn rule(&mut self, rule: &Rule) -> Result<(), StringifyError> {
        let Some(last) = rule.selectors.len().checked_sub(1) else {
            return Err(StringifyError::EmptySelectors);
        };

        if let (Some(recorder), Some(position)) = (self.recorder.as_mut(), &rule.position) {
            // The selector starts after the indentation the next write adds.
            let generated = self
                .writer
                .position()
                .offset_column(self.writer.pending_indent_width());
            recorder.record(Mapping {
                generated,
                original: LineCol::new(position.start.line, position.start.column),
                source: position.file().or(self.original).unwrap_or(UNKNOWN_SOURCE),
                name: position.start.name.as_deref(),
            })?;
        }

        for (i, selector) in rule.selectors.iter().enumerate() {
            self.writer.write(selector, Indent::Level);
            if i == last {
                self.open_block();
            } else {
                self.writer.writeln(",", Indent::Level);
            }
        }

        self.declarations(&rule.declarations);
        self.close_block();
        Ok(())
    }

    /// Semicolons separate declarations; the last one has none.
    fn declarations(&mut self, declarations: &[Declaration]) {
        let last = declarations.len().saturating_sub(1);
        for (i, declaration) in declarations.iter().enumerate() {
            match declaration {
                Declaration::Comment(comment) => self.comment(comment),
                Declaration::Property(property) => {
                    self.writer
                        .write(&format!("{}:", property.property), Indent::Level);
                    self.writer.write(&property.value, Indent::Literal(" "));
                    if i != last {
                        self.writer.write(";", Indent::None);
                    }
                    self.writer.newline();
                }
            }
        }
    }

    fn open_block(&mut self) {
        self.writer.writeln("{", Indent::Literal(" "));
        self.writer.indent();
    }

    fn close_block(&mut self) {
        self.writer.dedent();
        self.writer.writeln("}", Indent::Level);
    }
}
