//! Output buffer with line/column/indentation bookkeeping.

use css_source_map::LineCol;

/// Default indentation unit.
pub const DEFAULT_INDENT: &str = "  ";

/// How a write is prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent<'a> {
    /// The indentation unit repeated `level - 1` times.
    Level,
    /// No prefix, even where one would normally apply.
    None,
    /// This exact prefix. An empty literal behaves like [`Indent::None`].
    Literal(&'a str),
}

/// Accumulates generated CSS and keeps the cursor in sync with it.
///
/// Lines and columns are 1-based. Columns count UTF-16 code units, the unit
/// source map consumers use.
#[derive(Debug, Clone)]
pub struct Writer {
    output: String,
    line: u32,
    column: u32,
    level: u32,
    unit: String,
    compress: bool,
}

impl Writer {
    /// Creates a writer using `unit` for each indentation level.
    ///
    /// In compression mode the unit is discarded: no prefixes and no line
    /// breaks are ever written.
    pub fn new(unit: &str, compress: bool) -> Self {
        Self {
            output: String::new(),
            line: 1,
            column: 1,
            level: 1,
            unit: if compress {
                String::new()
            } else {
                unit.to_string()
            },
            compress,
        }
    }

    /// Appends `text`, preceded by the prefix selected by `indent`.
    pub fn write(&mut self, text: &str, indent: Indent<'_>) {
        if !self.compress {
            match indent {
                Indent::Level => {
                    for _ in 1..self.level {
                        self.output.push_str(&self.unit);
                    }
                    self.column += self.pending_indent_width();
                }
                Indent::Literal(prefix) => {
                    self.output.push_str(prefix);
                    self.column += text_width(prefix);
                }
                Indent::None => {}
            }
        }
        self.output.push_str(text);
        self.column += text_width(text);
    }

    /// Appends `text` like [`Writer::write`], then a line break.
    pub fn writeln(&mut self, text: &str, indent: Indent<'_>) {
        self.write(text, indent);
        self.newline();
    }

    /// Appends a bare line break. Does nothing in compression mode.
    pub fn newline(&mut self) {
        if !self.compress {
            self.output.push('\n');
            self.line += 1;
            self.column = 1;
        }
    }

    /// Appends `text` without touching the cursor.
    ///
    /// Only for trailers written after the last position is read.
    pub fn push_trailer(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Accounts for line breaks that were written verbatim inside text.
    pub fn add_lines(&mut self, count: u32) {
        self.line += count;
    }

    /// Enters a nested block.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Leaves a nested block.
    pub fn dedent(&mut self) {
        debug_assert!(self.level > 1, "dedent below the top level");
        self.level = self.level.saturating_sub(1).max(1);
    }

    /// Width of the prefix [`Indent::Level`] writes at the current level.
    pub fn pending_indent_width(&self) -> u32 {
        (self.level - 1) * text_width(&self.unit)
    }

    /// The current cursor.
    #[inline]
    pub fn position(&self) -> LineCol {
        LineCol::new(self.line, self.column)
    }

    /// The current nesting level; 1 at the top level.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether compression mode is on.
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    /// The text written so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consumes the writer and returns the generated text.
    pub fn into_string(self) -> String {
        self.output
    }
}

fn text_width(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}
