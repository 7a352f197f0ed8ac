//! Line/column positions as tracked by the writer.

use crate::MappingError;

/// A line and column position (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column, counted in characters.
    pub column: u32,
}

impl Default for LineCol {
    fn default() -> Self {
        Self::START
    }
}

impl LineCol {
    /// The first character of a document.
    pub const START: LineCol = LineCol { line: 1, column: 1 };

    /// Creates a new line/column position.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns this position shifted right by `columns`.
    #[inline]
    pub fn offset_column(self, columns: u32) -> Self {
        Self {
            line: self.line,
            column: self.column + columns,
        }
    }

    /// Converts to the zero-based `(line, column)` pair used by source map
    /// tokens.
    ///
    /// Fails for line or column 0, which have no zero-based counterpart.
    pub fn to_zero_based(self) -> Result<(u32, u32), MappingError> {
        match (self.line.checked_sub(1), self.column.checked_sub(1)) {
            (Some(line), Some(column)) => Ok((line, column)),
            _ => Err(MappingError::InvalidPosition {
                line: self.line,
                column: self.column,
            }),
        }
    }
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
