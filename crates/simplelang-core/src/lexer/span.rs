//! Source location tracking for the simplelang lexer

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for spans; files > 4GB are unsupported

use std::ops::Range;

/// A row/column position in source text
///
/// Both fields are 0-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Location {
    /// 0-indexed line number
    pub row: u32,
    /// 0-indexed column number (in characters)
    pub column: u32,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.column + 1)
    }
}

/// A span representing a range in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the start of the span
    pub start: u32,
    /// Byte offset of the end of the span (exclusive)
    pub end: u32,
    /// Row/column of the first character
    pub start_loc: Location,
    /// Row/column just past the last character
    pub end_loc: Location,
}

impl Span {
    /// Create a new span from byte offsets and their locations
    #[must_use]
    pub const fn new(start: u32, end: u32, start_loc: Location, end_loc: Location) -> Self {
        Self {
            start,
            end,
            start_loc,
            end_loc,
        }
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a span that encompasses both self and other
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        let (start, start_loc) = if self.start <= other.start {
            (self.start, self.start_loc)
        } else {
            (other.start, other.start_loc)
        };
        let (end, end_loc) = if self.end >= other.end {
            (self.end, self.end_loc)
        } else {
            (other.end, other.end_loc)
        };
        Self {
            start,
            end,
            start_loc,
            end_loc,
        }
    }

    /// Create a dummy span for errors that have no source position
    #[must_use]
    pub const fn dummy() -> Self {
        Self {
            start: u32::MAX,
            end: u32::MAX,
            start_loc: Location::new(u32::MAX, u32::MAX),
            end_loc: Location::new(u32::MAX, u32::MAX),
        }
    }

    /// Check if this is a dummy span
    #[must_use]
    pub const fn is_dummy(&self) -> bool {
        self.start == u32::MAX && self.end == u32::MAX
    }

    /// Convert to a Range<usize> for slicing
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_dummy() {
            return write!(f, "<unknown>");
        }
        write!(f, "{}", self.start_loc)
    }
}

/// Running byte/row/column cursor used while scanning
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Cursor {
    pub(crate) offset: usize,
    pub(crate) location: Location,
}

impl Cursor {
    /// Advance past one character; a line feed moves to the next row
    pub(crate) fn bump(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.location.row += 1;
            self.location.column = 0;
        } else {
            self.location.column += 1;
        }
    }

    /// Advance past every character of `text`
    pub(crate) fn bump_str(&mut self, text: &str) {
        for c in text.chars() {
            self.bump(c);
        }
    }

    /// Span from `start` up to the current position
    pub(crate) fn span_from(&self, start: Cursor) -> Span {
        Span::new(
            start.offset as u32,
            self.offset as u32,
            start.location,
            self.location,
        )
    }
}
