//! Source location tracking for diagnostics.
//!
//! A [`Position`] follows the reader through the input: it counts lines,
//! pages (form feeds), lines within the current page and paragraphs
//! (U+2029), plus the column of the next character.

use std::fmt;
use std::sync::Arc;

/// Where a token or a diagnostic comes from.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// File name, shared between all the positions of one input.
    filename: Arc<str>,
    /// Page number (1-indexed), incremented by form feeds.
    page: u32,
    /// Line within the current page (1-indexed).
    page_line: u32,
    /// Paragraph number (1-indexed), incremented by U+2029.
    paragraph: u32,
    /// Line number (1-indexed).
    line: u32,
    /// Column of the next character (1-indexed, in code points).
    column: u32,
}

impl Position {
    /// Create a position at the start of `filename`.
    pub fn new(filename: impl Into<Arc<str>>) -> Self {
        Self {
            filename: filename.into(),
            page: 1,
            page_line: 1,
            paragraph: 1,
            line: 1,
            column: 1,
        }
    }

    /// Reset all the counters, keeping the file name.
    pub fn reset_counters(&mut self, line: u32) {
        self.page = 1;
        self.page_line = 1;
        self.paragraph = 1;
        self.line = line;
        self.column = 1;
    }

    pub fn set_filename(&mut self, filename: impl Into<Arc<str>>) {
        self.filename = filename.into();
    }

    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[inline]
    pub fn page_line(&self) -> u32 {
        self.page_line
    }

    #[inline]
    pub fn paragraph(&self) -> u32 {
        self.paragraph
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// A form feed was read: start a new page.
    pub fn new_page(&mut self) {
        self.page += 1;
        self.page_line = 1;
        self.paragraph = 1;
        self.column = 1;
    }

    /// A paragraph separator was read.
    pub fn new_paragraph(&mut self) {
        self.paragraph += 1;
        self.column = 1;
    }

    /// A line terminator was read.
    pub fn new_line(&mut self) {
        self.line += 1;
        self.page_line += 1;
        self.column = 1;
    }

    /// Any other character was read.
    #[inline]
    pub fn new_column(&mut self) {
        self.column += 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filename.is_empty() {
            write!(f, "line {}", self.line)
        } else {
            write!(f, "{}:{}", self.filename, self.line)
        }
    }
}
