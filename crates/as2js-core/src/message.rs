//! Diagnostics emitted by the lexer and the parser.
//!
//! The front end never stops because of a diagnostic: it hands each one to a
//! [`MessageSink`] and keeps going. [`Diagnostics`] is the default sink, a
//! plain collection that also forwards every message to the `log` facade.

use std::fmt;

use log::{error, warn};

use crate::Position;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Suspicious input that is still accepted as written.
    Warning,
    /// A recoverable problem in the source.
    Error,
    /// An internal-consistency failure in the front end itself.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Identifies the kind of problem a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================
    // Lexical
    // =========================================
    /// A code point that may not appear in source text.
    InvalidCharacter,
    /// `\u`, `\U` or `\x` without enough hexadecimal digits.
    InvalidUnicodeEscapeSequence,
    /// An escape letter that is not recognized.
    UnknownEscapeSequence,
    /// A string reached a line terminator or the end of the input.
    UnterminatedString,
    /// A `/* ... */` comment reached the end of the input.
    UnterminatedComment,
    /// Punctuation that does not start any token.
    UnexpectedPunctuation,
    /// A numeric literal that does not fit its representation.
    InvalidNumber,

    // =========================================
    // Syntax
    // =========================================
    /// The input ended in the middle of a construct.
    UnexpectedEof,
    InvalidAttributes,
    InvalidOperator,
    InvalidKeyword,
    InvalidExpression,
    InvalidConditional,
    InvalidField,
    InvalidRest,
    InvalidLabel,
    InvalidGoto,
    InvalidDo,
    InvalidCatch,
    InvalidFunction,
    InvalidImport,
    InvalidParameters,
    InvalidClass,
    InvalidEnum,
    InvalidPackageName,
    InvalidNamespace,
    InvalidVariable,
    InvalidScope,
    CaseLabel,
    DefaultLabel,
    ColonExpected,
    CommaExpected,
    SemicolonExpected,
    ParenthesisExpected,
    SquareBracketsExpected,
    CurvlyBracketsExpected,
    /// An extension was used without the option that enables it.
    NotAllowed,
    /// A statement that only works in non-strict mode.
    NotAllowedInStrictMode,

    // =========================================
    // Pragmas
    // =========================================
    BadPragma,
    IncompatiblePragmaArgument,
    PragmaFailed,

    // =========================================
    // Internal
    // =========================================
    /// A node-model contract violation caught while parsing.
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One message handed to a [`MessageSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            position,
            message: message.into(),
        }
    }

    /// Shorthand for a recoverable error.
    pub fn error(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, position, message)
    }

    pub fn warning(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, position, message)
    }

    /// Shorthand for an internal-consistency failure.
    pub fn fatal(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, code, position, message)
    }

    /// Format the diagnostic with the offending source line underneath.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = format!("{}\n", self);
        let line = self.position.line();
        if let Some(text) = source.lines().nth(line.saturating_sub(1) as usize) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, text));
            let indent = " ".repeat(self.position.column().saturating_sub(1) as usize);
            output.push_str(&format!("  | {}^\n", indent));
        }
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]: {}",
            self.position, self.severity, self.code, self.message
        )
    }
}

/// Receiver of diagnostics.
///
/// Implementations must not expect the caller to react to a report; the
/// lexer and the parser always carry on afterward.
pub trait MessageSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A sink that keeps every diagnostic it receives.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.messages.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.messages.iter()
    }

    /// Number of diagnostics carrying `code`.
    pub fn count(&self, code: ErrorCode) -> usize {
        self.messages.iter().filter(|d| d.code == code).count()
    }

    /// Whether any diagnostic is an error or worse.
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.severity >= Severity::Error)
    }

    /// Whether any diagnostic is fatal.
    pub fn has_fatal(&self) -> bool {
        self.messages.iter().any(|d| d.severity == Severity::Fatal)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.messages
    }
}

impl MessageSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Fatal => error!("{}", diagnostic),
            Severity::Error | Severity::Warning => warn!("{}", diagnostic),
        }
        self.push(diagnostic);
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            messages: vec![diagnostic],
        }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::new("test.js")
    }

    #[test]
    fn diagnostics_collects_in_order() {
        let mut sink = Diagnostics::new();
        sink.report(Diagnostic::error(ErrorCode::SemicolonExpected, pos(), "';' was expected"));
        sink.report(Diagnostic::error(ErrorCode::InvalidOperator, pos(), "unexpected operator"));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages()[0].code, ErrorCode::SemicolonExpected);
        assert_eq!(sink.count(ErrorCode::InvalidOperator), 1);
        assert!(sink.has_errors());
        assert!(!sink.has_fatal());
    }

    #[test]
    fn diagnostics_warning_is_not_an_error() {
        let sink: Diagnostics = std::iter::once(Diagnostic::new(
            Severity::Warning,
            ErrorCode::UnexpectedPunctuation,
            pos(),
            "',' unexpected without a name",
        ))
        .collect();
        assert!(!sink.has_errors());
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::fatal(ErrorCode::InternalError, pos(), "node is locked");
        assert_eq!(d.to_string(), "test.js:1: fatal [InternalError]: node is locked");
    }

    #[test]
    fn diagnostic_display_with_source() {
        let d = Diagnostic::error(ErrorCode::UnterminatedString, pos(), "string not closed");
        let out = d.display_with_source("\"abc");
        assert!(out.contains("  1 | \"abc"));
        assert!(out.ends_with("  | ^\n"));
    }
}
