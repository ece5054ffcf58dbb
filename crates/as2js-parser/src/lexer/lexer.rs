//! Main lexer implementation.
//!
//! The [`Lexer`] pulls code points from an [`Input`] and turns them into
//! token nodes allocated in a [`Tree`]. Literal tokens carry their decoded
//! value; every other token only carries its type and position.
//!
//! Lexical errors never stop the scan. They are collected and the lexer
//! substitutes a placeholder or skips the offending character.

use std::collections::VecDeque;

use as2js_core::{Diagnostic, ErrorCode, Options, Position};
use log::trace;

use super::char_class::{CharClass, char_class};
use super::keyword::lookup_keyword;
use crate::input::Input;
use crate::node::{NodeId, NodeResult, NodeType, Tree, Value};

/// How many characters can be pushed back while keeping their positions.
const HISTORY_DEPTH: usize = 4;

/// A token before it is turned into a node.
struct Scanned {
    node_type: NodeType,
    position: Position,
    value: Value,
}

impl Scanned {
    fn new(node_type: NodeType, position: Position) -> Self {
        Self::with_value(node_type, position, Value::None)
    }

    fn with_value(node_type: NodeType, position: Position, value: Value) -> Self {
        Self {
            node_type,
            position,
            value,
        }
    }
}

/// Result of decoding a backslash sequence.
enum Escaped {
    Char(u32),
    /// Backslash followed by a line terminator; contributes nothing.
    Continuation,
    /// Already reported.
    Invalid,
}

/// Lexer for as2js source.
pub struct Lexer<I> {
    input: I,
    options: Options,
    /// Characters pushed back by the lexer, last in first out.
    pushback: Vec<u32>,
    /// Recently read characters with the position preceding each of them.
    history: VecDeque<(u32, Position)>,
    /// Class of the last character returned by `getc`.
    char_class: CharClass,
    /// Type of the last token returned, used to tell `/` from a
    /// regular expression.
    last_token: NodeType,
    messages: Vec<Diagnostic>,
}

impl<I: Input> Lexer<I> {
    pub fn new(input: I, options: Options) -> Self {
        Self {
            input,
            options,
            pushback: Vec::new(),
            history: VecDeque::with_capacity(HISTORY_DEPTH),
            char_class: CharClass::empty(),
            last_token: NodeType::Unknown,
            messages: Vec::new(),
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Replace the options; takes effect with the next token.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> &Position {
        self.input.position()
    }

    /// Take accumulated messages, leaving an empty vec.
    pub fn take_messages(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.messages)
    }

    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Read the next token and allocate its node in `tree`.
    ///
    /// Once the input is exhausted every call returns a new EOF node.
    pub fn next_token(&mut self, tree: &mut Tree) -> NodeId {
        #[cfg(feature = "profiling")]
        profiling::scope!("Lexer::next_token");

        let scanned = self.scan_token();
        self.last_token = scanned.node_type;
        trace!(
            "token {} {} at {:?}",
            scanned.node_type, scanned.value, scanned.position
        );
        let id = tree.create(scanned.node_type, scanned.position);
        if let Err(err) = Self::store_value(tree, id, scanned.value) {
            self.messages.push(Diagnostic::fatal(
                ErrorCode::InternalError,
                self.input.position().clone(),
                err.to_string(),
            ));
        }
        id
    }

    fn store_value(tree: &mut Tree, id: NodeId, value: Value) -> NodeResult<()> {
        match value {
            Value::None => Ok(()),
            Value::Int64(v) => tree.set_int64(id, v),
            Value::Float64(v) => tree.set_float64(id, v),
            Value::String(s) => tree.set_string(id, s),
        }
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.messages.push(Diagnostic::error(
            code,
            self.input.position().clone(),
            message,
        ));
    }

    // =========================================
    // Internal: Character reading
    // =========================================

    /// Read one character, normalizing line terminators and advancing the
    /// position. `\r\n` and `\n\r` pairs come back as a single `\n`.
    fn getc(&mut self) -> Option<u32> {
        let before = self.input.position().clone();
        let replayed = !self.pushback.is_empty();
        let c = match self.pushback.pop() {
            Some(c) => c,
            None => match self.input.get_code_point() {
                Some(c) => c,
                None => {
                    self.char_class = CharClass::empty();
                    return None;
                }
            },
        };
        self.char_class = char_class(c);

        let c = match c {
            0x0A | 0x0D => {
                self.input.position_mut().new_line();
                // a replayed character already absorbed its pair
                if !replayed {
                    self.consume_raw(if c == 0x0A { 0x0D } else { 0x0A });
                }
                0x0A
            }
            0x0C => {
                self.input.position_mut().new_page();
                c
            }
            0x2028 => {
                self.input.position_mut().new_line();
                c
            }
            0x2029 => {
                self.input.position_mut().new_paragraph();
                c
            }
            _ => {
                self.input.position_mut().new_column();
                c
            }
        };

        if self.history.len() == HISTORY_DEPTH {
            self.history.pop_front();
        }
        self.history.push_back((c, before));
        Some(c)
    }

    /// Consume the next raw character from the input if it is `expected`.
    fn consume_raw(&mut self, expected: u32) -> bool {
        match self.input.get_code_point() {
            Some(c) if c == expected => true,
            Some(c) => {
                self.input.unget_code_point(c);
                false
            }
            None => false,
        }
    }

    /// Push back the last character read, rewinding the position.
    fn ungetc(&mut self, c: Option<u32>) {
        let Some(c) = c else {
            return;
        };
        if let Some((last, before)) = self.history.pop_back() {
            if last == c {
                *self.input.position_mut() = before;
            }
        }
        self.pushback.push(c);
    }

    /// Consume the next character if it is `expected`.
    fn next_is(&mut self, expected: char) -> bool {
        let c = self.getc();
        if c == Some(expected as u32) {
            true
        } else {
            self.ungetc(c);
            false
        }
    }

    fn is_set(&self, option: Options) -> bool {
        self.options.contains(option)
    }

    // =========================================
    // Internal: Token scanning
    // =========================================

    fn scan_token(&mut self) -> Scanned {
        loop {
            let position = self.input.position().clone();
            let Some(c) = self.getc() else {
                return Scanned::new(NodeType::Eof, position);
            };
            if self.char_class.contains(CharClass::INVALID) {
                self.error(
                    ErrorCode::InvalidCharacter,
                    format!("invalid character '\\U{:08X}' found", c),
                );
                continue;
            }
            if self
                .char_class
                .intersects(CharClass::WHITE_SPACE | CharClass::LINE_TERMINATOR)
            {
                continue;
            }
            if self.char_class.contains(CharClass::LETTER) {
                return self.read_identifier(c, position);
            }
            if self.char_class.contains(CharClass::DIGIT) {
                return self.read_number(c, position);
            }
            if c == '\\' as u32 {
                // an identifier may start with an escaped letter
                if let Some(first) = self.identifier_escape(CharClass::LETTER) {
                    return self.read_identifier(first, position);
                }
                continue;
            }
            if let Some(scanned) = self.read_punctuation(c, position) {
                return scanned;
            }
        }
    }

    /// Operators, brackets, strings and comments. Returns `None` when the
    /// characters produced no token.
    fn read_punctuation(&mut self, c: u32, position: Position) -> Option<Scanned> {
        use NodeType::*;

        let extended = self.is_set(Options::EXTENDED_OPERATORS);
        let node_type = match char::from_u32(c).unwrap_or('\0') {
            '"' | '\'' => return Some(self.read_string(c, String, position)),
            '`' => return Some(self.read_string(c, RegularExpression, position)),

            '<' => {
                if self.next_is('<') {
                    if self.next_is('=') { AssignmentShiftLeft } else { ShiftLeft }
                } else if self.next_is('=') {
                    if extended && self.next_is('>') { Compare } else { LessEqual }
                } else if extended && self.next_is('>') {
                    NotEqual
                } else if extended && self.next_is('?') {
                    if self.next_is('=') { AssignmentMinimum } else { Minimum }
                } else if extended && self.next_is('!') {
                    if self.next_is('=') { AssignmentRotateLeft } else { RotateLeft }
                } else {
                    Less
                }
            }
            '>' => {
                if self.next_is('>') {
                    if self.next_is('>') {
                        if self.next_is('=') { AssignmentShiftRightUnsigned } else { ShiftRightUnsigned }
                    } else if self.next_is('=') {
                        AssignmentShiftRight
                    } else {
                        ShiftRight
                    }
                } else if self.next_is('=') {
                    GreaterEqual
                } else if extended && self.next_is('?') {
                    if self.next_is('=') { AssignmentMaximum } else { Maximum }
                } else if extended && self.next_is('!') {
                    if self.next_is('=') { AssignmentRotateRight } else { RotateRight }
                } else {
                    Greater
                }
            }
            '!' => {
                if self.next_is('=') {
                    if self.next_is('=') { StrictlyNotEqual } else { NotEqual }
                } else if extended && self.next_is('~') {
                    NotMatch
                } else {
                    LogicalNot
                }
            }
            '=' => {
                if self.next_is('=') {
                    if self.next_is('=') { StrictlyEqual } else { Equal }
                } else {
                    Assignment
                }
            }
            ':' => {
                if extended && self.next_is('=') {
                    Assignment
                } else if self.next_is(':') {
                    Scope
                } else {
                    Colon
                }
            }
            '~' => {
                if extended && self.next_is('=') {
                    Match
                } else if extended && self.next_is('~') {
                    SmartMatch
                } else {
                    BitwiseNot
                }
            }
            '+' => {
                if self.next_is('=') {
                    AssignmentAdd
                } else if self.next_is('+') {
                    Increment
                } else {
                    Add
                }
            }
            '-' => {
                if self.next_is('=') {
                    AssignmentSubtract
                } else if self.next_is('-') {
                    Decrement
                } else {
                    Subtract
                }
            }
            '*' => {
                if self.next_is('=') {
                    AssignmentMultiply
                } else if extended && self.next_is('*') {
                    if self.next_is('=') { AssignmentPower } else { Power }
                } else {
                    Multiply
                }
            }
            '/' => {
                if self.next_is('/') {
                    self.skip_line_comment();
                    return None;
                } else if self.next_is('*') {
                    self.skip_block_comment();
                    return None;
                } else if let Some(regexp) = self.read_slash_regexp(&position) {
                    return Some(regexp);
                } else if self.next_is('=') {
                    AssignmentDivide
                } else {
                    Divide
                }
            }
            '%' => {
                if self.next_is('=') { AssignmentModulo } else { Modulo }
            }
            '?' => Conditional,
            '&' => {
                if self.next_is('=') {
                    AssignmentBitwiseAnd
                } else if self.next_is('&') {
                    if self.next_is('=') { AssignmentLogicalAnd } else { LogicalAnd }
                } else {
                    BitwiseAnd
                }
            }
            '^' => {
                if self.next_is('=') {
                    AssignmentBitwiseXor
                } else if self.next_is('^') {
                    if self.next_is('=') { AssignmentLogicalXor } else { LogicalXor }
                } else {
                    BitwiseXor
                }
            }
            '|' => {
                if self.next_is('=') {
                    AssignmentBitwiseOr
                } else if self.next_is('|') {
                    if self.next_is('=') { AssignmentLogicalOr } else { LogicalOr }
                } else {
                    BitwiseOr
                }
            }
            '.' => {
                let next = self.getc();
                if next.is_some_and(is_decimal_digit) {
                    self.ungetc(next);
                    return Some(self.read_decimal("0.".to_string(), true, position));
                }
                self.ungetc(next);
                if self.next_is('.') {
                    if self.next_is('.') { Rest } else { Range }
                } else {
                    Member
                }
            }
            '[' => OpenSquareBracket,
            ']' => CloseSquareBracket,
            '{' => OpenCurvlyBracket,
            '}' => CloseCurvlyBracket,
            '(' => OpenParenthesis,
            ')' => CloseParenthesis,
            ';' => Semicolon,
            ',' => Comma,
            _ => {
                let message = if c > 0x20 && c < 0x7F {
                    format!("unexpected punctuation '{}'", char::from_u32(c).unwrap_or('?'))
                } else {
                    format!("unexpected punctuation '\\U{:08X}'", c)
                };
                self.error(ErrorCode::UnexpectedPunctuation, message);
                return None;
            }
        };
        Some(Scanned::new(node_type, position))
    }

    fn skip_line_comment(&mut self) {
        while self.getc().is_some() {
            if self.char_class.contains(CharClass::LINE_TERMINATOR) {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        loop {
            match self.getc() {
                None => {
                    self.error(
                        ErrorCode::UnterminatedComment,
                        "the last comment was not closed before the end of the input was reached",
                    );
                    return;
                }
                Some(0x2A) => {
                    while self.next_is('*') {}
                    if self.next_is('/') {
                        return;
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Push back a run of characters and restore the position held before
    /// the first of them was read.
    fn rewind(&mut self, read: Vec<u32>, start: Position) {
        self.pushback.extend(read.into_iter().rev());
        self.history.clear();
        *self.input.position_mut() = start;
    }

    // =========================================
    // Internal: Regular expressions
    // =========================================

    /// A `/` opens a regular expression only where the previous token
    /// cannot end an operand.
    fn regexp_allowed(&self) -> bool {
        use NodeType::*;
        !matches!(
            self.last_token,
            Identifier
                | Int64
                | Float64
                | String
                | RegularExpression
                | True
                | False
                | Null
                | Undefined
                | This
                | Super
                | CloseParenthesis
                | CloseSquareBracket
                | Increment
                | Decrement
        )
    }

    /// `/pattern/flags` on a single line, the opening `/` already read.
    ///
    /// When no closing `/` shows up before the end of the line, every
    /// character is pushed back and `None` is returned.
    fn read_slash_regexp(&mut self, position: &Position) -> Option<Scanned> {
        if !self.regexp_allowed() {
            return None;
        }
        let start = self.input.position().clone();
        let mut read = Vec::new();
        let mut escaped = false;
        loop {
            let Some(c) = self.getc() else {
                self.rewind(read, start);
                return None;
            };
            if self.char_class.contains(CharClass::LINE_TERMINATOR) {
                read.push(c);
                self.rewind(read, start);
                return None;
            }
            if c == '/' as u32 && !escaped {
                break;
            }
            escaped = c == '\\' as u32 && !escaped;
            read.push(c);
        }

        let mut text = String::from("/");
        for c in read {
            if !char_class(c).contains(CharClass::INVALID) {
                push_code_point(&mut text, c);
            }
        }
        text.push('/');
        loop {
            let next = self.getc();
            match next {
                Some(c) if self.char_class.intersects(CharClass::LETTER | CharClass::DIGIT) => {
                    push_code_point(&mut text, c);
                }
                _ => {
                    self.ungetc(next);
                    break;
                }
            }
        }
        Some(Scanned::with_value(
            NodeType::RegularExpression,
            position.clone(),
            Value::String(text),
        ))
    }

    // =========================================
    // Internal: Identifiers
    // =========================================

    fn read_identifier(&mut self, first: u32, position: Position) -> Scanned {
        let mut text = String::new();
        push_code_point(&mut text, first);
        loop {
            let next = self.getc();
            match next {
                Some(0x5C) => match self.identifier_escape(CharClass::LETTER | CharClass::DIGIT) {
                    Some(c) => push_code_point(&mut text, c),
                    None => break,
                },
                Some(c) if self.char_class.intersects(CharClass::LETTER | CharClass::DIGIT) => {
                    push_code_point(&mut text, c);
                }
                _ => {
                    self.ungetc(next);
                    break;
                }
            }
        }

        match text.as_str() {
            "Infinity" => {
                Scanned::with_value(NodeType::Float64, position, Value::Float64(f64::INFINITY))
            }
            "NaN" => Scanned::with_value(NodeType::Float64, position, Value::Float64(f64::NAN)),
            "__FILE__" => {
                let filename = position.filename().to_string();
                Scanned::with_value(NodeType::String, position, Value::String(filename))
            }
            "__LINE__" => {
                let line = i64::from(position.line());
                Scanned::with_value(NodeType::Int64, position, Value::Int64(line))
            }
            _ => match lookup_keyword(&text, self.options) {
                Some(keyword) => Scanned::new(keyword, position),
                None => Scanned::with_value(NodeType::Identifier, position, Value::String(text)),
            },
        }
    }

    /// Decode a backslash sequence inside an identifier. The character it
    /// names must still belong to `allowed`.
    fn identifier_escape(&mut self, allowed: CharClass) -> Option<u32> {
        match self.escape_sequence(false) {
            Escaped::Char(c) if char_class(c).intersects(allowed) => Some(c),
            Escaped::Char(c) => {
                self.error(
                    ErrorCode::InvalidCharacter,
                    format!("escaped character '\\U{:08X}' cannot be part of an identifier", c),
                );
                None
            }
            Escaped::Continuation | Escaped::Invalid => None,
        }
    }

    // =========================================
    // Internal: Numbers
    // =========================================

    fn read_number(&mut self, first: u32, position: Position) -> Scanned {
        if first == '0' as u32 {
            let next = self.getc();
            match next.and_then(char::from_u32) {
                Some('x' | 'X') => return self.read_radix_number(16, position),
                Some('0'..='7') if self.is_set(Options::OCTAL) => {
                    self.ungetc(next);
                    return self.read_radix_number(8, position);
                }
                _ => self.ungetc(next),
            }
        }
        let mut text = String::new();
        push_code_point(&mut text, first);
        self.read_digits(&mut text);
        self.read_decimal(text, false, position)
    }

    /// Hexadecimal or octal integer, kept as a 64-bit pattern.
    ///
    /// At most 16 hexadecimal or 22 octal digits are accepted; a longer
    /// run is reported and the value saturates.
    fn read_radix_number(&mut self, radix: u32, position: Position) -> Scanned {
        let max_digits = if radix == 16 { 16 } else { 22 };
        let mut value: u64 = 0;
        let mut digits = 0;
        let mut overflow = false;
        loop {
            let next = self.getc();
            let Some(digit) = next.and_then(char::from_u32).and_then(|c| c.to_digit(radix)) else {
                self.ungetc(next);
                break;
            };
            digits += 1;
            match value
                .checked_mul(u64::from(radix))
                .and_then(|v| v.checked_add(u64::from(digit)))
            {
                Some(v) => value = v,
                None => overflow = true,
            }
        }

        let kind = if radix == 16 { "hexadecimal" } else { "octal" };
        if digits == 0 {
            self.error(ErrorCode::InvalidNumber, format!("{} number without digits", kind));
        } else if digits > max_digits {
            self.error(
                ErrorCode::InvalidNumber,
                format!("{} number has more than {} digits", kind, max_digits),
            );
            value = u64::MAX;
        } else if overflow {
            self.error(
                ErrorCode::InvalidNumber,
                format!("{} number does not fit in 64 bits", kind),
            );
            value = u64::MAX;
        }
        Scanned::with_value(NodeType::Int64, position, Value::Int64(value as i64))
    }

    fn read_digits(&mut self, text: &mut String) {
        loop {
            let next = self.getc();
            match next {
                Some(c) if is_decimal_digit(c) => push_code_point(text, c),
                _ => {
                    self.ungetc(next);
                    return;
                }
            }
        }
    }

    /// The rest of a decimal literal: fraction and exponent.
    fn read_decimal(&mut self, mut text: String, has_point: bool, position: Position) -> Scanned {
        let mut is_float = has_point;
        if has_point {
            self.read_digits(&mut text);
        } else {
            let dot = self.getc();
            if dot == Some('.' as u32) {
                // `1..5` is a range, not `1.` followed by `.5`
                let after = self.getc();
                if after == Some('.' as u32) {
                    self.ungetc(after);
                    self.ungetc(dot);
                } else {
                    self.ungetc(after);
                    text.push('.');
                    is_float = true;
                    self.read_digits(&mut text);
                }
            } else {
                self.ungetc(dot);
            }
        }

        let e = self.getc();
        if matches!(e.and_then(char::from_u32), Some('e' | 'E')) {
            let sign = self.getc();
            let (sign, digit) = match sign.and_then(char::from_u32) {
                Some(s @ ('+' | '-')) => (Some(s), self.getc()),
                _ => (None, sign),
            };
            if digit.is_some_and(is_decimal_digit) {
                is_float = true;
                text.push('e');
                if let Some(s) = sign {
                    text.push(s);
                }
                if let Some(d) = digit {
                    push_code_point(&mut text, d);
                }
                self.read_digits(&mut text);
            } else {
                self.ungetc(digit);
                if let Some(s) = sign {
                    self.ungetc(Some(s as u32));
                }
                self.ungetc(e);
            }
        } else {
            self.ungetc(e);
        }

        if is_float {
            let value = match text.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    self.error(ErrorCode::InvalidNumber, format!("invalid number '{}'", text));
                    f64::NAN
                }
            };
            Scanned::with_value(NodeType::Float64, position, Value::Float64(value))
        } else {
            let value = match text.parse::<i64>() {
                Ok(value) => value,
                Err(_) => {
                    self.error(
                        ErrorCode::InvalidNumber,
                        format!("decimal number '{}' does not fit in 64 bits", text),
                    );
                    i64::MAX
                }
            };
            Scanned::with_value(NodeType::Int64, position, Value::Int64(value))
        }
    }

    // =========================================
    // Internal: Strings
    // =========================================

    fn read_string(&mut self, quote: u32, node_type: NodeType, position: Position) -> Scanned {
        let mut text = String::new();
        loop {
            let Some(c) = self.getc() else {
                self.error(
                    ErrorCode::UnterminatedString,
                    "the last string was not closed before the end of the input was reached",
                );
                break;
            };
            if c == quote {
                break;
            }
            if self.char_class.contains(CharClass::LINE_TERMINATOR) {
                self.error(
                    ErrorCode::UnterminatedString,
                    "a string cannot include a line terminator",
                );
                break;
            }
            if c != '\\' as u32 {
                push_code_point(&mut text, c);
                continue;
            }
            match self.escape_sequence(quote != '`' as u32) {
                Escaped::Char(c) => push_code_point(&mut text, c),
                Escaped::Continuation => {}
                Escaped::Invalid => text.push('?'),
            }
        }
        Scanned::with_value(node_type, position, Value::String(text))
    }

    /// Decode what follows a backslash.
    ///
    /// `\U`, `\e` and octal escapes other than `\0` need
    /// `EXTENDED_ESCAPE_SEQUENCES`. A backslash before a line terminator
    /// continues the string on the next line when `accept_continuation` is
    /// set.
    fn escape_sequence(&mut self, accept_continuation: bool) -> Escaped {
        let Some(c) = self.getc() else {
            self.error(
                ErrorCode::UnknownEscapeSequence,
                "a backslash cannot be the last character of the input",
            );
            return Escaped::Invalid;
        };
        let extended = self.is_set(Options::EXTENDED_ESCAPE_SEQUENCES);
        let decoded = match char::from_u32(c) {
            Some('u') => return self.read_hex_escape(4),
            Some('U') if extended => return self.read_hex_escape(8),
            Some('x' | 'X') => return self.read_hex_escape(2),
            Some('\'' | '"' | '\\') => Some(c),
            Some('b') => Some(0x08),
            Some('f') => Some(0x0C),
            Some('n') => Some(0x0A),
            Some('r') => Some(0x0D),
            Some('t') => Some(0x09),
            Some('v') => Some(0x0B),
            Some('e') if extended => Some(0x1B),
            Some('0'..='7') if extended => Some(self.read_octal_escape(c)),
            Some('0') => Some(0),
            _ if self.char_class.contains(CharClass::LINE_TERMINATOR) => {
                if accept_continuation {
                    return Escaped::Continuation;
                }
                // the terminator still ends the token
                self.ungetc(Some(c));
                None
            }
            _ => None,
        };
        match decoded {
            Some(c) => Escaped::Char(c),
            None => {
                let message = if c > 0x20 && c < 0x7F {
                    format!("unknown escape letter '{}'", char::from_u32(c).unwrap_or('?'))
                } else {
                    format!("unknown escape letter '\\U{:08X}'", c)
                };
                self.error(ErrorCode::UnknownEscapeSequence, message);
                Escaped::Invalid
            }
        }
    }

    fn read_hex_escape(&mut self, max: usize) -> Escaped {
        let mut value = 0u32;
        let mut digits = 0;
        while digits < max {
            let next = self.getc();
            let Some(digit) = next.and_then(char::from_u32).and_then(|c| c.to_digit(16)) else {
                self.ungetc(next);
                break;
            };
            value = value * 16 + digit;
            digits += 1;
        }
        if digits < max {
            self.error(
                ErrorCode::InvalidUnicodeEscapeSequence,
                format!(
                    "invalid unicode (\\[xXuU]##) escape sequence, {} hexadecimal digits expected",
                    max
                ),
            );
            return Escaped::Invalid;
        }
        if char::from_u32(value).is_none() {
            self.error(
                ErrorCode::InvalidUnicodeEscapeSequence,
                format!("escape sequence \\U{:08X} is not a valid code point", value),
            );
            return Escaped::Invalid;
        }
        Escaped::Char(value)
    }

    /// Up to three octal digits, the first one already read.
    fn read_octal_escape(&mut self, first: u32) -> u32 {
        let mut value = first - '0' as u32;
        for _ in 1..3 {
            let next = self.getc();
            match next.and_then(char::from_u32) {
                Some(d @ '0'..='7') => value = value * 8 + (d as u32 - '0' as u32),
                _ => {
                    self.ungetc(next);
                    break;
                }
            }
        }
        value
    }
}

fn is_decimal_digit(c: u32) -> bool {
    (0x30..=0x39).contains(&c)
}

fn push_code_point(text: &mut String, c: u32) {
    text.push(char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER));
}
