//! Code point sources for the lexer.
//!
//! Decoding bytes into code points happens before this layer. An [`Input`]
//! hands out code points one at a time and owns the [`Position`] the lexer
//! advances while it reads.

use std::collections::VecDeque;

use as2js_core::Position;

/// A stream of Unicode code points.
///
/// Code points are plain `u32` so that lone surrogates and other invalid
/// values can reach the lexer, which reports them.
pub trait Input {
    /// Next code point, or `None` at the end of the input.
    fn get_code_point(&mut self) -> Option<u32>;

    /// Push a code point back; it is returned by the next
    /// [`get_code_point`](Input::get_code_point) call.
    fn unget_code_point(&mut self, code_point: u32);

    fn position(&self) -> &Position;

    fn position_mut(&mut self) -> &mut Position;
}

/// An [`Input`] reading from an in-memory sequence of code points.
#[derive(Debug, Clone)]
pub struct StringInput {
    code_points: Vec<u32>,
    cursor: usize,
    pushback: VecDeque<u32>,
    position: Position,
}

impl StringInput {
    pub fn new(source: &str) -> Self {
        Self::from_code_points(source.chars().map(u32::from))
    }

    /// Build an input from raw code points, which may include values a
    /// `str` cannot hold such as lone surrogates.
    pub fn from_code_points(code_points: impl IntoIterator<Item = u32>) -> Self {
        Self {
            code_points: code_points.into_iter().collect(),
            cursor: 0,
            pushback: VecDeque::new(),
            position: Position::default(),
        }
    }

    pub fn with_filename(mut self, filename: &str) -> Self {
        self.position.set_filename(filename);
        self
    }
}

impl Input for StringInput {
    fn get_code_point(&mut self) -> Option<u32> {
        if let Some(code_point) = self.pushback.pop_front() {
            return Some(code_point);
        }
        let code_point = self.code_points.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(code_point)
    }

    fn unget_code_point(&mut self, code_point: u32) {
        self.pushback.push_front(code_point);
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_ungets() {
        let mut input = StringInput::new("ab");
        assert_eq!(input.get_code_point(), Some('a' as u32));
        input.unget_code_point('a' as u32);
        assert_eq!(input.get_code_point(), Some('a' as u32));
        assert_eq!(input.get_code_point(), Some('b' as u32));
        assert_eq!(input.get_code_point(), None);
        input.unget_code_point('z' as u32);
        assert_eq!(input.get_code_point(), Some('z' as u32));
        assert_eq!(input.get_code_point(), None);
    }

    #[test]
    fn accepts_lone_surrogates() {
        let mut input = StringInput::from_code_points([0xD800, 0x41]);
        assert_eq!(input.get_code_point(), Some(0xD800));
        assert_eq!(input.get_code_point(), Some(0x41));
    }

    #[test]
    fn filename_is_carried_by_position() {
        let input = StringInput::new("").with_filename("main.js");
        assert_eq!(input.position().filename(), "main.js");
        assert_eq!(input.position().line(), 1);
    }
}
