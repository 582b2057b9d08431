//! In-memory input

use super::{Cursor, Location, Position};
use crate::error::ParseError;
use std::borrow::Cow;

/// A [`Cursor`] over a borrowed byte buffer.
///
/// # Example
///
/// ```rust
/// use pegmatch::input::{Cursor, MemoryInput};
///
/// let input = MemoryInput::argument("1+2", 1);
/// assert_eq!(input.source(), "command line argument 1");
/// assert!(!input.eof());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryInput<'a> {
    data: &'a [u8],
    source: Cow<'a, str>,
    location: Location,
}

impl<'a> MemoryInput<'a> {
    /// Create an input over `data` with a free-form source label
    #[must_use]
    pub fn new<D>(data: &'a D, source: impl Into<Cow<'a, str>>) -> Self
    where
        D: AsRef<[u8]> + ?Sized,
    {
        Self {
            data: data.as_ref(),
            source: source.into(),
            location: Location::start(),
        }
    }

    /// Input taken from the `index`-th command line argument
    #[must_use]
    pub fn argument<D: AsRef<[u8]> + ?Sized>(data: &'a D, index: usize) -> Self {
        Self::new(data, format!("command line argument {index}"))
    }

    /// Input read from the file called `name`
    #[must_use]
    pub fn file<D: AsRef<[u8]> + ?Sized>(data: &'a D, name: &str) -> Self {
        Self::new(data, format!("file {name}"))
    }

    /// Bytes not yet consumed
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.location.offset()..).unwrap_or_default()
    }

    /// Total input length in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Cursor for MemoryInput<'_> {
    fn peek(&self) -> Result<u8, ParseError> {
        self.data
            .get(self.location.offset())
            .copied()
            .ok_or_else(|| self.exhausted())
    }

    fn bump(&mut self) -> Result<(), ParseError> {
        let byte = self.peek()?;
        self.location.advance(byte);
        Ok(())
    }

    fn eof(&self) -> bool {
        self.location.offset() >= self.data.len()
    }

    fn here(&self) -> Position {
        Position::new(self.location)
    }

    fn jump(&mut self, position: Position) {
        self.location = position.location();
    }

    fn location(&self) -> Location {
        self.location
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn slice(&self, start: Position, end: Position) -> &[u8] {
        let end = end.offset().min(self.data.len());
        let start = start.offset().min(end);
        &self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_bump_until_eof() {
        let mut input = MemoryInput::new("ab", "test");
        assert_eq!(input.peek().unwrap(), b'a');
        input.bump().unwrap();
        assert_eq!(input.peek().unwrap(), b'b');
        input.bump().unwrap();
        assert!(input.eof());
        assert_eq!(input.remaining(), b"");
    }

    #[test]
    fn test_read_beyond_end() {
        let mut input = MemoryInput::file("", "empty.txt");
        let error = input.bump().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::Exhausted);
        assert_eq!(error.label, "file empty.txt");
        assert_eq!(
            error.to_string(),
            "file empty.txt: attempt to read beyond end of input at line=1 column=1"
        );
    }

    #[test]
    fn test_jump_restores_location() {
        let mut input = MemoryInput::new("a\nb", "test");
        let start = input.here();
        input.bump().unwrap();
        input.bump().unwrap();
        assert_eq!(input.location().line(), 2);
        input.jump(start);
        assert_eq!(input.location(), Location::start());
        assert_eq!(input.here(), start);
    }

    #[test]
    fn test_slice_and_debug_escape() {
        let mut input = MemoryInput::new("x\ty", "test");
        let start = input.here();
        input.bump().unwrap();
        input.bump().unwrap();
        let end = input.here();
        assert_eq!(input.slice(start, end), b"x\t");
        assert_eq!(input.debug_escape(start, end), "x\\t");
    }

    #[test]
    fn test_position_from_longer_input_is_clamped() {
        let mut long = MemoryInput::new("abcdef", "long");
        for _ in 0..5 {
            long.bump().unwrap();
        }
        let mut short = MemoryInput::new("ab", "short");
        short.jump(long.here());
        assert!(short.eof());
        assert_eq!(short.remaining(), b"");
        assert_eq!(short.slice(Position::new(Location::start()), short.here()), b"ab");
    }
}
