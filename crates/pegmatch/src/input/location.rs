//! Line and column tracking
//!
//! A [`Location`] is advanced one byte at a time as the cursor moves forward,
//! so it never has to rescan the input. Rolling back restores a saved
//! [`Position`], which carries its location with it.

use std::fmt;

/// A line/column position together with its byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    offset: usize,
    line: u32,
    column: u32,
}

impl Location {
    /// Create a location from its parts.
    ///
    /// `line` and `column` are one-based.
    #[must_use]
    pub const fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Location of the first byte of an input
    #[must_use]
    pub const fn start() -> Self {
        Self::new(0, 1, 1)
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Advance past one consumed byte
    pub fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line = self.line.saturating_add(1);
            self.column = 1;
        } else {
            self.column = self.column.saturating_add(1);
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line={} column={}", self.line, self.column)
    }
}

/// Opaque cursor snapshot used for rollback.
///
/// Restoring a position restores the location tracker with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Position(Location);

impl Position {
    #[must_use]
    pub const fn new(location: Location) -> Self {
        Self(location)
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.0.offset
    }

    #[must_use]
    pub const fn location(&self) -> Location {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_columns() {
        let mut location = Location::start();
        for byte in b"abc" {
            location.advance(*byte);
        }
        assert_eq!(location, Location::new(3, 1, 4));
    }

    #[test]
    fn test_advance_newline_resets_column() {
        let mut location = Location::start();
        for byte in b"ab\ncd" {
            location.advance(*byte);
        }
        assert_eq!(location.line(), 2);
        assert_eq!(location.column(), 3);
        assert_eq!(location.offset(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::new(10, 3, 7).to_string(), "line=3 column=7");
    }
}
