//! # Input
//!
//! The [`Cursor`] capability every rule matches against, and an in-memory
//! adapter implementing it.
//!
//! ## Overview
//!
//! A cursor is a forward-moving read position over bytes. Rules only ever
//! advance it with [`Cursor::bump`]; backtracking goes through
//! [`Cursor::here`] and [`Cursor::jump`], which snapshot and restore the
//! position together with its [`Location`].
//!
//! ## Example
//!
//! ```rust
//! use pegmatch::input::{Cursor, MemoryInput};
//!
//! let mut input = MemoryInput::new("ab", "example");
//! let start = input.here();
//! assert_eq!(input.peek().unwrap(), b'a');
//! input.bump().unwrap();
//! input.jump(start);
//! assert_eq!(input.location().column(), 1);
//! ```

pub mod escape;
pub mod location;
pub mod memory;

pub use escape::*;
pub use location::*;
pub use memory::*;

use crate::error::ParseError;

/// Positional view over an input sequence.
///
/// `eof()` holds exactly when the cursor sits at the end boundary. Reading or
/// advancing at eof is an error of kind
/// [`Exhausted`](crate::error::ParseErrorKind::Exhausted).
pub trait Cursor {
    /// Current byte
    ///
    /// # Errors
    ///
    /// Returns an exhausted-input error at eof.
    fn peek(&self) -> Result<u8, ParseError>;

    /// Advance by one byte, updating the location
    ///
    /// # Errors
    ///
    /// Returns an exhausted-input error at eof.
    fn bump(&mut self) -> Result<(), ParseError>;

    fn eof(&self) -> bool;

    /// Snapshot the current position
    fn here(&self) -> Position;

    /// Restore a snapshot taken with [`here`](Self::here).
    ///
    /// Only used for rollback.
    fn jump(&mut self, position: Position);

    fn location(&self) -> Location;

    /// Label naming where the input came from
    fn source(&self) -> &str;

    /// Bytes between two snapshots
    fn slice(&self, start: Position, end: Position) -> &[u8];

    /// Render the bytes between two snapshots for diagnostics
    fn debug_escape(&self, start: Position, end: Position) -> String {
        escape(self.slice(start, end))
    }

    /// Build an exhausted-input error at the current location
    fn exhausted(&self) -> ParseError {
        ParseError::exhausted(self.source(), self.location())
    }
}
