//! # Transactional Marker
//!
//! Commit/rollback over a cursor snapshot.
//!
//! A [`Marker`] remembers where the cursor was when it was created. Consuming
//! the marker decides the outcome: committing a success keeps whatever was
//! consumed, anything else jumps back. A marker dropped without being settled
//! leaves the cursor untouched, so every exit path of a rule must settle it;
//! [`Session::attempt`](crate::rule::Session::attempt) does that for closures.
//!
//! A [`Character`] peeks a single byte and only advances the cursor once the
//! caller accepts it.

use crate::error::ParseError;
use crate::input::{Cursor, Position};

/// Saved cursor position that is either committed or rolled back
#[derive(Debug, Clone, Copy)]
#[must_use = "a marker must be settled with commit, rollback or settle"]
pub struct Marker {
    start: Position,
}

impl Marker {
    pub fn new(cursor: &dyn Cursor) -> Self {
        Self {
            start: cursor.here(),
        }
    }

    /// Position the marker restores on rollback
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Keep the consumption on success, roll back otherwise.
    ///
    /// Returns `success` unchanged so it can be forwarded.
    pub fn commit(self, cursor: &mut dyn Cursor, success: bool) -> bool {
        if !success {
            cursor.jump(self.start);
        }
        success
    }

    pub fn rollback(self, cursor: &mut dyn Cursor) {
        cursor.jump(self.start);
    }

    /// Settle against a match result.
    ///
    /// Soft failures and hard errors both roll back.
    ///
    /// # Errors
    ///
    /// Forwards the error in `result`.
    pub fn settle(
        self,
        cursor: &mut dyn Cursor,
        result: Result<bool, ParseError>,
    ) -> Result<bool, ParseError> {
        match result {
            Ok(matched) => Ok(self.commit(cursor, matched)),
            Err(error) => {
                self.rollback(cursor);
                Err(error)
            }
        }
    }
}

/// A peeked byte that is consumed only when accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a peeked character must be accepted or rejected"]
pub struct Character {
    value: u8,
}

impl Character {
    /// Peek the current byte
    ///
    /// # Errors
    ///
    /// Returns an exhausted-input error at eof.
    pub fn peek(cursor: &dyn Cursor) -> Result<Self, ParseError> {
        cursor.peek().map(|value| Self { value })
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Advance past the byte if `accepted`, returning `accepted`
    ///
    /// # Errors
    ///
    /// Returns an exhausted-input error if the cursor moved to eof since the peek.
    pub fn accept(self, cursor: &mut dyn Cursor, accepted: bool) -> Result<bool, ParseError> {
        if accepted {
            cursor.bump()?;
        }
        Ok(accepted)
    }
}
