//! Capture and back-reference
//!
//! A [`Capture`] plays two roles. Attached to a rule as an action, it stores
//! the text that rule matched under its key. Used as a rule, it matches the
//! input against the text stored under that key, byte by byte. A key with
//! nothing stored fails the match.
//!
//! # Example
//!
//! ```rust
//! use pegmatch::prelude::*;
//!
//! // Two equal digit runs separated by blanks
//! let rule = seq([
//!     apply(plus(digit()), Capture::new(42)),
//!     plus(blank()),
//!     capture(42),
//!     eof(),
//! ]);
//! let grammar = Grammar::<CaptureMap>::from_rule("twice", rule)?;
//!
//! let mut captures = CaptureMap::new();
//! assert!(Parser::new(&grammar).parse_nothrow_str("123   123", &mut captures));
//! assert_eq!(captures.get(&CaptureId::from(42)), Some("123"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::Action;
use crate::error::{ActionError, ParseError};
use crate::grammar::NullableSet;
use crate::marker::Character;
use crate::printer::{Description, Printer};
use crate::rule::{Expr, Rule, Session};
use crate::strategy::Strategy;
use compact_str::CompactString;
use hashbrown::HashMap;
use std::fmt;

/// Key of a stored capture
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum CaptureId {
    Numeric(usize),
    Named(CompactString),
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<usize> for CaptureId {
    fn from(n: usize) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for CaptureId {
    fn from(name: &str) -> Self {
        Self::Named(name.into())
    }
}

/// Stored captures of one parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureMap {
    entries: HashMap<CaptureId, CompactString, ahash::RandomState>,
}

impl CaptureMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &CaptureId) -> Option<&str> {
        self.entries.get(id).map(CompactString::as_str)
    }

    /// Store `text` under `id`, replacing any earlier capture
    pub fn insert(&mut self, id: CaptureId, text: impl Into<CompactString>) {
        self.entries.insert(id, text.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// External state that holds a [`CaptureMap`]
pub trait CaptureState {
    fn captures(&self) -> &CaptureMap;
    fn captures_mut(&mut self) -> &mut CaptureMap;
}

impl CaptureState for CaptureMap {
    fn captures(&self) -> &CaptureMap {
        self
    }

    fn captures_mut(&mut self) -> &mut CaptureMap {
        self
    }
}

/// Stores a match as an action, matches the stored text as a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    id: CaptureId,
}

impl Capture {
    #[must_use]
    pub fn new(id: impl Into<CaptureId>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub const fn id(&self) -> &CaptureId {
        &self.id
    }
}

impl<S: CaptureState> Action<S> for Capture {
    fn apply(&self, matched: &str, state: &mut S) -> Result<(), ActionError> {
        state.captures_mut().insert(self.id.clone(), matched);
        Ok(())
    }
}

impl<S: CaptureState> Rule<S> for Capture {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        _strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        let Some(stored) = session.state().captures().entries.get(&self.id).cloned() else {
            return Ok(false);
        };
        session.attempt(|session| {
            let cursor = session.cursor();
            for &expected in stored.as_bytes() {
                if cursor.eof() {
                    return Ok(false);
                }
                let ch = Character::peek(cursor)?;
                if !ch.accept(cursor, ch.value() == expected)? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    fn describe(&self, _printer: &mut Printer<'_, S>) -> Description {
        Description::expr(format!("\\{}", self.id))
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        true
    }
}

/// Back-reference to the text captured under `id`
#[must_use]
pub fn capture<S: CaptureState + 'static>(id: impl Into<CaptureId>) -> Expr<S> {
    Expr::new(Capture::new(id))
}

/// Store what `inner` matches under `id`
#[must_use]
pub fn store<S: CaptureState + 'static>(inner: Expr<S>, id: impl Into<CaptureId>) -> Expr<S> {
    super::apply(inner, Capture::new(id))
}
