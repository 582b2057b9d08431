//! Atomic matchers
//!
//! Rules that work directly on the cursor: single bytes, byte classes,
//! literals and end of input. None of them consume anything on failure.

use crate::error::{GrammarError, ParseError};
use crate::grammar::{NullableSet, Validator};
use crate::input::{escape, escape_byte_into};
use crate::marker::Character;
use crate::printer::{Description, Printer};
use crate::rule::{Expr, Rule, Session};
use crate::strategy::Strategy;
use smallvec::SmallVec;

/// Matches any single byte
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl<S> Rule<S> for Any {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        _strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        let cursor = session.cursor();
        if cursor.eof() {
            return Ok(false);
        }
        cursor.bump()?;
        Ok(true)
    }

    fn describe(&self, _printer: &mut Printer<'_, S>) -> Description {
        Description::expr(".")
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassKind {
    One(u8),
    List(SmallVec<[u8; 8]>),
    Ranges(SmallVec<[(u8, u8); 4]>),
}

/// A set of bytes, optionally negated; matches and consumes one byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteClass {
    kind: ClassKind,
    negated: bool,
}

impl ByteClass {
    #[must_use]
    pub const fn one(byte: u8) -> Self {
        Self {
            kind: ClassKind::One(byte),
            negated: false,
        }
    }

    #[must_use]
    pub fn list(bytes: &[u8]) -> Self {
        Self {
            kind: ClassKind::List(bytes.iter().copied().collect()),
            negated: false,
        }
    }

    /// Inclusive range; `lo > hi` is rejected when the grammar is built
    #[must_use]
    pub fn range(lo: u8, hi: u8) -> Self {
        Self::ranges(&[(lo, hi)])
    }

    #[must_use]
    pub fn ranges(ranges: &[(u8, u8)]) -> Self {
        Self {
            kind: ClassKind::Ranges(ranges.iter().copied().collect()),
            negated: false,
        }
    }

    /// The complementary class
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    #[must_use]
    pub fn contains(&self, byte: u8) -> bool {
        let hit = match &self.kind {
            ClassKind::One(expected) => byte == *expected,
            ClassKind::List(bytes) => bytes.contains(&byte),
            ClassKind::Ranges(ranges) => ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&byte)),
        };
        hit != self.negated
    }
}

impl<S> Rule<S> for ByteClass {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        _strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        let cursor = session.cursor();
        if cursor.eof() {
            return Ok(false);
        }
        let ch = Character::peek(cursor)?;
        let accepted = self.contains(ch.value());
        ch.accept(cursor, accepted)
    }

    fn describe(&self, _printer: &mut Printer<'_, S>) -> Description {
        let mut text = String::from("\"");
        let bracket = self.negated || !matches!(self.kind, ClassKind::One(_));
        if bracket {
            text.push('[');
        }
        if self.negated {
            text.push('^');
        }
        match &self.kind {
            ClassKind::One(byte) => escape_byte_into(&mut text, *byte),
            ClassKind::List(bytes) => {
                for &byte in bytes {
                    escape_byte_into(&mut text, byte);
                }
            }
            ClassKind::Ranges(ranges) => {
                for &(lo, hi) in ranges {
                    escape_byte_into(&mut text, lo);
                    text.push('-');
                    escape_byte_into(&mut text, hi);
                }
            }
        }
        if bracket {
            text.push(']');
        }
        text.push('"');
        Description::expr(text)
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        false
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        if let ClassKind::Ranges(ranges) = &self.kind {
            for &(lo, hi) in ranges {
                validator.check_range(lo, hi)?;
            }
        }
        Ok(())
    }
}

/// Literal byte string, matched all or nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    bytes: Box<[u8]>,
}

impl Literal {
    #[must_use]
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().into(),
        }
    }
}

impl<S> Rule<S> for Literal {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        _strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        session.attempt(|session| {
            let cursor = session.cursor();
            for &expected in self.bytes.iter() {
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
        Description::expr(format!("\"{}\"", escape(&self.bytes)))
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        self.bytes.is_empty()
    }
}

/// Succeeds only at the end of input
#[derive(Debug, Clone, Copy, Default)]
pub struct Eof;

impl<S> Rule<S> for Eof {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        _strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        Ok(session.cursor_ref().eof())
    }

    fn describe(&self, _printer: &mut Printer<'_, S>) -> Description {
        Description::expr("&eof")
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        true
    }
}

/// Constant outcome without consuming anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant(pub bool);

impl<S> Rule<S> for Constant {
    fn match_rule(
        &self,
        _session: &mut Session<'_, S>,
        _strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        Ok(self.0)
    }

    fn describe(&self, _printer: &mut Printer<'_, S>) -> Description {
        Description::expr(if self.0 { "T" } else { "_|_" })
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        self.0
    }
}

#[must_use]
pub fn any<S: 'static>() -> Expr<S> {
    Expr::new(Any)
}

#[must_use]
pub fn one<S: 'static>(byte: u8) -> Expr<S> {
    Expr::new(ByteClass::one(byte))
}

#[must_use]
pub fn not_one<S: 'static>(byte: u8) -> Expr<S> {
    Expr::new(ByteClass::one(byte).negate())
}

#[must_use]
pub fn list<S: 'static>(bytes: &[u8]) -> Expr<S> {
    Expr::new(ByteClass::list(bytes))
}

#[must_use]
pub fn not_list<S: 'static>(bytes: &[u8]) -> Expr<S> {
    Expr::new(ByteClass::list(bytes).negate())
}

/// Inclusive byte range; `lo > hi` makes the grammar fail to build
#[must_use]
pub fn range<S: 'static>(lo: u8, hi: u8) -> Expr<S> {
    Expr::new(ByteClass::range(lo, hi))
}

#[must_use]
pub fn not_range<S: 'static>(lo: u8, hi: u8) -> Expr<S> {
    Expr::new(ByteClass::range(lo, hi).negate())
}

#[must_use]
pub fn class<S: 'static>(class: ByteClass) -> Expr<S> {
    Expr::new(class)
}

#[must_use]
pub fn string<S: 'static>(bytes: impl AsRef<[u8]>) -> Expr<S> {
    Expr::new(Literal::new(bytes))
}

#[must_use]
pub fn eof<S: 'static>() -> Expr<S> {
    Expr::new(Eof)
}

#[must_use]
pub fn success<S: 'static>() -> Expr<S> {
    Expr::new(Constant(true))
}

#[must_use]
pub fn failure<S: 'static>() -> Expr<S> {
    Expr::new(Constant(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_membership() {
        assert!(ByteClass::one(b'a').contains(b'a'));
        assert!(!ByteClass::one(b'a').negate().contains(b'a'));
        assert!(ByteClass::list(b"xyz").contains(b'y'));
        assert!(ByteClass::list(b"xyz").negate().contains(b'a'));
        assert!(ByteClass::range(b'0', b'9').contains(b'9'));
        assert!(!ByteClass::range(b'0', b'9').contains(b'a'));
        assert!(ByteClass::ranges(&[(b'a', b'f'), (b'A', b'F')]).contains(b'C'));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let class = ByteClass::range(b'z', b'a');
        assert!((0..=255u8).all(|byte| !class.contains(byte)));
    }
}
