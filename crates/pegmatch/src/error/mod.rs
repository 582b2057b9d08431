//! # Error Types
//!
//! Error types for grammar construction and matching.
//!
//! ## Overview
//!
//! A failed match is not an error: rules report a soft failure as `Ok(false)`
//! and the enclosing combinator decides what to do with it. Only failures that
//! abort the whole parse are represented here:
//!
//! - [`ParseError`]: a hard failure raised while matching (cut, resource limit,
//!   exhausted input, failing action)
//! - [`ActionError`]: returned by user actions, wrapped into a [`ParseError`]
//! - [`GrammarError`]: a grammar rejected by [`GrammarBuilder::build`](crate::GrammarBuilder::build)
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, errors integrate with [`miette`]
//! for rich error reporting.

pub mod diagnostics;

pub use diagnostics::*;

use crate::input::Location;
use smallvec::SmallVec;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// A hard, parse-aborting failure.
///
/// The [`kind`](Self::kind) never changes while the error unwinds. Guards of the
/// diagnostic strategies append one line each to the [`trail`](Self::trail).
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[cfg_attr(feature = "diagnostics", diagnostic(code(pegmatch::parse)))]
#[error("{label}: {kind} at {location}{}", rule_suffix(.rule))]
pub struct ParseError {
    /// Source label of the input, e.g. `file grammar.txt`
    pub label: String,
    /// Location of the cursor when the error was raised
    pub location: Location,
    #[source]
    pub kind: ParseErrorKind,
    /// Printed form of the failing grammar rule, when known
    pub rule: Option<String>,
    /// Diagnostic lines appended by unwinding guards, innermost first
    pub trail: SmallVec<[String; 4]>,
}

/// The fundamental kind of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseErrorKind {
    #[error("parsing aborted")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegmatch::cut)))]
    Cut,

    #[error("rule invocation limit of {limit} exceeded")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegmatch::rule_limit)))]
    RuleLimit { limit: u64 },

    #[error("nesting depth limit of {limit} exceeded")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegmatch::nesting_limit)))]
    NestingLimit { limit: usize },

    #[error("attempt to read beyond end of input")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegmatch::exhausted)))]
    Exhausted,

    #[error("action failed: {message}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegmatch::action)))]
    Action { message: String },

    #[error("top-level parsing rule {rule} failed")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegmatch::top_level)))]
    TopLevelFailed { rule: String },
}

#[allow(clippy::ref_option)]
fn rule_suffix(rule: &Option<String>) -> String {
    rule.as_ref()
        .map(|rule| format!(" (rule {rule})"))
        .unwrap_or_default()
}

impl ParseError {
    /// Create a new error of the given kind
    #[must_use]
    pub fn new(kind: ParseErrorKind, label: impl Into<String>, location: Location) -> Self {
        Self {
            label: label.into(),
            location,
            kind,
            rule: None,
            trail: SmallVec::new(),
        }
    }

    /// Create a cut error for a required rule that failed
    #[must_use]
    pub fn cut(label: impl Into<String>, location: Location, rule: Option<String>) -> Self {
        Self {
            rule,
            ..Self::new(ParseErrorKind::Cut, label, location)
        }
    }

    /// Create an error for reading past the end of input
    #[must_use]
    pub fn exhausted(label: impl Into<String>, location: Location) -> Self {
        Self::new(ParseErrorKind::Exhausted, label, location)
    }

    /// Create an error for a failing user action
    #[must_use]
    pub fn action(label: impl Into<String>, location: Location, error: &ActionError) -> Self {
        Self::new(
            ParseErrorKind::Action {
                message: error.message().to_string(),
            },
            label,
            location,
        )
    }

    /// Create an error for a top rule that failed without raising
    #[must_use]
    pub fn top_level(label: impl Into<String>, location: Location, rule: impl Into<String>) -> Self {
        Self::new(
            ParseErrorKind::TopLevelFailed { rule: rule.into() },
            label,
            location,
        )
    }

    /// Attach the printed grammar rule, keeping an already attached one
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        if self.rule.is_none() {
            self.rule = Some(rule.into());
        }
        self
    }

    /// Append one diagnostic line
    pub fn push_trail(&mut self, line: impl Into<String>) {
        self.trail.push(line.into());
    }

    /// Whether this error was raised by a cut
    #[must_use]
    pub const fn is_cut(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Cut)
    }

    /// Whether this error was raised by the rule or nesting guard
    #[must_use]
    pub const fn is_resource_limit(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::RuleLimit { .. } | ParseErrorKind::NestingLimit { .. }
        )
    }
}

/// Error returned by a user action.
///
/// Raising one aborts the parse with [`ParseErrorKind::Action`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Errors raised while building a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("rule `{0}` is referenced but never defined")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::undefined_rule)))]
    UndefinedRule(String),

    #[error("rule `{0}` is defined more than once")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::duplicate_definition)))]
    DuplicateDefinition(String),

    #[error("grammar has no entry rule")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::missing_entry)))]
    MissingEntry,

    #[error("invalid range [{lo:#04x}-{hi:#04x}] in rule `{rule}`: lower bound exceeds upper bound")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::invalid_range)))]
    InvalidRange { rule: String, lo: u8, hi: u8 },

    #[error("invalid repetition {{{min},{max}}} in rule `{rule}`: minimum exceeds maximum")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::invalid_repetition)))]
    InvalidRepetition { rule: String, min: usize, max: usize },

    #[error("unbounded repetition of a nullable rule in `{rule}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::nullable_repetition)))]
    NullableRepetition { rule: String },

    #[error("rule `{rule}` reaches itself through names and actions alone")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::alias_cycle)))]
    AliasCycle { rule: String },
}
