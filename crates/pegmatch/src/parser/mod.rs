//! # Parse Entry Points
//!
//! Running a grammar against an input.
//!
//! ## Overview
//!
//! [`parse_with`] is the central wrapper: it sets up the guard counters and
//! the match session, then invokes the grammar's top rule as required. A
//! [`Parser`] adds the convenience layer on top of it:
//!
//! - [`Parser::parse`] surfaces hard failures as a [`ParseError`]
//! - [`Parser::parse_nothrow`] logs the error and returns `false` instead
//! - [`Parser::smart_parse`] tries the fast strategy first and re-runs with
//!   the trace strategy only when that fails
//! - [`Parser::try_match`] invokes the top rule without committing, so a
//!   mismatch is a plain `false`
//!
//! All modes share the same matching semantics; only the way a failure is
//! reported differs.
//!
//! ## Example
//!
//! ```rust
//! use pegmatch::prelude::*;
//!
//! let grammar = Grammar::<()>::from_rule("greeting", seq([string("hello"), eof()]))?;
//! let parser = Parser::new(&grammar);
//!
//! let outcome = parser.parse_str("hello", &mut ())?;
//! assert_eq!(outcome.consumed, 5);
//!
//! assert!(!parser.parse_nothrow_str("goodbye", &mut ()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use config::*;
#[cfg(feature = "parallel")]
pub use parallel::*;

use crate::error::{format_report, ParseError};
use crate::grammar::Grammar;
use crate::input::{Cursor, Location, MemoryInput};
use crate::rule::Session;
use crate::strategy::{
    Counter, DiagnosticStrategy, FastStrategy, GuardConfig, Strategy, StrategyKind, TraceStrategy,
};
use std::time::{Duration, Instant};

/// Counters collected during one successful parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseMetrics {
    pub rules_invoked: u64,
    pub max_nesting: usize,
    pub parse_time: Duration,
}

/// Result of a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Bytes consumed by the top rule
    pub consumed: usize,
    /// Cursor location after the top rule
    pub location: Location,
    pub metrics: ParseMetrics,
}

/// Parse with an explicit strategy.
///
/// The top rule is invoked as required, so with the built-in strategies a
/// mismatch surfaces as a cut error naming the failing rule.
///
/// # Errors
///
/// Returns the hard error that aborted the parse, or a top-level failure if
/// `strategy` reports a mismatch without raising one.
pub fn parse_with<S>(
    grammar: &Grammar<S>,
    strategy: &mut dyn Strategy<S>,
    cursor: &mut dyn Cursor,
    state: &mut S,
    guard: &GuardConfig,
) -> Result<ParseOutcome, ParseError> {
    let started = Instant::now();
    let start = cursor.here();
    let counter = Counter::new(guard.clone());

    let matched = {
        let mut session = Session::new(grammar, &mut *cursor, state, &counter);
        strategy.invoke(grammar.top().rule(), &mut session, true)?
    };
    if !matched {
        return Err(ParseError::top_level(
            cursor.source(),
            cursor.location(),
            grammar.entry_name(),
        ));
    }

    let outcome = ParseOutcome {
        consumed: cursor.here().offset() - start.offset(),
        location: cursor.location(),
        metrics: ParseMetrics {
            rules_invoked: counter.rules(),
            max_nesting: counter.peak(),
            parse_time: started.elapsed(),
        },
    };
    log::debug!(
        "{}: parsed {} bytes with {} rule invocations",
        cursor.source(),
        outcome.consumed,
        outcome.metrics.rules_invoked
    );
    Ok(outcome)
}

/// Runs one grammar with a fixed configuration
#[derive(Debug, Clone)]
pub struct Parser<'g, S> {
    grammar: &'g Grammar<S>,
    config: ParserConfig,
}

impl<'g, S> Parser<'g, S> {
    /// Parser with the diagnostic strategy and default limits
    #[must_use]
    pub fn new(grammar: &'g Grammar<S>) -> Self {
        Self::with_config(grammar, ParserConfig::default())
    }

    #[must_use]
    pub const fn with_config(grammar: &'g Grammar<S>, config: ParserConfig) -> Self {
        Self { grammar, config }
    }

    #[must_use]
    pub const fn grammar(&self) -> &'g Grammar<S> {
        self.grammar
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse, surfacing hard failures as errors
    ///
    /// # Errors
    ///
    /// Returns the hard error that aborted the parse.
    pub fn parse(&self, cursor: &mut dyn Cursor, state: &mut S) -> Result<ParseOutcome, ParseError> {
        let guard = &self.config.guard;
        match self.config.mode {
            StrategyKind::Fast => parse_with(self.grammar, &mut FastStrategy, cursor, state, guard),
            StrategyKind::Diagnostic => {
                parse_with(self.grammar, &mut DiagnosticStrategy, cursor, state, guard)
            }
            StrategyKind::Trace => {
                parse_with(self.grammar, &mut TraceStrategy::new(), cursor, state, guard)
            }
        }
    }

    /// Parse a string labelled `string`
    ///
    /// # Errors
    ///
    /// Returns the hard error that aborted the parse.
    pub fn parse_str(&self, input: &str, state: &mut S) -> Result<ParseOutcome, ParseError> {
        let mut cursor = MemoryInput::new(input, "string");
        self.parse(&mut cursor, state)
    }

    /// Parse, logging a hard failure and returning `false` instead
    pub fn parse_nothrow(&self, cursor: &mut dyn Cursor, state: &mut S) -> bool {
        match self.parse(cursor, state) {
            Ok(_) => true,
            Err(error) => {
                log::error!("{}", format_report(&error));
                false
            }
        }
    }

    pub fn parse_nothrow_str(&self, input: &str, state: &mut S) -> bool {
        let mut cursor = MemoryInput::new(input, "string");
        self.parse_nothrow(&mut cursor, state)
    }

    /// Parse with the fast strategy; on failure rewind and parse again with
    /// the trace strategy to obtain a diagnostic error.
    ///
    /// `trace` switches per-invocation tracing on for the second run. The
    /// state is not reset between the two runs, so actions of the first run
    /// stay applied.
    ///
    /// # Errors
    ///
    /// Returns the hard error of the second run.
    pub fn smart_parse(
        &self,
        cursor: &mut dyn Cursor,
        state: &mut S,
        trace: bool,
    ) -> Result<ParseOutcome, ParseError> {
        let guard = &self.config.guard;
        let start = cursor.here();
        match parse_with(self.grammar, &mut FastStrategy, cursor, state, guard) {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                log::debug!("fast parse failed ({error}), parsing again with diagnostics");
                cursor.jump(start);
                let mut strategy = TraceStrategy::new();
                strategy.set_enabled(trace);
                parse_with(self.grammar, &mut strategy, cursor, state, guard)
            }
        }
    }

    /// Match the top rule without committing to it.
    ///
    /// A mismatch is `Ok(false)` and leaves the cursor where it was; cuts
    /// inside the grammar still raise errors.
    ///
    /// # Errors
    ///
    /// Returns a hard error raised while matching.
    pub fn try_match(&self, cursor: &mut dyn Cursor, state: &mut S) -> Result<bool, ParseError> {
        let counter = Counter::new(self.config.guard.clone());
        let mut session = Session::new(self.grammar, cursor, state, &counter);
        let top = self.grammar.top().rule();
        match self.config.mode {
            StrategyKind::Fast => FastStrategy.invoke(top, &mut session, false),
            StrategyKind::Diagnostic => DiagnosticStrategy.invoke(top, &mut session, false),
            StrategyKind::Trace => TraceStrategy::new().invoke(top, &mut session, false),
        }
    }
}
