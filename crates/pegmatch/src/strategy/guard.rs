//! Per-invocation guard of the diagnostic strategies
//!
//! A [`Guard`] starts [`Pending`](GuardState::Pending) and moves to
//! [`Success`](GuardState::Success) or [`Failure`](GuardState::Failure) when the
//! wrapped rule returns. A hard error seen while pending, or raised by the
//! guard itself for a failure under cut, moves it to
//! [`Unwound`](GuardState::Unwound) and appends one trail line to the error.

use super::Scope;
use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::rule::{Rule, Session};

/// State of one guarded invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Pending,
    Success,
    Failure,
    Unwound,
}

/// Guard around a single rule invocation
#[derive(Debug)]
pub struct Guard<'c> {
    scope: Scope<'c>,
    state: GuardState,
}

impl<'c> Guard<'c> {
    pub fn new(scope: Scope<'c>) -> Self {
        Self {
            scope,
            state: GuardState::Pending,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    #[must_use]
    pub const fn scope(&self) -> &Scope<'c> {
        &self.scope
    }

    /// Record the soft outcome of the wrapped rule
    pub fn settle(&mut self, matched: bool) {
        if self.state == GuardState::Pending {
            self.state = if matched {
                GuardState::Success
            } else {
                GuardState::Failure
            };
        }
    }

    /// Record that a hard error is passing through
    pub fn unwind(&mut self) {
        if matches!(self.state, GuardState::Pending | GuardState::Failure) {
            self.state = GuardState::Unwound;
        }
    }

    /// Turn the rule's result into the invocation's result.
    ///
    /// A failure while the cut flag is set raises a cut error naming the
    /// printed rule. Any hard error gets this invocation's nesting line.
    ///
    /// # Errors
    ///
    /// Returns the raised or forwarded hard error.
    pub fn finish<S>(
        &mut self,
        rule: &dyn Rule<S>,
        session: &Session<'_, S>,
        result: Result<bool, ParseError>,
    ) -> Result<bool, ParseError> {
        let error = match result {
            Ok(matched) => {
                self.settle(matched);
                if matched || !self.scope.must() {
                    return Ok(matched);
                }
                let cursor = session.cursor_ref();
                log::warn!("{}: syntax error at {}", cursor.source(), cursor.location());
                ParseError::cut(
                    cursor.source(),
                    cursor.location(),
                    Some(printed_rule(session.grammar(), rule)),
                )
            }
            Err(error) => error,
        };
        Err(self.unwound(rule, session, error))
    }

    fn unwound<S>(
        &mut self,
        rule: &dyn Rule<S>,
        session: &Session<'_, S>,
        mut error: ParseError,
    ) -> ParseError {
        self.unwind();
        let line = format!(
            "nesting #{:02} at {} rule {}",
            self.scope.nesting(),
            session.cursor_ref().location(),
            printed_rule(session.grammar(), rule)
        );
        log::debug!("{}: {line}", session.cursor_ref().source());
        error.push_trail(line);
        error
    }
}

/// Printed form of `rule` as registered for the grammar's entry rule
pub(crate) fn printed_rule<S>(grammar: &Grammar<S>, rule: &dyn Rule<S>) -> String {
    grammar
        .registry()
        .rule_text(rule.key())
        .unwrap_or_else(|| String::from("<anonymous>"))
}
