//! # Match Strategies
//!
//! The single seam every rule invocation passes through.
//!
//! ## Overview
//!
//! Combinators never call [`Rule::match_rule`] on their children directly.
//! They hand each child to [`Strategy::invoke`], which enters the guard
//! [`Counter`], runs the rule, and turns a failure under cut into a hard
//! [`ParseError`].
//!
//! | Strategy | Failure under cut | Per-invocation output |
//! |---|---|---|
//! | [`FastStrategy`] | bare cut error | none |
//! | [`DiagnosticStrategy`] | cut error naming the printed rule, plus a trail line per unwound guard | none |
//! | [`TraceStrategy`] | as diagnostic | one event per start and per outcome |
//!
//! All strategies share the same matching semantics; only what they report
//! differs.
//!
//! Nesting uses native stack. Before matching, every strategy makes sure a
//! red zone of free stack remains and otherwise continues on a freshly
//! allocated segment, so the nesting limit of [`GuardConfig`] is what bounds
//! recursion rather than the size of the calling thread's stack.

pub mod counter;
pub mod diagnostic;
pub mod fast;
pub mod guard;
pub mod trace;

pub use counter::*;
pub use diagnostic::*;
pub use fast::*;
pub use guard::*;
pub use trace::*;

use crate::error::ParseError;
use crate::rule::{Rule, Session};

/// Execution strategy for rule invocations
pub trait Strategy<S> {
    /// Match `rule` with the given cut flag.
    ///
    /// # Errors
    ///
    /// Returns a hard error if `rule` fails while `must` is set, if a guard
    /// limit is exceeded, or if the rule raises one itself.
    fn invoke(
        &mut self,
        rule: &dyn Rule<S>,
        session: &mut Session<'_, S>,
        must: bool,
    ) -> Result<bool, ParseError>;
}

/// Free stack required before a rule is matched
const RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated once the red zone is reached
const STACK_CHUNK: usize = 2 * 1024 * 1024;

/// Match `rule` on a stack with at least [`RED_ZONE`] bytes to spare
pub(crate) fn match_on_stack<S>(
    rule: &dyn Rule<S>,
    session: &mut Session<'_, S>,
    strategy: &mut dyn Strategy<S>,
    must: bool,
) -> Result<bool, ParseError> {
    stacker::maybe_grow(RED_ZONE, STACK_CHUNK, || {
        rule.match_rule(session, strategy, must)
    })
}

/// Selects one of the built-in strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Fast,
    #[default]
    Diagnostic,
    Trace,
}
