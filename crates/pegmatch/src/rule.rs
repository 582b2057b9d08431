//! # Rules
//!
//! The [`Rule`] trait, the shared [`Expr`] handle and the per-parse [`Session`].
//!
//! ## Overview
//!
//! Every matcher and combinator implements [`Rule`]. A rule never matches on
//! its own initiative: its parent hands each child to the active
//! [`Strategy`], which does the guard bookkeeping and then calls
//! [`Rule::match_rule`]. The `must` flag passed along says whether the caller
//! has committed. A rule that fails while `must` is set is turned into a hard
//! error by the strategy.
//!
//! Rules are immutable and shared through [`Expr`], a cheap reference-counted
//! handle. Recursive rules go through the grammar's rule table, see
//! [`call`](crate::grammar::call).

use crate::error::{GrammarError, ParseError};
use crate::grammar::{Grammar, NullableSet, RuleId, Validator};
use crate::input::Cursor;
use crate::marker::Marker;
use crate::printer::{Description, Printer};
use crate::strategy::{Counter, Strategy};
use std::fmt;
use std::sync::Arc;

/// A grammar rule matching against a [`Cursor`] with external state `S`.
pub trait Rule<S>: Send + Sync {
    /// Attempt a match at the cursor.
    ///
    /// Returns `Ok(false)` for a soft failure, in which case the cursor must be
    /// exactly where it was before the call. A rule that consumes input
    /// before it can fail should do so inside [`Session::attempt`]; a bare
    /// [`Marker`] left unsettled on an early return does not roll back.
    ///
    /// # Errors
    ///
    /// Returns a hard error raised by this rule, a descendant, or an action.
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError>;

    /// Display name and expression of this rule for the grammar printer
    fn describe(&self, printer: &mut Printer<'_, S>) -> Description;

    /// Whether this rule can succeed without consuming input
    fn nullable(&self, named: &NullableSet<'_>) -> bool;

    /// Construction-time checks on this rule and its children
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        let _ = validator;
        Ok(())
    }

    /// Identity used by the grammar printer
    fn key(&self) -> RuleKey {
        RuleKey::Node((self as *const Self).cast::<()>() as usize)
    }

    /// The rule this one matches by calling it directly, bypassing the
    /// strategy. Grammar construction uses it to reject rules that would
    /// recurse without ever reaching the guard.
    fn delegate(&self) -> Option<Delegate<'_, S>> {
        None
    }
}

/// Target of a rule that matches without a strategy invocation of its own
#[derive(Debug)]
pub enum Delegate<'a, S> {
    Expr(&'a Expr<S>),
    Named(RuleId),
}

/// Stable identity of a rule.
///
/// Anonymous rules are identified by their address, which stays fixed for as
/// long as any [`Expr`] keeps them alive. Named grammar rules are identified by
/// their [`RuleId`], so every call site shares one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    Node(usize),
    Named(RuleId),
}

/// Shared handle to a rule.
pub struct Expr<S>(Arc<dyn Rule<S>>);

impl<S> Expr<S> {
    #[must_use]
    pub fn new(rule: impl Rule<S> + 'static) -> Self {
        Self(Arc::new(rule))
    }

    #[must_use]
    pub fn rule(&self) -> &dyn Rule<S> {
        &*self.0
    }

    #[must_use]
    pub fn key(&self) -> RuleKey {
        self.0.key()
    }
}

impl<S> Clone for Expr<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S> fmt::Debug for Expr<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&self.key()).finish()
    }
}

/// Per-parse match context.
///
/// Bundles the grammar, the cursor, the caller's external state and the guard
/// counters for one parse invocation.
pub struct Session<'a, S> {
    pub(crate) grammar: &'a Grammar<S>,
    pub(crate) cursor: &'a mut dyn Cursor,
    pub(crate) state: &'a mut S,
    pub(crate) counter: &'a Counter,
}

impl<'a, S> Session<'a, S> {
    pub fn new(
        grammar: &'a Grammar<S>,
        cursor: &'a mut dyn Cursor,
        state: &'a mut S,
        counter: &'a Counter,
    ) -> Self {
        Self {
            grammar,
            cursor,
            state,
            counter,
        }
    }

    #[must_use]
    pub fn grammar(&self) -> &'a Grammar<S> {
        self.grammar
    }

    pub fn cursor(&mut self) -> &mut dyn Cursor {
        &mut *self.cursor
    }

    #[must_use]
    pub fn cursor_ref(&self) -> &dyn Cursor {
        &*self.cursor
    }

    pub fn state(&mut self) -> &mut S {
        &mut *self.state
    }

    #[must_use]
    pub fn counter(&self) -> &'a Counter {
        self.counter
    }

    /// Run `f` under a [`Marker`].
    ///
    /// The consumption of `f` is kept if it returns `Ok(true)` and rolled back
    /// on a soft failure or an error.
    ///
    /// # Errors
    ///
    /// Forwards the error returned by `f`.
    pub fn attempt<F>(&mut self, f: F) -> Result<bool, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<bool, ParseError>,
    {
        let marker = Marker::new(&*self.cursor);
        let result = f(self);
        marker.settle(&mut *self.cursor, result)
    }

    /// Run `f` and restore the cursor whatever the outcome
    ///
    /// # Errors
    ///
    /// Forwards the error returned by `f`.
    pub fn lookahead<F>(&mut self, f: F) -> Result<bool, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<bool, ParseError>,
    {
        let marker = Marker::new(&*self.cursor);
        let result = f(self);
        marker.rollback(&mut *self.cursor);
        result
    }
}
