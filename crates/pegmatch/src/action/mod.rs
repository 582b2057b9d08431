//! # Actions
//!
//! Side effects attached to rules.
//!
//! ## Overview
//!
//! [`action`] wraps a rule so that, once the rule has matched, a callback
//! receives the matched text and the caller's external state. Callbacks run
//! after the wrapped rule has finished consuming and before the success is
//! reported upward, so nested actions fire inside-out and left to right. A
//! failed match never runs the callback.
//!
//! An action can veto the parse by returning an [`ActionError`], which
//! becomes a hard [`ParseError`] at the current location.
//!
//! ## Example
//!
//! ```rust
//! use pegmatch::prelude::*;
//!
//! let number = action(plus(digit()), |text: &str, stack: &mut Vec<i64>| {
//!     let value = text.parse::<i64>().map_err(|_| ActionError::new("number out of range"))?;
//!     stack.push(value);
//!     Ok(())
//! });
//! let grammar = Grammar::from_rule("number", number)?;
//!
//! let mut stack = Vec::new();
//! Parser::new(&grammar).parse_str("42", &mut stack)?;
//! assert_eq!(stack, vec![42]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod capture;

pub use capture::*;

use crate::error::{ActionError, GrammarError, ParseError};
use crate::grammar::{NullableSet, Validator};
use crate::printer::{Description, Printer};
use crate::rule::{Delegate, Expr, Rule, RuleKey, Session};
use crate::strategy::Strategy;
use smallvec::SmallVec;
use std::sync::Arc;

/// Callback run with the text matched by a rule
pub trait Action<S>: Send + Sync {
    /// # Errors
    ///
    /// Returns an error to abort the parse.
    fn apply(&self, matched: &str, state: &mut S) -> Result<(), ActionError>;
}

/// Adapts a closure to [`Action`]
pub struct FnAction<F>(pub F);

impl<S, F> Action<S> for FnAction<F>
where
    F: Fn(&str, &mut S) -> Result<(), ActionError> + Send + Sync,
{
    fn apply(&self, matched: &str, state: &mut S) -> Result<(), ActionError> {
        (self.0)(matched, state)
    }
}

/// A rule with actions run on success, in order
pub struct ActionRule<S> {
    inner: Expr<S>,
    actions: SmallVec<[Arc<dyn Action<S>>; 2]>,
}

impl<S> Rule<S> for ActionRule<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        let start = session.cursor_ref().here();
        session.attempt(|session| {
            if !self.inner.rule().match_rule(session, strategy, must)? {
                return Ok(false);
            }
            let cursor = session.cursor_ref();
            let matched = String::from_utf8_lossy(cursor.slice(start, cursor.here())).into_owned();
            for action in &self.actions {
                if let Err(error) = action.apply(&matched, session.state()) {
                    let cursor = session.cursor_ref();
                    log::debug!("action failed at {}: {error}", cursor.location());
                    return Err(ParseError::action(cursor.source(), cursor.location(), &error));
                }
            }
            Ok(true)
        })
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        printer.expand(&self.inner)
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        self.inner.rule().nullable(named)
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.visit(&self.inner)
    }

    fn key(&self) -> RuleKey {
        self.inner.key()
    }

    fn delegate(&self) -> Option<Delegate<'_, S>> {
        Some(Delegate::Expr(&self.inner))
    }
}

/// Run `f` with the matched text whenever `inner` matches
#[must_use]
pub fn action<S, F>(inner: Expr<S>, f: F) -> Expr<S>
where
    S: 'static,
    F: Fn(&str, &mut S) -> Result<(), ActionError> + Send + Sync + 'static,
{
    apply(inner, FnAction(f))
}

/// Attach an [`Action`] implementation to `inner`
#[must_use]
pub fn apply<S: 'static>(inner: Expr<S>, action: impl Action<S> + 'static) -> Expr<S> {
    apply_all(inner, [Arc::new(action) as Arc<dyn Action<S>>])
}

/// Attach several actions, run in the given order
#[must_use]
pub fn apply_all<S: 'static>(
    inner: Expr<S>,
    actions: impl IntoIterator<Item = Arc<dyn Action<S>>>,
) -> Expr<S> {
    Expr::new(ActionRule {
        inner,
        actions: actions.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::input::{Cursor, MemoryInput};
    use crate::parser::Parser;
    use crate::rules::{digit, one, plus, seq, sor};

    fn record(tag: &'static str) -> impl Fn(&str, &mut Vec<String>) -> Result<(), ActionError> {
        move |text: &str, log: &mut Vec<String>| {
            log.push(format!("{tag}:{text}"));
            Ok(())
        }
    }

    #[test]
    fn test_actions_fire_inside_out() {
        let inner_a = action(one(b'a'), record("a"));
        let inner_b = action(one(b'b'), record("b"));
        let outer = action(seq([inner_a, inner_b]), record("ab"));
        let grammar = Grammar::from_rule("test", outer).unwrap();

        let mut log = Vec::new();
        Parser::new(&grammar).parse_str("ab", &mut log).unwrap();
        assert_eq!(log, vec!["a:a", "b:b", "ab:ab"]);
    }

    #[test]
    fn test_failed_match_skips_action() {
        let rule = sor([action(seq([one(b'a'), one(b'b')]), record("ab")), one(b'a')]);
        let grammar = Grammar::from_rule("test", rule).unwrap();

        let mut log = Vec::new();
        let mut cursor = MemoryInput::new("ac", "test");
        assert!(Parser::new(&grammar).try_match(&mut cursor, &mut log).unwrap());
        assert!(log.is_empty());
        assert_eq!(cursor.here().offset(), 1);
    }

    #[test]
    fn test_actions_run_in_order() {
        let rule = apply_all(
            plus(digit()),
            [
                Arc::new(FnAction(record("first"))) as Arc<dyn Action<Vec<String>>>,
                Arc::new(FnAction(record("second"))) as Arc<dyn Action<Vec<String>>>,
            ],
        );
        let grammar = Grammar::from_rule("test", rule).unwrap();
        let mut log = Vec::new();
        Parser::new(&grammar).parse_str("12", &mut log).unwrap();
        assert_eq!(log, vec!["first:12", "second:12"]);
    }

    #[test]
    fn test_action_error_aborts() {
        let rule = action(plus(digit()), |_: &str, _: &mut ()| Err(ActionError::new("rejected")));
        let grammar = Grammar::from_rule("test", rule).unwrap();
        let error = Parser::new(&grammar).parse_str("7", &mut ()).unwrap_err();
        assert!(error.to_string().contains("rejected"));
        assert_eq!(error.location.offset(), 1);
    }
}
