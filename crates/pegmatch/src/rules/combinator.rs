//! Rule combinators
//!
//! Every child is matched through the strategy, never directly. The `must`
//! flag a combinator receives is passed on to children that inherit the
//! caller's commitment, and replaced by `false` for children whose failure is
//! an expected outcome (the body of `opt`, the condition of a conditional).

use crate::error::{GrammarError, ParseError};
use crate::grammar::{NullableSet, Validator};
use crate::printer::{Description, Printer};
use crate::rule::{Expr, Rule, Session};
use crate::strategy::Strategy;
use smallvec::SmallVec;

type Children<S> = SmallVec<[Expr<S>; 4]>;

/// All children in order, all or nothing
pub struct Seq<S> {
    children: Children<S>,
}

impl<S> Rule<S> for Seq<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        session.attempt(|session| {
            for child in &self.children {
                if !strategy.invoke(child.rule(), session, must)? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let names = printer.names_of(&self.children);
        Description::expr(format!("( {} )", names.join(" ")))
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        self.children.iter().all(|child| child.rule().nullable(named))
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        self.children.iter().try_for_each(|child| validator.visit(child))
    }
}

/// Ordered choice; only the last alternative inherits `must`
pub struct Sor<S> {
    children: Children<S>,
}

impl<S> Rule<S> for Sor<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        let last = self.children.len().saturating_sub(1);
        for (index, child) in self.children.iter().enumerate() {
            if strategy.invoke(child.rule(), session, must && index == last)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let names = printer.names_of(&self.children);
        Description::expr(format!("( {} )", names.join(" / ")))
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        self.children.iter().any(|child| child.rule().nullable(named))
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        self.children.iter().try_for_each(|child| validator.visit(child))
    }
}

pub struct Opt<S> {
    inner: Expr<S>,
}

impl<S> Rule<S> for Opt<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        strategy.invoke(self.inner.rule(), session, false)?;
        Ok(true)
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        Description::expr(format!("{}?", printer.name_of(&self.inner)))
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        true
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.visit(&self.inner)
    }
}

/// Zero or more, greedy
pub struct Star<S> {
    inner: Expr<S>,
}

fn repeat<S>(
    inner: &Expr<S>,
    session: &mut Session<'_, S>,
    strategy: &mut dyn Strategy<S>,
) -> Result<(), ParseError> {
    while !session.cursor_ref().eof() && strategy.invoke(inner.rule(), session, false)? {}
    Ok(())
}

impl<S> Rule<S> for Star<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        repeat(&self.inner, session, strategy)?;
        Ok(true)
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        Description::expr(format!("{}*", printer.name_of(&self.inner)))
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        true
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.check_repetition(&self.inner)
    }
}

/// One or more, greedy
pub struct Plus<S> {
    inner: Expr<S>,
}

impl<S> Rule<S> for Plus<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        if !strategy.invoke(self.inner.rule(), session, must)? {
            return Ok(false);
        }
        repeat(&self.inner, session, strategy)?;
        Ok(true)
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        Description::expr(format!("{}+", printer.name_of(&self.inner)))
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        self.inner.rule().nullable(named)
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.check_repetition(&self.inner)
    }
}

/// Between `min` and `max` repetitions; stops once `max` is reached
pub struct Rep<S> {
    inner: Expr<S>,
    min: usize,
    max: usize,
}

impl<S> Rule<S> for Rep<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        session.attempt(|session| {
            for _ in 0..self.min {
                if !strategy.invoke(self.inner.rule(), session, must)? {
                    return Ok(false);
                }
            }
            for _ in self.min..self.max {
                if session.cursor_ref().eof()
                    || !strategy.invoke(self.inner.rule(), session, false)?
                {
                    break;
                }
            }
            Ok(true)
        })
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let name = printer.name_of(&self.inner);
        if self.min == self.max {
            Description::expr(format!("{name}{{{}}}", self.min))
        } else {
            Description::expr(format!("{name}{{{},{}}}", self.min, self.max))
        }
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        self.min == 0 || self.inner.rule().nullable(named)
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.check_bounds(self.min, self.max)?;
        validator.visit(&self.inner)
    }
}

/// Cut: the inner rule is required
pub struct Must<S> {
    inner: Expr<S>,
}

impl<S> Rule<S> for Must<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        strategy.invoke(self.inner.rule(), session, true)
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        Description::expr(format!("!{}", printer.name_of(&self.inner)))
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        self.inner.rule().nullable(named)
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.visit(&self.inner)
    }
}

/// Zero-width predicate, positive or negated
pub struct Lookahead<S> {
    inner: Expr<S>,
    negated: bool,
}

impl<S> Rule<S> for Lookahead<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        _must: bool,
    ) -> Result<bool, ParseError> {
        let matched = session.lookahead(|session| strategy.invoke(self.inner.rule(), session, false))?;
        Ok(matched != self.negated)
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let prefix = if self.negated { '!' } else { '&' };
        Description::expr(format!("{prefix}{}", printer.name_of(&self.inner)))
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        true
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.visit(&self.inner)
    }
}

/// Conditional with optional else branch.
///
/// The condition is matched soft. When it matches, the then branch decides
/// the outcome; when it fails, the else branch does, or, without one, the
/// conditional succeeds for `ifthen` and fails for `ifmust`. The branches are
/// required when `forced` is set and inherit `must` otherwise.
pub struct Conditional<S> {
    cond: Expr<S>,
    then: Expr<S>,
    otherwise: Option<Expr<S>>,
    forced: bool,
}

impl<S> Rule<S> for Conditional<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        let branch_must = self.forced || must;
        session.attempt(|session| {
            if strategy.invoke(self.cond.rule(), session, false)? {
                return strategy.invoke(self.then.rule(), session, branch_must);
            }
            match &self.otherwise {
                Some(otherwise) => strategy.invoke(otherwise.rule(), session, branch_must),
                None => Ok(!self.forced),
            }
        })
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let arrow = if self.forced { "->>" } else { "-->" };
        let cond = printer.name_of(&self.cond);
        let then = printer.name_of(&self.then);
        match &self.otherwise {
            Some(otherwise) => {
                let otherwise = printer.name_of(otherwise);
                Description::expr(format!("( {cond} {arrow} {then} / {otherwise} )"))
            }
            None => Description::expr(format!("( {cond} {arrow} {then} )")),
        }
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        let taken = self.cond.rule().nullable(named) && self.then.rule().nullable(named);
        let skipped = match &self.otherwise {
            Some(otherwise) => otherwise.rule().nullable(named),
            None => !self.forced,
        };
        taken || skipped
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.visit(&self.cond)?;
        validator.visit(&self.then)?;
        match &self.otherwise {
            Some(otherwise) => validator.visit(otherwise),
            None => Ok(()),
        }
    }
}

/// Skip input until a zero-width check of `cond` succeeds.
///
/// Without a body each step consumes one byte; with one, each step must
/// match the body. Reaching eof before `cond` matches is a failure.
pub struct Until<S> {
    cond: Expr<S>,
    body: Option<Expr<S>>,
}

impl<S> Rule<S> for Until<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        session.attempt(|session| loop {
            if session.lookahead(|session| strategy.invoke(self.cond.rule(), session, false))? {
                return Ok(true);
            }
            if session.cursor_ref().eof() {
                return Ok(false);
            }
            match &self.body {
                Some(body) => {
                    if !strategy.invoke(body.rule(), session, must)? {
                        return Ok(false);
                    }
                }
                None => session.cursor().bump()?,
            }
        })
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let cond = printer.name_of(&self.cond);
        match &self.body {
            Some(body) => {
                let body = printer.name_of(body);
                Description::expr(format!("( {body} % {cond} )"))
            }
            None => Description::expr(format!("${cond}")),
        }
    }

    fn nullable(&self, _named: &NullableSet<'_>) -> bool {
        true
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.visit(&self.cond)?;
        match &self.body {
            Some(body) => validator.check_repetition(body),
            None => Ok(()),
        }
    }
}

#[must_use]
pub fn seq<S: 'static>(children: impl IntoIterator<Item = Expr<S>>) -> Expr<S> {
    Expr::new(Seq {
        children: children.into_iter().collect(),
    })
}

#[must_use]
pub fn sor<S: 'static>(children: impl IntoIterator<Item = Expr<S>>) -> Expr<S> {
    Expr::new(Sor {
        children: children.into_iter().collect(),
    })
}

#[must_use]
pub fn opt<S: 'static>(inner: Expr<S>) -> Expr<S> {
    Expr::new(Opt { inner })
}

/// Zero or more; `inner` must not be nullable
#[must_use]
pub fn star<S: 'static>(inner: Expr<S>) -> Expr<S> {
    Expr::new(Star { inner })
}

/// One or more; `inner` must not be nullable
#[must_use]
pub fn plus<S: 'static>(inner: Expr<S>) -> Expr<S> {
    Expr::new(Plus { inner })
}

/// Exactly `count` repetitions
#[must_use]
pub fn rep<S: 'static>(inner: Expr<S>, count: usize) -> Expr<S> {
    Expr::new(Rep {
        inner,
        min: count,
        max: count,
    })
}

/// At least `min` and at most `max` repetitions
#[must_use]
pub fn rep_between<S: 'static>(inner: Expr<S>, min: usize, max: usize) -> Expr<S> {
    Expr::new(Rep { inner, min, max })
}

#[must_use]
pub fn must<S: 'static>(inner: Expr<S>) -> Expr<S> {
    Expr::new(Must { inner })
}

#[must_use]
pub fn at<S: 'static>(inner: Expr<S>) -> Expr<S> {
    Expr::new(Lookahead {
        inner,
        negated: false,
    })
}

#[must_use]
pub fn not_at<S: 'static>(inner: Expr<S>) -> Expr<S> {
    Expr::new(Lookahead {
        inner,
        negated: true,
    })
}

fn conditional<S: 'static>(
    cond: Expr<S>,
    then: Expr<S>,
    otherwise: Option<Expr<S>>,
    forced: bool,
) -> Expr<S> {
    Expr::new(Conditional {
        cond,
        then,
        otherwise,
        forced,
    })
}

/// `then` after `cond`; succeeds without consuming if `cond` fails
#[must_use]
pub fn ifthen<S: 'static>(cond: Expr<S>, then: Expr<S>) -> Expr<S> {
    conditional(cond, then, None, false)
}

/// `then` is required once `cond` matched; fails if `cond` fails
#[must_use]
pub fn ifmust<S: 'static>(cond: Expr<S>, then: Expr<S>) -> Expr<S> {
    conditional(cond, then, None, true)
}

#[must_use]
pub fn ifthenelse<S: 'static>(cond: Expr<S>, then: Expr<S>, otherwise: Expr<S>) -> Expr<S> {
    conditional(cond, then, Some(otherwise), false)
}

/// As [`ifthenelse`] with both branches required
#[must_use]
pub fn ifmustelse<S: 'static>(cond: Expr<S>, then: Expr<S>, otherwise: Expr<S>) -> Expr<S> {
    conditional(cond, then, Some(otherwise), true)
}

/// Consume bytes until `cond` matches
#[must_use]
pub fn until<S: 'static>(cond: Expr<S>) -> Expr<S> {
    Expr::new(Until { cond, body: None })
}

/// Match `body` repeatedly until `cond` matches
#[must_use]
pub fn until_with<S: 'static>(body: Expr<S>, cond: Expr<S>) -> Expr<S> {
    Expr::new(Until {
        cond,
        body: Some(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::input::{Cursor, MemoryInput};
    use crate::parser::Parser;
    use crate::rules::{any, eof, one, string};

    fn matches(rule: Expr<()>, input: &str) -> (bool, usize) {
        let grammar = Grammar::from_rule("test", rule).unwrap();
        let mut cursor = MemoryInput::new(input, "test");
        let matched = Parser::new(&grammar)
            .try_match(&mut cursor, &mut ())
            .unwrap();
        (matched, cursor.here().offset())
    }

    #[test]
    fn test_seq_rolls_back_on_failure() {
        assert_eq!(matches(seq([one(b'a'), one(b'b')]), "ab"), (true, 2));
        assert_eq!(matches(seq([one(b'a'), one(b'b')]), "ac"), (false, 0));
        assert_eq!(matches(seq([]), "x"), (true, 0));
    }

    #[test]
    fn test_sor_first_match_wins() {
        assert_eq!(matches(sor([string("ab"), string("abc")]), "abc"), (true, 2));
        assert_eq!(matches(sor([one(b'x'), one(b'a')]), "a"), (true, 1));
        assert_eq!(matches(sor([]), "a"), (false, 0));
    }

    #[test]
    fn test_repetitions() {
        assert_eq!(matches(star(one(b'a')), "aaab"), (true, 3));
        assert_eq!(matches(star(one(b'a')), "b"), (true, 0));
        assert_eq!(matches(plus(one(b'a')), "b"), (false, 0));
        assert_eq!(matches(opt(one(b'a')), "b"), (true, 0));
        assert_eq!(matches(rep(one(b'a'), 2), "aaa"), (true, 2));
        assert_eq!(matches(rep(one(b'a'), 3), "aa"), (false, 0));
        assert_eq!(matches(rep_between(one(b'a'), 1, 3), "aaaaa"), (true, 3));
        assert_eq!(matches(rep_between(one(b'a'), 2, 3), "ab"), (false, 0));
    }

    #[test]
    fn test_predicates_are_zero_width() {
        assert_eq!(matches(at(one(b'a')), "a"), (true, 0));
        assert_eq!(matches(not_at(one(b'a')), "a"), (false, 0));
        assert_eq!(matches(not_at(one(b'a')), "b"), (true, 0));
    }

    #[test]
    fn test_conditionals() {
        assert_eq!(matches(ifthen(one(b'a'), one(b'b')), "x"), (true, 0));
        assert_eq!(matches(ifmust(one(b'a'), one(b'b')), "x"), (false, 0));
        assert_eq!(matches(ifthen(one(b'a'), one(b'b')), "ab"), (true, 2));
        assert_eq!(
            matches(ifthenelse(one(b'a'), one(b'b'), one(b'c')), "c"),
            (true, 1)
        );
    }

    #[test]
    fn test_ifmust_failure_after_condition_is_hard() {
        let grammar = Grammar::<()>::from_rule("test", ifmust(one(b'a'), one(b'b'))).unwrap();
        let mut cursor = MemoryInput::new("ac", "test");
        let error = Parser::new(&grammar)
            .try_match(&mut cursor, &mut ())
            .unwrap_err();
        assert!(error.is_cut());
    }

    #[test]
    fn test_until_leaves_condition_unconsumed() {
        assert_eq!(matches(until(one(b';')), "abc;"), (true, 3));
        assert_eq!(matches(until(one(b';')), "abc"), (false, 0));
        assert_eq!(matches(until_with(one(b'a'), one(b';')), "aa;"), (true, 2));
        assert_eq!(matches(until_with(one(b'a'), one(b';')), "ab;"), (false, 0));
        assert_eq!(matches(until(eof()), "xy"), (true, 2));
    }

    #[test]
    fn test_any_stops_at_eof() {
        assert_eq!(matches(seq([any(), any()]), "a"), (false, 0));
    }
}
