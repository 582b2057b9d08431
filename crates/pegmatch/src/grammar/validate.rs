use super::{NullableSet, RuleId};
use crate::error::GrammarError;
use crate::rule::{Delegate, Expr};
use compact_str::CompactString;

/// Context for [`Rule::validate`](crate::rule::Rule::validate)
///
/// Carries the nullable analysis and the name of the definition being checked,
/// which is what errors report.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    nullable: NullableSet<'a>,
    rule_count: usize,
    current: &'a str,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub const fn new(nullable: NullableSet<'a>, rule_count: usize, current: &'a str) -> Self {
        Self {
            nullable,
            rule_count,
            current,
        }
    }

    #[must_use]
    pub const fn nullable(&self) -> &NullableSet<'a> {
        &self.nullable
    }

    /// Validate a child rule
    ///
    /// # Errors
    ///
    /// Returns the child's first problem.
    pub fn visit<S>(&self, child: &Expr<S>) -> Result<(), GrammarError> {
        child.rule().validate(self)
    }

    /// Reject unbounded repetition of a nullable rule
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::NullableRepetition`] if `child` is nullable.
    pub fn check_repetition<S>(&self, child: &Expr<S>) -> Result<(), GrammarError> {
        if child.rule().nullable(&self.nullable) {
            return Err(GrammarError::NullableRepetition {
                rule: self.current.to_string(),
            });
        }
        self.visit(child)
    }

    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidRange`] if `lo > hi`.
    pub fn check_range(&self, lo: u8, hi: u8) -> Result<(), GrammarError> {
        if lo > hi {
            return Err(GrammarError::InvalidRange {
                rule: self.current.to_string(),
                lo,
                hi,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidRepetition`] if `min > max`.
    pub fn check_bounds(&self, min: usize, max: usize) -> Result<(), GrammarError> {
        if min > max {
            return Err(GrammarError::InvalidRepetition {
                rule: self.current.to_string(),
                min,
                max,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GrammarError::UndefinedRule`] if `id` is not part of the grammar.
    pub fn check_call(&self, id: RuleId) -> Result<(), GrammarError> {
        if id.index() >= self.rule_count {
            return Err(GrammarError::UndefinedRule(id.to_string()));
        }
        Ok(())
    }
}

/// Reject named rules that call themselves without a strategy invocation in
/// between.
///
/// Names, labels and actions match their target directly, so a cycle made only
/// of those never enters the guard and cannot be stopped by its limits.
///
/// # Errors
///
/// Returns [`GrammarError::AliasCycle`] naming the first rule found twice.
pub fn check_alias_cycles<S>(
    names: &[CompactString],
    bodies: &[Expr<S>],
) -> Result<(), GrammarError> {
    for (index, body) in bodies.iter().enumerate() {
        let mut seen = vec![false; bodies.len()];
        seen[index] = true;
        let mut current = body;
        loop {
            match current.rule().delegate() {
                Some(Delegate::Expr(inner)) => current = inner,
                Some(Delegate::Named(id)) => {
                    let Some(next) = bodies.get(id.index()) else {
                        break;
                    };
                    if std::mem::replace(&mut seen[id.index()], true) {
                        return Err(GrammarError::AliasCycle {
                            rule: names.get(id.index()).map(ToString::to_string).unwrap_or_default(),
                        });
                    }
                    current = next;
                }
                None => break,
            }
        }
    }
    Ok(())
}
