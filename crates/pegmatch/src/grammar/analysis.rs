//! Grammar analysis utilities
//!
//! Nullable detection for named rules. A rule is nullable if it can succeed
//! without consuming input; unbounded repetition of such a rule never
//! terminates.

use super::RuleId;
use crate::rule::Expr;

/// Nullability of the named rules of a grammar
#[derive(Debug, Clone, Copy)]
pub struct NullableSet<'a>(&'a [bool]);

impl<'a> NullableSet<'a> {
    #[must_use]
    pub const fn new(nullable: &'a [bool]) -> Self {
        Self(nullable)
    }

    /// Whether the named rule is nullable; unknown ids are not
    #[must_use]
    pub fn contains(&self, id: RuleId) -> bool {
        self.0.get(id.index()).copied().unwrap_or(false)
    }
}

/// Compute which named rules are nullable.
///
/// Least fixpoint: every rule starts non-nullable and is marked nullable once
/// its body is, given the rules marked so far. Recursion through a rule that
/// has not been marked yet therefore counts as consuming.
#[must_use]
pub fn nullable_rules<S>(bodies: &[Expr<S>]) -> Vec<bool> {
    let mut nullable = vec![false; bodies.len()];
    loop {
        let mut changed = false;
        for (index, body) in bodies.iter().enumerate() {
            if !nullable[index] && body.rule().nullable(&NullableSet::new(&nullable)) {
                nullable[index] = true;
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}
