//! # Grammar Module
//!
//! Named rule tables, recursion and construction-time checks.
//!
//! ## Overview
//!
//! Anonymous rules form a DAG of shared [`Expr`] handles. Recursion needs a
//! level of indirection: a rule is first declared by name, which hands out a
//! [`RuleId`], and [`call`] refers to it before its body exists. The
//! [`GrammarBuilder`] then checks the finished table:
//!
//! - every declared rule is defined exactly once
//! - ranges and bounded repetitions have sane bounds
//! - no unbounded repetition wraps a nullable rule
//!
//! ## Usage
//!
//! ```rust
//! use pegmatch::prelude::*;
//!
//! // list := item ( "," list )?
//! let mut builder = GrammarBuilder::<()>::new();
//! let list = builder.declare("list");
//! builder.define(list, seq([plus(digit()), opt(seq([one(b','), call(list)]))]));
//! builder.entry(list);
//! let grammar = builder.build()?;
//!
//! assert!(Parser::new(&grammar).parse_str("1,22,333", &mut ()).is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod builder;
pub mod validate;

pub use analysis::*;
pub use builder::*;
pub use validate::*;

use crate::error::{GrammarError, ParseError};
use crate::printer::{Description, GrammarRegistry, Printer, RuleEntry};
use crate::rule::{Delegate, Expr, Rule, RuleKey, Session};
use crate::strategy::Strategy;
use compact_str::CompactString;
use std::fmt;
use std::sync::OnceLock;

/// Index of a named rule in its grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated rule table with an entry rule.
///
/// Grammars are immutable and can be shared between threads; every parse
/// brings its own cursor, counters and state.
pub struct Grammar<S> {
    names: Vec<CompactString>,
    bodies: Vec<Expr<S>>,
    nullable: Vec<bool>,
    entry: RuleId,
    top: Expr<S>,
    registry: OnceLock<GrammarRegistry>,
}

impl<S: 'static> Grammar<S> {
    /// Grammar made of a single named rule
    ///
    /// # Errors
    ///
    /// Returns an error if `body` fails validation.
    pub fn from_rule(name: impl Into<CompactString>, body: Expr<S>) -> Result<Self, GrammarError> {
        let mut builder = GrammarBuilder::new();
        let id = builder.rule(name, body);
        builder.entry(id);
        builder.build()
    }

    pub(crate) fn new(
        names: Vec<CompactString>,
        bodies: Vec<Expr<S>>,
        nullable: Vec<bool>,
        entry: RuleId,
    ) -> Self {
        Self {
            names,
            bodies,
            nullable,
            entry,
            top: call(entry),
            registry: OnceLock::new(),
        }
    }
}

impl<S> Grammar<S> {
    #[must_use]
    pub const fn entry(&self) -> RuleId {
        self.entry
    }

    #[must_use]
    pub fn entry_name(&self) -> &str {
        self.name(self.entry).unwrap_or_default()
    }

    /// The entry rule as an expression
    #[must_use]
    pub const fn top(&self) -> &Expr<S> {
        &self.top
    }

    #[must_use]
    pub fn name(&self, id: RuleId) -> Option<&str> {
        self.names.get(id.index()).map(CompactString::as_str)
    }

    #[must_use]
    pub fn body(&self, id: RuleId) -> Option<&Expr<S>> {
        self.bodies.get(id.index())
    }

    /// Look up a rule by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<RuleId> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(RuleId::from_index)
    }

    #[must_use]
    pub fn is_nullable(&self, id: RuleId) -> bool {
        self.nullable.get(id.index()).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        (0..self.bodies.len()).map(RuleId::from_index)
    }

    /// Printer registry for the entry rule, built on first use
    pub fn registry(&self) -> &GrammarRegistry {
        self.registry
            .get_or_init(|| GrammarRegistry::build(self, self.top.rule()))
    }

    /// Every rule reachable from the entry rule, in discovery order
    #[must_use]
    pub fn print_rules(&self) -> &[RuleEntry] {
        self.registry().entries()
    }
}

impl<S> fmt::Debug for Grammar<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.names)
            .field("entry", &self.entry_name())
            .finish_non_exhaustive()
    }
}

/// Reference to a named rule of the grammar being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    id: RuleId,
}

impl<S> Rule<S> for Call {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        match session.grammar().body(self.id) {
            Some(body) => body.rule().match_rule(session, strategy, must),
            None => Ok(false),
        }
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let grammar = printer.grammar();
        let name = grammar.name(self.id).unwrap_or_default();
        match grammar.body(self.id) {
            Some(body) if matches!(body.key(), RuleKey::Named(_)) => {
                Description::named(name, printer.name_of(body))
            }
            Some(body) => {
                let expression = printer.expand(body).expression;
                printer.alias(body.key(), RuleKey::Named(self.id));
                Description::named(name, expression)
            }
            None => Description::named(name, name),
        }
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        named.contains(self.id)
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.check_call(self.id)
    }

    fn key(&self) -> RuleKey {
        RuleKey::Named(self.id)
    }

    fn delegate(&self) -> Option<Delegate<'_, S>> {
        Some(Delegate::Named(self.id))
    }
}

/// Refer to a named rule by id, allowing recursion
#[must_use]
pub fn call<S: 'static>(id: RuleId) -> Expr<S> {
    Expr::new(Call { id })
}
