//! # Grammar Printer
//!
//! Human-readable listing of a grammar, keyed by rule identity.
//!
//! ## Overview
//!
//! A [`Printer`] walks the rules reachable from a top rule and asks each one to
//! [`describe`](crate::rule::Rule::describe) itself as a display name and an
//! expression written in terms of its children's names. Entries are memoized
//! by [`RuleKey`], so a recursive rule is expanded once and refers to itself by
//! name afterwards. The finished [`GrammarRegistry`] lists the entries in
//! discovery order.
//!
//! ## Notation
//!
//! | Rule | Printed |
//! |---|---|
//! | sequence | `( a b )` |
//! | ordered choice | `( a / b )` |
//! | repetition | `a*`, `a+`, `a?`, `a{n}`, `a{n,m}` |
//! | predicates | `&a`, `!a` |
//! | cut | `!a` |
//! | conditionals | `( c --> t )`, `( c ->> t )`, `( c --> t / e )` |
//! | until | `( b % c )`, `$c` |
//! | atoms | `"a"`, `"[^a]"`, `"[a-z]"`, `"abc"`, `.`, `&eof`, `T`, `_|_` |
//! | back-reference | `\key` |
//!
//! A named rule prints as `name === expression`.
//!
//! ## Example
//!
//! ```rust
//! use pegmatch::prelude::*;
//!
//! let grammar = Grammar::<()>::from_rule("pair", seq([one(b'a'), star(one(b'b'))])).unwrap();
//! let lines = grammar.registry().lines();
//! assert_eq!(lines[0], "RULE2 pair === ( \"a\" \"b\"* )");
//! ```

use crate::grammar::Grammar;
use crate::rule::{Expr, Rule, RuleKey};
use hashbrown::HashMap;
use std::fmt;

/// One registered rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleEntry {
    pub name: String,
    pub expression: String,
}

impl RuleEntry {
    /// Whether the name adds nothing over the expression
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() || self.name == self.expression
    }

    /// `name`, or `name === expression` for rules with their own name
    #[must_use]
    pub fn text(&self) -> String {
        if self.is_anonymous() {
            self.expression.clone()
        } else {
            format!("{} === {}", self.name, self.expression)
        }
    }
}

impl fmt::Display for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "RULE1 {}", self.expression)
        } else {
            write!(f, "RULE2 {} === {}", self.name, self.expression)
        }
    }
}

/// What a rule reports about itself to the printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub name: Option<String>,
    pub expression: String,
}

impl Description {
    /// An anonymous rule, displayed as its expression
    #[must_use]
    pub fn expr(expression: impl Into<String>) -> Self {
        Self {
            name: None,
            expression: expression.into(),
        }
    }

    /// A rule with a display name of its own
    #[must_use]
    pub fn named(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            expression: expression.into(),
        }
    }

    fn into_entry(self) -> RuleEntry {
        let name = self.name.unwrap_or_else(|| self.expression.clone());
        RuleEntry {
            name,
            expression: self.expression,
        }
    }
}

/// Registered rules of one top rule, in discovery order
#[derive(Debug, Clone, Default)]
pub struct GrammarRegistry {
    entries: Vec<RuleEntry>,
    index: HashMap<RuleKey, usize, ahash::RandomState>,
}

impl GrammarRegistry {
    /// Register `top` and everything reachable from it
    #[must_use]
    pub fn build<S>(grammar: &Grammar<S>, top: &dyn Rule<S>) -> Self {
        let mut printer = Printer::new(grammar);
        printer.insert(top);
        printer.finish()
    }

    #[must_use]
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: RuleKey) -> Option<&RuleEntry> {
        self.index.get(&key).and_then(|&index| self.entries.get(index))
    }

    /// Display text of a registered rule
    #[must_use]
    pub fn rule_text(&self, key: RuleKey) -> Option<String> {
        self.get(key).map(RuleEntry::text)
    }

    /// One `RULE1`/`RULE2` line per entry
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for GrammarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Builds a [`GrammarRegistry`]
pub struct Printer<'g, S> {
    grammar: &'g Grammar<S>,
    entries: Vec<RuleEntry>,
    index: HashMap<RuleKey, usize, ahash::RandomState>,
    by_text: HashMap<RuleEntry, usize, ahash::RandomState>,
}

impl<'g, S> Printer<'g, S> {
    #[must_use]
    pub fn new(grammar: &'g Grammar<S>) -> Self {
        Self {
            grammar,
            entries: Vec::new(),
            index: HashMap::with_hasher(ahash::RandomState::new()),
            by_text: HashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    #[must_use]
    pub const fn grammar(&self) -> &'g Grammar<S> {
        self.grammar
    }

    /// Register a rule unless its key is already known; returns its entry index.
    ///
    /// Named rules get their entry before their children are visited, which
    /// is what stops recursion. Anonymous rules with identical text share an
    /// entry.
    pub fn insert(&mut self, rule: &dyn Rule<S>) -> usize {
        let key = rule.key();
        if let Some(&index) = self.index.get(&key) {
            return index;
        }
        match key {
            RuleKey::Named(id) => {
                let name = self.grammar.name(id).unwrap_or_default().to_string();
                let index = self.entries.len();
                self.entries.push(RuleEntry {
                    expression: name.clone(),
                    name,
                });
                self.index.insert(key, index);
                let entry = rule.describe(self).into_entry();
                self.entries[index] = entry;
                index
            }
            RuleKey::Node(_) => {
                let entry = rule.describe(self).into_entry();
                let index = match self.by_text.get(&entry) {
                    Some(&index) => index,
                    None => {
                        let index = self.entries.len();
                        self.by_text.insert(entry.clone(), index);
                        self.entries.push(entry);
                        index
                    }
                };
                self.index.insert(key, index);
                index
            }
        }
    }

    /// Describe a rule again and overwrite its entry
    pub fn reinsert(&mut self, rule: &dyn Rule<S>) -> usize {
        let key = rule.key();
        let Some(&index) = self.index.get(&key) else {
            return self.insert(rule);
        };
        let entry = rule.describe(self).into_entry();
        self.entries[index] = entry;
        index
    }

    /// Name by which a parent refers to `child`
    pub fn name_of(&mut self, child: &Expr<S>) -> String {
        let index = self.insert(child.rule());
        self.entries[index].name.clone()
    }

    /// Names of several children
    pub fn names_of<'e>(&mut self, children: impl IntoIterator<Item = &'e Expr<S>>) -> Vec<String>
    where
        S: 'e,
    {
        children.into_iter().map(|child| self.name_of(child)).collect()
    }

    /// Describe `child` in place without consulting the memo
    pub fn expand(&mut self, child: &Expr<S>) -> Description {
        child.rule().describe(self)
    }

    /// Make `key` resolve to the entry already registered for `target`
    pub fn alias(&mut self, key: RuleKey, target: RuleKey) {
        if let Some(&index) = self.index.get(&target) {
            self.index.entry(key).or_insert(index);
        }
    }

    #[must_use]
    pub fn finish(self) -> GrammarRegistry {
        GrammarRegistry {
            entries: self.entries,
            index: self.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{call, GrammarBuilder};
    use crate::rules::{digit, one, plus, seq, sor};

    #[test]
    fn test_recursive_rule_terminates() {
        let mut builder = GrammarBuilder::<()>::new();
        let nested = builder.declare("nested");
        builder.define(nested, sor([seq([one(b'('), call(nested), one(b')')]), one(b'x')]));
        builder.entry(nested);
        let grammar = builder.build().unwrap();

        let lines = grammar.registry().lines();
        assert_eq!(
            lines[0],
            "RULE2 nested === ( ( \"(\" nested \")\" ) / \"x\" )"
        );
    }

    #[test]
    fn test_shared_leaf_registered_once() {
        let grammar =
            Grammar::<()>::from_rule("pair", seq([one(b'a'), one(b'a'), one(b'b')])).unwrap();
        let registry = grammar.registry();
        let names: Vec<_> = registry.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["pair", "\"a\"", "\"b\""]);
    }

    #[test]
    fn test_labelled_rule_keeps_name() {
        let grammar = Grammar::<()>::from_rule("number", plus(digit())).unwrap();
        let registry = grammar.registry();
        assert_eq!(
            registry.rule_text(grammar.top().key()).as_deref(),
            Some("number === digit+")
        );
        assert!(registry
            .entries()
            .iter()
            .any(|entry| entry.text() == "digit === \"[0-9]\""));
    }

    #[test]
    fn test_reinsert_overwrites_entry() {
        let grammar = Grammar::<()>::from_rule("a", one(b'a')).unwrap();
        let mut printer = Printer::new(&grammar);
        let index = printer.insert(grammar.top().rule());
        assert_eq!(printer.reinsert(grammar.top().rule()), index);
        let registry = printer.finish();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries()[index].text(), "a === \"a\"");
    }

    #[test]
    fn test_display_lists_every_entry() {
        let grammar = Grammar::<()>::from_rule("ab", seq([one(b'a'), one(b'b')])).unwrap();
        let text = grammar.registry().to_string();
        assert_eq!(
            text,
            "RULE2 ab === ( \"a\" \"b\" )\nRULE1 \"a\"\nRULE1 \"b\"\n"
        );
    }
}
