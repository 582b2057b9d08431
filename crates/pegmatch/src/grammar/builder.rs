use super::{check_alias_cycles, nullable_rules, Grammar, NullableSet, RuleId, Validator};
use crate::error::GrammarError;
use crate::rule::Expr;
use compact_str::CompactString;

/// Builder for a [`Grammar`].
///
/// Rules are declared by name first so they can be referenced with
/// [`call`](super::call) before their body exists.
///
/// # Example
///
/// ```rust
/// use pegmatch::prelude::*;
///
/// // parens := "(" parens ")" / ""
/// let mut builder = GrammarBuilder::<()>::new();
/// let parens = builder.declare("parens");
/// builder.define(parens, opt(seq([one(b'('), call(parens), one(b')')])));
/// let top = builder.rule("top", seq([call(parens), eof()]));
/// builder.entry(top);
/// let grammar = builder.build().expect("valid grammar");
/// assert_eq!(grammar.entry_name(), "top");
/// ```
pub struct GrammarBuilder<S> {
    names: Vec<CompactString>,
    bodies: Vec<Option<Expr<S>>>,
    entry: Option<RuleId>,
    errors: Vec<GrammarError>,
}

impl<S: 'static> Default for GrammarBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> GrammarBuilder<S> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Vec::new(),
            bodies: Vec::new(),
            entry: None,
            errors: Vec::new(),
        }
    }

    /// Declare a named rule; declaring an existing name returns its id
    pub fn declare(&mut self, name: impl Into<CompactString>) -> RuleId {
        let name = name.into();
        if let Some(index) = self.names.iter().position(|existing| *existing == name) {
            return RuleId::from_index(index);
        }
        self.names.push(name);
        self.bodies.push(None);
        RuleId::from_index(self.names.len() - 1)
    }

    /// Give a declared rule its body
    pub fn define(&mut self, id: RuleId, body: Expr<S>) -> &mut Self {
        let Some(slot) = self.bodies.get_mut(id.index()) else {
            self.errors.push(GrammarError::UndefinedRule(id.to_string()));
            return self;
        };
        if slot.is_some() {
            self.errors.push(GrammarError::DuplicateDefinition(
                self.names[id.index()].to_string(),
            ));
        } else {
            *slot = Some(body);
        }
        self
    }

    /// Declare and define a rule in one step
    pub fn rule(&mut self, name: impl Into<CompactString>, body: Expr<S>) -> RuleId {
        let id = self.declare(name);
        self.define(id, body);
        id
    }

    /// Set the rule parsing starts from
    pub fn entry(&mut self, id: RuleId) -> &mut Self {
        self.entry = Some(id);
        self
    }

    /// Validate and build the grammar
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a duplicate or missing definition, a
    /// missing entry rule, invalid bounds, unbounded repetition of a nullable
    /// rule, or a rule that reaches itself through names, labels and actions
    /// alone.
    pub fn build(self) -> Result<Grammar<S>, GrammarError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        let mut bodies = Vec::with_capacity(self.bodies.len());
        for (name, body) in self.names.iter().zip(self.bodies) {
            match body {
                Some(body) => bodies.push(body),
                None => return Err(GrammarError::UndefinedRule(name.to_string())),
            }
        }

        let entry = match self.entry {
            Some(entry) if entry.index() < bodies.len() => entry,
            _ => return Err(GrammarError::MissingEntry),
        };

        let nullable = nullable_rules(&bodies);
        for (name, body) in self.names.iter().zip(&bodies) {
            let validator = Validator::new(NullableSet::new(&nullable), bodies.len(), name);
            validator.visit(body)?;
        }
        check_alias_cycles(&self.names, &bodies)?;

        log::debug!(
            "built grammar with {} rules, entry `{}`",
            bodies.len(),
            self.names[entry.index()]
        );
        Ok(Grammar::new(self.names, bodies, nullable, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::action;
    use crate::grammar::call;
    use crate::rules::{label, one, opt, plus, range, rep_between, seq, sor, star};

    #[test]
    fn test_declare_is_idempotent() {
        let mut builder = GrammarBuilder::<()>::new();
        let a = builder.declare("a");
        assert_eq!(builder.declare("a"), a);
        assert_ne!(builder.declare("b"), a);
    }

    #[test]
    fn test_undefined_rule() {
        let mut builder = GrammarBuilder::<()>::new();
        let missing = builder.declare("missing");
        let top = builder.rule("top", call(missing));
        builder.entry(top);
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::UndefinedRule("missing".to_string())
        );
    }

    #[test]
    fn test_duplicate_definition() {
        let mut builder = GrammarBuilder::<()>::new();
        let a = builder.rule("a", one(b'a'));
        builder.define(a, one(b'b'));
        builder.entry(a);
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::DuplicateDefinition("a".to_string())
        );
    }

    #[test]
    fn test_missing_entry() {
        let mut builder = GrammarBuilder::<()>::new();
        builder.rule("a", one(b'a'));
        assert_eq!(builder.build().unwrap_err(), GrammarError::MissingEntry);
    }

    #[test]
    fn test_star_of_nullable_rejected() {
        let result = Grammar::<()>::from_rule("bad", star(opt(one(b'a'))));
        assert_eq!(
            result.unwrap_err(),
            GrammarError::NullableRepetition {
                rule: "bad".to_string()
            }
        );
    }

    #[test]
    fn test_plus_of_nullable_named_rule_rejected() {
        let mut builder = GrammarBuilder::<()>::new();
        let maybe = builder.rule("maybe", opt(one(b'x')));
        let top = builder.rule("top", plus(call(maybe)));
        builder.entry(top);
        assert!(matches!(
            builder.build(),
            Err(GrammarError::NullableRepetition { rule }) if rule == "top"
        ));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(matches!(
            Grammar::<()>::from_rule("r", range(b'z', b'a')),
            Err(GrammarError::InvalidRange { lo: b'z', hi: b'a', .. })
        ));
        assert!(matches!(
            Grammar::<()>::from_rule("r", rep_between(one(b'a'), 3, 1)),
            Err(GrammarError::InvalidRepetition { min: 3, max: 1, .. })
        ));
    }

    #[test]
    fn test_recursive_grammar_builds() {
        let mut builder = GrammarBuilder::<()>::new();
        let nested = builder.declare("nested");
        builder.define(nested, seq([one(b'('), opt(call(nested)), one(b')')]));
        builder.entry(nested);
        let grammar = builder.build().unwrap();
        assert_eq!(grammar.rule_count(), 1);
        assert!(!grammar.is_nullable(nested));
        assert_eq!(grammar.find("nested"), Some(nested));
    }

    #[test]
    fn test_alias_cycle_rejected() {
        let mut builder = GrammarBuilder::<()>::new();
        let a = builder.declare("a");
        let b = builder.rule("b", call(a));
        builder.define(a, call(b));
        builder.entry(a);
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::AliasCycle {
                rule: "a".to_string()
            }
        );
    }

    #[test]
    fn test_self_reference_through_label_or_action_rejected() {
        let mut builder = GrammarBuilder::<()>::new();
        let a = builder.declare("a");
        builder.define(a, label(call(a), "again"));
        builder.entry(a);
        assert!(matches!(
            builder.build(),
            Err(GrammarError::AliasCycle { rule }) if rule == "a"
        ));

        let mut builder = GrammarBuilder::<()>::new();
        let a = builder.declare("a");
        builder.define(a, action(call(a), |_: &str, _: &mut ()| Ok(())));
        builder.entry(a);
        assert!(matches!(
            builder.build(),
            Err(GrammarError::AliasCycle { .. })
        ));
    }

    #[test]
    fn test_alias_chain_and_guarded_recursion_build() {
        let mut builder = GrammarBuilder::<()>::new();
        let digit = builder.rule("digit", label(range(b'0', b'9'), "d"));
        let number = builder.rule("number", call(digit));
        let list = builder.declare("list");
        // left recursion goes through sor and seq, which the guard sees
        builder.define(list, sor([seq([call(list), one(b','), call(number)]), call(number)]));
        builder.entry(list);
        assert!(builder.build().is_ok());
    }
}
