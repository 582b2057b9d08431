//! Property-based tests
//!
//! Random inputs against small grammars, checking the properties every
//! strategy must keep: a soft failure consumes nothing, ordered choice is
//! deterministic and all strategies agree on the outcome.

#![cfg(test)]

mod common;

use common::{calculator, Stack};
use pegmatch::prelude::*;
use proptest::prelude::{prop, prop_assert, prop_assert_eq, proptest, Strategy};

fn soft_rules() -> Vec<Expr<()>> {
    vec![
        seq([one(b'a'), one(b'b'), one(b'a')]),
        plus(sor([string("ab"), one(b'x')])),
        rep(one(b'a'), 2),
        seq([star(one(b'a')), one(b'b'), not_at(one(b'x'))]),
        ifthenelse(one(b'('), until(one(b')')), seq([any(), any()])),
        seq([opt(one(b' ')), list_of(one(b'x'), one(b' ')), eof()]),
    ]
}

fn numbers() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..1000, 1..12)
}

proptest! {
    #[test]
    fn soft_failure_consumes_nothing(input in "[abx() ]{0,12}") {
        for (index, rule) in soft_rules().into_iter().enumerate() {
            let grammar = Grammar::from_rule(format!("rule{index}"), rule).unwrap();
            let mut cursor = MemoryInput::new(input.as_str(), "prop");
            let matched = Parser::new(&grammar).try_match(&mut cursor, &mut ()).unwrap();
            if !matched {
                prop_assert_eq!(cursor.here().offset(), 0);
            }
            prop_assert!(cursor.here().offset() <= input.len());
        }
    }

    #[test]
    fn ordered_choice_takes_first_match(input in "[ab]{0,4}") {
        let grammar = Grammar::<()>::from_rule("choice", sor([string("ab"), one(b'a')])).unwrap();
        let mut cursor = MemoryInput::new(input.as_str(), "prop");
        let matched = Parser::new(&grammar).try_match(&mut cursor, &mut ()).unwrap();
        let expected = if input.starts_with("ab") {
            2
        } else if input.starts_with('a') {
            1
        } else {
            0
        };
        prop_assert_eq!(matched, expected > 0);
        prop_assert_eq!(cursor.here().offset(), expected);
    }

    #[test]
    fn sums_evaluate(values in numbers()) {
        let input = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        let grammar = calculator();
        let mut stack = Stack::new();
        Parser::new(&grammar).parse_str(&input, &mut stack).unwrap();
        let sum: i64 = values.iter().map(|&value| i64::from(value)).sum();
        prop_assert_eq!(stack, vec![sum]);
    }

    #[test]
    fn strategies_agree(input in "[0-9+*() ]{1,16}") {
        let grammar = calculator();
        let mut outcomes = Vec::new();
        for mode in [StrategyKind::Fast, StrategyKind::Diagnostic, StrategyKind::Trace] {
            let parser = Parser::with_config(&grammar, ParserConfig::with_mode(mode));
            let mut stack = Stack::new();
            let result = parser.parse_str(&input, &mut stack);
            outcomes.push(result.map(|outcome| (outcome.consumed, stack)).map_err(|error| {
                (error.location.offset(), error.kind)
            }));
        }
        prop_assert_eq!(&outcomes[0], &outcomes[1]);
        prop_assert_eq!(&outcomes[1], &outcomes[2]);
    }
}
