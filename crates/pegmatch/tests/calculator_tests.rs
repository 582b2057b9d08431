//! End-to-end tests of the calculator grammar
//!
//! Integers with `+ - * / %`, parentheses, left-to-right evaluation and
//! `* / %` binding tighter than `+ -`.

mod common;

use common::{calculator, Stack};
use pegmatch::prelude::*;

fn evaluate(input: &str) -> Result<Stack, ParseError> {
    let grammar = calculator();
    let mut stack = Stack::new();
    Parser::new(&grammar).parse_str(input, &mut stack)?;
    Ok(stack)
}

#[test]
fn test_parenthesized_expression() {
    assert_eq!(evaluate("3 * ( -7 + 9 )").unwrap(), vec![6]);
}

#[test]
fn test_precedence() {
    assert_eq!(evaluate("1+2*3").unwrap(), vec![7]);
    assert_eq!(evaluate("(1+2)*3").unwrap(), vec![9]);
    assert_eq!(evaluate("2*3+4*5").unwrap(), vec![26]);
}

#[test]
fn test_left_to_right() {
    assert_eq!(evaluate("10-4-3").unwrap(), vec![3]);
    assert_eq!(evaluate("100/10/5").unwrap(), vec![2]);
    assert_eq!(evaluate("17 % 5 * 2").unwrap(), vec![4]);
}

#[test]
fn test_whitespace_is_ignored() {
    assert_eq!(evaluate("  1 +\t2\n").unwrap(), vec![3]);
}

#[test]
fn test_unbalanced_parenthesis_is_cut() {
    let error = evaluate("(1+2").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::Cut);
    assert_eq!(error.location.offset(), 4);
    assert_eq!(error.rule.as_deref(), Some("\")\""));
}

#[test]
fn test_division_by_zero_is_raised_by_action() {
    let error = evaluate("7/0").unwrap_err();
    assert_eq!(
        error.kind,
        ParseErrorKind::Action {
            message: "division by zero".to_string()
        }
    );
    assert_eq!(error.location.offset(), 3);
}

#[test]
fn test_trailing_garbage_is_rejected() {
    let error = evaluate("1 + 2 x").unwrap_err();
    assert!(error.is_cut());
}

#[test]
fn test_missing_operand_after_operator() {
    let error = evaluate("4 *").unwrap_err();
    assert!(error.is_cut());
    assert_eq!(error.location.offset(), 3);
}

#[test]
fn test_same_result_in_every_mode() {
    let grammar = calculator();
    for mode in [StrategyKind::Fast, StrategyKind::Diagnostic, StrategyKind::Trace] {
        let parser = Parser::with_config(&grammar, ParserConfig::with_mode(mode));
        let mut stack = Stack::new();
        parser.parse_str("2 * (3 + 4) - 5", &mut stack).unwrap();
        assert_eq!(stack, vec![9], "{mode:?}");
    }
}
