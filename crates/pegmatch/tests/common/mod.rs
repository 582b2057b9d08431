//! Shared grammars for tests, benches and demos

#![allow(dead_code)]

use pegmatch::prelude::*;

/// Operand stack of the calculator
pub type Stack = Vec<i64>;

fn push_number(text: &str, stack: &mut Stack) -> Result<(), ActionError> {
    let value = text
        .trim()
        .parse::<i64>()
        .map_err(|_| ActionError::new(format!("invalid number {text:?}")))?;
    stack.push(value);
    Ok(())
}

fn binary(
    op: fn(i64, i64) -> Option<i64>,
    message: &'static str,
) -> impl Fn(&str, &mut Stack) -> Result<(), ActionError> {
    move |_: &str, stack: &mut Stack| {
        let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
            return Err(ActionError::new("operand stack underflow"));
        };
        let value = op(lhs, rhs).ok_or_else(|| ActionError::new(message))?;
        stack.push(value);
        Ok(())
    }
}

/// Integer calculator with `+ - * / %`, parentheses and the usual precedence.
///
/// ```text
/// calc := expr white_until_eof
/// expr := prod ( "+" prod / "-" prod )*
/// prod := atom ( "*" atom / "/" atom / "%" atom )*
/// atom := number / "(" expr ")"
/// ```
pub fn calculator() -> Grammar<Stack> {
    let mut builder = GrammarBuilder::new();
    let expr = builder.declare("expr");

    let number = label(seq([opt(list(b"+-")), plus(digit())]), "number");
    let push = pad(action(number, push_number), space());
    let open = pad_one(b'(', space());
    let close = pad_one(b')', space());
    let atom = builder.rule(
        "atom",
        sor([push, ifmust(open, seq([call(expr), close]))]),
    );

    let op = |byte: u8, operand: RuleId, f: fn(i64, i64) -> Option<i64>, message| {
        action(ifmust(pad_one(byte, space()), call(operand)), binary(f, message))
    };
    let prod = builder.rule(
        "prod",
        seq([
            call(atom),
            star(sor([
                op(b'*', atom, i64::checked_mul, "multiplication overflow"),
                op(b'/', atom, i64::checked_div, "division by zero"),
                op(b'%', atom, i64::checked_rem, "modulo by zero"),
            ])),
        ]),
    );
    builder.define(
        expr,
        seq([
            call(prod),
            star(sor([
                op(b'+', prod, i64::checked_add, "addition overflow"),
                op(b'-', prod, i64::checked_sub, "subtraction overflow"),
            ])),
        ]),
    );

    let calc = builder.rule("calc", seq([call(expr), white_until_eof()]));
    builder.entry(calc);
    match builder.build() {
        Ok(grammar) => grammar,
        Err(error) => panic!("calculator grammar is invalid: {error}"),
    }
}

/// Two equal digit runs separated by blanks
pub fn twice() -> Grammar<CaptureMap> {
    let rule = seq([
        store(plus(digit()), 42),
        plus(blank()),
        capture(42),
        eof(),
    ]);
    match Grammar::from_rule("twice", rule) {
        Ok(grammar) => grammar,
        Err(error) => panic!("capture grammar is invalid: {error}"),
    }
}
