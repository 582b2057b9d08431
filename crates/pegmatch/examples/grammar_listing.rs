//! Grammar listing and tracing
//!
//! Prints the calculator grammar, then traces one parse and prints every
//! recorded invocation event.
//!
//! Run with: `cargo run --example grammar_listing`

#[path = "../tests/common/mod.rs"]
mod common;

use common::{calculator, Stack};
use pegmatch::prelude::*;

fn main() -> Result<(), ParseError> {
    let grammar = calculator();
    print!("{}", grammar.registry());

    let mut strategy = TraceStrategy::recording();
    let mut input = MemoryInput::new("1 + 2", "demo");
    let mut stack = Stack::new();
    let outcome = parse_with(
        &grammar,
        &mut strategy,
        &mut input,
        &mut stack,
        &GuardConfig::default(),
    )?;

    for event in strategy.events() {
        println!("{event}");
    }
    println!(
        "{} rule invocations, nesting {}, result {stack:?}",
        outcome.metrics.rules_invoked, outcome.metrics.max_nesting
    );
    Ok(())
}
