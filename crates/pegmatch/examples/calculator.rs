//! Integer calculator
//!
//! Evaluates each command line argument and prints the result, or the
//! diagnostic error for an argument that does not parse.
//!
//! Run with: `cargo run --example calculator -- "3 * ( -7 + 9 )" "1 +"`

#[path = "../tests/common/mod.rs"]
mod common;

use common::{calculator, Stack};
use pegmatch::error::format_report;
use pegmatch::prelude::*;

fn main() {
    let grammar = calculator();
    let parser = Parser::new(&grammar);

    let mut arguments: Vec<String> = std::env::args().skip(1).collect();
    if arguments.is_empty() {
        arguments = vec!["3 * ( -7 + 9 )".to_string(), "(1 + 2".to_string()];
    }

    for (index, argument) in arguments.iter().enumerate() {
        let mut input = MemoryInput::argument(argument.as_str(), index + 1);
        let mut stack = Stack::new();
        match parser.parse(&mut input, &mut stack) {
            Ok(_) => match stack.as_slice() {
                [value] => println!("{argument} = {value}"),
                _ => println!("{argument}: unexpected stack {stack:?}"),
            },
            Err(error) => println!("{}", format_report(&error)),
        }
    }
}
