//! Parsing many inputs against one shared grammar

#![cfg(feature = "parallel")]

mod common;

use common::calculator;
use pegmatch::parser::ParseBatch;
use pegmatch::prelude::*;

#[test]
fn test_batch_evaluates_each_input_with_its_own_state() {
    let grammar = calculator();
    let mut batch = ParseBatch::new();
    for i in 0..64 {
        batch.add(format!("input {i}"), format!("{i} * 2 + 1"));
    }
    batch.add("broken", "(1 +");

    let results = Parser::new(&grammar).parse_batch(&batch);
    assert_eq!(results.len(), 65);
    for (i, result) in results.iter().take(64).enumerate() {
        let expected = i64::try_from(i).unwrap() * 2 + 1;
        assert_eq!(result.state, vec![expected], "{}", result.source);
    }

    let broken = &results[64];
    assert_eq!(broken.source, "broken");
    let error = broken.result.as_ref().unwrap_err();
    assert!(error.is_cut());
    assert_eq!(error.label, "broken");
}

#[test]
fn test_grammar_shared_across_threads() {
    let grammar = calculator();
    std::thread::scope(|scope| {
        for i in 0..4_i64 {
            let grammar = &grammar;
            scope.spawn(move || {
                let mut stack = Vec::new();
                Parser::new(grammar)
                    .parse_str(&format!("{i} + {i}"), &mut stack)
                    .unwrap();
                assert_eq!(stack, vec![i + i]);
            });
        }
    });
}
