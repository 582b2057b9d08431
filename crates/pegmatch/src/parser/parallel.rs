//! # Parallel Parsing Support
//!
//! Parsing many independent inputs against one shared grammar.
//!
//! Grammars are immutable, so a single [`Grammar`] can serve every worker.
//! Each input gets its own cursor, guard counters and external state; nothing
//! mutable is shared between parses.

use super::{ParseOutcome, Parser};
use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::input::MemoryInput;
use rayon::prelude::*;

/// Result of parsing one input of a batch
#[derive(Debug)]
pub struct BatchResult<S> {
    /// Source label of the input
    pub source: String,
    /// State after the parse
    pub state: S,
    pub result: Result<ParseOutcome, ParseError>,
}

impl<S> BatchResult<S> {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A batch of inputs to parse
#[derive(Debug, Clone, Default)]
pub struct ParseBatch {
    /// Inputs to parse: (source label, content)
    pub inputs: Vec<(String, String)>,
}

impl ParseBatch {
    #[must_use]
    pub const fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    pub fn add(&mut self, source: impl Into<String>, content: impl Into<String>) {
        self.inputs.push((source.into(), content.into()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl<'g, S> Parser<'g, S>
where
    S: Default + Send,
    Grammar<S>: Sync,
{
    /// Parse every input of `batch` in parallel, each with a fresh `S`.
    ///
    /// Results are returned in batch order.
    #[must_use]
    pub fn parse_batch(&self, batch: &ParseBatch) -> Vec<BatchResult<S>> {
        batch
            .inputs
            .par_iter()
            .map(|(source, content)| {
                let mut cursor = MemoryInput::new(content, source.as_str());
                let mut state = S::default();
                let result = self.parse(&mut cursor, &mut state);
                BatchResult {
                    source: source.clone(),
                    state,
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{digit, eof, plus, seq};

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let grammar = Grammar::<()>::from_rule("digits", seq([plus(digit()), eof()])).unwrap();
        let mut batch = ParseBatch::new();
        batch.add("one", "1");
        batch.add("bad", "x");
        batch.add("three", "333");

        let results = Parser::new(&grammar).parse_batch(&batch);
        let summary: Vec<_> = results
            .iter()
            .map(|result| (result.source.as_str(), result.is_ok()))
            .collect();
        assert_eq!(summary, vec![("one", true), ("bad", false), ("three", true)]);
        assert_eq!(results[2].result.as_ref().unwrap().consumed, 3);
    }
}
