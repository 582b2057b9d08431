//! # Pegmatch
//!
//! PEG parser combinators with cut, backtracking and pluggable diagnostics.
//!
//! ## Overview
//!
//! Grammars are built at run time from small composable rules and matched
//! directly against bytes. There is no separate lexer and no tree: rules
//! attach actions that update caller-owned state as input is recognised.
//!
//! - **Ordered choice and backtracking**: every failed match leaves the cursor
//!   exactly where it started
//! - **Cut**: `must` and `ifmust` turn an expected failure into a hard error
//!   pointing at the rule that failed
//! - **Strategies**: the same grammar runs fast, with diagnostics, or with a
//!   full trace of every rule invocation
//! - **Guard**: configurable limits on rule invocations and nesting depth
//! - **Grammar printer**: a readable listing of any grammar, recursion included
//!
//! ## Quick Start
//!
//! A calculator for sums of integers:
//!
//! ```rust
//! use pegmatch::prelude::*;
//!
//! let number = action(plus(digit()), |text: &str, stack: &mut Vec<i64>| {
//!     stack.push(text.parse::<i64>().map_err(|_| ActionError::new("number too large"))?);
//!     Ok(())
//! });
//! let add = action(ifmust(one(b'+'), number.clone()), |_: &str, stack: &mut Vec<i64>| {
//!     let rhs = stack.pop().unwrap_or_default();
//!     let lhs = stack.pop().unwrap_or_default();
//!     stack.push(lhs + rhs);
//!     Ok(())
//! });
//! let sum = seq([number, star(add), eof()]);
//!
//! let grammar = Grammar::from_rule("sum", sum)?;
//! let mut stack = Vec::new();
//! Parser::new(&grammar).parse_str("1+20+300", &mut stack)?;
//! assert_eq!(stack, vec![321]);
//!
//! // A missing operand after `+` is a hard error
//! let error = Parser::new(&grammar).parse_str("1+", &mut Vec::new()).unwrap_err();
//! assert!(error.is_cut());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`input`] - Cursor capability and the in-memory input
//! - [`marker`] - Commit/rollback markers
//! - [`rule`] - The `Rule` trait and the per-parse session
//! - [`rules`] - Atomic matchers, combinators and ASCII helpers
//! - [`action`] - Actions, capture and back-reference
//! - [`strategy`] - Fast, diagnostic and trace strategies and the guard
//! - [`grammar`] - Named rules, recursion and construction-time checks
//! - [`printer`] - Grammar listing
//! - [`parser`] - Parse entry points
//! - [`error`] - Error types and formatting

pub mod action;
pub mod error;
pub mod grammar;
pub mod input;
pub mod marker;
pub mod parser;
pub mod printer;
pub mod rule;
pub mod rules;
pub mod strategy;

// Re-export commonly used types
pub use error::{ActionError, GrammarError, ParseError, ParseErrorKind};
pub use grammar::{call, Grammar, GrammarBuilder, RuleId};
pub use input::{Cursor, Location, MemoryInput, Position};
pub use parser::{parse_with, ParseMetrics, ParseOutcome, Parser, ParserConfig};
pub use printer::{GrammarRegistry, RuleEntry};
pub use rule::{Expr, Rule};
pub use strategy::{GuardConfig, StrategyKind};

/// Everything needed to write and run a grammar
pub mod prelude {
    pub use crate::action::*;
    pub use crate::error::{ActionError, GrammarError, ParseError, ParseErrorKind};
    pub use crate::grammar::{call, Grammar, GrammarBuilder, RuleId};
    pub use crate::input::{Cursor, MemoryInput};
    pub use crate::parser::{parse_with, ParseOutcome, Parser, ParserConfig};
    pub use crate::rule::Expr;
    pub use crate::rules::*;
    pub use crate::strategy::{
        DiagnosticStrategy, FastStrategy, GuardConfig, Strategy, StrategyKind, TraceStrategy,
    };
}
