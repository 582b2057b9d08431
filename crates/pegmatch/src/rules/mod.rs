//! # Rule Library
//!
//! Builders for every rule the engine ships with.
//!
//! ## Overview
//!
//! - [`atomic`]: single bytes, byte classes, literals, end of input
//! - [`combinator`]: sequence, ordered choice, repetition, predicates, cut,
//!   conditionals and `until`
//! - [`ascii`]: named character classes and common composites
//!
//! All builders return an [`Expr`](crate::rule::Expr) and can be freely
//! nested. Actions and back-references live in [`action`](crate::action).
//!
//! ## Example
//!
//! ```rust
//! use pegmatch::prelude::*;
//!
//! // key = value
//! let pair = seq([identifier(), pad_one(b'=', blank()), plus(alnum())]);
//! let grammar = Grammar::<()>::from_rule("pair", pair)?;
//! assert!(Parser::new(&grammar).parse_str("answer = 42", &mut ()).is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ascii;
pub mod atomic;
pub mod combinator;

pub use ascii::*;
pub use atomic::*;
pub use combinator::*;
