//! Rule-invocation and nesting counters
//!
//! Every strategy enters the [`Counter`] before matching a rule and leaves it
//! when the returned [`Scope`] is dropped, so the nesting depth returns to its
//! previous value on success, on failure, and while a hard error unwinds.

use crate::error::{ParseError, ParseErrorKind};
use crate::input::Cursor;
use std::cell::Cell;

/// Limits enforced by the rule guard.
///
/// # Example
///
/// ```rust
/// use pegmatch::strategy::GuardConfig;
///
/// let config = GuardConfig {
///     max_nesting: 500,
///     ..GuardConfig::default()
/// };
/// assert_eq!(config.max_rules, 4_000_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Maximum number of rule invocations for one parse
    pub max_rules: u64,

    /// Maximum nesting depth of rule invocations
    ///
    /// Strategies grow the native stack on demand, so this limit holds on a
    /// thread of any stack size.
    pub max_nesting: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_rules: 4_000_000_000,
            max_nesting: 20_000,
        }
    }
}

/// Per-parse guard counters.
///
/// Uses interior mutability so a [`Scope`] can hold it while the session is
/// mutably borrowed by the rule being matched.
#[derive(Debug)]
pub struct Counter {
    config: GuardConfig,
    rules: Cell<u64>,
    nesting: Cell<usize>,
    peak: Cell<usize>,
    must: Cell<bool>,
}

impl Counter {
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            rules: Cell::new(0),
            nesting: Cell::new(0),
            peak: Cell::new(0),
            must: Cell::new(true),
        }
    }

    /// Total rule invocations so far
    #[must_use]
    pub fn rules(&self) -> u64 {
        self.rules.get()
    }

    /// Current nesting depth
    #[must_use]
    pub fn nesting(&self) -> usize {
        self.nesting.get()
    }

    /// Deepest nesting reached so far
    #[must_use]
    pub fn peak(&self) -> usize {
        self.peak.get()
    }

    /// Cut flag of the innermost active invocation
    #[must_use]
    pub fn must(&self) -> bool {
        self.must.get()
    }

    #[must_use]
    pub const fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Enter one rule invocation.
    ///
    /// # Errors
    ///
    /// Returns a resource-limit error when either maximum would be exceeded.
    /// The nesting depth is left unchanged in that case.
    pub fn enter(&self, cursor: &dyn Cursor, must: bool) -> Result<Scope<'_>, ParseError> {
        let rule = self.rules.get().saturating_add(1);
        if rule > self.config.max_rules {
            return Err(ParseError::new(
                ParseErrorKind::RuleLimit {
                    limit: self.config.max_rules,
                },
                cursor.source(),
                cursor.location(),
            ));
        }
        self.rules.set(rule);

        let nesting = self.nesting.get() + 1;
        if nesting > self.config.max_nesting {
            return Err(ParseError::new(
                ParseErrorKind::NestingLimit {
                    limit: self.config.max_nesting,
                },
                cursor.source(),
                cursor.location(),
            ));
        }
        self.nesting.set(nesting);
        self.peak.set(self.peak.get().max(nesting));

        Ok(Scope {
            counter: self,
            rule,
            nesting,
            must_old: self.must.replace(must),
        })
    }
}

/// One entered invocation; leaves the counter when dropped
#[derive(Debug)]
#[must_use = "dropping the scope leaves the rule immediately"]
pub struct Scope<'c> {
    counter: &'c Counter,
    rule: u64,
    nesting: usize,
    must_old: bool,
}

impl Scope<'_> {
    /// Sequence number of this invocation, starting at 1
    #[must_use]
    pub const fn rule(&self) -> u64 {
        self.rule
    }

    /// Nesting depth of this invocation, starting at 1
    #[must_use]
    pub const fn nesting(&self) -> usize {
        self.nesting
    }

    /// Cut flag of the enclosing invocation
    #[must_use]
    pub const fn must_old(&self) -> bool {
        self.must_old
    }

    #[must_use]
    pub fn must(&self) -> bool {
        self.counter.must()
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.counter
            .nesting
            .set(self.counter.nesting.get().saturating_sub(1));
        self.counter.must.set(self.must_old);
    }
}
