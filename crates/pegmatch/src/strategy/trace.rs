use super::{match_on_stack, printed_rule, Guard, GuardState, Strategy};
use crate::error::ParseError;
use crate::input::{Location, Position};
use crate::rule::{Rule, Session};
use std::fmt;

/// Kind of a [`TraceEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEventKind {
    Start,
    Success,
    Failure,
    Unwind,
}

impl fmt::Display for TraceEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Start => "start",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Unwind => "unwind",
        })
    }
}

/// One traced rule invocation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub kind: TraceEventKind,
    /// Cut flag of the enclosing invocation
    pub must_old: bool,
    /// Cut flag of this invocation
    pub must: bool,
    /// Invocation sequence number, starting at 1
    pub rule: u64,
    /// Nesting depth, starting at 1
    pub nesting: usize,
    pub location: Location,
    /// Printed grammar rule
    pub expression: String,
    /// Escaped input consumed by the invocation
    pub consumed: String,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} flags {}{} rule {:4} nest {:3} at {} expression {} input \"{}\"",
            self.kind,
            u8::from(self.must_old),
            u8::from(self.must),
            self.rule,
            self.nesting,
            self.location,
            self.expression,
            self.consumed
        )
    }
}

/// Diagnostic strategy that also reports every invocation.
///
/// Events go to the `log` facade at trace level under the `pegmatch::trace`
/// target. A strategy created with [`recording`](Self::recording) also keeps
/// them in memory.
///
/// # Example
///
/// ```rust
/// use pegmatch::prelude::*;
///
/// let grammar = Grammar::<()>::from_rule("ab", string("ab")).unwrap();
/// let mut strategy = TraceStrategy::recording();
/// let mut input = MemoryInput::new("ab", "example");
/// parse_with(&grammar, &mut strategy, &mut input, &mut (), &GuardConfig::default()).unwrap();
/// assert_eq!(strategy.events().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TraceStrategy {
    enabled: bool,
    record: bool,
    events: Vec<TraceEvent>,
}

impl Default for TraceStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceStrategy {
    /// Trace to the `log` facade only
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            record: false,
            events: Vec::new(),
        }
    }

    /// Trace to the `log` facade and keep every event
    #[must_use]
    pub const fn recording() -> Self {
        Self {
            enabled: true,
            record: true,
            events: Vec::new(),
        }
    }

    /// Switch tracing on or off; diagnostics stay active either way
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit<S>(
        &mut self,
        kind: TraceEventKind,
        guard: &Guard<'_>,
        rule: &dyn Rule<S>,
        session: &Session<'_, S>,
        start: Position,
    ) {
        let cursor = session.cursor_ref();
        let event = TraceEvent {
            kind,
            must_old: guard.scope().must_old(),
            must: guard.scope().must(),
            rule: guard.scope().rule(),
            nesting: guard.scope().nesting(),
            location: cursor.location(),
            expression: printed_rule(session.grammar(), rule),
            consumed: cursor.debug_escape(start, cursor.here()),
        };
        log::trace!(target: "pegmatch::trace", "{}: {event}", cursor.source());
        if self.record {
            self.events.push(event);
        }
    }
}

impl<S> Strategy<S> for TraceStrategy {
    fn invoke(
        &mut self,
        rule: &dyn Rule<S>,
        session: &mut Session<'_, S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        let counter = session.counter();
        let mut guard = Guard::new(counter.enter(session.cursor_ref(), must)?);
        let start = session.cursor_ref().here();
        if self.enabled {
            self.emit(TraceEventKind::Start, &guard, rule, session, start);
        }

        let result = match_on_stack(rule, session, self, must);
        let result = guard.finish(rule, session, result);

        if self.enabled {
            let kind = match guard.state() {
                GuardState::Success => TraceEventKind::Success,
                GuardState::Failure => TraceEventKind::Failure,
                GuardState::Pending | GuardState::Unwound => TraceEventKind::Unwind,
            };
            self.emit(kind, &guard, rule, session, start);
        }
        result
    }
}
