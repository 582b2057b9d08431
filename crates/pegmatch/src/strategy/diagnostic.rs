use super::{match_on_stack, Guard, Strategy};
use crate::error::ParseError;
use crate::rule::{Rule, Session};

/// Strategy that names the failing grammar rule.
///
/// Wraps every invocation in a [`Guard`]. A failure under cut raises an error
/// carrying the printed rule, and each guard the error unwinds through appends
/// a `nesting #NN at LOCATION rule RULE` line to its trail.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticStrategy;

impl DiagnosticStrategy {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Strategy<S> for DiagnosticStrategy {
    fn invoke(
        &mut self,
        rule: &dyn Rule<S>,
        session: &mut Session<'_, S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        let counter = session.counter();
        let mut guard = Guard::new(counter.enter(session.cursor_ref(), must)?);
        let result = match_on_stack(rule, session, self, must);
        guard.finish(rule, session, result)
    }
}
