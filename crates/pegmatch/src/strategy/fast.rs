use super::{match_on_stack, Strategy};
use crate::error::ParseError;
use crate::rule::{Rule, Session};

/// Strategy without diagnostics.
///
/// A failure under cut raises a bare [`Cut`](crate::error::ParseErrorKind::Cut)
/// error carrying only the cursor's source label and location.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastStrategy;

impl FastStrategy {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Strategy<S> for FastStrategy {
    fn invoke(
        &mut self,
        rule: &dyn Rule<S>,
        session: &mut Session<'_, S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        let counter = session.counter();
        let _scope = counter.enter(session.cursor_ref(), must)?;
        let matched = match_on_stack(rule, session, self, must)?;
        if !matched && must {
            let cursor = session.cursor_ref();
            return Err(ParseError::cut(cursor.source(), cursor.location(), None));
        }
        Ok(matched)
    }
}
