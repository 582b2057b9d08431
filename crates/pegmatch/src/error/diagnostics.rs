//! # Diagnostic Utilities
//!
//! Formatting helpers for [`ParseError`]:
//! - compiler-style `label:line:column: message` rendering
//! - full multi-line reports including the guard trail

use crate::error::ParseError;
use std::fmt::Write;

/// Format an error as `label:line:column: message`
///
/// # Example
///
/// ```rust
/// use pegmatch::error::{format_error_with_location, ParseError};
/// use pegmatch::input::Location;
///
/// let error = ParseError::cut("file calc.txt", Location::new(4, 1, 5), None);
/// assert_eq!(
///     format_error_with_location(&error),
///     "file calc.txt:1:5: parsing aborted"
/// );
/// ```
#[must_use]
pub fn format_error_with_location(error: &ParseError) -> String {
    let mut result = String::new();
    let _ = write!(
        result,
        "{}:{}:{}: {}",
        error.label,
        error.location.line(),
        error.location.column(),
        error.kind
    );
    if let Some(rule) = &error.rule {
        let _ = write!(result, " in rule {rule}");
    }
    result
}

/// Render the error followed by its trail, one line per unwound guard
///
/// The first line is the error's `Display` form. Trail lines are indented and
/// listed innermost first.
#[must_use]
pub fn format_report(error: &ParseError) -> String {
    let mut result = error.to_string();
    for line in &error.trail {
        result.push_str("\n  ");
        result.push_str(line);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Location;

    #[test]
    fn test_format_error_with_location_and_rule() {
        let error = ParseError::cut(
            "file calc.txt",
            Location::new(12, 2, 3),
            Some("close".to_string()),
        );
        assert_eq!(
            format_error_with_location(&error),
            "file calc.txt:2:3: parsing aborted in rule close"
        );
    }

    #[test]
    fn test_format_report_lists_trail() {
        let mut error = ParseError::cut("input", Location::start(), None);
        error.push_trail("nesting #02 at line=1 column=1 rule a");
        error.push_trail("nesting #01 at line=1 column=1 rule b");
        let report = format_report(&error);
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "  nesting #02 at line=1 column=1 rule a");
    }
}
