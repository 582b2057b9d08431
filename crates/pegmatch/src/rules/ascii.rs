//! ASCII rules
//!
//! Character classes and the small composite rules most text grammars need.
//! Classes carry a display name through [`label`], so a grammar listing shows
//! `digit+` rather than `"[0-9]"+`.

use super::{eof, ifmust, list, one, plus, range, seq, sor, star, string, until, until_with};
use crate::error::{GrammarError, ParseError};
use crate::grammar::{NullableSet, Validator};
use crate::printer::{Description, Printer};
use crate::rule::{Delegate, Expr, Rule, Session};
use crate::strategy::Strategy;
use compact_str::CompactString;

/// An expression with a display name of its own.
///
/// Matching is delegated to the inner rule unchanged.
pub struct Label<S> {
    name: CompactString,
    inner: Expr<S>,
}

impl<S> Rule<S> for Label<S> {
    fn match_rule(
        &self,
        session: &mut Session<'_, S>,
        strategy: &mut dyn Strategy<S>,
        must: bool,
    ) -> Result<bool, ParseError> {
        self.inner.rule().match_rule(session, strategy, must)
    }

    fn describe(&self, printer: &mut Printer<'_, S>) -> Description {
        let expression = printer.expand(&self.inner).expression;
        Description::named(self.name.as_str(), expression)
    }

    fn nullable(&self, named: &NullableSet<'_>) -> bool {
        self.inner.rule().nullable(named)
    }

    fn validate(&self, validator: &Validator<'_>) -> Result<(), GrammarError> {
        validator.visit(&self.inner)
    }

    fn delegate(&self) -> Option<Delegate<'_, S>> {
        Some(Delegate::Expr(&self.inner))
    }
}

#[must_use]
pub fn label<S: 'static>(inner: Expr<S>, name: impl Into<CompactString>) -> Expr<S> {
    Expr::new(Label {
        name: name.into(),
        inner,
    })
}

#[must_use]
pub fn digit<S: 'static>() -> Expr<S> {
    label(range(b'0', b'9'), "digit")
}

#[must_use]
pub fn lower<S: 'static>() -> Expr<S> {
    label(range(b'a', b'z'), "lower")
}

#[must_use]
pub fn upper<S: 'static>() -> Expr<S> {
    label(range(b'A', b'Z'), "upper")
}

#[must_use]
pub fn alpha<S: 'static>() -> Expr<S> {
    label(sor([lower(), upper()]), "alpha")
}

#[must_use]
pub fn alnum<S: 'static>() -> Expr<S> {
    label(sor([alpha(), digit()]), "alnum")
}

#[must_use]
pub fn xdigit<S: 'static>() -> Expr<S> {
    label(
        sor([digit(), range(b'a', b'f'), range(b'A', b'F')]),
        "xdigit",
    )
}

/// Space or tab
#[must_use]
pub fn blank<S: 'static>() -> Expr<S> {
    label(list(b" \t"), "blank")
}

/// Any ASCII whitespace, line breaks included
#[must_use]
pub fn space<S: 'static>() -> Expr<S> {
    label(list(b" \n\r\t\x0b\x0c"), "space")
}

/// First byte of an identifier: `_` or a letter
#[must_use]
pub fn ident_first<S: 'static>() -> Expr<S> {
    sor([one(b'_'), alpha()])
}

#[must_use]
pub fn ident_other<S: 'static>() -> Expr<S> {
    sor([digit(), ident_first()])
}

#[must_use]
pub fn identifier<S: 'static>() -> Expr<S> {
    label(seq([ident_first(), star(ident_other())]), "identifier")
}

#[must_use]
pub fn lf<S: 'static>() -> Expr<S> {
    one(b'\n')
}

#[must_use]
pub fn cr<S: 'static>() -> Expr<S> {
    one(b'\r')
}

#[must_use]
pub fn crlf<S: 'static>() -> Expr<S> {
    string("\r\n")
}

/// End of line; end of input counts as one
#[must_use]
pub fn eol<S: 'static>() -> Expr<S> {
    sor([eof(), crlf(), lf(), cr()])
}

#[must_use]
pub fn space_star<S: 'static>() -> Expr<S> {
    star(blank())
}

#[must_use]
pub fn space_plus<S: 'static>() -> Expr<S> {
    plus(blank())
}

#[must_use]
pub fn white_star<S: 'static>() -> Expr<S> {
    star(space())
}

#[must_use]
pub fn white_plus<S: 'static>() -> Expr<S> {
    plus(space())
}

/// Rest of the line, without the line ending
#[must_use]
pub fn until_eol<S: 'static>() -> Expr<S> {
    until(eol())
}

/// Only whitespace up to the end of input
#[must_use]
pub fn white_until_eof<S: 'static>() -> Expr<S> {
    until_with(space(), eof())
}

/// Only blanks up to the end of the line
#[must_use]
pub fn space_until_eol<S: 'static>() -> Expr<S> {
    until_with(blank(), eol())
}

/// `#!` line at the start of a script
#[must_use]
pub fn shebang<S: 'static>() -> Expr<S> {
    ifmust(string("#!"), until_eol())
}

/// `inner` surrounded by any amount of `padding`
#[must_use]
pub fn pad<S: 'static>(inner: Expr<S>, padding: Expr<S>) -> Expr<S> {
    seq([star(padding.clone()), inner, star(padding)])
}

/// `inner` preceded by any amount of `padding`
#[must_use]
pub fn padl<S: 'static>(inner: Expr<S>, padding: Expr<S>) -> Expr<S> {
    seq([star(padding), inner])
}

/// `inner` followed by any amount of `padding`
#[must_use]
pub fn padr<S: 'static>(inner: Expr<S>, padding: Expr<S>) -> Expr<S> {
    seq([inner, star(padding)])
}

/// A single byte surrounded by `padding`
#[must_use]
pub fn pad_one<S: 'static>(byte: u8, padding: Expr<S>) -> Expr<S> {
    pad(one(byte), padding)
}

/// One or more `item`s separated by `glue`
#[must_use]
pub fn list_of<S: 'static>(item: Expr<S>, glue: Expr<S>) -> Expr<S> {
    seq([item.clone(), star(seq([glue, item]))])
}

/// As [`list_of`], but an item is required after every `glue`
#[must_use]
pub fn list_must<S: 'static>(item: Expr<S>, glue: Expr<S>) -> Expr<S> {
    seq([item.clone(), star(ifmust(glue, item))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::input::{Cursor, MemoryInput};
    use crate::parser::Parser;

    fn consumed(rule: Expr<()>, input: &str) -> Option<usize> {
        let grammar = Grammar::from_rule("test", rule).unwrap();
        let mut cursor = MemoryInput::new(input, "test");
        let matched = Parser::new(&grammar)
            .try_match(&mut cursor, &mut ())
            .unwrap();
        matched.then(|| cursor.here().offset())
    }

    #[test]
    fn test_identifier() {
        assert_eq!(consumed(identifier(), "_foo42 bar"), Some(6));
        assert_eq!(consumed(identifier(), "9lives"), None);
    }

    #[test]
    fn test_xdigit() {
        assert_eq!(consumed(plus(xdigit()), "0fA9g"), Some(4));
    }

    #[test]
    fn test_eol_variants() {
        assert_eq!(consumed(eol(), "\r\nx"), Some(2));
        assert_eq!(consumed(eol(), "\rx"), Some(1));
        assert_eq!(consumed(eol(), ""), Some(0));
        assert_eq!(consumed(eol(), "x"), None);
    }

    #[test]
    fn test_until_eol_stops_before_line_break() {
        assert_eq!(consumed(until_eol(), "abc\ndef"), Some(3));
        assert_eq!(consumed(until_eol(), "abc"), Some(3));
    }

    #[test]
    fn test_white_until_eof() {
        assert_eq!(consumed(white_until_eof(), " \t\n "), Some(4));
        assert_eq!(consumed(white_until_eof(), "  x"), None);
    }

    #[test]
    fn test_shebang() {
        assert_eq!(consumed(shebang(), "#!/bin/sh\nrest"), Some(9));
        assert_eq!(consumed(shebang(), "echo"), None);
    }

    #[test]
    fn test_padding_and_lists() {
        assert_eq!(consumed(pad_one(b'=', blank()), "  =  x"), Some(5));
        assert_eq!(
            consumed(list_of(plus(digit()), one(b',')), "1,22,x"),
            Some(4)
        );
        assert_eq!(consumed(padl(one(b'x'), blank()), "  x "), Some(3));
        assert_eq!(consumed(padr(one(b'x'), blank()), "x  y"), Some(3));
    }

    #[test]
    fn test_list_must_requires_item_after_glue() {
        let grammar = Grammar::from_rule("test", list_must(plus(digit::<()>()), one(b','))).unwrap();
        let mut cursor = MemoryInput::new("1,x", "test");
        let error = Parser::new(&grammar)
            .try_match(&mut cursor, &mut ())
            .unwrap_err();
        assert!(error.is_cut());
    }
}
