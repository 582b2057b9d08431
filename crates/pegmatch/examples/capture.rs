//! Capture and back-reference
//!
//! Matches a heredoc-like block whose terminator must repeat the word given
//! after `<<`, e.g. `<<END ... END`.
//!
//! Run with: `cargo run --example capture`

use pegmatch::prelude::*;

fn heredoc() -> Result<Grammar<CaptureMap>, GrammarError> {
    let word = plus(upper());
    let terminator = seq([eol(), capture("word")]);
    let rule = seq([
        string("<<"),
        store(word, "word"),
        eol(),
        until(terminator.clone()),
        terminator,
        eof(),
    ]);
    Grammar::from_rule("heredoc", rule)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grammar = heredoc()?;
    print!("{}", grammar.registry());

    for input in ["<<END\nsome text\nEND", "<<END\nsome text\nEOF"] {
        let mut captures = CaptureMap::new();
        match Parser::new(&grammar).parse_str(input, &mut captures) {
            Ok(outcome) => println!(
                "{input:?}: matched {} bytes, terminator {:?}",
                outcome.consumed,
                captures.get(&CaptureId::from("word"))
            ),
            Err(error) => println!("{input:?}: {error}"),
        }
    }
    Ok(())
}
