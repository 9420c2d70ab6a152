use anyhow::{bail, Result};
use ariadne::{Color, Label, Report, ReportKind, Source};
use rustyline::{error::ReadlineError, Editor};

use predicate::{parse, reduce, ParseError};

/// The driver resolves only the two boolean literals; every other
/// name stays symbolic.
fn literals(name: &str) -> Option<bool> {
    match name {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn exec(input: &str) -> Result<()> {
    match parse(input) {
        Ok(p) => println!("{}", reduce(&p, &literals)),
        Err(e) => report(input, &e)?,
    }
    Ok(())
}

fn report(input: &str, e: &ParseError) -> Result<()> {
    let label = match e {
        ParseError::Lex(_) => "this character",
        ParseError::UnmatchedParen { .. } => "opened here",
        _ => "this token",
    };
    match e.position() {
        Some(pos) if pos < input.chars().count() => {
            Report::build(ReportKind::Error, (), pos)
                .with_message(e.to_string())
                .with_label(Label::new(pos..pos + 1).with_message(label).with_color(Color::Red))
                .finish()
                .eprint(Source::from(input))?;
        }
        _ => eprintln!("Error: {e}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut editor = Editor::<()>::new();
    editor.load_history("history.txt").ok();
    let mut input: Option<String> = None;
    loop {
        match editor.readline(">> ") {
            Ok(mut line) if line.ends_with('\\') => {
                line.pop();
                line.push('\n');
                if let Some(input) = input.as_mut() {
                    input.push_str(line.as_str());
                } else {
                    input = Some(line);
                }
            }
            Ok(line) => {
                let input = if let Some(mut input) = input.take() {
                    input.push_str(line.as_str());
                    input
                } else {
                    line
                };
                editor.add_history_entry(input.as_str());
                if let Err(e) = exec(&input) {
                    eprintln!("Error: {e:?}")
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Bye!");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(e) => {
                bail!(e);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_literal_interpretation() {
        assert_eq!(literals("true"), Some(true));
        assert_eq!(literals("false"), Some(false));
        assert_eq!(literals("A"), None);
    }

    #[test]
    fn test_reduce_line() {
        let cases = vec![
            ("true ∧ ¬false", "true"),
            ("X ∨ true", "true"),
            ("false ∨ X ∨ false", "X"),
            ("A ⇒ true ∧ false", "¬A"),
        ];
        for (input, expected) in cases {
            let p = parse(input).unwrap();
            assert_eq!(reduce(&p, &literals).to_string(), expected, "at `{input}`");
        }
    }
}
