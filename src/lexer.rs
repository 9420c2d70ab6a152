//! The scanner. Each lexeme kind is recognized by an independent
//! [`Matcher`] fed one character at a time; [`tokens`] drives a
//! priority-ordered list of them over the input, raising a lexical
//! error for any character no matcher claims. The list itself is
//! configuration, built by [`matchers`].

use thiserror::Error;

use crate::ast::BinOp;

#[derive(Clone, PartialEq, Eq, derive_more::Display, Debug)]
pub enum TokenKind {
    /// A letter followed by any run of letters and digits. The
    /// literals `true`/`false` lex as ordinary identifiers.
    #[display(fmt = "{}", _0)]
    Ident(String),
    #[display(fmt = "¬")]
    Not,
    #[display(fmt = "{}", _0)]
    Op(BinOp),
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset of the first character of the lexeme.
    pub pos: usize,
}

#[derive(PartialEq, Eq, Debug, Error)]
#[error("Unrecognized character `{ch}` at position {pos}")]
pub struct LexError {
    pub ch: char,
    pub pos: usize,
}

/// Outcome of feeding one character to a matcher.
#[derive(Debug)]
pub enum Step {
    /// The character extends the lexeme; keep feeding.
    More,
    /// A lexeme completed. Whitespace completes with `token: None`;
    /// `consumed` tells whether the current character was part of the
    /// lexeme or must be offered again.
    Done {
        token: Option<TokenKind>,
        consumed: bool,
    },
    /// The character does not belong to this lexeme.
    Mismatch,
}

/// A single lexeme recognizer, holding the state of the lexeme built
/// so far. A fresh instance is used for every token attempt.
pub trait Matcher {
    fn feed(&mut self, ch: char) -> Step;
}

#[derive(Default)]
pub struct IdentMatcher {
    ident: String,
}

impl Matcher for IdentMatcher {
    fn feed(&mut self, ch: char) -> Step {
        if ch.is_alphabetic() || !self.ident.is_empty() && ch.is_numeric() {
            self.ident.push(ch);
            Step::More
        } else if self.ident.is_empty() {
            Step::Mismatch
        } else {
            Step::Done {
                token: Some(TokenKind::Ident(std::mem::take(&mut self.ident))),
                consumed: false,
            }
        }
    }
}

#[derive(Default)]
pub struct SpaceMatcher {
    seen: bool,
}

impl Matcher for SpaceMatcher {
    fn feed(&mut self, ch: char) -> Step {
        if ch.is_whitespace() {
            self.seen = true;
            Step::More
        } else if self.seen {
            Step::Done {
                token: None,
                consumed: false,
            }
        } else {
            Step::Mismatch
        }
    }
}

/// Matches one fixed symbol string.
pub struct SymbolMatcher {
    remaining: &'static str,
    kind: TokenKind,
}

impl SymbolMatcher {
    pub fn new(symbol: &'static str, kind: TokenKind) -> Self {
        SymbolMatcher {
            remaining: symbol,
            kind,
        }
    }
}

impl Matcher for SymbolMatcher {
    fn feed(&mut self, ch: char) -> Step {
        let remaining: &'static str = self.remaining;
        match remaining.strip_prefix(ch) {
            Some("") => Step::Done {
                token: Some(self.kind.clone()),
                consumed: true,
            },
            Some(rest) => {
                self.remaining = rest;
                Step::More
            }
            None => Step::Mismatch,
        }
    }
}

pub type MatcherFactory = Box<dyn Fn() -> Box<dyn Matcher>>;

fn symbol(sym: &'static str, kind: TokenKind) -> MatcherFactory {
    Box::new(move || Box::new(SymbolMatcher::new(sym, kind.clone())) as Box<dyn Matcher>)
}

/// The priority-ordered matcher list for the predicate language.
pub fn matchers() -> Vec<MatcherFactory> {
    vec![
        Box::new(|| Box::new(IdentMatcher::default()) as Box<dyn Matcher>),
        Box::new(|| Box::new(SpaceMatcher::default()) as Box<dyn Matcher>),
        symbol("¬", TokenKind::Not),
        symbol("∧", TokenKind::Op(BinOp::And)),
        symbol("∨", TokenKind::Op(BinOp::Or)),
        symbol("≡", TokenKind::Op(BinOp::Equivales)),
        symbol("≢", TokenKind::Op(BinOp::NotEquivales)),
        symbol("⇒", TokenKind::Op(BinOp::Implies)),
        symbol("⇐", TokenKind::Op(BinOp::Follows)),
        symbol("(", TokenKind::LParen),
        symbol(")", TokenKind::RParen),
    ]
}

/// Scan the whole input into a token buffer. For each lexeme the
/// matcher list is tried in order, each candidate restarting at the
/// lexeme's first character; the first matcher to complete wins. End
/// of input is signalled with a sentinel space so that a trailing
/// identifier still finalizes.
pub fn tokens(input: &str, matchers: &[MatcherFactory]) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().chain(Some(' ')).collect();
    let mut out = Vec::new();
    let mut start = 0;
    'token: while start < chars.len() {
        'matcher: for make in matchers {
            let mut matcher = make();
            let mut i = start;
            while i < chars.len() {
                match matcher.feed(chars[i]) {
                    Step::More => i += 1,
                    Step::Done { token, consumed } => {
                        if let Some(kind) = token {
                            out.push(Token { kind, pos: start });
                        }
                        start = if consumed { i + 1 } else { i };
                        continue 'token;
                    }
                    Step::Mismatch => continue 'matcher,
                }
            }
            // ran off the end while still matching: only whitespace
            // can get here, the sentinel finalizes everything else
            start = i;
            continue 'token;
        }
        return Err(LexError {
            ch: chars[start],
            pos: start,
        });
    }
    Ok(out)
}
