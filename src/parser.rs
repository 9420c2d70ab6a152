//! Recursive-descent parser for the four-tier predicate grammar:
//!
//! ```text
//! predicate  := term { ('≡'|'≢') term }
//! term       := junction { '⇒' junction }   |   junction { '⇐' junction }
//! junction   := factor   { '∨' factor   }   |   factor   { '∧' factor   }
//! factor     := {'¬'} ( identifier | '(' predicate ')' )
//! ```
//!
//! ≡ and ≢ mix freely within one chain. At the `term` and `junction`
//! tiers the first operator seen after the first operand commits the
//! whole chain: the other operator of the pair (⇐ for ⇒, ∧ for ∨) is
//! a syntax error at the same position unless parenthesized.

use thiserror::Error;

use crate::ast::{BinOp, Predicate, PredicateRef};
use crate::lexer::{self, LexError, Token, TokenKind};

#[derive(PartialEq, Eq, Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Unexpected end of input, expecting identifier or `(`")]
    UnexpectedEnd,
    #[error("Unrecognized token `{kind}` at position {pos}")]
    Unrecognized { kind: TokenKind, pos: usize },
    #[error("Unmatched `(` at position {pos}")]
    UnmatchedParen { pos: usize },
}

impl ParseError {
    /// Character offset of the offending input, when one applies.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Lex(e) => Some(e.pos),
            ParseError::UnexpectedEnd => None,
            ParseError::Unrecognized { pos, .. } | ParseError::UnmatchedParen { pos } => Some(*pos),
        }
    }
}

/// Parse one complete predicate. Trailing tokens after it are an
/// error; no partial tree is ever returned.
pub fn parse(input: &str) -> Result<PredicateRef, ParseError> {
    let tokens = lexer::tokens(input, &lexer::matchers())?;
    let mut parser = Parser { tokens, at: 0 };
    let predicate = parser.predicate()?;
    match parser.peek() {
        Some(token) => Err(ParseError::Unrecognized {
            kind: token.kind.clone(),
            pos: token.pos,
        }),
        None => Ok(predicate),
    }
}

struct Parser {
    tokens: Vec<Token>,
    at: usize,
}

type Operand = fn(&mut Parser) -> Result<PredicateRef, ParseError>;

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.at)
    }

    fn peek_op(&self) -> Option<BinOp> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Op(op),
                ..
            }) => Some(*op),
            _ => None,
        }
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.at)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd)?;
        self.at += 1;
        Ok(token)
    }

    fn predicate(&mut self) -> Result<PredicateRef, ParseError> {
        let first = self.term()?;
        self.chain(first, Self::term, |op| {
            matches!(op, BinOp::Equivales | BinOp::NotEquivales)
        })
    }

    fn term(&mut self) -> Result<PredicateRef, ParseError> {
        let first = self.junction()?;
        match self.peek_op() {
            Some(op @ (BinOp::Implies | BinOp::Follows)) => {
                self.chain(first, Self::junction, move |seen| seen == op)
            }
            _ => Ok(first),
        }
    }

    fn junction(&mut self) -> Result<PredicateRef, ParseError> {
        let first = self.factor()?;
        match self.peek_op() {
            Some(op @ (BinOp::Or | BinOp::And)) => {
                self.chain(first, Self::factor, move |seen| seen == op)
            }
            _ => Ok(first),
        }
    }

    /// Consume `{ op operand }` for as long as `allowed` accepts the
    /// next operator, collecting the pairs, then fold them into a
    /// right-leaning tree in one pass. A first operator outside
    /// `allowed` simply ends the chain; whoever is above decides
    /// whether the leftover token is an error.
    fn chain<A>(
        &mut self,
        first: PredicateRef,
        operand: Operand,
        allowed: A,
    ) -> Result<PredicateRef, ParseError>
    where
        A: Fn(BinOp) -> bool,
    {
        let mut pairs = Vec::new();
        while let Some(op) = self.peek_op() {
            if !allowed(op) {
                break;
            }
            self.at += 1;
            pairs.push((op, operand(self)?));
        }
        Ok(fold_chain(first, pairs))
    }

    fn factor(&mut self) -> Result<PredicateRef, ParseError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Not => Ok(Predicate::not(self.factor()?)),
            TokenKind::Ident(name) => Ok(Predicate::term(name)),
            TokenKind::LParen => {
                let inner = self.predicate()?;
                match self.peek() {
                    Some(t) if t.kind == TokenKind::RParen => {
                        self.at += 1;
                        Ok(inner)
                    }
                    _ => Err(ParseError::UnmatchedParen { pos: token.pos }),
                }
            }
            kind => Err(ParseError::Unrecognized {
                kind,
                pos: token.pos,
            }),
        }
    }
}

fn fold_chain(first: PredicateRef, pairs: Vec<(BinOp, PredicateRef)>) -> PredicateRef {
    let mut rest = pairs.into_iter().rev();
    match rest.next() {
        None => first,
        Some((last_op, last)) => {
            let mut op = last_op;
            let mut acc = last;
            for (prev_op, operand) in rest {
                acc = Predicate::binary(op, operand, acc);
                op = prev_op;
            }
            Predicate::binary(op, first, acc)
        }
    }
}
