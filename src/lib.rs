//! Parsing, printing and algebraic reduction of propositional
//! predicates over named boolean variables.
//!
//! A predicate is written with the connectives `¬ ∧ ∨ ⇒ ⇐ ≡ ≢`,
//! identifiers for variables, and the literals `true`/`false`:
//!
//! ```text
//! predicate  := term { ('≡'|'≢') term }
//! term       := junction { '⇒' junction }   |   junction { '⇐' junction }
//! junction   := factor   { '∨' factor   }   |   factor   { '∧' factor   }
//! factor     := {'¬'} ( identifier | '(' predicate ')' )
//! ```
//!
//! [`parse`] builds the tree, its `Display` renders it back with
//! minimal parentheses, and [`reduce`] partially evaluates it under a
//! caller-supplied interpretation that may leave variables unknown:
//!
//! ```
//! use predicate::{parse, reduce};
//!
//! let p = parse("¬A ∧ (B ∨ false)").unwrap();
//! assert_eq!(p.to_string(), "¬A ∧ (B ∨ false)");
//!
//! let interp = |name: &str| match name {
//!     "true" | "B" => Some(true),
//!     "false" => Some(false),
//!     _ => None,
//! };
//! assert_eq!(reduce(&p, &interp).to_string(), "¬A");
//! ```

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use ast::{BinOp, InvalidPredicate, Predicate, PredicateRef, FALSE, TRUE};
pub use eval::{negate, reduce};
pub use lexer::LexError;
pub use parser::{parse, ParseError};
