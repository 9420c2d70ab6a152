use std::fmt;
use std::rc::Rc;

use thiserror::Error;

pub type PredicateRef = Rc<Predicate>;

/// Reserved names of the two boolean literals.
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";

/// The six binary connectives.
#[derive(PartialEq, Eq, Hash, Clone, Copy, derive_more::Display, Debug)]
pub enum BinOp {
    #[display(fmt = "∧")]
    And,
    #[display(fmt = "∨")]
    Or,
    #[display(fmt = "⇒")]
    Implies,
    #[display(fmt = "⇐")]
    Follows,
    #[display(fmt = "≡")]
    Equivales,
    #[display(fmt = "≢")]
    NotEquivales,
}

impl BinOp {
    /// Binding strength; tighter operators bind higher. Terms and
    /// negations sit above every connective at tier 3.
    fn binding(self) -> u8 {
        match self {
            BinOp::And | BinOp::Or => 2,
            BinOp::Implies | BinOp::Follows => 1,
            BinOp::Equivales | BinOp::NotEquivales => 0,
        }
    }

    /// ≡ and ≢ form one associative class and chain freely; ∧/∨ and
    /// ⇒/⇐ only chain with themselves.
    fn chains_with(self, other: BinOp) -> bool {
        self == other || self.binding() == 0 && other.binding() == 0
    }
}

#[derive(PartialEq, Eq, Debug)]
pub enum Predicate {
    /// A free variable, or one of the literals `true`/`false`.
    Term(String),
    /// `¬p`
    Not(PredicateRef),
    /// `p <op> q`
    Binary(BinOp, PredicateRef, PredicateRef),
}

impl Predicate {
    pub fn term(name: impl Into<String>) -> PredicateRef {
        Rc::new(Predicate::Term(name.into()))
    }

    pub fn constant(value: bool) -> PredicateRef {
        Predicate::term(if value { TRUE } else { FALSE })
    }

    pub fn not(operand: PredicateRef) -> PredicateRef {
        Rc::new(Predicate::Not(operand))
    }

    pub fn binary(op: BinOp, lhs: PredicateRef, rhs: PredicateRef) -> PredicateRef {
        Rc::new(Predicate::Binary(op, lhs, rhs))
    }

    /// The boolean this node stands for, if it is one of the two
    /// reserved literals.
    pub fn as_constant(&self) -> Option<bool> {
        match self {
            Predicate::Term(name) if name == TRUE => Some(true),
            Predicate::Term(name) if name == FALSE => Some(false),
            _ => None,
        }
    }

    /// Check the one structural invariant the type does not enforce:
    /// term names are never empty. Trees built by the parser always
    /// pass; hand-built trees should be validated before use.
    pub fn validate(&self) -> Result<(), InvalidPredicate> {
        match self {
            Predicate::Term(name) if name.is_empty() => Err(InvalidPredicate::EmptyTerm),
            Predicate::Term(_) => Ok(()),
            Predicate::Not(operand) => operand.validate(),
            Predicate::Binary(_, lhs, rhs) => {
                lhs.validate()?;
                rhs.validate()
            }
        }
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum InvalidPredicate {
    #[error("Term with an empty name")]
    EmptyTerm,
}

/// The canonical renderer. Parentheses are emitted only where the
/// grammar requires them: around a binary operand of a negation, and
/// around a binary child that binds looser than its parent or sits at
/// the same tier under the other operator of a non-associative pair.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Term(name) => f.write_str(name),
            Predicate::Not(operand) => {
                if let Predicate::Binary(..) = operand.as_ref() {
                    write!(f, "¬({operand})")
                } else {
                    write!(f, "¬{operand}")
                }
            }
            Predicate::Binary(op, lhs, rhs) => {
                fmt_operand(f, *op, lhs)?;
                write!(f, " {op} ")?;
                fmt_operand(f, *op, rhs)
            }
        }
    }
}

fn fmt_operand(f: &mut fmt::Formatter<'_>, parent: BinOp, child: &Predicate) -> fmt::Result {
    let parens = match child {
        Predicate::Binary(op, _, _) => {
            parent.binding() > op.binding()
                || parent.binding() == op.binding() && !parent.chains_with(*op)
        }
        _ => false,
    };
    if parens {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}
