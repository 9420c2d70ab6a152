//! The reduction engine: partial evaluation of a predicate under an
//! interpretation of variable names, applying the boolean-algebra
//! simplification laws the connectives admit. Reduction is pure and
//! total; it never touches the input tree and only consults the
//! interpretation for variables whose value can still affect the
//! result.

use crate::ast::{BinOp, Predicate, PredicateRef};

/// Partially evaluate `p` under `interp`, where `Some(v)` means the
/// name is known to hold `v` and `None` leaves it symbolic. The
/// interpretation must resolve the literals, `"true"` to `Some(true)`
/// and `"false"` to `Some(false)`. Unchanged subtrees of the result
/// are shared with the input.
pub fn reduce<F>(p: &PredicateRef, interp: &F) -> PredicateRef
where
    F: Fn(&str) -> Option<bool>,
{
    match p.as_ref() {
        Predicate::Term(name) => match interp(name) {
            Some(value) => Predicate::constant(value),
            None => p.clone(),
        },
        Predicate::Not(operand) => {
            let operand = reduce(operand, interp);
            match operand.as_constant() {
                Some(value) => Predicate::constant(!value),
                // stacked symbolic negations stay as they are
                None => Predicate::not(operand),
            }
        }
        Predicate::Binary(op, lhs, rhs) => match op {
            BinOp::And | BinOp::Or => junction(*op, lhs, rhs, interp),
            BinOp::Implies => implication(lhs, rhs, interp),
            BinOp::Follows => consequence(lhs, rhs, interp),
            BinOp::Equivales => equivalence(lhs, rhs, interp),
            BinOp::NotEquivales => non_equivalence(lhs, rhs, interp),
        },
    }
}

/// The opposite literal for a known constant, a `¬` wrapper otherwise.
pub fn negate(p: PredicateRef) -> PredicateRef {
    match p.as_constant() {
        Some(value) => Predicate::constant(!value),
        None => Predicate::not(p),
    }
}

/// ∧ and ∨ are duals: one operand equal to the dominating value
/// (false for ∧, true for ∨) decides the result alone, the identity
/// value passes the other side through. A dominating left operand
/// returns before the right side is reduced or interpreted at all.
fn junction<F>(op: BinOp, lhs: &PredicateRef, rhs: &PredicateRef, interp: &F) -> PredicateRef
where
    F: Fn(&str) -> Option<bool>,
{
    let dominating = op == BinOp::Or;
    let lhs = reduce(lhs, interp);
    if lhs.as_constant() == Some(dominating) {
        return lhs;
    }
    let rhs = reduce(rhs, interp);
    if rhs.as_constant() == Some(dominating) {
        return rhs;
    }
    if lhs.as_constant().is_some() {
        return rhs;
    }
    if rhs.as_constant().is_some() {
        return lhs;
    }
    if lhs.to_string() == rhs.to_string() {
        return lhs;
    }
    Predicate::binary(op, lhs, rhs)
}

// a ⇒ b ≡ ¬a ∨ b, so the ∨ rule supplies short-circuit and identity
// handling; the arrow is restored when nothing resolves
fn implication<F>(lhs: &PredicateRef, rhs: &PredicateRef, interp: &F) -> PredicateRef
where
    F: Fn(&str) -> Option<bool>,
{
    let reduced = junction(BinOp::Or, &negate(lhs.clone()), rhs, interp);
    if let Predicate::Binary(BinOp::Or, negated, consequent) = reduced.as_ref() {
        if let Predicate::Not(antecedent) = negated.as_ref() {
            return Predicate::binary(BinOp::Implies, antecedent.clone(), consequent.clone());
        }
    }
    reduced
}

// b ⇐ a is a ⇒ b with the operands swapped
fn consequence<F>(lhs: &PredicateRef, rhs: &PredicateRef, interp: &F) -> PredicateRef
where
    F: Fn(&str) -> Option<bool>,
{
    let reduced = junction(BinOp::Or, &negate(rhs.clone()), lhs, interp);
    if let Predicate::Binary(BinOp::Or, negated, consequent) = reduced.as_ref() {
        if let Predicate::Not(antecedent) = negated.as_ref() {
            return Predicate::binary(BinOp::Follows, consequent.clone(), antecedent.clone());
        }
    }
    reduced
}

/// Boolean equality needs both sides, so both are always reduced.
///
///   A ≡ true   ≡  A
///   A ≡ false  ≡  ¬A
///   A ≡ A      ≡  true
///   A ≡ ¬A     ≡  false
fn equivalence<F>(lhs: &PredicateRef, rhs: &PredicateRef, interp: &F) -> PredicateRef
where
    F: Fn(&str) -> Option<bool>,
{
    let lhs = reduce(lhs, interp);
    let rhs = reduce(rhs, interp);
    if let Some(value) = lhs.as_constant() {
        return if value { rhs } else { negate(rhs) };
    }
    if let Some(value) = rhs.as_constant() {
        return if value { lhs } else { negate(lhs) };
    }
    if lhs.to_string() == rhs.to_string() {
        return Predicate::constant(true);
    }
    if negate(lhs.clone()).to_string() == rhs.to_string()
        || lhs.to_string() == negate(rhs.clone()).to_string()
    {
        return Predicate::constant(false);
    }
    Predicate::binary(BinOp::Equivales, lhs, rhs)
}

// a ≢ b ≡ a ≡ ¬b; when the ≡ node survives, its right side is the
// negation put in above, which is stripped back off
fn non_equivalence<F>(lhs: &PredicateRef, rhs: &PredicateRef, interp: &F) -> PredicateRef
where
    F: Fn(&str) -> Option<bool>,
{
    let reduced = equivalence(lhs, &negate(rhs.clone()), interp);
    if let Predicate::Binary(BinOp::Equivales, left, negated) = reduced.as_ref() {
        if let Predicate::Not(right) = negated.as_ref() {
            return Predicate::binary(BinOp::NotEquivales, left.clone(), right.clone());
        }
    }
    reduced
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::BinOp::*;
    use crate::parser::parse;

    fn t(name: &str) -> PredicateRef {
        Predicate::term(name)
    }

    fn not(p: PredicateRef) -> PredicateRef {
        Predicate::not(p)
    }

    fn bin(op: BinOp, lhs: PredicateRef, rhs: PredicateRef) -> PredicateRef {
        Predicate::binary(op, lhs, rhs)
    }

    fn yes() -> PredicateRef {
        Predicate::constant(true)
    }

    fn no() -> PredicateRef {
        Predicate::constant(false)
    }

    // knows the literals and X; touching Y is a short-circuit failure
    fn itp(name: &str) -> Option<bool> {
        match name {
            "true" | "X" => Some(true),
            "false" => Some(false),
            "Y" => panic!("Y interpreted although a dominating constant was present"),
            _ => None,
        }
    }

    #[test]
    fn test_reduce() {
        let cases = vec![
            (yes(), "true"),
            (not(no()), "true"),
            (not(yes()), "false"),
            (bin(And, yes(), no()), "false"),
            (bin(And, no(), no()), "false"),
            (bin(Or, no(), no()), "false"),
            (bin(Or, no(), yes()), "true"),
            (not(bin(And, yes(), yes())), "false"),
            (not(bin(And, yes(), not(t("A")))), "¬¬A"),
            (not(not(t("A"))), "¬¬A"),
            (bin(And, t("A"), t("A")), "A"),
            (bin(Or, t("A"), t("A")), "A"),
            (bin(Implies, yes(), no()), "false"),
            (bin(Implies, no(), t("Y")), "true"),
            (bin(Implies, t("A"), no()), "¬A"),
            (bin(Implies, t("A"), t("B")), "A ⇒ B"),
            (bin(Follows, t("A"), yes()), "A"),
            (bin(Follows, t("A"), t("B")), "A ⇐ B"),
            (bin(Equivales, t("A"), yes()), "A"),
            (bin(Equivales, t("A"), no()), "¬A"),
            (bin(Equivales, t("A"), t("A")), "true"),
            (bin(Equivales, t("A"), not(t("A"))), "false"),
            (bin(NotEquivales, t("A"), t("A")), "false"),
            (bin(NotEquivales, t("A"), yes()), "¬A"),
            (bin(NotEquivales, t("A"), t("B")), "A ≢ B"),
            (
                // B ≡ (A ≡ (C ∧ ¬true)) reduces to B ≡ ¬A
                bin(
                    Equivales,
                    t("B"),
                    bin(Equivales, t("A"), bin(And, t("C"), not(yes()))),
                ),
                "B ≡ ¬A",
            ),
            (t("X"), "true"),
            (bin(And, no(), t("Y")), "false"),
            (bin(Or, yes(), t("Y")), "true"),
        ];
        for (predicate, expected) in cases {
            let before = predicate.to_string();
            assert_eq!(reduce(&predicate, &itp).to_string(), expected, "at `{before}`");
            // the input tree is never mutated
            assert_eq!(predicate.to_string(), before);
        }
    }

    #[test]
    fn test_short_circuit() {
        // the right side of a decided junction is never interpreted
        reduce(&bin(And, no(), t("Y")), &itp);
        reduce(&bin(Or, yes(), t("Y")), &itp);
        reduce(&bin(Implies, no(), t("Y")), &itp);
        reduce(&bin(And, t("A"), bin(And, no(), t("Y"))), &itp);
    }

    #[test]
    fn test_fixed_point() {
        let inputs = vec![
            "A ∧ B ⇒ C",
            "¬(A ∨ false) ≡ B",
            "a ≡ b ≢ c ≡ ¬x ∧ (¬z ≡ y) ≢ true",
            "X ∨ Q",
            "¬¬A",
        ];
        for input in inputs {
            let p = parse(input).unwrap();
            let once = reduce(&p, &itp);
            let twice = reduce(&once, &itp);
            assert_eq!(once.to_string(), twice.to_string(), "at `{input}`");
        }
    }

    #[test]
    fn test_totality() {
        // a fully known interpretation collapses every connective to
        // the value direct evaluation gives
        fn direct(p: &Predicate, a: bool, b: bool) -> bool {
            let value = |name: &str| match name {
                "true" => true,
                "false" => false,
                "A" => a,
                "B" => b,
                name => panic!("unknown name {name}"),
            };
            match p {
                Predicate::Term(name) => value(name),
                Predicate::Not(operand) => !direct(operand, a, b),
                Predicate::Binary(op, lhs, rhs) => {
                    let (l, r) = (direct(lhs, a, b), direct(rhs, a, b));
                    match op {
                        And => l && r,
                        Or => l || r,
                        Implies => !l || r,
                        Follows => l || !r,
                        Equivales => l == r,
                        NotEquivales => l != r,
                    }
                }
            }
        }
        let inputs = vec![
            "(A ∨ B) ⇒ (A ≡ ¬B)",
            "A ≢ B ≡ ¬A",
            "¬(A ∧ B) ⇐ ¬A ∨ ¬B",
            "A ⇒ A ∧ B",
        ];
        for input in inputs {
            let p = parse(input).unwrap();
            for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
                let full = move |name: &str| match name {
                    "true" => Some(true),
                    "false" => Some(false),
                    "A" => Some(a),
                    "B" => Some(b),
                    _ => None,
                };
                let reduced = reduce(&p, &full);
                assert_eq!(
                    reduced.as_constant(),
                    Some(direct(&p, a, b)),
                    "at `{input}` with A={a} B={b}"
                );
            }
        }
    }
}
