//! # Symbolic Expression Simplification Module
//!
//! A single bottom-up rewrite pass removing the trivially redundant
//! operations that differentiation leaves behind: `Mul(Const(1), ..)`,
//! `Add(.., Const(0))`, `Pow(.., Const(1))` and friends, plus constant
//! folding. Nothing here is required for correctness - evaluation
//! tolerates redundant nodes - it exists so rendered derivatives and
//! repeated `n_th_derivative` calls stay compact.
//!
//! No operation of the engine applies `simplify` implicitly. At
//! non-finite inputs a rewritten tree can differ from the original
//! (`0 * log(x)` at `x = -1` is NaN unsimplified, `0` simplified), so
//! callers opt in explicitly.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the expression by constant folding and identity rules.
    ///
    /// Applied rules, after recursively simplifying children:
    /// - constants fold: `2 + 3 -> 5`, `sin(0) -> 0` (only when the folded
    ///   value is finite)
    /// - `x + 0 = x`, `x - 0 = x`, `0 - x = -x`
    /// - `x * 0 = 0`, `x * 1 = x`
    /// - `0 / x = 0`, `x / 1 = x`
    /// - `x ^ 1 = x`, `x ^ 0 = 1`
    /// - `--x = x`, `-(c) = (-c)`
    ///
    /// Pure tree rewrite: the receiver is untouched and a new tree is
    /// returned.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(a), _) if *a == 0.0 => rhs,
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    _ => Expr::Add(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    (Expr::Const(a), _) if *a == 0.0 => Expr::Neg(rhs.boxed()),
                    _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(a), _) if *a == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(0.0),
                    (Expr::Const(a), _) if *a == 1.0 => rhs,
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ => Expr::Mul(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(a), _) if *a == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ => Expr::Div(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify();
                let exp = exp.simplify();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => {
                        let folded = a.powf(*b);
                        if folded.is_finite() {
                            Expr::Const(folded)
                        } else {
                            Expr::Pow(base.boxed(), exp.boxed())
                        }
                    }
                    (_, Expr::Const(b)) if *b == 1.0 => base,
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(1.0),
                    _ => Expr::Pow(base.boxed(), exp.boxed()),
                }
            }
            Expr::Neg(expr) => {
                let inner = expr.simplify();
                match inner {
                    Expr::Const(c) => Expr::Const(-c),
                    Expr::Neg(doubly) => *doubly,
                    _ => Expr::Neg(inner.boxed()),
                }
            }
            Expr::Fun(fun, expr) => {
                let inner = expr.simplify();
                if let Expr::Const(c) = inner {
                    let folded = fun.apply(c);
                    if folded.is_finite() {
                        return Expr::Const(folded);
                    }
                }
                Expr::Fun(*fun, inner.boxed())
            }
        }
    }
}
