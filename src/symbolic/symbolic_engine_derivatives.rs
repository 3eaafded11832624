//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of expression trees and the numerical
//! machinery used to validate it.
//!
//! ## Key Methods
//!
//! ### Differentiation
//! - `diff(var: &str)` - partial derivative with respect to one variable
//! - `gradient(vars)` - partial derivatives in caller-given order
//! - `diff_multi()` - all partial derivatives, alphabetical order
//! - `n_th_derivative(var, n)` - higher-order derivatives
//!
//! ### Numerical Validation
//! - `compare_num1d()` - validate 1D derivatives against finite differences
//! - `compare_num()` - validate multi-dimensional derivatives
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Differentiation Rules**: complete calculus rule set -
//!    product rule, quotient rule, chain rule through every function head
//!
//! 2. **Generalized Exponential Rule**: `Pow` with a non-constant exponent
//!    is differentiated as `b^e * (e' * log(b) + e * b' / b)`, not by the
//!    constant-exponent power rule
//!
//! 3. **Totality**: `diff` never fails on a well-formed tree; a variable
//!    absent from the tree differentiates to `Const(0.0)`

use crate::symbolic::symbolic_engine::{Expr, Func};
use crate::symbolic::symbolic_errors::EvalError;
use crate::symbolic::utils::{linspace, norm, numerical_derivative, numerical_derivative_multi};

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical partial derivative with respect to a variable.
    ///
    /// Implements the standard differentiation rules:
    /// - Power rule for constant exponents: d/dx(f^n) = n*f^(n-1)*f'
    /// - Generalized exponential rule otherwise
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule through sin, cos, tan, exp, sqrt, log
    ///
    /// Total: differentiating with respect to a variable that does not
    /// occur in the tree yields `Const(0.0)`. The produced tree is not
    /// simplified; call [`Expr::simplify`] when a compact form is wanted.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse("x^2").unwrap();
    /// let df_dx = f.diff("x"); // 2 * x^1 * 1
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
                )),
                Box::new(Expr::Pow(rhs.clone(), Box::new(Expr::Const(2.0)))),
            ),
            Expr::Pow(base, exp) => match exp.as_ref() {
                // power rule, exponent is a plain constant
                Expr::Const(n) => Expr::Mul(
                    Box::new(Expr::Mul(
                        Box::new(Expr::Const(*n)),
                        Box::new(Expr::Pow(base.clone(), Box::new(Expr::Const(n - 1.0)))),
                    )),
                    Box::new(base.diff(var)),
                ),
                // generalized exponential rule: b^e * (e' * log(b) + e * b' / b)
                _ => Expr::Mul(
                    Box::new(self.clone()),
                    Box::new(Expr::Add(
                        Box::new(Expr::Mul(
                            Box::new(exp.diff(var)),
                            Box::new(Expr::Fun(Func::Ln, base.clone())),
                        )),
                        Box::new(Expr::Div(
                            Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                            base.clone(),
                        )),
                    )),
                ),
            },
            Expr::Neg(expr) => Expr::Neg(Box::new(expr.diff(var))),
            Expr::Fun(fun, expr) => {
                let inner = expr.diff(var);
                match fun {
                    Func::Sin => Expr::Mul(
                        Box::new(Expr::Fun(Func::Cos, expr.clone())),
                        Box::new(inner),
                    ),
                    Func::Cos => Expr::Neg(Box::new(Expr::Mul(
                        Box::new(Expr::Fun(Func::Sin, expr.clone())),
                        Box::new(inner),
                    ))),
                    // sec^2 written as 1/cos^2
                    Func::Tan => Expr::Div(
                        Box::new(inner),
                        Box::new(Expr::Pow(
                            Box::new(Expr::Fun(Func::Cos, expr.clone())),
                            Box::new(Expr::Const(2.0)),
                        )),
                    ),
                    Func::Exp => Expr::Mul(Box::new(self.clone()), Box::new(inner)),
                    Func::Sqrt => Expr::Div(
                        Box::new(inner),
                        Box::new(Expr::Mul(
                            Box::new(Expr::Const(2.0)),
                            Box::new(Expr::Fun(Func::Sqrt, expr.clone())),
                        )),
                    ),
                    Func::Ln => Expr::Div(Box::new(inner), expr.clone()),
                }
            }
        }
    } // end of diff

    /// Computes partial derivatives with respect to the given variables.
    ///
    /// One derivative tree per requested variable, in exactly the order
    /// given by the caller (axis order for the presentation layer).
    pub fn gradient(&self, vars: &[&str]) -> Vec<Expr> {
        vars.iter().map(|var| self.diff(var)).collect()
    }

    /// Computes all partial derivatives automatically.
    ///
    /// Differentiates with respect to every free variable of the
    /// expression, in the alphabetical order of [`Expr::free_variables`].
    pub fn diff_multi(&self) -> Vec<Expr> {
        self.free_variables()
            .iter()
            .map(|var| self.diff(var))
            .collect()
    }

    /// Computes the nth derivative with respect to one variable.
    ///
    /// Repeatedly differentiates and simplifies; `n = 0` returns the
    /// expression itself (simplified).
    pub fn n_th_derivative(&self, var: &str, n: usize) -> Expr {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.diff(var).simplify();
        }
        expr.simplify()
    }

    /// Validates the analytical derivative against a numerical one over a
    /// 1D domain.
    ///
    /// Evaluates both the symbolic derivative and a central-difference
    /// approximation of the function on `linspace(start, end, num_values)`
    /// and compares their norm distance with `max_norm`.
    ///
    /// # Returns
    /// `(norm, within_tolerance)`
    pub fn compare_num1d(
        &self,
        var: &str,
        start: f64,
        end: f64,
        num_values: usize,
        max_norm: f64,
    ) -> Result<(f64, bool), EvalError> {
        let domain = linspace(start, end, num_values);
        let step = (1.0 / 1e4) * (end - start) / (num_values as f64 - 1.0);

        let derivative_fn = self.diff(var).lambdify(&[var])?;
        let analytical: Vec<f64> = domain.iter().map(|x| derivative_fn(&[*x])).collect();

        let function = self.lambdify(&[var])?;
        let numerical = numerical_derivative(|x| function(&[x]), &domain, step);

        let norm_val = norm(&analytical, &numerical);
        Ok((norm_val, norm_val < max_norm))
    }

    /// Validates all partial derivatives against numerical approximations.
    ///
    /// For a function of several variables: builds a linspace per variable
    /// (alphabetical order), walks the resulting points, and compares each
    /// analytical partial derivative with its central-difference
    /// approximation.
    ///
    /// # Returns
    /// One `(within_tolerance, norm)` pair per free variable.
    pub fn compare_num(
        &self,
        start: &[f64],
        end: &[f64],
        num_values: usize,
        max_norm: f64,
    ) -> Result<Vec<(bool, f64)>, EvalError> {
        let vars = self.free_variables();
        assert_eq!(vars.len(), start.len());
        assert_eq!(vars.len(), end.len());
        let var_refs: Vec<&str> = vars.iter().map(|s| s.as_str()).collect();

        let axes: Vec<Vec<f64>> = start
            .iter()
            .zip(end.iter())
            .map(|(s, e)| linspace(*s, *e, num_values))
            .collect();
        let max_end = end.iter().cloned().fold(f64::MIN, f64::max);
        let min_start = start.iter().cloned().fold(f64::MAX, f64::min);
        let step = (1.0 / 1e4) * (max_end - min_start) / (num_values as f64 - 1.0);

        let function = self.lambdify(&var_refs)?;
        let derivative_fns = self
            .gradient(&var_refs)
            .iter()
            .map(|d| d.lambdify(&var_refs))
            .collect::<Result<Vec<_>, _>>()?;

        // per-variable accumulation of analytical and numerical samples
        let mut analytical: Vec<Vec<f64>> = vec![Vec::with_capacity(num_values); vars.len()];
        let mut numerical: Vec<Vec<f64>> = vec![Vec::with_capacity(num_values); vars.len()];
        for i in 0..num_values {
            let point: Vec<f64> = axes.iter().map(|axis| axis[i]).collect();
            let grad_num = numerical_derivative_multi(|p| function(p), &point, step);
            for (k, d_fn) in derivative_fns.iter().enumerate() {
                analytical[k].push(d_fn(&point));
                numerical[k].push(grad_num[k]);
            }
        }

        let pairs = analytical
            .iter()
            .zip(numerical.iter())
            .map(|(a, n)| {
                let norm_val = norm(a, n);
                (norm_val < max_norm, norm_val)
            })
            .collect();
        Ok(pairs)
    }
}
