//! LAMBDIFICATION AND EVALUATION - turning symbolic expressions into numbers
//!
//! Two deliberately different evaluation modes live here:
//!
//! - **Scalar mode** (`eval_scalar`): strict. Division by zero, a domain
//!   violation (sqrt of a negative, log of a non-positive, negative base
//!   with a non-integer exponent) or a missing binding abort the whole
//!   evaluation with an `EvalError`. This is what a single-value readout
//!   (derivative display, probe cursor) wants.
//!
//! - **Grid mode** (`eval_grid`): element-wise over equal-length (or
//!   broadcast length-1) arrays. A violation at one element produces a NaN
//!   at that element only, so isolated singularities show up as gaps in a
//!   surface plot instead of failing the whole batch. Division by zero is
//!   a NaN gap too. Only a missing binding or a shape mismatch fails the
//!   call as a whole, before any element is computed.
//!
//! Both modes stage through `Lambda`, an index-resolved copy of the tree:
//! variable names are resolved to argument positions once, so the hot
//! per-point loop does no string work. Grid evaluation walks the point set
//! in parallel with rayon; elements are independent, so assembly is purely
//! positional.

use crate::symbolic::symbolic_engine::{Expr, Func};
use crate::symbolic::symbolic_errors::EvalError;
use log::trace;
use rayon::prelude::*;
use std::collections::HashMap;

/// Index-resolved form of an expression: variables are argument positions.
#[derive(Clone, Debug)]
pub enum Lambda {
    Var(usize),
    Const(f64),
    Add(Box<Lambda>, Box<Lambda>),
    Sub(Box<Lambda>, Box<Lambda>),
    Mul(Box<Lambda>, Box<Lambda>),
    Div(Box<Lambda>, Box<Lambda>),
    Pow(Box<Lambda>, Box<Lambda>),
    Neg(Box<Lambda>),
    Fun(Func, Box<Lambda>),
}

impl Lambda {
    /// Non-strict element evaluation: IEEE semantics with NaN gaps.
    ///
    /// Division by zero, log of a non-positive value and 0 raised to a
    /// negative power are forced to NaN rather than ±inf so that plotting
    /// consumers see a gap, matching sqrt/pow which produce NaN natively.
    #[inline(always)]
    pub fn eval(&self, args: &[f64]) -> f64 {
        match self {
            Lambda::Var(i) => args[*i],
            Lambda::Const(v) => *v,
            Lambda::Add(a, b) => a.eval(args) + b.eval(args),
            Lambda::Sub(a, b) => a.eval(args) - b.eval(args),
            Lambda::Mul(a, b) => a.eval(args) * b.eval(args),
            Lambda::Div(a, b) => {
                let denom = b.eval(args);
                if denom == 0.0 {
                    f64::NAN
                } else {
                    a.eval(args) / denom
                }
            }
            Lambda::Pow(a, b) => {
                let base = a.eval(args);
                let exp = b.eval(args);
                if base == 0.0 && exp < 0.0 {
                    f64::NAN
                } else {
                    base.powf(exp)
                }
            }
            Lambda::Neg(e) => -e.eval(args),
            Lambda::Fun(Func::Ln, e) => {
                let x = e.eval(args);
                if x <= 0.0 { f64::NAN } else { x.ln() }
            }
            Lambda::Fun(fun, e) => fun.apply(e.eval(args)),
        }
    }

    /// Optional API for compatibility with closure-based call sites
    pub fn as_closure(self) -> impl Fn(&[f64]) -> f64 + Send + Sync {
        move |args| self.eval(args)
    }
}

impl Expr {
    /// Compiles the expression against an argument layout.
    ///
    /// Every variable is resolved to its position in `vars`; a variable
    /// missing from `vars` is an `UnboundVariable` error at compile time,
    /// so the returned `Lambda` can never hit a name lookup failure while
    /// evaluating.
    pub fn compile(&self, vars: &[&str]) -> Result<Lambda, EvalError> {
        match self {
            Expr::Var(name) => vars
                .iter()
                .position(|v| v == name)
                .map(Lambda::Var)
                .ok_or_else(|| EvalError::UnboundVariable(name.clone())),
            Expr::Const(v) => Ok(Lambda::Const(*v)),
            Expr::Add(a, b) => Ok(Lambda::Add(
                Box::new(a.compile(vars)?),
                Box::new(b.compile(vars)?),
            )),
            Expr::Sub(a, b) => Ok(Lambda::Sub(
                Box::new(a.compile(vars)?),
                Box::new(b.compile(vars)?),
            )),
            Expr::Mul(a, b) => Ok(Lambda::Mul(
                Box::new(a.compile(vars)?),
                Box::new(b.compile(vars)?),
            )),
            Expr::Div(a, b) => Ok(Lambda::Div(
                Box::new(a.compile(vars)?),
                Box::new(b.compile(vars)?),
            )),
            Expr::Pow(a, b) => Ok(Lambda::Pow(
                Box::new(a.compile(vars)?),
                Box::new(b.compile(vars)?),
            )),
            Expr::Neg(e) => Ok(Lambda::Neg(Box::new(e.compile(vars)?))),
            Expr::Fun(fun, e) => Ok(Lambda::Fun(*fun, Box::new(e.compile(vars)?))),
        }
    }

    /// Converts the expression into an executable Rust closure.
    ///
    /// Arguments arrive positionally, in the order of `vars`. The closure
    /// uses the non-strict NaN semantics of grid evaluation; for strict
    /// error reporting use [`Expr::eval_scalar`].
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse("x^2 + y").unwrap();
    /// let func = f.lambdify(&["x", "y"]).unwrap();
    /// assert_eq!(func(&[3.0, 1.0]), 10.0);
    /// ```
    pub fn lambdify(
        &self,
        vars: &[&str],
    ) -> Result<Box<dyn Fn(&[f64]) -> f64 + Send + Sync>, EvalError> {
        let compiled = self.compile(vars)?;
        trace!("lambdified over {:?}", vars);
        Ok(Box::new(move |args| compiled.eval(args)))
    }

    /// Convenience closure over the expression's own free variables.
    ///
    /// Variable order is alphabetical, matching [`Expr::free_variables`].
    pub fn lambdify_wrapped(&self) -> Box<dyn Fn(&[f64]) -> f64 + Send + Sync> {
        let vars = self.free_variables();
        let var_refs: Vec<&str> = vars.iter().map(|s| s.as_str()).collect();
        // free variables of self are always resolvable
        let compiled = self
            .compile(&var_refs)
            .expect("free variables resolve against themselves");
        Box::new(move |args| compiled.eval(args))
    }

    /// DIRECT EXPRESSION EVALUATION

    /// Strictly evaluates the expression at a single point.
    ///
    /// Every free variable must be bound in `bindings`. The first
    /// offending operation aborts the evaluation: division by zero is
    /// `EvalError::DivisionByZero`, sqrt of a negative, log of a
    /// non-positive or a negative base under a non-integer exponent are
    /// `EvalError::DomainError`. No partial result is produced.
    pub fn eval_scalar(&self, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
        match self {
            Expr::Var(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UnboundVariable(name.clone())),
            Expr::Const(v) => Ok(*v),
            Expr::Add(a, b) => Ok(a.eval_scalar(bindings)? + b.eval_scalar(bindings)?),
            Expr::Sub(a, b) => Ok(a.eval_scalar(bindings)? - b.eval_scalar(bindings)?),
            Expr::Mul(a, b) => Ok(a.eval_scalar(bindings)? * b.eval_scalar(bindings)?),
            Expr::Div(a, b) => {
                let denom = b.eval_scalar(bindings)?;
                if denom == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(a.eval_scalar(bindings)? / denom)
            }
            Expr::Pow(a, b) => {
                let base = a.eval_scalar(bindings)?;
                let exp = b.eval_scalar(bindings)?;
                if base == 0.0 && exp < 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                if base < 0.0 && exp.fract() != 0.0 {
                    return Err(EvalError::DomainError(format!(
                        "negative base {} with non-integer exponent {}",
                        base, exp
                    )));
                }
                Ok(base.powf(exp))
            }
            Expr::Neg(e) => Ok(-e.eval_scalar(bindings)?),
            Expr::Fun(fun, e) => {
                let x = e.eval_scalar(bindings)?;
                match fun {
                    Func::Sqrt if x < 0.0 => Err(EvalError::DomainError(format!(
                        "square root of negative value {}",
                        x
                    ))),
                    Func::Ln if x <= 0.0 => Err(EvalError::DomainError(format!(
                        "logarithm of non-positive value {}",
                        x
                    ))),
                    _ => Ok(fun.apply(x)),
                }
            }
        }
    }

    /// Evaluates the expression element-wise over vectorized bindings.
    ///
    /// Each free variable binds to an array; arrays must share one length
    /// `n` (length-1 arrays broadcast). The result has length `n`, element
    /// `i` computed from element `i` of every binding.
    ///
    /// Unlike [`Expr::eval_scalar`] this mode never aborts on numeric
    /// violations: division by zero and domain errors yield `NaN` at that
    /// element so surface plots render singularities as gaps. Only a
    /// missing binding (`UnboundVariable`) or inconsistent array lengths
    /// (`ShapeMismatch`) fail the whole call.
    ///
    /// The point set is partitioned across threads with rayon; elements
    /// are independent, so no ordering is imposed on the workers.
    pub fn eval_grid(&self, bindings: &HashMap<String, Vec<f64>>) -> Result<Vec<f64>, EvalError> {
        let vars = self.free_variables();
        let var_refs: Vec<&str> = vars.iter().map(|s| s.as_str()).collect();

        let mut columns: Vec<&[f64]> = Vec::with_capacity(vars.len());
        for var in &vars {
            let column = bindings
                .get(var)
                .ok_or_else(|| EvalError::UnboundVariable(var.clone()))?;
            columns.push(column.as_slice());
        }

        let n = columns
            .iter()
            .map(|c| c.len())
            .max()
            .or_else(|| bindings.values().map(|v| v.len()).max())
            .unwrap_or(1);
        for (var, column) in vars.iter().zip(columns.iter()) {
            if column.len() != n && column.len() != 1 {
                return Err(EvalError::ShapeMismatch {
                    name: var.clone(),
                    len: column.len(),
                    expected: n,
                });
            }
        }

        let compiled = self.compile(&var_refs)?;
        let samples = (0..n)
            .into_par_iter()
            .with_min_len(64)
            .map(|i| {
                let point: Vec<f64> = columns
                    .iter()
                    .map(|c| if c.len() == 1 { c[0] } else { c[i] })
                    .collect();
                compiled.eval(&point)
            })
            .collect();
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambdify_polynomial() {
        let expr = Expr::parse("x^2 + 2*x + 1").unwrap();
        let func = expr.lambdify(&["x"]).unwrap();
        assert_relative_eq!(func(&[3.0]), 16.0);
    }

    #[test]
    fn test_lambdify_argument_order() {
        let expr = Expr::parse("x - y").unwrap();
        let func = expr.lambdify(&["y", "x"]).unwrap();
        assert_relative_eq!(func(&[1.0, 5.0]), 4.0);
    }

    #[test]
    fn test_lambdify_unbound_variable() {
        let expr = Expr::parse("x + y").unwrap();
        assert_eq!(
            expr.lambdify(&["x"]).err(),
            Some(EvalError::UnboundVariable("y".to_string()))
        );
    }

    #[test]
    fn test_lambdify_wrapped_alphabetical() {
        let expr = Expr::parse("y / x").unwrap();
        let func = expr.lambdify_wrapped();
        // args alphabetical: x first
        assert_relative_eq!(func(&[2.0, 10.0]), 5.0);
    }

    #[test]
    fn test_eval_scalar_basic() {
        let expr = Expr::parse("x*y + 1").unwrap();
        let bindings = HashMap::from([("x".to_string(), 2.0), ("y".to_string(), 3.0)]);
        assert_relative_eq!(expr.eval_scalar(&bindings).unwrap(), 7.0);
    }

    #[test]
    fn test_eval_scalar_division_by_zero() {
        let expr = Expr::parse("1/x").unwrap();
        let bindings = HashMap::from([("x".to_string(), 0.0)]);
        assert_eq!(expr.eval_scalar(&bindings), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_eval_scalar_domain_errors() {
        let bindings = HashMap::from([("x".to_string(), -1.0)]);
        assert!(matches!(
            Expr::parse("sqrt(x)").unwrap().eval_scalar(&bindings),
            Err(EvalError::DomainError(_))
        ));
        assert!(matches!(
            Expr::parse("log(x)").unwrap().eval_scalar(&bindings),
            Err(EvalError::DomainError(_))
        ));
        assert!(matches!(
            Expr::parse("x^0.5").unwrap().eval_scalar(&bindings),
            Err(EvalError::DomainError(_))
        ));
    }

    #[test]
    fn test_eval_scalar_unbound() {
        let expr = Expr::parse("x + y").unwrap();
        let bindings = HashMap::from([("x".to_string(), 1.0)]);
        assert_eq!(
            expr.eval_scalar(&bindings),
            Err(EvalError::UnboundVariable("y".to_string()))
        );
    }

    #[test]
    fn test_eval_grid_sqrt_nan_gap() {
        let expr = Expr::parse("sqrt(x)").unwrap();
        let bindings = HashMap::from([("x".to_string(), vec![-1.0, 0.0, 4.0])]);
        let samples = expr.eval_grid(&bindings).unwrap();
        assert!(samples[0].is_nan());
        assert_relative_eq!(samples[1], 0.0);
        assert_relative_eq!(samples[2], 2.0);
    }

    #[test]
    fn test_eval_grid_division_gap() {
        let expr = Expr::parse("1/x").unwrap();
        let bindings = HashMap::from([("x".to_string(), vec![-1.0, 0.0, 2.0])]);
        let samples = expr.eval_grid(&bindings).unwrap();
        assert_relative_eq!(samples[0], -1.0);
        assert!(samples[1].is_nan());
        assert_relative_eq!(samples[2], 0.5);
    }

    #[test]
    fn test_eval_grid_broadcast() {
        let expr = Expr::parse("x + y").unwrap();
        let bindings = HashMap::from([
            ("x".to_string(), vec![1.0, 2.0, 3.0]),
            ("y".to_string(), vec![10.0]),
        ]);
        let samples = expr.eval_grid(&bindings).unwrap();
        assert_eq!(samples, vec![11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_eval_grid_shape_mismatch() {
        let expr = Expr::parse("x + y").unwrap();
        let bindings = HashMap::from([
            ("x".to_string(), vec![1.0, 2.0, 3.0]),
            ("y".to_string(), vec![1.0, 2.0]),
        ]);
        assert!(matches!(
            expr.eval_grid(&bindings),
            Err(EvalError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_eval_grid_unbound_fails_whole_call() {
        let expr = Expr::parse("x + y").unwrap();
        let bindings = HashMap::from([("x".to_string(), vec![1.0, 2.0])]);
        assert_eq!(
            expr.eval_grid(&bindings),
            Err(EvalError::UnboundVariable("y".to_string()))
        );
    }

    #[test]
    fn test_eval_grid_matches_scalar_on_clean_points() {
        let expr = Expr::parse("exp(-x^2 - y^2) * sin(3*x)").unwrap();
        let xs = vec![-1.0, -0.5, 0.0, 0.5, 1.0];
        let ys = vec![0.3, 0.3, 0.3, 0.3, 0.3];
        let grid_bindings = HashMap::from([
            ("x".to_string(), xs.clone()),
            ("y".to_string(), ys.clone()),
        ]);
        let samples = expr.eval_grid(&grid_bindings).unwrap();
        for i in 0..xs.len() {
            let scalar_bindings =
                HashMap::from([("x".to_string(), xs[i]), ("y".to_string(), ys[i])]);
            assert_relative_eq!(
                samples[i],
                expr.eval_scalar(&scalar_bindings).unwrap(),
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_eval_grid_pow_negative_base_gap() {
        let expr = Expr::parse("x^0.5").unwrap();
        let bindings = HashMap::from([("x".to_string(), vec![-4.0, 4.0])]);
        let samples = expr.eval_grid(&bindings).unwrap();
        assert!(samples[0].is_nan());
        assert_relative_eq!(samples[1], 2.0);
    }
}
