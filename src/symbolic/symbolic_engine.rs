//! # Symbolic Engine Module
//!
//! Core of the symbolic multivariable-calculus engine: the expression tree
//! (`Expr`) and the operations that do not leave the tree world:
//! construction, substitution and variable inspection.
//!
//! ## Purpose
//!
//! The engine allows a caller (typically a plotting front end) to:
//! - Parse textual expressions in several real variables into `Expr` trees
//! - Differentiate trees analytically and form gradients
//! - Substitute variables with constants or other sub-expressions (slicing)
//! - Evaluate trees as strict scalars or over vectorized grids
//! - Render trees back to infix or LaTeX text
//!
//! ## Main Structures
//!
//! ### `Expr` Enum
//! The symbolic expression type supporting:
//! - **Variables**: `Var(String)` - symbolic variables like "x", "y"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`, `Neg`
//! - **Functions**: `Fun(Func, ..)` - sin, cos, tan, exp, sqrt, log
//!
//! Trees are immutable value types: every transformation returns a fresh
//! tree, children are exclusively owned (`Box<Expr>`, no sharing), and a
//! tree is finite and acyclic by construction. This is what makes every
//! operation trivially safe to call from multiple threads.
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Expression Tree**: Uses Box<Expr> for nested expressions,
//!    enabling arbitrarily deep mathematical structures
//!
//! 2. **Operator Overloading**: Implements std::ops traits (Add, Sub, Mul,
//!    Div, Neg) for natural mathematical syntax: `x + y * z`
//!
//! 3. **Exhaustive Pattern Matching**: differentiation, substitution,
//!    evaluation and rendering are each one exhaustive match over the
//!    variant set, so a new node kind forces every consumer to be updated
//!
//! 4. **Macro System**: Provides the `symbols!(x, y, z)` macro for
//!    ergonomic variable creation

use std::collections::HashMap;
use std::fmt;

/// Unary function heads recognized by the engine.
///
/// `Ln` is the natural logarithm; the tokenizer accepts both `log` and
/// `ln` spellings for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Sqrt,
    Ln,
}

impl Func {
    /// Canonical display name, also what the renderer emits.
    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Sqrt => "sqrt",
            Func::Ln => "log",
        }
    }

    /// Maps a source-text identifier to a function head, if it names one.
    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "sqrt" => Some(Func::Sqrt),
            "log" | "ln" => Some(Func::Ln),
            _ => None,
        }
    }

    /// Plain IEEE application, used by the non-strict (grid) evaluator.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Exp => x.exp(),
            Func::Sqrt => x.sqrt(),
            Func::Ln => x.ln(),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Core symbolic expression enum representing mathematical expressions as
/// an abstract syntax tree.
///
/// Each variant represents a different type of mathematical construct,
/// from simple variables and constants to nested operations. The enum
/// uses Box<Expr> for recursive structure, allowing arbitrarily deep
/// expression trees. `Pow` with a non-constant exponent is a legal tree
/// and is differentiated by the generalized exponential rule.
///
/// # Examples
/// ```rust, ignore
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "y", "velocity")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Unary negation: -operand
    Neg(Box<Expr>),
    /// Function application: sin(..), cos(..), tan(..), exp(..), sqrt(..), log(..)
    Fun(Func, Box<Expr>),
}

/// Display implementation for debug-grade printing of expressions.
///
/// Fully parenthesized, unambiguous at a glance. For a minimal-parenthesis
/// form use [`Expr::render`], for display math use [`Expr::render_latex`].
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Neg(expr) => write!(f, "(-{})", expr),
            Expr::Fun(fun, expr) => write!(f, "{}({})", fun, expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}

impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = Expr::Add(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Expr::Sub(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Expr::Mul(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::DivAssign for Expr {
    fn div_assign(&mut self, rhs: Self) {
        *self = Expr::Div(Box::new(self.clone()), Box::new(rhs));
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// Parses a string containing variable names separated by commas and
    /// returns a vector of Expr::Var instances. Whitespace is trimmed.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect()
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    ///
    /// Essential for creating nested expressions since Expr variants use Box<Expr>.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Fun(Func::Exp, self.boxed())
    }

    /// Creates natural logarithm log(self).
    pub fn ln(self) -> Expr {
        Expr::Fun(Func::Ln, self.boxed())
    }

    /// Creates square root sqrt(self).
    pub fn sqrt(self) -> Expr {
        Expr::Fun(Func::Sqrt, self.boxed())
    }

    /// Creates sine sin(self).
    pub fn sin(self) -> Expr {
        Expr::Fun(Func::Sin, self.boxed())
    }

    /// Creates cosine cos(self).
    pub fn cos(self) -> Expr {
        Expr::Fun(Func::Cos, self.boxed())
    }

    /// Creates tangent tan(self).
    pub fn tan(self) -> Expr {
        Expr::Fun(Func::Tan, self.boxed())
    }

    /// Checks if expression is exactly the constant 0.0.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// Recursively traverses the expression tree and replaces all
    /// occurrences of the named variable with the given constant. This is
    /// the slicing operation: fixing one variable of f(x, y, z) reduces it
    /// to a surface over the remaining two.
    ///
    /// # Returns
    /// New expression with the variable substituted
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        self.substitute_variable(var, &Expr::Const(value))
    }

    /// Substitutes multiple variables with constant values using a HashMap.
    ///
    /// More convenient than repeated set_variable calls when fixing many
    /// variables at once. Only variables present in the map are replaced.
    pub fn set_variable_from_map(&self, var_map: &HashMap<String, f64>) -> Expr {
        match self {
            Expr::Var(name) if var_map.contains_key(name) => Expr::Const(var_map[name]),
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.set_variable_from_map(var_map)),
                Box::new(rhs.set_variable_from_map(var_map)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.set_variable_from_map(var_map)),
                Box::new(rhs.set_variable_from_map(var_map)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.set_variable_from_map(var_map)),
                Box::new(rhs.set_variable_from_map(var_map)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.set_variable_from_map(var_map)),
                Box::new(rhs.set_variable_from_map(var_map)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.set_variable_from_map(var_map)),
                Box::new(exp.set_variable_from_map(var_map)),
            ),
            Expr::Neg(expr) => Expr::Neg(Box::new(expr.set_variable_from_map(var_map))),
            Expr::Fun(fun, expr) => Expr::Fun(*fun, Box::new(expr.set_variable_from_map(var_map))),
        }
    }

    /// Substitutes a variable with an arbitrary sub-expression.
    ///
    /// Every `Var(var)` leaf is replaced by a deep copy of `replacement`;
    /// all other nodes are copied structurally. The receiver is untouched.
    pub fn substitute_variable(&self, var: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => replacement.clone(),
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.substitute_variable(var, replacement)),
                Box::new(rhs.substitute_variable(var, replacement)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.substitute_variable(var, replacement)),
                Box::new(rhs.substitute_variable(var, replacement)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.substitute_variable(var, replacement)),
                Box::new(rhs.substitute_variable(var, replacement)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.substitute_variable(var, replacement)),
                Box::new(rhs.substitute_variable(var, replacement)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.substitute_variable(var, replacement)),
                Box::new(exp.substitute_variable(var, replacement)),
            ),
            Expr::Neg(expr) => Expr::Neg(Box::new(expr.substitute_variable(var, replacement))),
            Expr::Fun(fun, expr) => {
                Expr::Fun(*fun, Box::new(expr.substitute_variable(var, replacement)))
            }
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Neg(expr) => expr.contains_variable(var_name),
            Expr::Fun(_, expr) => expr.contains_variable(var_name),
        }
    }

    /// Extracts all distinct variable names from the expression.
    ///
    /// Recursively collects every `Var` leaf, then sorts and deduplicates.
    /// The alphabetical order is a documented contract: consumers that
    /// need a stable ordering (axis assignment for 2D/3D plots, gradient
    /// component order of `diff_multi`) rely on it.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse("x^2 + y*z + x").unwrap();
    /// assert_eq!(expr.free_variables(), vec!["x", "y", "z"]);
    /// ```
    pub fn free_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
            Expr::Neg(expr) => expr.collect_variables(vars),
            Expr::Fun(_, expr) => expr.collect_variables(vars),
        }
    }
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic variables from a comma-separated list
/// Usage: symbols!(x, y, z) -> creates variables x, y, z
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        {
            let var_names = stringify!($($var),+);
            let vars = Expr::Symbols(var_names);
            let mut iter = vars.into_iter();
            ($(
                {
                    let $var = iter.next().unwrap();
                    $var
                }
            ),+)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_from_str() {
        let vars = Expr::Symbols("x, y, z");
        assert_eq!(
            vars,
            vec![
                Expr::Var("x".to_string()),
                Expr::Var("y".to_string()),
                Expr::Var("z".to_string())
            ]
        );
    }

    #[test]
    fn test_substitute_variable_deep_copy() {
        let expr = Expr::Var("x".to_string()) + Expr::Var("y".to_string());
        let replacement = Expr::Var("u".to_string()) * Expr::Const(2.0);
        let substituted = expr.substitute_variable("y", &replacement);
        let expected =
            Expr::Var("x".to_string()) + Expr::Var("u".to_string()) * Expr::Const(2.0);
        assert_eq!(substituted, expected);
        // the receiver is untouched
        assert!(expr.contains_variable("y"));
    }

    #[test]
    fn test_set_variable_from_map() {
        let expr = Expr::Var("x".to_string()) * Expr::Var("y".to_string());
        let map = HashMap::from([("y".to_string(), 3.0)]);
        let fixed = expr.set_variable_from_map(&map);
        assert_eq!(fixed, Expr::Var("x".to_string()) * Expr::Const(3.0));
    }

    #[test]
    fn test_free_variables_sorted_dedup() {
        let expr =
            (Expr::Var("z".to_string()) + Expr::Var("x".to_string())) * Expr::Var("x".to_string());
        assert_eq!(expr.free_variables(), vec!["x", "z"]);
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::Var("x".to_string()).sin() + Expr::Const(1.0);
        assert!(expr.contains_variable("x"));
        assert!(!expr.contains_variable("y"));
    }

    #[test]
    fn test_neg_builds_neg_node() {
        let expr = -Expr::Var("x".to_string());
        assert_eq!(expr, Expr::Neg(Box::new(Expr::Var("x".to_string()))));
    }
}
