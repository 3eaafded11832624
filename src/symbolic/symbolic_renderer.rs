//! RENDERING - turning expression trees back into text
//!
//! Two pure, total renderings:
//! - `render` - infix with minimal parenthesization; a parser-produced
//!   tree re-parses to a structurally equal tree
//! - `render_latex` - display-math form (`\frac`, braced superscripts,
//!   `\sqrt`) for an external typesetting surface
//!
//! The `Display` impl in `symbolic_engine` stays fully parenthesized for
//! debugging; these are the presentation-grade forms.

use crate::symbolic::symbolic_engine::{Expr, Func};

/// Binding strength used for parenthesization decisions.
/// Add/Sub = 1, Mul/Div = 2, Neg = 3, Pow = 4, atoms and calls = 5.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(..) | Expr::Sub(..) => 1,
        Expr::Mul(..) | Expr::Div(..) => 2,
        Expr::Neg(..) => 3,
        Expr::Pow(..) => 4,
        Expr::Var(_) | Expr::Const(_) | Expr::Fun(..) => 5,
    }
}

impl Expr {
    /// Renders the expression as human-readable infix text.
    ///
    /// Parentheses are inserted only where omitting them would change the
    /// structure: the right operand of `-`, `/` and same-strength chains,
    /// negated compounds, and powers of powers. Everything a caller parses
    /// and renders survives a round trip structurally intact.
    pub fn render(&self) -> String {
        match self {
            Expr::Var(name) => name.clone(),
            Expr::Const(val) => val.to_string(),
            Expr::Add(lhs, rhs) => format!(
                "{} + {}",
                self.wrap(lhs, precedence(lhs) < 1),
                self.wrap(rhs, precedence(rhs) <= 1)
            ),
            Expr::Sub(lhs, rhs) => format!(
                "{} - {}",
                self.wrap(lhs, precedence(lhs) < 1),
                self.wrap(rhs, precedence(rhs) <= 1)
            ),
            Expr::Mul(lhs, rhs) => format!(
                "{} * {}",
                self.wrap(lhs, precedence(lhs) < 2),
                self.wrap(rhs, precedence(rhs) <= 2)
            ),
            Expr::Div(lhs, rhs) => format!(
                "{} / {}",
                self.wrap(lhs, precedence(lhs) < 2),
                self.wrap(rhs, precedence(rhs) <= 2)
            ),
            // right-associative: base of a power always needs guarding,
            // a power in the exponent does not
            Expr::Pow(base, exp) => format!(
                "{}^{}",
                self.wrap(base, precedence(base) <= 4),
                self.wrap(exp, precedence(exp) < 4)
            ),
            Expr::Neg(expr) => format!("-{}", self.wrap(expr, precedence(expr) < 3)),
            Expr::Fun(fun, expr) => format!("{}({})", fun, expr.render()),
        }
    }

    fn wrap(&self, child: &Expr, parenthesize: bool) -> String {
        if parenthesize {
            format!("({})", child.render())
        } else {
            child.render()
        }
    }

    /// Renders the expression as display math for a typesetting surface.
    ///
    /// Divisions become `\frac{..}{..}` (no parentheses needed around the
    /// operands), powers use braced superscripts, `sqrt` becomes
    /// `\sqrt{..}`, function heads get backslashed names.
    pub fn render_latex(&self) -> String {
        match self {
            Expr::Var(name) => name.clone(),
            Expr::Const(val) => val.to_string(),
            Expr::Add(lhs, rhs) => format!(
                "{} + {}",
                self.wrap_latex(lhs, precedence(lhs) < 1),
                self.wrap_latex(rhs, precedence(rhs) <= 1)
            ),
            Expr::Sub(lhs, rhs) => format!(
                "{} - {}",
                self.wrap_latex(lhs, precedence(lhs) < 1),
                self.wrap_latex(rhs, precedence(rhs) <= 1)
            ),
            Expr::Mul(lhs, rhs) => format!(
                "{} \\cdot {}",
                self.wrap_latex(lhs, precedence(lhs) < 2),
                self.wrap_latex(rhs, precedence(rhs) <= 2)
            ),
            Expr::Div(lhs, rhs) => {
                format!("\\frac{{{}}}{{{}}}", lhs.render_latex(), rhs.render_latex())
            }
            Expr::Pow(base, exp) => format!(
                "{}^{{{}}}",
                self.wrap_latex(base, precedence(base) <= 4),
                exp.render_latex()
            ),
            Expr::Neg(expr) => format!("-{}", self.wrap_latex(expr, precedence(expr) < 3)),
            Expr::Fun(Func::Sqrt, expr) => format!("\\sqrt{{{}}}", expr.render_latex()),
            Expr::Fun(Func::Exp, expr) => format!("e^{{{}}}", expr.render_latex()),
            Expr::Fun(fun, expr) => {
                format!("\\{}\\left({}\\right)", fun.name(), expr.render_latex())
            }
        }
    }

    fn wrap_latex(&self, child: &Expr, parenthesize: bool) -> String {
        if parenthesize {
            format!("\\left({}\\right)", child.render_latex())
        } else {
            child.render_latex()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trips(source: &str) {
        let parsed = Expr::parse(source).unwrap();
        let rendered = parsed.render();
        let reparsed = Expr::parse(&rendered).unwrap();
        assert_eq!(parsed, reparsed, "render of {:?} was {:?}", source, rendered);
    }

    #[test]
    fn test_render_minimal_parens() {
        assert_eq!(Expr::parse("x + y*z").unwrap().render(), "x + y * z");
        assert_eq!(Expr::parse("(x + y)*z").unwrap().render(), "(x + y) * z");
        assert_eq!(Expr::parse("x - (y - z)").unwrap().render(), "x - (y - z)");
        assert_eq!(Expr::parse("x - y - z").unwrap().render(), "x - y - z");
    }

    #[test]
    fn test_render_power_parens() {
        assert_eq!(Expr::parse("x^2").unwrap().render(), "x^2");
        assert_eq!(Expr::parse("(x^y)^z").unwrap().render(), "(x^y)^z");
        assert_eq!(Expr::parse("x^y^z").unwrap().render(), "x^y^z");
        assert_eq!(Expr::parse("(x + 1)^2").unwrap().render(), "(x + 1)^2");
    }

    #[test]
    fn test_render_neg() {
        assert_eq!(Expr::parse("-x^2").unwrap().render(), "-x^2");
        assert_eq!(Expr::parse("-(x + y)").unwrap().render(), "-(x + y)");
        assert_eq!(Expr::parse("(-x)^2").unwrap().render(), "(-x)^2");
    }

    #[test]
    fn test_render_functions() {
        assert_eq!(
            Expr::parse("sin(x)/cos(y)").unwrap().render(),
            "sin(x) / cos(y)"
        );
        assert_eq!(Expr::parse("ln(x)").unwrap().render(), "log(x)");
    }

    #[test]
    fn test_round_trip_battery() {
        for source in [
            "x",
            "42",
            "x + y + z",
            "x - y - z",
            "x - (y - z)",
            "x*y/z",
            "x*(y/z)",
            "x/(y*z)",
            "x^y^z",
            "(x^y)^z",
            "-x^2 + 3*x - 1",
            "sin(x)/x",
            "exp(-x^2 - y^2)",
            "sqrt(x^2 + y^2 + z^2)",
            "2*x + 3",
            "x - -y",
            "(x + 1)*(x - 1)",
            "1/(1 + x^2)",
            "log(x + y)",
        ] {
            round_trips(source);
        }
    }

    #[test]
    fn test_render_latex_forms() {
        assert_eq!(
            Expr::parse("x/y").unwrap().render_latex(),
            "\\frac{x}{y}"
        );
        assert_eq!(Expr::parse("x^2").unwrap().render_latex(), "x^{2}");
        assert_eq!(
            Expr::parse("sqrt(x)").unwrap().render_latex(),
            "\\sqrt{x}"
        );
        assert_eq!(
            Expr::parse("exp(x)").unwrap().render_latex(),
            "e^{x}"
        );
        assert_eq!(
            Expr::parse("sin(x + y)").unwrap().render_latex(),
            "\\sin\\left(x + y\\right)"
        );
        assert_eq!(
            Expr::parse("x * y").unwrap().render_latex(),
            "x \\cdot y"
        );
    }
}
