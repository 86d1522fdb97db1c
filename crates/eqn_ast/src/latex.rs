//! LaTeX expression rendering
//!
//! Produces LaTeX suitable for MathJax/KaTeX style typesetting. Numbers are
//! printed as written, identifiers with a `_` suffix become subscripts and
//! Greek letter names become their LaTeX commands.

use crate::{Constant, Expr, RelOp, Statement};

/// Lower- and upper-case Greek letter names with a LaTeX command of the same name.
pub const GREEK_LETTERS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta",
    "vartheta", "iota", "kappa", "lambda", "mu", "nu", "xi", "rho", "sigma", "tau", "upsilon",
    "phi", "varphi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi",
    "Sigma", "Upsilon", "Phi", "Psi", "Omega",
];

pub fn is_greek(name: &str) -> bool {
    GREEK_LETTERS.contains(&name)
}

/// Render a numeric literal; scientific notation becomes `m \times 10^{e}`
pub fn render_number(n: &str) -> String {
    match n.find(['e', 'E']) {
        Some(pos) => {
            let mantissa = &n[..pos];
            let exponent = n[pos + 1..].trim_start_matches('+');
            format!("{} \\times 10^{{{}}}", mantissa, exponent)
        }
        None => n.to_string(),
    }
}

/// Render a constant as LaTeX
pub fn render_constant(c: &Constant) -> String {
    match c {
        Constant::Pi => "\\pi".to_string(),
        Constant::Infinity => "\\infty".to_string(),
    }
}

/// Render an identifier: `theta_1` -> `\theta_{1}`, `rate` -> `\mathrm{rate}`
pub fn render_identifier(name: &str) -> String {
    let (base, sub) = match name.split_once('_') {
        Some((b, s)) if !b.is_empty() && !s.is_empty() => (b, Some(s)),
        _ => (name, None),
    };

    let base_latex = if is_greek(base) {
        format!("\\{}", base)
    } else if base.chars().count() == 1 {
        base.to_string()
    } else {
        format!("\\mathrm{{{}}}", base.replace('_', "\\_"))
    };

    match sub {
        Some(s) => format!("{}_{{{}}}", base_latex, render_identifier(s)),
        None => base_latex,
    }
}

/// Render relational operator
pub fn render_relop(op: RelOp) -> &'static str {
    match op {
        RelOp::Eq => "=",
        RelOp::Neq => "\\neq",
        RelOp::Lt => "<",
        RelOp::Gt => ">",
        RelOp::Leq => "\\leq",
        RelOp::Geq => "\\geq",
    }
}

fn paren(inner: String) -> String {
    format!("\\left({}\\right)", inner)
}

fn render_grouped(e: &Expr, parens: bool) -> String {
    let inner = render(e);
    if parens {
        paren(inner)
    } else {
        inner
    }
}

fn render_args(args: &[Expr]) -> String {
    args.iter().map(render).collect::<Vec<_>>().join(", ")
}

/// LaTeX operator name for functions that have one
fn function_command(name: &str) -> Option<&'static str> {
    Some(match name {
        "sin" => "\\sin",
        "cos" => "\\cos",
        "tan" => "\\tan",
        "cot" => "\\cot",
        "sec" => "\\sec",
        "csc" => "\\csc",
        "asin" => "\\arcsin",
        "acos" => "\\arccos",
        "atan" => "\\arctan",
        "sinh" => "\\sinh",
        "cosh" => "\\cosh",
        "tanh" => "\\tanh",
        "log" => "\\ln",
        "log10" => "\\log_{10}",
        "log2" => "\\log_{2}",
        "det" => "\\det",
        "max" => "\\max",
        "min" => "\\min",
        "exp" => "\\exp",
        _ => return None,
    })
}

fn render_function(name: &str, args: &[Expr]) -> String {
    match (name, args) {
        ("sqrt", [x]) => format!("\\sqrt{{{}}}", render(x)),
        ("nthroot", [x, n]) => format!("\\sqrt[{}]{{{}}}", render(n), render(x)),
        ("abs", [x]) => format!("\\left|{}\\right|", render(x)),
        ("norm", [x]) => format!("\\left\\|{}\\right\\|", render(x)),
        ("exp", [x]) => format!("e^{{{}}}", render(x)),
        _ => {
            let head = match function_command(name) {
                Some(cmd) => cmd.to_string(),
                None => render_identifier(name),
            };
            format!("{}{}", head, paren(render_args(args)))
        }
    }
}

/// Render a sub-expression
pub fn render(e: &Expr) -> String {
    let my_prec = e.precedence();
    match e {
        Expr::Number(n) => render_number(n),
        Expr::Variable(name) => render_identifier(name),
        Expr::Constant(c) => render_constant(c),
        Expr::Add(l, r) => {
            // Add(a, Neg(b)) reads better as a subtraction
            if let Expr::Neg(inner) = r.as_ref() {
                return format!(
                    "{} - {}",
                    render(l),
                    render_grouped(inner, inner.precedence() <= 1)
                );
            }
            format!("{} + {}", render(l), render(r))
        }
        Expr::Sub(l, r) => format!(
            "{} - {}",
            render(l),
            render_grouped(r, r.precedence() <= my_prec)
        ),
        Expr::Mul(l, r) => format!(
            "{} \\cdot {}",
            render_grouped(l, l.precedence() < my_prec),
            render_grouped(r, r.precedence() < my_prec)
        ),
        // Keep the sign of a negated numerator outside the fraction
        Expr::Div(l, r) => match l.as_ref() {
            Expr::Neg(inner) => format!("-\\frac{{{}}}{{{}}}", render(inner), render(r)),
            _ => format!("\\frac{{{}}}{{{}}}", render(l), render(r)),
        },
        Expr::Pow(b, x) => format!(
            "{{{}}}^{{{}}}",
            render_grouped(b, b.precedence() <= my_prec),
            render(x)
        ),
        Expr::Neg(inner) => format!("-{}", render_grouped(inner, inner.precedence() <= 1)),
        Expr::Transpose(inner) => {
            format!("{{{}}}^{{T}}", render_grouped(inner, !inner.is_atom()))
        }
        Expr::Function(name, args) => render_function(name, args),
    }
}

/// Converts an expression to LaTeX format for rendering with MathJax
pub struct LaTeXExpr<'a> {
    pub expr: &'a Expr,
}

impl<'a> LaTeXExpr<'a> {
    /// Generate LaTeX string
    pub fn to_latex(&self) -> String {
        render(self.expr)
    }
}

/// Converts a whole statement (expression or relation) to LaTeX
pub struct LaTeXStatement<'a> {
    pub statement: &'a Statement,
}

impl<'a> LaTeXStatement<'a> {
    pub fn to_latex(&self) -> String {
        match self.statement {
            Statement::Expression(e) => render(e),
            Statement::Equation(eq) => format!(
                "{} {} {}",
                render(&eq.lhs),
                render_relop(eq.op),
                render(&eq.rhs)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Equation;

    fn latex(e: &Expr) -> String {
        LaTeXExpr { expr: e }.to_latex()
    }

    #[test]
    fn test_latex_basic() {
        let expr = Expr::mul(Expr::num("2"), Expr::var("x"));
        assert_eq!(latex(&expr), "2 \\cdot x");
    }

    #[test]
    fn test_latex_sqrt() {
        let sqrt = Expr::call("sqrt", vec![Expr::var("x")]);
        assert_eq!(latex(&sqrt), "\\sqrt{x}");
    }

    #[test]
    fn test_latex_fraction() {
        let frac = Expr::div(Expr::num("1"), Expr::num("2"));
        assert_eq!(latex(&frac), "\\frac{1}{2}");
    }

    #[test]
    fn test_latex_negative_numerator_outside_fraction() {
        let frac = Expr::div(Expr::neg(Expr::var("a")), Expr::var("b"));
        assert_eq!(latex(&frac), "-\\frac{a}{b}");
    }

    #[test]
    fn test_latex_power_of_sum() {
        let e = Expr::pow(Expr::add(Expr::var("a"), Expr::var("b")), Expr::num("2"));
        assert_eq!(latex(&e), "{\\left(a + b\\right)}^{2}");
    }

    #[test]
    fn test_latex_add_negative_is_subtraction() {
        let e = Expr::add(Expr::var("x"), Expr::neg(Expr::num("3")));
        assert_eq!(latex(&e), "x - 3");
    }

    #[test]
    fn test_latex_identifiers() {
        assert_eq!(render_identifier("theta"), "\\theta");
        assert_eq!(render_identifier("x_1"), "x_{1}");
        assert_eq!(render_identifier("omega_max"), "\\omega_{\\mathrm{max}}");
        assert_eq!(render_identifier("rate"), "\\mathrm{rate}");
    }

    #[test]
    fn test_latex_scientific_number() {
        assert_eq!(render_number("2e-3"), "2 \\times 10^{-3}");
        assert_eq!(render_number("1.5E+4"), "1.5 \\times 10^{4}");
        assert_eq!(render_number("0.25"), "0.25");
    }

    #[test]
    fn test_latex_functions() {
        let e = Expr::call("sin", vec![Expr::var("x")]);
        assert_eq!(latex(&e), "\\sin\\left(x\\right)");
        let e = Expr::call("abs", vec![Expr::var("x")]);
        assert_eq!(latex(&e), "\\left|x\\right|");
        let e = Expr::call("f", vec![Expr::var("x"), Expr::var("y")]);
        assert_eq!(latex(&e), "f\\left(x, y\\right)");
    }

    #[test]
    fn test_latex_equation() {
        let stmt = Statement::Equation(Equation {
            lhs: Expr::var("y"),
            rhs: Expr::pow(Expr::var("x"), Expr::num("2")),
            op: RelOp::Leq,
        });
        assert_eq!(
            LaTeXStatement { statement: &stmt }.to_latex(),
            "y \\leq {x}^{2}"
        );
    }
}
