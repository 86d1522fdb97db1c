use std::fmt;

/// Named constants recognized by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    Infinity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, kept as written (`1.50` stays `1.50`).
    Number(String),
    Variable(String),
    Constant(Constant),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Transpose(Box<Expr>),
    Function(String, Vec<Expr>), // e.g. sin(x), atan2(y, x)
}

impl Expr {
    // Helper constructors for cleaner code
    pub fn num(n: impl Into<String>) -> Self {
        Expr::Number(n.into())
    }

    pub fn var(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Expr::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sub(Box::new(lhs), Box::new(rhs))
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Expr::Mul(Box::new(lhs), Box::new(rhs))
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Expr::Div(Box::new(lhs), Box::new(rhs))
    }

    pub fn pow(base: Expr, exp: Expr) -> Self {
        Expr::Pow(Box::new(base), Box::new(exp))
    }

    pub fn neg(expr: Expr) -> Self {
        Expr::Neg(Box::new(expr))
    }

    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Expr::Function(name.to_string(), args)
    }

    /// Binding strength used for parenthesization by all renderers.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Add(_, _) | Expr::Sub(_, _) => 1,
            Expr::Mul(_, _) | Expr::Div(_, _) => 2,
            Expr::Neg(_) => 3,
            Expr::Pow(_, _) => 4,
            Expr::Transpose(_) => 5,
            Expr::Function(_, _) | Expr::Number(_) | Expr::Variable(_) | Expr::Constant(_) => 6,
        }
    }

    pub fn is_atom(&self) -> bool {
        self.precedence() == 6
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Pi => write!(f, "pi"),
            Constant::Infinity => write!(f, "inf"),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, e: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", e)
    } else {
        write!(f, "{}", e)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let my_prec = self.precedence();
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Variable(s) => write!(f, "{}", s),
            Expr::Constant(c) => write!(f, "{}", c),
            Expr::Add(l, r) | Expr::Mul(l, r) => {
                let op = if matches!(self, Expr::Add(_, _)) { " + " } else { " * " };
                write_operand(f, l, l.precedence() < my_prec)?;
                write!(f, "{}", op)?;
                write_operand(f, r, r.precedence() < my_prec)
            }
            // Left-associative: a right operand of equal precedence keeps its parens.
            Expr::Sub(l, r) | Expr::Div(l, r) => {
                let op = if matches!(self, Expr::Sub(_, _)) { " - " } else { " / " };
                write_operand(f, l, l.precedence() < my_prec)?;
                write!(f, "{}", op)?;
                write_operand(f, r, r.precedence() <= my_prec)
            }
            // Right-associative: 2^3^4 = 2^(3^4)
            Expr::Pow(b, e) => {
                write_operand(f, b, b.precedence() <= my_prec)?;
                write!(f, "^")?;
                write_operand(f, e, e.precedence() < my_prec)
            }
            Expr::Neg(e) => {
                write!(f, "-")?;
                write_operand(f, e, e.precedence() < my_prec)
            }
            Expr::Transpose(e) => {
                write_operand(f, e, e.precedence() < my_prec)?;
                write!(f, "'")
            }
            Expr::Function(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
