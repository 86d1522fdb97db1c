//! Layout extent estimation.
//!
//! Extents are measured in em at a font size of one point, so a block's
//! size in points is its extent times the font size. The constants follow
//! the proportions of a Computer Modern math layout closely enough to size a
//! window; they are not a glyph-exact renderer.

use eqn_ast::latex::is_greek;
use eqn_ast::{Expr, Statement};
use serde::Serialize;

const GLYPH_WIDTH: f64 = 0.5;
const ASCENT: f64 = 0.75;
const DESCENT: f64 = 0.25;
const LINE_SKIP: f64 = 1.2;

const BIN_OP_WIDTH: f64 = 1.22;
const REL_OP_WIDTH: f64 = 1.33;
const CDOT_WIDTH: f64 = 0.78;
const MINUS_WIDTH: f64 = 0.78;
const COMMA_WIDTH: f64 = 0.45;

const SCRIPT_SCALE: f64 = 0.7;
const SUPERSCRIPT_RAISE: f64 = 0.6;
const DELIM_WIDTH: f64 = 0.39;
const BAR_WIDTH: f64 = 0.28;
const RADICAL_WIDTH: f64 = 0.85;
const RULE_GAP: f64 = 0.15;
const AXIS: f64 = 0.25;
const FRACTION_PAD: f64 = 0.24;

/// Bounding box of laid-out text, in em.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extent {
    pub width: f64,
    /// Above the baseline.
    pub ascent: f64,
    /// Below the baseline.
    pub descent: f64,
}

impl Extent {
    pub const fn new(width: f64, ascent: f64, descent: f64) -> Self {
        Self {
            width,
            ascent,
            descent,
        }
    }

    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }

    /// Horizontal concatenation on a shared baseline.
    pub fn beside(self, other: Extent) -> Extent {
        Extent {
            width: self.width + other.width,
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
        }
    }

    pub fn scaled(self, k: f64) -> Extent {
        Extent {
            width: self.width * k,
            ascent: self.ascent * k,
            descent: self.descent * k,
        }
    }

    fn widened(self, dx: f64) -> Extent {
        Extent {
            width: self.width + dx,
            ..self
        }
    }
}

fn glyphs(count: usize) -> Extent {
    Extent::new(count as f64 * GLYPH_WIDTH, ASCENT, DESCENT)
}

fn space(width: f64) -> Extent {
    Extent::new(width, 0.0, 0.0)
}

fn superscript(base: Extent, exp: Extent) -> Extent {
    let raise = base.ascent * SUPERSCRIPT_RAISE;
    let exp = exp.scaled(SCRIPT_SCALE);
    Extent {
        width: base.width + exp.width,
        ascent: base.ascent.max(raise + exp.ascent),
        descent: base.descent.max(exp.descent - raise),
    }
}

fn subscript(base: Extent, sub: Extent) -> Extent {
    let sub = sub.scaled(SCRIPT_SCALE);
    Extent {
        width: base.width + sub.width,
        ascent: base.ascent,
        descent: base.descent.max(DESCENT + sub.descent + sub.ascent * 0.3),
    }
}

fn fraction(num: Extent, den: Extent) -> Extent {
    Extent {
        width: num.width.max(den.width) + FRACTION_PAD,
        ascent: AXIS + RULE_GAP + num.height(),
        descent: (den.height() + RULE_GAP - AXIS).max(DESCENT),
    }
}

fn delimited(inner: Extent, delimiter_width: f64) -> Extent {
    Extent {
        width: inner.width + 2.0 * delimiter_width,
        ascent: inner.ascent.max(ASCENT) + 0.05,
        descent: inner.descent.max(DESCENT) + 0.05,
    }
}

fn parens(inner: Extent) -> Extent {
    delimited(inner, DELIM_WIDTH)
}

fn radical(inner: Extent) -> Extent {
    Extent {
        width: inner.width + RADICAL_WIDTH,
        ascent: inner.ascent + RULE_GAP,
        descent: inner.descent + 0.05,
    }
}

fn grouped(e: &Expr, wrap: bool) -> Extent {
    let inner = measure(e);
    if wrap {
        parens(inner)
    } else {
        inner
    }
}

/// Extent of an identifier as rendered: Greek letters are one glyph,
/// multi-letter names are upright words, `_` starts a subscript.
pub fn identifier(name: &str) -> Extent {
    let (base, sub) = match name.split_once('_') {
        Some((b, s)) if !b.is_empty() && !s.is_empty() => (b, Some(s)),
        _ => (name, None),
    };
    let base_extent = if is_greek(base) {
        glyphs(1).widened(0.05)
    } else {
        glyphs(base.chars().count())
    };
    match sub {
        Some(s) => subscript(base_extent, identifier(s)),
        None => base_extent,
    }
}

fn number(text: &str) -> Extent {
    match text.find(['e', 'E']) {
        Some(pos) => {
            let mantissa = glyphs(pos);
            let exponent = glyphs(text[pos + 1..].trim_start_matches('+').len());
            mantissa
                .beside(space(CDOT_WIDTH))
                .beside(superscript(glyphs(2), exponent))
        }
        None => glyphs(text.chars().count()),
    }
}

fn function(name: &str, args: &[Expr]) -> Extent {
    match (name, args) {
        ("sqrt", [x]) => radical(measure(x)),
        ("nthroot", [x, n]) => radical(measure(x)).widened(measure(n).width * 0.5),
        ("abs", [x]) => delimited(measure(x), BAR_WIDTH),
        ("norm", [x]) => delimited(measure(x), 2.0 * BAR_WIDTH),
        ("exp", [x]) => superscript(glyphs(1), measure(x)),
        _ => {
            let head = if name.chars().count() == 1 {
                glyphs(1)
            } else {
                identifier(name).widened(0.17)
            };
            let mut inner = Extent::default();
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    inner = inner.beside(space(COMMA_WIDTH));
                }
                inner = inner.beside(measure(arg));
            }
            head.beside(parens(inner))
        }
    }
}

/// Extent of a rendered sub-expression. Parenthesization mirrors the LaTeX
/// renderer.
pub fn measure(e: &Expr) -> Extent {
    let my_prec = e.precedence();
    match e {
        Expr::Number(n) => number(n),
        Expr::Variable(name) => identifier(name),
        Expr::Constant(_) => glyphs(1).widened(0.07),
        Expr::Add(l, r) => {
            let right = match r.as_ref() {
                Expr::Neg(inner) => grouped(inner, inner.precedence() <= 1),
                _ => measure(r),
            };
            measure(l).beside(space(BIN_OP_WIDTH)).beside(right)
        }
        Expr::Sub(l, r) => measure(l)
            .beside(space(BIN_OP_WIDTH))
            .beside(grouped(r, r.precedence() <= my_prec)),
        Expr::Mul(l, r) => grouped(l, l.precedence() < my_prec)
            .beside(space(CDOT_WIDTH))
            .beside(grouped(r, r.precedence() < my_prec)),
        Expr::Div(l, r) => match l.as_ref() {
            Expr::Neg(inner) => space(MINUS_WIDTH).beside(fraction(measure(inner), measure(r))),
            _ => fraction(measure(l), measure(r)),
        },
        Expr::Pow(b, x) => superscript(grouped(b, b.precedence() <= my_prec), measure(x)),
        Expr::Neg(inner) => space(MINUS_WIDTH).beside(grouped(inner, inner.precedence() <= 1)),
        Expr::Transpose(inner) => superscript(grouped(inner, !inner.is_atom()), glyphs(1)),
        Expr::Function(name, args) => function(name, args),
    }
}

pub fn measure_statement(statement: &Statement) -> Extent {
    match statement {
        Statement::Expression(e) => measure(e),
        Statement::Equation(eq) => measure(&eq.lhs)
            .beside(space(REL_OP_WIDTH))
            .beside(measure(&eq.rhs)),
    }
}

/// Extent of plain text lines set one below the other.
pub fn text_block<'a>(lines: impl IntoIterator<Item = &'a str>) -> Extent {
    let mut widest = 0usize;
    let mut count = 0usize;
    for line in lines {
        widest = widest.max(line.chars().count());
        count += 1;
    }
    if count == 0 {
        return Extent::default();
    }
    Extent::new(
        widest as f64 * GLYPH_WIDTH,
        ASCENT,
        DESCENT + (count - 1) as f64 * LINE_SKIP,
    )
}
