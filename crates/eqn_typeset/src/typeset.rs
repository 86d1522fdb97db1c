use eqn_ast::LaTeXStatement;
use eqn_parser::parse_statement;
use tracing::{debug, warn};

use crate::block::RenderedBlock;
use crate::error::TypesetError;
use crate::metrics::measure_statement;

pub const FALLBACK_MESSAGE: &str = "Could not typeset this expression as an equation.";

/// Converts an expression string into a typeset block.
pub trait Typesetter {
    fn typeset(&self, expr: &str) -> Result<RenderedBlock, TypesetError>;
}

/// Parses the expression and renders it as LaTeX.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexTypesetter;

impl Typesetter for LatexTypesetter {
    fn typeset(&self, expr: &str) -> Result<RenderedBlock, TypesetError> {
        typeset(expr)
    }
}

pub fn typeset(expr: &str) -> Result<RenderedBlock, TypesetError> {
    let statement = parse_statement(expr).map_err(|source| TypesetError::InvalidExpression {
        expr: expr.to_string(),
        source,
    })?;

    let latex = LaTeXStatement {
        statement: &statement,
    }
    .to_latex();
    let extent = measure_statement(&statement);
    debug!(input = expr, latex = %latex, width = extent.width, "typeset expression");

    Ok(RenderedBlock::equation(latex, statement.to_string(), extent))
}

/// Typeset `expr`, or show it literally with an explanation when it does not
/// parse. Never fails.
pub fn typeset_or_fallback<T: Typesetter + ?Sized>(typesetter: &T, expr: &str) -> RenderedBlock {
    match typesetter.typeset(expr) {
        Ok(block) => block,
        Err(e) => {
            warn!(error = %e, "showing expression literally");
            RenderedBlock::fallback(expr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockContent;

    #[test]
    fn test_equation_typesets() {
        let block = typeset("y = x^2 + x").unwrap();
        assert!(!block.is_fallback());
        let latex = block.latex().unwrap();
        assert!(latex.contains("{x}^{2}"), "{}", latex);
        assert!(latex.contains('='));
    }

    #[test]
    fn test_plain_form_is_normalized() {
        let block = typeset("y=a*b;").unwrap();
        match block.content {
            BlockContent::Equation { plain, .. } => assert_eq!(plain, "y = a * b"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_expression_is_an_error() {
        let err = typeset("hello world").unwrap_err();
        assert!(matches!(err, TypesetError::InvalidExpression { .. }));
    }

    #[test]
    fn test_fallback_keeps_literal_text() {
        let block = typeset_or_fallback(&LatexTypesetter, "hello world");
        assert_eq!(
            block.content,
            BlockContent::Fallback {
                literal: "hello world".to_string(),
                message: FALLBACK_MESSAGE.to_string(),
            }
        );
    }
}
