use eqn_parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypesetError {
    #[error("'{expr}' is not a valid symbolic expression: {source}")]
    InvalidExpression {
        expr: String,
        #[source]
        source: ParseError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalerError {
    #[error("rendered block has no usable extent ({width} x {height} of the container)")]
    DegenerateRender { width: f64, height: f64 },

    #[error("text reached {size:.4} of the container after {iterations} steps, target {target}")]
    ScalingDidNotConverge {
        iterations: usize,
        size: f64,
        target: f64,
    },

    #[error("target fraction {0} is outside (0, 1]")]
    InvalidTarget(f64),
}
