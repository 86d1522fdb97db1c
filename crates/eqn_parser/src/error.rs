use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error: {0}")]
    NomError(String),
    #[error("Unconsumed input at byte {offset}: {remaining}")]
    UnconsumedInput { remaining: String, offset: usize },
    #[error("Empty expression")]
    Empty,
}

