//! Error taxonomy of the engine. Every fallible operation returns one of
//! these as an explicit `Result`; nothing is printed or thrown across the
//! library boundary, the presentation layer decides how to surface them.

use thiserror::Error;

/// Unrecognized character during tokenization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized character '{character}' at position {position}")]
pub struct LexError {
    pub position: usize,
    pub character: char,
}

/// Malformed grammar, unknown function name, unmatched parenthesis or
/// trailing input. Lexing failures are carried transparently so callers
/// handle a single error type for the whole string-to-tree stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("empty expression")]
    Empty,
    #[error("expected {expected} at position {position}")]
    Unexpected { position: usize, expected: String },
    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { position: usize, name: String },
    #[error("unmatched parenthesis at position {position}")]
    UnmatchedParen { position: usize },
    #[error("trailing input at position {position}")]
    TrailingInput { position: usize },
}

/// Numeric evaluation failure. Scalar evaluation aborts on the first of
/// these it reaches; grid evaluation only fails whole on `UnboundVariable`
/// and `ShapeMismatch`, per-element violations degrade to NaN instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("variable '{0}' has no binding")]
    UnboundVariable(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("domain error: {0}")]
    DomainError(String),
    #[error("binding '{name}' has length {len}, expected {expected} or 1")]
    ShapeMismatch {
        name: String,
        len: usize,
        expected: usize,
    },
}
