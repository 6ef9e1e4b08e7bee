//! Error types for the Corvid front end.

use thiserror::Error;

/// All errors that a front-end parse can return to a caller.
///
/// Lexical errors never appear here: the lexer reports them in-band as
/// [`Illegal`](crate::token::TokenKind::Illegal) tokens, which the parser
/// converts into a [`CorvidError::SyntaxError`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorvidError {
    /// The source text violated the grammar. The message carries the
    /// `<filename>:<line>:<column>: <description>` form displayed by the
    /// shell.
    #[error("{0}")]
    SyntaxError(String),
}

/// Convenient `Result` alias for fallible front-end operations.
pub type CorvidResult<T> = Result<T, CorvidError>;
