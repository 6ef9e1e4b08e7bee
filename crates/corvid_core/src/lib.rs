//! `corvid_core` — the lexer/parser front end of the Corvid ECMAScript
//! interpreter.
//!
//! The front end turns raw source text into an abstract syntax tree for a
//! downstream evaluator: the [`lexer`] classifies code points into
//! [`token::Token`]s one pull at a time, and the [`parser`] drives it
//! through a two-token lookahead buffer to build an [`ast::Program`] — or
//! fails with a positioned [`error::CorvidError`]. Evaluation, the object
//! runtime, built-ins, and the shell are separate components that consume
//! this crate.
//!
//! # Crate layout
//!
//! - [`token`] — lexical token definitions and the keyword table.
//! - [`lexer`] — character-level state-machine tokenizer.
//! - [`ast`] — AST node definitions with structural equality.
//! - [`parser`] — recursive-descent parser and the [`parse`] entry point.
//! - [`error`] — error types.
//!
//! # Example
//!
//! ```
//! use corvid_core::parse;
//!
//! let program = parse("example.js", "var greeting = \"hello\";").unwrap();
//! assert_eq!(program.body.len(), 1);
//!
//! let err = parse("example.js", "0x").unwrap_err();
//! assert_eq!(err.to_string(), "example.js:1:0: invalid token: 0x");
//! ```

/// AST node definitions with structural equality.
pub mod ast;
/// Error types for the front end.
pub mod error;
/// Character-level state-machine tokenizer.
pub mod lexer;
/// Recursive-descent parser over a two-token lookahead buffer.
pub mod parser;
/// Lexical token definitions and the keyword table.
pub mod token;

pub use error::{CorvidError, CorvidResult};
pub use parser::parse;
