//! Recursive-descent parser for the ECMAScript subset.
//!
//! See [`parse`] for the entry point. The parser pulls tokens from the
//! [`Lexer`] through a lookahead buffer of at most two tokens and builds a
//! [`Program`] in a single pass. The first grammar violation aborts the
//! whole parse; there is no recovery and no partial AST.

use std::fmt;

use crate::ast::{Node, Program, UnaryOp, VarDecl};
use crate::error::{CorvidError, CorvidResult};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Parse `source` into a [`Program`].
///
/// `filename` is used only to prefix error messages and is not validated.
/// Each call owns an independent lexer/parser pair; parsing the same source
/// twice yields structurally equal programs.
///
/// ```
/// use corvid_core::parser::parse;
///
/// let program = parse("repl.js", "console.log(2.0);").unwrap();
/// assert_eq!(program.body.len(), 1);
/// ```
pub fn parse(filename: &str, source: &str) -> CorvidResult<Program> {
    Parser::new(filename, source).parse()
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser
// ─────────────────────────────────────────────────────────────────────────────

struct Parser<'a> {
    lexer: Lexer,
    /// Lookahead buffer: at most two pending tokens.
    lookahead: Vec<Token>,
    filename: &'a str,
}

impl<'a> Parser<'a> {
    fn new(filename: &'a str, source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: Vec::with_capacity(2),
            filename,
        }
    }

    // ── Token plumbing ──────────────────────────────────────────────────────

    /// Pull the next token straight from the lexer, bypassing the buffer.
    fn next(&mut self) -> Token {
        self.lexer.next_token()
    }

    /// Fill the lookahead buffer with `amount` more tokens. Exceeding the
    /// buffer capacity of two is a parser bug, not an input error.
    fn scry(&mut self, amount: usize) {
        assert!(
            self.lookahead.len() + amount <= 2,
            "lookahead > 2: have {:?}, requested {amount} more",
            self.lookahead
        );
        for _ in 0..amount {
            let tok = self.lexer.next_token();
            self.lookahead.push(tok);
        }
    }

    /// Drop the front `amount` tokens of the lookahead buffer.
    fn forget(&mut self, amount: usize) {
        self.lookahead.drain(..amount);
    }

    /// Build a positioned syntax error.
    // TODO: thread the failing token's line/column through instead of the
    // fixed 1:0 the shell currently expects.
    fn error(&self, msg: impl fmt::Display) -> CorvidError {
        CorvidError::SyntaxError(format!("{}:1:0: {}", self.filename, msg))
    }

    // ── Top level ───────────────────────────────────────────────────────────

    fn parse(mut self) -> CorvidResult<Program> {
        let mut body = Vec::new();
        while let Some(node) = self.parse_node()? {
            body.push(node);
        }
        Ok(Program { body })
    }

    /// Parse one top-level node, skipping statement separators. Returns
    /// `None` at end of input.
    fn parse_node(&mut self) -> CorvidResult<Option<Node>> {
        self.scry(1);
        while self.lookahead[0].kind == TokenKind::Semicolon {
            self.forget(1);
            self.scry(1);
        }

        let tok = self.lookahead[0].clone();
        match tok.kind {
            TokenKind::Eof => {
                self.forget(1);
                return Ok(None);
            }
            TokenKind::Illegal => {
                self.forget(1);
                return Err(self.error(format_args!("invalid token: {}", tok.text)));
            }
            _ => {}
        }

        let node = match tok.kind {
            TokenKind::Decimal => self.parse_decimal()?,
            TokenKind::Hexadecimal => self.parse_hex()?,
            TokenKind::String => self.parse_string()?,
            TokenKind::Bool => self.parse_bool()?,
            TokenKind::Undefined => self.parse_undefined()?,
            TokenKind::Null => self.parse_null()?,
            TokenKind::Minus | TokenKind::Plus => self.parse_unary()?,
            TokenKind::Ident => self.parse_ident_expr()?,
            TokenKind::Var => self.parse_var_decls()?,
            _ => return Err(self.error(format_args!("invalid token: {}", tok.text))),
        };

        // Productions must not leave tokens behind in the lookahead buffer.
        assert!(
            self.lookahead.is_empty(),
            "parser for token[{tok}] did not drain the lookahead buffer: {:?}",
            self.lookahead
        );
        Ok(Some(node))
    }

    // ── Literals ────────────────────────────────────────────────────────────

    fn parse_decimal(&mut self) -> CorvidResult<Node> {
        let tok = self.lookahead[0].clone();
        self.forget(1);
        let value: f64 = tok.text.parse().map_err(|e| self.error(e))?;
        Ok(Node::Number(value))
    }

    fn parse_hex(&mut self) -> CorvidResult<Node> {
        let tok = self.lookahead[0].clone();
        self.forget(1);
        // The lexer guarantees a case-insensitive `0x` prefix.
        let value = i64::from_str_radix(&tok.text[2..], 16).map_err(|e| self.error(e))?;
        Ok(Node::Number(value as f64))
    }

    fn parse_string(&mut self) -> CorvidResult<Node> {
        let tok = self.lookahead[0].clone();
        self.forget(1);
        Ok(Node::String(tok.text))
    }

    fn parse_bool(&mut self) -> CorvidResult<Node> {
        let tok = self.lookahead[0].clone();
        self.forget(1);
        let value: bool = tok.text.parse().map_err(|e| self.error(e))?;
        Ok(Node::Bool(value))
    }

    fn parse_undefined(&mut self) -> CorvidResult<Node> {
        self.forget(1);
        Ok(Node::Undefined)
    }

    fn parse_null(&mut self) -> CorvidResult<Node> {
        self.forget(1);
        Ok(Node::Null)
    }

    // ── Unary expressions ───────────────────────────────────────────────────

    /// Parse `+expr` / `-expr`. The operand is parsed as a full node and
    /// must satisfy the expression invariant, so sign chains nest right to
    /// left and a declaration can never be signed.
    fn parse_unary(&mut self) -> CorvidResult<Node> {
        let tok = self.lookahead[0].clone();
        self.forget(1);
        let op = match tok.kind {
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return Err(self.error(format_args!("unexpected: {}", tok.kind))),
        };

        let Some(operand) = self.parse_node()? else {
            return Err(self.error("unexpected EOF"));
        };
        if !operand.is_expr() {
            return Err(self.error(format_args!(
                "expected expression, but got {}",
                operand.kind()
            )));
        }

        Ok(Node::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    // ── Identifier expressions ──────────────────────────────────────────────

    /// Parse an expression led by an identifier: a bare reference, a member
    /// chain, or a call.
    fn parse_ident_expr(&mut self) -> CorvidResult<Node> {
        let ident = self.lookahead[0].clone();
        self.scry(1);
        let next = self.lookahead[1].clone();

        match next.kind {
            // e.g.: console.
            TokenKind::Dot => {
                self.forget(1);
                self.parse_member_expr(Node::Ident(ident.text))
            }
            // e.g.: console(
            TokenKind::LeftParen => self.parse_call_expr(),
            TokenKind::Eof | TokenKind::Semicolon => {
                self.forget(2);
                Ok(Node::Ident(ident.text))
            }
            _ => Err(self.error(format_args!(
                "identifier: unexpected token [{}]",
                next.text
            ))),
        }
    }

    /// Parse the `.property` tail of a member chain. On entry the lookahead
    /// buffer holds the `Dot`. Chains associate to the left: `a.b.c` builds
    /// `(a.b).c`.
    fn parse_member_expr(&mut self, object: Node) -> CorvidResult<Node> {
        self.forget(1); // drops .

        let prop = self.next();
        if prop.kind != TokenKind::Ident {
            return Err(self.error(format_args!("unexpected {}", prop.text)));
        }

        let member = Node::Member {
            object: Box::new(object),
            property: prop.text,
        };

        self.scry(1);
        let tok = self.lookahead[0].clone();
        match tok.kind {
            TokenKind::LeftParen => {
                self.forget(1); // drops (
                let args = self.parse_funcall_args()?;
                Ok(Node::Call {
                    callee: Box::new(member),
                    args,
                })
            }
            TokenKind::Dot => self.parse_member_expr(member),
            TokenKind::Eof => {
                self.forget(1);
                Ok(member)
            }
            _ => Err(self.error(format_args!("unexpected {}", tok.text))),
        }
    }

    /// Parse `ident(args…)`. On entry the lookahead buffer holds the
    /// identifier and the `(`.
    fn parse_call_expr(&mut self) -> CorvidResult<Node> {
        let callee = self.lookahead[0].clone();
        self.forget(2); // drops <ident>(
        let args = self.parse_funcall_args()?;
        Ok(Node::Call {
            callee: Box::new(Node::Ident(callee.text)),
            args,
        })
    }

    /// Parse a call argument list after the opening `(`. Only literals are
    /// accepted as arguments; `)` and end of input close the list.
    fn parse_funcall_args(&mut self) -> CorvidResult<Vec<Node>> {
        assert!(
            self.lookahead.is_empty(),
            "funcall args: lookahead must be empty, have {:?}",
            self.lookahead
        );

        let mut args = Vec::new();
        loop {
            self.scry(1);
            let tok = self.lookahead[0].clone();
            match tok.kind {
                TokenKind::Eof | TokenKind::RightParen => {
                    self.forget(1);
                    break;
                }
                TokenKind::Comma => self.forget(1),
                TokenKind::Decimal => args.push(self.parse_decimal()?),
                TokenKind::Hexadecimal => args.push(self.parse_hex()?),
                TokenKind::String => args.push(self.parse_string()?),
                TokenKind::Bool => args.push(self.parse_bool()?),
                TokenKind::Undefined => args.push(self.parse_undefined()?),
                TokenKind::Null => args.push(self.parse_null()?),
                _ => {
                    return Err(self.error(format_args!(
                        "funcall args: unexpected token [{}]",
                        tok.text
                    )));
                }
            }
        }
        Ok(args)
    }

    // ── Variable declarations ───────────────────────────────────────────────

    /// Parse a `var` statement: one or more comma-separated declarations,
    /// closed by `;` or end of input. A declaration without `= initializer`
    /// defaults to `undefined`. On entry the lookahead buffer holds `var`.
    fn parse_var_decls(&mut self) -> CorvidResult<Node> {
        self.forget(1); // drops var
        let mut decls = Vec::new();

        loop {
            self.scry(1);
            let name = self.lookahead[0].clone();
            if name.kind != TokenKind::Ident {
                return Err(self.error(format_args!(
                    "var declaration: expected identifier, but got {}",
                    name.text
                )));
            }

            self.scry(1);
            let next = self.lookahead[1].clone();
            match next.kind {
                TokenKind::Equal => {
                    self.forget(2); // drops <ident>=
                    let init = self.parse_var_init()?;
                    decls.push(VarDecl {
                        name: name.text,
                        init,
                    });
                    if self.lookahead.is_empty() {
                        self.scry(1);
                    }
                    let sep = self.lookahead[0].clone();
                    match sep.kind {
                        TokenKind::Comma => self.forget(1),
                        TokenKind::Semicolon | TokenKind::Eof => {
                            self.forget(1);
                            break;
                        }
                        _ => {
                            return Err(self.error(format_args!(
                                "var declaration: expected ',' or ';', but got {}",
                                sep.text
                            )));
                        }
                    }
                }
                TokenKind::Comma => {
                    decls.push(VarDecl {
                        name: name.text,
                        init: Node::Undefined,
                    });
                    self.forget(2);
                }
                TokenKind::Semicolon | TokenKind::Eof => {
                    decls.push(VarDecl {
                        name: name.text,
                        init: Node::Undefined,
                    });
                    self.forget(2);
                    break;
                }
                _ => {
                    return Err(self.error(format_args!(
                        "var declaration: expected '=', ',' or ';', but got {}",
                        next.text
                    )));
                }
            }
        }

        Ok(Node::VarDecls(decls))
    }

    /// Parse the right-hand side of `name =`: a literal, a signed literal,
    /// or an identifier-led expression. A bare identifier leaves the token
    /// after it in the buffer for the caller's `,` / `;` decision.
    fn parse_var_init(&mut self) -> CorvidResult<Node> {
        self.scry(1);
        let tok = self.lookahead[0].clone();
        match tok.kind {
            TokenKind::Decimal => self.parse_decimal(),
            TokenKind::Hexadecimal => self.parse_hex(),
            TokenKind::String => self.parse_string(),
            TokenKind::Bool => self.parse_bool(),
            TokenKind::Undefined => self.parse_undefined(),
            TokenKind::Null => self.parse_null(),
            TokenKind::Minus | TokenKind::Plus => self.parse_unary(),
            TokenKind::Ident => {
                self.scry(1);
                let next = self.lookahead[1].clone();
                match next.kind {
                    TokenKind::Dot => {
                        self.forget(1);
                        self.parse_member_expr(Node::Ident(tok.text))
                    }
                    TokenKind::LeftParen => self.parse_call_expr(),
                    _ => {
                        self.forget(1);
                        Ok(Node::Ident(tok.text))
                    }
                }
            }
            _ => Err(self.error(format_args!(
                "var declaration: expected initializer, but got {}",
                tok.text
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
