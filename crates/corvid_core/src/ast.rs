//! Abstract syntax tree node definitions.
//!
//! The parser produces a [`Program`] that exclusively owns its node tree;
//! once built it is handed to the evaluator and the front end retains
//! nothing. Structural equality (`PartialEq`, deep and order-sensitive) is
//! the verification primitive used throughout the tests.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Program
// ─────────────────────────────────────────────────────────────────────────────

/// The root of a parsed source file: its top-level nodes in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level expression and declaration nodes.
    pub body: Vec<Node>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.body.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nodes
// ─────────────────────────────────────────────────────────────────────────────

/// A unary sign operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Minus,
    /// `+`
    Plus,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
        })
    }
}

/// A single `name = initializer` binding inside a `var` statement. A
/// declaration without an initializer gets [`Node::Undefined`].
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The declared identifier.
    pub name: String,
    /// The initializer expression.
    pub init: Node,
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.init)
    }
}

/// An AST node.
///
/// Only a fixed subset of kinds may occupy an expression position (see
/// [`Node::is_expr`]); `VarDecls` is statement-only and [`Program`] is the
/// root and never nests.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric literal. Decimal and hexadecimal sources both collapse into
    /// this single double-precision variant at parse time.
    Number(f64),
    /// String literal (quotes stripped).
    String(String),
    /// `true` / `false`.
    Bool(bool),
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// Unary sign expression; the operand always satisfies [`Node::is_expr`].
    Unary {
        /// The sign operator.
        op: UnaryOp,
        /// The signed expression.
        operand: Box<Node>,
    },
    /// Property access `object.property`; chains nest on the object side,
    /// so `a.b.c` is `(a.b).c`.
    Member {
        /// The object whose property is accessed.
        object: Box<Node>,
        /// The property name (identifier text only).
        property: String,
    },
    /// Call `callee(args…)`; the callee is an identifier or a member chain.
    Call {
        /// The called expression.
        callee: Box<Node>,
        /// Arguments in source order.
        args: Vec<Node>,
    },
    /// An identifier reference.
    Ident(String),
    /// A `var` statement: its declarations in source order.
    VarDecls(Vec<VarDecl>),
}

/// Dispatch tag for [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// [`Node::Number`]
    Number,
    /// [`Node::String`]
    String,
    /// [`Node::Bool`]
    Bool,
    /// [`Node::Null`]
    Null,
    /// [`Node::Undefined`]
    Undefined,
    /// [`Node::Unary`]
    UnaryExpr,
    /// [`Node::Member`]
    MemberExpr,
    /// [`Node::Call`]
    CallExpr,
    /// [`Node::Ident`]
    Ident,
    /// [`Node::VarDecls`]
    VarDecls,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Number => "Number",
            NodeKind::String => "String",
            NodeKind::Bool => "Bool",
            NodeKind::Null => "Null",
            NodeKind::Undefined => "Undefined",
            NodeKind::UnaryExpr => "UnaryExpr",
            NodeKind::MemberExpr => "MemberExpr",
            NodeKind::CallExpr => "CallExpr",
            NodeKind::Ident => "Ident",
            NodeKind::VarDecls => "VarDecls",
        })
    }
}

impl Node {
    /// Returns this node's dispatch tag.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Bool(_) => NodeKind::Bool,
            Node::Null => NodeKind::Null,
            Node::Undefined => NodeKind::Undefined,
            Node::Unary { .. } => NodeKind::UnaryExpr,
            Node::Member { .. } => NodeKind::MemberExpr,
            Node::Call { .. } => NodeKind::CallExpr,
            Node::Ident(_) => NodeKind::Ident,
            Node::VarDecls(_) => NodeKind::VarDecls,
        }
    }

    /// Returns `true` when this node may occupy an expression position.
    pub fn is_expr(&self) -> bool {
        matches!(
            self,
            Node::Number(_)
                | Node::String(_)
                | Node::Bool(_)
                | Node::Null
                | Node::Undefined
                | Node::Unary { .. }
                | Node::Member { .. }
                | Node::Call { .. }
                | Node::Ident(_)
        )
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(v) => write!(f, "{v}"),
            Node::String(s) => write!(f, "\"{s}\""),
            Node::Bool(b) => write!(f, "{b}"),
            Node::Null => f.write_str("null"),
            Node::Undefined => f.write_str("undefined"),
            Node::Unary { op, operand } => write!(f, "{op}{operand}"),
            Node::Member { object, property } => write!(f, "{object}.{property}"),
            Node::Call { callee, args } => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Node::Ident(name) => f.write_str(name),
            Node::VarDecls(decls) => {
                f.write_str("var ")?;
                for (i, decl) in decls.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{decl}")?;
                }
                Ok(())
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn member(object: Node, property: &str) -> Node {
        Node::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    // ── Expression invariant ──────────────────────────────────────────────

    #[test]
    fn test_expression_kinds() {
        assert!(Node::Number(1.0).is_expr());
        assert!(Node::String("x".into()).is_expr());
        assert!(Node::Bool(true).is_expr());
        assert!(Node::Null.is_expr());
        assert!(Node::Undefined.is_expr());
        assert!(Node::Ident("a".into()).is_expr());
        assert!(member(Node::Ident("a".into()), "b").is_expr());
        assert!(
            Node::Call {
                callee: Box::new(Node::Ident("f".into())),
                args: vec![],
            }
            .is_expr()
        );
        assert!(
            Node::Unary {
                op: UnaryOp::Minus,
                operand: Box::new(Node::Number(0.0)),
            }
            .is_expr()
        );
    }

    #[test]
    fn test_statement_kinds_are_not_expressions() {
        let decls = Node::VarDecls(vec![VarDecl {
            name: "a".into(),
            init: Node::Undefined,
        }]);
        assert!(!decls.is_expr());
        assert_eq!(decls.kind(), NodeKind::VarDecls);
    }

    // ── Structural equality ───────────────────────────────────────────────

    #[test]
    fn test_deep_equality() {
        let a = member(member(Node::Ident("a".into()), "b"), "c");
        let b = member(member(Node::Ident("a".into()), "b"), "c");
        assert_eq!(a, b);

        // Association matters: (a.b).c != a.(b.c)-shaped trees.
        let c = member(Node::Ident("a".into()), "c");
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let one_two = Program {
            body: vec![Node::Number(1.0), Node::Number(2.0)],
        };
        let two_one = Program {
            body: vec![Node::Number(2.0), Node::Number(1.0)],
        };
        assert_ne!(one_two, two_one);
        assert_eq!(one_two, one_two.clone());
    }

    #[test]
    fn test_number_equality_is_exact() {
        assert_eq!(Node::Number(255.0), Node::Number(0xff as f64));
        assert_ne!(Node::Number(0.1), Node::Number(0.2));
    }

    // ── Display ───────────────────────────────────────────────────────────

    #[test]
    fn test_display() {
        let call = Node::Call {
            callee: Box::new(member(Node::Ident("console".into()), "log")),
            args: vec![Node::Number(2.0), Node::String("hi".into())],
        };
        assert_eq!(call.to_string(), "console.log(2, \"hi\")");

        let neg = Node::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(Node::Number(1.0)),
        };
        assert_eq!(neg.to_string(), "-1");

        let decls = Node::VarDecls(vec![
            VarDecl {
                name: "a".into(),
                init: Node::Number(1.0),
            },
            VarDecl {
                name: "b".into(),
                init: Node::Undefined,
            },
        ]);
        assert_eq!(decls.to_string(), "var a = 1, b = undefined");
    }

    #[test]
    fn test_program_display_joins_lines() {
        let prog = Program {
            body: vec![Node::Ident("a".into()), Node::Ident("b".into())],
        };
        assert_eq!(prog.to_string(), "a\nb");
    }
}
