//! Abstract syntax tree produced by the [`Parser`](crate::parser::Parser).
//!
//! Nodes borrow their tokens from the scanner's output, so an AST never
//! outlives the token vector it was parsed from. Operator and name tokens are
//! kept so runtime errors can name the right line.

use crate::token::Token;

/// A **literal constant** that appears directly in the source code.
///
/// The parser copies the value out of the token so the literal itself does
/// not borrow anything.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal ‑ stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,

    False,

    Null,
}

/// Every kind of *expression* in ds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Literal(LiteralValue),

    /// Variable access ‑ resolves to the identifier’s current value at runtime.
    Variable(&'a Token<'a>),

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Paren(Box<Expr<'a>>),

    /// Prefix unary operator expression: `!ready`, `-42`.
    Unary {
        operator: &'a Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// Infix binary operator expression: `a + b`, `x <= y`.
    Binary {
        left: Box<Expr<'a>>,
        operator: &'a Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr<'a>>,
        operator: &'a Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// `identifier "=" expression`
    Assign {
        name: &'a Token<'a>,
        value: Box<Expr<'a>>,
    },

    /// Call expression: `clock()`, `print(x)`.
    Call {
        /// Expression that evaluates to a callable.
        callee: Box<Expr<'a>>,
        /// The closing `)` token ‑ retained for error reporting.
        paren: &'a Token<'a>,
        arguments: Vec<Expr<'a>>,
    },
}

/// Complete executable constructs. A program is a `Vec` of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    /// Stand‑alone expression terminated by a semicolon.
    Expression(Expr<'a>),

    /// `print expr;` ‑ dispatches to the native `print`.
    Print {
        keyword: &'a Token<'a>,
        expr: Expr<'a>,
    },

    /// `"const" IDENT "=" initializer ";"`
    Const {
        name: &'a Token<'a>,
        initializer: Expr<'a>,
    },

    /// `"mut" IDENT ("=" initializer)? ";"` ‑ defaults to `null`.
    Mut {
        name: &'a Token<'a>,
        initializer: Option<Expr<'a>>,
    },

    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt<'a>>),

    If {
        condition: Expr<'a>,
        then_branch: Box<Stmt<'a>>,
        else_branch: Option<Box<Stmt<'a>>>,
    },

    /// `while` loop. `for` loops are desugared into this.
    While {
        condition: Expr<'a>,
        body: Box<Stmt<'a>>,
    },

    Break {
        keyword: &'a Token<'a>,
    },
}
