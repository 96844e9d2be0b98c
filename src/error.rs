//! Error hierarchy for the **ds interpreter**.
//!
//! Each stage has its own error type: [`LexError`] from the scanner,
//! [`ParseError`] from the parser and [`RuntimeError`] from the interpreter.
//! None of them print anything; reporting is the job of
//! [`Diagnostics`](crate::diagnostics::Diagnostics).

use std::fmt;

use log::info;
use thiserror::Error;

use crate::token::{Token, TokenType};

/// Lexical error: unexpected character or unterminated string.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error: {message}")]
pub struct LexError {
    pub message: String,

    /// 1‑based line where the error occurred.
    pub line: usize,
}

impl LexError {
    pub fn new<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LexError { message, line }
    }
}

/// Where a syntax error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The parser ran into the EOF token.
    End,

    /// The offending token's lexeme.
    Token(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::End => write!(f, "at end"),
            Location::Token(lexeme) => write!(f, "at '{}'", lexeme),
        }
    }
}

/// Syntax error raised by the parser.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: Location,
    pub line: usize,
}

impl ParseError {
    /// Build an error attributed to `token`.
    pub fn at<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        let location = if token.is(TokenType::EOF) {
            Location::End
        } else {
            Location::Token(token.lexeme.to_owned())
        };

        info!(
            "Creating Parse error: line={}, {}, msg={}",
            token.line, location, message
        );

        ParseError {
            message,
            location,
            line: token.line,
        }
    }
}

/// Failure while executing a program. Unwinds to the top level and stops the
/// current run.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RuntimeError {
    #[error("{message}")]
    TypeMismatch { message: String, line: usize },

    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String, line: usize },

    #[error("Variable '{name}' is already defined in this scope.")]
    DuplicateBinding { name: String, line: usize },

    #[error("Cannot assign to constant '{name}'.")]
    ImmutableAssignment { name: String, line: usize },

    #[error("Can only call functions.")]
    NotCallable { line: usize },

    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch {
        expected: usize,
        got: usize,
        line: usize,
    },

    #[error("Can't use 'break' outside of a loop.")]
    BreakOutsideLoop { line: usize },

    /// A native function reported a failure.
    #[error("{message}")]
    Native { message: String, line: usize },
}

impl RuntimeError {
    pub fn type_mismatch<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating TypeMismatch error: line={}, msg={}", line, message);

        RuntimeError::TypeMismatch { message, line }
    }

    pub fn undefined(name: &str, line: usize) -> Self {
        info!("Creating UndefinedVariable error: line={}, name={}", line, name);

        RuntimeError::UndefinedVariable {
            name: name.to_owned(),
            line,
        }
    }

    pub fn duplicate(name: &str, line: usize) -> Self {
        info!("Creating DuplicateBinding error: line={}, name={}", line, name);

        RuntimeError::DuplicateBinding {
            name: name.to_owned(),
            line,
        }
    }

    pub fn immutable(name: &str, line: usize) -> Self {
        info!("Creating ImmutableAssignment error: line={}, name={}", line, name);

        RuntimeError::ImmutableAssignment {
            name: name.to_owned(),
            line,
        }
    }

    /// Line of the token that triggered the error.
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::TypeMismatch { line, .. }
            | RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::DuplicateBinding { line, .. }
            | RuntimeError::ImmutableAssignment { line, .. }
            | RuntimeError::NotCallable { line }
            | RuntimeError::ArityMismatch { line, .. }
            | RuntimeError::BreakOutsideLoop { line }
            | RuntimeError::Native { line, .. } => *line,
        }
    }
}

/// Interpreter‑wide result alias.
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
