use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, LiteralValue, Stmt};
use crate::diagnostics::Diagnostics;
use crate::error::{RuntimeError, RuntimeResult};
use crate::natives::{Clock, Print};
use crate::scope::{ScopeId, Scopes};
use crate::token::{Token, TokenType};
use crate::value::{Callable, Value};

/// How a statement finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Normal,

    /// A `break` is unwinding to the nearest `while`.
    Break,
}

pub struct Interpreter {
    scopes: Scopes,
    current: ScopeId,
    output: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter writing `print` output to stdout.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }

    /// Interpreter writing `print` output to `output`.
    pub fn with_output<W: Write + 'static>(output: W) -> Self {
        info!("Initializing Interpreter");

        let mut interpreter = Self {
            scopes: Scopes::new(),
            current: ScopeId::ROOT,
            output: Box::new(output),
        };

        interpreter.define_native(Rc::new(Clock));
        interpreter.define_native(Rc::new(Print));

        interpreter
    }

    fn define_native(&mut self, native: Rc<dyn Callable>) {
        debug!("Defining native function '{}'", native.name());

        let name = native.name().to_owned();

        // The root scope is fresh, so this cannot collide.
        if let Err(e) = self
            .scopes
            .define(ScopeId::ROOT, &name, Value::Callable(native), false, 0)
        {
            debug!("Native '{}' not installed: {}", name, e);
        }
    }

    /// Where `print` writes.
    pub fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    /// Look a name up from the current scope outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scopes.get(self.current, name, 0).ok()
    }

    /// Runs a program. A runtime error stops the remaining statements and is
    /// reported to `diagnostics`.
    pub fn interpret(&mut self, statements: &[Stmt<'_>], diagnostics: &mut Diagnostics) {
        debug!("Interpreting {} statements", statements.len());

        match self.run(statements) {
            Ok(()) => info!("Interpretation completed successfully"),
            Err(e) => {
                debug!("Runtime error: {}", e);
                diagnostics.runtime_error(&e);
            }
        }

        if let Err(e) = self.output.flush() {
            debug!("Failed to flush output: {}", e);
        }
    }

    /// Like [`interpret`](Self::interpret) but hands the error back.
    pub fn run(&mut self, statements: &[Stmt<'_>]) -> RuntimeResult<()> {
        for stmt in statements {
            if let Flow::Break = self.execute(stmt)? {
                return Err(RuntimeError::BreakOutsideLoop {
                    line: break_line(stmt).unwrap_or(0),
                });
            }
        }

        Ok(())
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt<'_>) -> RuntimeResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print { keyword, expr } => {
                let value = self.evaluate(expr)?;
                let print = self.scopes.get(ScopeId::ROOT, "print", keyword.line)?;

                self.call_value(print, keyword, vec![value])?;
                Ok(Flow::Normal)
            }

            Stmt::Const { name, initializer } => {
                let value = self.evaluate(initializer)?;

                self.scopes
                    .define(self.current, name.lexeme, value, false, name.line)?;
                Ok(Flow::Normal)
            }

            Stmt::Mut { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };

                self.scopes
                    .define(self.current, name.lexeme, value, true, name.line)?;
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => self.execute_block(statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                debug!("Entering while loop");

                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Break = self.execute(body)? {
                        debug!("Break out of while loop");
                        break;
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Break { .. } => Ok(Flow::Break),
        }
    }

    /// Runs `statements` in a fresh child scope. The previous scope is
    /// restored however the block exits.
    fn execute_block(&mut self, statements: &[Stmt<'_>]) -> RuntimeResult<Flow> {
        let previous = self.current;
        let scope = self.scopes.push(previous);
        self.current = scope;

        let result = self.execute_all(statements);

        self.current = previous;
        self.scopes.truncate(scope);

        result
    }

    fn execute_all(&mut self, statements: &[Stmt<'_>]) -> RuntimeResult<Flow> {
        for stmt in statements {
            if let Flow::Break = self.execute(stmt)? {
                return Ok(Flow::Break);
            }
        }

        Ok(Flow::Normal)
    }

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr<'_>) -> RuntimeResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::Str(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Null => Value::Null,
            }),

            Expr::Variable(name) => self.scopes.get(self.current, name.lexeme, name.line),

            Expr::Paren(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let value = self.evaluate(right)?;

                match operator.token_type {
                    TokenType::MINUS => Ok(Value::Number(-value.to_number())),
                    TokenType::BANG => Ok(Value::Bool(!value.is_truthy())),
                    _ => Err(RuntimeError::type_mismatch(
                        operator.line,
                        format!("Invalid unary operator '{}'.", operator.lexeme),
                    )),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;

                binary(operator, left, right)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                let decided = match operator.token_type {
                    TokenType::OR => left.is_truthy(),
                    _ => !left.is_truthy(),
                };

                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;

                self.scopes
                    .assign(self.current, name.lexeme, value.clone(), name.line)?;

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                self.call_value(callee, paren, values)
            }
        }
    }

    /// Checks the callable contract, then invokes.
    fn call_value(
        &mut self,
        callee: Value,
        paren: &Token<'_>,
        arguments: Vec<Value>,
    ) -> RuntimeResult<Value> {
        let function = match callee {
            Value::Callable(function) => function,
            other => {
                debug!("Attempted to call a {}", other.type_name());
                return Err(RuntimeError::NotCallable { line: paren.line });
            }
        };

        if arguments.len() != function.arity() {
            return Err(RuntimeError::ArityMismatch {
                expected: function.arity(),
                got: arguments.len(),
                line: paren.line,
            });
        }

        debug!("Calling native function '{}'", function.name());

        function
            .call(self, arguments)
            .map_err(|message| RuntimeError::Native {
                message,
                line: paren.line,
            })
    }
}

fn binary(operator: &Token<'_>, left: Value, right: Value) -> RuntimeResult<Value> {
    use Value::{Bool, Number, Str};

    let line = operator.line;

    match operator.token_type {
        TokenType::PLUS => match (left, right) {
            (Number(a), Number(b)) => Ok(Number(a + b)),
            (Str(a), Str(b)) => Ok(Str(a + &b)),
            (Str(a), right @ Number(_)) => Ok(Str(format!("{}{}", a, right))),
            (left @ Number(_), Str(b)) => Ok(Str(format!("{}{}", left, b))),
            (left, right) => Err(RuntimeError::type_mismatch(
                line,
                format!(
                    "Operands must be two numbers or two strings, got {} and {}.",
                    left.type_name(),
                    right.type_name()
                ),
            )),
        },

        TokenType::EQUAL_EQUAL => Ok(Bool(left == right)),
        TokenType::BANG_EQUAL => Ok(Bool(left != right)),

        _ => {
            let (Number(a), Number(b)) = (&left, &right) else {
                return Err(RuntimeError::type_mismatch(
                    line,
                    format!("Operands of '{}' must be numbers.", operator.lexeme),
                ));
            };

            let (a, b) = (*a, *b);

            match operator.token_type {
                TokenType::MINUS => Ok(Number(a - b)),
                TokenType::STAR => Ok(Number(a * b)),
                TokenType::SLASH => Ok(Number(a / b)),
                TokenType::GREATER => Ok(Bool(a > b)),
                TokenType::GREATER_EQUAL => Ok(Bool(a >= b)),
                TokenType::LESS => Ok(Bool(a < b)),
                TokenType::LESS_EQUAL => Ok(Bool(a <= b)),
                _ => Err(RuntimeError::type_mismatch(
                    line,
                    format!("Invalid binary operator '{}'.", operator.lexeme),
                )),
            }
        }
    }
}

/// Line of the `break` a top‑level statement escaped with, if it can be
/// found without re-running anything.
fn break_line(stmt: &Stmt<'_>) -> Option<usize> {
    match stmt {
        Stmt::Break { keyword } => Some(keyword.line),
        Stmt::Block(statements) => statements.iter().find_map(break_line),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => break_line(then_branch).or_else(|| else_branch.as_deref().and_then(break_line)),
        _ => None,
    }
}
