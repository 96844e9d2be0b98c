//! Error reporting shared by the scanner, parser and interpreter.
//!
//! A [`Diagnostics`] value is created by the driver and handed to each stage
//! by `&mut` reference. It records whether a syntax or runtime error occurred
//! during the current unit (one file, one REPL line) and keeps the formatted
//! messages in emission order.

use log::debug;

use crate::error::{LexError, ParseError, RuntimeError};

/// Render a diagnostic line.
///
/// `location` is the "at 'x'" / "at end" fragment, if there is one.
pub fn format_message(line: usize, location: Option<&str>, message: &str) -> String {
    match location {
        Some(location) => format!("[line {}] Error {}: {}", line, location, message),
        None => format!("[line {}] Error: {}", line, message),
    }
}

#[derive(Debug)]
pub struct Diagnostics {
    had_error: bool,
    had_runtime_error: bool,
    messages: Vec<String>,

    /// Echo every message to stderr as it is reported.
    echo: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// A sink that prints to stderr.
    pub fn new() -> Self {
        Self {
            had_error: false,
            had_runtime_error: false,
            messages: Vec::new(),
            echo: true,
        }
    }

    /// A sink that only records messages.
    pub fn quiet() -> Self {
        Self {
            echo: false,
            ..Self::new()
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Report a lexical or syntax error at `line`.
    pub fn error_at_line(&mut self, line: usize, message: &str) {
        self.had_error = true;
        self.emit(format_message(line, None, message));
    }

    pub fn lex_error(&mut self, error: &LexError) {
        self.error_at_line(error.line, &error.message);
    }

    pub fn parse_error(&mut self, error: &ParseError) {
        self.had_error = true;

        let location = error.location.to_string();
        self.emit(format_message(error.line, Some(&location), &error.message));
    }

    pub fn runtime_error(&mut self, error: &RuntimeError) {
        self.had_runtime_error = true;
        self.emit(format!("[line {}] Runtime error: {}", error.line(), error));
    }

    /// Clear the syntax flag between REPL lines. Runtime state is untouched.
    pub fn reset_syntax(&mut self) {
        self.had_error = false;
        self.messages.clear();
    }

    fn emit(&mut self, message: String) {
        debug!("Reporting diagnostic: {}", message);

        if self.echo {
            eprintln!("{}", message);
        }

        self.messages.push(message);
    }
}
