pub mod ast;
pub mod ast_printer;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod natives;
pub mod parser;
pub mod scanner;
pub mod scope;
pub mod token;
pub mod value;

use log::info;

use diagnostics::Diagnostics;
use interpreter::Interpreter;
use parser::Parser;

/// Scan, parse and, if both succeeded, execute `source`.
///
/// Errors land in `diagnostics`; inspect its flags afterwards.
pub fn run(source: &str, interpreter: &mut Interpreter, diagnostics: &mut Diagnostics) {
    let tokens = scanner::scan(source, diagnostics);
    let statements = Parser::new(&tokens).parse(diagnostics);

    if diagnostics.had_error() {
        info!("Syntax errors present, skipping execution");
        return;
    }

    interpreter.interpret(&statements, diagnostics);
}
