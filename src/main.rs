use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use ds_interpreter as ds;

use ds::ast_printer::AstPrinter;
use ds::diagnostics::Diagnostics;
use ds::interpreter::Interpreter;
use ds::parser::Parser;
use ds::scanner::Scanner;

/// Exit code for lexical / syntax errors.
const EXIT_SYNTAX: i32 = 65;

/// Exit code for uncaught runtime errors.
const EXIT_RUNTIME: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(name = "ds", version, about = "ds language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses a file and prints each statement in prefix form
    Parse { filename: PathBuf },

    /// Evaluates a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs a file as a ds program; starts a REPL without one
    Run { filename: Option<PathBuf> },
}

/// Reads a whole source file as UTF‑8.
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf).context(format!("File {:?} is not valid UTF-8", filename))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'ds_interpreter::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("ds_interpreter::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(source: &str, json: bool) -> Result<i32> {
    let mut tokens = Vec::new();
    let mut tokenized = true;

    for result in Scanner::new(source) {
        match result {
            Ok(token) if json => tokens.push(token),
            Ok(token) => println!("{}", token),
            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if json {
        let out = serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?;
        println!("{}", out);
    }

    Ok(if tokenized { 0 } else { EXIT_SYNTAX })
}

fn parse(source: &str) -> i32 {
    let mut diagnostics = Diagnostics::new();
    let tokens = ds::scanner::scan(source, &mut diagnostics);
    let statements = Parser::new(&tokens).parse(&mut diagnostics);

    if diagnostics.had_error() {
        return EXIT_SYNTAX;
    }

    for stmt in &statements {
        println!("{}", AstPrinter::print_stmt(stmt));
    }

    0
}

fn evaluate(source: &str) -> i32 {
    let mut diagnostics = Diagnostics::new();
    let tokens = ds::scanner::scan(source, &mut diagnostics);
    let expr = Parser::new(&tokens).parse_expression(&mut diagnostics);

    let expr = match expr {
        Some(expr) if !diagnostics.had_error() => expr,
        _ => return EXIT_SYNTAX,
    };

    let mut interpreter = Interpreter::new();

    match interpreter.evaluate(&expr) {
        Ok(value) => {
            debug!("Evaluated to: {}", value);
            println!("{}", value);
            0
        }
        Err(e) => {
            diagnostics.runtime_error(&e);
            EXIT_RUNTIME
        }
    }
}

fn run_file(source: &str) -> i32 {
    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::new();

    ds::run(source, &mut interpreter, &mut diagnostics);

    if diagnostics.had_error() {
        EXIT_SYNTAX
    } else if diagnostics.had_runtime_error() {
        EXIT_RUNTIME
    } else {
        0
    }
}

/// One line per unit; bindings survive between lines.
fn repl() -> Result<()> {
    info!("Starting REPL");

    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        ds::run(&line, &mut interpreter, &mut diagnostics);
        diagnostics.reset_syntax();
    }

    info!("REPL finished");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let code = match args.commands {
        Commands::Tokenize { filename, json } => tokenize(&read_file(filename)?, json)?,

        Commands::Parse { filename } => parse(&read_file(filename)?),

        Commands::Evaluate { filename } => evaluate(&read_file(filename)?),

        Commands::Run {
            filename: Some(filename),
        } => run_file(&read_file(filename)?),

        Commands::Run { filename: None } => {
            repl()?;
            0
        }
    };

    if code != 0 {
        debug!("Exiting with code {}", code);
        process::exit(code);
    }

    Ok(())
}
