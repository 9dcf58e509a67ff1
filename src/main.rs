//! sysy-run: evaluate a program written in the restricted C-like teaching language

use clap::Parser as ClapParser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::debug;

use sysy_run::interpreter::constants::DEFAULT_MAX_CALL_DEPTH;
use sysy_run::interpreter::{exit_status, Interpreter, InterpreterConfig, RuntimeError};
use sysy_run::parser::lexer::{LexError, Lexer};
use sysy_run::parser::{ParseError, Parser};
use sysy_run::runtime::StreamConsole;

#[derive(ClapParser, Debug)]
#[command(name = "sysy-run", version, about = "Evaluate a restricted C-like program")]
struct Cli {
    /// Source file to run
    file: PathBuf,

    /// Read program input from this file instead of stdin
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Maximum nesting of user-function calls
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Tokenize and dump tokens (debug)
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Parse and dump the AST (debug)
    #[arg(long)]
    ast: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Runtime(_) => ExitCode::from(2),
            _ => ExitCode::from(1),
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Program output owns stdout; diagnostics go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            debug!(error = ?e, "run failed");
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn execute(cli: &Cli) -> Result<u8, CliError> {
    let source = read_source(&cli.file)?;

    if cli.tokens {
        return tokenize_file(&source);
    }

    let program = Parser::new(&source)?.parse_program()?;
    debug!(
        globals = program.globals.len(),
        functions = program.functions.len(),
        "parsed program"
    );

    if cli.ast {
        println!("{program:#?}");
        return Ok(0);
    }

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(|source| {
            CliError::Io {
                path: path.clone(),
                source,
            }
        })?)),
        None => Box::new(io::stdin().lock()),
    };
    let console = StreamConsole::new(reader, BufWriter::new(io::stdout().lock()));

    let config = InterpreterConfig {
        max_call_depth: cli.max_call_depth,
    };
    let mut interpreter = Interpreter::with_config(program, console, config);
    let code = interpreter.run()?;

    Ok(exit_status(code))
}

fn tokenize_file(source: &str) -> Result<u8, CliError> {
    let tokens = Lexer::new(source).tokenize()?;
    for token in &tokens {
        let loc = token.location();
        println!("{}:{}\t{}", loc.line, loc.column, token);
    }
    Ok(0)
}
