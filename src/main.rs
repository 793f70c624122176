//! `alumina-parse`: tokenizes and parses a single source file.

use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use alumina_syntax::{lexer::lexer::tokenize, parser::parser::parse, render_error};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "alumina-parse", version, about = "Parse an alumina source file")]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree
    #[arg(long)]
    ast: bool,
}

fn main() -> ExitCode {
    // Structured logging with env-based filter, defaulting to warn
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let start = Instant::now();
    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", render_error(&error, &file_name, &source));
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(elapsed = ?start.elapsed(), count = tokens.len(), "tokenized");

    if cli.tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let ast = match parse(tokens, &file_name) {
        Ok(ast) => ast,
        Err(error) => {
            eprint!("{}", render_error(&error, &file_name, &source));
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(elapsed = ?parse_start.elapsed(), items = ast.items.len(), "parsed");

    if cli.ast {
        println!("{:#?}", ast);
    }

    ExitCode::SUCCESS
}
