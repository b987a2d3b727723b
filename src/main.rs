use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser as ClapParser;
use frontend::{lexer::lexer::tokenize, parse, render_diagnostic, ParseResult};
use log::info;

/// Syntax front end: tokenizes and parses a source file and reports
/// every lexical and syntax diagnostic it finds.
#[derive(ClapParser)]
#[command(name = "frontend")]
#[command(about = "Lexer and parser inspection tool")]
struct Cli {
    /// Source file to parse
    input: PathBuf,
    /// Dump the token stream
    #[arg(long)]
    tokens: bool,
    /// Dump the syntax tree
    #[arg(long)]
    ast: bool,
    /// Re-print the syntax tree as canonical source
    #[arg(long)]
    print: bool,
    /// Unit name used in diagnostics (defaults to the file name)
    #[arg(long)]
    unit_name: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", cli.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let unit = cli.unit_name.clone().unwrap_or_else(|| {
        cli.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| cli.input.display().to_string())
    });

    if cli.tokens {
        dump_tokens(&source);
    }

    let start = Instant::now();
    let result = parse(&source, &unit);
    info!("Parsed {} in {:?}", unit, start.elapsed());

    if cli.ast {
        println!("{:#?}", result.entry);
    }
    if cli.print {
        print!("{}", result.entry);
    }

    report(&result, &source)
}

fn dump_tokens(source: &str) {
    let (tokens, _) = tokenize(source);

    for token in tokens {
        println!(
            "{:>4}:{:<4} {:<16} {:?}",
            token.line(),
            token.column(),
            format!("{:?}", token.kind),
            token.lexeme
        );
    }
}

fn report(result: &ParseResult, source: &str) -> ExitCode {
    for diagnostic in &result.diagnostics {
        eprint!("{}", render_diagnostic(diagnostic, source, &result.unit));
    }

    let errors = result.errors().count();
    if errors > 0 {
        eprintln!("{}: {} error(s)", result.unit, errors);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
