use std::fs;
use std::io::Read;
use std::process::ExitCode;

use clap::Parser;

use gradus::{compile, CompileError, MAX_LEVEL, MIN_LEVEL};

#[derive(Parser, Debug)]
#[command(version, about = "Compile Gradus source to Python")]
struct Cli {
    /// Source file, or '-' to read from standard input
    source: String,

    /// Language level to compile at
    #[arg(short, long, default_value_t = 4)]
    level: u8,

    /// Write the generated Python here instead of standard output
    #[arg(short, long)]
    output: Option<String>,

    /// Also list the commands the program uses
    #[arg(long)]
    show_commands: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !(MIN_LEVEL..=MAX_LEVEL).contains(&cli.level) {
        eprintln!(
            "error: level {} is outside the supported range {}..={}",
            cli.level, MIN_LEVEL, MAX_LEVEL
        );
        return ExitCode::from(2);
    }

    let (name, source) = match read_source(&cli.source) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", cli.source, e);
            return ExitCode::from(2);
        }
    };

    let compiled = match compile(&source, cli.level) {
        Ok(compiled) => compiled,
        Err(err) => {
            report(&err, &name, &source);
            return ExitCode::FAILURE;
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &compiled.source) {
                eprintln!("error: cannot write '{}': {}", path, e);
                return ExitCode::from(2);
            }
        }
        None => println!("{}", compiled.source),
    }

    if cli.show_commands {
        let used: Vec<&str> = compiled.commands.iter().map(|c| c.name()).collect();
        eprintln!("commands: {}", used.join(", "));
    }

    ExitCode::SUCCESS
}

fn read_source(path: &str) -> std::io::Result<(String, String)> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(("<stdin>".to_string(), buffer))
    } else {
        Ok((path.to_string(), fs::read_to_string(path)?))
    }
}

/// Render a diagnostic the way students see it: the message, the
/// offending source line with a caret, and the repaired code when the
/// advisor found one.
fn report(err: &CompileError, name: &str, source: &str) {
    const RED: &str = "\x1b[1;31m";
    const BLUE: &str = "\x1b[1;34m";
    const GREEN: &str = "\x1b[1;32m";
    const YELLOW: &str = "\x1b[1;33m";
    const RESET: &str = "\x1b[0m";
    const BOLD: &str = "\x1b[1m";

    eprintln!("{}error{}: {}{}{}", RED, RESET, BOLD, err, RESET);

    let line = err.line_number();
    let column = err.column().unwrap_or(1);
    eprintln!("  {}-->{} {}:{}:{}", BLUE, RESET, name, line, column);

    if let Some(content) = source.lines().nth(line - 1) {
        let gutter = line.to_string().len();
        eprintln!("  {:gutter$} {}|{}", "", BLUE, RESET);
        eprintln!(
            "  {}{}{} {}|{} {}",
            BLUE,
            line,
            RESET,
            BLUE,
            RESET,
            content.trim_end()
        );
        eprintln!(
            "  {:gutter$} {}|{} {}{}^--- here{}",
            "",
            BLUE,
            RESET,
            " ".repeat(column.saturating_sub(1)),
            RED,
            RESET
        );
    }

    if let Some(fixed) = err.fixed_code() {
        eprintln!(
            "  {}help{}: did you mean `{}{}{}`?",
            GREEN, RESET, YELLOW, fixed, RESET
        );
    }
}
