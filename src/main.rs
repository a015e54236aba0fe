use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use calcbrain::output::Report;
use calcbrain::session::Session;
use calcbrain::{registry, token, variables};

#[derive(Parser)]
#[command(name = "calcbrain")]
#[command(about = "Scientific calculator driven by discrete key tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a sequence of tokens and print the display
    Eval {
        #[command(flatten)]
        bindings: BindingArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Tokens: numbers, operator keys, @NAME, ->NAME, undo, clear
        #[arg(required = true, allow_hyphen_values = true, trailing_var_arg = true)]
        tokens: Vec<String>,
    },

    /// Read whitespace-separated tokens from stdin, one line per step
    Repl {
        #[command(flatten)]
        bindings: BindingArgs,

        /// Print each report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the operator keys the engine understands
    Symbols,
}

#[derive(Args)]
struct BindingArgs {
    /// TOML file with a [variables] table
    #[arg(long)]
    vars: Option<PathBuf>,

    /// Bind a variable, overriding the file (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Seed for the Rand key
    #[arg(long)]
    seed: Option<u64>,
}

impl BindingArgs {
    fn session(&self) -> Result<Session> {
        let variables = variables::resolve(self.vars.as_deref(), &self.set)
            .context("Failed to load variables")?;
        Ok(Session::new(variables, self.seed))
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable (respects RUST_LOG)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            bindings,
            json,
            tokens,
        } => run_eval(&bindings, json, &tokens),
        Commands::Repl { bindings, json } => run_repl(&bindings, json),
        Commands::Symbols => {
            for symbol in registry::symbols() {
                println!("{}", symbol);
            }
            Ok(())
        }
    }
}

fn run_eval(bindings: &BindingArgs, json: bool, words: &[String]) -> Result<()> {
    let mut session = bindings.session()?;
    let tokens = token::parse_tokens(words).context("Invalid token")?;
    tracing::info!(count = tokens.len(), "evaluating tokens");
    session.apply_all(tokens);
    print_report(&mut std::io::stdout(), &session.report(), json)
}

fn run_repl(bindings: &BindingArgs, json: bool) -> Result<()> {
    let mut session = bindings.session()?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match token::parse_tokens(line.split_whitespace()) {
            Ok(tokens) => {
                session.apply_all(tokens);
                print_report(&mut stdout, &session.report(), json)?;
            }
            Err(err) => eprintln!("error: {}", err),
        }
    }

    Ok(())
}

fn print_report(out: &mut impl Write, report: &Report, json: bool) -> Result<()> {
    let text = if json {
        report.to_json().context("Failed to serialize report")?
    } else {
        report.to_text()
    };
    writeln!(out, "{}", text).context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
