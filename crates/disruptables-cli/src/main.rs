//! disrupt - run fallible computations through `disruptables` and report
//! their outcome.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use disruptables::{Error, Try};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "disrupt")]
#[command(about = "Run fallible computations and report their outcome without raising")]
#[command(version)]
struct Args {
    /// Enable verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the outcome as JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Divide two numbers, printing the fallback when the quotient cannot be computed
    Quotient {
        /// Numerator, as text
        dividend: String,

        /// Denominator, as text
        divisor: String,

        /// Value printed when parsing or dividing fails
        #[arg(long, value_name = "F", default_value_t = f64::NAN)]
        fallback: f64,
    },

    /// Write text to a file, failing with the captured I/O error
    Write {
        /// Destination file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Contents to write
        text: String,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
struct DivisionByZero;

fn main() {
    let args = Args::parse();

    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("disrupt: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Quotient {
            dividend,
            divisor,
            fallback,
        } => {
            let outcome = quotient(&dividend, &divisor);
            outcome.if_failed(|error| tracing::warn!(%error, "quotient could not be computed"));

            if args.json {
                println!("{}", serde_json::to_string(&outcome)?);
            } else {
                println!("{}", outcome.or_else(fallback));
            }
        }
        Command::Write { path, text } => {
            let outcome = write(&path, &text);
            outcome.if_success(|_| tracing::info!(path = %path.display(), "wrote file"));

            if args.json {
                println!("{}", serde_json::to_string(&outcome)?);
            }
            outcome.or_else_throw(|error| {
                anyhow::anyhow!("{:#}", error).context(format!("failed to write {}", path.display()))
            })?;
        }
    }

    Ok(())
}

/// Parse both operands and divide them, capturing any failure.
fn quotient(dividend: &str, divisor: &str) -> Try<f64> {
    Try::from_supplier(|| -> Result<f64, Error> {
        let dividend: f64 = dividend.trim().parse()?;
        let divisor: f64 = divisor.trim().parse()?;
        if divisor == 0.0 {
            return Err(DivisionByZero.into());
        }
        Ok(dividend / divisor)
    })
}

fn write(path: &Path, text: &str) -> Try<()> {
    Try::from_action(|| fs::write(path, text))
}
