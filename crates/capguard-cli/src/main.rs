mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::strategy::{AllocateArgs, EvaluateArgs};

/// Capital-guaranteed strategy sizing and scenario analysis
#[derive(Parser)]
#[command(
    name = "capguard",
    version,
    about = "Capital-guaranteed strategy sizing and scenario analysis",
    long_about = "Sizes a capital-guaranteed structured strategy with decimal precision: \
                  splits the investment into a fixed-income leg that protects the target \
                  fraction of principal and a residual call-option leg, then sweeps the \
                  payoff across a -30%..+30% grid of underlying prices at maturity."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Size both legs and build the full 31-row scenario table
    Evaluate(EvaluateArgs),
    /// Size the fixed-income and option legs only
    Allocate(AllocateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::strategy::run_evaluate(args),
        Commands::Allocate(args) => commands::strategy::run_allocate(args),
        Commands::Version => {
            println!("capguard {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
