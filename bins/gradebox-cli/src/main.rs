mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gradebox-cli")]
#[command(about = "Gradebox CLI - Grade and check submissions from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a submission file against a test-case file
    Grade {
        /// Path to the submission source file
        #[arg(short, long)]
        code: String,

        /// Path to a JSON array of test cases
        #[arg(short, long)]
        tests: String,

        /// Report raw output instead of judging against expected values
        #[arg(long, default_value = "false")]
        execute: bool,

        /// Interpreter binary to run the submission with
        #[arg(long, default_value = "python3")]
        python: String,

        /// Print the full outcome as JSON instead of a summary
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Syntax-check a submission file without running it
    Check {
        /// Path to the submission source file
        #[arg(short, long)]
        code: String,

        /// Interpreter binary to run the check with
        #[arg(long, default_value = "python3")]
        python: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Grade {
            code,
            tests,
            execute,
            python,
            json,
        } => {
            commands::grade(&code, &tests, execute, &python, json).await?;
        }
        Commands::Check { code, python } => {
            commands::check(&code, &python).await?;
        }
    }

    Ok(())
}
