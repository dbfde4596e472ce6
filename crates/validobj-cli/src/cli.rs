//! CLI argument parsing

use crate::commands::{self, CheckArgs, ListArgs};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// validobj - validate JSON documents against validation expressions
#[derive(Parser, Debug)]
#[command(name = "validobj")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents against an expression
    Check(CheckArgs),

    /// List the registered checks
    List(ListArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Check(args) => commands::check(args),
            Commands::List(args) => commands::list(args),
        }
    }
}
