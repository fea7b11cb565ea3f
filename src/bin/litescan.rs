//! `litescan`: CLI front end over the [`litescan`] crate's scanning API.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "litescan", version, about = "Multi-pattern literal text search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a file or stream for occurrences of a pattern set.
    Scan(commands::scan::ScanArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => commands::scan::run(args),
    }
}
