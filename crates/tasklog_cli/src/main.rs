//! `tasklog` entry point.
//!
//! Without a subcommand it seeds the sample projects and prints both tables.

use clap::Parser;
use std::process;

mod cli;
mod commands;
mod output;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(err) = commands::run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
