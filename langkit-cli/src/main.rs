mod rules;
mod table;
mod tokenize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Front-end toolkit CLI: drives `langkit`'s lexer and LALR(1) parser
/// engines against files on disk.
#[derive(Debug, Parser)]
#[command(name = "langkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Builds a DFA from a lexical-rule file and tokenizes an input file.
    Tokenize(tokenize::TokenizeArgs),
    /// Builds the LALR(1) ACTION/GOTO table from a grammar-text file and
    /// either prints it or parses a token stream against it.
    Table(table::TableArgs),
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Tokenize(args) => tokenize::run(&args),
        Command::Table(args) => table::run(&args),
    }
}

/// Shared convenience: read a file to a `String`, panicking with a clear
/// message on failure. CLI-layer I/O failures are fatal, unlike the core
/// library's `Result`-propagating error taxonomy.
fn read_file(path: &PathBuf) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("error reading {}: {e}", path.display()))
}
