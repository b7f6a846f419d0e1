//! The `tokenize` subcommand: build a [`langkit::lexer::Lexer`] from a
//! lexical-rule file and scan an input file, printing one line per token.
//!
//! Per-feature argument struct plus a free `run` function, mirroring
//! `dandy-cli`'s `test_files.rs`/`intersection.rs` split between a
//! `clap::Args` struct and the function that acts on it.

use crate::read_file;
use clap::Args;
use langkit::lexer::Lexer;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Lexical-rule file (see `rules.rs` for the line format).
    rules: PathBuf,
    /// Source file to tokenize.
    input: PathBuf,
    /// Minimize the combined DFA before scanning.
    #[arg(long)]
    minimize: bool,
}

pub fn run(args: &TokenizeArgs) {
    let rules = crate::rules::load_rules(&args.rules).unwrap();
    let lexer = Lexer::build(&rules, args.minimize).unwrap();
    let input = read_file(&args.input);

    for token in lexer.tokenize(&input) {
        println!("{token}");
    }
}
