//! The `table` subcommand: build the LALR(1) ACTION/GOTO table from a
//! grammar-text file ([`langkit::grammar::text::parse_grammar_text`]), and
//! either print it or use it to parse a whitespace-separated terminal
//! stream.

use crate::read_file;
use clap::{Args, Subcommand};
use langkit::first_follow::FirstFollow;
use langkit::grammar::text::parse_grammar_text;
use langkit::lr::automaton::Lr1Automaton;
use langkit::lr::lalr::LalrTable;
use langkit::lr::parser::LrParser;
use langkit::symbol::Symbol;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Grammar-text file.
    grammar: PathBuf,
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Print the ACTION/GOTO table and any shift/reduce or reduce/reduce
    /// conflicts found while building it.
    Print,
    /// Parse a whitespace-separated terminal stream against the grammar.
    Parse {
        /// Terminal names to parse, e.g. "a b b". A trailing `$` is
        /// implied if the stream doesn't already end with one.
        tokens: String,
    },
}

pub fn run(args: &TableArgs) {
    let text = read_file(&args.grammar);
    let grammar = parse_grammar_text(&text).unwrap();
    let first_follow = FirstFollow::compute(&grammar);
    let automaton = Lr1Automaton::build(&grammar, &first_follow);
    let lalr = LalrTable::build(&automaton);

    match &args.action {
        Action::Print => {
            println!("{}", lalr.to_detailed_string());
            for conflict in &lalr.conflicts {
                eprintln!("warning: {conflict}");
            }
        }
        Action::Parse { tokens } => {
            let mut stream: Vec<Symbol> = tokens
                .split_whitespace()
                .map(Symbol::terminal)
                .collect();
            if stream.last().map_or(true, |s| !s.is_end_of_input()) {
                stream.push(Symbol::end_of_input());
            }

            let parser = LrParser::new(&lalr);
            if parser.parse(&stream) {
                println!("accept");
            } else {
                println!("reject");
                std::process::exit(1);
            }
        }
    }
}
