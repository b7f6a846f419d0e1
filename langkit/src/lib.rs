//! # langkit
//!
//! `langkit` is a compiler front-end toolkit built around two coupled
//! engines that share a common discipline — automata over symbol
//! alphabets, built once to a fixed point and then consumed read-only:
//!
//! * a **regex → NFA → DFA → tokenizer** pipeline ([`regex`], [`nfa`],
//!   [`dfa`], [`lexer`]) that turns a prioritized list of [`lexer::LexicalRule`]s
//!   into a single combined DFA capable of longest-match scanning with
//!   priority tie-breaks;
//! * an **LR(1) canonical-collection builder and LALR(1) table
//!   constructor** ([`first_follow`], [`lr`]) that computes FIRST/FOLLOW
//!   sets, builds the canonical LR(1) item automaton, merges states by
//!   kernel equivalence into LALR(1), emits ACTION/GOTO tables with
//!   conflict diagnostics, and drives a shift-reduce parser.
//!
//! Both engines are single-threaded and synchronous: no operation blocks,
//! yields, or shares mutable state across a component boundary.
//!
//! ## Usage
//!
//! ```rust
//! use langkit::grammar::text::parse_grammar_text;
//! use langkit::first_follow::FirstFollow;
//! use langkit::lr::automaton::Lr1Automaton;
//! use langkit::lr::lalr::LalrTable;
//! use langkit::lr::parser::LrParser;
//! use langkit::symbol::Symbol;
//!
//! let grammar = parse_grammar_text("S -> A A\nA -> a A | b\n").unwrap();
//! let first_follow = FirstFollow::compute(&grammar);
//! let automaton = Lr1Automaton::build(&grammar, &first_follow);
//! let table = LalrTable::build(&automaton);
//! assert!(table.conflicts.is_empty());
//!
//! let parser = LrParser::new(&table);
//! let tokens = vec![
//!     Symbol::terminal("a"),
//!     Symbol::terminal("b"),
//!     Symbol::terminal("b"),
//!     Symbol::end_of_input(),
//! ];
//! assert!(parser.parse(&tokens));
//! ```
//!
//! Lexing a string against a handful of [`lexer::LexicalRule`]s:
//!
//! ```rust
//! use langkit::lexer::{Lexer, LexicalRule, TokenType};
//!
//! // Non-goals exclude character classes, so an identifier alphabet is
//! // spelled out as an alternation instead of `[a-z]`.
//! let rules = vec![
//!     LexicalRule::new("if", TokenType::Keyword).with_priority(0),
//!     LexicalRule::new("a|b|c", TokenType::Identifier).with_priority(1),
//!     LexicalRule::new(" +", TokenType::Whitespace).ignored(),
//! ];
//! let lexer = Lexer::build(&rules, false).unwrap();
//! let tokens = lexer.tokenize("if a");
//! assert_eq!(tokens[0].token_type, TokenType::Keyword);
//! ```

pub mod dfa;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod lexer;
pub mod lr;
pub mod nfa;
pub mod regex;
pub mod symbol;
mod table;
