//! Error types shared across the crate.
//!
//! Following `spec.md` §7, there are two different shapes of failure: hard
//! structural errors that abort construction ([`GrammarError`]), and
//! recoverable per-rule failures that are accumulated while the caller's
//! build proceeds ([`RegexError`] as collected by [`LexerBuildError`]).
//! Grammar conflicts are *not* modeled as an error at all — they are
//! diagnostics collected by [`crate::lr::lalr::LalrTable`].

use crate::symbol::SymbolKind;
use thiserror::Error;

/// Errors raised while validating or constructing a [`crate::grammar::Grammar`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GrammarError {
    #[error("symbol '{name}' is used as both a terminal and a nonterminal")]
    InconsistentSymbolKind { name: String },
    #[error("production references symbol '{0}' with unexpected kind {1:?}")]
    WrongSymbolKind(String, SymbolKind),
    #[error("grammar has no productions")]
    Empty,
    #[error("start symbol '{0}' has no production")]
    UndefinedStartSymbol(String),
}

/// Errors raised while parsing the `spec.md` §6 grammar-text external syntax.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GrammarTextError {
    #[error("malformed production line {0}: {1:?}")]
    MalformedLine(usize, String),
    #[error("production line {0} has no left-hand side")]
    MissingLhs(usize),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Errors raised while compiling a single regular expression (`spec.md` §4.2/§7).
///
/// Per `spec.md` §9, unmatched parentheses are *not* an error — they are
/// silently discarded by the shunting-yard pass, bug-for-bug compatible with
/// the source this spec distills. Only genuine postfix-evaluation failures
/// (operator with too few operands, or leftover operands after evaluation)
/// are reported here.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RegexError {
    #[error("operator '{0}' has no operand on the stack")]
    StackUnderflow(char),
    #[error("unknown operator '{0}'")]
    UnknownOperator(char),
    #[error("regex has {0} left-over operand(s) after evaluation")]
    ResidualOperands(usize),
    #[error("regex pattern is empty")]
    EmptyPattern,
    #[error("pattern ends with a trailing escape character")]
    TrailingEscape,
}

/// Raised by [`crate::lexer::Lexer::build`]: the lexer for the rules that
/// compiled is still usable, but the rules in `skipped` were dropped.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{} lexical rule(s) were skipped due to malformed patterns", skipped.len())]
pub struct LexerBuildError {
    pub skipped: Vec<(usize, RegexError)>,
}
