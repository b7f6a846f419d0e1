//! Longest-match tokenizer (`spec.md` §4.5): walks the combined DFA from
//! each position, keeping the longest (then lowest-priority) final state
//! seen, and falls back to a one-character `Unknown` token when nothing
//! matches.
//!
//! Grounded on `dandy::dfa::DfaEvaluator::step`'s "advance one symbol, read
//! back whether we're in a final state" loop, generalized to scan forward
//! over an entire input and retain the best-so-far match instead of only
//! the current position's status.

use super::{Token, TokenType};
use crate::dfa::{Dfa, LexAnnotation};
use std::collections::HashMap;

struct Candidate {
    annotation: LexAnnotation,
    len: usize,
}

/// Tokenizes `input` against `dfa` (`spec.md` §4.5). `ignore_by_priority`
/// maps a winning `(TokenType, priority)` back to whether that rule is
/// `ignore`d, since a DFA final state's annotation carries only the token
/// type and priority, not the originating rule's other fields.
pub fn tokenize(
    dfa: &Dfa,
    ignore_by_priority: &HashMap<(TokenType, i32), bool>,
    input: &str,
) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut p = 0;

    while p < chars.len() {
        let mut state = dfa.start;
        let mut best: Option<Candidate> = None;

        if let Some(ann) = dfa.annotation(state) {
            best = Some(Candidate { annotation: ann, len: 0 });
        }

        let mut len = 0;
        while p + len < chars.len() {
            match dfa.step(state, chars[p + len]) {
                Some(next) => {
                    state = next;
                    len += 1;
                    if let Some(ann) = dfa.annotation(state) {
                        let replace = match &best {
                            None => true,
                            Some(b) => len > b.len || (len == b.len && ann.priority < b.annotation.priority),
                        };
                        if replace {
                            best = Some(Candidate { annotation: ann, len });
                        }
                    }
                }
                None => break,
            }
        }

        match best {
            Some(candidate) if candidate.len > 0 => {
                let lexeme: String = chars[p..p + candidate.len].iter().collect();
                let ignore = *ignore_by_priority
                    .get(&(candidate.annotation.token_type, candidate.annotation.priority))
                    .unwrap_or(&false);
                if !ignore {
                    tokens.push(Token {
                        token_type: candidate.annotation.token_type,
                        lexeme,
                        start: p,
                    });
                }
                p += candidate.len;
            }
            _ => {
                tokens.push(Token {
                    token_type: TokenType::Unknown,
                    lexeme: chars[p].to_string(),
                    start: p,
                });
                p += 1;
            }
        }
    }

    tokens.push(Token {
        token_type: TokenType::Eof,
        lexeme: String::new(),
        start: chars.len(),
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::subset::construct;
    use crate::lexer::LexicalRule;
    use crate::regex::Regex;

    fn build(rules: &[LexicalRule]) -> Dfa {
        let nfas: Vec<_> = rules
            .iter()
            .map(|r| Regex::compile(&r.pattern).unwrap().to_nfa().unwrap())
            .collect();
        let refs: Vec<&LexicalRule> = rules.iter().collect();
        construct(&nfas, &refs)
    }

    #[test]
    fn unknown_fallback_on_no_match() {
        let rules = vec![LexicalRule::new("a", TokenType::Identifier)];
        let dfa = build(&rules);
        let tokens = tokenize(&dfa, &HashMap::new(), "z");
        assert_eq!(tokens[0].token_type, TokenType::Unknown);
        assert_eq!(tokens[0].lexeme, "z");
    }

    #[test]
    fn longest_match_wins_over_shorter_prefix() {
        let rules = vec![
            LexicalRule::new("a", TokenType::Operator).with_priority(0),
            LexicalRule::new("aa", TokenType::Identifier).with_priority(0),
        ];
        let dfa = build(&rules);
        let tokens = tokenize(&dfa, &HashMap::new(), "aa");
        assert_eq!(tokens[0].lexeme, "aa");
        assert_eq!(tokens[0].token_type, TokenType::Identifier);
    }

    #[test]
    fn eof_token_appended() {
        let rules = vec![LexicalRule::new("a", TokenType::Identifier)];
        let dfa = build(&rules);
        let tokens = tokenize(&dfa, &HashMap::new(), "a");
        assert_eq!(tokens.last().unwrap().token_type, TokenType::Eof);
    }
}
