//! Property-based coverage built on `proptest`/`rand`, grounded on
//! `dandy/benches/benchmark.rs`'s use of the same crates for randomized,
//! shrinking-friendly differential testing.

use langkit::dfa::subset::construct;
use langkit::lexer::{Lexer, LexicalRule, TokenType};
use langkit::regex::Regex;
use proptest::prelude::*;
use rand::Rng;
use regex::Regex as LibRegex;

fn identifier_and_keyword_rules() -> Vec<LexicalRule> {
    vec![
        LexicalRule::new("if", TokenType::Keyword).with_priority(0),
        LexicalRule::new("a|b|c|d|e|f|g|h|i|j|k|l|m|n|o|p|q|r|s|t|u|v|w|x|y|z|A|B|C|D|E|F|G|H|I|J|K|L|M|N|O|P|Q|R|S|T|U|V|W|X|Y|Z|0|1|2|3|4|5|6|7|8|9", TokenType::Identifier).with_priority(1),
        LexicalRule::new(" +", TokenType::Whitespace).ignored(),
    ]
}

fn assert_partitions(tokens: &[langkit::lexer::Token], input: &str) {
    let char_count = input.chars().count();
    let eof = tokens.last().unwrap();
    assert_eq!(eof.token_type, TokenType::Eof);
    assert_eq!(eof.start, char_count);

    let mut last_start = None;
    for token in tokens {
        if let Some(prev) = last_start {
            assert!(token.start > prev);
        }
        last_start = Some(token.start);
    }
}

/// A `rand`-driven fuzz pass (`SPEC_FULL.md` §8), separate from the
/// `proptest`-shrunk version below — grounded on `dandy::tests`' own mix of
/// `thread_rng`-seeded randomization alongside `proptest` generators.
#[test]
fn tokenizer_partitions_rand_generated_fuzz_input() {
    let lexer = Lexer::build(&identifier_and_keyword_rules(), true).unwrap();
    let mut rng = rand::thread_rng();
    const ALPHABET: &[u8] = b"abcif 01";

    for _ in 0..200 {
        let len = rng.gen_range(0..64);
        let input: String = (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        let tokens = lexer.tokenize(&input);
        assert_partitions(&tokens, &input);
    }
}

/// Whether a single-rule DFA accepts `input` in full (not a prefix match).
fn accepts(dfa: &langkit::dfa::Dfa, input: &str) -> bool {
    let mut state = dfa.start;
    for c in input.chars() {
        match dfa.step(state, c) {
            Some(next) => state = next,
            None => return false,
        }
    }
    dfa.is_final(state)
}

/// Patterns restricted to the literal/`|`/`*`/`+`/`?`/`()` subset this
/// engine supports (no anchors, classes, or backreferences).
const PATTERN_CORPUS: &[&str] = &[
    "a",
    "ab",
    "a|b",
    "a*",
    "a+",
    "a?",
    "(ab)*",
    "a(b|c)d",
    "(a|b)(c|d)",
    "a*b+c?",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The tokenizer is a partition of its input (`spec.md` §8): every
    /// character is covered by exactly one emitted/ignored/unknown span,
    /// in order, with no gaps or overlaps.
    #[test]
    fn tokenizer_partitions_random_ascii_input(input in "[a-zA-Z0-9 ]{0,64}") {
        let lexer = Lexer::build(&identifier_and_keyword_rules(), true).unwrap();
        let tokens = lexer.tokenize(&input);

        let char_count = input.chars().count();
        let eof = tokens.last().unwrap();
        prop_assert_eq!(eof.token_type, TokenType::Eof);
        prop_assert_eq!(eof.start, char_count);

        let mut last_start = None;
        for token in &tokens {
            if let Some(prev) = last_start {
                prop_assert!(token.start > prev);
            }
            last_start = Some(token.start);
        }
    }

    /// Differential test against the `regex` crate over the supported
    /// pattern/alphabet subset (`spec.md` §8, `SPEC_FULL.md` §8).
    #[test]
    fn regex_matches_library_regex_on_supported_subset(
        pattern_idx in 0..PATTERN_CORPUS.len(),
        candidate in "[abcd]{0,6}",
    ) {
        let pattern = PATTERN_CORPUS[pattern_idx];
        let nfa = Regex::compile(pattern).unwrap().to_nfa().unwrap();
        let rule = LexicalRule::new(pattern, TokenType::Identifier);
        let langkit_dfa = construct(&[nfa], &[&rule]);
        let anchored = format!("^(?:{pattern})$");
        let lib_regex = LibRegex::new(&anchored).unwrap();

        let langkit_accepts = accepts(&langkit_dfa, &candidate);
        let lib_accepts = lib_regex.is_match(&candidate);
        prop_assert_eq!(langkit_accepts, lib_accepts, "pattern {pattern:?} candidate {candidate:?}");
    }
}
