//! The grammar-text external syntax (`spec.md` §6), used by test harnesses
//! and the CLI to build a [`Grammar`] from a handful of lines such as:
//!
//! ```text
//! S -> A A
//! A -> a A | b
//! ```
//!
//! `spec.md` §1 frames this parser as an external collaborator, not part of
//! the core algorithmic surface — the core only ever consumes an in-memory
//! [`Grammar`]. It is still specified bit-exactly in §6, so it lives here as
//! a small, self-contained parser, grounded on `dandy::parser`'s use of
//! `nom` for its own (different) text formats.

use crate::error::{GrammarError, GrammarTextError};
use crate::grammar::{Grammar, Production};
use crate::symbol::{Symbol, SymbolKind};
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::space0;
use nom::combinator::all_consuming;
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::{preceded, terminated};
use nom::IResult;
use std::collections::HashMap;

const PUNCTUATION: &[char] = &[
    '(', ')', '{', '}', '[', ']', ';', ',', '+', '-', '*', '/', '<', '>', '=', '!', '&', '|',
];
const KEYWORDS: &[&str] = &[
    "if", "while", "int", "float", "bool", "print", "else", "id", "num",
];

/// Classifies a symbol name per `spec.md` §6's rules. Classification is
/// purely a function of the name, so "when first observed" just means we
/// call this once per distinct name and cache the result.
fn classify(name: &str) -> SymbolKind {
    if name == "ε" || name == "$" {
        return SymbolKind::Terminal;
    }
    if name.ends_with('\'') {
        return SymbolKind::NonTerminal;
    }
    let mut chars = name.chars();
    let first = chars.next().expect("non-empty symbol name");
    if chars.next().is_none() {
        // Single character name.
        if first.is_ascii_uppercase() && !PUNCTUATION.contains(&first) {
            SymbolKind::NonTerminal
        } else {
            SymbolKind::Terminal
        }
    } else if KEYWORDS.contains(&name) || name.contains(['=', '<', '>']) {
        SymbolKind::Terminal
    } else {
        SymbolKind::NonTerminal
    }
}

fn symbol_name(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace() || c == '|')(input)
}

fn alternative(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(nom::character::complete::space1, symbol_name)(input)
}

fn rhs(input: &str) -> IResult<&str, Vec<Vec<&str>>> {
    separated_list1(
        preceded(space0, terminated(tag("|"), space0)),
        alternative,
    )(input)
}

fn production_line(input: &str) -> IResult<&str, (&str, Vec<Vec<&str>>)> {
    let (input, lhs) = preceded(space0, symbol_name)(input)?;
    let (input, _) = preceded(space0, tag("->"))(input)?;
    let (input, _) = space0(input)?;
    all_consuming(|i| {
        let (i, alts) = rhs(i)?;
        Ok((i, (lhs, alts)))
    })(input)
}

/// Parses the grammar-text syntax of `spec.md` §6 into a validated
/// [`Grammar`]. The first LHS encountered becomes the start symbol.
pub fn parse_grammar_text(input: &str) -> Result<Grammar, GrammarTextError> {
    let mut kinds: HashMap<String, SymbolKind> = HashMap::new();
    let mut intern = |name: &str| -> Symbol {
        let kind = *kinds.entry(name.to_string()).or_insert_with(|| classify(name));
        Symbol::new(name, kind)
    };

    let mut productions = Vec::new();
    let mut start: Option<Symbol> = None;

    for (line_no, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (_, (lhs_name, alts)) = production_line(line)
            .map_err(|_| GrammarTextError::MalformedLine(line_no + 1, line.to_string()))?;

        let lhs = intern(lhs_name);
        if start.is_none() {
            start = Some(lhs.clone());
        }

        for alt in alts {
            let is_epsilon_alt = alt.is_empty() || (alt.len() == 1 && (alt[0] == "ε" || alt[0].is_empty()));
            let rhs_symbols = if is_epsilon_alt {
                vec![Symbol::epsilon()]
            } else {
                alt.into_iter().map(|name| intern(name)).collect()
            };
            productions.push(Production::new(lhs.clone(), rhs_symbols));
        }
    }

    let start = start.ok_or(GrammarTextError::MissingLhs(0))?;
    Grammar::new(productions, start).map_err(GrammarTextError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scenario_grammar() {
        let text = "S -> A A\nA -> a A | b\n";
        let g = parse_grammar_text(text).unwrap();
        assert_eq!(g.start().name(), "S");
        assert_eq!(g.productions().len(), 3);
        assert!(g.is_terminal(&Symbol::terminal("a")));
        assert!(g.is_non_terminal(&Symbol::non_terminal("A")));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "\n\nS -> a\n\n\n";
        let g = parse_grammar_text(text).unwrap();
        assert_eq!(g.productions().len(), 1);
    }

    #[test]
    fn epsilon_alternatives() {
        let text = "S -> A\nA -> a A | ε\n";
        let g = parse_grammar_text(text).unwrap();
        let a_prods: Vec<_> = g.productions_for(&Symbol::non_terminal("A")).collect();
        assert!(a_prods.iter().any(|p| p.is_epsilon()));
    }

    #[test]
    fn primed_names_are_nonterminals() {
        assert_eq!(classify("E'"), SymbolKind::NonTerminal);
        assert_eq!(classify("while"), SymbolKind::Terminal);
        assert_eq!(classify("id"), SymbolKind::Terminal);
        assert_eq!(classify("foo"), SymbolKind::NonTerminal);
        assert_eq!(classify("x"), SymbolKind::Terminal);
        assert_eq!(classify("X"), SymbolKind::NonTerminal);
        assert_eq!(classify("("), SymbolKind::Terminal);
    }

    #[test]
    fn malformed_line_is_rejected() {
        let text = "S => a\n";
        assert!(matches!(
            parse_grammar_text(text),
            Err(GrammarTextError::MalformedLine(1, _))
        ));
    }
}
