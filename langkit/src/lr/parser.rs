//! Shift-reduce parser driver (`spec.md` §4.8): a stack of state indices
//! consuming a token stream (terminated by `$`) against a [`LalrTable`].
//!
//! Grounded on the single-threaded, synchronous "run to completion, no
//! suspension" discipline `spec.md` §5 mandates for the whole core — this
//! is a plain loop over an explicit stack, no recursion.

use super::lalr::{Action, LalrTable};
use crate::symbol::Symbol;

/// Drives [`LalrTable::build`]'s output over a token stream. Error
/// signalling is binary: accept or reject (`spec.md` §4.8) — richer
/// diagnostics are explicitly out of scope.
pub struct LrParser<'a> {
    table: &'a LalrTable,
}

impl<'a> LrParser<'a> {
    pub fn new(table: &'a LalrTable) -> Self {
        Self { table }
    }

    /// Parses `tokens`, which must end with [`Symbol::end_of_input`].
    /// Returns `true` iff the input is accepted.
    pub fn parse(&self, tokens: &[Symbol]) -> bool {
        let mut stack = vec![self.table.initial_state];
        let mut pos = 0;

        loop {
            let Some(&state) = stack.last() else {
                return false;
            };
            let Some(token) = tokens.get(pos) else {
                return false;
            };

            match self.table.action.get(&(state, token.clone())) {
                Some(Action::Shift(next)) => {
                    stack.push(*next);
                    pos += 1;
                }
                Some(Action::Reduce(production_idx)) => {
                    let production = &self.table.productions[*production_idx];
                    let pop_count = if production.is_epsilon() {
                        0
                    } else {
                        production.rhs_symbols().len()
                    };
                    for _ in 0..pop_count {
                        if stack.pop().is_none() {
                            return false;
                        }
                    }
                    let Some(&uncovered) = stack.last() else {
                        return false;
                    };
                    match self.table.goto.get(&(uncovered, production.lhs.clone())) {
                        Some(&next) => stack.push(next),
                        None => return false,
                    }
                }
                Some(Action::Accept) => return true,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_follow::FirstFollow;
    use crate::grammar::{Grammar, Production};
    use crate::lr::automaton::Lr1Automaton;

    fn nt(n: &str) -> Symbol {
        Symbol::non_terminal(n)
    }
    fn t(n: &str) -> Symbol {
        Symbol::terminal(n)
    }

    fn scenario_table() -> LalrTable {
        let prods = vec![
            Production::new(nt("S"), vec![nt("A"), nt("A")]),
            Production::new(nt("A"), vec![t("a"), nt("A")]),
            Production::new(nt("A"), vec![t("b")]),
        ];
        let g = Grammar::new(prods, nt("S")).unwrap();
        let ff = FirstFollow::compute(&g);
        let automaton = Lr1Automaton::build(&g, &ff);
        LalrTable::build(&automaton)
    }

    #[test]
    fn accepts_valid_sentence() {
        let table = scenario_table();
        let parser = LrParser::new(&table);
        // S -> A A, A -> aA | b ; "aabb" = (a(ab)) (b) ... use "ab" "b" -> A=ab? check: a A -> a b = "ab"; A -> b = "b"
        let tokens = vec![t("a"), t("b"), t("b"), Symbol::end_of_input()];
        assert!(parser.parse(&tokens));
    }

    #[test]
    fn rejects_invalid_sentence() {
        let table = scenario_table();
        let parser = LrParser::new(&table);
        let tokens = vec![t("a"), Symbol::end_of_input()];
        assert!(!parser.parse(&tokens));
    }

    #[test]
    fn rejects_empty_input() {
        let table = scenario_table();
        let parser = LrParser::new(&table);
        assert!(!parser.parse(&[]));
    }
}
