//! # FirstFollow
//! Fixed-point computation of FIRST(X) for every symbol and FOLLOW(N) for
//! every nonterminal (`spec.md` §4.1). Grounded on
//! `Youngermaster::first_follow`'s `compute_first_sets`/`compute_follow_sets`
//! change-detected fixed-point loops (`spec.md` §9, "Fixed-point loops":
//! expose a `changed` flag, avoid recursion).

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// FIRST and FOLLOW sets for a grammar, computed once and read thereafter.
pub struct FirstFollow {
    first: HashMap<Symbol, HashSet<Symbol>>,
    follow: HashMap<Symbol, HashSet<Symbol>>,
}

impl FirstFollow {
    /// Computes FIRST for every terminal/nonterminal and FOLLOW for every
    /// nonterminal of `grammar`.
    pub fn compute(grammar: &Grammar) -> Self {
        let first = compute_first(grammar);
        let follow = compute_follow(grammar, &first);
        Self { first, follow }
    }

    /// FIRST(X) for a single symbol. Terminals (including ε) always map to
    /// `{X}`.
    pub fn first(&self, sym: &Symbol) -> &HashSet<Symbol> {
        static EMPTY: std::sync::OnceLock<HashSet<Symbol>> = std::sync::OnceLock::new();
        self.first
            .get(sym)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// FOLLOW(A) for a nonterminal.
    pub fn follow(&self, sym: &Symbol) -> &HashSet<Symbol> {
        static EMPTY: std::sync::OnceLock<HashSet<Symbol>> = std::sync::OnceLock::new();
        self.follow
            .get(sym)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// FIRST(β) for a sequence of symbols (`spec.md` §4.1): the empty
    /// sequence has FIRST = {ε}; otherwise walk the sequence left to right.
    pub fn first_of_sequence(&self, seq: &[Symbol]) -> HashSet<Symbol> {
        if seq.is_empty() {
            return HashSet::from([Symbol::epsilon()]);
        }
        let mut result = HashSet::new();
        let mut all_nullable = true;
        for sym in seq {
            let first_sym = self.first(sym);
            result.extend(first_sym.iter().filter(|s| !s.is_epsilon()).cloned());
            if !first_sym.contains(&Symbol::epsilon()) {
                all_nullable = false;
                break;
            }
        }
        if all_nullable {
            result.insert(Symbol::epsilon());
        }
        result
    }
}

fn compute_first(grammar: &Grammar) -> HashMap<Symbol, HashSet<Symbol>> {
    let mut first: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();

    for t in grammar.terminals() {
        first.insert(t.clone(), HashSet::from([t.clone()]));
    }
    for n in grammar.non_terminals() {
        first.entry(n.clone()).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;
        for prod in grammar.productions() {
            let rhs = prod.rhs_symbols();
            let mut addition = HashSet::new();
            let mut all_nullable = true;
            for sym in rhs {
                let first_sym = first.get(sym).cloned().unwrap_or_default();
                addition.extend(first_sym.iter().filter(|s| !s.is_epsilon()).cloned());
                if !first_sym.contains(&Symbol::epsilon()) {
                    all_nullable = false;
                    break;
                }
            }
            if rhs.is_empty() || all_nullable {
                addition.insert(Symbol::epsilon());
            }

            let entry = first.entry(prod.lhs.clone()).or_default();
            let before = entry.len();
            entry.extend(addition);
            if entry.len() != before {
                changed = true;
            }
        }
    }

    first
}

fn compute_follow(
    grammar: &Grammar,
    first: &HashMap<Symbol, HashSet<Symbol>>,
) -> HashMap<Symbol, HashSet<Symbol>> {
    let first_of_sequence = |seq: &[Symbol]| -> HashSet<Symbol> {
        if seq.is_empty() {
            return HashSet::from([Symbol::epsilon()]);
        }
        let mut result = HashSet::new();
        let mut all_nullable = true;
        for sym in seq {
            let first_sym = first.get(sym).cloned().unwrap_or_default();
            result.extend(first_sym.iter().filter(|s| !s.is_epsilon()).cloned());
            if !first_sym.contains(&Symbol::epsilon()) {
                all_nullable = false;
                break;
            }
        }
        if all_nullable {
            result.insert(Symbol::epsilon());
        }
        result
    };

    let mut follow: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();
    for n in grammar.non_terminals() {
        follow.entry(n.clone()).or_default();
    }
    follow
        .entry(grammar.start().clone())
        .or_default()
        .insert(Symbol::end_of_input());

    let mut changed = true;
    while changed {
        changed = false;
        for prod in grammar.productions() {
            let rhs = prod.rhs_symbols();
            for (i, sym) in rhs.iter().enumerate() {
                if !sym.is_non_terminal() {
                    continue;
                }
                let beta = &rhs[i + 1..];
                let first_beta = first_of_sequence(beta);

                let entry = follow.entry(sym.clone()).or_default();
                let before = entry.len();
                entry.extend(first_beta.iter().filter(|s| !s.is_epsilon()).cloned());

                if first_beta.contains(&Symbol::epsilon()) {
                    let follow_lhs = follow.get(&prod.lhs).cloned().unwrap_or_default();
                    follow.entry(sym.clone()).or_default().extend(follow_lhs);
                }

                if follow.get(sym).map(|s| s.len()).unwrap_or(0) != before {
                    changed = true;
                }
            }
        }
    }

    follow
}
