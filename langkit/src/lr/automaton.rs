//! Canonical LR(1) collection construction (`spec.md` §4.6): augmentation,
//! CLOSURE, GOTO, and the worklist-driven canonical collection itself.
//!
//! Grounded on the `changed`-flag fixed-point discipline
//! [`crate::first_follow`] already uses, applied here to a worklist over
//! items rather than over grammar symbols.

use super::item::Lr1Item;
use crate::first_follow::FirstFollow;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// The canonical LR(1) collection: an augmented production list, the
/// discovered item-sets (states), and the transitions between them.
pub struct Lr1Automaton {
    pub productions: Vec<Production>,
    pub augmented_start: usize,
    pub states: Vec<HashSet<Lr1Item>>,
    /// The pre-closure basis of each state — used by [`crate::lr::lalr`] to
    /// group LR(1) states by kernel-entry-set equality (`spec.md` §4.7).
    pub kernels: Vec<HashSet<Lr1Item>>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Appends `S' → S` to `grammar`'s production list. The augmented LHS name
/// is `start.name() + "'"` (`spec.md` §4.6).
fn augment(grammar: &Grammar) -> (Vec<Production>, usize) {
    let mut productions: Vec<Production> = grammar.productions().to_vec();
    let augmented_lhs = Symbol::non_terminal(format!("{}'", grammar.start().name()));
    let augmented_index = productions.len();
    productions.push(Production::new(augmented_lhs, vec![grammar.start().clone()]));
    (productions, augmented_index)
}

/// CLOSURE(I) (`spec.md` §4.6): for every `[A → α·Bβ, a]` with `B`
/// nonterminal, adds `[B → ·γ, b]` for every production `B → γ` and every
/// `b ∈ FIRST(βa)`.
fn closure(
    mut items: HashSet<Lr1Item>,
    grammar: &Grammar,
    productions: &[Production],
    first_follow: &FirstFollow,
) -> HashSet<Lr1Item> {
    let mut worklist: Vec<Lr1Item> = items.iter().cloned().collect();
    while let Some(item) = worklist.pop() {
        let rhs = productions[item.production].rhs_symbols();
        let Some(b) = rhs.get(item.dot) else { continue };
        if !grammar.is_non_terminal(b) {
            continue;
        }
        let beta = &rhs[item.dot + 1..];
        let mut seq: Vec<Symbol> = beta.to_vec();
        seq.push(item.lookahead.clone());
        let lookaheads = first_follow.first_of_sequence(&seq);

        for (prod_idx, prod) in productions.iter().enumerate() {
            if &prod.lhs != b {
                continue;
            }
            for look in &lookaheads {
                if look.is_epsilon() {
                    continue;
                }
                let new_item = Lr1Item::new(prod_idx, 0, look.clone());
                if items.insert(new_item.clone()) {
                    worklist.push(new_item);
                }
            }
        }
    }
    items
}

/// Every grammar symbol (terminal or nonterminal, excluding ε) that could
/// appear in a GOTO transition.
fn all_symbols(grammar: &Grammar) -> Vec<Symbol> {
    grammar
        .terminals()
        .filter(|t| !t.is_epsilon())
        .chain(grammar.non_terminals())
        .cloned()
        .collect()
}

impl Lr1Automaton {
    /// Builds the canonical LR(1) collection for `grammar` (`spec.md`
    /// §4.6). `first_follow` must have been computed over the same
    /// (unaugmented) `grammar`.
    pub fn build(grammar: &Grammar, first_follow: &FirstFollow) -> Self {
        let (productions, augmented_start) = augment(grammar);
        let symbols = all_symbols(grammar);

        let initial_item = Lr1Item::new(augmented_start, 0, Symbol::end_of_input());
        let initial_kernel = HashSet::from([initial_item]);
        let initial_state = closure(initial_kernel.clone(), grammar, &productions, first_follow);

        let mut states = vec![initial_state];
        let mut kernels = vec![initial_kernel];
        let mut transitions = HashMap::new();
        let mut worklist = vec![0usize];

        while let Some(state_idx) = worklist.pop() {
            for x in &symbols {
                let kernel: HashSet<Lr1Item> = states[state_idx]
                    .iter()
                    .filter(|item| item.symbol_after_dot(&productions) == Some(x))
                    .map(Lr1Item::advanced)
                    .collect();
                if kernel.is_empty() {
                    continue;
                }
                let target = closure(kernel.clone(), grammar, &productions, first_follow);
                let existing = states.iter().position(|s| s == &target);
                let target_idx = match existing {
                    Some(idx) => idx,
                    None => {
                        states.push(target);
                        kernels.push(kernel);
                        let idx = states.len() - 1;
                        worklist.push(idx);
                        idx
                    }
                };
                transitions.insert((state_idx, x.clone()), target_idx);
            }
        }

        Self {
            productions,
            augmented_start,
            states,
            kernels,
            transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;
    use crate::symbol::Symbol;

    fn nt(n: &str) -> Symbol {
        Symbol::non_terminal(n)
    }
    fn t(n: &str) -> Symbol {
        Symbol::terminal(n)
    }

    fn scenario_grammar() -> Grammar {
        let prods = vec![
            Production::new(nt("S"), vec![nt("A"), nt("A")]),
            Production::new(nt("A"), vec![t("a"), nt("A")]),
            Production::new(nt("A"), vec![t("b")]),
        ];
        Grammar::new(prods, nt("S")).unwrap()
    }

    #[test]
    fn initial_state_closes_over_start() {
        let g = scenario_grammar();
        let ff = FirstFollow::compute(&g);
        let automaton = Lr1Automaton::build(&g, &ff);
        // [S' -> .S, $], plus closure items for S -> .A A and A -> .aA / .b
        assert!(automaton.states[0].len() >= 4);
    }

    #[test]
    fn goto_is_deterministic_and_reused() {
        let g = scenario_grammar();
        let ff = FirstFollow::compute(&g);
        let automaton = Lr1Automaton::build(&g, &ff);
        // Every transition target must be a valid state index.
        for &target in automaton.transitions.values() {
            assert!(target < automaton.states.len());
        }
    }

    #[test]
    fn no_duplicate_states_by_item_set_equality() {
        let g = scenario_grammar();
        let ff = FirstFollow::compute(&g);
        let automaton = Lr1Automaton::build(&g, &ff);
        for i in 0..automaton.states.len() {
            for j in (i + 1)..automaton.states.len() {
                assert_ne!(automaton.states[i], automaton.states[j]);
            }
        }
    }
}
