//! Multi-rule subset construction (`spec.md` §4.3): merges one NFA per
//! lexical rule into a single combined arena and powerset-constructs a
//! [`Dfa`] over it, annotating each final state with the winning rule's
//! `(TokenType, priority)`.
//!
//! Grounded on `dandy::nfa::Nfa::to_dfa`'s worklist-over-ε-closures shape,
//! generalized from a single accept flag to per-accept-state rule
//! provenance, since here many NFAs (and thus many distinct "this is an
//! accepting match for rule i" states) share one arena.

use super::{Dfa, DfaState, LexAnnotation};
use crate::lexer::LexicalRule;
use crate::nfa::Nfa;
use std::collections::{BTreeSet, HashMap};

/// One NFA fragment merged into the combined arena, annotated with which
/// rule it belongs to.
struct MergedNfa {
    states: Vec<crate::nfa::NfaState>,
    /// (start, accept, rule_index) per original rule's fragment.
    fragments: Vec<(usize, usize, usize)>,
}

fn merge(nfas: &[Nfa]) -> MergedNfa {
    let mut states = Vec::new();
    let mut fragments = Vec::new();
    for (rule_index, nfa) in nfas.iter().enumerate() {
        let offset = states.len();
        for s in &nfa.states {
            states.push(crate::nfa::NfaState {
                transitions: s
                    .transitions
                    .iter()
                    .map(|&(c, t)| (c, t + offset))
                    .collect(),
                accepting: s.accepting,
            });
        }
        fragments.push((nfa.start + offset, nfa.accept + offset, rule_index));
    }
    MergedNfa { states, fragments }
}

fn epsilon_closure(states: &[crate::nfa::NfaState], from: impl IntoIterator<Item = usize>) -> BTreeSet<usize> {
    let mut closure: BTreeSet<usize> = from.into_iter().collect();
    let mut queue: Vec<usize> = closure.iter().copied().collect();
    while let Some(s) = queue.pop() {
        for &(sym, target) in &states[s].transitions {
            if sym.is_none() && closure.insert(target) {
                queue.push(target);
            }
        }
    }
    closure
}

fn alphabet(states: &[crate::nfa::NfaState]) -> BTreeSet<char> {
    states
        .iter()
        .flat_map(|s| s.transitions.iter().filter_map(|(c, _)| *c))
        .collect()
}

/// Winning `(tokenType, priority)` for a DFA state's underlying NFA-state
/// set: the accept state whose rule has the numerically smallest priority,
/// ties broken by earliest rule index (`spec.md` §4.3).
fn winning_annotation(
    nfa_states: &BTreeSet<usize>,
    merged: &MergedNfa,
    states: &[crate::nfa::NfaState],
    rules: &[&LexicalRule],
) -> Option<LexAnnotation> {
    merged
        .fragments
        .iter()
        .filter(|&&(_, accept, _)| nfa_states.contains(&accept) && states[accept].accepting)
        .min_by_key(|&&(_, _, rule_index)| (rules[rule_index].priority, rule_index))
        .map(|&(_, _, rule_index)| LexAnnotation {
            token_type: rules[rule_index].token_type,
            priority: rules[rule_index].priority,
        })
}

/// Builds the combined DFA for a set of compiled rule NFAs (`spec.md`
/// §4.3). `nfas[i]` is paired positionally with `rules[i]`.
pub fn construct(nfas: &[Nfa], rules: &[&LexicalRule]) -> Dfa {
    let merged = merge(nfas);
    let states = &merged.states;
    let alpha = alphabet(states);

    let virtual_start: Vec<usize> = merged.fragments.iter().map(|&(start, _, _)| start).collect();
    let start_set = epsilon_closure(states, virtual_start);

    let mut dfa_states: Vec<DfaState> = Vec::new();
    let mut index_of: HashMap<BTreeSet<usize>, usize> = HashMap::new();
    let mut worklist: Vec<BTreeSet<usize>> = Vec::new();

    index_of.insert(start_set.clone(), 0);
    dfa_states.push(DfaState::default());
    worklist.push(start_set);

    while let Some(set) = worklist.pop() {
        let from_idx = index_of[&set];
        for &c in &alpha {
            let moved: BTreeSet<usize> = set
                .iter()
                .flat_map(|&s| states[s].transitions.iter().filter(move |&&(sym, _)| sym == Some(c)))
                .map(|&(_, t)| t)
                .collect();
            if moved.is_empty() {
                continue;
            }
            let target_set = epsilon_closure(states, moved);
            let target_idx = *index_of.entry(target_set.clone()).or_insert_with(|| {
                dfa_states.push(DfaState::default());
                worklist.push(target_set.clone());
                dfa_states.len() - 1
            });
            dfa_states[from_idx].transitions.insert(c, target_idx);
        }
    }

    for (set, &idx) in &index_of {
        dfa_states[idx].annotation = winning_annotation(set, &merged, states, rules);
    }

    Dfa {
        states: dfa_states,
        start: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenType;
    use crate::regex::Regex;

    fn nfa_for(pattern: &str) -> Nfa {
        Regex::compile(pattern).unwrap().to_nfa().unwrap()
    }

    #[test]
    fn longest_rule_wins_priority_tie_break() {
        let id_rule = LexicalRule::new("a(a|b)*", TokenType::Identifier).with_priority(1);
        let kw_rule = LexicalRule::new("ab", TokenType::Keyword).with_priority(0);
        let nfas = vec![nfa_for(&id_rule.pattern), nfa_for(&kw_rule.pattern)];
        let rules = vec![&id_rule, &kw_rule];
        let dfa = construct(&nfas, &rules);

        let mut state = dfa.start;
        for c in "ab".chars() {
            state = dfa.step(state, c).unwrap();
        }
        let ann = dfa.annotation(state).unwrap();
        assert_eq!(ann.token_type, TokenType::Keyword);
    }

    #[test]
    fn unreachable_symbol_has_no_transition() {
        let rule = LexicalRule::new("a", TokenType::Identifier);
        let nfas = vec![nfa_for(&rule.pattern)];
        let rules = vec![&rule];
        let dfa = construct(&nfas, &rules);
        assert_eq!(dfa.step(dfa.start, 'z'), None);
    }
}
