//! LALR(1) table construction (`spec.md` §4.7): merges LR(1) states sharing
//! a kernel-entry set, then emits ACTION/GOTO with first-written-wins
//! conflict resolution.
//!
//! Grounded on the canonical collection's own worklist/merge shape
//! ([`crate::lr::automaton`]), generalized from "one state per distinct
//! item set" to "one state per distinct kernel-entry set".

use super::automaton::Lr1Automaton;
use super::item::KernelEntry;
use crate::grammar::Production;
use crate::symbol::Symbol;
use std::collections::{BTreeSet, HashMap};

/// A parser action (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// The merged LALR(1) table: ACTION/GOTO maps keyed by (state, symbol),
/// conflict diagnostics (non-fatal — `spec.md` §7), and the augmented
/// production list the reduce actions index into.
pub struct LalrTable {
    pub productions: Vec<Production>,
    pub action: HashMap<(usize, Symbol), Action>,
    pub goto: HashMap<(usize, Symbol), usize>,
    pub conflicts: Vec<String>,
    pub initial_state: usize,
}

fn kernel_entry_set(items: &std::collections::HashSet<super::item::Lr1Item>) -> BTreeSet<KernelEntry> {
    items.iter().map(|i| i.kernel_entry()).collect()
}

impl LalrTable {
    /// Builds the LALR(1) table from a canonical LR(1) collection
    /// (`spec.md` §4.7).
    pub fn build(automaton: &Lr1Automaton) -> Self {
        // Group LR(1) states by kernel-entry set.
        let mut group_of_kernel: HashMap<BTreeSet<KernelEntry>, usize> = HashMap::new();
        let mut group_of_state: Vec<usize> = Vec::with_capacity(automaton.kernels.len());
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for (state_idx, kernel) in automaton.kernels.iter().enumerate() {
            let key = kernel_entry_set(kernel);
            let group_idx = *group_of_kernel.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group_idx].push(state_idx);
            group_of_state.push(group_idx);
        }

        let initial_state = group_of_state[0];

        let mut action: HashMap<(usize, Symbol), Action> = HashMap::new();
        let mut goto: HashMap<(usize, Symbol), usize> = HashMap::new();
        let mut conflicts = Vec::new();

        for (group_idx, members) in groups.iter().enumerate() {
            for &state_idx in members {
                for item in &automaton.states[state_idx] {
                    if let Some(sym) = item.symbol_after_dot(&automaton.productions) {
                        if let Some(&target) = automaton.transitions.get(&(state_idx, sym.clone())) {
                            let target_group = group_of_state[target];
                            if sym.is_terminal() {
                                set_action(
                                    &mut action,
                                    &mut conflicts,
                                    group_idx,
                                    sym.clone(),
                                    Action::Shift(target_group),
                                );
                            } else {
                                goto.entry((group_idx, sym.clone())).or_insert(target_group);
                            }
                        }
                    } else if item.production == automaton.augmented_start
                        && item.lookahead.is_end_of_input()
                    {
                        set_action(
                            &mut action,
                            &mut conflicts,
                            group_idx,
                            Symbol::end_of_input(),
                            Action::Accept,
                        );
                    } else {
                        set_action(
                            &mut action,
                            &mut conflicts,
                            group_idx,
                            item.lookahead.clone(),
                            Action::Reduce(item.production),
                        );
                    }
                }
            }
        }

        Self {
            productions: automaton.productions.clone(),
            action,
            goto,
            conflicts,
            initial_state,
        }
    }

    /// Renders the ACTION/GOTO table as aligned text, one row per state.
    /// Ambient debug affordance (`SPEC_FULL.md` §10), not used by
    /// [`super::parser::LrParser`].
    pub fn to_detailed_string(&self) -> String {
        let mut table = crate::table::Table::default();
        let state_count = self
            .action
            .keys()
            .chain(self.goto.keys())
            .map(|(s, _)| *s)
            .max()
            .map_or(0, |m| m + 1);

        let mut rows: Vec<String> = Vec::with_capacity(state_count);
        for state in 0..state_count {
            let mut cell = format!("state {state}: ");
            let mut actions: Vec<String> = self
                .action
                .iter()
                .filter(|((s, _), _)| *s == state)
                .map(|((_, sym), action)| format!("{sym}->{action:?}"))
                .collect();
            actions.sort();
            cell.push_str(&actions.join(", "));
            rows.push(cell);
        }
        for row in &rows {
            table.push_row(vec![row.as_str()]);
        }
        table.to_string(" ")
    }
}

/// Inserts `new_action` at `(state, sym)`, or — if a different action is
/// already there — records a conflict diagnostic and keeps the first-written
/// value (`spec.md` §4.7, "retain the first-written value").
fn set_action(
    action: &mut HashMap<(usize, Symbol), Action>,
    conflicts: &mut Vec<String>,
    state: usize,
    sym: Symbol,
    new_action: Action,
) {
    match action.get(&(state, sym.clone())) {
        None => {
            action.insert((state, sym), new_action);
        }
        Some(existing) if *existing == new_action => {}
        Some(existing) => {
            let kind = match (existing, new_action) {
                (Action::Shift(_), Action::Reduce(_)) | (Action::Reduce(_), Action::Shift(_)) => {
                    "Shift/Reduce"
                }
                _ => "Reduce/Reduce",
            };
            conflicts.push(format!("{kind} conflict in state {state} on {sym}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_follow::FirstFollow;
    use crate::grammar::{Grammar, Production};
    use crate::lr::automaton::Lr1Automaton;
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
    fn builds_conflict_free_table_for_scenario_grammar() {
        let g = scenario_grammar();
        let ff = FirstFollow::compute(&g);
        let automaton = Lr1Automaton::build(&g, &ff);
        let table = LalrTable::build(&automaton);
        assert!(table.conflicts.is_empty());
        assert!(table
            .action
            .values()
            .any(|a| matches!(a, Action::Accept)));
    }

    #[test]
    fn single_production_grammar_has_no_conflicts() {
        let prods = vec![Production::new(nt("S"), vec![t("a")])];
        let g = Grammar::new(prods, nt("S")).unwrap();
        let ff = FirstFollow::compute(&g);
        let automaton = Lr1Automaton::build(&g, &ff);
        let table = LalrTable::build(&automaton);
        assert!(table.conflicts.is_empty());
    }

    #[test]
    fn ambiguous_grammar_surfaces_a_conflict() {
        // Classic dangling-else-shaped ambiguity collapsed to a minimal
        // shift/reduce case: S -> A | A a, A -> a.
        let prods = vec![
            Production::new(nt("S"), vec![nt("A")]),
            Production::new(nt("S"), vec![nt("A"), t("a")]),
            Production::new(nt("A"), vec![t("a")]),
        ];
        let g = Grammar::new(prods, nt("S")).unwrap();
        let ff = FirstFollow::compute(&g);
        let automaton = Lr1Automaton::build(&g, &ff);
        let table = LalrTable::build(&automaton);
        assert!(!table.conflicts.is_empty());
    }
}
