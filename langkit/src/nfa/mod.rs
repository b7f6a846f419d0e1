//! # Nondeterministic Finite Automaton
//! A [`Nfa`] is a Thompson-construction fragment: an arena of states
//! (`spec.md` §3/§5/§9 — cycles from `*`/`+` are tolerated by indexing into
//! a `Vec`, never by owning chains of `Rc`/`Box`), a single start state and
//! a single accept state. [`crate::regex::Regex::to_nfa`] is the only
//! producer of a [`Nfa`]; [`crate::lexer`] merges many of them into one
//! shared arena for subset construction (`spec.md` §4.3).
//!
//! Grounded on `dandy::nfa::Nfa`'s arena layout (`Vec<NfaState>` owned by
//! the automaton, transitions by index), simplified to the transition shape
//! `spec.md` §3 actually asks for: `(Option<char>, target)`, a `None`
//! symbol denoting an ε-move, rather than `dandy`'s separate
//! epsilon-transition list plus per-alphabet-element dense transition
//! table (this engine's alphabet is `char`, not arbitrary-width graphemes).

use std::collections::{BTreeSet, HashSet, VecDeque};

/// A single state in a [`Nfa`]: a list of transitions (character or ε) and
/// an acceptance flag.
#[derive(Debug, Clone)]
pub struct NfaState {
    /// `(None, target)` is an ε-transition; `(Some(c), target)` triggers on `c`.
    pub transitions: Vec<(Option<char>, usize)>,
    pub accepting: bool,
}

impl NfaState {
    fn new() -> Self {
        Self {
            transitions: Vec::new(),
            accepting: false,
        }
    }
}

/// A Thompson-construction NFA fragment: an arena of states, with
/// `start`/`accept` identifying the fragment's single entry and exit state.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub start: usize,
    pub accept: usize,
}

impl Nfa {
    /// A fragment matching exactly the single character `c`: two states
    /// joined by one transition (`spec.md` §4.2, Thompson construction for
    /// an operand).
    pub fn literal(c: char) -> Self {
        let mut states = vec![NfaState::new(), NfaState::new()];
        states[1].accepting = true;
        states[0].transitions.push((Some(c), 1));
        Nfa {
            states,
            start: 0,
            accept: 1,
        }
    }

    /// A fragment matching the empty string only.
    pub fn empty_string() -> Self {
        let mut states = vec![NfaState::new(), NfaState::new()];
        states[1].accepting = true;
        states[0].transitions.push((None, 1));
        Nfa {
            states,
            start: 0,
            accept: 1,
        }
    }

    fn offset(&mut self, by: usize) {
        for state in &mut self.states {
            for (_, target) in &mut state.transitions {
                *target += by;
            }
        }
        self.start += by;
        self.accept += by;
    }

    /// Thompson concatenation: `self.accept →^ε other.start`.
    pub fn concat(mut self, mut other: Self) -> Self {
        let offset = self.states.len();
        other.offset(offset);
        self.states[self.accept].accepting = false;
        self.states[self.accept].transitions.push((None, other.start));
        self.states.extend(other.states);
        Nfa {
            states: self.states,
            start: self.start,
            accept: other.accept,
        }
    }

    /// Thompson alternation (`|`): new start/accept with ε-edges to/from
    /// both alternatives.
    pub fn alternate(mut self, mut other: Self) -> Self {
        self.offset(1);
        let offset_other = self.states.len() + 1;
        other.offset(offset_other);

        self.states[self.accept].accepting = false;
        other.states[other.accept].accepting = false;

        let mut states = Vec::with_capacity(self.states.len() + other.states.len() + 2);
        let start_state = NfaState {
            transitions: vec![(None, self.start), (None, other.start)],
            accepting: false,
        };
        states.push(start_state);
        states.extend(self.states);
        states.extend(other.states);
        let accept_idx = states.len();
        let mut accept_state = NfaState::new();
        accept_state.accepting = true;
        states.push(accept_state);

        states[self.accept].transitions.push((None, accept_idx));
        states[other.accept].transitions.push((None, accept_idx));

        Nfa {
            states,
            start: 0,
            accept: accept_idx,
        }
    }

    /// Thompson Kleene star (`*`): zero or more repetitions.
    pub fn star(mut self) -> Self {
        self.offset(1);
        self.states[self.accept].accepting = false;
        let mut states = Vec::with_capacity(self.states.len() + 2);
        let new_start = NfaState {
            transitions: vec![(None, self.start)],
            accepting: false,
        };
        states.push(new_start);
        states.extend(self.states);
        let new_accept_idx = states.len();
        let mut new_accept = NfaState::new();
        new_accept.accepting = true;
        states.push(new_accept);

        states[0].transitions.push((None, new_accept_idx));
        states[self.accept].transitions.push((None, self.start));
        states[self.accept].transitions.push((None, new_accept_idx));

        Nfa {
            states,
            start: 0,
            accept: new_accept_idx,
        }
    }

    /// Thompson Kleene plus (`+`): one or more repetitions.
    pub fn plus(mut self) -> Self {
        self.offset(1);
        self.states[self.accept].accepting = false;
        let mut states = Vec::with_capacity(self.states.len() + 2);
        let new_start = NfaState {
            transitions: vec![(None, self.start)],
            accepting: false,
        };
        states.push(new_start);
        states.extend(self.states);
        let new_accept_idx = states.len();
        let mut new_accept = NfaState::new();
        new_accept.accepting = true;
        states.push(new_accept);

        states[self.accept].transitions.push((None, self.start));
        states[self.accept].transitions.push((None, new_accept_idx));

        Nfa {
            states,
            start: 0,
            accept: new_accept_idx,
        }
    }

    /// Thompson optional (`?`): zero or one repetition.
    pub fn optional(mut self) -> Self {
        self.offset(1);
        self.states[self.accept].accepting = false;
        let mut states = Vec::with_capacity(self.states.len() + 2);
        let new_start = NfaState {
            transitions: vec![(None, self.start)],
            accepting: false,
        };
        states.push(new_start);
        states.extend(self.states);
        let new_accept_idx = states.len();
        let mut new_accept = NfaState::new();
        new_accept.accepting = true;
        states.push(new_accept);

        states[0].transitions.push((None, new_accept_idx));
        states[self.accept].transitions.push((None, new_accept_idx));

        Nfa {
            states,
            start: 0,
            accept: new_accept_idx,
        }
    }

    /// ε-closure of a set of states within this NFA's arena.
    pub fn epsilon_closure(&self, from: impl IntoIterator<Item = usize>) -> BTreeSet<usize> {
        let mut closure: BTreeSet<usize> = from.into_iter().collect();
        let mut queue: VecDeque<usize> = closure.iter().copied().collect();
        while let Some(s) = queue.pop_front() {
            for &(sym, target) in &self.states[s].transitions {
                if sym.is_none() && closure.insert(target) {
                    queue.push_back(target);
                }
            }
        }
        closure
    }

    /// All literal characters appearing in any transition of this NFA.
    pub fn alphabet(&self) -> HashSet<char> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.iter().filter_map(|(c, _)| *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches_one_char() {
        let nfa = Nfa::literal('a');
        let closure = nfa.epsilon_closure([nfa.start]);
        assert_eq!(closure, BTreeSet::from([0]));
        assert!(!nfa.states[nfa.start].accepting);
        assert!(nfa.states[nfa.accept].accepting);
    }

    #[test]
    fn concat_chains_fragments() {
        let ab = Nfa::literal('a').concat(Nfa::literal('b'));
        // a-state, a-accept(now mid), b-state, b-accept
        assert_eq!(ab.states.len(), 4);
        assert!(ab.states[ab.accept].accepting);
    }

    #[test]
    fn star_accepts_empty_via_epsilon_closure() {
        let a_star = Nfa::literal('a').star();
        let closure = a_star.epsilon_closure([a_star.start]);
        assert!(closure.iter().any(|&s| a_star.states[s].accepting));
    }

    #[test]
    fn plus_requires_at_least_one() {
        let a_plus = Nfa::literal('a').plus();
        let closure = a_plus.epsilon_closure([a_plus.start]);
        assert!(!closure.iter().any(|&s| a_plus.states[s].accepting));
    }
}
