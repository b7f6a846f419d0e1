//! Table-filling DFA minimization (`spec.md` §4.4) — "Hopcroft-Moore's
//! quadratic sibling", deliberately *not* `dandy::dfa::Dfa::minimize`'s
//! Hopcroft partition refinement, per `spec.md`'s explicit algorithm choice
//! for this engine.
//!
//! Pairwise distinguishability table, fixed-point closure, union-find
//! partitioning, then transition reconstruction from one representative per
//! partition.

use super::{Dfa, DfaState};
use std::collections::{BTreeSet, HashMap};

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }
}

/// Minimizes `dfa` by merging non-distinguishable states (`spec.md` §4.4).
/// Idempotent: minimizing an already-minimal DFA returns an isomorphic DFA.
pub fn minimize(dfa: Dfa) -> Dfa {
    let n = dfa.states.len();
    if n <= 1 {
        return dfa;
    }

    let alphabet: BTreeSet<char> = dfa
        .states
        .iter()
        .flat_map(|s| s.transitions.keys().copied())
        .collect();

    // dist[i][j] for i < j: true iff states i and j are distinguishable.
    let mut dist = vec![vec![false; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            if dfa.states[i].annotation != dfa.states[j].annotation {
                dist[i][j] = true;
            }
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            for j in (i + 1)..n {
                if dist[i][j] {
                    continue;
                }
                for &c in &alphabet {
                    let ti = dfa.states[i].transitions.get(&c).copied();
                    let tj = dfa.states[j].transitions.get(&c).copied();
                    let become_distinguishable = match (ti, tj) {
                        (None, None) => false,
                        (Some(_), None) | (None, Some(_)) => true,
                        (Some(a), Some(b)) => a != b && dist[a.min(b)][a.max(b)],
                    };
                    if become_distinguishable {
                        dist[i][j] = true;
                        changed = true;
                        break;
                    }
                }
            }
        }
    }

    let mut uf = UnionFind::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if !dist[i][j] {
                uf.union(i, j);
            }
        }
    }

    let mut partition_of: Vec<usize> = (0..n).map(|i| uf.find(i)).collect();
    let mut representatives: Vec<usize> = partition_of.clone();
    representatives.sort_unstable();
    representatives.dedup();
    let mut new_index: HashMap<usize, usize> = HashMap::new();
    for (new_idx, &rep) in representatives.iter().enumerate() {
        new_index.insert(rep, new_idx);
    }
    for p in &mut partition_of {
        *p = new_index[p];
    }

    let new_states: Vec<DfaState> = representatives
        .iter()
        .map(|&rep| {
            let source = &dfa.states[rep];
            let transitions = source
                .transitions
                .iter()
                .map(|(&c, &target)| (c, partition_of[target]))
                .collect();
            DfaState {
                transitions,
                annotation: source.annotation,
            }
        })
        .collect();

    Dfa {
        states: new_states,
        start: partition_of[dfa.start],
    }
}
