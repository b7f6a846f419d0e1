//! Grammar symbols (`spec.md` §3).
//!
//! A [`Symbol`] is an immutable `(name, kind)` pair. Two symbols with the
//! same name and kind are interchangeable — we realize that by storing names
//! as `Rc<str>` (the same interning discipline `dandy::nfa`/`dandy::dfa` use
//! for state names) and deriving equality/hashing structurally over
//! `(name, kind)`, so no separate intern table is required for correctness.

use std::fmt;
use std::rc::Rc;

/// Whether a [`Symbol`] is a terminal or a nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// A grammar symbol: a name tagged as terminal or nonterminal.
///
/// The two distinguished terminals `ε` (epsilon) and `$` (end-of-input) are
/// ordinary `Symbol`s with reserved names; use [`Symbol::epsilon`] and
/// [`Symbol::end_of_input`] rather than constructing them by name so call
/// sites can't typo the marker.
#[derive(Debug, Clone, Eq)]
pub struct Symbol {
    name: Rc<str>,
    kind: SymbolKind,
}

pub const EPSILON_NAME: &str = "ε";
pub const END_OF_INPUT_NAME: &str = "$";

impl Symbol {
    pub fn new(name: impl Into<Rc<str>>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn terminal(name: impl Into<Rc<str>>) -> Self {
        Self::new(name, SymbolKind::Terminal)
    }

    pub fn non_terminal(name: impl Into<Rc<str>>) -> Self {
        Self::new(name, SymbolKind::NonTerminal)
    }

    pub fn epsilon() -> Self {
        Self::terminal(EPSILON_NAME)
    }

    pub fn end_of_input() -> Self {
        Self::terminal(END_OF_INPUT_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::Terminal)
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::NonTerminal)
    }

    pub fn is_epsilon(&self) -> bool {
        self.is_terminal() && &*self.name == EPSILON_NAME
    }

    pub fn is_end_of_input(&self) -> bool {
        self.is_terminal() && &*self.name == END_OF_INPUT_NAME
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
