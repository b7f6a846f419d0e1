//! # Grammar
//! In-memory representation of a context-free grammar: an ordered production
//! list, the derived terminal/nonterminal sets, and a distinguished start
//! symbol (`spec.md` §3). Construction is the only place invariants are
//! checked; every other component treats a [`Grammar`] as read-only
//! (`spec.md` §3, "Lifecycles").
//!
//! Grounded on `PunGy::grammar`'s `Production { id, lhs, rhs }` shape and
//! terminal/nonterminal set bookkeeping.

pub mod text;

use crate::error::GrammarError;
use crate::symbol::{Symbol, SymbolKind};
use std::collections::HashSet;
use std::fmt;

/// An immutable `(LHS, RHS)` production. `RHS = [ε]` encodes an
/// ε-production; see [`Production::is_epsilon`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }

    /// True exactly when the RHS is the single-element `[ε]` sequence.
    pub fn is_epsilon(&self) -> bool {
        self.rhs.len() == 1 && self.rhs[0].is_epsilon()
    }

    /// The RHS, skipping a solitary `ε` symbol (so callers can walk the
    /// "real" symbols of an ε-production as an empty sequence).
    pub fn rhs_symbols(&self) -> &[Symbol] {
        if self.is_epsilon() {
            &[]
        } else {
            &self.rhs
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        if self.rhs.is_empty() {
            write!(f, " ε")?;
        } else {
            for sym in &self.rhs {
                write!(f, " {sym}")?;
            }
        }
        Ok(())
    }
}

/// A context-free grammar: productions, derived symbol sets, and a start
/// symbol. Invariant (checked once, at construction): every symbol
/// appearing in any production is present in the terminal or nonterminal
/// set matching its tag (`spec.md` §3).
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    terminals: HashSet<Symbol>,
    non_terminals: HashSet<Symbol>,
    start: Symbol,
}

impl Grammar {
    /// Builds and validates a grammar from a production list and a start
    /// symbol. Fails (`spec.md` §7, "Malformed production line" /
    /// structural errors) if the production list is empty, if the start
    /// symbol has no production, or if a symbol name is used with two
    /// different kinds.
    pub fn new(productions: Vec<Production>, start: Symbol) -> Result<Self, GrammarError> {
        if productions.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut terminals = HashSet::new();
        let mut non_terminals = HashSet::new();
        terminals.insert(Symbol::epsilon());
        terminals.insert(Symbol::end_of_input());

        let mut seen_names: std::collections::HashMap<String, SymbolKind> =
            std::collections::HashMap::new();
        let mut record = |sym: &Symbol| -> Result<(), GrammarError> {
            match seen_names.get(sym.name()) {
                Some(kind) if *kind != sym.kind() => {
                    return Err(GrammarError::InconsistentSymbolKind {
                        name: sym.name().to_string(),
                    })
                }
                _ => {
                    seen_names.insert(sym.name().to_string(), sym.kind());
                }
            }
            match sym.kind() {
                SymbolKind::Terminal => {
                    terminals.insert(sym.clone());
                }
                SymbolKind::NonTerminal => {
                    non_terminals.insert(sym.clone());
                }
            }
            Ok(())
        };

        for prod in &productions {
            record(&prod.lhs)?;
            if prod.lhs.is_terminal() {
                return Err(GrammarError::WrongSymbolKind(
                    prod.lhs.name().to_string(),
                    SymbolKind::Terminal,
                ));
            }
            for sym in &prod.rhs {
                if sym.is_epsilon() {
                    continue;
                }
                record(sym)?;
            }
        }

        if !non_terminals.contains(&start) {
            return Err(GrammarError::UndefinedStartSymbol(start.name().to_string()));
        }

        Ok(Self {
            productions,
            terminals,
            non_terminals,
            start,
        })
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn productions_for<'a>(&'a self, lhs: &'a Symbol) -> impl Iterator<Item = &'a Production> {
        self.productions.iter().filter(move |p| &p.lhs == lhs)
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.terminals.iter()
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.non_terminals.iter()
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    pub fn is_terminal(&self, sym: &Symbol) -> bool {
        self.terminals.contains(sym)
    }

    pub fn is_non_terminal(&self, sym: &Symbol) -> bool {
        self.non_terminals.contains(sym)
    }

    /// Multi-line pretty-printer listing every production, one per line.
    /// Ambient debug affordance (`SPEC_FULL.md` §10), not used by any
    /// algorithm.
    pub fn to_detailed_string(&self) -> String {
        self.productions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
