use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::{END_MARK, EPSILON, EPSILON_ALIAS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("non-terminal {0} has no productions")]
    EmptyNonTerminal(String),
    #[error("{0} has an alternative with no symbols")]
    EmptyAlternative(String),
    #[error("{0} has an alternative where ε is not the only symbol")]
    EpsilonInSequence(String),
    #[error("grammar has no start symbol")]
    NoStartSymbol,
}

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub first: HashSet<usize>,
    pub follow: HashSet<usize>,
    pub nullable: bool,
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            first: HashSet::new(),
            follow: HashSet::new(),
            nullable: false,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn mut_non_terminal(&mut self) -> Option<&mut NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }
}

/// Symbols are interned once and referenced by index everywhere else.
/// Index 0 is ε, modelled as a non-terminal that is always nullable and has
/// no alternatives; index 1 is the end marker `$`, an ordinary terminal.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    pub symbol_table: HashMap<String, usize>,
    pub start_symbol: Option<usize>,
}

impl Grammar {
    pub fn new() -> Self {
        let mut g = Self {
            symbols: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol: None,
        };

        let e_idx = g.add_non_terminal(EPSILON);
        g.symbols[e_idx].mut_non_terminal().unwrap().nullable = true;
        g.symbol_table.insert(EPSILON_ALIAS.to_string(), e_idx);

        g.add_terminal(END_MARK.to_string());

        g
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.symbols.iter().filter_map(|s| {
            if let Symbol::Terminal(name) = s {
                Some(name)
            } else {
                None
            }
        })
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols.iter().filter_map(|s| s.non_terminal()).skip(1)
    }

    pub fn non_terminal_iter_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.symbols
            .iter_mut()
            .filter_map(|s| s.mut_non_terminal())
            .skip(1)
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn epsilon_index(&self) -> usize {
        self.symbol_table[EPSILON]
    }

    pub fn end_mark_index(&self) -> usize {
        self.symbol_table[END_MARK]
    }

    pub fn is_terminal(&self, index: usize) -> bool {
        matches!(self.symbols[index], Symbol::Terminal(_))
    }

    pub fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    pub fn add_production(&mut self, left: usize, right: Vec<usize>) {
        self.symbols[left]
            .mut_non_terminal()
            .unwrap()
            .productions
            .push(right);
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        match &self.symbols[index] {
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
        }
    }

    pub fn production_to_vec_str(&self, production: &[usize]) -> Vec<&str> {
        production
            .iter()
            .map(|idx| self.get_symbol_name(*idx))
            .collect()
    }

    /// Checks the invariants every later stage relies on: a start symbol is
    /// designated, every non-terminal has at least one alternative, and ε
    /// only ever occurs as the sole symbol of an alternative.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.non_terminal_iter().next().is_some() && self.start_symbol.is_none() {
            return Err(GrammarError::NoStartSymbol);
        }

        let epsilon = self.epsilon_index();
        for nt in self.non_terminal_iter() {
            if nt.productions.is_empty() {
                return Err(GrammarError::EmptyNonTerminal(nt.name.clone()));
            }
            for production in &nt.productions {
                if production.is_empty() {
                    return Err(GrammarError::EmptyAlternative(nt.name.clone()));
                }
                if production.len() > 1 && production.contains(&epsilon) {
                    return Err(GrammarError::EpsilonInSequence(nt.name.clone()));
                }
            }
        }
        Ok(())
    }
}
