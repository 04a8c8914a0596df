use std::collections::HashMap;

use crate::Grammar;

/// Deterministic (non-terminal, terminal) -> alternative selection table.
///
/// Every cell keeps the alternatives that claimed it, in declaration order,
/// and [`ParseTable::production`] picks the last claimant. A conflict-free
/// grammar has exactly one claimant per cell; [`ParseTable::conflicts`]
/// reports the cells where alternatives collide without changing what the
/// parser does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    entries: HashMap<(usize, usize), Vec<usize>>,
}

impl ParseTable {
    /// The alternative the parser expands for this cell, as an index into
    /// the non-terminal's production list.
    pub fn production(&self, non_terminal: usize, terminal: usize) -> Option<usize> {
        self.entries
            .get(&(non_terminal, terminal))
            .and_then(|alts| alts.last())
            .copied()
    }

    pub fn claimants(&self, non_terminal: usize, terminal: usize) -> &[usize] {
        self.entries
            .get(&(non_terminal, terminal))
            .map_or(&[], |alts| alts.as_slice())
    }

    /// Terminals for which this non-terminal's row has any entry, sorted by
    /// symbol index. This is the "expected" set reported on a lookup miss.
    pub fn expected_terminals(&self, non_terminal: usize) -> Vec<usize> {
        let mut terminals: Vec<usize> = self
            .entries
            .keys()
            .filter(|(nt, _)| *nt == non_terminal)
            .map(|(_, t)| *t)
            .collect();
        terminals.sort_unstable();
        terminals
    }

    /// Cells claimed by more than one distinct alternative, sorted.
    pub fn conflicts(&self) -> Vec<((usize, usize), Vec<usize>)> {
        let mut conflicts: Vec<((usize, usize), Vec<usize>)> = self
            .entries
            .iter()
            .filter(|(_, alts)| alts.len() > 1)
            .map(|(cell, alts)| (*cell, alts.clone()))
            .collect();
        conflicts.sort_unstable();
        conflicts
    }
}

impl Grammar {
    /// Builds the predictive parsing table from FIRST/FOLLOW, computing the
    /// sets first if they are missing. For each alternative, its FIRST
    /// terminals claim the cell; a nullable alternative additionally claims
    /// every terminal in FOLLOW of its left side.
    pub fn build_parse_table(&mut self) -> ParseTable {
        if !self.is_nullable_first_follow_valid() {
            self.calculate_nullable_first_follow();
        }

        let mut entries: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for nt in self.non_terminal_iter() {
            for (alt, production) in nt.productions.iter().enumerate() {
                for terminal in self.calculate_first_for_production(production) {
                    claim(&mut entries, nt.index, terminal, alt);
                }
                if self.sequence_nullable(production) {
                    for &terminal in &nt.follow {
                        claim(&mut entries, nt.index, terminal, alt);
                    }
                }
            }
        }

        ParseTable { entries }
    }
}

fn claim(
    entries: &mut HashMap<(usize, usize), Vec<usize>>,
    non_terminal: usize,
    terminal: usize,
    alt: usize,
) {
    let cell = entries.entry((non_terminal, terminal)).or_default();
    // an alternative claiming a cell through both FIRST and FOLLOW is not a
    // conflict with itself
    if !cell.contains(&alt) {
        cell.push(alt);
    }
}
