use std::collections::HashSet;

use super::{grammar::Symbol, Grammar, END_MARK};

impl Grammar {
    /// Runs the three fixed points in dependency order. Each loop stops on
    /// the first full pass that changes nothing; the sets are bounded by the
    /// terminal alphabet and only ever grow, so every loop terminates.
    pub fn calculate_nullable_first_follow(&mut self) {
        if let Some(start_idx) = self.start_symbol {
            self.symbols[start_idx]
                .mut_non_terminal()
                .unwrap()
                .follow
                .insert(self.symbol_table[END_MARK]);
            self.calculate_nullable();
            self.calculate_first();
            self.calculate_follow();
        }
    }

    pub fn reset_nullable_first_follow(&mut self) {
        for nt in self.non_terminal_iter_mut() {
            nt.nullable = false;
            nt.first = HashSet::new();
            nt.follow = HashSet::new();
        }
    }

    /// The `$` seed only ever appears in FOLLOW(start) once the sets have
    /// been computed, so its presence doubles as a computed-yet marker.
    pub fn is_nullable_first_follow_valid(&self) -> bool {
        match self.start_symbol {
            Some(start) => {
                let end = self.end_mark_index();
                self.symbols[start]
                    .non_terminal()
                    .map_or(true, |nt| nt.follow.contains(&end))
            }
            None => true,
        }
    }

    fn calculate_nullable(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let nullable: bool = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        if nt.nullable {
                            continue;
                        }
                        nt.productions.iter().any(|production| {
                            production.iter().all(|s| match &self.symbols[*s] {
                                Symbol::Terminal(_) => false,
                                Symbol::NonTerminal(e) => e.nullable,
                            })
                        })
                    }
                };

                if nullable {
                    self.symbols[i].mut_non_terminal().unwrap().nullable = true;
                    changed = true;
                }
            }
        }
    }

    /// FIRST of a symbol sequence: leading terminal, or the FIRST sets of a
    /// nullable non-terminal prefix. Nullability of the sequence itself is
    /// reported separately by [`Grammar::sequence_nullable`].
    pub fn calculate_first_for_production(&self, production: &[usize]) -> HashSet<usize> {
        let mut first: HashSet<usize> = HashSet::new();
        for (idx, symbol) in production.iter().map(|i| (*i, &self.symbols[*i])) {
            match symbol {
                Symbol::Terminal(_) => {
                    first.insert(idx);
                    break;
                }
                Symbol::NonTerminal(nt) => {
                    first.extend(nt.first.iter().cloned());
                    if !nt.nullable {
                        break;
                    }
                }
            }
        }
        first
    }

    /// True when every symbol of the sequence can derive nothing. The empty
    /// sequence is nullable.
    pub fn sequence_nullable(&self, production: &[usize]) -> bool {
        production.iter().all(|s| match &self.symbols[*s] {
            Symbol::Terminal(_) => false,
            Symbol::NonTerminal(nt) => nt.nullable,
        })
    }

    fn calculate_first(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let first: HashSet<usize> = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        nt.productions
                            .iter()
                            .fold(HashSet::new(), |mut first, production| {
                                first.extend(
                                    self.calculate_first_for_production(production).into_iter(),
                                );
                                first
                            })
                    }
                };

                let nt = self.symbols[i].mut_non_terminal().unwrap();
                if nt.first.len() != first.len() {
                    changed = true;
                    nt.first = first;
                }
            }
        }
    }

    fn calculate_follow(&mut self) {
        let epsilon = self.epsilon_index();
        // The production list is fixed during the iteration; snapshotting it
        // lets each pass read FIRST/FOLLOW immutably and merge per symbol.
        let productions: Vec<(usize, Vec<usize>)> = self
            .non_terminal_iter()
            .flat_map(|nt| nt.productions.iter().map(move |p| (nt.index, p.clone())))
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for (left, production) in &productions {
                for (i, &sym) in production.iter().enumerate() {
                    if sym == epsilon || self.symbols[sym].non_terminal().is_none() {
                        continue;
                    }

                    let suffix = &production[i + 1..];
                    let mut additions = self.calculate_first_for_production(suffix);
                    if self.sequence_nullable(suffix) {
                        let left_follow = &self.symbols[*left].non_terminal().unwrap().follow;
                        additions.extend(left_follow.iter().cloned());
                    }

                    let target = self.symbols[sym].mut_non_terminal().unwrap();
                    let before = target.follow.len();
                    target.follow.extend(additions);
                    if target.follow.len() != before {
                        changed = true;
                    }
                }
            }
        }
    }
}
