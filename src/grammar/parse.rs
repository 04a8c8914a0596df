use super::grammar::GrammarError;
use crate::Grammar;

impl Grammar {
    /// Reads a grammar from text, one rule per line (`A -> x y | z`), with
    /// `|`-continuation lines. The left side of the first rule becomes the
    /// start symbol; names never used as a left side become terminals.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, &str, usize)> = Vec::new();

        let mut previous_left: Option<usize> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(GrammarError::Malformed {
                    line: i + 1,
                    reason: "too many \"->\"".to_string(),
                });
            }
            let (left, rights): (usize, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(GrammarError::Malformed {
                        line: i + 1,
                        reason: "empty left side".to_string(),
                    });
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(GrammarError::Malformed {
                        line: i + 1,
                        reason: "left side contains whitespace".to_string(),
                    });
                }
                (
                    if let Some(idx) = g.get_symbol_index(left_str) {
                        idx
                    } else {
                        g.add_non_terminal(left_str)
                    },
                    parts[1].trim(),
                )
            } else {
                let rest = parts[0].trim();
                match (previous_left, rest.strip_prefix('|')) {
                    (Some(idx), Some(rest)) => (idx, rest.trim()),
                    _ => {
                        return Err(GrammarError::Malformed {
                            line: i + 1,
                            reason: "cannot find left side".to_string(),
                        })
                    }
                }
            };

            previous_left = Some(left);

            raw_productions.push((left, rights, i + 1));
        }

        for (left, rights, line) in raw_productions {
            for right in rights.split('|') {
                let symbols: Vec<usize> = right
                    .split_whitespace()
                    .map(|s| {
                        if let Some(idx) = g.get_symbol_index(s) {
                            idx
                        } else {
                            g.add_terminal(s.to_string())
                        }
                    })
                    .collect();
                if symbols.is_empty() {
                    return Err(GrammarError::Malformed {
                        line,
                        reason: "empty alternative (spell it ε)".to_string(),
                    });
                }
                g.add_production(left, symbols);
            }
        }

        let start_symbol: Option<usize> = if let Some(nt) = g.non_terminal_iter().next() {
            Some(g.symbol_table[&nt.name])
        } else {
            None
        };
        g.start_symbol = start_symbol;

        g.validate()?;

        Ok(g)
    }
}
