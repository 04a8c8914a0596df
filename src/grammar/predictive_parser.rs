use thiserror::Error;

use super::{grammar::Symbol, parse_table::ParseTable, Grammar, END_MARK};

/// First token the parse could not continue past. `expected` lists the
/// terminals the parsing table had an entry for at that point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at token {position}: unexpected {found:?}, expected one of {expected:?}")]
pub struct SyntaxError {
    pub position: usize,
    pub found: String,
    pub expected: Vec<String>,
}

/// One applied production: `left` was expanded via its `alt`-th alternative.
/// The trace of a whole parse is a leftmost derivation in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub left: usize,
    pub alt: usize,
}

/// Table-driven stack automaton. Holds no state across calls; every `parse`
/// invocation runs on its own stack and cursor, so one parser can be reused
/// for any number of inputs.
pub struct PredictiveParser<'g> {
    grammar: &'g Grammar,
    table: &'g ParseTable,
}

impl<'g> PredictiveParser<'g> {
    pub fn new(grammar: &'g Grammar, table: &'g ParseTable) -> Self {
        Self { grammar, table }
    }

    /// Parses a stream of token types (the end marker is appended here, not
    /// by the caller) and returns the production trace on acceptance.
    pub fn parse(&self, tokens: &[&str]) -> Result<Vec<TraceStep>, SyntaxError> {
        let g = self.grammar;
        let end = g.end_mark_index();
        let epsilon = g.epsilon_index();

        // token types are resolved against the symbol table once; a type
        // naming no known terminal can never match and surfaces as a syntax
        // error at its position
        let input: Vec<Option<usize>> = tokens.iter().map(|t| g.get_symbol_index(t)).collect();

        let mut stack: Vec<usize> = vec![end];
        if let Some(start) = g.start_symbol {
            stack.push(start);
        }

        let mut trace: Vec<TraceStep> = Vec::new();
        let mut cursor: usize = 0;

        while let Some(&top) = stack.last() {
            let (current, found) = if cursor < tokens.len() {
                (input[cursor], tokens[cursor])
            } else {
                (Some(end), END_MARK)
            };

            if top == end && current == Some(end) {
                return Ok(trace);
            }

            if current == Some(top) && g.is_terminal(top) {
                stack.pop();
                cursor += 1;
                continue;
            }

            match &g.symbols[top] {
                Symbol::Terminal(name) => {
                    return Err(SyntaxError {
                        position: cursor,
                        found: found.to_string(),
                        expected: vec![name.clone()],
                    });
                }
                Symbol::NonTerminal(nt) => {
                    let alt = current.and_then(|c| self.table.production(top, c));
                    match alt {
                        None => {
                            let mut expected: Vec<String> = self
                                .table
                                .expected_terminals(top)
                                .iter()
                                .map(|&t| g.get_symbol_name(t).to_string())
                                .collect();
                            expected.sort();
                            return Err(SyntaxError {
                                position: cursor,
                                found: found.to_string(),
                                expected,
                            });
                        }
                        Some(alt) => {
                            stack.pop();
                            let production = &nt.productions[alt];
                            if !(production.len() == 1 && production[0] == epsilon) {
                                for &symbol in production.iter().rev() {
                                    stack.push(symbol);
                                }
                            }
                            trace.push(TraceStep { left: top, alt });
                        }
                    }
                }
            }
        }

        // the end marker stays at the bottom of the stack, so the loop can
        // only exit through accept or error above
        Ok(trace)
    }
}
