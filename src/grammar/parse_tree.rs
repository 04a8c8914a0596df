use serde::Serialize;
use thiserror::Error;

use super::{grammar::Symbol, predictive_parser::TraceStep, Grammar};

/// A production trace that does not describe a pre-order expansion of the
/// tree built so far. Never produced for a trace paired with the grammar
/// that accepted it; hitting one of these means caller-side corruption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("production trace ended before the tree was complete")]
    TraceTooShort,
    #[error("trace expands {found} but the pending node is {expected}")]
    NodeMismatch { expected: String, found: String },
    #[error("trace names an unknown alternative of {0}")]
    UnknownAlternative(String),
    #[error("{0} trace entries left over after the tree was complete")]
    TraceTooLong(usize),
}

/// Concrete parse tree: terminals at the leaves, non-terminals inside, every
/// child owned by its parent. ε expansions leave a childless non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTreeNode {
    pub symbol: String,
    pub children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            children: Vec::new(),
        }
    }

    /// Symbols of the childless nodes, left to right. For an accepted parse
    /// the terminals among them are exactly the consumed input.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        if self.children.is_empty() {
            leaves.push(self.symbol.as_str());
        }
        for child in &self.children {
            child.collect_leaves(leaves);
        }
    }

    pub fn to_plaintext(&self) -> String {
        let mut output = String::new();
        self.write_plaintext(0, &mut output);
        output
    }

    fn write_plaintext(&self, level: usize, output: &mut String) {
        output.push_str(&"  ".repeat(level));
        output.push_str(&self.symbol);
        output.push('\n');
        for child in &self.children {
            child.write_plaintext(level + 1, output);
        }
    }
}

impl Grammar {
    /// Rebuilds the concrete parse tree from a production trace. The trace
    /// is consumed in order; every entry must expand the leftmost pending
    /// non-terminal, mirroring the parser's own stack discipline.
    pub fn build_parse_tree(&self, trace: &[TraceStep]) -> Result<ParseTreeNode, TreeError> {
        let start = match self.start_symbol {
            Some(start) => start,
            None => return Err(TreeError::TraceTooShort),
        };

        let mut steps = trace.iter();
        let root = self.expand_node(start, &mut steps)?;
        let leftover = steps.count();
        if leftover > 0 {
            return Err(TreeError::TraceTooLong(leftover));
        }
        Ok(root)
    }

    fn expand_node(
        &self,
        index: usize,
        steps: &mut std::slice::Iter<TraceStep>,
    ) -> Result<ParseTreeNode, TreeError> {
        let step = steps.next().ok_or(TreeError::TraceTooShort)?;
        if step.left != index {
            return Err(TreeError::NodeMismatch {
                expected: self.get_symbol_name(index).to_string(),
                found: self
                    .symbols
                    .get(step.left)
                    .map_or("?", |_| self.get_symbol_name(step.left))
                    .to_string(),
            });
        }

        let production = self.symbols[step.left]
            .non_terminal()
            .and_then(|nt| nt.productions.get(step.alt))
            .ok_or_else(|| TreeError::UnknownAlternative(self.get_symbol_name(step.left).to_string()))?;

        let epsilon = self.epsilon_index();
        let mut node = ParseTreeNode::new(self.get_symbol_name(index));
        for &symbol in production {
            if symbol == epsilon {
                continue;
            }
            match &self.symbols[symbol] {
                Symbol::Terminal(name) => node.children.push(ParseTreeNode::new(name)),
                Symbol::NonTerminal(_) => node.children.push(self.expand_node(symbol, steps)?),
            }
        }
        Ok(node)
    }
}
