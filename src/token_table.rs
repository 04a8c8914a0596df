use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::lexer::{Token, TokenCategory};

/// Per-category report of the distinct lexemes seen in a token stream,
/// listed in classification order and tagged with a small additive hash.
#[derive(Debug, Default)]
pub struct TokenTable {
    tokens: HashMap<TokenCategory, BTreeSet<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenTableEntry {
    pub category: &'static str,
    pub value: String,
    pub hash: u32,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&mut self, token: &Token) {
        self.tokens
            .entry(token.category)
            .or_default()
            .insert(token.text.clone());
    }

    fn hash(value: &str) -> u32 {
        value.chars().map(|c| c as u32).sum::<u32>() % 1000
    }

    /// Rows in category order, values de-duplicated and sorted within each
    /// category.
    pub fn generate_table(&self) -> Vec<TokenTableEntry> {
        let mut table = Vec::new();
        for category in TokenCategory::ORDER {
            if let Some(values) = self.tokens.get(&category) {
                for value in values {
                    table.push(TokenTableEntry {
                        category: category.label(),
                        value: value.clone(),
                        hash: Self::hash(value),
                    });
                }
            }
        }
        table
    }

    pub fn to_plaintext(&self) -> String {
        let mut lines = vec![format!("{:<12} {:<15} {:<4}", "Type", "Value", "Hash")];
        for entry in self.generate_table() {
            lines.push(format!(
                "{:<12} {:<15} {:<4}",
                entry.category, entry.value, entry.hash
            ));
        }
        lines.join("\n")
    }

    pub fn to_latex(&self) -> String {
        use crowbook_text_processing::escape;

        let content = self
            .generate_table()
            .iter()
            .map(|entry| {
                format!(
                    "{} & {} & {}",
                    entry.category,
                    escape::tex(entry.value.as_str()),
                    entry.hash
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c}\n".to_string()
            + "Type & Value & Hash\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}
