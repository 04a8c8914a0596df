extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub mod lexer;
pub mod minicpp;
pub mod token_table;
pub use grammar::Grammar;

use grammar::predictive_parser::PredictiveParser;

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[wasm_bindgen]
pub fn nullable_first_follow_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => {
            g.calculate_nullable_first_follow();
            g.to_non_terminal_output_vec().to_json()
        }
        Err(e) => error_json(&e.to_string()),
    }
}

#[wasm_bindgen]
pub fn parse_source_to_json(source: &str) -> String {
    let mut g = match minicpp::grammar() {
        Ok(g) => g,
        Err(e) => return error_json(&e.to_string()),
    };
    let table = g.build_parse_table();

    let tokens = match lexer::tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => return error_json(&e.to_string()),
    };
    let types: Vec<&str> = tokens.iter().map(|t| t.parse_type()).collect();

    let parser = PredictiveParser::new(&g, &table);
    let trace = match parser.parse(&types) {
        Ok(trace) => trace,
        Err(e) => return error_json(&e.to_string()),
    };

    match g.build_parse_tree(&trace) {
        Ok(tree) => serde_json::to_string(&tree).unwrap_or_else(|e| error_json(&e.to_string())),
        Err(e) => error_json(&e.to_string()),
    }
}

#[cfg(test)]
mod parse_tests {
    use crate::grammar::grammar::GrammarError;
    use crate::grammar::EPSILON;

    #[test]
    fn simple_parse() {
        let g = crate::Grammar::parse("S -> a").unwrap();

        let s = g.symbol_table.get("S").unwrap().clone();
        let a = g.symbol_table.get("a").unwrap().clone();
        let epsilon = g.symbol_table.get(EPSILON).unwrap().clone();

        assert_eq!(g.get_symbol_name(s), "S");
        assert_eq!(g.get_symbol_name(a), "a");

        assert_eq!(g.symbols[epsilon].non_terminal().unwrap().nullable, true);

        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[0], vec![a]);
        assert_eq!(g.start_symbol, Some(s));
    }

    #[test]
    fn simple_parse_with_space() {
        let g = crate::Grammar::parse("  S -> a ").unwrap();

        let s = g.symbol_table.get("S").unwrap().clone();
        let a = g.symbol_table.get("a").unwrap().clone();

        assert_eq!(g.get_symbol_name(s), "S");
        assert_eq!(g.get_symbol_name(a), "a");

        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[0], vec![a]);
    }

    #[test]
    fn simple_parse_with_space_and_newline() {
        let g = crate::Grammar::parse("  S -> a \n | b c").unwrap();

        let s = g.symbol_table.get("S").unwrap().clone();
        let a = g.symbol_table.get("a").unwrap().clone();
        let b = g.symbol_table.get("b").unwrap().clone();
        let c = g.symbol_table.get("c").unwrap().clone();

        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[0], vec![a]);
        assert_eq!(
            g.symbols[s].non_terminal().unwrap().productions[1],
            vec![b, c]
        );
    }

    #[test]
    fn empty_parse() {
        let _g = crate::Grammar::parse("  \n  ").unwrap();
    }

    #[test]
    fn epsilon_alias_parse() {
        let g = crate::Grammar::parse("S -> a | ϵ").unwrap();
        let s = g.symbol_table["S"];
        let epsilon = g.epsilon_index();
        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[1], vec![epsilon]);
    }

    #[test]
    #[should_panic]
    fn two_rightarrows_parse() {
        let _g = crate::Grammar::parse("S -> a -> b").unwrap();
    }

    #[test]
    #[should_panic]
    fn no_left_parse() {
        let _g = crate::Grammar::parse("-> a -> b").unwrap();
    }

    #[test]
    #[should_panic]
    fn no_previous_left_parse() {
        let _g = crate::Grammar::parse("| a b\n S -> a").unwrap();
    }

    #[test]
    #[should_panic]
    fn left_contain_space() {
        let _g = crate::Grammar::parse("S a S -> x").unwrap();
    }

    #[test]
    fn epsilon_must_be_alone() {
        let err = crate::Grammar::parse("S -> a ε").unwrap_err();
        assert_eq!(err, GrammarError::EpsilonInSequence("S".to_string()));
    }

    #[test]
    fn empty_alternative_rejected() {
        let err = crate::Grammar::parse("S -> a |").unwrap_err();
        assert!(matches!(err, GrammarError::Malformed { line: 1, .. }));
    }

    #[test]
    fn minicpp_alphabet_registered() {
        let g = crate::minicpp::grammar().unwrap();
        // lexemes the lexer can emit but no production mentions
        for name in ["void", "if", "continue", "break", "/", "[", "]"] {
            let idx = g.get_symbol_index(name);
            assert!(idx.map_or(false, |i| g.is_terminal(i)), "{} missing", name);
        }
    }

    #[test]
    fn dangling_non_terminal_rejected() {
        let mut g = crate::Grammar::new();
        let s = g.add_non_terminal("S");
        let t = g.add_non_terminal("T");
        g.add_production(s, vec![t]);
        g.start_symbol = Some(s);
        assert_eq!(
            g.validate(),
            Err(GrammarError::EmptyNonTerminal("T".to_string()))
        );
    }
}

#[cfg(test)]
mod nullable_first_follow_tests {
    use crate::Grammar;

    fn analyzed(text: &str) -> Grammar {
        let mut g = Grammar::parse(text).unwrap();
        g.calculate_nullable_first_follow();
        g
    }

    fn nullable(g: &Grammar, name: &str) -> bool {
        g.symbols[g.symbol_table[name]].non_terminal().unwrap().nullable
    }

    fn first(g: &Grammar, name: &str) -> Vec<String> {
        let mut v: Vec<String> = g.symbols[g.symbol_table[name]]
            .non_terminal()
            .unwrap()
            .first
            .iter()
            .map(|&idx| g.get_symbol_name(idx).to_string())
            .collect();
        v.sort();
        v
    }

    fn follow(g: &Grammar, name: &str) -> Vec<String> {
        let mut v: Vec<String> = g.symbols[g.symbol_table[name]]
            .non_terminal()
            .unwrap()
            .follow
            .iter()
            .map(|&idx| g.get_symbol_name(idx).to_string())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn epsilon_alternative_is_nullable() {
        let g = analyzed("A -> a A | ε");
        assert!(nullable(&g, "A"));
        assert_eq!(first(&g, "A"), vec!["a"]);
        assert_eq!(follow(&g, "A"), vec!["$"]);
    }

    #[test]
    fn follow_of_start_contains_end_mark() {
        let g = analyzed("S -> a S | b");
        assert!(follow(&g, "S").contains(&"$".to_string()));
    }

    #[test]
    fn nullable_chain() {
        let g = analyzed("S -> A B\nA -> a | ε\nB -> b | ε");
        assert!(nullable(&g, "S"));
        assert_eq!(first(&g, "S"), vec!["a", "b"]);
        assert_eq!(follow(&g, "A"), vec!["$", "b"]);
        assert_eq!(follow(&g, "B"), vec!["$"]);
    }

    #[test]
    fn expression_grammar_sets() {
        let g = analyzed(
            "E -> T E'
E' -> + T E' | ε
T -> F T'
T' -> * F T' | ε
F -> ( E ) | num",
        );

        assert!(!nullable(&g, "E"));
        assert!(nullable(&g, "E'"));
        assert!(nullable(&g, "T'"));

        assert_eq!(first(&g, "E"), vec!["(", "num"]);
        assert_eq!(first(&g, "T"), vec!["(", "num"]);
        assert_eq!(first(&g, "E'"), vec!["+"]);
        assert_eq!(first(&g, "T'"), vec!["*"]);

        assert_eq!(follow(&g, "E"), vec!["$", ")"]);
        assert_eq!(follow(&g, "E'"), vec!["$", ")"]);
        assert_eq!(follow(&g, "T"), vec!["$", ")", "+"]);
        assert_eq!(follow(&g, "T'"), vec!["$", ")", "+"]);
        assert_eq!(follow(&g, "F"), vec!["$", ")", "*", "+"]);
    }

    #[test]
    fn recomputation_is_stable() {
        let mut g = Grammar::parse("E -> E + a | a").unwrap();
        g.calculate_nullable_first_follow();
        let first_before = first(&g, "E");
        let follow_before = follow(&g, "E");
        g.reset_nullable_first_follow();
        g.calculate_nullable_first_follow();
        assert_eq!(first(&g, "E"), first_before);
        assert_eq!(follow(&g, "E"), follow_before);
    }

    #[test]
    fn minicpp_sets() {
        let g = crate::minicpp::grammar().unwrap();

        assert!(!nullable(&g, "Start"));
        for name in ["S", "N", "T", "V", "Assign", "P", "F", "H"] {
            assert!(nullable(&g, name), "{} should be nullable", name);
        }
        assert!(!nullable(&g, "Z"));

        assert_eq!(first(&g, "Start"), vec!["#include", "int", "using"]);
        assert_eq!(first(&g, "Operation"), vec!["IDENTIFIER", "NUMBER"]);
        assert_eq!(follow(&g, "T"), vec!["return", "}"]);
        assert_eq!(follow(&g, "S"), vec!["int", "using"]);
        assert_eq!(follow(&g, "M"), vec!["$"]);
    }
}




#[cfg(test)]
mod pretty_print_tests {
    use crate::grammar::predictive_parser::PredictiveParser;
    use crate::Grammar;

    #[test]
    fn productions_plaintext() {
        let g = Grammar::parse("S -> a S | ε").unwrap();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            "S -> a S\n   | ε"
        );
    }

    #[test]
    fn productions_latex_escapes_epsilon() {
        let g = Grammar::parse("S -> ε").unwrap();
        let latex = g.to_production_output_vec().to_latex();
        assert!(latex.starts_with("\\[\\begin{array}{cll}"));
        assert!(latex.contains("\\epsilon"));
    }

    #[test]
    fn nullable_first_follow_json() {
        let mut g = Grammar::parse("A -> a A | ε").unwrap();
        g.calculate_nullable_first_follow();
        assert_eq!(
            g.to_non_terminal_output_vec().to_json(),
            r#"{"data":[{"name":"A","nullable":true,"first":["a","ε"],"follow":["$"]}]}"#
        );
    }

    #[test]
    fn trace_plaintext_lists_applied_productions() {
        let mut g = Grammar::parse("A -> a A | ε").unwrap();
        let table = g.build_parse_table();
        let parser = PredictiveParser::new(&g, &table);

        let trace = parser.parse(&["a"]).unwrap();
        assert_eq!(
            g.to_trace_output_vec(&trace).to_plaintext(),
            "A -> a A\nA -> ε"
        );
    }

    #[test]
    fn parse_table_plaintext_shows_cells() {
        let mut g = Grammar::parse("A -> a A | ε").unwrap();
        let table = g.build_parse_table();
        let out = g.to_parse_table_output(&table).to_plaintext();

        let mut lines = out.lines();
        let header = lines.next().unwrap();
        assert!(header.contains('$'));
        assert!(header.contains('a'));
        let row = lines.next().unwrap();
        assert!(row.contains("A -> a A"));
        assert!(row.contains("A -> ε"));
    }
}

#[cfg(test)]
mod lexer_tests {
    use crate::lexer::{tokenize, LexError, Token, TokenCategory};

    #[test]
    fn classifies_declaration() {
        let tokens = tokenize("int x = 10 ;").unwrap();
        let summary: Vec<(TokenCategory, &str)> = tokens
            .iter()
            .map(|t| (t.category, t.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenCategory::ReservedWord, "int"),
                (TokenCategory::Identifier, "x"),
                (TokenCategory::Symbol, "="),
                (TokenCategory::Number, "10"),
                (TokenCategory::Symbol, ";"),
            ]
        );
    }

    #[test]
    fn longest_match_for_symbols() {
        let tokens = tokenize("cout << s >> t >= 1 == 2").unwrap();
        let symbols: Vec<&str> = tokens
            .iter()
            .filter(|t| t.category == TokenCategory::Symbol)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(symbols, vec!["<<", ">>", ">=", "=="]);
    }

    #[test]
    fn header_after_include() {
        let tokens = tokenize("#include <iostream>").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token {
                    category: TokenCategory::ReservedWord,
                    text: "#include".to_string(),
                },
                Token {
                    category: TokenCategory::Header,
                    text: "<iostream>".to_string(),
                },
            ]
        );
    }

    #[test]
    fn string_literal() {
        let tokens = tokenize("cout << \"sum=\" ;").unwrap();
        assert_eq!(tokens[2].category, TokenCategory::String);
        assert_eq!(tokens[2].text, "sum=");
    }

    #[test]
    fn parse_type_contract() {
        let tokens = tokenize("while x 10 0 \"s\"").unwrap();
        let types: Vec<&str> = tokens.iter().map(|t| t.parse_type()).collect();
        assert_eq!(types, vec!["while", "IDENTIFIER", "NUMBER", "0", "STRING"]);
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            tokenize("cout << \"oops"),
            Err(LexError::UnterminatedString(8))
        );
    }

    #[test]
    fn unexpected_character() {
        assert_eq!(tokenize("int @"), Err(LexError::UnexpectedChar('@', 4)));
    }
}

#[cfg(test)]
mod token_table_tests {
    use crate::lexer::tokenize;
    use crate::token_table::TokenTable;

    #[test]
    fn orders_and_deduplicates() {
        let tokens = tokenize("int s = 0 ; int t = \"x\" ;").unwrap();
        let mut table = TokenTable::new();
        for token in &tokens {
            table.add_token(token);
        }

        let rows = table.generate_table();
        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|e| (e.category, e.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("STRING", "x"),
                ("NUMBER", "0"),
                ("SYMBOL", ";"),
                ("SYMBOL", "="),
                ("IDENTIFIER", "s"),
                ("IDENTIFIER", "t"),
                ("RESERVEDWORD", "int"),
            ]
        );
    }

    #[test]
    fn additive_hash() {
        let tokens = tokenize("int").unwrap();
        let mut table = TokenTable::new();
        table.add_token(&tokens[0]);
        let rows = table.generate_table();
        // 'i' + 'n' + 't' = 105 + 110 + 116
        assert_eq!(rows[0].hash, 331);
    }
}
