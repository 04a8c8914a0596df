pub mod grammar;
pub mod lexer;
pub mod minicpp;
pub mod token_table;

pub use grammar::Grammar;

use std::{fs, io::BufRead};

use grammar::predictive_parser::PredictiveParser;
use token_table::TokenTable;

fn print_help() {
    println!("Usage: ll1-predictive-parser outputs [options] [source file]");
    println!("outputs:");
    println!("  tokens: Token stream of the source");
    println!("  table: Token classification table of the source");
    println!("  prod: Grammar productions");
    println!("  nff: Nullable first and follow");
    println!("  ll1: LL(1) parsing table");
    println!("  trace: Productions applied while parsing the source");
    println!("  tree: Parse tree of the source");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
}

fn main() {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len()
        && ["tokens", "table", "prod", "nff", "ll1", "trace", "tree"].contains(&args[i].as_str())
    {
        outputs.push(args[i].as_str());
        i += 1;
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        JSON,
    }
    let mut output_format = OutputFormat::Plain;

    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let needs_source = outputs
        .iter()
        .any(|o| ["tokens", "table", "trace", "tree"].contains(o));

    let source: String = if !needs_source {
        String::new()
    } else if i == args.len() {
        std::io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        fs::read_to_string(args[i].as_str()).expect("Failed to read file")
    };

    let mut g = minicpp::grammar().expect("built-in grammar is well-formed");
    let table = g.build_parse_table();

    let tokens = if needs_source {
        match lexer::tokenize(&source) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        Vec::new()
    };

    let needs_parse = outputs.iter().any(|o| ["trace", "tree"].contains(o));
    let trace = if needs_parse {
        let types: Vec<&str> = tokens.iter().map(|t| t.parse_type()).collect();
        let parser = PredictiveParser::new(&g, &table);
        match parser.parse(&types) {
            Ok(trace) => trace,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        Vec::new()
    };

    for output in outputs {
        if output == "tokens" {
            match output_format {
                OutputFormat::JSON => {
                    println!("{}", serde_json::to_string(&tokens).unwrap())
                }
                _ => {
                    for token in &tokens {
                        println!("{:<12} {}", token.category.label(), token.text);
                    }
                }
            }
        }
        if output == "table" {
            let mut t = TokenTable::new();
            for token in &tokens {
                t.add_token(token);
            }
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => serde_json::to_string(&t.generate_table()).unwrap(),
                }
            );
        }
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "nff" {
            let t = g.to_non_terminal_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "ll1" {
            let t = g.to_parse_table_output(&table);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "trace" {
            let t = g.to_trace_output_vec(&trace);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "tree" {
            let tree = g
                .build_parse_tree(&trace)
                .expect("trace from this parse rebuilds its tree");
            println!(
                "{}",
                match output_format {
                    OutputFormat::JSON => serde_json::to_string(&tree).unwrap(),
                    _ => tree.to_plaintext(),
                }
            );
        }
    }
}
