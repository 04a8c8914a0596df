//! The built-in grammar: a miniature C++ subset with declarations,
//! assignment expressions, a `while` loop and `cin`/`cout` statements.

use crate::grammar::grammar::GrammarError;
use crate::Grammar;

/// Token-type terminals are the literal lexemes for keywords and symbols and
/// the category names `IDENTIFIER`, `NUMBER`, `STRING`, `HEADER`; `0` is a
/// terminal of its own so `return 0 ;` is checked literally.
pub const GRAMMAR_TEXT: &str = "\
Start -> S N M
S -> #include HEADER | ε
N -> using namespace std ; | ε
M -> int main ( ) { T V }
T -> Id T | L T | Loop T | Input T | Output T | ε
V -> return 0 ; | ε
Id -> int L | float L
L -> IDENTIFIER Assign Z
Z -> , IDENTIFIER Assign Z | ;
Assign -> = Operation | ε
Operation -> NUMBER P | IDENTIFIER P
P -> O W P | ε
O -> + | - | *
W -> NUMBER | IDENTIFIER
Loop -> while ( Expression ) { T }
Expression -> Operation K Operation
K -> == | >= | <= | !=
Input -> cin >> IDENTIFIER F ;
Output -> cout << C H ;
H -> << C H | ε
C -> STRING | IDENTIFIER | NUMBER
F -> >> IDENTIFIER F | ε
";

/// Lexemes the lexer can produce that no production mentions. They are still
/// part of the terminal alphabet, so an input using them is rejected with a
/// table miss rather than an unknown-symbol complaint.
const UNUSED_TERMINALS: &[&str] = &[
    "void", "if", "continue", "break", "include", "iostream", "/", "[", "]",
];

/// The grammar with nullable/FIRST/FOLLOW already computed.
pub fn grammar() -> Result<Grammar, GrammarError> {
    let mut g = Grammar::parse(GRAMMAR_TEXT)?;
    for terminal in UNUSED_TERMINALS {
        if g.get_symbol_index(terminal).is_none() {
            g.add_terminal(terminal.to_string());
        }
    }
    g.calculate_nullable_first_follow();
    Ok(g)
}
