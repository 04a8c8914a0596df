use serde::Serialize;
use thiserror::Error;

/// Word lexemes that are never identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "#include",
    "break",
    "cin",
    "continue",
    "cout",
    "float",
    "if",
    "include",
    "int",
    "iostream",
    "main",
    "namespace",
    "return",
    "std",
    "using",
    "void",
    "while",
];

const TWO_CHAR_SYMBOLS: &[&str] = &["==", "!=", ">=", "<=", ">>", "<<", "||", "&&"];
const ONE_CHAR_SYMBOLS: &str = "(){}[],;+-*/=";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {0:?} at byte {1}")]
    UnexpectedChar(char, usize),
    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),
    #[error("unterminated header name starting at byte {0}")]
    UnterminatedHeader(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenCategory {
    String,
    Number,
    Symbol,
    Identifier,
    ReservedWord,
    Header,
}

impl TokenCategory {
    /// Classification order of the token table.
    pub const ORDER: [TokenCategory; 6] = [
        TokenCategory::String,
        TokenCategory::Number,
        TokenCategory::Symbol,
        TokenCategory::Identifier,
        TokenCategory::ReservedWord,
        TokenCategory::Header,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TokenCategory::String => "STRING",
            TokenCategory::Number => "NUMBER",
            TokenCategory::Symbol => "SYMBOL",
            TokenCategory::Identifier => "IDENTIFIER",
            TokenCategory::ReservedWord => "RESERVEDWORD",
            TokenCategory::Header => "HEADER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub category: TokenCategory,
    pub text: String,
}

impl Token {
    /// The token type the parser matches against grammar terminals: the
    /// lexeme itself for reserved words and symbols, the category name for
    /// the open-ended categories. The literal `0` is a named terminal of the
    /// grammar and keeps its own type.
    pub fn parse_type(&self) -> &str {
        match self.category {
            TokenCategory::ReservedWord | TokenCategory::Symbol => self.text.as_str(),
            TokenCategory::Number => {
                if self.text == "0" {
                    "0"
                } else {
                    "NUMBER"
                }
            }
            TokenCategory::Identifier => "IDENTIFIER",
            TokenCategory::String => "STRING",
            TokenCategory::Header => "HEADER",
        }
    }
}

/// Splits source text into tokens: reserved words and identifiers, integer
/// literals, double-quoted strings, one- and two-character symbols (longest
/// match), and a `<...>` header name directly after `#include`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut expect_header = false;

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if expect_header && c == '<' {
            chars.next();
            let mut text = String::from('<');
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                text.push(c);
                if c == '>' {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(LexError::UnterminatedHeader(pos));
            }
            tokens.push(Token {
                category: TokenCategory::Header,
                text,
            });
            expect_header = false;
            continue;
        }
        expect_header = false;

        if c == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                text.push(c);
            }
            if !closed {
                return Err(LexError::UnterminatedString(pos));
            }
            tokens.push(Token {
                category: TokenCategory::String,
                text,
            });
            continue;
        }

        if c.is_ascii_digit() {
            let mut text = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                text.push(c);
                chars.next();
            }
            tokens.push(Token {
                category: TokenCategory::Number,
                text,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' || c == '#' {
            let mut text = String::new();
            if c == '#' {
                text.push(c);
                chars.next();
            }
            while let Some(&(_, c)) = chars.peek() {
                if !(c.is_ascii_alphanumeric() || c == '_') {
                    break;
                }
                text.push(c);
                chars.next();
            }
            if text == "#" {
                return Err(LexError::UnexpectedChar('#', pos));
            }
            let category = if RESERVED_WORDS.contains(&text.as_str()) {
                TokenCategory::ReservedWord
            } else {
                TokenCategory::Identifier
            };
            expect_header = text == "#include";
            tokens.push(Token { category, text });
            continue;
        }

        chars.next();
        if let Some(&(_, next)) = chars.peek() {
            let pair: String = [c, next].iter().collect();
            if TWO_CHAR_SYMBOLS.contains(&pair.as_str()) {
                chars.next();
                tokens.push(Token {
                    category: TokenCategory::Symbol,
                    text: pair,
                });
                continue;
            }
        }
        if ONE_CHAR_SYMBOLS.contains(c) {
            tokens.push(Token {
                category: TokenCategory::Symbol,
                text: c.to_string(),
            });
            continue;
        }
        return Err(LexError::UnexpectedChar(c, pos));
    }

    Ok(tokens)
}
