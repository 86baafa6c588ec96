//! Token definitions for the Baiko lexer.

use serde::Serialize;

use crate::common::Pos;

/// A token with its kind, verbatim text, and source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

/// Token kinds recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Literals
    Number,
    Str,
    Identifier,

    // Keywords
    Asa,
    Raha,
    Ankoatra,
    Mamoaka,
    Dia,
    Farany,
    Asehoy,
    Avereno,
    Ampidiro,
    Avoaka,
    Andrasana,
    Miandry,

    // Literal keywords
    True,
    False,
    Tsisy,

    // Logical operators
    And,
    Or,
    Not,

    // Type names
    Isa,
    Soratra,
    Marina,
    Mety,
    Lisitra,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Semicolon,
    Dot,

    Eof,
}

impl TokenKind {
    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Asa
                | TokenKind::Raha
                | TokenKind::Ankoatra
                | TokenKind::Mamoaka
                | TokenKind::Dia
                | TokenKind::Farany
                | TokenKind::Asehoy
                | TokenKind::Avereno
                | TokenKind::Ampidiro
                | TokenKind::Avoaka
                | TokenKind::Andrasana
                | TokenKind::Miandry
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Tsisy
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Isa
                | TokenKind::Soratra
                | TokenKind::Marina
                | TokenKind::Mety
                | TokenKind::Lisitra
        )
    }

    /// Get the string representation of the token.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Number => "<isa>",
            TokenKind::Str => "<soratra>",
            TokenKind::Identifier => "<anarana>",
            TokenKind::Asa => "asa",
            TokenKind::Raha => "raha",
            TokenKind::Ankoatra => "ankoatra",
            TokenKind::Mamoaka => "mamoaka",
            TokenKind::Dia => "dia",
            TokenKind::Farany => "farany",
            TokenKind::Asehoy => "asehoy",
            TokenKind::Avereno => "avereno",
            TokenKind::Ampidiro => "ampidiro",
            TokenKind::Avoaka => "avoaka",
            TokenKind::Andrasana => "andrasana",
            TokenKind::Miandry => "miandry",
            TokenKind::True => "marina",
            TokenKind::False => "diso",
            TokenKind::Tsisy => "tsisy",
            TokenKind::And => "ary",
            TokenKind::Or => "na",
            TokenKind::Not => "tsy",
            TokenKind::Isa => "Isa",
            TokenKind::Soratra => "Soratra",
            TokenKind::Marina => "Marina",
            TokenKind::Mety => "Mety",
            TokenKind::Lisitra => "Lisitra",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Equal => "=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Eof => "<eof>",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
