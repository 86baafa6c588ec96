//! Lexer for the Baiko language.
//!
//! A single left-to-right pass over the source, producing positioned tokens
//! terminated by an EOF token. `#` starts a comment running to end of line.

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::{Pos, Syntax};
use crate::diagnostics::BaikoError;

/// Tokenize a source string with a freshly built syntax table.
pub fn lex(source: &str) -> Result<Vec<Token>, BaikoError> {
    let syntax = Syntax::new();
    Lexer::new(source, &syntax).tokenize()
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    syntax: &'a Syntax,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &str, syntax: &'a Syntax) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            syntax,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, BaikoError> {
        let mut tokens = Vec::new();

        while self.pos < self.chars.len() {
            self.skip_whitespace_and_comments();
            if self.pos >= self.chars.len() {
                break;
            }
            tokens.push(self.next_token()?);
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            pos: Pos::new(self.line, self.column),
        });
        tracing::debug!(tokens = tokens.len(), "lexing finished");
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, BaikoError> {
        let ch = self.chars[self.pos];
        let pos = Pos::new(self.line, self.column);

        if ch.is_ascii_digit() {
            return Ok(self.read_number(pos));
        }
        if ch == '"' {
            return self.read_string(pos);
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            return Ok(self.read_word(pos));
        }

        // Two-character operators take precedence over their prefixes.
        if let Some(&next) = self.chars.get(self.pos + 1) {
            let kind = match (ch, next) {
                ('=', '=') => Some(TokenKind::EqualEqual),
                ('!', '=') => Some(TokenKind::BangEqual),
                ('<', '=') => Some(TokenKind::LessEqual),
                ('>', '=') => Some(TokenKind::GreaterEqual),
                _ => None,
            };
            if let Some(kind) = kind {
                self.pos += 2;
                self.column += 2;
                return Ok(Token {
                    kind,
                    text: format!("{ch}{next}"),
                    pos,
                });
            }
        }

        let kind = match ch {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '=' => Some(TokenKind::Equal),
            '<' => Some(TokenKind::Less),
            '>' => Some(TokenKind::Greater),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semicolon),
            '.' => Some(TokenKind::Dot),
            _ => None,
        };

        match kind {
            Some(kind) => {
                self.advance();
                Ok(Token {
                    kind,
                    text: ch.to_string(),
                    pos,
                })
            }
            None => Err(BaikoError::UnexpectedChar { ch, pos }),
        }
    }

    fn read_number(&mut self, pos: Pos) -> Token {
        let mut text = String::new();
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            text.push(self.advance());
        }
        if self.chars.get(self.pos) == Some(&'.')
            && self
                .chars
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit())
        {
            text.push(self.advance());
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                text.push(self.advance());
            }
        }
        Token {
            kind: TokenKind::Number,
            text,
            pos,
        }
    }

    fn read_string(&mut self, pos: Pos) -> Result<Token, BaikoError> {
        self.advance(); // opening quote
        let mut text = String::new();
        while self.pos < self.chars.len() && self.chars[self.pos] != '"' {
            if self.chars[self.pos] == '\\' {
                self.advance();
                if self.pos >= self.chars.len() {
                    break;
                }
                let esc = self.advance();
                text.push(match esc {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            } else {
                text.push(self.advance());
            }
        }
        if self.pos >= self.chars.len() {
            return Err(BaikoError::UnterminatedString { pos });
        }
        self.advance(); // closing quote
        Ok(Token {
            kind: TokenKind::Str,
            text,
            pos,
        })
    }

    fn read_word(&mut self, pos: Pos) -> Token {
        let mut text = String::new();
        while self.pos < self.chars.len()
            && (self.chars[self.pos].is_ascii_alphanumeric() || self.chars[self.pos] == '_')
        {
            text.push(self.advance());
        }
        let kind = self.syntax.keyword(&text).unwrap_or(TokenKind::Identifier);
        Token { kind, text, pos }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.chars.len() {
            let ch = self.chars[self.pos];

            if ch.is_whitespace() {
                if ch == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
                self.pos += 1;
                continue;
            }

            if ch == '#' {
                while self.pos < self.chars.len() && self.chars[self.pos] != '\n' {
                    self.pos += 1;
                    self.column += 1;
                }
                continue;
            }

            break;
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        self.column += 1;
        ch
    }
}
