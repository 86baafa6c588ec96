//! Shared primitives: source positions and the syntax table.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::lexer::TokenKind;

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Pos {
    /// Fixed rendering, parsed by editor tooling. Do not change.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(andalana {}, toerana {})", self.line, self.column)
    }
}

/// Language syntax table: the keyword map and the set of tokens that can
/// open a type annotation. Built once and passed by reference to the
/// lexer and parser.
pub struct Syntax {
    keywords: FxHashMap<&'static str, TokenKind>,
    type_start: [TokenKind; 5],
}

impl Syntax {
    pub fn new() -> Self {
        let keywords = FxHashMap::from_iter([
            ("asa", TokenKind::Asa),
            ("raha", TokenKind::Raha),
            ("ankoatra", TokenKind::Ankoatra),
            ("mamoaka", TokenKind::Mamoaka),
            ("dia", TokenKind::Dia),
            ("farany", TokenKind::Farany),
            ("asehoy", TokenKind::Asehoy),
            ("avereno", TokenKind::Avereno),
            ("ampidiro", TokenKind::Ampidiro),
            ("avoaka", TokenKind::Avoaka),
            ("andrasana", TokenKind::Andrasana),
            ("miandry", TokenKind::Miandry),
            ("marina", TokenKind::True),
            ("diso", TokenKind::False),
            ("tsisy", TokenKind::Tsisy),
            ("ary", TokenKind::And),
            ("na", TokenKind::Or),
            ("tsy", TokenKind::Not),
            ("Isa", TokenKind::Isa),
            ("Soratra", TokenKind::Soratra),
            ("Marina", TokenKind::Marina),
            ("Mety", TokenKind::Mety),
            ("Lisitra", TokenKind::Lisitra),
        ]);
        Self {
            keywords,
            type_start: [
                TokenKind::Isa,
                TokenKind::Soratra,
                TokenKind::Marina,
                TokenKind::Mety,
                TokenKind::Lisitra,
            ],
        }
    }

    /// Look up a word in the keyword table.
    pub fn keyword(&self, word: &str) -> Option<TokenKind> {
        self.keywords.get(word).copied()
    }

    /// Whether a token can start a type annotation.
    pub fn is_type_start(&self, kind: TokenKind) -> bool {
        self.type_start.contains(&kind)
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self::new()
    }
}

/// The binding name for `ampidiro "package:..."`: the last `/` segment with
/// every non-alphanumeric byte replaced by `_`, so `@angular/core` binds
/// `core` and `lodash-es` binds `lodash_es`.
pub fn derived_package_name(id: &str) -> String {
    let last = id.rsplit('/').next().unwrap_or(id);
    last.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
