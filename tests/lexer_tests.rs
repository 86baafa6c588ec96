use pretty_assertions::assert_eq;

use baiko::common::Pos;
use baiko::lexer::{TokenKind, lex};

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src)
        .expect("lexing should succeed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn first(src: &str) -> (TokenKind, String) {
    let tok = lex(src).expect("lexing should succeed").remove(0);
    (tok.kind, tok.text)
}

#[test]
fn integer_literal() {
    assert_eq!(first("42"), (TokenKind::Number, "42".to_string()));
}

#[test]
fn decimal_literal() {
    assert_eq!(first("3.14"), (TokenKind::Number, "3.14".to_string()));
}

#[test]
fn string_literal() {
    assert_eq!(first("\"Salama\""), (TokenKind::Str, "Salama".to_string()));
}

#[test]
fn string_escapes() {
    assert_eq!(first("\"a\\nb\""), (TokenKind::Str, "a\nb".to_string()));
    assert_eq!(first("\"a\\tb\""), (TokenKind::Str, "a\tb".to_string()));
    assert_eq!(first("\"a\\\"b\""), (TokenKind::Str, "a\"b".to_string()));
}

#[test]
fn boolean_literals() {
    assert_eq!(first("marina").0, TokenKind::True);
    assert_eq!(first("diso").0, TokenKind::False);
}

#[test]
fn null_literal() {
    assert_eq!(first("tsisy").0, TokenKind::Tsisy);
}

#[test]
fn keywords() {
    let cases = [
        ("asa", TokenKind::Asa),
        ("raha", TokenKind::Raha),
        ("ankoatra", TokenKind::Ankoatra),
        ("avereno", TokenKind::Avereno),
        ("mamoaka", TokenKind::Mamoaka),
        ("dia", TokenKind::Dia),
        ("farany", TokenKind::Farany),
        ("asehoy", TokenKind::Asehoy),
        ("ampidiro", TokenKind::Ampidiro),
        ("avoaka", TokenKind::Avoaka),
        ("andrasana", TokenKind::Andrasana),
        ("miandry", TokenKind::Miandry),
        ("ary", TokenKind::And),
        ("na", TokenKind::Or),
        ("tsy", TokenKind::Not),
        ("Isa", TokenKind::Isa),
        ("Soratra", TokenKind::Soratra),
        ("Marina", TokenKind::Marina),
        ("Mety", TokenKind::Mety),
        ("Lisitra", TokenKind::Lisitra),
    ];
    for (src, expected) in cases {
        assert_eq!(first(src).0, expected, "keyword {src}");
    }
}

#[test]
fn keywords_are_case_sensitive() {
    assert_eq!(first("isa").0, TokenKind::Identifier);
    assert_eq!(first("Asa").0, TokenKind::Identifier);
}

#[test]
fn arithmetic_operators() {
    assert_eq!(
        kinds("+ - * /"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comparison_operators() {
    assert_eq!(
        kinds("== != < <= > >="),
        vec![
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn assignment_is_a_single_equal() {
    assert_eq!(first("=").0, TokenKind::Equal);
}

#[test]
fn punctuation() {
    assert_eq!(
        kinds("( ) [ ] : , ; ."),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("# fanamarihana\n42"),
        vec![TokenKind::Number, TokenKind::Eof]
    );
}

#[test]
fn whitespace_is_skipped() {
    assert_eq!(kinds("  42  \n  "), vec![TokenKind::Number, TokenKind::Eof]);
}

#[test]
fn simple_identifier() {
    assert_eq!(
        first("kaonty"),
        (TokenKind::Identifier, "kaonty".to_string())
    );
}

#[test]
fn identifier_with_underscore_is_not_split_on_keyword_prefix() {
    assert_eq!(
        first("tsy_voky"),
        (TokenKind::Identifier, "tsy_voky".to_string())
    );
}

#[test]
fn positions_are_one_based_line_and_column() {
    let tokens = lex("x\n  y").expect("lexing should succeed");
    assert_eq!(tokens[0].pos, Pos::new(1, 1));
    assert_eq!(tokens[1].pos, Pos::new(2, 3));
}

#[test]
fn trailing_comment_still_advances_the_eof_column() {
    let tokens = lex("x # teny").expect("lexing should succeed");
    let eof = tokens.last().expect("token stream ends with EOF");
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.pos, Pos::new(1, 9));
}

#[test]
fn unexpected_character() {
    let err = lex("@").unwrap_err().to_string();
    assert!(err.contains("'@'"), "got: {err}");
    assert!(err.contains("(andalana 1, toerana 1)"), "got: {err}");
}

#[test]
fn unterminated_string() {
    let err = lex("\"misokatra").unwrap_err().to_string();
    assert!(err.contains("Tsy mikatona"), "got: {err}");
}

#[test]
fn number_dot_without_digit_is_a_member_access() {
    assert_eq!(
        kinds("1.x"),
        vec![
            TokenKind::Number,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}
