use super::*;
use crate::ast::Quote;

fn tokens_of(input: &str, dialect: Dialect) -> Vec<Token> {
    Lexer::tokenize(input, dialect)
        .expect("Failed to tokenize")
        .into_iter()
        .map(|s| s.token)
        .collect()
}

fn int(value: i64, raw: &str) -> Token {
    Token::Int(IntLit {
        value,
        raw: raw.into(),
        clamped: false,
    })
}

fn double(value: f64, raw: &str) -> Token {
    Token::Double(DoubleLit {
        value,
        raw: raw.into(),
    })
}

fn string(text: &str, quote: Quote) -> Token {
    Token::Str(StrLit {
        text: text.into(),
        quote,
    })
}

#[test]
fn test_full_props_example() {
    let input = r#"
StaticMesh = StaticMesh'/Game/SM_Rock.SM_Rock'
Materials[2] =
{
    Material0 = MaterialInstanceConstant'/Game/MI_A.MI_A',
}
TwoSided = true
"#;

    let expected_tokens = vec![
        Token::Ident("StaticMesh".into()),
        Token::Equals,
        Token::Ident("StaticMesh".into()),
        string("/Game/SM_Rock.SM_Rock", Quote::Single),
        Token::Ident("Materials".into()),
        Token::LBracket,
        int(2, "2"),
        Token::RBracket,
        Token::Equals,
        Token::LBrace,
        Token::Ident("Material0".into()),
        Token::Equals,
        Token::Ident("MaterialInstanceConstant".into()),
        string("/Game/MI_A.MI_A", Quote::Single),
        Token::Comma,
        Token::RBrace,
        Token::Ident("TwoSided".into()),
        Token::Equals,
        Token::Bool(true),
        Token::Eof,
    ];

    assert_eq!(tokens_of(input, Dialect::modern()), expected_tokens);
}

#[test]
fn test_numeric_literals() {
    let input = "42 -17 +5 0x1F 0b101 1.5 -2.5e3";

    let expected_tokens = vec![
        int(42, "42"),
        int(-17, "-17"),
        int(5, "+5"),
        int(31, "0x1F"),
        int(5, "0b101"),
        double(1.5, "1.5"),
        double(-2500.0, "-2.5e3"),
        Token::Eof,
    ];

    assert_eq!(tokens_of(input, Dialect::modern()), expected_tokens);
}

#[test]
fn test_clamped_literal_keeps_raw_text() {
    let tokens = tokens_of("18446744073709551615", Dialect::modern());
    match &tokens[0] {
        Token::Int(lit) => {
            assert_eq!(lit.value, i64::MAX);
            assert!(lit.clamped);
            assert_eq!(lit.raw, "18446744073709551615");
        }
        other => panic!("Expected int token, got {:?}", other),
    }
}

#[test]
fn test_quote_kind_is_preserved() {
    let tokens = tokens_of(r#"'single' "double""#, Dialect::modern());
    assert_eq!(tokens[0], string("single", Quote::Single));
    assert_eq!(tokens[1], string("double", Quote::Double));
}

#[test]
fn test_strings_have_no_escapes() {
    // A backslash is an ordinary character; the quote always closes.
    let tokens = tokens_of(r#""C:\Temp\x""#, Dialect::modern());
    assert_eq!(tokens[0], string(r"C:\Temp\x", Quote::Double));
}

#[test]
fn test_unclosed_string_error() {
    let result = Lexer::tokenize("Name = \"oops", Dialect::modern());
    assert!(matches!(
        result,
        Err(PropsError::UnclosedString { quote: '"', .. })
    ));
}

#[test]
fn test_booleans_are_whole_words() {
    let tokens = tokens_of("true false truex falsey", Dialect::modern());
    assert_eq!(
        tokens,
        vec![
            Token::Bool(true),
            Token::Bool(false),
            Token::Ident("truex".into()),
            Token::Ident("falsey".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_legacy_identifiers_allow_spaces_and_slashes() {
    let tokens = tokens_of("Parameter Info = Engine/Default", Dialect::legacy());
    assert_eq!(
        tokens,
        vec![
            Token::Ident("Parameter Info".into()),
            Token::Equals,
            Token::Ident("Engine/Default".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_legacy_digit_led_identifier() {
    // `123abc` is one legacy identifier, not a number followed by a name.
    let tokens = tokens_of("123abc", Dialect::legacy());
    assert_eq!(tokens[0], Token::Ident("123abc".into()));
}

#[test]
fn test_modern_bare_string_fallback() {
    // '@' starts no terminal, so the run to the delimiter becomes a word.
    let tokens = tokens_of("@tag value, 1", Dialect::modern());
    assert_eq!(
        tokens,
        vec![
            Token::Word("@tag value".into()),
            Token::Comma,
            int(1, "1"),
            Token::Eof,
        ]
    );
}

#[test]
fn test_legacy_rejects_unknown_characters() {
    let result = Lexer::tokenize("X = !", Dialect::legacy());
    assert!(matches!(
        result,
        Err(PropsError::UnexpectedCharacter { character: '!', .. })
    ));
}

#[test]
fn test_line_comments_are_skipped() {
    let input = "A = 1 // trailing note\n// full line\nB = 2";
    let tokens = tokens_of(input, Dialect::modern());
    assert_eq!(
        tokens,
        vec![
            Token::Ident("A".into()),
            Token::Equals,
            int(1, "1"),
            Token::Ident("B".into()),
            Token::Equals,
            int(2, "2"),
            Token::Eof,
        ]
    );
}

#[test]
fn test_comments_can_be_disabled() {
    let dialect = Dialect {
        line_comments: false,
        ..Dialect::modern()
    };
    let tokens = tokens_of("// not a comment", dialect);
    assert_eq!(tokens[0], Token::Word("// not a comment".into()));
}

#[test]
fn test_spans_track_lines() {
    let spanned = Lexer::tokenize("A = 1\nB = 2", Dialect::modern()).unwrap();
    assert_eq!(spanned[0].span.line, 1);
    assert_eq!(spanned[3].span.line, 2);
    assert_eq!(spanned[3].span.column, 1);
}
