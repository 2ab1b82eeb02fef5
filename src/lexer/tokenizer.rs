use super::*;
use super::scanner::{bump, second_char, skip_whitespace_and_comments};
use crate::ast::{Quote, Scalar};
use crate::dialect::IdentStyle;
use crate::resolver;

pub(super) fn next_token(lexer: &mut Lexer) -> Result<SpannedToken, PropsError> {
    skip_whitespace_and_comments(lexer);

    let span = Span {
        line: lexer.line,
        column: lexer.column + 1,
        offset: lexer.offset,
    };

    let token = match lexer.peek {
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some('(') => tokenize_symbol(lexer, Token::LParen),
        Some(')') => tokenize_symbol(lexer, Token::RParen),
        Some('=') => tokenize_symbol(lexer, Token::Equals),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some('\'') | Some('"') => tokenize_string(lexer),
        Some('+') | Some('-') if second_char(lexer).is_some_and(|c| c.is_ascii_digit()) => {
            tokenize_number(lexer)
        }
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer),
        Some(c) if lexer.dialect.is_ident_start(c) => tokenize_identifier_or_keyword(lexer),
        Some(_) if lexer.dialect.bare_strings => tokenize_bare_string(lexer),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => Ok(Token::Eof),
    }?;

    Ok(SpannedToken { token, span })
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, PropsError> {
    bump(lexer);
    Ok(token)
}

/// Quoted strings have no escape processing: a quote character always
/// closes the string.
fn tokenize_string(lexer: &mut Lexer) -> Result<Token, PropsError> {
    let quote_char = bump(lexer).unwrap();
    let quote = if quote_char == '\'' { Quote::Single } else { Quote::Double };
    let mut text = String::new();
    let mut closed = false;

    while let Some(ch) = bump(lexer) {
        if ch == quote_char {
            closed = true;
            break;
        }
        text.push(ch);
    }

    if !closed {
        return Err(PropsError::UnclosedString {
            quote: quote_char,
            line: lexer.line,
            column: lexer.column,
            hint: Some("String literal not closed".into()),
            code: Some(103),
        });
    }

    Ok(Token::Str(StrLit { text, quote }))
}

fn tokenize_number(lexer: &mut Lexer) -> Result<Token, PropsError> {
    let mut raw = String::new();

    if matches!(lexer.peek, Some('+') | Some('-')) {
        raw.push(bump(lexer).unwrap());
    }

    if lexer.peek == Some('0') && matches!(second_char(lexer), Some('x' | 'X' | 'b' | 'B')) {
        raw.push(bump(lexer).unwrap());
        raw.push(bump(lexer).unwrap());
        while let Some(ch) = lexer.peek {
            if ch.is_ascii_alphanumeric() {
                raw.push(ch);
                bump(lexer);
            } else {
                break;
            }
        }
    } else {
        consume_digits(lexer, &mut raw);
        if lexer.peek == Some('.') {
            raw.push(bump(lexer).unwrap());
            consume_digits(lexer, &mut raw);
        }
        if matches!(lexer.peek, Some('e') | Some('E')) {
            raw.push(bump(lexer).unwrap());
            if matches!(lexer.peek, Some('+') | Some('-')) {
                raw.push(bump(lexer).unwrap());
            }
            consume_digits(lexer, &mut raw);
        }
    }

    // Legacy identifiers may start with digits; a run like `123abc` is one
    // identifier there, not a number followed by a name. Only plain
    // integer runs can flow into a name - '.', 'e' and radix prefixes are
    // not identifier characters.
    if lexer.dialect.idents == IdentStyle::Legacy
        && raw.chars().all(|c| c.is_ascii_digit() || c == '-')
        && lexer.peek.is_some_and(|c| c.is_alphabetic() || c == '_')
    {
        return tokenize_identifier_continuation(lexer, raw);
    }

    match resolver::resolve_number(&raw, lexer.line, lexer.column)? {
        Scalar::Int(lit) => Ok(Token::Int(lit)),
        Scalar::Double(lit) => Ok(Token::Double(lit)),
        _ => unreachable!(),
    }
}

fn consume_digits(lexer: &mut Lexer, raw: &mut String) {
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            raw.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }
}

fn tokenize_identifier_or_keyword(lexer: &mut Lexer) -> Result<Token, PropsError> {
    tokenize_identifier_continuation(lexer, String::new())
}

fn tokenize_identifier_continuation(
    lexer: &mut Lexer,
    mut ident: String,
) -> Result<Token, PropsError> {
    while let Some(ch) = lexer.peek {
        if lexer.dialect.is_ident_continue(ch) {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    // Legacy identifiers may contain spaces; spaces before the next
    // structural token are not part of the name.
    while ident.ends_with(' ') {
        ident.pop();
    }

    let token = match ident.as_str() {
        "true" => Token::Bool(true),
        "false" => Token::Bool(false),
        _ => Token::Ident(ident),
    };

    Ok(token)
}

/// Catch-all terminal of the modern dialect: any run excluding comma,
/// closing brace and newline. Tried only after every fixed terminal has
/// failed to match at this position.
fn tokenize_bare_string(lexer: &mut Lexer) -> Result<Token, PropsError> {
    let mut text = String::new();

    while let Some(ch) = lexer.peek {
        match ch {
            ',' | '}' | '\n' => break,
            '/' if lexer.dialect.line_comments && second_char(lexer) == Some('/') => break,
            _ => {
                text.push(ch);
                bump(lexer);
            }
        }
    }

    Ok(Token::Word(text.trim_end().to_string()))
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, PropsError> {
    bump(lexer);
    Err(PropsError::UnexpectedCharacter {
        character: ch,
        line: lexer.line,
        column: lexer.column,
        hint: Some("Character matches no terminal of the active dialect".into()),
        code: Some(104),
    })
}
