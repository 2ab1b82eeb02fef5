use super::*;
use crate::ast::{PathValue, Quote, Value};

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, PropsError> {
    if parser.peek() == &Token::LBrace {
        return lookahead::parse_braced_value(parser);
    }

    // `IDENT` immediately followed by a single-quoted string is a path
    // reference; a lone `IDENT` is a bare constant.
    if matches!(parser.peek(), Token::Ident(_)) {
        if let Token::Str(s) = parser.peek_at(1) {
            if s.quote == Quote::Single {
                return parse_path(parser);
            }
        }
    }

    parse_scalar_value(parser)
}

fn parse_path(parser: &mut Parser) -> Result<Value, PropsError> {
    let class = match parser.bump().token {
        Token::Ident(class) => class,
        _ => unreachable!(),
    };
    let target = match parser.bump().token {
        Token::Str(lit) => lit.text,
        _ => unreachable!(),
    };
    Ok(Value::Path(PathValue { class, target }))
}

fn parse_scalar_value(parser: &mut Parser) -> Result<Value, PropsError> {
    let start = parser.span();
    let scalar = parse_const(parser, start)?;

    // A scalar value runs to the end of its line unless a delimiter cuts
    // it short. More tokens on the same line mean the "value" was really a
    // longer free-form run, which only the modern dialect can absorb.
    match parser.peek() {
        Token::Comma | Token::RBrace | Token::Eof => Ok(Value::Scalar(scalar)),
        _ if parser.span().line > start.line => Ok(Value::Scalar(scalar)),
        _ if parser.dialect().bare_strings => Ok(Value::Scalar(parser.reread_as_word(start))),
        tok => Err(PropsError::InvalidToken {
            token: format!("{:?}", tok),
            line: parser.span().line,
            column: parser.span().column,
            hint: Some("Expected ',' or end of line after value".into()),
            code: Some(210),
        }),
    }
}

/// One `const`: literal, quoted string, call, or bare identifier. When a
/// token run matches none of these, the modern dialect reinterprets the
/// run from `start` as one unescaped string; the legacy dialect has no
/// such fallback and reports the token.
pub(super) fn parse_const(parser: &mut Parser, start: Span) -> Result<Scalar, PropsError> {
    match parser.peek() {
        Token::Int(_) | Token::Double(_) | Token::Bool(_) | Token::Str(_) | Token::Word(_) => {
            let scalar = match parser.bump().token {
                Token::Int(lit) => Scalar::Int(lit),
                Token::Double(lit) => Scalar::Double(lit),
                Token::Bool(b) => Scalar::Bool(b),
                Token::Str(lit) => Scalar::Str(lit),
                Token::Word(w) => Scalar::Word(w),
                _ => unreachable!(),
            };
            Ok(scalar)
        }
        Token::Ident(_) => {
            if parser.peek_at(1) == &Token::LParen {
                parse_call(parser, start)
            } else {
                match parser.bump().token {
                    Token::Ident(name) => Ok(Scalar::Word(name)),
                    _ => unreachable!(),
                }
            }
        }
        tok => {
            if parser.dialect().bare_strings {
                Ok(parser.reread_as_word(start))
            } else {
                Err(PropsError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.span().line,
                    column: parser.span().column,
                    hint: Some("Expected a constant".into()),
                    code: Some(210),
                })
            }
        }
    }
}

/// `IDENT "(" literal ")"`, e.g. `BLEND_Masked (1)`. If the parenthesized
/// run is not a single numeric or boolean literal the attempt is rolled
/// back and the whole run is reinterpreted as one unescaped string
/// (modern dialect) or rejected (legacy).
fn parse_call(parser: &mut Parser, start: Span) -> Result<Scalar, PropsError> {
    let save = parser.pos();

    let name = match parser.bump().token {
        Token::Ident(name) => name,
        _ => unreachable!(),
    };
    parser.bump(); // consume (

    let arg = match parser.bump().token {
        Token::Int(lit) => Some(Scalar::Int(lit)),
        Token::Double(lit) => Some(Scalar::Double(lit)),
        Token::Bool(b) => Some(Scalar::Bool(b)),
        _ => None,
    };

    if let Some(arg) = arg {
        if parser.peek() == &Token::RParen {
            parser.bump(); // consume )
            return Ok(Scalar::Call { name, arg: Box::new(arg) });
        }
    }

    parser.rewind(save);
    if parser.dialect().bare_strings {
        Ok(parser.reread_as_word(start))
    } else {
        Err(PropsError::SyntaxError {
            message: "Expected a numeric or boolean literal in parentheses".into(),
            line: start.line,
            column: start.column,
            hint: Some("Call-shaped constants look like BLEND_Masked (1)".into()),
            code: Some(209),
        })
    }
}
