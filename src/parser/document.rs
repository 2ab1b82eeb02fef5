use super::*;
use crate::ast::Definition;

pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, PropsError> {
    let mut defs = Vec::new();

    loop {
        match parser.peek() {
            Token::Eof => break,
            Token::Ident(_) => {
                defs.push(parse_definition(parser)?);
            }
            tok => {
                return Err(PropsError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.span().line,
                    column: parser.span().column,
                    hint: Some("Expected a property definition at top level".into()),
                    code: Some(205),
                });
            }
        }
    }

    Ok(Document { defs })
}

/// `IDENT ["[" INT "]"] "=" value [","]`. The trailing comma is optional
/// everywhere and never changes the parse.
pub(super) fn parse_definition(parser: &mut Parser) -> Result<Definition, PropsError> {
    let spanned = parser.bump();
    let name = match spanned.token {
        Token::Ident(name) => name,
        tok => {
            return Err(PropsError::SyntaxError {
                message: format!("Expected property name, got {:?}", tok),
                line: spanned.span.line,
                column: spanned.span.column,
                hint: None,
                code: Some(203),
            });
        }
    };

    let index = if parser.peek() == &Token::LBracket {
        Some(parse_index(parser)?)
    } else {
        None
    };

    parser.expect(Token::Equals)?;

    let value = value::parse_value(parser)?;

    if parser.peek() == &Token::Comma {
        parser.bump();
    }

    Ok(Definition { name, index, value })
}

/// Array-slot qualifier, `[3]`. Indices are kept verbatim as the declared
/// slot number; a value that cannot be a slot number is rejected here
/// rather than clamped, since a mangled index silently corrupts the
/// array reconstruction downstream.
fn parse_index(parser: &mut Parser) -> Result<u32, PropsError> {
    parser.bump(); // consume [

    let spanned = parser.bump();
    let lit = match spanned.token {
        Token::Int(lit) => lit,
        tok => {
            return Err(PropsError::SyntaxError {
                message: format!("Expected array index, got {:?}", tok),
                line: spanned.span.line,
                column: spanned.span.column,
                hint: Some("Array qualifiers hold a plain integer, e.g. Materials[2]".into()),
                code: Some(206),
            });
        }
    };

    if lit.clamped || lit.value < 0 || lit.value > u32::MAX as i64 {
        return Err(PropsError::SyntaxError {
            message: format!("Array index '{}' out of range", lit.raw),
            line: spanned.span.line,
            column: spanned.span.column,
            hint: Some("Indices are non-negative 32-bit integers".into()),
            code: Some(206),
        });
    }

    parser.expect(Token::RBracket)?;

    Ok(lit.value as u32)
}
