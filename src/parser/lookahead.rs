use super::*;
use crate::ast::Value;

/// A `{` in value position is ambiguous between three shapes. Single-token
/// lookahead cannot tell them apart (a nested empty list looks like a
/// block opener), so the shape is committed by scanning tokens past the
/// brace before anything is consumed.
enum BraceShape {
    Block,
    ConstList,
    EmptyList,
}

pub(super) fn parse_braced_value(parser: &mut Parser) -> Result<Value, PropsError> {
    let open_span = parser.span();
    parser.enter_block(open_span)?;

    let value = match classify(parser, open_span)? {
        BraceShape::Block => parse_block(parser, open_span),
        BraceShape::ConstList => parse_const_list(parser, open_span),
        BraceShape::EmptyList => parse_empty_list(parser),
    }?;

    parser.leave_block();
    Ok(value)
}

fn classify(parser: &Parser, open_span: Span) -> Result<BraceShape, PropsError> {
    // Scan past the opening brace. A run of commas can only belong to an
    // empty list, so skip them before looking at the first real token.
    let mut i = 1;
    let mut saw_comma = false;
    loop {
        match parser.peek_at(i) {
            Token::Comma => {
                saw_comma = true;
                i += 1;
            }
            Token::RBrace => {
                if !saw_comma && parser.dialect().min_list_items == 0 {
                    return Ok(BraceShape::ConstList);
                }
                return Ok(BraceShape::EmptyList);
            }
            Token::Eof => {
                return Err(PropsError::UnexpectedEof {
                    message: "Unclosed block or list".into(),
                    line: open_span.line,
                    column: open_span.column,
                    hint: Some("Missing '}'".into()),
                    code: Some(201),
                });
            }
            _ => break,
        }
    }

    if saw_comma {
        return Err(PropsError::SyntaxError {
            message: "List elements cannot start with ','".into(),
            line: open_span.line,
            column: open_span.column,
            hint: Some("Only a brace pair holding nothing but commas may lead with one".into()),
            code: Some(211),
        });
    }

    match parser.peek_at(i) {
        // `Name = ...` or `Name[0] = ...` can only open a definition.
        Token::Ident(_) => match parser.peek_at(i + 1) {
            Token::Equals | Token::LBracket => Ok(BraceShape::Block),
            _ => Ok(BraceShape::ConstList),
        },
        Token::Int(_)
        | Token::Double(_)
        | Token::Bool(_)
        | Token::Str(_)
        | Token::Word(_)
        | Token::LParen => Ok(BraceShape::ConstList),
        tok => Err(PropsError::SyntaxError {
            message: format!("Expected a definition or constant after '{{', got {:?}", tok),
            line: open_span.line,
            column: open_span.column,
            hint: None,
            code: Some(207),
        }),
    }
}

fn parse_block(parser: &mut Parser, open_span: Span) -> Result<Value, PropsError> {
    parser.bump(); // consume {
    let mut defs = Vec::new();

    loop {
        match parser.peek() {
            Token::RBrace => {
                parser.bump();
                break;
            }
            Token::Ident(_) => {
                defs.push(document::parse_definition(parser)?);
            }
            Token::Eof => {
                return Err(PropsError::UnexpectedEof {
                    message: "Unclosed block".into(),
                    line: open_span.line,
                    column: open_span.column,
                    hint: Some("Missing '}'".into()),
                    code: Some(201),
                });
            }
            tok => {
                return Err(PropsError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.span().line,
                    column: parser.span().column,
                    hint: Some("Expected a definition or '}'".into()),
                    code: Some(207),
                });
            }
        }
    }

    Ok(Value::Block(defs))
}

fn parse_const_list(parser: &mut Parser, open_span: Span) -> Result<Value, PropsError> {
    parser.bump(); // consume {
    let mut items = Vec::new();

    loop {
        match parser.peek() {
            Token::RBrace => {
                let span = parser.span();
                parser.bump();
                if items.is_empty() && parser.dialect().min_list_items > 0 {
                    return Err(ambiguity(
                        "Lookahead committed to a const list but found no elements",
                        span,
                    ));
                }
                break;
            }
            Token::Eof => {
                return Err(PropsError::UnexpectedEof {
                    message: "Unclosed list".into(),
                    line: open_span.line,
                    column: open_span.column,
                    hint: Some("Missing '}'".into()),
                    code: Some(201),
                });
            }
            _ => {
                let start = parser.span();
                let mut scalar = value::parse_const(parser, start)?;

                // Elements are delimited by ',' or the closing brace. A
                // longer same-line run folds into one unescaped string in
                // the modern dialect, same as in value position.
                if !matches!(parser.peek(), Token::Comma | Token::RBrace)
                    && parser.dialect().bare_strings
                    && parser.span().line == start.line
                {
                    scalar = parser.reread_as_word(start);
                }

                match parser.peek() {
                    Token::Comma => {
                        parser.bump();
                    }
                    Token::RBrace => {}
                    Token::Eof => {
                        return Err(PropsError::UnexpectedEof {
                            message: "Unclosed list".into(),
                            line: open_span.line,
                            column: open_span.column,
                            hint: Some("Missing '}'".into()),
                            code: Some(201),
                        });
                    }
                    tok => {
                        return Err(PropsError::InvalidToken {
                            token: format!("{:?}", tok),
                            line: parser.span().line,
                            column: parser.span().column,
                            hint: Some("Expected ',' or '}' after list element".into()),
                            code: Some(208),
                        });
                    }
                }

                items.push(scalar);
            }
        }
    }

    Ok(Value::List(items))
}

fn parse_empty_list(parser: &mut Parser) -> Result<Value, PropsError> {
    parser.bump(); // consume {

    loop {
        let spanned = parser.bump();
        match spanned.token {
            Token::Comma => continue,
            Token::RBrace => break,
            tok => {
                return Err(ambiguity(
                    &format!("Lookahead committed to an empty list but found {:?}", tok),
                    spanned.span,
                ));
            }
        }
    }

    Ok(Value::EmptyList)
}

fn ambiguity(message: &str, span: Span) -> PropsError {
    PropsError::AmbiguityError {
        message: message.to_string(),
        line: span.line,
        column: span.column,
        hint: Some("This is a bug in the brace-shape classifier, please report it".into()),
        code: Some(212),
    }
}
