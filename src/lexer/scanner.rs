use super::*;

/// Advance the character iterator and update line/column/offset tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
        lexer.offset += c.len_utf8();
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Peek one character past the current one without consuming anything
pub(super) fn second_char(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Skip whitespace (newlines included, they are not significant in this
/// format) and `//` line comments when the dialect allows them
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                bump(lexer);
            }
            '/' if lexer.dialect.line_comments && second_char(lexer) == Some('/') => {
                while let Some(ch) = bump(lexer) {
                    if ch == '\n' {
                        break;
                    }
                }
            }
            _ => break,
        }
    }
}
