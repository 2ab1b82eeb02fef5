// License: MIT

use crate::PropsError;
use crate::ast::{Document, Scalar};
use crate::dialect::Dialect;
use crate::lexer::{Lexer, Span, SpannedToken, Token};

mod document;
mod lookahead;
mod value;

/// Default cap on nested brace values. The grammar itself imposes no
/// nesting limit, so adversarially deep input could otherwise exhaust the
/// call stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Recursive-descent parser over a pre-lexed token sequence.
///
/// The whole input is lexed up front so the grammar's ambiguous spots can
/// be resolved with indexed lookahead and cheap rewinds instead of a
/// single-token peek; the brace-shape classification and call-form
/// backtracking both rely on this.
pub struct Parser<'a> {
    src: &'a str,
    tokens: Vec<SpannedToken>,
    pos: usize,
    dialect: Dialect,
    max_depth: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, PropsError> {
        Self::with_dialect(input, Dialect::default())
    }

    pub fn with_dialect(input: &'a str, dialect: Dialect) -> Result<Self, PropsError> {
        let tokens = Lexer::tokenize(input, dialect)?;
        Ok(Self {
            src: input,
            tokens,
            pos: 0,
            dialect,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse_document(&mut self) -> Result<Document, PropsError> {
        document::parse_document(self)
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    /// Peek `n` tokens past the current one; clamps to the trailing `Eof`.
    pub(crate) fn peek_at(&self, n: usize) -> &Token {
        let i = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[i].token
    }

    pub(crate) fn span(&self) -> Span {
        self.tokens[self.pos].span
    }

    /// Consume the current token. `Eof` is sticky: consuming it again
    /// keeps returning it, so loops always see the end of input.
    pub(crate) fn bump(&mut self) -> SpannedToken {
        let spanned = self.tokens[self.pos].clone();
        if spanned.token != Token::Eof {
            self.pos += 1;
        }
        spanned
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn expect(&mut self, expected: Token) -> Result<SpannedToken, PropsError> {
        let spanned = self.bump();
        if spanned.token == Token::Eof {
            return Err(PropsError::UnexpectedEof {
                message: format!("Expected {:?}", expected),
                line: spanned.span.line,
                column: spanned.span.column,
                hint: None,
                code: Some(201),
            });
        }
        if spanned.token != expected {
            return Err(PropsError::SyntaxError {
                message: format!("Expected {:?}, got {:?}", expected, spanned.token),
                line: spanned.span.line,
                column: spanned.span.column,
                hint: Some("Check your syntax".into()),
                code: Some(202),
            });
        }
        Ok(spanned)
    }

    pub(crate) fn enter_block(&mut self, span: Span) -> Result<(), PropsError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(PropsError::SyntaxError {
                message: format!("Nesting depth exceeds the limit of {}", self.max_depth),
                line: span.line,
                column: span.column,
                hint: Some("Raise the limit with with_max_depth if the input is trusted".into()),
                code: Some(214),
            });
        }
        Ok(())
    }

    pub(crate) fn leave_block(&mut self) {
        self.depth -= 1;
    }

    /// Re-read the raw source from `start` up to the next `,`, `}`,
    /// newline or comment as one unescaped string, and advance the token
    /// cursor past everything the run covered. This is the backtracking
    /// half of the bare-string fallback: a token run that failed to parse
    /// as a structured value is reinterpreted wholesale.
    pub(crate) fn reread_as_word(&mut self, start: Span) -> Scalar {
        let bytes = self.src.as_bytes();
        let mut end = start.offset;
        while end < bytes.len() {
            match bytes[end] {
                b',' | b'}' | b'\n' => break,
                b'/' if self.dialect.line_comments && bytes.get(end + 1) == Some(&b'/') => break,
                _ => end += 1,
            }
        }
        let text = self.src[start.offset..end].trim_end();
        while self.pos < self.tokens.len() - 1 && self.tokens[self.pos].span.offset < end {
            self.pos += 1;
        }
        Scalar::Word(text.to_string())
    }
}
