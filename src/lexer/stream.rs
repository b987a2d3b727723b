use log::trace;

use crate::{errors::errors::Error, Position, Span, MK_TOKEN};

use super::{
    lexer::Lexer,
    tokens::{Token, TokenKind},
};

/// A saved stream position, see [`TokenStream::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pos: usize,
    previous_end: Position,
}

/// Buffered view over the lexer with arbitrary lookahead and rewind.
///
/// Tokens are pulled from the lexer only when a peek needs them. Error
/// tokens never enter the buffer; their errors are kept for
/// [`TokenStream::take_errors`]. Once `EOF` is buffered every further peek
/// past it sees `EOF` again.
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    buffer: Vec<Token>,
    pos: usize,
    previous_end: Position,
    errors: Vec<Error>,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        TokenStream {
            lexer: Lexer::new(source),
            buffer: vec![],
            pos: 0,
            previous_end: Position::null(),
            errors: vec![],
        }
    }

    fn fill(&mut self, k: usize) {
        while self.buffer.len() <= self.pos + k {
            if self.buffer.last().map_or(false, |t| t.kind == TokenKind::EOF) {
                return;
            }

            let token = self.lexer.next_token();
            self.errors.extend(self.lexer.take_errors());

            if token.kind == TokenKind::Error {
                trace!("dropping error token {:?}", token.lexeme);
                continue;
            }
            self.buffer.push(token);
        }
    }

    /// The token `k` places ahead of the cursor, `peek(0)` being the current one.
    pub fn peek(&mut self, k: usize) -> &Token {
        self.fill(k);
        let index = (self.pos + k).min(self.buffer.len() - 1);
        &self.buffer[index]
    }

    pub fn peek_kind(&mut self, k: usize) -> TokenKind {
        self.peek(k).kind
    }

    pub fn current(&mut self) -> &Token {
        self.peek(0)
    }

    /// Consumes the current token. At `EOF` the cursor stays put.
    pub fn advance(&mut self) -> Token {
        let token = self.peek(0).clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        self.previous_end = token.span.end;
        token
    }

    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            previous_end: self.previous_end,
        }
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.previous_end = mark.previous_end;
    }

    /// End of the last consumed token.
    pub fn previous_end(&self) -> Position {
        self.previous_end
    }

    /// Splits a current `-<digits>` literal into `-` and the unsigned literal.
    ///
    /// Returns whether a split happened. Used where a binary minus is
    /// expected, as in `i -1`.
    pub fn split_negative_literal(&mut self) -> bool {
        let token = self.peek(0);
        if !token.kind.is_numeric_literal() || !token.lexeme.starts_with('-') {
            return false;
        }

        let token = self.buffer.remove(self.pos);
        let start = token.span.start;
        let dash_end = Position {
            offset: start.offset + 1,
            line: start.line,
            column: start.column + 1,
        };

        let literal = MK_TOKEN!(
            token.kind,
            token.lexeme[1..].to_string(),
            Span::new(dash_end, token.span.end)
        );
        let dash = MK_TOKEN!(TokenKind::Dash, String::from("-"), Span::new(start, dash_end));

        trace!("split {:?} at {}:{}", token.lexeme, start.line, start.column);
        self.buffer.insert(self.pos, literal);
        self.buffer.insert(self.pos, dash);
        true
    }

    /// Drains the lexical errors seen while filling the buffer.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }
}
