//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct, error recovery and the
//! `parse` entry point. Rules are plain functions over `&mut Parser` that
//! return `Result<_, Error>`; errors are recorded only at recovery points
//! (top-level items and block items), after which the parser resynchronizes
//! and carries on.
//!
//! It maintains lookup tables for:
//! - Keyword statement handlers
//! - NUD (null denotation) handlers for values
//! - Binding powers for binary operators

use std::collections::HashMap;

use log::{debug, info};

use crate::{
    ast::ast::{Entry, TopLevelItem},
    errors::errors::{Diagnostic, Error, ErrorImpl, Severity},
    lexer::{
        stream::{Mark, TokenStream},
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, NUDHandler, NUDLookup, StmtHandler,
        StmtLookup,
    },
    predict::{predict_entry, EntryAlt},
    stmt::{
        parse_function_def, parse_main_function_def, parse_procedure_def, parse_stmt,
        parse_struct_def,
    },
};

/// Where the parser is when it has to skip over an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    /// Inside `{ ... }`: stop before `}` or a statement keyword.
    Block,
    /// Between top-level items: also stop before `f`, `p` and `type`.
    TopLevel,
}

/// The main parser structure that maintains parsing state.
///
/// Owns the token stream of one compilation unit and the syntax errors
/// recorded so far. Nothing is shared between parsers, so separate units
/// can be parsed on separate threads.
pub struct Parser<'src> {
    /// Buffered tokens with lookahead and rewind
    tokens: TokenStream<'src>,
    /// Syntax errors recorded at recovery points
    errors: Vec<Error>,
    /// Lookup table for keyword statement handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for value (null denotation) handlers
    nud_lookup: NUDLookup,
    /// Lookup table for binary operator precedence
    binding_power_lookup: BPLookup,
}

impl<'src> Parser<'src> {
    /// Creates a new Parser over `source` with its lookup tables filled in.
    pub fn new(source: &'src str) -> Self {
        let mut parser = Parser {
            tokens: TokenStream::new(source),
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&mut self) -> &Token {
        self.tokens.current()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&mut self) -> TokenKind {
        self.tokens.peek_kind(0)
    }

    /// Returns the kind of the token `k` places ahead.
    pub fn peek_kind(&mut self, k: usize) -> TokenKind {
        self.tokens.peek_kind(k)
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> Token {
        self.tokens.advance()
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(match error {
                Some(error) => error,
                None => self.unexpected(&expected_kind.to_string()),
            });
        }
        Ok(self.advance())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// An "expected ..., found ..." error anchored at the current token.
    pub fn unexpected(&mut self, expected: &str) -> Error {
        let token = self.current_token().clone();
        let error = match token.kind {
            TokenKind::EOF => ErrorImpl::UnexpectedEof {
                expected: expected.to_string(),
            },
            _ => ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
            },
        };
        Error::new(error, token.span)
    }

    /// The current token starts none of the alternatives of `rule`.
    pub fn no_viable_alternative(&mut self, rule: &'static str) -> Error {
        let token = self.current_token().clone();
        if token.kind == TokenKind::EOF {
            return self.unexpected(rule);
        }
        Error::new(
            ErrorImpl::NoViableAlternative {
                rule,
                found: token.to_string(),
            },
            token.span,
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&mut self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns the start of the current token.
    pub fn get_position(&mut self) -> Position {
        self.current_token().start()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = self.tokens.previous_end();
        if end.offset < start.offset {
            return Span::new(start, start);
        }
        Span::new(start, end)
    }

    pub fn mark(&self) -> Mark {
        self.tokens.mark()
    }

    pub fn reset(&mut self, mark: Mark) {
        self.tokens.reset(mark);
    }

    pub fn split_negative_literal(&mut self) -> bool {
        self.tokens.split_negative_literal()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a binary operator at the given precedence level.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a value handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a keyword.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Records a syntax error. A second error at the same offset is dropped.
    pub fn report(&mut self, error: Error) {
        let offset = error.get_position().offset;
        if self
            .errors
            .iter()
            .any(|recorded| recorded.get_position().offset == offset)
        {
            debug!("suppressing duplicate error at offset {}: {}", offset, error);
            return;
        }

        debug!("{}", error);
        self.errors.push(error);
    }

    /// Records `error` for the item that began at `item_start` and skips to
    /// a point where parsing can resume.
    ///
    /// If the item consumed nothing, at least one token is skipped.
    pub fn recover(&mut self, error: Error, item_start: Mark, scope: SyncScope) {
        self.report(error);
        let stalled = self.tokens.mark() == item_start;
        self.synchronize(scope, stalled);
    }

    /// Skips tokens up to and including `;`, or up to `}` or a token that
    /// starts a new item in `scope`. At top level a stray `}` is consumed.
    ///
    /// A skipped `{` is skipped through its matching `}` together with any
    /// `else` or `else if` branches after it, and nothing inside it ends the
    /// skip. Closing such a block at depth zero ends the failed item.
    pub fn synchronize(&mut self, scope: SyncScope, force_progress: bool) {
        let mut skipped = 0;
        let mut depth = 0usize;
        let mut in_else = false;

        loop {
            let kind = self.current_token_kind();
            let may_stop = skipped > 0 || !force_progress;

            match kind {
                TokenKind::EOF => break,
                TokenKind::OpenCurly => {
                    depth += 1;
                    in_else = false;
                }
                TokenKind::CloseCurly if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        skipped += 1;
                        if self.current_token_kind() == TokenKind::Else {
                            in_else = true;
                            continue;
                        }
                        break;
                    }
                }
                _ if depth > 0 => {}
                TokenKind::Semicolon => {
                    self.advance();
                    skipped += 1;
                    break;
                }
                TokenKind::CloseCurly if scope == SyncScope::TopLevel => {
                    self.advance();
                    skipped += 1;
                    break;
                }
                TokenKind::CloseCurly if may_stop => break,
                _ if is_sync_start(kind, scope) && may_stop && !in_else => break,
                _ => {}
            }

            self.advance();
            skipped += 1;
        }

        debug!("skipped {} token(s) while recovering", skipped);
    }

    /// Consumes the parser, returning lexical and syntax diagnostics in
    /// source order.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        let mut errors = self.tokens.take_errors();
        errors.append(&mut self.errors);
        errors.sort_by_key(|error| error.get_position().offset);
        errors.iter().map(Error::to_diagnostic).collect()
    }
}

/// Tokens that begin a statement or, at top level, a definition.
fn is_sync_start(kind: TokenKind, scope: SyncScope) -> bool {
    match kind {
        TokenKind::Const
        | TokenKind::Import
        | TokenKind::Return
        | TokenKind::Break
        | TokenKind::Continue
        | TokenKind::Printf => true,
        TokenKind::For | TokenKind::While | TokenKind::If => scope == SyncScope::Block,
        TokenKind::F | TokenKind::P | TokenKind::Type => scope == SyncScope::TopLevel,
        _ => kind.is_data_type(),
    }
}

/// The outcome of parsing one compilation unit.
///
/// `entry` is always present; after errors it holds whatever items were
/// parsed successfully.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub unit: String,
    pub entry: Entry,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// A parse failed if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
    }
}

/// Parses one compilation unit.
///
/// This is the main entry point for parsing. `unit` names the source for
/// diagnostics and logging.
///
/// # Returns
///
/// The (possibly partial) `Entry` together with every diagnostic, ordered
/// by source position.
pub fn parse(source: &str, unit: &str) -> ParseResult {
    let mut parser = Parser::new(source);
    let entry = parse_entry(&mut parser);
    let diagnostics = parser.finish();

    info!(
        "parsed {}: {} top-level item(s), {} diagnostic(s)",
        unit,
        entry.items.len(),
        diagnostics.len()
    );

    ParseResult {
        unit: unit.to_string(),
        entry,
        diagnostics,
    }
}

/// Parses top-level items until end of input.
pub fn parse_entry(parser: &mut Parser) -> Entry {
    let mut items = vec![];

    while parser.has_tokens() {
        let item_start = parser.mark();

        let item = match predict_entry(parser) {
            Some(EntryAlt::Stmt) => parse_stmt(parser).map(TopLevelItem::Stmt),
            Some(EntryAlt::MainFunctionDef) => {
                parse_main_function_def(parser).map(TopLevelItem::MainFunctionDef)
            }
            Some(EntryAlt::FunctionDef) => parse_function_def(parser).map(TopLevelItem::FunctionDef),
            Some(EntryAlt::ProcedureDef) => {
                parse_procedure_def(parser).map(TopLevelItem::ProcedureDef)
            }
            Some(EntryAlt::StructDef) => parse_struct_def(parser).map(TopLevelItem::StructDef),
            None => Err(parser.no_viable_alternative("a top-level item")),
        };

        match item {
            Ok(item) => items.push(item),
            Err(error) => parser.recover(error, item_start, SyncScope::TopLevel),
        }
    }

    let end = parser.get_position();
    Entry {
        items,
        span: Span::new(Position::null(), end),
    }
}
