use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// What a pattern handler decided about the text at the cursor.
///
/// Lengths are in bytes and may exceed the regex match (strings and block
/// comments scan for their own terminator).
#[derive(Debug, Clone, PartialEq)]
pub enum Scan {
    Emit(TokenKind, usize),
    Skip(usize),
    Fail(ErrorImpl, usize),
}

pub type RegexHandler = fn(&Lexer, &str) -> Scan;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    /// Every pattern is anchored at the cursor. The longest match wins and
    /// ties go to the pattern listed first.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        RegexPattern::new("^-?(?:[1-9][0-9]*|0)", MK_DEFAULT_HANDLER!(TokenKind::Integer)),
        RegexPattern::new("^-?[0-9]+(?s:.[0-9]+)+", MK_DEFAULT_HANDLER!(TokenKind::Double)),
        RegexPattern::new("^-?[0-9]+\\.", malformed_double_handler),
        RegexPattern::new("^[ \\t\\r\\n]+", skip_handler),
        RegexPattern::new("^\"", string_handler),
        RegexPattern::new("^/\\*", block_comment_handler),
        RegexPattern::new("^//[^\\r\\n]*", skip_handler),
        RegexPattern::new("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        RegexPattern::new("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        RegexPattern::new("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        RegexPattern::new("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        RegexPattern::new("^\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or)),
        RegexPattern::new("^&&", MK_DEFAULT_HANDLER!(TokenKind::And)),
        RegexPattern::new("^\\|", MK_DEFAULT_HANDLER!(TokenKind::BitOr)),
        RegexPattern::new("^&", MK_DEFAULT_HANDLER!(TokenKind::BitAnd)),
        RegexPattern::new("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        RegexPattern::new("^!", MK_DEFAULT_HANDLER!(TokenKind::Not)),
        RegexPattern::new("^\\+\\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus)),
        RegexPattern::new("^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus)),
        RegexPattern::new("^\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals)),
        RegexPattern::new("^-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals)),
        RegexPattern::new("^\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals)),
        RegexPattern::new("^/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals)),
        RegexPattern::new("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        RegexPattern::new("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        RegexPattern::new("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        RegexPattern::new("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        RegexPattern::new("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        RegexPattern::new("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        RegexPattern::new("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        RegexPattern::new("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        RegexPattern::new("^<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        RegexPattern::new("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        RegexPattern::new("^\\?", MK_DEFAULT_HANDLER!(TokenKind::Question)),
        RegexPattern::new("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        RegexPattern::new("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        RegexPattern::new("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        RegexPattern::new("^\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
    ];
}

/// On-demand tokenizer over one source text.
///
/// `next_token` yields tokens until it has produced `EOF`; after that it
/// keeps returning `EOF`. Lexical errors become `TokenKind::Error` tokens
/// and the matching `Error` is queued for `take_errors`.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
    finished: bool,
    errors: Vec<Error>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Lexer<'src> {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            finished: false,
            errors: vec![],
        }
    }

    /// Consumes `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn remainder(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn current_position(&self) -> Position {
        Position {
            offset: byte_offset(self.pos),
            line: self.line,
            column: self.column,
        }
    }

    /// Drains the lexical errors and warnings recorded so far.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            let start = self.current_position();

            if self.at_eof() {
                self.finished = true;
                return MK_TOKEN!(TokenKind::EOF, String::new(), Span::new(start, start));
            }

            let rest = self.remainder();
            let scan = match longest_match(rest) {
                Some((pattern, len)) => (pattern.handler)(self, &rest[..len]),
                None => {
                    let len = rest.chars().next().map_or(1, char::len_utf8);
                    Scan::Fail(
                        ErrorImpl::UnrecognisedToken {
                            token: rest[..len].to_string(),
                        },
                        len,
                    )
                }
            };

            match scan {
                Scan::Skip(len) => self.advance_n(len),
                Scan::Emit(kind, len) => {
                    let lexeme = rest[..len].to_string();
                    self.advance_n(len);
                    let span = Span::new(start, self.current_position());

                    if kind == TokenKind::Double {
                        if let Some(separator) = loose_separator(&lexeme) {
                            self.errors.push(Error::new(
                                ErrorImpl::LooseDoubleSeparator {
                                    token: lexeme.clone(),
                                    separator,
                                },
                                span,
                            ));
                        }
                    }

                    trace!("{}:{} {:?} {:?}", start.line, start.column, kind, lexeme);
                    return MK_TOKEN!(kind, lexeme, span);
                }
                Scan::Fail(error, len) => {
                    let lexeme = rest[..len.max(1).min(rest.len())].to_string();
                    self.advance_n(lexeme.len());
                    let span = Span::new(start, self.current_position());

                    debug!("lexical error at {}:{}: {}", start.line, start.column, error);
                    self.errors.push(Error::new(error, span));
                    return MK_TOKEN!(TokenKind::Error, lexeme, span);
                }
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    /// Yields every token including the final `EOF`, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            None
        } else {
            Some(self.next_token())
        }
    }
}

fn longest_match(rest: &str) -> Option<(&'static RegexPattern, usize)> {
    let patterns: &'static Vec<RegexPattern> = &PATTERNS;
    let mut best: Option<(&'static RegexPattern, usize)> = None;

    for pattern in patterns.iter() {
        if let Some(found) = pattern.regex.find(rest) {
            let longer = best.map_or(true, |(_, len)| found.end() > len);
            if found.end() > 0 && longer {
                best = Some((pattern, found.end()));
            }
        }
    }

    best
}

/// The first character of a double literal that is neither a digit nor `.`.
fn loose_separator(lexeme: &str) -> Option<char> {
    lexeme
        .strip_prefix('-')
        .unwrap_or(lexeme)
        .chars()
        .find(|ch| !ch.is_ascii_digit() && *ch != '.')
}

/// Offsets are `u32`; past 4 GiB of input they saturate at `u32::MAX`.
pub fn byte_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

fn skip_handler(_lexer: &Lexer, matched: &str) -> Scan {
    Scan::Skip(matched.len())
}

fn symbol_handler(_lexer: &Lexer, matched: &str) -> Scan {
    match RESERVED_LOOKUP.get(matched) {
        Some(kind) => Scan::Emit(*kind, matched.len()),
        None => Scan::Emit(TokenKind::Identifier, matched.len()),
    }
}

fn malformed_double_handler(_lexer: &Lexer, matched: &str) -> Scan {
    Scan::Fail(
        ErrorImpl::MalformedDouble {
            token: matched.to_string(),
        },
        matched.len(),
    )
}

fn string_handler(lexer: &Lexer, _matched: &str) -> Scan {
    let rest = lexer.remainder();
    let mut chars = rest.char_indices().skip(1);

    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Scan::Emit(TokenKind::String, i + 1),
            '\\' => {
                // A backslash right before the end of input escapes nothing.
                if chars.next().is_none() {
                    break;
                }
            }
            '\n' | '\r' => return Scan::Fail(ErrorImpl::UnterminatedString, i),
            _ => {}
        }
    }

    Scan::Fail(ErrorImpl::UnterminatedString, rest.len())
}

fn block_comment_handler(lexer: &Lexer, matched: &str) -> Scan {
    let rest = lexer.remainder();

    match rest[matched.len()..].find("*/") {
        Some(end) => Scan::Skip(matched.len() + end + 2),
        None => Scan::Fail(ErrorImpl::UnterminatedComment, rest.len()),
    }
}

/// Decodes the escapes of a string literal lexeme (quotes included).
pub fn unescape(lexeme: &str) -> String {
    let inner = lexeme
        .strip_prefix('"')
        .map(|s| s.strip_suffix('"').unwrap_or(s))
        .unwrap_or(lexeme);

    let mut result = String::new();
    let mut chars = inner.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next_ch) = chars.peek() {
                match next_ch {
                    'n' => {
                        result.push('\n');
                        chars.next();
                    }
                    't' => {
                        result.push('\t');
                        chars.next();
                    }
                    '\\' => {
                        result.push('\\');
                        chars.next();
                    }
                    'r' => {
                        result.push('\r');
                        chars.next();
                    }
                    '"' => {
                        result.push('"');
                        chars.next();
                    }
                    '0' => {
                        result.push('\0');
                        chars.next();
                    }
                    'x' => {
                        let mut hex = String::new();
                        chars.next();

                        for _ in 0..2 {
                            if let Some(ch) = chars.peek() {
                                if ch.is_ascii_hexdigit() {
                                    hex.push(*ch);
                                    chars.next();
                                } else {
                                    break;
                                }
                            }
                        }

                        match u8::from_str_radix(&hex, 16) {
                            Ok(byte) => result.push(byte as char),
                            Err(_) => result.push_str("\\x"),
                        }
                    }
                    _ => {
                        result.push(ch); // Keep the backslash
                    }
                }
            } else {
                result.push(ch); // Keep the lone backslash
            }
        } else {
            result.push(ch); // Keep non-escape characters
        }
    }

    result
}

/// Lexes the whole input, `EOF` token included.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Error>) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.by_ref().collect::<Vec<_>>();
    (tokens, lexer.take_errors())
}
