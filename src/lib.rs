#![allow(clippy::module_inception)]

use crate::errors::errors::{Diagnostic, Severity};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

pub use parser::parser::{parse, ParseResult};

extern crate regex;

/// A point in the source text.
///
/// `offset` is a byte offset; `line` and `column` are 1-based and count
/// characters, so they stay correct across comments and multi-line tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn null() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::null()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Span covering `self` through `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the 1-based line number, the full text of that line and the
/// 0-based character offset of `position` inside it.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = source[start..pos].chars().count();
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Anchored at the very end of the input (an EOF diagnostic).
    if source.is_empty() || source.ends_with('\n') {
        return Some((line_number, String::new(), 0));
    }
    let last = source.rsplit('\n').next().unwrap_or("");
    Some((line_number - 1, last.to_string(), last.chars().count()))
}

/// Renders a diagnostic with the offending source line underneath it.
///
/// ```text
/// Parser error at line 2:16 expected ';', found '=='
/// -> main.lang
///   |
/// 2 | int a = b == c == d;
///   | ---------------^
///   = UnexpectedToken (Did you miss a semicolon?)
/// ```
pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str, unit: &str) -> String {
    let mut out = format!("{}\n-> {}\n", diagnostic, unit);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, diagnostic.offset) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let marker = if diagnostic.severity == Severity::Warning { "~" } else { "^" };

    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", marker));

    match &diagnostic.tip {
        Some(tip) => out.push_str(&format!("{:>padding$} {} ({})\n", "=", diagnostic.name, tip)),
        None => out.push_str(&format!("{:>padding$} {}\n", "=", diagnostic.name)),
    }
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
