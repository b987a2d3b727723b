use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("double", TokenKind::TypeDouble);
        map.insert("int", TokenKind::TypeInt);
        map.insert("string", TokenKind::TypeString);
        map.insert("bool", TokenKind::TypeBool);
        map.insert("dyn", TokenKind::TypeDyn);
        map.insert("f", TokenKind::F);
        map.insert("p", TokenKind::P);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("while", TokenKind::While);
        map.insert("const", TokenKind::Const);
        map.insert("import", TokenKind::Import);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("return", TokenKind::Return);
        map.insert("as", TokenKind::As);
        map.insert("struct", TokenKind::Struct);
        map.insert("type", TokenKind::Type);
        map.insert("main", TokenKind::Main);
        map.insert("printf", TokenKind::Printf);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// Marker for a lexical error; never reaches the parser.
    Error,

    String,
    Integer,
    Double,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,

    Or,     // ||
    And,    // &&
    BitOr,  // |
    BitAnd, // &
    Not,    // !

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,

    Plus,
    Dash,
    Star,
    Slash,

    Greater,
    Less,
    GreaterEquals,
    LessEquals,
    Equals,     // ==
    NotEquals,  // !=
    Assignment, // =

    Question,
    Semicolon,
    Colon,
    Comma,
    Dot,

    // Reserved
    TypeDouble,
    TypeInt,
    TypeString,
    TypeBool,
    TypeDyn,
    F,
    P,
    If,
    Else,
    For,
    While,
    Const,
    Import,
    Break,
    Continue,
    Return,
    As,
    Struct,
    Type,
    Main,
    Printf,
    True,
    False,
}

impl TokenKind {
    /// The fixed spelling of keywords and punctuation, `None` for tokens
    /// whose text varies.
    pub fn spelling(&self) -> Option<&'static str> {
        let spelling = match self {
            TokenKind::EOF
            | TokenKind::Error
            | TokenKind::String
            | TokenKind::Integer
            | TokenKind::Double
            | TokenKind::Identifier => return None,
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::BitOr => "|",
            TokenKind::BitAnd => "&",
            TokenKind::Not => "!",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::StarEquals => "*=",
            TokenKind::SlashEquals => "/=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LessEquals => "<=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Assignment => "=",
            TokenKind::Question => "?",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::TypeDouble => "double",
            TokenKind::TypeInt => "int",
            TokenKind::TypeString => "string",
            TokenKind::TypeBool => "bool",
            TokenKind::TypeDyn => "dyn",
            TokenKind::F => "f",
            TokenKind::P => "p",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Const => "const",
            TokenKind::Import => "import",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::As => "as",
            TokenKind::Struct => "struct",
            TokenKind::Type => "type",
            TokenKind::Main => "main",
            TokenKind::Printf => "printf",
            TokenKind::True => "true",
            TokenKind::False => "false",
        };
        Some(spelling)
    }

    pub fn is_data_type(&self) -> bool {
        matches!(
            self,
            TokenKind::TypeDouble
                | TokenKind::TypeInt
                | TokenKind::TypeString
                | TokenKind::TypeBool
                | TokenKind::TypeDyn
        )
    }

    pub fn is_assign_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
        )
    }

    pub fn is_numeric_literal(&self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Double)
    }
}

/// Human readable name used in "expected ..., found ..." messages.
impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.spelling() {
            Some(spelling) => write!(f, "'{}'", spelling),
            None => match self {
                TokenKind::EOF => write!(f, "end of input"),
                TokenKind::Error => write!(f, "invalid token"),
                TokenKind::String => write!(f, "string literal"),
                TokenKind::Integer => write!(f, "integer literal"),
                TokenKind::Double => write!(f, "double literal"),
                _ => write!(f, "identifier"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text, quotes and signs included.
    pub lexeme: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    pub fn start(&self) -> Position {
        self.span.start
    }
}
