use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// The built-in types that may appear in type position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Double,
    Int,
    String,
    Bool,
    Dyn,
}

impl DataType {
    pub fn from_token(kind: TokenKind) -> Option<DataType> {
        match kind {
            TokenKind::TypeDouble => Some(DataType::Double),
            TokenKind::TypeInt => Some(DataType::Int),
            TokenKind::TypeString => Some(DataType::String),
            TokenKind::TypeBool => Some(DataType::Bool),
            TokenKind::TypeDyn => Some(DataType::Dyn),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            DataType::Double => "double",
            DataType::Int => "int",
            DataType::String => "string",
            DataType::Bool => "bool",
            DataType::Dyn => "dyn",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
