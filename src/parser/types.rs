//! Type parsing implementation.
//!
//! Only the built-in data type keywords can appear in type position, so a
//! type is always exactly one token.

use crate::{ast::types::DataType, errors::errors::Error, Span};

use super::parser::Parser;

/// Parses one of `double`, `int`, `string`, `bool` or `dyn`.
pub fn parse_data_type(parser: &mut Parser) -> Result<(DataType, Span), Error> {
    match DataType::from_token(parser.current_token_kind()) {
        Some(data_type) => {
            let token = parser.advance();
            Ok((data_type, token.span))
        }
        None => Err(parser.unexpected("a data type")),
    }
}
