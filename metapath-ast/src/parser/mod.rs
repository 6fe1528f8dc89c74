mod axis_node_test;
mod name;
mod parser_core;
mod primary;
mod sequence_type;
mod signature;
mod types;

use chumsky::input::Stream;
use chumsky::{input::ValueInput, prelude::*};
use metapath_lexer::{lexer, Token};

use crate::ast;
use crate::error::ParserError;
use crate::span::Span;

use parser_core::parser;
use types::BoxedParser;

fn create_token_iter(src: &str) -> impl Iterator<Item = (Token, SimpleSpan)> + '_ {
    lexer(src).map(|(token, span)| (token, span.into()))
}

fn tokens(src: &str) -> impl ValueInput<'_, Token = Token<'_>, Span = SimpleSpan> {
    Stream::from_iter(create_token_iter(src)).spanned((src.len()..src.len()).into())
}

// only the first error is reported
fn parse<'a, I, T>(parser: BoxedParser<'a, I, T>, input: I, src: &str) -> Result<T, ParserError>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    parser.parse(input).into_result().map_err(|errors| {
        errors
            .into_iter()
            .next()
            .unwrap_or_else(|| ParserError::UnexpectedEnd {
                span: Span::new(src.len(), src.len()),
                expected: Vec::new(),
            })
    })
}

/// Parse a complete expression.
pub fn parse_expression(input: &str) -> Result<ast::ExprS, ParserError> {
    parse(parser().expr, tokens(input), input)
}

/// Parse a sequence type such as `integer*` or `map(string, item()?)`.
pub fn parse_sequence_type(input: &str) -> Result<ast::SequenceType, ParserError> {
    parse(parser().sequence_type, tokens(input), input)
}

/// Parse the target of a cast: a type name with an optional `?`.
pub fn parse_single_type(input: &str) -> Result<ast::SingleType, ParserError> {
    parse(parser().single_type, tokens(input), input)
}

/// Parse a function signature declaration.
pub fn parse_signature(input: &str) -> Result<ast::Signature, ParserError> {
    parse(parser().signature, tokens(input), input)
}
