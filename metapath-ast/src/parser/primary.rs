use chumsky::{input::ValueInput, prelude::*};

use metapath_lexer::Token;

use crate::ast::{EQName, Literal, NameS, PrimaryExpr};
use crate::error::ParserError;

use super::types::BoxedParser;

#[derive(Clone)]
pub(crate) struct ParserPrimaryOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    pub(crate) literal: BoxedParser<'a, I, PrimaryExpr>,
    pub(crate) var_ref: BoxedParser<'a, I, PrimaryExpr>,
    pub(crate) context_item_expr: BoxedParser<'a, I, PrimaryExpr>,
}

pub(crate) fn parser_primary<'a, I>(eqname: BoxedParser<'a, I, NameS>) -> ParserPrimaryOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    let literal = select! {
        Token::IntegerLiteral(i) => Literal::Integer(i),
        Token::DecimalLiteral(d) => Literal::Decimal(d),
        Token::DoubleLiteral(d) => Literal::Double(d),
        Token::StringLiteral(s) => Literal::String(s.into_owned()),
    }
    .map(PrimaryExpr::Literal)
    .boxed();

    let var_ref = just(Token::Dollar)
        .ignore_then(eqname)
        .map(PrimaryExpr::VarRef)
        .boxed();

    let context_item_expr = just(Token::Dot).to(PrimaryExpr::ContextItem).boxed();

    ParserPrimaryOutput {
        literal,
        var_ref,
        context_item_expr,
    }
}

// names that start another construct when followed by a parenthesis
const RESERVED_FUNCTION_NAMES: [&str; 12] = [
    "array",
    "assembly",
    "document-node",
    "empty-sequence",
    "field",
    "flag",
    "function",
    "if",
    "item",
    "map",
    "node",
    "switch",
];

pub(crate) fn check_reserved(name: &NameS) -> Result<(), ParserError> {
    match &name.value {
        EQName::Unprefixed(local_name)
            if RESERVED_FUNCTION_NAMES.contains(&local_name.as_str()) =>
        {
            Err(ParserError::Reserved {
                span: name.span,
                name: local_name.clone(),
            })
        }
        _ => Ok(()),
    }
}
