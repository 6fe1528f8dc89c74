use chumsky::{input::ValueInput, prelude::*};

use metapath_lexer::Token;

use crate::ast::{EQName, NameS};
use crate::span::WithSpan;

use super::types::BoxedParser;

#[derive(Clone)]
pub(crate) struct ParserNameOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    pub(crate) eqname: BoxedParser<'a, I, NameS>,
    pub(crate) ncname: BoxedParser<'a, I, &'a str>,
}

pub(crate) fn parser_name<'a, I>() -> ParserNameOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    let ncname = select! {
        Token::NCName(s) => s,
    }
    .boxed();

    // the lexer has already joined prefixed and braced names
    let eqname = select! {
        Token::NCName(local_name) => EQName::Unprefixed(local_name.to_string()),
        Token::PrefixedQName(name) => EQName::Prefixed {
            prefix: name.prefix.to_string(),
            local_name: name.local_name.to_string(),
        },
        Token::URIQualifiedName(name) => EQName::URIQualified {
            uri: name.uri.to_string(),
            local_name: name.local_name.to_string(),
        },
    }
    .map_with(|name, extra| name.with_span(extra.span()))
    .boxed();

    ParserNameOutput { eqname, ncname }
}

/// Keywords are not reserved, so the lexer hands them over as names.
pub(crate) fn keyword<'a, I>(keyword: &'static str) -> BoxedParser<'a, I, Token<'a>>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    just(Token::NCName(keyword)).boxed()
}
