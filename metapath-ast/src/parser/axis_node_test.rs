use chumsky::{
    input::{MapExtra, ValueInput},
    prelude::*,
};

use metapath_lexer::Token;

use crate::ast::{Axis, KindTest, NameS, NameTest, NodeTest};
use crate::error::ParserError;
use crate::span::Span;

use super::types::{BoxedParser, Extra};

#[derive(Clone)]
pub(crate) struct ParserAxisNodeTestOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    /// Steps that cannot be mistaken for a primary expression.
    pub(crate) axis_node_test: BoxedParser<'a, I, (Axis, NodeTest)>,
    /// A bare name, selecting children.
    pub(crate) name_node_test: BoxedParser<'a, I, (Axis, NodeTest)>,
}

pub(crate) fn parser_axis_node_test<'a, I>(
    eqname: BoxedParser<'a, I, NameS>,
    kind_test: BoxedParser<'a, I, KindTest>,
) -> ParserAxisNodeTestOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    let wildcard_prefix = select! {
        Token::LocalNameWildcard(w) => w.prefix,
    }
    .map_with(|prefix, extra: &mut MapExtra<'a, '_, I, Extra>| {
        NameTest::Prefix(prefix.to_string(), extra.span().into())
    })
    .boxed();

    let name_test_wildcard = select! {
        Token::Asterisk => NameTest::Star,
        Token::PrefixWildcard(w) => NameTest::LocalName(w.local_name.to_string()),
        Token::BracedURILiteralWildcard(w) => NameTest::Namespace(w.uri.to_string()),
    }
    .or(wildcard_prefix)
    .boxed();

    let name_test = name_test_wildcard
        .clone()
        .or(eqname.clone().map(NameTest::Name))
        .boxed();

    let node_test = kind_test
        .clone()
        .map(NodeTest::KindTest)
        .or(name_test.map(NodeTest::NameTest))
        .boxed();

    let axis = select! {
        Token::NCName(name) => name,
    }
    .then_ignore(just(Token::DoubleColon))
    .try_map(|name, span: SimpleSpan| {
        Axis::by_name(name).ok_or_else(|| ParserError::ExpectedFound {
            span: Span::from(span),
            expected: vec!["an axis name".to_string()],
            found: format!("'{}'", name),
        })
    })
    .boxed();

    let full_step = axis.then(node_test.clone()).boxed();

    let abbrev_flag_step = just(Token::At)
        .ignore_then(node_test)
        .map(|node_test| (Axis::Flag, node_test))
        .boxed();

    let abbrev_parent_step = just(Token::DotDot)
        .to((Axis::Parent, NodeTest::KindTest(KindTest::Any)))
        .boxed();

    // flag() selects along the flag axis by default
    let abbrev_kind_test_step = kind_test
        .map(|kind_test| {
            let axis = match kind_test {
                KindTest::Flag(_) => Axis::Flag,
                _ => Axis::Child,
            };
            (axis, NodeTest::KindTest(kind_test))
        })
        .boxed();

    let abbrev_wildcard_step = name_test_wildcard
        .map(|name_test| (Axis::Child, NodeTest::NameTest(name_test)))
        .boxed();

    let axis_node_test = full_step
        .or(abbrev_flag_step)
        .or(abbrev_parent_step)
        .or(abbrev_kind_test_step)
        .or(abbrev_wildcard_step)
        .boxed();

    let name_node_test = eqname
        .map(|name| (Axis::Child, NodeTest::NameTest(NameTest::Name(name))))
        .boxed();

    ParserAxisNodeTestOutput {
        axis_node_test,
        name_node_test,
    }
}
