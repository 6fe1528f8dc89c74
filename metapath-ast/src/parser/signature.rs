use chumsky::{input::ValueInput, prelude::*};

use metapath_lexer::Token;

use crate::ast::{Item, ItemType, NameS, Occurrence, SequenceType, Signature, SignatureParam};

use super::name::keyword;
use super::types::BoxedParser;

#[derive(Clone)]
pub(crate) struct ParserSignatureOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    pub(crate) signature: BoxedParser<'a, I, Signature>,
}

/// `name($a as type, $b as type) as type`. A parameter or return type that
/// is left out defaults to `item()*`.
pub(crate) fn parser_signature<'a, I>(
    eqname: BoxedParser<'a, I, NameS>,
    ncname: BoxedParser<'a, I, &'a str>,
    sequence_type: BoxedParser<'a, I, SequenceType>,
) -> ParserSignatureOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    let type_declaration = keyword("as")
        .ignore_then(sequence_type)
        .or_not()
        .map(|type_| {
            type_.unwrap_or(SequenceType::Item(Item {
                item_type: ItemType::Item,
                occurrence: Occurrence::Many,
            }))
        })
        .boxed();

    let param = just(Token::Dollar)
        .ignore_then(ncname)
        .then(type_declaration.clone())
        .map(|(name, type_)| SignatureParam {
            name: name.to_string(),
            type_,
        })
        .boxed();

    let param_list = param
        .separated_by(just(Token::Comma))
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LeftParen), just(Token::RightParen))
        .boxed();

    let signature = eqname
        .then(param_list)
        .then(type_declaration)
        .map(|((name, params), return_type)| Signature {
            name,
            params,
            return_type,
        })
        .boxed();

    ParserSignatureOutput { signature }
}
