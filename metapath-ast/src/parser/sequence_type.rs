use chumsky::{input::ValueInput, prelude::*};

use metapath_lexer::Token;

use crate::ast::{
    ArrayTest, Item, ItemType, KindTest, MapTest, NameS, Occurrence, SequenceType, SingleType,
};

use super::name::keyword;
use super::types::BoxedParser;

#[derive(Clone)]
pub(crate) struct ParserTypeOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    pub(crate) sequence_type: BoxedParser<'a, I, SequenceType>,
    pub(crate) single_type: BoxedParser<'a, I, SingleType>,
}

pub(crate) fn parser_type<'a, I>(
    eqname: BoxedParser<'a, I, NameS>,
    empty_call: BoxedParser<'a, I, Token<'a>>,
    kind_test: BoxedParser<'a, I, KindTest>,
) -> ParserTypeOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    let single_type = eqname
        .clone()
        .then(just(Token::QuestionMark).or_not())
        .map(|(name, question_mark)| SingleType {
            name,
            optional: question_mark.is_some(),
        })
        .boxed();

    let empty = keyword("empty-sequence")
        .ignore_then(empty_call.clone())
        .to(SequenceType::Empty)
        .boxed();

    let item_type_item = keyword("item")
        .ignore_then(empty_call)
        .to(ItemType::Item)
        .boxed();
    let item_type_kind_test = kind_test.map(ItemType::KindTest).boxed();
    let item_type_atomic_or_union = eqname.clone().map(ItemType::AtomicOrUnionType).boxed();

    let any_map_test = keyword("map")
        .ignore_then(
            just(Token::Asterisk).delimited_by(just(Token::LeftParen), just(Token::RightParen)),
        )
        .to(MapTest::AnyMap)
        .boxed();
    let any_array_test = keyword("array")
        .ignore_then(
            just(Token::Asterisk).delimited_by(just(Token::LeftParen), just(Token::RightParen)),
        )
        .to(ArrayTest::AnyArray)
        .boxed();

    let sequence_type = recursive(|sequence_type| {
        let sequence_type: BoxedParser<'a, I, SequenceType> = sequence_type.boxed();

        let item_type = recursive(|item_type| {
            let item_type: BoxedParser<'a, I, ItemType> = item_type.boxed();

            let typed_map_test = keyword("map")
                .ignore_then(
                    eqname
                        .clone()
                        .then_ignore(just(Token::Comma))
                        .then(sequence_type.clone())
                        .delimited_by(just(Token::LeftParen), just(Token::RightParen)),
                )
                .map(|(key_type, value_type)| MapTest::TypedMap {
                    key_type,
                    value_type: Box::new(value_type),
                })
                .boxed();
            let typed_array_test = keyword("array")
                .ignore_then(
                    sequence_type
                        .clone()
                        .delimited_by(just(Token::LeftParen), just(Token::RightParen)),
                )
                .map(|member_type| ArrayTest::TypedArray(Box::new(member_type)))
                .boxed();

            let item_type_map_test = any_map_test.or(typed_map_test).map(ItemType::MapTest);
            let item_type_array_test = any_array_test
                .or(typed_array_test)
                .map(ItemType::ArrayTest);

            let parenthesized_item_type =
                item_type.delimited_by(just(Token::LeftParen), just(Token::RightParen));

            // a bare name is an atomic type, so it goes last
            item_type_item
                .or(item_type_map_test)
                .or(item_type_array_test)
                .or(item_type_kind_test)
                .or(parenthesized_item_type)
                .or(item_type_atomic_or_union)
                .boxed()
        });

        // occurrence indicators bind to the closest sequence type
        let occurrence = just(Token::QuestionMark)
            .to(Occurrence::Option)
            .or(just(Token::Asterisk).to(Occurrence::Many))
            .or(just(Token::Plus).to(Occurrence::NonEmpty))
            .or_not()
            .map(|occurrence| occurrence.unwrap_or(Occurrence::One))
            .boxed();

        let item = item_type
            .then(occurrence)
            .map(|(item_type, occurrence)| {
                SequenceType::Item(Item {
                    item_type,
                    occurrence,
                })
            })
            .boxed();

        empty.or(item).boxed()
    })
    .boxed();

    ParserTypeOutput {
        sequence_type,
        single_type,
    }
}
