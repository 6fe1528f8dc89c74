use std::borrow::Cow;

use ibig::ibig;
use metapath_lexer::{lexer, PrefixedQName, Span, Token};
use rust_decimal_macros::dec;

fn tokens(input: &str) -> Vec<Token<'_>> {
    lexer(input).map(|(token, _)| token).collect()
}

fn spanned(input: &str) -> Vec<(Token<'_>, Span)> {
    lexer(input).collect()
}

#[test]
fn test_keywords_are_names() {
    assert_eq!(
        spanned("for $x in . return cast"),
        vec![
            (Token::NCName("for"), 0..3),
            (Token::Dollar, 4..5),
            (Token::NCName("x"), 5..6),
            (Token::NCName("in"), 7..9),
            (Token::Dot, 10..11),
            (Token::NCName("return"), 12..18),
            (Token::NCName("cast"), 19..23),
        ]
    );
}

#[test]
fn test_comments() {
    assert!(tokens("(: a comment :)").is_empty());
    assert!(tokens("(: outer (: inner :) still outer :)").is_empty());
    assert_eq!(
        tokens("1 (: one :) + (: two :) 2"),
        vec![
            Token::IntegerLiteral(ibig!(1)),
            Token::Plus,
            Token::IntegerLiteral(ibig!(2))
        ]
    );
}

#[test]
fn test_broken_comments() {
    assert_eq!(spanned("(: open (: closed :) open"), vec![(Token::Error, 0..25)]);
    assert_eq!(spanned(":)"), vec![(Token::Error, 0..2)]);
}

#[test]
fn test_numeric_literals() {
    assert_eq!(
        tokens("42 3.25 .5 2.5e2 1e-2"),
        vec![
            Token::IntegerLiteral(ibig!(42)),
            Token::DecimalLiteral(dec!(3.25)),
            Token::DecimalLiteral(dec!(0.5)),
            Token::DoubleLiteral(dec!(250)),
            Token::DoubleLiteral(dec!(0.01)),
        ]
    );
}

#[test]
fn test_decimal_out_of_range() {
    assert_eq!(
        spanned("98765432109876543210987654321098765.4"),
        vec![(Token::Error, 0..37)]
    );
}

#[test]
fn test_string_literals() {
    assert_eq!(
        tokens(r#"'it''s' "say ""hi""" 'plain'"#),
        vec![
            Token::StringLiteral(Cow::Owned("it's".to_string())),
            Token::StringLiteral(Cow::Owned(r#"say "hi""#.to_string())),
            Token::StringLiteral(Cow::Borrowed("plain")),
        ]
    );
}

#[test]
fn test_axis_with_hyphenated_name() {
    assert_eq!(
        spanned("preceding-sibling::control"),
        vec![
            (Token::NCName("preceding-sibling"), 0..17),
            (Token::DoubleColon, 17..19),
            (Token::NCName("control"), 19..26),
        ]
    );
}

#[test]
fn test_prefixed_names() {
    assert_eq!(
        spanned("math:pi()"),
        vec![
            (
                Token::PrefixedQName(PrefixedQName {
                    prefix: "math",
                    local_name: "pi"
                }),
                0..7
            ),
            (Token::LeftParen, 7..8),
            (Token::RightParen, 8..9),
        ]
    );
    assert_eq!(
        tokens("math :pi"),
        vec![Token::NCName("math"), Token::Colon, Token::NCName("pi")]
    );
}

#[test]
fn test_braced_uri_literal() {
    assert_eq!(
        spanned("Q{http://example.com/ns} "),
        vec![(Token::BracedURILiteral("http://example.com/ns"), 0..24)]
    );
}

#[test]
fn test_names_and_numbers_need_separating() {
    assert_eq!(spanned("10div 3")[0], (Token::Error, 0..2));
    assert_eq!(
        tokens("10(: x :)div 3"),
        vec![
            Token::IntegerLiteral(ibig!(10)),
            Token::NCName("div"),
            Token::IntegerLiteral(ibig!(3))
        ]
    );
    assert_eq!(
        tokens("a[1]"),
        vec![
            Token::NCName("a"),
            Token::LeftBracket,
            Token::IntegerLiteral(ibig!(1)),
            Token::RightBracket
        ]
    );
}

#[test]
fn test_operators() {
    assert_eq!(
        tokens("//x[@y != 1] ! (. << $z) || 'a' => f() ?k"),
        vec![
            Token::DoubleSlash,
            Token::NCName("x"),
            Token::LeftBracket,
            Token::At,
            Token::NCName("y"),
            Token::NotEqual,
            Token::IntegerLiteral(ibig!(1)),
            Token::RightBracket,
            Token::ExclamationMark,
            Token::LeftParen,
            Token::Dot,
            Token::Precedes,
            Token::Dollar,
            Token::NCName("z"),
            Token::RightParen,
            Token::DoublePipe,
            Token::StringLiteral(Cow::Borrowed("a")),
            Token::Arrow,
            Token::NCName("f"),
            Token::LeftParen,
            Token::RightParen,
            Token::QuestionMark,
            Token::NCName("k"),
        ]
    );
}
