use std::borrow::Cow;

use ibig::IBig;
use logos::{Lexer, Logos};
use rust_decimal::Decimal;

/// `prefix:local-name`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrefixedQName<'a> {
    pub prefix: &'a str,
    pub local_name: &'a str,
}

/// `Q{uri}local-name`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct URIQualifiedName<'a> {
    pub uri: &'a str,
    pub local_name: &'a str,
}

/// `prefix:*`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LocalNameWildcard<'a> {
    pub prefix: &'a str,
}

/// `*:local-name`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrefixWildcard<'a> {
    pub local_name: &'a str,
}

/// `Q{uri}*`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BracedURILiteralWildcard<'a> {
    pub uri: &'a str,
}

/// A Metapath token.
///
/// There are no keyword tokens. `for`, `child`, `div` and the like come out
/// as [`Token::NCName`] and the parser decides what they mean from where they
/// stand, so any of them can still name a field or flag.
#[derive(Logos, Clone, Debug, PartialEq)]
#[logos(subpattern name_start_char_without_colon = r"[A-Za-z_\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37d}\u{37f}-\u{1fff}\u{200c}-\u{200d}\u{2070}-\u{218f}\u{2c00}-\u{2fef}\u{3001}-\u{d7ff}\u{f900}-\u{fdcf}\u{fdf0}-\u{fffd}\u{10000}-\u{effff}]")]
#[logos(subpattern name_char_without_colon = r"(?&name_start_char_without_colon)|[\-\.0-9\u{b7}\u{300}-\u{36F}\u{203f}-\u{2040}]")]
#[logos(subpattern ncname = r"(?&name_start_char_without_colon)(?&name_char_without_colon)*")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Token<'a> {
    Error,
    #[regex(r"[0-9]+", integer_literal, priority = 3)]
    IntegerLiteral(IBig),
    #[regex(r"(\.[0-9]+)|([0-9]+\.[0-9]*)", decimal_literal, priority = 2)]
    DecimalLiteral(Decimal),
    // there is no binary floating point type, so a double literal is read
    // into a decimal
    #[regex(
        r"(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][+-]?[0-9]+)",
        double_literal,
        priority = 2
    )]
    DoubleLiteral(Decimal),
    #[regex(r#""(?:""|[^"])*"|'(?:''|[^'])*'"#, string_literal, priority = 1)]
    StringLiteral(Cow<'a, str>),
    // assembled by the scanner from adjacent tokens
    PrefixedQName(PrefixedQName<'a>),
    URIQualifiedName(URIQualifiedName<'a>),
    LocalNameWildcard(LocalNameWildcard<'a>),
    PrefixWildcard(PrefixWildcard<'a>),
    BracedURILiteralWildcard(BracedURILiteralWildcard<'a>),

    #[regex(r"(?&ncname)", priority = 2)]
    NCName(&'a str),

    #[regex(r#"Q\{[^\{\}]*\}"#, braced_uri_literal, priority = 4)]
    BracedURILiteral(&'a str),

    #[token("!")]
    ExclamationMark,
    #[token("!=")]
    NotEqual,
    #[token("$")]
    Dollar,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("*")]
    Asterisk,
    #[token("*:")]
    AsteriskColon,
    #[token("+")]
    Plus,
    #[token(",")]
    Comma,
    #[token("-")]
    Minus,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token(":")]
    Colon,
    #[token(":*")]
    ColonAsterisk,
    #[token("::")]
    DoubleColon,
    #[token(":=")]
    ColonEqual,
    #[token("<")]
    LessThan,
    #[token("<<")]
    Precedes,
    #[token("<=")]
    LessThanEqual,
    #[token("=")]
    Equal,
    #[token("=>")]
    Arrow,
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEqual,
    #[token(">>")]
    Follows,
    #[token("?")]
    QuestionMark,
    #[token("@")]
    At,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("|")]
    Pipe,
    #[token("||")]
    DoublePipe,
    #[token("}")]
    RightBrace,

    #[regex(r"[\u{20}\u{9}\u{d}\u{a}]+", priority = 4)]
    Whitespace,
    #[regex(r"\(:")]
    CommentStart,
    #[regex(r":\)")]
    CommentEnd,
}

fn integer_literal<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Result<IBig, ()> {
    IBig::from_str_radix(lex.slice(), 10).map_err(|_| ())
}

fn decimal_literal<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Result<Decimal, ()> {
    lex.slice().try_into().map_err(|_| ())
}

fn double_literal<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Result<Decimal, ()> {
    Decimal::from_scientific(lex.slice()).map_err(|_| ())
}

fn string_literal<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Cow<'a, str> {
    let slice = lex.slice();
    let (quote, rest) = slice.split_at(1);
    let body = &rest[..rest.len() - 1];
    // a quote is escaped by doubling it
    let escaped = if quote == "'" { "''" } else { "\"\"" };
    if body.contains(escaped) {
        Cow::Owned(body.replace(escaped, quote))
    } else {
        Cow::Borrowed(body)
    }
}

fn braced_uri_literal<'a>(lex: &mut Lexer<'a, Token<'a>>) -> &'a str {
    let slice = lex.slice();
    &slice[2..slice.len() - 1]
}

impl Token<'_> {
    /// Names and numbers. Two of these in a row must be kept apart by
    /// whitespace or a comment, so `10div 3` does not lex.
    pub(crate) fn is_non_delimiting(&self) -> bool {
        matches!(
            self,
            Token::IntegerLiteral(_)
                | Token::DecimalLiteral(_)
                | Token::DoubleLiteral(_)
                | Token::NCName(_)
                | Token::PrefixedQName(_)
                | Token::URIQualifiedName(_)
                | Token::LocalNameWildcard(_)
        )
    }
}
