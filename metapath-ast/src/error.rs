use chumsky::input::ValueInput;
use chumsky::prelude::SimpleSpan;
use chumsky::util::MaybeRef;
use metapath_lexer::Token;

use crate::span::Span;

/// A failure to parse. The compiler reports all of these as a grammar
/// error, except for an argument list that is too long.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParserError {
    #[error("expected {}, found {found} at {span}", one_of(.expected))]
    ExpectedFound {
        span: Span,
        expected: Vec<String>,
        found: String,
    },
    #[error("expected {}, found end of input", one_of(.expected))]
    UnexpectedEnd { span: Span, expected: Vec<String> },
    #[error("invalid token at {span}")]
    InvalidToken { span: Span },
    #[error("reserved name {name} cannot be called at {span}")]
    Reserved { span: Span, name: String },
    #[error("too many arguments at {span}")]
    ArityOverflow { span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            Self::ExpectedFound { span, .. } => *span,
            Self::UnexpectedEnd { span, .. } => *span,
            Self::InvalidToken { span } => *span,
            Self::Reserved { span, .. } => *span,
            Self::ArityOverflow { span } => *span,
        }
    }

    fn is_expectation(&self) -> bool {
        matches!(
            self,
            Self::ExpectedFound { .. } | Self::UnexpectedEnd { .. } | Self::InvalidToken { .. }
        )
    }
}

impl<'a, I> chumsky::error::Error<'a, I> for ParserError
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    fn expected_found<E: IntoIterator<Item = Option<MaybeRef<'a, Token<'a>>>>>(
        expected: E,
        found: Option<MaybeRef<'a, Token<'a>>>,
        span: SimpleSpan,
    ) -> Self {
        let span = Span::from(span);
        let expected = expected
            .into_iter()
            .map(|token| match token.as_deref() {
                Some(token) => describe(token),
                None => "end of input".to_string(),
            })
            .collect();
        match found.as_deref() {
            // the lexer marks malformed input; no grammar rule accepts it
            Some(Token::Error) => Self::InvalidToken { span },
            Some(token) => Self::ExpectedFound {
                span,
                expected,
                found: describe(token),
            },
            None => Self::UnexpectedEnd { span, expected },
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (
                Self::ExpectedFound {
                    span,
                    mut expected,
                    found,
                },
                Self::ExpectedFound { expected: more, .. },
            ) => {
                combine(&mut expected, more);
                Self::ExpectedFound {
                    span,
                    expected,
                    found,
                }
            }
            (
                Self::UnexpectedEnd { span, mut expected },
                Self::UnexpectedEnd { expected: more, .. },
            ) => {
                combine(&mut expected, more);
                Self::UnexpectedEnd { span, expected }
            }
            (a, b) if a.is_expectation() && !b.is_expectation() => b,
            (a, _) => a,
        }
    }
}

fn combine(expected: &mut Vec<String>, more: Vec<String>) {
    for entry in more {
        if !expected.contains(&entry) {
            expected.push(entry);
        }
    }
}

fn one_of(expected: &[String]) -> String {
    match expected {
        [] => "something else".to_string(),
        [only] => only.clone(),
        _ => format!("one of {}", expected.join(", ")),
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::NCName(name) => format!("'{}'", name),
        Token::PrefixedQName(name) => format!("'{}:{}'", name.prefix, name.local_name),
        Token::StringLiteral(s) => format!("string literal \"{}\"", s),
        Token::IntegerLiteral(i) => format!("integer literal {}", i),
        Token::DecimalLiteral(d) | Token::DoubleLiteral(d) => format!("numeric literal {}", d),
        other => format!("{:?}", other),
    }
}
