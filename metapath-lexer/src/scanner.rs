use itertools::{peek_nth, PeekNth};
use logos::{Logos, Span, SpannedIter};

use crate::token::{
    BracedURILiteralWildcard, LocalNameWildcard, PrefixWildcard, PrefixedQName, Token,
    URIQualifiedName,
};

/// Tokenize the input. Whitespace and comments are dropped; malformed input
/// shows up as `Token::Error`.
pub fn lexer(input: &str) -> impl Iterator<Item = (Token<'_>, Span)> {
    Scanner::new(input)
}

// Sits on top of the raw logos tokens. Whitespace is never emitted, so the
// parts of a compound name are recognized by their spans touching.
struct Scanner<'a> {
    raw: PeekNth<SpannedIter<'a, Token<'a>>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            raw: peek_nth(Token::lexer(input).spanned()),
        }
    }

    // The raw token `n` places ahead, if it starts right at `end`.
    fn adjacent(&mut self, n: usize, end: usize) -> Option<(Token<'a>, Span)> {
        match self.raw.peek_nth(n) {
            Some((Ok(token), span)) if span.start == end => Some((token.clone(), span.clone())),
            _ => None,
        }
    }

    fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.raw.next();
        }
    }

    // Comments nest. An unclosed comment is an error covering everything
    // consumed while looking for its end.
    fn skip_comment(&mut self, open: Span) -> Result<(), Span> {
        let mut depth = 1;
        let mut end = open.end;
        while depth > 0 {
            let Some((token, span)) = self.raw.next() else {
                return Err(open.start..end);
            };
            end = span.end;
            match token {
                Ok(Token::CommentStart) => depth += 1,
                Ok(Token::CommentEnd) => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    fn significant(&mut self) -> Option<(Token<'a>, Span)> {
        loop {
            let (token, span) = self.raw.next()?;
            match token {
                Ok(Token::Whitespace) => {}
                Ok(Token::CommentStart) => {
                    if let Err(span) = self.skip_comment(span) {
                        return Some((Token::Error, span));
                    }
                }
                Ok(Token::CommentEnd) | Err(_) => return Some((Token::Error, span)),
                Ok(token) => return Some((token, span)),
            }
        }
    }

    fn compose(&mut self, token: Token<'a>, span: Span) -> (Token<'a>, Span) {
        match token {
            Token::NCName(prefix) => match self.adjacent(0, span.end) {
                Some((Token::Colon, colon)) => match self.adjacent(1, colon.end) {
                    Some((Token::NCName(local_name), name)) => {
                        self.skip(2);
                        (
                            Token::PrefixedQName(PrefixedQName { prefix, local_name }),
                            span.start..name.end,
                        )
                    }
                    _ => (token, span),
                },
                Some((Token::ColonAsterisk, wildcard)) => {
                    self.skip(1);
                    (
                        Token::LocalNameWildcard(LocalNameWildcard { prefix }),
                        span.start..wildcard.end,
                    )
                }
                _ => (token, span),
            },
            Token::AsteriskColon => match self.adjacent(0, span.end) {
                Some((Token::NCName(local_name), name)) => {
                    self.skip(1);
                    (
                        Token::PrefixWildcard(PrefixWildcard { local_name }),
                        span.start..name.end,
                    )
                }
                _ => (token, span),
            },
            Token::BracedURILiteral(uri) => match self.adjacent(0, span.end) {
                Some((Token::NCName(local_name), name)) => {
                    self.skip(1);
                    (
                        Token::URIQualifiedName(URIQualifiedName { uri, local_name }),
                        span.start..name.end,
                    )
                }
                Some((Token::Asterisk, asterisk)) => {
                    self.skip(1);
                    (
                        Token::BracedURILiteralWildcard(BracedURILiteralWildcard { uri }),
                        span.start..asterisk.end,
                    )
                }
                _ => (token, span),
            },
            _ => (token, span),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = (Token<'a>, Span);

    fn next(&mut self) -> Option<Self::Item> {
        let (token, span) = self.significant()?;
        let (token, span) = self.compose(token, span);
        if token.is_non_delimiting() {
            if let Some((next, _)) = self.adjacent(0, span.end) {
                if next.is_non_delimiting() {
                    return Some((Token::Error, span));
                }
            }
        }
        Some((token, span))
    }
}
