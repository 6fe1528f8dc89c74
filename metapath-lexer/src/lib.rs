//! Tokenizer for Metapath expressions.
//!
//! [`lexer`] yields significant tokens only. Whitespace and comments are
//! consumed, qualified names and wildcards are assembled from their parts,
//! and anything malformed comes out as [`Token::Error`].
mod scanner;
mod token;

pub use scanner::lexer;
pub use token::{
    BracedURILiteralWildcard, LocalNameWildcard, PrefixWildcard, PrefixedQName, Token,
    URIQualifiedName,
};
pub use logos::Span;
