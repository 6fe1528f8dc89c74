pub mod ast;
mod error;
mod operator;
mod parser;
mod span;

pub use error::ParserError;
pub use operator::BinaryOperator;
pub use parser::{parse_expression, parse_sequence_type, parse_signature, parse_single_type};
pub use span::{Span, Spanned};
