use ibig::error::OutOfBoundsError;
use metapath_ast::ParserError;
use strum::EnumMessage;
use strum_macros::{Display, EnumMessage};

use crate::span::SourceSpan;

/// An error code with an optional source span.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpannedError {
    /// The error code
    pub error: Error,
    /// The source span where the error occurred
    pub span: Option<SourceSpan>,
}

/// The family an error code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFamily {
    /// Detected while compiling.
    Static,
    /// Detected while evaluating.
    Dynamic,
    /// A value did not have the type that was required.
    Type,
    /// Raised by a built-in function.
    Function,
}

/// Metapath error code.
///
/// Static (`MPST`), dynamic (`MPDY`) and type (`MPTY`) errors are raised by
/// the language itself. `FO*` codes are raised by the function library.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumMessage)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Error {
    /// Invalid grammar.
    ///
    /// It is a static error if an expression is not a valid instance of the
    /// Metapath grammar.
    MPST0003,
    /// Name not defined.
    ///
    /// It is a static error if an expression refers to a name that is not
    /// defined in the static context.
    MPST0008,
    /// No function with matching name and arity.
    ///
    /// It is a static error if the expanded name and number of arguments in
    /// a static function call do not match the name and arity of a function
    /// in the static context.
    MPST0017,
    /// Unknown type.
    ///
    /// It is a static error if a type name used in a cast, castable or
    /// sequence type is not a defined data type.
    MPST0051,
    /// Reserved namespace misuse.
    ///
    /// It is a static error to bind a well-known prefix to a namespace other
    /// than its own.
    MPST0070,
    /// Cast to abstract type.
    ///
    /// It is a static error if the target of a cast or castable expression
    /// is an abstract type such as `any-atomic-type` or `numeric`.
    MPST0080,
    /// Unexpandable prefix.
    ///
    /// It is a static error if a prefix used in a name has no namespace
    /// binding in the static context.
    MPST0081,
    /// Context absent.
    ///
    /// It is a dynamic error if evaluation relies on a part of the dynamic
    /// context that is absent, such as the context item or a variable.
    MPDY0002,
    /// Treat type does not match.
    ///
    /// It is a dynamic error if the operand of a treat expression does not
    /// match the sequence type named in the expression.
    MPDY0050,
    /// Duplicate map key.
    ///
    /// It is a dynamic error if two entries of a map constructor have the
    /// same key.
    MPDY0137,
    /// Type error.
    ///
    /// It is a type error if a value does not match a required type, for
    /// instance an operand of an arithmetic expression or an argument of a
    /// function call.
    MPTY0004,
    /// Path base is not a node sequence.
    ///
    /// It is a type error if the left-hand side of a path step does not
    /// evaluate to a sequence of nodes.
    MPTY0019,
    /// Step on a non-node focus.
    ///
    /// It is a type error if, in an axis step, the context item is not a
    /// node.
    MPTY0020,
    /// Division by zero.
    ///
    /// This error is raised whenever an attempt is made to divide by zero.
    FOAR0001,
    /// Numeric operation overflow/underflow.
    ///
    /// The result of a numeric or temporal operation is outside the range
    /// that can be represented.
    FOAR0002,
    /// Array index out of bounds.
    ///
    /// This error is raised whenever an attempt is made to access a member
    /// of an array beyond its bounds.
    FOAY0001,
    /// Negative array length.
    ///
    /// This error is raised when the length argument of an array function is
    /// negative.
    FOAY0002,
    /// Invalid lexical value.
    ///
    /// A value could not be parsed as the required type.
    FOCA0002,
    /// Input value too large for integer.
    ///
    /// The integer value does not fit the target representation.
    FOCA0003,
    /// Code point not valid.
    ///
    /// An integer passed to fn:codepoints-to-string() is not a valid
    /// Unicode scalar value.
    FOCH0001,
    /// Unsupported collation.
    ///
    /// Only the codepoint collation is supported.
    FOCH0002,
    /// Error retrieving resource.
    ///
    /// The requested document is not available in the dynamic context.
    FODC0002,
    /// Overflow/underflow in date/time operation.
    ///
    /// The result of a date/time operation is outside the supported range.
    FODT0001,
    /// Unidentified error.
    ///
    /// An error raised without a more specific code.
    FOER0000,
    /// Base-uri not defined in the static context.
    ///
    /// fn:resolve-uri() was called without a base and the static context
    /// has no base URI.
    FONS0005,
    /// Invalid value for cast/constructor.
    ///
    /// The value cannot be cast to the target type, for instance because it
    /// is outside the range of a restricted type.
    FORG0001,
    /// Invalid argument to fn:resolve-uri().
    ///
    /// The relative reference or the base is not a valid URI.
    FORG0002,
    /// fn:zero-or-one called with a sequence containing more than one item.
    ///
    /// The argument had more than one item.
    FORG0003,
    /// fn:one-or-more called with a sequence containing no items.
    ///
    /// The argument was empty.
    FORG0004,
    /// fn:exactly-one called with a sequence containing zero or more than
    /// one item.
    ///
    /// The argument did not have exactly one item.
    FORG0005,
    /// Invalid argument type.
    ///
    /// The argument has a type that the function cannot process, such as a
    /// function item in an effective boolean value.
    FORG0006,
    /// Invalid regular expression flags.
    ///
    /// The flags argument contains a character other than `s`, `m`, `i`,
    /// `x` or `q`.
    FORX0001,
    /// Invalid regular expression.
    ///
    /// The pattern is not a valid regular expression.
    FORX0002,
    /// Regular expression matches zero-length string.
    ///
    /// The pattern given to a replacing or tokenizing function matches the
    /// empty string.
    FORX0003,
    /// Invalid replacement string.
    ///
    /// The replacement string contains a `$` or `\` that is not part of a
    /// valid group reference or escape.
    FORX0004,
    /// No typed value.
    ///
    /// A node has no typed value to atomize to.
    FOTY0012,
    /// The argument to fn:data() contains a function item.
    ///
    /// Maps are function items and cannot be atomized.
    FOTY0013,
    /// The argument to fn:string() is a function item.
    ///
    /// Maps and arrays have no string value.
    FOTY0014,
}

impl Error {
    pub fn with_span(self, span: SourceSpan) -> SpannedError {
        SpannedError {
            error: self,
            span: Some(span),
        }
    }

    pub fn with_ast_span(self, span: metapath_ast::Span) -> SpannedError {
        Self::with_span(self, span.into())
    }

    /// The `PREFIXNNNN` form of the code.
    pub fn code(&self) -> String {
        self.to_string()
    }

    pub fn family(&self) -> ErrorFamily {
        let code = self.code();
        if code.starts_with("MPST") {
            ErrorFamily::Static
        } else if code.starts_with("MPTY") {
            ErrorFamily::Type
        } else if code.starts_with("MPDY") || self.is_regex_error() {
            ErrorFamily::Dynamic
        } else {
            ErrorFamily::Function
        }
    }

    /// Regular expression failures are reported as dynamic errors of their
    /// own kind.
    pub fn is_regex_error(&self) -> bool {
        matches!(
            self,
            Error::FORX0001 | Error::FORX0002 | Error::FORX0003 | Error::FORX0004
        )
    }

    pub fn message(&self) -> &str {
        self.documentation_pieces().0
    }

    pub fn note(&self) -> &str {
        self.documentation_pieces().1
    }

    fn documentation_pieces(&self) -> (&str, &str) {
        if let Some(documentation) = self.get_documentation() {
            let mut pieces = documentation.splitn(2, "\n\n");
            let first = pieces.next().unwrap_or("");
            let second = pieces.next().unwrap_or("");
            (first, second)
        } else {
            ("", "")
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(span) = self.span {
            let span = span.range();
            write!(f, "{} ({}..{})", self.error, span.start, span.end)
        } else {
            write!(f, "{}", self.error)
        }
    }
}

impl std::error::Error for SpannedError {}

impl From<ParserError> for SpannedError {
    fn from(e: ParserError) -> Self {
        let span = e.span();
        let error = match e {
            ParserError::ExpectedFound { .. }
            | ParserError::UnexpectedEnd { .. }
            | ParserError::InvalidToken { .. }
            | ParserError::Reserved { .. } => Error::MPST0003,
            ParserError::ArityOverflow { .. } => Error::MPST0017,
        };
        SpannedError {
            error,
            span: Some(span.into()),
        }
    }
}

impl From<Error> for SpannedError {
    fn from(e: Error) -> Self {
        SpannedError {
            error: e,
            span: None,
        }
    }
}

impl From<metapath_name::Error> for Error {
    fn from(e: metapath_name::Error) -> Self {
        match e {
            metapath_name::Error::UnknownPrefix(_) => Error::MPST0081,
            metapath_name::Error::ReservedPrefix(_) => Error::MPST0070,
        }
    }
}

impl From<OutOfBoundsError> for Error {
    fn from(_e: OutOfBoundsError) -> Self {
        Error::FOCA0003
    }
}

pub type Result<T> = std::result::Result<T, Error>;
/// The result type for errors with (optional) source spans.
pub type SpannedResult<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_message() {
        assert_eq!(Error::MPST0003.code(), "MPST0003");
        assert_eq!(Error::MPST0003.message(), "Invalid grammar.");
        assert!(Error::MPST0003.note().starts_with("It is a static error"));
    }

    #[test]
    fn test_family() {
        assert_eq!(Error::MPST0017.family(), ErrorFamily::Static);
        assert_eq!(Error::MPDY0002.family(), ErrorFamily::Dynamic);
        assert_eq!(Error::MPTY0020.family(), ErrorFamily::Type);
        assert_eq!(Error::FOAR0001.family(), ErrorFamily::Function);
        assert_eq!(Error::FORX0002.family(), ErrorFamily::Dynamic);
    }

    #[test]
    fn test_spanned_display() {
        let spanned = Error::MPST0003.with_span((3..5).into());
        assert_eq!(spanned.to_string(), "MPST0003 (3..5)");
        let unspanned: SpannedError = Error::MPDY0002.into();
        assert_eq!(unspanned.to_string(), "MPDY0002");
    }

    #[test]
    fn test_parser_error_is_grammar_error() {
        let err: SpannedError = metapath_ast::parse_expression("1 +").unwrap_err().into();
        assert_eq!(err.error, Error::MPST0003);
    }
}
