use std::fmt::Write;

use iri_string::types::{IriAbsoluteStr, IriReferenceStr};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{contextual, one_arg, optional_arg, pure, string_arg, uri};

// everything but letters, digits and `-_.~`
const ENCODE_FOR_URI: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn resolve(relative: &str, base: &str) -> error::Result<String> {
    let relative = IriReferenceStr::new(relative).map_err(|_| error::Error::FORG0002)?;
    if relative.to_iri().is_ok() {
        return Ok(relative.as_str().to_string());
    }
    let base = IriAbsoluteStr::new(base).map_err(|_| error::Error::FORG0002)?;
    let mut resolved = String::new();
    write!(resolved, "{}", relative.resolve_against(base)).map_err(|_| error::Error::FORG0002)?;
    Ok(resolved)
}

fn resolve_uri(context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let Some(relative) = optional_arg(&arguments[0])? else {
        return Ok(Sequence::Empty);
    };
    let base = match arguments.get(1) {
        Some(base) => one_arg(base)?.string_value(),
        None => context
            .static_context()
            .static_base_uri()
            .map(|base| base.as_str().to_string())
            .ok_or(error::Error::FONS0005)?,
    };
    Ok(uri(&resolve(&relative.string_value(), &base)?).into())
}

fn encode_for_uri(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    Ok(utf8_percent_encode(&value, &ENCODE_FOR_URI).to_string().into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        contextual("fn:resolve-uri($relative as string?) as uri?", resolve_uri)?,
        pure(
            "fn:resolve-uri($relative as string?, $base as string) as uri?",
            resolve_uri,
        )?,
        pure("fn:encode-for-uri($uri-part as string?) as string", encode_for_uri)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve("b/c", "http://example.com/a/").unwrap(),
            "http://example.com/a/b/c"
        );
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        assert_eq!(
            resolve("http://other.org/x", "http://example.com/").unwrap(),
            "http://other.org/x"
        );
    }

    #[test]
    fn test_encode() {
        let encoded = utf8_percent_encode("a b/c~", &ENCODE_FOR_URI).to_string();
        assert_eq!(encoded, "a%20b%2Fc~");
    }
}
