use std::rc::Rc;

use crate::atomic::Atomic;
use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{optional_arg, pure};

fn base64_encode(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(optional_arg(&arguments[0])?
        .map(|value| Atomic::Base64(Rc::new(value.string_value().into_bytes())))
        .into())
}

/// The decoded bytes must be UTF-8.
fn base64_decode(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    match optional_arg(&arguments[0])? {
        Some(Atomic::Base64(bytes)) => {
            let decoded =
                String::from_utf8(bytes.as_ref().clone()).map_err(|_| error::Error::FOCA0002)?;
            Ok(decoded.into())
        }
        Some(_) => Err(error::Error::MPTY0004),
        None => Ok(Sequence::Empty),
    }
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("mp:base64-encode($arg as string?) as base64?", base64_encode)?,
        pure("mp:base64-decode($arg as base64?) as string?", base64_decode)?,
    ])
}
