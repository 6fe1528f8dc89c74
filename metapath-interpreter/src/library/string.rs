use rust_decimal::Decimal;

use crate::atomic::{round_decimal, Atomic};
use crate::context::DynamicContext;
use crate::error;
use crate::function::{FunctionKind, StaticFunctionDescription};
use crate::sequence::Sequence;

use super::{one_arg, optional_arg, pure, string_arg};

const CONCAT_MAX_ARITY: usize = 16;

fn concat(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let mut result = String::new();
    for argument in arguments {
        result.push_str(&string_arg(argument)?);
    }
    Ok(result.into())
}

fn concat_signature(arity: usize) -> String {
    let parameters = (1..=arity)
        .map(|i| format!("$arg{} as any-atomic-type?", i))
        .collect::<Vec<_>>();
    format!("fn:concat({}) as string", parameters.join(", "))
}

fn string_join(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let separator = match arguments.get(1) {
        Some(separator) => one_arg(separator)?.string_value(),
        None => String::new(),
    };
    let parts = arguments[0]
        .atomized()?
        .iter()
        .map(|atomic| atomic.string_value())
        .collect::<Vec<_>>();
    Ok(parts.join(&separator).into())
}

/// The characters at 1-based positions `p` with
/// `round(start) <= p < round(start) + round(length)`.
fn substring(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let source = string_arg(&arguments[0])?;
    let start = round_decimal(one_arg(&arguments[1])?.to_decimal()?, 0);
    let end = match arguments.get(2) {
        Some(length) => {
            let length = round_decimal(one_arg(length)?.to_decimal()?, 0);
            Some(start.checked_add(length).ok_or(error::Error::FOAR0002)?)
        }
        None => None,
    };
    let result = source
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let position = Decimal::from(*i + 1);
            position >= start && end.map_or(true, |end| position < end)
        })
        .map(|(_, c)| c)
        .collect::<String>();
    Ok(result.into())
}

fn string_length(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(Atomic::from(string_arg(&arguments[0])?.chars().count()).into())
}

fn normalize_space(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    Ok(value.split_whitespace().collect::<Vec<_>>().join(" ").into())
}

fn upper_case(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(string_arg(&arguments[0])?.to_uppercase().into())
}

fn lower_case(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(string_arg(&arguments[0])?.to_lowercase().into())
}

/// Characters found in `map` are replaced by the character at the same
/// position in `trans`, or removed if `trans` is shorter.
fn translate(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    let map = one_arg(&arguments[1])?.string_value().chars().collect::<Vec<_>>();
    let trans = one_arg(&arguments[2])?.string_value().chars().collect::<Vec<_>>();
    let result = value
        .chars()
        .filter_map(|c| match map.iter().position(|m| *m == c) {
            Some(index) => trans.get(index).copied(),
            None => Some(c),
        })
        .collect::<String>();
    Ok(result.into())
}

fn contains(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    let search = string_arg(&arguments[1])?;
    Ok(value.contains(&search).into())
}

fn starts_with(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    let search = string_arg(&arguments[1])?;
    Ok(value.starts_with(&search).into())
}

fn ends_with(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    let search = string_arg(&arguments[1])?;
    Ok(value.ends_with(&search).into())
}

fn substring_before(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    let search = string_arg(&arguments[1])?;
    let result = match value.find(&search) {
        Some(index) => &value[..index],
        None => "",
    };
    Ok(result.into())
}

fn substring_after(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = string_arg(&arguments[0])?;
    let search = string_arg(&arguments[1])?;
    let result = match value.find(&search) {
        Some(index) => &value[index + search.len()..],
        None => "",
    };
    Ok(result.into())
}

/// Codepoint comparison: -1, 0 or 1.
fn compare(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let (a, b) = match (optional_arg(&arguments[0])?, optional_arg(&arguments[1])?) {
        (Some(a), Some(b)) => (a.string_value(), b.string_value()),
        _ => return Ok(Sequence::Empty),
    };
    let result: i64 = match a.cmp(&b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    };
    Ok(Atomic::from(result).into())
}

fn codepoints_to_string(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    let result = arguments[0]
        .atomized()?
        .iter()
        .map(|atomic| {
            let codepoint = u32::try_from(atomic.to_i64()?).map_err(|_| error::Error::FOCH0001)?;
            char::from_u32(codepoint).ok_or(error::Error::FOCH0001)
        })
        .collect::<error::Result<String>>()?;
    Ok(result.into())
}

fn string_to_codepoints(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    let codepoints = string_arg(&arguments[0])?
        .chars()
        .map(|c| Atomic::from(c as i64))
        .collect::<Vec<_>>();
    Ok(codepoints.into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    let mut descriptions = Vec::new();
    for arity in 2..=CONCAT_MAX_ARITY {
        descriptions.push(pure(&concat_signature(arity), concat)?);
    }
    descriptions.extend([
        pure("fn:string-join($arg1 as any-atomic-type*) as string", string_join)?,
        pure(
            "fn:string-join($arg1 as any-atomic-type*, $arg2 as string) as string",
            string_join,
        )?,
        pure(
            "fn:substring($source as string?, $start as decimal) as string",
            substring,
        )?,
        pure(
            "fn:substring($source as string?, $start as decimal, $length as decimal) as string",
            substring,
        )?,
        pure("fn:string-length($arg as string?) as integer", string_length)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:normalize-space($arg as string?) as string", normalize_space)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:upper-case($arg as string?) as string", upper_case)?,
        pure("fn:lower-case($arg as string?) as string", lower_case)?,
        pure(
            "fn:translate($arg as string?, $map as string, $trans as string) as string",
            translate,
        )?,
        pure("fn:contains($arg1 as string?, $arg2 as string?) as boolean", contains)?,
        pure(
            "fn:starts-with($arg1 as string?, $arg2 as string?) as boolean",
            starts_with,
        )?,
        pure("fn:ends-with($arg1 as string?, $arg2 as string?) as boolean", ends_with)?,
        pure(
            "fn:substring-before($arg1 as string?, $arg2 as string?) as string",
            substring_before,
        )?,
        pure(
            "fn:substring-after($arg1 as string?, $arg2 as string?) as string",
            substring_after,
        )?,
        pure(
            "fn:compare($comparand1 as string?, $comparand2 as string?) as integer?",
            compare,
        )?,
        pure(
            "fn:codepoints-to-string($arg as integer*) as string",
            codepoints_to_string,
        )?,
        pure(
            "fn:string-to-codepoints($arg as string?) as integer*",
            string_to_codepoints,
        )?,
    ]);
    Ok(descriptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_signature() {
        assert_eq!(
            concat_signature(2),
            "fn:concat($arg1 as any-atomic-type?, $arg2 as any-atomic-type?) as string"
        );
    }
}
