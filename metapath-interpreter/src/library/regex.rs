use regex::Regex;

use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{one_arg, pure, string_arg};

/// Compile a pattern with Metapath flags. The pattern is compiled anew for
/// every call.
fn build_regex(pattern: &str, flags: &str) -> error::Result<Regex> {
    let mut prefix = String::new();
    let mut literal = false;
    for flag in flags.chars() {
        match flag {
            's' | 'm' | 'i' | 'x' => {
                if !prefix.contains(flag) {
                    prefix.push(flag);
                }
            }
            'q' => literal = true,
            _ => return Err(error::Error::FORX0001),
        }
    }
    let pattern = if literal {
        regex::escape(pattern)
    } else {
        pattern.to_string()
    };
    let pattern = if prefix.is_empty() {
        pattern
    } else {
        format!("(?{}){}", prefix, pattern)
    };
    Regex::new(&pattern).map_err(|_| error::Error::FORX0002)
}

fn flags_arg(arguments: &[Sequence], index: usize) -> error::Result<String> {
    match arguments.get(index) {
        Some(flags) => Ok(one_arg(flags)?.string_value()),
        None => Ok(String::new()),
    }
}

/// Translate a replacement string: `$n` refers to a group, `\$` and `\\`
/// are escapes. Anything else using `$` or `\` is `FORX0004`.
fn replacement(replacement: &str, literal: bool) -> error::Result<String> {
    if literal {
        return Ok(replacement.replace('$', "$$"));
    }
    let mut result = String::new();
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('$') => result.push_str("$$"),
                Some('\\') => result.push('\\'),
                _ => return Err(error::Error::FORX0004),
            },
            '$' => {
                let mut digits = String::new();
                while let Some(digit) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    digits.push(*digit);
                    chars.next();
                }
                if digits.is_empty() {
                    return Err(error::Error::FORX0004);
                }
                result.push_str(&format!("${{{}}}", digits));
            }
            _ => result.push(c),
        }
    }
    Ok(result)
}

fn matches(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let input = string_arg(&arguments[0])?;
    let pattern = one_arg(&arguments[1])?.string_value();
    let regex = build_regex(&pattern, &flags_arg(arguments, 2)?)?;
    Ok(regex.is_match(&input).into())
}

fn replace(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let input = string_arg(&arguments[0])?;
    let pattern = one_arg(&arguments[1])?.string_value();
    let flags = flags_arg(arguments, 3)?;
    let regex = build_regex(&pattern, &flags)?;
    if regex.is_match("") {
        return Err(error::Error::FORX0003);
    }
    let replacement = replacement(&one_arg(&arguments[2])?.string_value(), flags.contains('q'))?;
    Ok(regex.replace_all(&input, replacement.as_str()).into_owned().into())
}

/// With one argument the input is split on whitespace after normalizing
/// it.
fn tokenize(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let input = string_arg(&arguments[0])?;
    let Some(pattern) = arguments.get(1) else {
        let tokens = input
            .split_whitespace()
            .map(|token| token.to_string().into())
            .collect::<Vec<crate::atomic::Atomic>>();
        return Ok(tokens.into());
    };
    if input.is_empty() {
        return Ok(Sequence::Empty);
    }
    let regex = build_regex(&one_arg(pattern)?.string_value(), &flags_arg(arguments, 2)?)?;
    if regex.is_match("") {
        return Err(error::Error::FORX0003);
    }
    let tokens = regex
        .split(&input)
        .map(|token| token.to_string().into())
        .collect::<Vec<crate::atomic::Atomic>>();
    Ok(tokens.into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure(
            "fn:matches($input as string?, $pattern as string) as boolean",
            matches,
        )?,
        pure(
            "fn:matches($input as string?, $pattern as string, $flags as string) as boolean",
            matches,
        )?,
        pure(
            "fn:replace($input as string?, $pattern as string, $replacement as string) as string",
            replace,
        )?,
        pure(
            "fn:replace($input as string?, $pattern as string, $replacement as string, $flags as string) as string",
            replace,
        )?,
        pure("fn:tokenize($input as string?) as string*", tokenize)?,
        pure(
            "fn:tokenize($input as string?, $pattern as string) as string*",
            tokenize,
        )?,
        pure(
            "fn:tokenize($input as string?, $pattern as string, $flags as string) as string*",
            tokenize,
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_flag() {
        assert_eq!(build_regex("a", "k").unwrap_err(), error::Error::FORX0001);
    }

    #[test]
    fn test_invalid_pattern() {
        assert_eq!(build_regex("(a", "").unwrap_err(), error::Error::FORX0002);
    }

    #[test]
    fn test_case_insensitive_flag() {
        assert!(build_regex("abc", "i").unwrap().is_match("ABC"));
    }

    #[test]
    fn test_literal_flag() {
        assert!(build_regex("a.c", "q").unwrap().is_match("a.c"));
        assert!(!build_regex("a.c", "q").unwrap().is_match("abc"));
    }

    #[test]
    fn test_replacement_groups() {
        assert_eq!(replacement("$1-$2", false).unwrap(), "${1}-${2}");
        assert_eq!(replacement("\\$", false).unwrap(), "$$");
        assert_eq!(replacement("$", false).unwrap_err(), error::Error::FORX0004);
    }
}
