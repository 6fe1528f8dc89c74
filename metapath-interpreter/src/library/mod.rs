/// The built-in function library. Each group of functions lives in its own
/// module and declares its functions by signature.
mod accessor;
mod array;
mod boolean;
mod constructor;
mod datetime;
mod extended;
mod map;
mod math;
mod numeric;
mod regex;
mod sequence;
mod string;
mod uri;

use crate::atomic::{Atomic, StringType};
use crate::error;
use crate::function::{FunctionFlags, FunctionHandler, StaticFunctionDescription};
use crate::sequence::Sequence;

pub(crate) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    let mut descriptions = Vec::new();
    descriptions.extend(boolean::static_function_descriptions()?);
    descriptions.extend(accessor::static_function_descriptions()?);
    descriptions.extend(numeric::static_function_descriptions()?);
    descriptions.extend(string::static_function_descriptions()?);
    descriptions.extend(regex::static_function_descriptions()?);
    descriptions.extend(sequence::static_function_descriptions()?);
    descriptions.extend(datetime::static_function_descriptions()?);
    descriptions.extend(uri::static_function_descriptions()?);
    descriptions.extend(math::static_function_descriptions()?);
    descriptions.extend(map::static_function_descriptions()?);
    descriptions.extend(array::static_function_descriptions()?);
    descriptions.extend(extended::static_function_descriptions()?);
    descriptions.extend(constructor::static_function_descriptions()?);
    Ok(descriptions)
}

/// A deterministic function that ignores the dynamic context.
fn pure(signature: &str, handler: FunctionHandler) -> error::Result<StaticFunctionDescription> {
    StaticFunctionDescription::new(signature, FunctionFlags::DETERMINISTIC, handler)
}

fn contextual(
    signature: &str,
    handler: FunctionHandler,
) -> error::Result<StaticFunctionDescription> {
    StaticFunctionDescription::new(signature, FunctionFlags::CONTEXT_DEPENDENT, handler)
}

/// The string value of an optional argument; the empty sequence gives the
/// empty string.
fn string_arg(argument: &Sequence) -> error::Result<String> {
    Ok(argument
        .atomized_option()?
        .map(|atomic| atomic.string_value())
        .unwrap_or_default())
}

fn optional_arg(argument: &Sequence) -> error::Result<Option<Atomic>> {
    argument.atomized_option()
}

fn one_arg(argument: &Sequence) -> error::Result<Atomic> {
    argument.atomized_one()
}

fn uri(value: &str) -> Atomic {
    Atomic::String(StringType::Uri, value.into())
}
