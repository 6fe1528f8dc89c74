use ibig::IBig;

use crate::atomic::Atomic;
use crate::context::DynamicContext;
use crate::error;
use crate::function::{Array, StaticFunctionDescription};
use crate::sequence::Sequence;

use super::{one_arg, pure};

fn array_arg(argument: &Sequence) -> error::Result<Array> {
    argument.clone().one()?.to_array()
}

fn integer_arg(argument: &Sequence) -> error::Result<IBig> {
    one_arg(argument)?.to_integer()
}

fn size(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(Atomic::from(array_arg(&arguments[0])?.len()).into())
}

fn get(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let array = array_arg(&arguments[0])?;
    let position = integer_arg(&arguments[1])?;
    Ok(array.member(&position)?.clone())
}

fn put(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let array = array_arg(&arguments[0])?;
    let index = array.position_to_index(&integer_arg(&arguments[1])?)?;
    let array = array.put(index, &arguments[2]).ok_or(error::Error::FOAY0001)?;
    Ok(array.into())
}

fn append(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(array_arg(&arguments[0])?.append(&arguments[1]).into())
}

/// Members from a 1-based start, to the end or for a given length.
fn subarray(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let array = array_arg(&arguments[0])?;
    let start: usize = integer_arg(&arguments[1])?
        .try_into()
        .map_err(|_| error::Error::FOAY0001)?;
    if start == 0 {
        return Err(error::Error::FOAY0001);
    }
    let start = start - 1;
    let length = match arguments.get(2) {
        Some(length) => {
            let length = integer_arg(length)?;
            if length < IBig::from(0u8) {
                return Err(error::Error::FOAY0002);
            }
            usize::try_from(&length).map_err(|_| error::Error::FOAY0001)?
        }
        None => array.len().checked_sub(start).ok_or(error::Error::FOAY0001)?,
    };
    let array = array.subarray(start, length).ok_or(error::Error::FOAY0001)?;
    Ok(array.into())
}

fn remove(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let array = array_arg(&arguments[0])?;
    let positions = arguments[1]
        .atomized()?
        .iter()
        .map(|position| array.position_to_index(&position.to_integer()?))
        .collect::<error::Result<Vec<_>>>()?;
    let array = array
        .remove_positions(&positions)
        .ok_or(error::Error::FOAY0001)?;
    Ok(array.into())
}

fn insert_before(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let array = array_arg(&arguments[0])?;
    let index = array.position_to_index(&integer_arg(&arguments[1])?)?;
    let array = array
        .insert_before(index, &arguments[2])
        .ok_or(error::Error::FOAY0001)?;
    Ok(array.into())
}

fn head(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let array = array_arg(&arguments[0])?;
    array.index(0).cloned().ok_or(error::Error::FOAY0001)
}

fn tail(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let array = array_arg(&arguments[0])?;
    if array.is_empty() {
        return Err(error::Error::FOAY0001);
    }
    let array = array
        .subarray(1, array.len() - 1)
        .ok_or(error::Error::FOAY0001)?;
    Ok(array.into())
}

fn reverse(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(array_arg(&arguments[0])?.reversed().into())
}

fn join(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let arrays = arguments[0]
        .iter()
        .map(|item| item.to_array())
        .collect::<error::Result<Vec<_>>>()?;
    Ok(Array::join(&arrays).into())
}

fn flatten(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let mut items = Vec::new();
    for item in arguments[0].iter() {
        match item.to_array() {
            Ok(array) => items.extend(array.flatten()),
            Err(_) => items.push(item.clone()),
        }
    }
    Ok(items.into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("array:size($array as array(*)) as integer", size)?,
        pure(
            "array:get($array as array(*), $position as integer) as item()*",
            get,
        )?,
        pure(
            "array:put($array as array(*), $position as integer, $member as item()*) as array(*)",
            put,
        )?,
        pure(
            "array:append($array as array(*), $appendage as item()*) as array(*)",
            append,
        )?,
        pure(
            "array:subarray($array as array(*), $start as integer) as array(*)",
            subarray,
        )?,
        pure(
            "array:subarray($array as array(*), $start as integer, $length as integer) as array(*)",
            subarray,
        )?,
        pure(
            "array:remove($array as array(*), $positions as integer*) as array(*)",
            remove,
        )?,
        pure(
            "array:insert-before($array as array(*), $position as integer, $member as item()*) as array(*)",
            insert_before,
        )?,
        pure("array:head($array as array(*)) as item()*", head)?,
        pure("array:tail($array as array(*)) as array(*)", tail)?,
        pure("array:reverse($array as array(*)) as array(*)", reverse)?,
        pure("array:join($arrays as array(*)*) as array(*)", join)?,
        pure("array:flatten($input as item()*) as item()*", flatten)?,
    ])
}
