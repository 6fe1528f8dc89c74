use crate::atomic::Atomic;
use crate::context::{DynamicContext, Focus};
use crate::error;
use crate::expr::{Expr, KeySpecifier};
use crate::function::{Array, Function, Map};
use crate::sequence::{Item, Sequence};

use super::evaluate;

/// Call a map or array with one key argument.
pub(super) fn dynamic_call(
    base: &Expr,
    arguments: &[Expr],
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let function = evaluate(base, context, focus)?.one()?.to_function()?;
    let [argument] = arguments else {
        return Err(error::Error::MPTY0004);
    };
    let key = evaluate(argument, context, focus)?.atomized_one()?;
    match function {
        Function::Map(map) => Ok(map.get(&key).cloned().unwrap_or_default()),
        Function::Array(array) => Ok(array.member(&key.to_integer()?)?.clone()),
    }
}

/// `base?key` for every item of `base`, concatenated.
pub(super) fn lookup(
    base: &Sequence,
    key: &KeySpecifier,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let keys = match key {
        KeySpecifier::NcName(name) => Some(vec![Atomic::from(name.as_str())]),
        KeySpecifier::Integer(i) => Some(vec![Atomic::from(i.clone())]),
        KeySpecifier::Expr(expr) => Some(evaluate(expr, context, focus)?.atomized()?),
        KeySpecifier::Star => None,
    };
    let mut items = Vec::new();
    for item in base.iter() {
        let function = match item {
            Item::Function(function) => function,
            _ => return Err(error::Error::MPTY0004),
        };
        let found = match (function, &keys) {
            (Function::Map(map), Some(keys)) => map_lookup(map, keys),
            (Function::Map(map), None) => map.entries().map(|(_, value)| value.clone()).collect(),
            (Function::Array(array), Some(keys)) => array_lookup(array, keys)?,
            (Function::Array(array), None) => array.iter().cloned().collect(),
        };
        for sequence in found {
            items.extend(sequence.into_items());
        }
    }
    Ok(Sequence::new(items))
}

fn map_lookup(map: &Map, keys: &[Atomic]) -> Vec<Sequence> {
    keys.iter().filter_map(|key| map.get(key).cloned()).collect()
}

fn array_lookup(array: &Array, keys: &[Atomic]) -> error::Result<Vec<Sequence>> {
    keys.iter()
        .map(|key| match key {
            Atomic::Integer(_, i) => array.member(i).cloned(),
            _ => Err(error::Error::MPTY0004),
        })
        .collect()
}

pub(super) fn map_constructor(
    entries: &[(Expr, Expr)],
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let entries = entries
        .iter()
        .map(|(key, value)| {
            let key = evaluate(key, context, focus)?.atomized_one()?;
            let value = evaluate(value, context, focus)?;
            Ok((key, value))
        })
        .collect::<error::Result<Vec<_>>>()?;
    Ok(Map::new(entries)?.into())
}
