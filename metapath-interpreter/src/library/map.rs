use crate::atomic::Atomic;
use crate::context::DynamicContext;
use crate::error;
use crate::function::{Array, Map, StaticFunctionDescription};
use crate::sequence::{Item, Sequence};

use super::{one_arg, pure};

fn map_arg(argument: &Sequence) -> error::Result<Map> {
    argument.clone().one()?.to_map()
}

/// `duplicates` option of `map:merge`.
fn merge(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let maps = arguments[0].maps()?;
    let duplicates = match arguments.get(1) {
        Some(options) => map_arg(options)?
            .get(&Atomic::from("duplicates"))
            .map(|value| value.atomized_one().map(|atomic| atomic.string_value()))
            .transpose()?,
        None => None,
    };
    let merged = match duplicates.as_deref() {
        None | Some("use-first") | Some("use-any") => Map::combine(&maps, true),
        Some("use-last") => Map::combine(&maps, false),
        Some("combine") => Map::combine_concat(&maps),
        Some("reject") => {
            let entries = maps
                .iter()
                .flat_map(|map| map.entries().map(|(k, v)| (k.clone(), v.clone())))
                .collect();
            Map::new(entries)?
        }
        Some(_) => return Err(error::Error::FORG0001),
    };
    Ok(merged.into())
}

fn size(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(Atomic::from(map_arg(&arguments[0])?.len()).into())
}

fn keys(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(map_arg(&arguments[0])?.keys().cloned().collect::<Vec<_>>().into())
}

fn contains(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let key = one_arg(&arguments[1])?;
    Ok(map_arg(&arguments[0])?.contains_key(&key).into())
}

fn get(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let key = one_arg(&arguments[1])?;
    Ok(map_arg(&arguments[0])?
        .get(&key)
        .cloned()
        .unwrap_or_default())
}

fn put(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let key = one_arg(&arguments[1])?;
    Ok(map_arg(&arguments[0])?.put(key, &arguments[2]).into())
}

fn entry(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let key = one_arg(&arguments[0])?;
    Ok(Map::new(vec![(key, arguments[1].clone())])?.into())
}

fn remove(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let keys = arguments[1].atomized()?;
    Ok(map_arg(&arguments[0])?.remove_keys(&keys).into())
}

/// Every value found under the key in maps reachable from the input,
/// searching inside map values and array members.
fn find(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let key = one_arg(&arguments[1])?;
    let mut found = Vec::new();
    for item in arguments[0].iter() {
        find_in_item(item, &key, &mut found);
    }
    Ok(Array::new(found).into())
}

fn find_in_item(item: &Item, key: &Atomic, found: &mut Vec<Sequence>) {
    if let Ok(map) = item.to_map() {
        for (entry_key, value) in map.entries() {
            if entry_key.same_key(key) {
                found.push(value.clone());
            }
            for item in value.iter() {
                find_in_item(item, key, found);
            }
        }
    } else if let Ok(array) = item.to_array() {
        for member in array.iter() {
            for item in member.iter() {
                find_in_item(item, key, found);
            }
        }
    }
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("map:merge($maps as map(*)*) as map(*)", merge)?,
        pure(
            "map:merge($maps as map(*)*, $options as map(*)) as map(*)",
            merge,
        )?,
        pure("map:size($map as map(*)) as integer", size)?,
        pure("map:keys($map as map(*)) as any-atomic-type*", keys)?,
        pure(
            "map:contains($map as map(*), $key as any-atomic-type) as boolean",
            contains,
        )?,
        pure("map:get($map as map(*), $key as any-atomic-type) as item()*", get)?,
        pure(
            "map:put($map as map(*), $key as any-atomic-type, $value as item()*) as map(*)",
            put,
        )?,
        pure(
            "map:entry($key as any-atomic-type, $value as item()*) as map(*)",
            entry,
        )?,
        pure(
            "map:remove($map as map(*), $keys as any-atomic-type*) as map(*)",
            remove,
        )?,
        pure(
            "map:find($input as item()*, $key as any-atomic-type) as array(*)",
            find,
        )?,
    ])
}
