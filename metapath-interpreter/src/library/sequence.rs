use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::atomic::{self, cast_untyped_to_numeric, round_decimal, Atomic, MapKey};
use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{contextual, one_arg, pure};

fn empty(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].is_empty().into())
}

fn exists(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok((!arguments[0].is_empty()).into())
}

fn head(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].get(0).cloned().into())
}

fn tail(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].items().iter().skip(1).cloned().collect::<Vec<_>>().into())
}

/// A 1-based position argument, clamped to the bounds of a sequence of
/// `len` items plus one.
fn clamped_index(position: &Sequence, len: usize) -> error::Result<usize> {
    let position = one_arg(position)?.to_i64()?;
    Ok(position.clamp(1, len as i64 + 1) as usize - 1)
}

fn insert_before(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let mut items = arguments[0].items().to_vec();
    let index = clamped_index(&arguments[1], items.len())?;
    let inserts = arguments[2].items().to_vec();
    items.splice(index..index, inserts);
    Ok(items.into())
}

fn remove(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let position = one_arg(&arguments[1])?.to_i64()?;
    let items = arguments[0]
        .iter()
        .enumerate()
        .filter(|(i, _)| (*i as i64) + 1 != position)
        .map(|(_, item)| item.clone())
        .collect::<Vec<_>>();
    Ok(items.into())
}

fn reverse(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].iter().rev().cloned().collect::<Vec<_>>().into())
}

/// Items at positions `p` with
/// `round(start) <= p < round(start) + round(length)`.
fn subsequence(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let start = round_decimal(one_arg(&arguments[1])?.to_decimal()?, 0);
    let end = match arguments.get(2) {
        Some(length) => {
            let length = round_decimal(one_arg(length)?.to_decimal()?, 0);
            Some(start.checked_add(length).ok_or(error::Error::FOAR0002)?)
        }
        None => None,
    };
    let items = arguments[0]
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            let position = Decimal::from(*i + 1);
            position >= start && end.map_or(true, |end| position < end)
        })
        .map(|(_, item)| item.clone())
        .collect::<Vec<_>>();
    Ok(items.into())
}

fn distinct_values(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let mut seen = ahash::HashSet::default();
    let distinct = arguments[0]
        .atomized()?
        .into_iter()
        .filter(|atomic| seen.insert(MapKey::new(atomic)))
        .collect::<Vec<_>>();
    Ok(distinct.into())
}

/// Positions of the items equal to the search value. Values that cannot be
/// compared with it are not equal.
fn index_of(context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let search = one_arg(&arguments[1])?;
    let offset = context.implicit_timezone();
    let positions = arguments[0]
        .atomized()?
        .into_iter()
        .enumerate()
        .filter(|(_, atomic)| {
            atomic
                .clone()
                .compare(search.clone(), atomic::AtomicCompareValue::Eq, offset)
                .unwrap_or(false)
        })
        .map(|(i, _)| Atomic::from(i + 1))
        .collect::<Vec<_>>();
    Ok(positions.into())
}

fn deep_equal(context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0]
        .deep_equal(&arguments[1], context.implicit_timezone())?
        .into())
}

fn zero_or_one(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    if arguments[0].len() > 1 {
        return Err(error::Error::FORG0003);
    }
    Ok(arguments[0].clone())
}

fn one_or_more(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    if arguments[0].is_empty() {
        return Err(error::Error::FORG0004);
    }
    Ok(arguments[0].clone())
}

fn exactly_one(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    if arguments[0].len() != 1 {
        return Err(error::Error::FORG0005);
    }
    Ok(arguments[0].clone())
}

fn count(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(Atomic::from(arguments[0].len()).into())
}

/// Atomized values with untyped values read as decimals.
fn numeric_values(argument: &Sequence) -> error::Result<Vec<Atomic>> {
    argument
        .atomized()?
        .into_iter()
        .map(cast_untyped_to_numeric)
        .collect()
}

fn total(values: Vec<Atomic>) -> error::Result<Option<Atomic>> {
    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return Ok(None);
    };
    let mut total = first;
    for value in values {
        total = atomic::op_add(total, value)?;
    }
    Ok(Some(total))
}

fn sum(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    match total(numeric_values(&arguments[0])?)? {
        Some(total) => Ok(total.into()),
        None => match arguments.get(1) {
            Some(zero) => Ok(zero.clone()),
            None => Ok(Atomic::from(0i64).into()),
        },
    }
}

fn avg(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let values = numeric_values(&arguments[0])?;
    let count = values.len();
    match total(values)? {
        Some(total) => Ok(atomic::op_div(total, Atomic::from(count))?.into()),
        None => Ok(Sequence::Empty),
    }
}

/// The value that every other value orders after (for `min`) or before
/// (for `max`).
fn extreme(
    context: &DynamicContext,
    argument: &Sequence,
    wanted: Ordering,
) -> error::Result<Sequence> {
    let offset = context.implicit_timezone();
    let mut values = numeric_values(argument)?.into_iter();
    let Some(mut best) = values.next() else {
        return Ok(Sequence::Empty);
    };
    for value in values {
        if value.clone().ordering(best.clone(), offset)? == wanted {
            best = value;
        }
    }
    Ok(best.into())
}

fn max(context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    extreme(context, &arguments[0], Ordering::Greater)
}

fn min(context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    extreme(context, &arguments[0], Ordering::Less)
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("fn:empty($arg as item()*) as boolean", empty)?,
        pure("fn:exists($arg as item()*) as boolean", exists)?,
        pure("fn:head($arg as item()*) as item()?", head)?,
        pure("fn:tail($arg as item()*) as item()*", tail)?,
        pure(
            "fn:insert-before($target as item()*, $position as integer, $inserts as item()*) as item()*",
            insert_before,
        )?,
        pure(
            "fn:remove($target as item()*, $position as integer) as item()*",
            remove,
        )?,
        pure("fn:reverse($arg as item()*) as item()*", reverse)?,
        pure(
            "fn:subsequence($source as item()*, $start as decimal) as item()*",
            subsequence,
        )?,
        pure(
            "fn:subsequence($source as item()*, $start as decimal, $length as decimal) as item()*",
            subsequence,
        )?,
        pure(
            "fn:distinct-values($arg as any-atomic-type*) as any-atomic-type*",
            distinct_values,
        )?,
        contextual(
            "fn:index-of($seq as any-atomic-type*, $search as any-atomic-type) as integer*",
            index_of,
        )?,
        contextual(
            "fn:deep-equal($parameter1 as item()*, $parameter2 as item()*) as boolean",
            deep_equal,
        )?,
        pure("fn:zero-or-one($arg as item()*) as item()?", zero_or_one)?,
        pure("fn:one-or-more($arg as item()*) as item()+", one_or_more)?,
        pure("fn:exactly-one($arg as item()*) as item()", exactly_one)?,
        pure("fn:count($arg as item()*) as integer", count)?,
        pure("fn:avg($arg as any-atomic-type*) as any-atomic-type?", avg)?,
        contextual("fn:max($arg as any-atomic-type*) as any-atomic-type?", max)?,
        contextual("fn:min($arg as any-atomic-type*) as any-atomic-type?", min)?,
        pure("fn:sum($arg as any-atomic-type*) as any-atomic-type", sum)?,
        pure(
            "fn:sum($arg as any-atomic-type*, $zero as any-atomic-type?) as any-atomic-type?",
            sum,
        )?,
    ])
}
