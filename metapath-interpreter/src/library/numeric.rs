use std::rc::Rc;

use ibig::ops::Abs;

use crate::atomic::{round_atomic, Atomic, IntegerType, Rounding};
use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{optional_arg, pure};

fn abs(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let result = match optional_arg(&arguments[0])? {
        Some(Atomic::Integer(integer_type, i)) => {
            let integer_type = match integer_type {
                IntegerType::PositiveInteger => IntegerType::PositiveInteger,
                _ => IntegerType::Integer,
            };
            Some(Atomic::Integer(integer_type, Rc::new(i.as_ref().abs())))
        }
        Some(Atomic::Decimal(d)) => Some(d.abs().into()),
        Some(_) => return Err(error::Error::MPTY0004),
        None => None,
    };
    Ok(result.into())
}

fn ceiling(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let result = match optional_arg(&arguments[0])? {
        Some(Atomic::Decimal(d)) => Some(d.ceil().into()),
        Some(atomic @ Atomic::Integer(..)) => Some(atomic),
        Some(_) => return Err(error::Error::MPTY0004),
        None => None,
    };
    Ok(result.into())
}

fn floor(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let result = match optional_arg(&arguments[0])? {
        Some(Atomic::Decimal(d)) => Some(d.floor().into()),
        Some(atomic @ Atomic::Integer(..)) => Some(atomic),
        Some(_) => return Err(error::Error::MPTY0004),
        None => None,
    };
    Ok(result.into())
}

fn precision(arguments: &[Sequence]) -> error::Result<i32> {
    match arguments.get(1) {
        Some(precision) => {
            let precision = precision.atomized_one()?.to_i64()?;
            // beyond these bounds the result no longer changes
            Ok(precision.clamp(-64, 64) as i32)
        }
        None => Ok(0),
    }
}

fn round(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let precision = precision(arguments)?;
    match optional_arg(&arguments[0])? {
        Some(atomic) => Ok(round_atomic(atomic, precision, Rounding::HalfUp)?.into()),
        None => Ok(Sequence::Empty),
    }
}

fn round_half_to_even(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let precision = precision(arguments)?;
    match optional_arg(&arguments[0])? {
        Some(atomic) => Ok(round_atomic(atomic, precision, Rounding::HalfToEven)?.into()),
        None => Ok(Sequence::Empty),
    }
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("fn:abs($arg as numeric?) as numeric?", abs)?,
        pure("fn:ceiling($arg as numeric?) as numeric?", ceiling)?,
        pure("fn:floor($arg as numeric?) as numeric?", floor)?,
        pure("fn:round($arg as numeric?) as numeric?", round)?,
        pure(
            "fn:round($arg as numeric?, $precision as integer) as numeric?",
            round,
        )?,
        pure(
            "fn:round-half-to-even($arg as numeric?) as numeric?",
            round_half_to_even,
        )?,
        pure(
            "fn:round-half-to-even($arg as numeric?, $precision as integer) as numeric?",
            round_half_to_even,
        )?,
    ])
}
