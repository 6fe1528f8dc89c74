use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::atomic::Atomic;
use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{one_arg, optional_arg, pure};

fn to_f64(atomic: &Atomic) -> error::Result<f64> {
    atomic.to_decimal()?.to_f64().ok_or(error::Error::FOCA0002)
}

/// NaN and the infinities have no decimal representation.
fn from_f64(value: f64) -> error::Result<Atomic> {
    Decimal::from_f64(value)
        .map(|d| d.normalize().into())
        .ok_or(error::Error::FOCA0002)
}

fn unary(argument: &Sequence, f: fn(f64) -> f64) -> error::Result<Sequence> {
    match optional_arg(argument)? {
        Some(atomic) => Ok(from_f64(f(to_f64(&atomic)?))?.into()),
        None => Ok(Sequence::Empty),
    }
}

fn pi(_context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(from_f64(std::f64::consts::PI)?.into())
}

fn exp(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::exp)
}

fn exp10(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], |x| 10f64.powf(x))
}

fn log(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::ln)
}

fn log10(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::log10)
}

fn sqrt(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::sqrt)
}

fn sin(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::sin)
}

fn cos(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::cos)
}

fn tan(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::tan)
}

fn asin(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::asin)
}

fn acos(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::acos)
}

fn atan(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    unary(&arguments[0], f64::atan)
}

fn pow(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let Some(x) = optional_arg(&arguments[0])? else {
        return Ok(Sequence::Empty);
    };
    let y = one_arg(&arguments[1])?;
    Ok(from_f64(to_f64(&x)?.powf(to_f64(&y)?))?.into())
}

fn atan2(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let y = to_f64(&one_arg(&arguments[0])?)?;
    let x = to_f64(&one_arg(&arguments[1])?)?;
    Ok(from_f64(y.atan2(x))?.into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("math:pi() as decimal", pi)?,
        pure("math:exp($arg as numeric?) as decimal?", exp)?,
        pure("math:exp10($arg as numeric?) as decimal?", exp10)?,
        pure("math:log($arg as numeric?) as decimal?", log)?,
        pure("math:log10($arg as numeric?) as decimal?", log10)?,
        pure("math:sqrt($arg as numeric?) as decimal?", sqrt)?,
        pure("math:sin($theta as numeric?) as decimal?", sin)?,
        pure("math:cos($theta as numeric?) as decimal?", cos)?,
        pure("math:tan($theta as numeric?) as decimal?", tan)?,
        pure("math:asin($arg as numeric?) as decimal?", asin)?,
        pure("math:acos($arg as numeric?) as decimal?", acos)?,
        pure("math:atan($arg as numeric?) as decimal?", atan)?,
        pure("math:pow($x as numeric?, $y as numeric) as decimal?", pow)?,
        pure("math:atan2($y as numeric, $x as numeric) as decimal", atan2)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_number() {
        assert_eq!(from_f64(f64::NAN).unwrap_err(), error::Error::FOCA0002);
        assert_eq!(from_f64(f64::INFINITY).unwrap_err(), error::Error::FOCA0002);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(from_f64(0.5).unwrap(), Atomic::from(Decimal::new(5, 1)));
    }
}
