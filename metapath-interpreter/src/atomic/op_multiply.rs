use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error;

use super::atomic_core::ibig_to_decimal;
use super::cast_binary::cast_binary_arithmetic;
use super::datetime;
use super::round::round_decimal;
use super::Atomic;

pub(crate) fn op_multiply(a: Atomic, b: Atomic) -> error::Result<Atomic> {
    let (a, b) = cast_binary_arithmetic(a, b)?;
    match (a, b) {
        (Atomic::Integer(_, a), Atomic::Integer(_, b)) => Ok((a.as_ref() * b.as_ref()).into()),
        (Atomic::Decimal(a), Atomic::Decimal(b)) => Ok(a
            .checked_mul(*b)
            .ok_or(error::Error::FOAR0002)?
            .into()),
        (Atomic::DayTimeDuration(d), n) | (n, Atomic::DayTimeDuration(d)) if n.is_numeric() => {
            let factor = numeric_to_decimal(&n)?;
            Ok(scale_duration(&d, factor)?.into())
        }
        (Atomic::YearMonthDuration(d), n) | (n, Atomic::YearMonthDuration(d))
            if n.is_numeric() =>
        {
            let factor = numeric_to_decimal(&n)?;
            Ok(scale_months(d.months, factor)?.into())
        }
        _ => Err(error::Error::MPTY0004),
    }
}

pub(crate) fn numeric_to_decimal(atomic: &Atomic) -> error::Result<Decimal> {
    match atomic {
        Atomic::Integer(_, i) => ibig_to_decimal(i),
        Atomic::Decimal(d) => Ok(**d),
        _ => Err(error::Error::MPTY0004),
    }
}

/// A day-time duration as a number of seconds.
pub(crate) fn duration_seconds(duration: &chrono::Duration) -> Decimal {
    Decimal::from(duration.num_seconds()) + Decimal::new(duration.subsec_nanos() as i64, 9)
}

pub(crate) fn seconds_duration(seconds: Decimal) -> error::Result<chrono::Duration> {
    let nanos = (seconds * Decimal::from(1_000_000_000))
        .round()
        .to_i64()
        .ok_or(error::Error::FODT0001)?;
    Ok(chrono::Duration::nanoseconds(nanos))
}

pub(crate) fn scale_duration(
    duration: &chrono::Duration,
    factor: Decimal,
) -> error::Result<chrono::Duration> {
    let seconds = duration_seconds(duration)
        .checked_mul(factor)
        .ok_or(error::Error::FODT0001)?;
    seconds_duration(seconds)
}

// Months are rounded to the nearest whole month, halves away from zero.
pub(crate) fn scale_months(
    months: i64,
    factor: Decimal,
) -> error::Result<datetime::YearMonthDuration> {
    let scaled = Decimal::from(months)
        .checked_mul(factor)
        .ok_or(error::Error::FODT0001)?;
    let months = round_decimal(scaled, 0)
        .to_i64()
        .ok_or(error::Error::FODT0001)?;
    Ok(datetime::YearMonthDuration::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn test_numbers() {
        assert_eq!(
            op_multiply(2i64.into(), 3i64.into()).unwrap(),
            Atomic::from(6i64)
        );
        assert_eq!(
            op_multiply(dec!(1.5).into(), 2i64.into()).unwrap(),
            Atomic::from(dec!(3.0))
        );
    }

    #[test]
    fn test_durations() {
        let result = op_multiply(chrono::Duration::hours(1).into(), dec!(1.5).into()).unwrap();
        assert_eq!(result.string_value(), "PT1H30M");
        let result = op_multiply(
            2i64.into(),
            datetime::YearMonthDuration::new(5).into(),
        )
        .unwrap();
        assert_eq!(result.string_value(), "P10M");
    }
}
