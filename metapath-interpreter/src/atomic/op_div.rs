use crate::error;

use super::cast_binary::cast_binary_arithmetic;
use super::op_multiply::{duration_seconds, numeric_to_decimal, scale_duration, scale_months};
use super::Atomic;

// Dividing two integers yields a decimal.
pub(crate) fn op_div(a: Atomic, b: Atomic) -> error::Result<Atomic> {
    let (a, b) = cast_binary_arithmetic(a, b)?;
    match (a, b) {
        (a, b) if a.is_numeric() && b.is_numeric() => {
            let a = numeric_to_decimal(&a)?;
            let b = numeric_to_decimal(&b)?;
            if b.is_zero() {
                return Err(error::Error::FOAR0001);
            }
            Ok(a.checked_div(b).ok_or(error::Error::FOAR0002)?.into())
        }
        (Atomic::DayTimeDuration(d), n) if n.is_numeric() => {
            let divisor = numeric_to_decimal(&n)?;
            if divisor.is_zero() {
                return Err(error::Error::FOAR0001);
            }
            let factor = rust_decimal::Decimal::ONE
                .checked_div(divisor)
                .ok_or(error::Error::FOAR0002)?;
            Ok(scale_duration(&d, factor)?.into())
        }
        (Atomic::YearMonthDuration(d), n) if n.is_numeric() => {
            let divisor = numeric_to_decimal(&n)?;
            if divisor.is_zero() {
                return Err(error::Error::FOAR0001);
            }
            let months = rust_decimal::Decimal::from(d.months)
                .checked_div(divisor)
                .ok_or(error::Error::FOAR0002)?;
            Ok(scale_months(1, months)?.into())
        }
        (Atomic::DayTimeDuration(a), Atomic::DayTimeDuration(b)) => {
            if b.is_zero() {
                return Err(error::Error::FOAR0001);
            }
            Ok(duration_seconds(&a)
                .checked_div(duration_seconds(&b))
                .ok_or(error::Error::FOAR0002)?
                .into())
        }
        (Atomic::YearMonthDuration(a), Atomic::YearMonthDuration(b)) => {
            if b.months == 0 {
                return Err(error::Error::FOAR0001);
            }
            Ok(rust_decimal::Decimal::from(a.months)
                .checked_div(rust_decimal::Decimal::from(b.months))
                .ok_or(error::Error::FOAR0002)?
                .into())
        }
        _ => Err(error::Error::MPTY0004),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn test_integer_division_yields_decimal() {
        assert_eq!(
            op_div(1i64.into(), 4i64.into()).unwrap(),
            Atomic::from(dec!(0.25))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            op_div(1i64.into(), 0i64.into()),
            Err(error::Error::FOAR0001)
        );
    }

    #[test]
    fn test_duration_by_duration() {
        let result = op_div(
            chrono::Duration::hours(3).into(),
            chrono::Duration::hours(2).into(),
        )
        .unwrap();
        assert_eq!(result, Atomic::from(dec!(1.5)));
    }
}
