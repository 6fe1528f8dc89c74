use std::cmp::Ordering;
use std::rc::Rc;

use ibig::ops::Abs;
use ibig::IBig;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error;

use super::Atomic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rounding {
    /// Halves round toward positive infinity.
    HalfUp,
    HalfToEven,
}

pub(crate) fn round_atomic(arg: Atomic, precision: i32, rounding: Rounding) -> error::Result<Atomic> {
    match arg {
        Atomic::Integer(_, i) => Ok(round_integer(i, precision, rounding)),
        Atomic::Decimal(d) => Ok(match rounding {
            Rounding::HalfUp => round_decimal(*d, precision),
            Rounding::HalfToEven => round_decimal_half_to_even(*d, precision),
        }
        .into()),
        _ => Err(error::Error::MPTY0004),
    }
}

fn round_integer(i: Rc<IBig>, precision: i32, rounding: Rounding) -> Atomic {
    if precision >= 0 {
        return i.into();
    }
    let d = IBig::from(10u32).pow(precision.unsigned_abs() as usize);
    let quotient = i.as_ref() / &d;
    let remainder = i.as_ref() % &d;
    let twice = remainder.abs() * IBig::from(2);
    let half = d.clone();
    let away = match twice.cmp(&half) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => match rounding {
            Rounding::HalfUp => *i >= IBig::from(0),
            Rounding::HalfToEven => &quotient % IBig::from(2) != IBig::from(0),
        },
    };
    let quotient = if !away {
        quotient
    } else if *i < IBig::from(0) {
        quotient - IBig::from(1)
    } else {
        quotient + IBig::from(1)
    };
    (quotient * d).into()
}

pub(crate) fn round_decimal(arg: Decimal, precision: i32) -> Decimal {
    let strategy = if arg >= Decimal::ZERO {
        RoundingStrategy::MidpointAwayFromZero
    } else {
        RoundingStrategy::MidpointTowardZero
    };
    round_with_strategy(arg, precision, strategy)
}

fn round_decimal_half_to_even(arg: Decimal, precision: i32) -> Decimal {
    round_with_strategy(arg, precision, RoundingStrategy::MidpointNearestEven)
}

fn round_with_strategy(arg: Decimal, precision: i32, strategy: RoundingStrategy) -> Decimal {
    match precision.cmp(&0) {
        Ordering::Equal | Ordering::Greater => {
            arg.round_dp_with_strategy(precision as u32, strategy)
        }
        Ordering::Less => {
            // beyond the range of a decimal every digit rounds away
            let Some(d) = 10i64
                .checked_pow(precision.unsigned_abs())
                .map(Decimal::from)
            else {
                return Decimal::ZERO;
            };
            (arg / d).round_dp_with_strategy(0, strategy) * d
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(2.5), 0, dec!(3))]
    #[case(dec!(-2.5), 0, dec!(-2))]
    #[case(dec!(2.4999), 0, dec!(2))]
    #[case(dec!(1.125), 2, dec!(1.13))]
    #[case(dec!(8452), -2, dec!(8500))]
    fn test_round_decimal(#[case] arg: Decimal, #[case] precision: i32, #[case] expected: Decimal) {
        assert_eq!(round_decimal(arg, precision), expected);
    }

    #[rstest]
    #[case(dec!(0.5), 0, dec!(0))]
    #[case(dec!(1.5), 0, dec!(2))]
    #[case(dec!(2.5), 0, dec!(2))]
    #[case(dec!(3.567812), 2, dec!(3.57))]
    fn test_half_to_even(#[case] arg: Decimal, #[case] precision: i32, #[case] expected: Decimal) {
        assert_eq!(round_decimal_half_to_even(arg, precision), expected);
    }

    #[test]
    fn test_round_integer() {
        assert_eq!(
            round_atomic(1250i64.into(), -2, Rounding::HalfUp).unwrap(),
            Atomic::from(1300i64)
        );
        assert_eq!(
            round_atomic(1250i64.into(), -2, Rounding::HalfToEven).unwrap(),
            Atomic::from(1200i64)
        );
        assert_eq!(
            round_atomic((-1250i64).into(), -2, Rounding::HalfUp).unwrap(),
            Atomic::from(-1200i64)
        );
        assert_eq!(
            round_atomic(1249i64.into(), -2, Rounding::HalfUp).unwrap(),
            Atomic::from(1200i64)
        );
    }
}
