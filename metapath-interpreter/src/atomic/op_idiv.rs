use ibig::IBig;

use crate::error;

use super::atomic_core::decimal_to_ibig;
use super::cast_binary::cast_binary_arithmetic;
use super::Atomic;

// Integer division truncates toward zero.
pub(crate) fn op_idiv(a: Atomic, b: Atomic) -> error::Result<Atomic> {
    let (a, b) = cast_binary_arithmetic(a, b)?;
    match (a, b) {
        (Atomic::Integer(_, a), Atomic::Integer(_, b)) => {
            if *b == IBig::from(0) {
                return Err(error::Error::FOAR0001);
            }
            Ok((a.as_ref() / b.as_ref()).into())
        }
        (Atomic::Decimal(a), Atomic::Decimal(b)) => {
            if b.is_zero() {
                return Err(error::Error::FOAR0001);
            }
            let quotient = a.checked_div(*b).ok_or(error::Error::FOAR0002)?;
            Ok(decimal_to_ibig(&quotient)?.into())
        }
        _ => Err(error::Error::MPTY0004),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn test_truncates() {
        assert_eq!(
            op_idiv(7i64.into(), 2i64.into()).unwrap(),
            Atomic::from(3i64)
        );
        assert_eq!(
            op_idiv((-7i64).into(), 2i64.into()).unwrap(),
            Atomic::from(-3i64)
        );
        assert_eq!(
            op_idiv(dec!(7.5).into(), 2i64.into()).unwrap(),
            Atomic::from(3i64)
        );
    }

    #[test]
    fn test_by_zero() {
        assert_eq!(
            op_idiv(1i64.into(), 0i64.into()),
            Err(error::Error::FOAR0001)
        );
    }
}
