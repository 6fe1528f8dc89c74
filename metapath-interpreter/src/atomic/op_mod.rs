use ibig::IBig;

use crate::error;

use super::cast_binary::cast_binary_arithmetic;
use super::Atomic;

// The sign of the result follows the dividend.
pub(crate) fn op_mod(a: Atomic, b: Atomic) -> error::Result<Atomic> {
    let (a, b) = cast_binary_arithmetic(a, b)?;
    match (a, b) {
        (Atomic::Integer(_, a), Atomic::Integer(_, b)) => {
            if *b == IBig::from(0) {
                return Err(error::Error::FOAR0001);
            }
            Ok((a.as_ref() % b.as_ref()).into())
        }
        (Atomic::Decimal(a), Atomic::Decimal(b)) => {
            if b.is_zero() {
                return Err(error::Error::FOAR0001);
            }
            Ok(a.checked_rem(*b).ok_or(error::Error::FOAR0002)?.into())
        }
        _ => Err(error::Error::MPTY0004),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn test_sign_follows_dividend() {
        assert_eq!(
            op_mod(5i64.into(), 3i64.into()).unwrap(),
            Atomic::from(2i64)
        );
        assert_eq!(
            op_mod((-5i64).into(), 3i64.into()).unwrap(),
            Atomic::from(-2i64)
        );
        assert_eq!(
            op_mod(dec!(5.5).into(), 2i64.into()).unwrap(),
            Atomic::from(dec!(1.5))
        );
    }
}
