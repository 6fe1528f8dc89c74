use crate::error;

use super::cast_binary::cast_untyped_to_numeric;
use super::Atomic;

pub(crate) fn op_unary_plus(a: Atomic) -> error::Result<Atomic> {
    let a = cast_untyped_to_numeric(a)?;
    if a.is_numeric() {
        Ok(a)
    } else {
        Err(error::Error::MPTY0004)
    }
}

pub(crate) fn op_unary_minus(a: Atomic) -> error::Result<Atomic> {
    match cast_untyped_to_numeric(a)? {
        Atomic::Integer(_, i) => Ok((-i.as_ref()).into()),
        Atomic::Decimal(d) => Ok((-*d).into()),
        _ => Err(error::Error::MPTY0004),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minus() {
        assert_eq!(op_unary_minus(3i64.into()).unwrap(), Atomic::from(-3i64));
        assert_eq!(
            op_unary_minus("3".into()),
            Err(error::Error::MPTY0004)
        );
    }

    #[test]
    fn test_plus_keeps_value() {
        assert_eq!(op_unary_plus(3i64.into()).unwrap(), Atomic::from(3i64));
    }
}
