use metapath_schema_type::DataType;

use crate::error;

use super::Atomic;

// Value comparisons read untyped operands as strings.
pub(crate) fn cast_binary_compare(a: Atomic, b: Atomic) -> error::Result<(Atomic, Atomic)> {
    let a = if a.is_untyped() { a.cast_to_string() } else { a };
    let b = if b.is_untyped() { b.cast_to_string() } else { b };
    promote_numeric(a, b)
}

// In general comparisons an untyped operand takes on the type of the other
// operand.
pub(crate) fn cast_binary_general(a: Atomic, b: Atomic) -> error::Result<(Atomic, Atomic)> {
    let (a, b) = match (&a, &b) {
        (Atomic::Untyped(_), Atomic::Untyped(_)) => (a.cast_to_string(), b.cast_to_string()),
        (Atomic::Untyped(_), _) => (cast_untyped_like(a, &b)?, b),
        (_, Atomic::Untyped(_)) => {
            let b = cast_untyped_like(b, &a)?;
            (a, b)
        }
        _ => (a, b),
    };
    promote_numeric(a, b)
}

pub(crate) fn cast_binary_arithmetic(a: Atomic, b: Atomic) -> error::Result<(Atomic, Atomic)> {
    let a = if a.is_untyped() { a.cast_to_decimal()? } else { a };
    let b = if b.is_untyped() { b.cast_to_decimal()? } else { b };
    promote_numeric(a, b)
}

fn cast_untyped_like(untyped: Atomic, other: &Atomic) -> error::Result<Atomic> {
    if other.is_string_like() {
        Ok(untyped.cast_to_string())
    } else if other.is_numeric() {
        untyped.cast_to_decimal()
    } else {
        untyped.cast_to(other.data_type())
    }
}

fn promote_numeric(a: Atomic, b: Atomic) -> error::Result<(Atomic, Atomic)> {
    match (&a, &b) {
        (Atomic::Integer(_, _), Atomic::Decimal(_)) => Ok((a.cast_to_decimal()?, b)),
        (Atomic::Decimal(_), Atomic::Integer(_, _)) => Ok((a, b.cast_to_decimal()?)),
        _ => Ok((a, b)),
    }
}

/// Untyped values used where a number is expected are read as decimals.
pub(crate) fn cast_untyped_to_numeric(a: Atomic) -> error::Result<Atomic> {
    if a.is_untyped() {
        a.cast_to(DataType::Decimal)
    } else {
        Ok(a)
    }
}
