use std::cmp::Ordering;

use chrono::FixedOffset;

use crate::error;

use super::cast_binary::{cast_binary_compare, cast_binary_general};
use super::datetime::ToDateTimeStamp;
use super::Atomic;

/// The value comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicCompareValue {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl AtomicCompareValue {
    pub(crate) fn name(&self) -> &'static str {
        use AtomicCompareValue::*;
        match self {
            Eq => "eq",
            Ne => "ne",
            Lt => "lt",
            Le => "le",
            Gt => "gt",
            Ge => "ge",
        }
    }
}

impl Atomic {
    /// Compare two atomic values with a value comparison operator.
    ///
    /// Dates and date-times without a timezone are compared as if they had
    /// the default offset.
    pub fn compare(
        self,
        other: Atomic,
        operator: AtomicCompareValue,
        default_offset: FixedOffset,
    ) -> error::Result<bool> {
        let (a, b) = cast_binary_compare(self, other)?;
        compare_promoted(&a, &b, operator, default_offset)
    }

    /// Compare two atomic values as one pair of a general comparison. An
    /// untyped operand is cast to the type of the other operand.
    pub fn general_compare(
        self,
        other: Atomic,
        operator: AtomicCompareValue,
        default_offset: FixedOffset,
    ) -> error::Result<bool> {
        let (a, b) = cast_binary_general(self, other)?;
        compare_promoted(&a, &b, operator, default_offset)
    }

    /// A total order between two comparable values, as used for sorting
    /// by `min` and `max`.
    pub(crate) fn ordering(
        self,
        other: Atomic,
        default_offset: FixedOffset,
    ) -> error::Result<Ordering> {
        let (a, b) = cast_binary_compare(self, other)?;
        ordering(&a, &b, default_offset)
    }
}

fn compare_promoted(
    a: &Atomic,
    b: &Atomic,
    operator: AtomicCompareValue,
    default_offset: FixedOffset,
) -> error::Result<bool> {
    match operator {
        AtomicCompareValue::Eq => equal(a, b, default_offset),
        AtomicCompareValue::Ne => Ok(!equal(a, b, default_offset)?),
        AtomicCompareValue::Lt => Ok(ordering(a, b, default_offset)?.is_lt()),
        AtomicCompareValue::Le => Ok(ordering(a, b, default_offset)?.is_le()),
        AtomicCompareValue::Gt => Ok(ordering(a, b, default_offset)?.is_gt()),
        AtomicCompareValue::Ge => Ok(ordering(a, b, default_offset)?.is_ge()),
    }
}

fn equal(a: &Atomic, b: &Atomic, default_offset: FixedOffset) -> error::Result<bool> {
    use Atomic::*;
    match (a, b) {
        (YearMonthDuration(a), DayTimeDuration(b)) | (DayTimeDuration(b), YearMonthDuration(a)) => {
            Ok(a.months == 0 && b.is_zero())
        }
        (Base64(a), Base64(b)) => Ok(a == b),
        (QName(a), QName(b)) => Ok(a == b),
        _ => Ok(ordering(a, b, default_offset)?.is_eq()),
    }
}

fn ordering(a: &Atomic, b: &Atomic, default_offset: FixedOffset) -> error::Result<Ordering> {
    use Atomic::*;
    match (a, b) {
        (Integer(_, a), Integer(_, b)) => Ok(a.cmp(b)),
        (Decimal(a), Decimal(b)) => Ok(a.cmp(b)),
        (Untyped(a) | String(_, a), Untyped(b) | String(_, b)) => Ok(a.as_ref().cmp(b.as_ref())),
        (Boolean(a), Boolean(b)) => Ok(a.cmp(b)),
        (Date(_, a), Date(_, b)) => Ok(a
            .to_date_time_stamp(default_offset)
            .cmp(&b.to_date_time_stamp(default_offset))),
        (DateTime(_, a), DateTime(_, b)) => Ok(a
            .to_date_time_stamp(default_offset)
            .cmp(&b.to_date_time_stamp(default_offset))),
        (DayTimeDuration(a), DayTimeDuration(b)) => Ok(a.cmp(b)),
        (YearMonthDuration(a), YearMonthDuration(b)) => Ok(a.cmp(b)),
        _ => Err(error::Error::MPTY0004),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    use crate::atomic::datetime::utc;
    use crate::atomic::{NaiveDateWithOffset, YearMonthDuration};

    fn eq(a: Atomic, b: Atomic) -> error::Result<bool> {
        a.compare(b, AtomicCompareValue::Eq, utc())
    }

    #[test]
    fn test_numeric_across_types() {
        assert!(eq(Atomic::from(1i64), Atomic::from(dec!(1.0))).unwrap());
        assert!(Atomic::from(1i64)
            .compare(Atomic::from(dec!(1.5)), AtomicCompareValue::Lt, utc())
            .unwrap());
    }

    #[test]
    fn test_untyped_promotion() {
        let untyped = Atomic::Untyped("10".into());
        assert!(eq(untyped.clone(), Atomic::from("10")).unwrap());
        assert_eq!(
            eq(untyped.clone(), Atomic::from(10i64)),
            Err(error::Error::MPTY0004)
        );
        assert!(untyped
            .general_compare(Atomic::from(dec!(10.0)), AtomicCompareValue::Eq, utc())
            .unwrap());
    }

    #[test]
    fn test_strings_by_codepoint() {
        assert!(Atomic::from("B")
            .compare(Atomic::from("a"), AtomicCompareValue::Lt, utc())
            .unwrap());
    }

    #[test]
    fn test_incomparable() {
        assert_eq!(
            eq(Atomic::from("1"), Atomic::from(1i64)),
            Err(error::Error::MPTY0004)
        );
    }

    #[test]
    fn test_dates_use_default_offset() {
        let zoned: Atomic = NaiveDateWithOffset::parse("2024-01-01Z").unwrap().into();
        let ambiguous: Atomic = NaiveDateWithOffset::parse("2024-01-01").unwrap().into();
        assert!(eq(zoned, ambiguous).unwrap());
    }

    #[test]
    fn test_zero_durations_are_equal() {
        assert!(eq(
            Atomic::from(YearMonthDuration::new(0)),
            Atomic::from(chrono::Duration::zero())
        )
        .unwrap());
    }
}
