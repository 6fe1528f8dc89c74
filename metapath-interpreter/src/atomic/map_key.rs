use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use ibig::IBig;
use metapath_name::Name;
use rust_decimal::Decimal;

use super::atomic_core::decimal_to_ibig;
use super::datetime::{utc, ToDateTimeStamp};
use super::Atomic;

/// The identity of an atomic value when it is used as a map key.
///
/// Strings of all kinds share one key space, as do all numbers. Dates and
/// date-times with a timezone are keyed by their instant; those without one
/// stay distinct from any zoned value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum MapKey {
    String(Rc<str>),
    Integer(Rc<IBig>),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDateTime),
    NaiveDate(NaiveDate),
    DateTime(NaiveDateTime),
    NaiveDateTime(NaiveDateTime),
    Duration(i64, chrono::Duration),
    Base64(Rc<Vec<u8>>),
    QName(Rc<Name>),
}

impl MapKey {
    pub(crate) fn new(atomic: &Atomic) -> MapKey {
        match atomic {
            Atomic::Untyped(s) | Atomic::String(_, s) => MapKey::String(s.clone()),
            Atomic::Integer(_, i) => MapKey::Integer(i.clone()),
            Atomic::Decimal(d) => {
                if d.fract().is_zero() {
                    if let Ok(i) = decimal_to_ibig(d) {
                        return MapKey::Integer(Rc::new(i));
                    }
                }
                MapKey::Decimal(d.normalize())
            }
            Atomic::Boolean(b) => MapKey::Boolean(*b),
            Atomic::Date(_, d) => match d.offset {
                Some(_) => MapKey::Date(d.to_naive_date_time(utc())),
                None => MapKey::NaiveDate(d.date),
            },
            Atomic::DateTime(_, d) => match d.offset {
                Some(_) => MapKey::DateTime(d.to_naive_date_time(utc())),
                None => MapKey::NaiveDateTime(d.date_time),
            },
            Atomic::DayTimeDuration(d) => MapKey::Duration(0, **d),
            Atomic::YearMonthDuration(d) => MapKey::Duration(d.months, chrono::Duration::zero()),
            Atomic::Base64(b) => MapKey::Base64(b.clone()),
            Atomic::QName(name) => MapKey::QName(name.clone()),
        }
    }
}

impl Atomic {
    /// Structural equality: two values are the same map key.
    pub fn same_key(&self, other: &Atomic) -> bool {
        MapKey::new(self) == MapKey::new(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ibig::ibig;
    use rust_decimal_macros::dec;

    use crate::atomic::NaiveDateWithOffset;

    #[test]
    fn test_numbers_share_keys() {
        assert!(Atomic::from(ibig!(1)).same_key(&Atomic::from(dec!(1.0))));
        assert!(Atomic::from(dec!(1.50)).same_key(&Atomic::from(dec!(1.5))));
        assert!(!Atomic::from(1i64).same_key(&Atomic::from("1")));
    }

    #[test]
    fn test_strings_share_keys() {
        assert!(Atomic::Untyped("a".into()).same_key(&Atomic::from("a")));
    }

    #[test]
    fn test_ambiguous_dates_are_distinct() {
        let zoned: Atomic = NaiveDateWithOffset::parse("2024-01-01Z").unwrap().into();
        let ambiguous: Atomic = NaiveDateWithOffset::parse("2024-01-01").unwrap().into();
        assert!(!zoned.same_key(&ambiguous));
        let shifted: Atomic = NaiveDateWithOffset::parse("2024-01-01+00:00").unwrap().into();
        assert!(zoned.same_key(&shifted));
    }
}
