use std::rc::Rc;

use chrono::{Months, NaiveDateTime};

use crate::error;

use super::cast_binary::cast_binary_arithmetic;
use super::datetime::{self, NaiveDateTimeWithOffset, NaiveDateWithOffset};
use super::Atomic;

pub(crate) fn op_add(a: Atomic, b: Atomic) -> error::Result<Atomic> {
    use Atomic::*;
    let (a, b) = cast_binary_arithmetic(a, b)?;
    match (a, b) {
        (Integer(_, a), Integer(_, b)) => Ok((a.as_ref() + b.as_ref()).into()),
        (Decimal(a), Decimal(b)) => Ok(a.checked_add(*b).ok_or(error::Error::FOAR0002)?.into()),
        (Date(t, d), DayTimeDuration(duration)) | (DayTimeDuration(duration), Date(t, d)) => {
            let date_time = d.date.and_time(Default::default());
            let date = add_duration(date_time, *duration)?.date();
            Ok(Date(t, Rc::new(NaiveDateWithOffset::new(date, d.offset))))
        }
        (Date(t, d), YearMonthDuration(duration)) | (YearMonthDuration(duration), Date(t, d)) => {
            let date_time = d.date.and_time(Default::default());
            let date = add_months(date_time, duration.months)?.date();
            Ok(Date(t, Rc::new(NaiveDateWithOffset::new(date, d.offset))))
        }
        (DateTime(t, d), DayTimeDuration(duration))
        | (DayTimeDuration(duration), DateTime(t, d)) => {
            let date_time = add_duration(d.date_time, *duration)?;
            Ok(DateTime(
                t,
                Rc::new(NaiveDateTimeWithOffset::new(date_time, d.offset)),
            ))
        }
        (DateTime(t, d), YearMonthDuration(duration))
        | (YearMonthDuration(duration), DateTime(t, d)) => {
            let date_time = add_months(d.date_time, duration.months)?;
            Ok(DateTime(
                t,
                Rc::new(NaiveDateTimeWithOffset::new(date_time, d.offset)),
            ))
        }
        (DayTimeDuration(a), DayTimeDuration(b)) => Ok(a
            .checked_add(&b)
            .ok_or(error::Error::FODT0001)?
            .into()),
        (YearMonthDuration(a), YearMonthDuration(b)) => Ok(datetime::YearMonthDuration::new(
            a.months.checked_add(b.months).ok_or(error::Error::FODT0001)?,
        )
        .into()),
        _ => Err(error::Error::MPTY0004),
    }
}

pub(crate) fn add_duration(
    date_time: NaiveDateTime,
    duration: chrono::Duration,
) -> error::Result<NaiveDateTime> {
    date_time
        .checked_add_signed(duration)
        .ok_or(error::Error::FODT0001)
}

// Adding months clamps the day to the end of a shorter month.
pub(crate) fn add_months(date_time: NaiveDateTime, months: i64) -> error::Result<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| error::Error::FODT0001)?;
    let result = if months >= 0 {
        date_time.checked_add_months(Months::new(magnitude))
    } else {
        date_time.checked_sub_months(Months::new(magnitude))
    };
    result.ok_or(error::Error::FODT0001)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ibig::ibig;
    use rust_decimal_macros::dec;

    use crate::atomic::YearMonthDuration;

    #[test]
    fn test_numeric_promotion() {
        assert_eq!(
            op_add(1i64.into(), 2i64.into()).unwrap(),
            Atomic::from(ibig!(3))
        );
        assert_eq!(
            op_add(1i64.into(), dec!(0.5).into()).unwrap(),
            Atomic::from(dec!(1.5))
        );
        assert_eq!(
            op_add(Atomic::Untyped("1.5".into()), 1i64.into()).unwrap(),
            Atomic::from(dec!(2.5))
        );
    }

    #[test]
    fn test_date_plus_months_clamps() {
        let date: Atomic = NaiveDateWithOffset::parse("2024-01-31").unwrap().into();
        let result = op_add(date, YearMonthDuration::new(1).into()).unwrap();
        assert_eq!(result.string_value(), "2024-02-29");
    }

    #[test]
    fn test_date_time_plus_duration() {
        let date_time: Atomic = NaiveDateTimeWithOffset::parse("2024-01-01T23:00:00Z")
            .unwrap()
            .into();
        let result = op_add(date_time, chrono::Duration::hours(2).into()).unwrap();
        assert_eq!(result.string_value(), "2024-01-02T01:00:00Z");
    }

    #[test]
    fn test_type_error() {
        assert_eq!(
            op_add("a".into(), 1i64.into()),
            Err(error::Error::MPTY0004)
        );
    }
}
