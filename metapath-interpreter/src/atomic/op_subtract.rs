use std::rc::Rc;

use chrono::FixedOffset;

use crate::error;

use super::cast_binary::cast_binary_arithmetic;
use super::datetime::{self, NaiveDateTimeWithOffset, NaiveDateWithOffset, ToDateTimeStamp};
use super::op_add::{add_duration, add_months};
use super::Atomic;

pub(crate) fn op_subtract(
    a: Atomic,
    b: Atomic,
    default_offset: FixedOffset,
) -> error::Result<Atomic> {
    use Atomic::*;
    let (a, b) = cast_binary_arithmetic(a, b)?;
    match (a, b) {
        (Integer(_, a), Integer(_, b)) => Ok((a.as_ref() - b.as_ref()).into()),
        (Decimal(a), Decimal(b)) => Ok(a.checked_sub(*b).ok_or(error::Error::FOAR0002)?.into()),
        (Date(_, a), Date(_, b)) => Ok((a.to_date_time_stamp(default_offset)
            - b.to_date_time_stamp(default_offset))
        .into()),
        (DateTime(_, a), DateTime(_, b)) => Ok((a.to_date_time_stamp(default_offset)
            - b.to_date_time_stamp(default_offset))
        .into()),
        (Date(t, d), DayTimeDuration(duration)) => {
            let date_time = d.date.and_time(Default::default());
            let date = add_duration(date_time, -*duration)?.date();
            Ok(Date(t, Rc::new(NaiveDateWithOffset::new(date, d.offset))))
        }
        (Date(t, d), YearMonthDuration(duration)) => {
            let date_time = d.date.and_time(Default::default());
            let date = add_months(date_time, -duration.months)?.date();
            Ok(Date(t, Rc::new(NaiveDateWithOffset::new(date, d.offset))))
        }
        (DateTime(t, d), DayTimeDuration(duration)) => {
            let date_time = add_duration(d.date_time, -*duration)?;
            Ok(DateTime(
                t,
                Rc::new(NaiveDateTimeWithOffset::new(date_time, d.offset)),
            ))
        }
        (DateTime(t, d), YearMonthDuration(duration)) => {
            let date_time = add_months(d.date_time, -duration.months)?;
            Ok(DateTime(
                t,
                Rc::new(NaiveDateTimeWithOffset::new(date_time, d.offset)),
            ))
        }
        (DayTimeDuration(a), DayTimeDuration(b)) => Ok(a
            .checked_sub(&b)
            .ok_or(error::Error::FODT0001)?
            .into()),
        (YearMonthDuration(a), YearMonthDuration(b)) => Ok(datetime::YearMonthDuration::new(
            a.months.checked_sub(b.months).ok_or(error::Error::FODT0001)?,
        )
        .into()),
        _ => Err(error::Error::MPTY0004),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ibig::ibig;

    use crate::atomic::datetime::utc;

    #[test]
    fn test_integers() {
        assert_eq!(
            op_subtract(1i64.into(), 3i64.into(), utc()).unwrap(),
            Atomic::from(ibig!(-2))
        );
    }

    #[test]
    fn test_dates_yield_duration() {
        let a: Atomic = NaiveDateWithOffset::parse("2024-03-01").unwrap().into();
        let b: Atomic = NaiveDateWithOffset::parse("2024-02-28").unwrap().into();
        let result = op_subtract(a, b, utc()).unwrap();
        assert_eq!(result.string_value(), "P2D");
    }

    #[test]
    fn test_date_time_minus_duration() {
        let a: Atomic = NaiveDateTimeWithOffset::parse("2024-01-01T00:30:00")
            .unwrap()
            .into();
        let result = op_subtract(a, chrono::Duration::hours(1).into(), utc()).unwrap();
        assert_eq!(result.string_value(), "2023-12-31T23:30:00");
    }
}
