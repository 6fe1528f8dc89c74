use std::rc::Rc;

use chrono::{Datelike, FixedOffset, Timelike};
use rust_decimal::Decimal;

use crate::atomic::{
    duration_to_offset, offset_to_duration, utc, Atomic, DateTimeType, DateType,
    NaiveDateTimeWithOffset, NaiveDateWithOffset, ToDateTimeStamp,
};
use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{contextual, optional_arg, pure};

fn date_time_arg(argument: &Sequence) -> error::Result<Option<NaiveDateTimeWithOffset>> {
    match optional_arg(argument)? {
        Some(Atomic::DateTime(_, date_time)) => Ok(Some(*date_time)),
        Some(_) => Err(error::Error::MPTY0004),
        None => Ok(None),
    }
}

fn date_arg(argument: &Sequence) -> error::Result<Option<NaiveDateWithOffset>> {
    match optional_arg(argument)? {
        Some(Atomic::Date(_, date)) => Ok(Some(*date)),
        Some(_) => Err(error::Error::MPTY0004),
        None => Ok(None),
    }
}

fn seconds_with_fraction(seconds: i64, nanos: i64) -> Decimal {
    Decimal::new(seconds * 1_000_000_000 + nanos, 9).normalize()
}

fn year_from_date_time(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_time_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date_time.year() as i64))
        .into())
}

fn month_from_date_time(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_time_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date_time.month() as i64))
        .into())
}

fn day_from_date_time(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_time_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date_time.day() as i64))
        .into())
}

fn hours_from_date_time(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_time_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date_time.hour() as i64))
        .into())
}

fn minutes_from_date_time(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    Ok(date_time_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date_time.minute() as i64))
        .into())
}

fn seconds_from_date_time(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    Ok(date_time_arg(&arguments[0])?
        .map(|d| {
            Atomic::from(seconds_with_fraction(
                d.date_time.second() as i64,
                d.date_time.nanosecond() as i64,
            ))
        })
        .into())
}

fn timezone_from_date_time(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    Ok(date_time_arg(&arguments[0])?
        .and_then(|d| d.offset)
        .map(|offset| Atomic::from(offset_to_duration(offset)))
        .into())
}

fn year_from_date(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date.year() as i64))
        .into())
}

fn month_from_date(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date.month() as i64))
        .into())
}

fn day_from_date(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_arg(&arguments[0])?
        .map(|d| Atomic::from(d.date.day() as i64))
        .into())
}

fn timezone_from_date(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(date_arg(&arguments[0])?
        .and_then(|d| d.offset)
        .map(|offset| Atomic::from(offset_to_duration(offset)))
        .into())
}

/// The components of a duration: months for year-month durations, and
/// the day-time part otherwise.
enum DurationParts {
    YearMonth(i64),
    DayTime(chrono::Duration),
}

fn duration_arg(argument: &Sequence) -> error::Result<Option<DurationParts>> {
    match optional_arg(argument)? {
        Some(Atomic::YearMonthDuration(d)) => Ok(Some(DurationParts::YearMonth(d.months))),
        Some(Atomic::DayTimeDuration(d)) => Ok(Some(DurationParts::DayTime(*d))),
        Some(_) => Err(error::Error::MPTY0004),
        None => Ok(None),
    }
}

fn duration_component(
    argument: &Sequence,
    component: fn(&DurationParts) -> Atomic,
) -> error::Result<Sequence> {
    Ok(duration_arg(argument)?.map(|parts| component(&parts)).into())
}

fn years_from_duration(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    duration_component(&arguments[0], |parts| match parts {
        DurationParts::YearMonth(months) => Atomic::from(months / 12),
        DurationParts::DayTime(_) => Atomic::from(0i64),
    })
}

fn months_from_duration(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    duration_component(&arguments[0], |parts| match parts {
        DurationParts::YearMonth(months) => Atomic::from(months % 12),
        DurationParts::DayTime(_) => Atomic::from(0i64),
    })
}

fn days_from_duration(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    duration_component(&arguments[0], |parts| match parts {
        DurationParts::YearMonth(_) => Atomic::from(0i64),
        DurationParts::DayTime(d) => Atomic::from(d.num_days()),
    })
}

fn hours_from_duration(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    duration_component(&arguments[0], |parts| match parts {
        DurationParts::YearMonth(_) => Atomic::from(0i64),
        DurationParts::DayTime(d) => Atomic::from(d.num_hours() % 24),
    })
}

fn minutes_from_duration(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    duration_component(&arguments[0], |parts| match parts {
        DurationParts::YearMonth(_) => Atomic::from(0i64),
        DurationParts::DayTime(d) => Atomic::from(d.num_minutes() % 60),
    })
}

fn seconds_from_duration(
    _context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    duration_component(&arguments[0], |parts| match parts {
        DurationParts::YearMonth(_) => Atomic::from(Decimal::ZERO),
        DurationParts::DayTime(d) => Atomic::from(seconds_with_fraction(
            d.num_seconds() % 60,
            d.subsec_nanos() as i64,
        )),
    })
}

/// The timezone to adjust to: the implicit timezone when the argument is
/// left out, no timezone when it is the empty sequence.
fn target_timezone(
    context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Option<FixedOffset>> {
    match arguments.get(1) {
        None => Ok(Some(context.implicit_timezone())),
        Some(timezone) => match optional_arg(timezone)? {
            Some(timezone) => Ok(Some(duration_to_offset(&timezone.to_day_time_duration()?)?)),
            None => Ok(None),
        },
    }
}

fn adjust_date_time(
    value: NaiveDateTimeWithOffset,
    timezone: Option<FixedOffset>,
) -> NaiveDateTimeWithOffset {
    match (value.offset, timezone) {
        (_, None) => NaiveDateTimeWithOffset::new(value.date_time, None),
        (None, Some(timezone)) => NaiveDateTimeWithOffset::new(value.date_time, Some(timezone)),
        (Some(_), Some(timezone)) => NaiveDateTimeWithOffset::from_date_time_stamp(
            value.to_date_time_stamp(utc()).with_timezone(&timezone),
        ),
    }
}

fn adjust_date_time_to_timezone(
    context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    let timezone = target_timezone(context, arguments)?;
    Ok(date_time_arg(&arguments[0])?
        .map(|value| {
            let adjusted = adjust_date_time(value, timezone);
            let date_time_type = match adjusted.offset {
                Some(_) => DateTimeType::DateTimeWithTimezone,
                None => DateTimeType::DateTime,
            };
            Atomic::DateTime(date_time_type, Rc::new(adjusted))
        })
        .into())
}

fn adjust_date_to_timezone(
    context: &DynamicContext,
    arguments: &[Sequence],
) -> error::Result<Sequence> {
    let timezone = target_timezone(context, arguments)?;
    Ok(date_arg(&arguments[0])?
        .map(|value| {
            let midnight = NaiveDateTimeWithOffset::new(
                value.date.and_time(chrono::NaiveTime::MIN),
                value.offset,
            );
            let adjusted = adjust_date_time(midnight, timezone);
            let date = NaiveDateWithOffset::new(adjusted.date_time.date(), adjusted.offset);
            let date_type = match date.offset {
                Some(_) => DateType::DateWithTimezone,
                None => DateType::Date,
            };
            Atomic::Date(date_type, Rc::new(date))
        })
        .into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure(
            "fn:year-from-date-time($arg as date-time?) as integer?",
            year_from_date_time,
        )?,
        pure(
            "fn:month-from-date-time($arg as date-time?) as integer?",
            month_from_date_time,
        )?,
        pure(
            "fn:day-from-date-time($arg as date-time?) as integer?",
            day_from_date_time,
        )?,
        pure(
            "fn:hours-from-date-time($arg as date-time?) as integer?",
            hours_from_date_time,
        )?,
        pure(
            "fn:minutes-from-date-time($arg as date-time?) as integer?",
            minutes_from_date_time,
        )?,
        pure(
            "fn:seconds-from-date-time($arg as date-time?) as decimal?",
            seconds_from_date_time,
        )?,
        pure(
            "fn:timezone-from-date-time($arg as date-time?) as day-time-duration?",
            timezone_from_date_time,
        )?,
        pure("fn:year-from-date($arg as date?) as integer?", year_from_date)?,
        pure("fn:month-from-date($arg as date?) as integer?", month_from_date)?,
        pure("fn:day-from-date($arg as date?) as integer?", day_from_date)?,
        pure(
            "fn:timezone-from-date($arg as date?) as day-time-duration?",
            timezone_from_date,
        )?,
        pure(
            "fn:years-from-duration($arg as duration?) as integer?",
            years_from_duration,
        )?,
        pure(
            "fn:months-from-duration($arg as duration?) as integer?",
            months_from_duration,
        )?,
        pure(
            "fn:days-from-duration($arg as duration?) as integer?",
            days_from_duration,
        )?,
        pure(
            "fn:hours-from-duration($arg as duration?) as integer?",
            hours_from_duration,
        )?,
        pure(
            "fn:minutes-from-duration($arg as duration?) as integer?",
            minutes_from_duration,
        )?,
        pure(
            "fn:seconds-from-duration($arg as duration?) as decimal?",
            seconds_from_duration,
        )?,
        contextual(
            "fn:adjust-date-time-to-timezone($arg as date-time?) as date-time?",
            adjust_date_time_to_timezone,
        )?,
        contextual(
            "fn:adjust-date-time-to-timezone($arg as date-time?, $timezone as day-time-duration?) as date-time?",
            adjust_date_time_to_timezone,
        )?,
        contextual(
            "fn:adjust-date-to-timezone($arg as date?) as date?",
            adjust_date_to_timezone,
        )?,
        contextual(
            "fn:adjust-date-to-timezone($arg as date?, $timezone as day-time-duration?) as date?",
            adjust_date_to_timezone,
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_adjust_zoned_date_time() {
        let date_time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let value = NaiveDateTimeWithOffset::new(date_time, Some(utc()));
        let five_east = FixedOffset::east_opt(5 * 3600).unwrap();
        let adjusted = adjust_date_time(value, Some(five_east));
        assert_eq!(adjusted.date_time.hour(), 17);
        assert_eq!(adjusted.offset, Some(five_east));
    }

    #[test]
    fn test_adjust_removes_timezone() {
        let date_time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let value = NaiveDateTimeWithOffset::new(date_time, Some(utc()));
        let adjusted = adjust_date_time(value, None);
        assert_eq!(adjusted.date_time, date_time);
        assert_eq!(adjusted.offset, None);
    }
}
