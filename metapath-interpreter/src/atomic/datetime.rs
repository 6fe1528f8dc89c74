use std::fmt;
use std::sync::OnceLock;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error;

/// A date with an optional timezone offset. A date without an offset is
/// ambiguous: it is only placed on the timeline under an implicit timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaiveDateWithOffset {
    pub date: NaiveDate,
    pub offset: Option<FixedOffset>,
}

/// A date-time with an optional timezone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaiveDateTimeWithOffset {
    pub date_time: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

/// A duration expressed in months only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonthDuration {
    pub months: i64,
}

pub(crate) trait ToDateTimeStamp {
    /// Place the value on the timeline. Values without an offset take the
    /// given default offset.
    fn to_date_time_stamp(&self, default_offset: FixedOffset) -> chrono::DateTime<FixedOffset>;

    /// The UTC normalized date-time, used where values are hashed.
    fn to_naive_date_time(&self, default_offset: FixedOffset) -> NaiveDateTime {
        self.to_date_time_stamp(default_offset).naive_utc()
    }
}

impl NaiveDateWithOffset {
    pub fn new(date: NaiveDate, offset: Option<FixedOffset>) -> Self {
        Self { date, offset }
    }

    pub(crate) fn parse(s: &str) -> error::Result<Self> {
        let (body, offset) = split_offset(s.trim())?;
        if !date_regex().is_match(body) {
            return Err(error::Error::FOCA0002);
        }
        let date =
            NaiveDate::parse_from_str(body, "%Y-%m-%d").map_err(|_| error::Error::FOCA0002)?;
        Ok(Self { date, offset })
    }

    /// The same date carrying an explicit offset; ambiguous dates take the
    /// given offset.
    pub(crate) fn with_offset_or(&self, offset: FixedOffset) -> Self {
        Self {
            date: self.date,
            offset: Some(self.offset.unwrap_or(offset)),
        }
    }
}

impl ToDateTimeStamp for NaiveDateWithOffset {
    fn to_date_time_stamp(&self, default_offset: FixedOffset) -> chrono::DateTime<FixedOffset> {
        let offset = self.offset.unwrap_or(default_offset);
        let date_time = self.date.and_time(NaiveTime::MIN);
        offset.from_utc_datetime(&(date_time - offset_duration(offset)))
    }
}

impl fmt::Display for NaiveDateWithOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))?;
        write_offset(f, self.offset)
    }
}

impl NaiveDateTimeWithOffset {
    pub fn new(date_time: NaiveDateTime, offset: Option<FixedOffset>) -> Self {
        Self { date_time, offset }
    }

    pub(crate) fn parse(s: &str) -> error::Result<Self> {
        let (body, offset) = split_offset(s.trim())?;
        if !date_time_regex().is_match(body) {
            return Err(error::Error::FOCA0002);
        }
        let date_time = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|_| error::Error::FOCA0002)?;
        Ok(Self { date_time, offset })
    }

    pub(crate) fn with_offset_or(&self, offset: FixedOffset) -> Self {
        Self {
            date_time: self.date_time,
            offset: Some(self.offset.unwrap_or(offset)),
        }
    }

    pub(crate) fn from_date_time_stamp(stamp: chrono::DateTime<FixedOffset>) -> Self {
        Self {
            date_time: stamp.naive_local(),
            offset: Some(*stamp.offset()),
        }
    }
}

impl ToDateTimeStamp for NaiveDateTimeWithOffset {
    fn to_date_time_stamp(&self, default_offset: FixedOffset) -> chrono::DateTime<FixedOffset> {
        let offset = self.offset.unwrap_or(default_offset);
        offset.from_utc_datetime(&(self.date_time - offset_duration(offset)))
    }
}

impl fmt::Display for NaiveDateTimeWithOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date_time.format("%Y-%m-%dT%H:%M:%S"))?;
        let nanos = self.date_time.nanosecond();
        if nanos > 0 {
            let fraction = Decimal::new(nanos as i64, 9).normalize().to_string();
            // drop the leading "0"
            write!(f, "{}", &fraction[1..])?;
        }
        write_offset(f, self.offset)
    }
}

impl YearMonthDuration {
    pub fn new(months: i64) -> Self {
        Self { months }
    }

    pub(crate) fn parse(s: &str) -> error::Result<Self> {
        let parsed = ParsedDuration::parse(s)?;
        if parsed.has_day_time {
            return Err(error::Error::FOCA0002);
        }
        Ok(parsed.year_month())
    }
}

impl fmt::Display for YearMonthDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months == 0 {
            return write!(f, "P0M");
        }
        if self.months < 0 {
            write!(f, "-")?;
        }
        let months = self.months.unsigned_abs();
        write!(f, "P")?;
        if months / 12 > 0 {
            write!(f, "{}Y", months / 12)?;
        }
        if months % 12 > 0 {
            write!(f, "{}M", months % 12)?;
        }
        Ok(())
    }
}

pub(crate) fn parse_day_time_duration(s: &str) -> error::Result<chrono::Duration> {
    let parsed = ParsedDuration::parse(s)?;
    if parsed.has_year_month {
        return Err(error::Error::FOCA0002);
    }
    parsed.day_time()
}

pub(crate) fn format_day_time_duration(duration: &chrono::Duration) -> String {
    if duration.is_zero() {
        return "PT0S".to_string();
    }
    let mut s = String::new();
    if *duration < chrono::Duration::zero() {
        s.push('-');
    }
    let duration = duration.abs();
    let total_seconds = duration.num_seconds();
    let nanos = duration.subsec_nanos();
    let days = total_seconds / 86400;
    let hours = (total_seconds % 86400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    s.push('P');
    if days > 0 {
        s.push_str(&format!("{}D", days));
    }
    if hours > 0 || minutes > 0 || seconds > 0 || nanos > 0 {
        s.push('T');
        if hours > 0 {
            s.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            s.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 || nanos > 0 {
            let seconds = Decimal::from(seconds) + Decimal::new(nanos as i64, 9);
            s.push_str(&format!("{}S", seconds.normalize()));
        }
    }
    s
}

struct ParsedDuration {
    negative: bool,
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: Decimal,
    has_year_month: bool,
    has_day_time: bool,
}

impl ParsedDuration {
    fn parse(s: &str) -> error::Result<Self> {
        let s = s.trim();
        let captures = duration_regex()
            .captures(s)
            .ok_or(error::Error::FOCA0002)?;
        // "P" and "PT" alone are not durations
        if s.ends_with('P') || s.ends_with('T') {
            return Err(error::Error::FOCA0002);
        }
        let number = |i: usize| -> error::Result<Option<i64>> {
            captures
                .get(i)
                .map(|m| m.as_str().parse::<i64>().map_err(|_| error::Error::FODT0001))
                .transpose()
        };
        let years = number(2)?;
        let months = number(3)?;
        let days = number(4)?;
        let hours = number(5)?;
        let minutes = number(6)?;
        let seconds = captures
            .get(7)
            .map(|m| m.as_str().parse::<Decimal>().map_err(|_| error::Error::FODT0001))
            .transpose()?;
        Ok(Self {
            negative: captures.get(1).is_some(),
            has_year_month: years.is_some() || months.is_some(),
            has_day_time: days.is_some()
                || hours.is_some()
                || minutes.is_some()
                || seconds.is_some(),
            years: years.unwrap_or(0),
            months: months.unwrap_or(0),
            days: days.unwrap_or(0),
            hours: hours.unwrap_or(0),
            minutes: minutes.unwrap_or(0),
            seconds: seconds.unwrap_or_default(),
        })
    }

    fn year_month(&self) -> YearMonthDuration {
        let months = self.years * 12 + self.months;
        YearMonthDuration::new(if self.negative { -months } else { months })
    }

    fn day_time(&self) -> error::Result<chrono::Duration> {
        let whole_seconds = self.seconds.trunc();
        let nanos = ((self.seconds - whole_seconds) * Decimal::from(1_000_000_000))
            .to_i64()
            .ok_or(error::Error::FODT0001)?;
        let whole_seconds = whole_seconds.to_i64().ok_or(error::Error::FODT0001)?;
        let duration = chrono::Duration::try_days(self.days)
            .and_then(|d| d.checked_add(&chrono::Duration::try_hours(self.hours)?))
            .and_then(|d| d.checked_add(&chrono::Duration::try_minutes(self.minutes)?))
            .and_then(|d| d.checked_add(&chrono::Duration::try_seconds(whole_seconds)?))
            .and_then(|d| d.checked_add(&chrono::Duration::nanoseconds(nanos)))
            .ok_or(error::Error::FODT0001)?;
        Ok(if self.negative { -duration } else { duration })
    }
}

fn split_offset(s: &str) -> error::Result<(&str, Option<FixedOffset>)> {
    if let Some(body) = s.strip_suffix('Z') {
        return Ok((body, Some(utc())));
    }
    let bytes = s.as_bytes();
    if bytes.len() > 6 {
        let sign = bytes[bytes.len() - 6];
        if (sign == b'+' || sign == b'-') && bytes[bytes.len() - 3] == b':' {
            let (body, zone) = s.split_at(s.len() - 6);
            return Ok((body, Some(parse_offset(zone)?)));
        }
    }
    Ok((s, None))
}

/// Parse a `+hh:mm` or `-hh:mm` offset, or `Z`.
pub(crate) fn parse_offset(zone: &str) -> error::Result<FixedOffset> {
    if zone == "Z" {
        return Ok(utc());
    }
    let invalid = || error::Error::FOCA0002;
    let (sign, rest) = zone.split_at(1);
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 || (hours == 14 && minutes > 0) {
        return Err(invalid());
    }
    let seconds = hours * 3600 + minutes * 60;
    let seconds = match sign {
        "+" => seconds,
        "-" => -seconds,
        _ => return Err(invalid()),
    };
    FixedOffset::east_opt(seconds).ok_or_else(invalid)
}

pub(crate) fn utc() -> FixedOffset {
    chrono::Utc.fix()
}

pub(crate) fn offset_duration(offset: FixedOffset) -> chrono::Duration {
    chrono::Duration::seconds(offset.local_minus_utc() as i64)
}

/// An offset as a day-time duration, as timezone functions report it.
pub(crate) fn offset_to_duration(offset: FixedOffset) -> chrono::Duration {
    offset_duration(offset)
}

/// A day-time duration used as a timezone must be a whole number of minutes
/// between -14:00 and +14:00.
pub(crate) fn duration_to_offset(duration: &chrono::Duration) -> error::Result<FixedOffset> {
    let seconds = duration.num_seconds();
    if duration.subsec_nanos() != 0 || seconds % 60 != 0 || seconds.abs() > 14 * 3600 {
        return Err(error::Error::FODT0001);
    }
    FixedOffset::east_opt(seconds as i32).ok_or(error::Error::FODT0001)
}

fn write_offset(f: &mut fmt::Formatter<'_>, offset: Option<FixedOffset>) -> fmt::Result {
    match offset {
        None => Ok(()),
        Some(offset) => {
            let seconds = offset.local_minus_utc();
            if seconds == 0 {
                return write!(f, "Z");
            }
            let sign = if seconds < 0 { '-' } else { '+' };
            let seconds = seconds.abs();
            write!(f, "{}{:02}:{:02}", sign, seconds / 3600, (seconds % 3600) / 60)
        }
    }
}

fn date_regex() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| Regex::new(r"^-?[0-9]{4,}-[0-9]{2}-[0-9]{2}$").expect("valid regex"))
}

fn date_time_regex() -> &'static Regex {
    static DATE_TIME: OnceLock<Regex> = OnceLock::new();
    DATE_TIME.get_or_init(|| {
        Regex::new(r"^-?[0-9]{4,}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?$")
            .expect("valid regex")
    })
}

fn duration_regex() -> &'static Regex {
    static DURATION: OnceLock<Regex> = OnceLock::new();
    DURATION.get_or_init(|| {
        Regex::new(
            r"^(-)?P(?:([0-9]+)Y)?(?:([0-9]+)M)?(?:([0-9]+)D)?(?:T(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+(?:\.[0-9]+)?)S)?)?$",
        )
        .expect("valid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = NaiveDateWithOffset::parse("2024-02-29").unwrap();
        assert_eq!(date.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(date.offset, None);
        assert_eq!(date.to_string(), "2024-02-29");

        let date = NaiveDateWithOffset::parse("2024-02-29Z").unwrap();
        assert_eq!(date.offset, Some(utc()));
        assert_eq!(date.to_string(), "2024-02-29Z");

        assert!(NaiveDateWithOffset::parse("2023-02-29").is_err());
        assert!(NaiveDateWithOffset::parse("2023-2-1").is_err());
    }

    #[test]
    fn test_parse_date_time() {
        let date_time = NaiveDateTimeWithOffset::parse("2024-01-15T10:30:00.250-05:00").unwrap();
        assert_eq!(
            date_time.offset,
            Some(FixedOffset::west_opt(5 * 3600).unwrap())
        );
        assert_eq!(date_time.to_string(), "2024-01-15T10:30:00.25-05:00");
        assert!(NaiveDateTimeWithOffset::parse("2024-01-15 10:30:00").is_err());
    }

    #[test]
    fn test_time_stamp_normalizes_offset() {
        let a = NaiveDateTimeWithOffset::parse("2024-01-15T10:00:00+01:00").unwrap();
        let b = NaiveDateTimeWithOffset::parse("2024-01-15T09:00:00Z").unwrap();
        assert_eq!(
            a.to_date_time_stamp(utc()),
            b.to_date_time_stamp(utc())
        );
    }

    #[test]
    fn test_durations() {
        let duration = parse_day_time_duration("P1DT2H3M4.5S").unwrap();
        assert_eq!(format_day_time_duration(&duration), "P1DT2H3M4.5S");
        let duration = parse_day_time_duration("-PT90M").unwrap();
        assert_eq!(format_day_time_duration(&duration), "-PT1H30M");
        assert_eq!(
            format_day_time_duration(&chrono::Duration::zero()),
            "PT0S"
        );
        assert!(parse_day_time_duration("P1Y").is_err());
        assert!(parse_day_time_duration("PT").is_err());

        let duration = YearMonthDuration::parse("P1Y14M").unwrap();
        assert_eq!(duration.months, 26);
        assert_eq!(duration.to_string(), "P2Y2M");
        assert!(YearMonthDuration::parse("P1D").is_err());
        assert_eq!(YearMonthDuration::new(0).to_string(), "P0M");
    }
}
