use std::rc::Rc;

use base64::Engine;
use ibig::IBig;
use metapath_name::Name;
use metapath_schema_type::DataType;
use rust_decimal::Decimal;

use crate::error;

use super::atomic_core::{decimal_to_ibig, ibig_to_decimal};
use super::cast_string::{collapse_whitespace, validate_string};
use super::datetime::{
    parse_day_time_duration, utc, NaiveDateTimeWithOffset, NaiveDateWithOffset,
    YearMonthDuration,
};
use super::types::{DateTimeType, DateType, IntegerType, StringType};
use super::Atomic;

impl Atomic {
    /// Cast to the given data type.
    ///
    /// Abstract targets are rejected; a value already of the target type is
    /// returned unchanged.
    pub fn cast_to(self, target: DataType) -> error::Result<Atomic> {
        if target.is_abstract() {
            return Err(error::Error::MPST0080);
        }
        if self.data_type() == target {
            return Ok(self);
        }
        if let Some(string_type) = StringType::from_data_type(target) {
            return self.cast_to_string_type(string_type);
        }
        if let Some(integer_type) = IntegerType::from_data_type(target) {
            return self.cast_to_integer_type(integer_type);
        }
        match target {
            DataType::UntypedAtomic => Ok(Atomic::Untyped(self.string_value().into())),
            DataType::Boolean => self.cast_to_boolean(),
            DataType::Decimal => self.cast_to_decimal(),
            DataType::Date => self.cast_to_date(DateType::Date),
            DataType::DateWithTimezone => self.cast_to_date(DateType::DateWithTimezone),
            DataType::DateTime => self.cast_to_date_time(DateTimeType::DateTime),
            DataType::DateTimeWithTimezone => {
                self.cast_to_date_time(DateTimeType::DateTimeWithTimezone)
            }
            DataType::DayTimeDuration => self.cast_to_day_time_duration(),
            DataType::YearMonthDuration => self.cast_to_year_month_duration(),
            DataType::Base64 => self.cast_to_base64(),
            DataType::QName => self.cast_to_qname(),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// Whether a cast to the given type would succeed.
    pub fn castable_to(&self, target: DataType) -> error::Result<bool> {
        if target.is_abstract() {
            return Err(error::Error::MPST0080);
        }
        Ok(self.clone().cast_to(target).is_ok())
    }

    pub(crate) fn cast_to_string(self) -> Atomic {
        Atomic::String(StringType::String, self.string_value().into())
    }

    fn cast_to_string_type(self, string_type: StringType) -> error::Result<Atomic> {
        let s = validate_string(string_type, &self.string_value())?;
        Ok(Atomic::String(string_type, s.into()))
    }

    fn cast_to_boolean(self) -> error::Result<Atomic> {
        match self {
            Atomic::Untyped(s) | Atomic::String(_, s) => match s.trim() {
                "true" | "1" => Ok(true.into()),
                "false" | "0" => Ok(false.into()),
                _ => Err(error::Error::FORG0001),
            },
            Atomic::Decimal(_) | Atomic::Integer(_, _) => {
                Ok(self.effective_boolean_value()?.into())
            }
            _ => Err(error::Error::MPTY0004),
        }
    }

    pub(crate) fn cast_to_decimal(self) -> error::Result<Atomic> {
        match self {
            Atomic::Decimal(_) => Ok(self),
            Atomic::Integer(_, i) => Ok(ibig_to_decimal(&i)?.into()),
            Atomic::Boolean(b) => Ok(Decimal::from(b as i64).into()),
            Atomic::Untyped(s) | Atomic::String(_, s) => Ok(parse_decimal(&s)?.into()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    fn cast_to_integer_type(self, integer_type: IntegerType) -> error::Result<Atomic> {
        let i = match self {
            Atomic::Integer(_, i) => i.as_ref().clone(),
            Atomic::Decimal(d) => decimal_to_ibig(&d)?,
            Atomic::Boolean(b) => IBig::from(b as i64),
            Atomic::Untyped(s) | Atomic::String(_, s) => parse_integer(&s)?,
            _ => return Err(error::Error::MPTY0004),
        };
        let in_range = match integer_type {
            IntegerType::Integer => true,
            IntegerType::NonNegativeInteger => i >= IBig::from(0),
            IntegerType::PositiveInteger => i > IBig::from(0),
        };
        if !in_range {
            return Err(error::Error::FORG0001);
        }
        Ok(Atomic::Integer(integer_type, Rc::new(i)))
    }

    fn cast_to_date(self, date_type: DateType) -> error::Result<Atomic> {
        let date = match self {
            Atomic::Date(_, d) => *d.as_ref(),
            Atomic::DateTime(_, d) => NaiveDateWithOffset::new(d.date_time.date(), d.offset),
            Atomic::Untyped(s) | Atomic::String(_, s) => NaiveDateWithOffset::parse(&s)?,
            _ => return Err(error::Error::MPTY0004),
        };
        let date = match date_type {
            DateType::Date => date,
            DateType::DateWithTimezone => date.with_offset_or(utc()),
        };
        Ok(Atomic::Date(date_type, Rc::new(date)))
    }

    fn cast_to_date_time(self, date_time_type: DateTimeType) -> error::Result<Atomic> {
        let date_time = match self {
            Atomic::DateTime(_, d) => *d.as_ref(),
            Atomic::Date(_, d) => NaiveDateTimeWithOffset::new(
                d.date.and_time(chrono::NaiveTime::MIN),
                d.offset,
            ),
            Atomic::Untyped(s) | Atomic::String(_, s) => NaiveDateTimeWithOffset::parse(&s)?,
            _ => return Err(error::Error::MPTY0004),
        };
        let date_time = match date_time_type {
            DateTimeType::DateTime => date_time,
            DateTimeType::DateTimeWithTimezone => date_time.with_offset_or(utc()),
        };
        Ok(Atomic::DateTime(date_time_type, Rc::new(date_time)))
    }

    fn cast_to_day_time_duration(self) -> error::Result<Atomic> {
        match self {
            Atomic::YearMonthDuration(_) => Ok(chrono::Duration::zero().into()),
            Atomic::Untyped(s) | Atomic::String(_, s) => Ok(parse_day_time_duration(&s)?.into()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    fn cast_to_year_month_duration(self) -> error::Result<Atomic> {
        match self {
            Atomic::DayTimeDuration(_) => Ok(YearMonthDuration::new(0).into()),
            Atomic::Untyped(s) | Atomic::String(_, s) => Ok(YearMonthDuration::parse(&s)?.into()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    fn cast_to_base64(self) -> error::Result<Atomic> {
        match self {
            Atomic::Untyped(s) | Atomic::String(_, s) => {
                let collapsed: String = s.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(collapsed.as_bytes())
                    .map_err(|_| error::Error::FORG0001)?;
                Ok(Atomic::Base64(Rc::new(bytes)))
            }
            _ => Err(error::Error::MPTY0004),
        }
    }

    fn cast_to_qname(self) -> error::Result<Atomic> {
        match self {
            Atomic::Untyped(s) | Atomic::String(_, s) => {
                let s = collapse_whitespace(&s);
                if let Some(rest) = s.strip_prefix("Q{") {
                    let (uri, local_name) = rest.split_once('}').ok_or(error::Error::FORG0001)?;
                    validate_string(StringType::NCName, local_name)?;
                    return Ok(Name::uri_qualified(uri, local_name).into());
                }
                // a prefix can't be resolved without a static context
                validate_string(StringType::NCName, &s)?;
                Ok(Name::unprefixed(&s).into())
            }
            _ => Err(error::Error::MPTY0004),
        }
    }
}

/// Parse the lexical form of a decimal: optional sign, digits and an
/// optional fractional part. Exponents are accepted too.
pub(crate) fn parse_decimal(s: &str) -> error::Result<Decimal> {
    let s = s.trim();
    if s.is_empty() || s.contains(char::is_whitespace) {
        return Err(error::Error::FOCA0002);
    }
    if s.contains(['e', 'E']) {
        return Decimal::from_scientific(s).map_err(|_| error::Error::FOCA0002);
    }
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.is_empty()
        || unsigned == "."
        || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
        || unsigned.matches('.').count() > 1
    {
        return Err(error::Error::FOCA0002);
    }
    let magnitude = unsigned
        .parse::<Decimal>()
        .map_err(|_| error::Error::FOCA0002)?;
    Ok(if s.starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

pub(crate) fn parse_integer(s: &str) -> error::Result<IBig> {
    let s = s.trim();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit()) {
        return Err(error::Error::FOCA0002);
    }
    let negative = s.starts_with('-');
    let magnitude = IBig::from_str_radix(unsigned, 10).map_err(|_| error::Error::FOCA0002)?;
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibig::ibig;
    use rust_decimal_macros::dec;

    #[test]
    fn test_string_to_numeric() {
        assert_eq!(
            Atomic::from("12").cast_to(DataType::Integer),
            Ok(Atomic::from(ibig!(12)))
        );
        assert_eq!(
            Atomic::from(" 1.50 ").cast_to(DataType::Decimal),
            Ok(Atomic::from(dec!(1.50)))
        );
        assert_eq!(
            Atomic::from("abc").cast_to(DataType::Integer),
            Err(error::Error::FOCA0002)
        );
    }

    #[test]
    fn test_restricted_integers() {
        assert_eq!(
            Atomic::from(0i64).cast_to(DataType::PositiveInteger),
            Err(error::Error::FORG0001)
        );
        assert_eq!(
            Atomic::from(0i64)
                .cast_to(DataType::NonNegativeInteger)
                .unwrap()
                .data_type(),
            DataType::NonNegativeInteger
        );
    }

    #[test]
    fn test_decimal_to_integer_truncates() {
        assert_eq!(
            Atomic::from(dec!(-2.7)).cast_to(DataType::Integer),
            Ok(Atomic::from(ibig!(-2)))
        );
    }

    #[test]
    fn test_boolean() {
        assert_eq!(Atomic::from("1").cast_to(DataType::Boolean), Ok(true.into()));
        assert_eq!(
            Atomic::from("yes").cast_to(DataType::Boolean),
            Err(error::Error::FORG0001)
        );
        assert_eq!(
            Atomic::from(true).cast_to(DataType::Integer),
            Ok(Atomic::from(1i64))
        );
    }

    #[test]
    fn test_date_with_timezone_synthesizes_utc() {
        let date = Atomic::from("2024-01-01")
            .cast_to(DataType::DateWithTimezone)
            .unwrap();
        assert_eq!(date.string_value(), "2024-01-01Z");
        assert_eq!(date.data_type(), DataType::DateWithTimezone);
    }

    #[test]
    fn test_date_time_to_date() {
        let date = Atomic::from("2024-01-01T10:00:00+02:00")
            .cast_to(DataType::DateTime)
            .unwrap()
            .cast_to(DataType::Date)
            .unwrap();
        assert_eq!(date.string_value(), "2024-01-01+02:00");
    }

    #[test]
    fn test_abstract_target() {
        assert_eq!(
            Atomic::from("1").cast_to(DataType::Numeric),
            Err(error::Error::MPST0080)
        );
    }

    #[test]
    fn test_base64() {
        let value = Atomic::from("aGVs bG8=").cast_to(DataType::Base64).unwrap();
        assert_eq!(value.string_value(), "aGVsbG8=");
        assert_eq!(
            Atomic::from("***").cast_to(DataType::Base64),
            Err(error::Error::FORG0001)
        );
    }

    #[test]
    fn test_string_subtype() {
        assert_eq!(
            Atomic::from("not an ncname").cast_to(DataType::NCName),
            Err(error::Error::FORG0001)
        );
        assert_eq!(
            Atomic::from(12i64).cast_to(DataType::String),
            Ok(Atomic::from("12"))
        );
    }
}
