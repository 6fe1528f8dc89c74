use std::rc::Rc;

use base64::Engine;
use ibig::IBig;
use metapath_name::Name;
use metapath_schema_type::DataType;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error;

use super::datetime::{
    format_day_time_duration, NaiveDateTimeWithOffset, NaiveDateWithOffset, YearMonthDuration,
};
use super::types::{DateTimeType, DateType, IntegerType, StringType};

/// An atomic value.
///
/// Each variant carries enough information to recover its data type.
/// Larger values are reference counted so that cloning is cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Atomic {
    /// An untyped value, as produced by casting to `untyped-atomic`.
    Untyped(Rc<str>),
    /// A string or one of its restrictions. URIs are stored here too.
    String(StringType, Rc<str>),
    Boolean(bool),
    Decimal(Rc<Decimal>),
    /// An integer or one of its restrictions.
    Integer(IntegerType, Rc<IBig>),
    Date(DateType, Rc<NaiveDateWithOffset>),
    DateTime(DateTimeType, Rc<NaiveDateTimeWithOffset>),
    DayTimeDuration(Rc<chrono::Duration>),
    YearMonthDuration(YearMonthDuration),
    /// Binary data; the string value is its base64 encoding.
    Base64(Rc<Vec<u8>>),
    QName(Rc<Name>),
}

impl Atomic {
    /// The data type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Atomic::Untyped(_) => DataType::UntypedAtomic,
            Atomic::String(string_type, _) => string_type.data_type(),
            Atomic::Boolean(_) => DataType::Boolean,
            Atomic::Decimal(_) => DataType::Decimal,
            Atomic::Integer(integer_type, _) => integer_type.data_type(),
            Atomic::Date(DateType::Date, _) => DataType::Date,
            Atomic::Date(DateType::DateWithTimezone, _) => DataType::DateWithTimezone,
            Atomic::DateTime(DateTimeType::DateTime, _) => DataType::DateTime,
            Atomic::DateTime(DateTimeType::DateTimeWithTimezone, _) => {
                DataType::DateTimeWithTimezone
            }
            Atomic::DayTimeDuration(_) => DataType::DayTimeDuration,
            Atomic::YearMonthDuration(_) => DataType::YearMonthDuration,
            Atomic::Base64(_) => DataType::Base64,
            Atomic::QName(_) => DataType::QName,
        }
    }

    /// The canonical lexical form of the value.
    pub fn string_value(&self) -> String {
        match self {
            Atomic::Untyped(s) | Atomic::String(_, s) => s.to_string(),
            Atomic::Boolean(b) => b.to_string(),
            Atomic::Decimal(d) => canonical_decimal(d),
            Atomic::Integer(_, i) => i.to_string(),
            Atomic::Date(_, d) => d.to_string(),
            Atomic::DateTime(_, d) => d.to_string(),
            Atomic::DayTimeDuration(d) => format_day_time_duration(d),
            Atomic::YearMonthDuration(d) => d.to_string(),
            Atomic::Base64(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes.as_ref()),
            Atomic::QName(name) => name.to_full_name(),
        }
    }

    /// The effective boolean value.
    ///
    /// Strings are true when not empty, numbers when not zero. Other types
    /// have no effective boolean value.
    pub fn effective_boolean_value(&self) -> error::Result<bool> {
        match self {
            Atomic::Boolean(b) => Ok(*b),
            Atomic::Untyped(s) | Atomic::String(_, s) => Ok(!s.is_empty()),
            Atomic::Decimal(d) => Ok(!d.is_zero()),
            Atomic::Integer(_, i) => Ok(*i.as_ref() != IBig::from(0)),
            _ => Err(error::Error::FORG0006),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Atomic::Decimal(_) | Atomic::Integer(_, _))
    }

    pub fn is_untyped(&self) -> bool {
        matches!(self, Atomic::Untyped(_))
    }

    /// Strings, URIs and untyped values, which all compare as strings.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Atomic::Untyped(_) | Atomic::String(_, _))
    }

    pub fn to_str(&self) -> error::Result<&str> {
        match self {
            Atomic::Untyped(s) | Atomic::String(_, s) => Ok(s.as_ref()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    pub fn to_bool(&self) -> error::Result<bool> {
        match self {
            Atomic::Boolean(b) => Ok(*b),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// The value as a decimal. Integers are converted.
    pub fn to_decimal(&self) -> error::Result<Decimal> {
        match self {
            Atomic::Decimal(d) => Ok(*d.as_ref()),
            Atomic::Integer(_, i) => ibig_to_decimal(i),
            _ => Err(error::Error::MPTY0004),
        }
    }

    pub fn to_integer(&self) -> error::Result<IBig> {
        match self {
            Atomic::Integer(_, i) => Ok(i.as_ref().clone()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// A numeric value as an i64, for positions and lengths. Decimals are
    /// rounded half up, as positions in the function library are.
    pub fn to_i64(&self) -> error::Result<i64> {
        match self {
            Atomic::Integer(_, i) => i.as_ref().try_into().map_err(|_| error::Error::FOCA0003),
            Atomic::Decimal(d) => d
                .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .ok_or(error::Error::FOCA0003),
            _ => Err(error::Error::MPTY0004),
        }
    }

    pub fn to_day_time_duration(&self) -> error::Result<chrono::Duration> {
        match self {
            Atomic::DayTimeDuration(d) => Ok(*d.as_ref()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// A representation as it could appear in an expression, for
    /// diagnostics and the expression printer.
    pub fn display_representation(&self) -> String {
        match self {
            Atomic::String(StringType::String, s) => {
                format!("'{}'", s.replace('\'', "''"))
            }
            Atomic::Decimal(_) | Atomic::Integer(IntegerType::Integer, _) => self.string_value(),
            Atomic::Boolean(b) => format!("{}()", b),
            _ => format!(
                "{}('{}')",
                self.data_type().local_name(),
                self.string_value().replace('\'', "''")
            ),
        }
    }
}

pub(crate) fn canonical_decimal(d: &Decimal) -> String {
    let normalized = d.normalize();
    if normalized.is_zero() {
        "0".to_string()
    } else {
        normalized.to_string()
    }
}

pub(crate) fn ibig_to_decimal(i: &IBig) -> error::Result<Decimal> {
    let value: i128 = i.try_into().map_err(|_| error::Error::FOAR0002)?;
    Decimal::try_from_i128_with_scale(value, 0).map_err(|_| error::Error::FOAR0002)
}

pub(crate) fn decimal_to_ibig(d: &Decimal) -> error::Result<IBig> {
    let truncated = d.trunc();
    let value = truncated.to_i128().ok_or(error::Error::FOCA0003)?;
    Ok(IBig::from(value))
}

impl From<bool> for Atomic {
    fn from(b: bool) -> Self {
        Atomic::Boolean(b)
    }
}

impl From<&str> for Atomic {
    fn from(s: &str) -> Self {
        Atomic::String(StringType::String, s.into())
    }
}

impl From<String> for Atomic {
    fn from(s: String) -> Self {
        Atomic::String(StringType::String, s.into())
    }
}

impl From<Decimal> for Atomic {
    fn from(d: Decimal) -> Self {
        Atomic::Decimal(Rc::new(d))
    }
}

impl From<IBig> for Atomic {
    fn from(i: IBig) -> Self {
        Atomic::Integer(IntegerType::Integer, Rc::new(i))
    }
}

impl From<Rc<IBig>> for Atomic {
    fn from(i: Rc<IBig>) -> Self {
        Atomic::Integer(IntegerType::Integer, i)
    }
}

impl From<i64> for Atomic {
    fn from(i: i64) -> Self {
        IBig::from(i).into()
    }
}

impl From<i32> for Atomic {
    fn from(i: i32) -> Self {
        IBig::from(i).into()
    }
}

impl From<usize> for Atomic {
    fn from(i: usize) -> Self {
        IBig::from(i).into()
    }
}

impl From<NaiveDateWithOffset> for Atomic {
    fn from(d: NaiveDateWithOffset) -> Self {
        Atomic::Date(DateType::Date, Rc::new(d))
    }
}

impl From<NaiveDateTimeWithOffset> for Atomic {
    fn from(d: NaiveDateTimeWithOffset) -> Self {
        Atomic::DateTime(DateTimeType::DateTime, Rc::new(d))
    }
}

impl From<chrono::Duration> for Atomic {
    fn from(d: chrono::Duration) -> Self {
        Atomic::DayTimeDuration(Rc::new(d))
    }
}

impl From<YearMonthDuration> for Atomic {
    fn from(d: YearMonthDuration) -> Self {
        Atomic::YearMonthDuration(d)
    }
}

impl From<Name> for Atomic {
    fn from(name: Name) -> Self {
        Atomic::QName(Rc::new(name))
    }
}

impl TryFrom<Atomic> for String {
    type Error = error::Error;

    fn try_from(atomic: Atomic) -> error::Result<String> {
        Ok(atomic.to_str()?.to_string())
    }
}

impl TryFrom<Atomic> for bool {
    type Error = error::Error;

    fn try_from(atomic: Atomic) -> error::Result<bool> {
        atomic.to_bool()
    }
}

impl TryFrom<Atomic> for Decimal {
    type Error = error::Error;

    fn try_from(atomic: Atomic) -> error::Result<Decimal> {
        atomic.to_decimal()
    }
}

impl TryFrom<Atomic> for IBig {
    type Error = error::Error;

    fn try_from(atomic: Atomic) -> error::Result<IBig> {
        atomic.to_integer()
    }
}
