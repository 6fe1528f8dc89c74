/// Atomic values.
///
/// Metapath defines a set of atomic values, and rules for how to do
/// arithmetic on them, compare them, and cast them to other value types.
mod atomic_core;
mod cast;
mod cast_binary;
mod cast_string;
mod compare;
mod datetime;
mod map_key;
mod op_add;
mod op_div;
mod op_idiv;
mod op_mod;
mod op_multiply;
mod op_subtract;
mod op_unary;
mod round;
mod types;

pub use atomic_core::Atomic;
pub(crate) use atomic_core::{canonical_decimal, decimal_to_ibig, ibig_to_decimal};
pub(crate) use cast::{parse_decimal, parse_integer};
pub(crate) use cast_binary::cast_untyped_to_numeric;
pub use compare::AtomicCompareValue;
pub(crate) use datetime::{
    duration_to_offset, offset_to_duration, utc, ToDateTimeStamp,
};
pub use datetime::{NaiveDateTimeWithOffset, NaiveDateWithOffset, YearMonthDuration};
pub(crate) use map_key::MapKey;
pub(crate) use op_add::op_add;
pub(crate) use op_div::op_div;
pub(crate) use op_idiv::op_idiv;
pub(crate) use op_mod::op_mod;
pub(crate) use op_multiply::{duration_seconds, op_multiply};
pub(crate) use op_subtract::op_subtract;
pub(crate) use op_unary::{op_unary_minus, op_unary_plus};
pub(crate) use round::{round_atomic, round_decimal, Rounding};
pub use types::{DateTimeType, DateType, IntegerType, StringType};
