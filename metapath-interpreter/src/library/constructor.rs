//! One constructor function per concrete data type: `meta:integer("12")`
//! is `"12" cast as integer?`.
use metapath_schema_type::DataType;

use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::{optional_arg, pure};

fn construct(argument: &Sequence, data_type: DataType) -> error::Result<Sequence> {
    match optional_arg(argument)? {
        Some(atomic) => Ok(atomic.cast_to(data_type)?.into()),
        None => Ok(Sequence::Empty),
    }
}

fn signature(data_type: DataType) -> String {
    let name = data_type.local_name();
    format!("meta:{}($arg as any-atomic-type?) as {}?", name, name)
}

macro_rules! constructors {
    ($($name:ident => $data_type:ident),* $(,)?) => {
        $(
            fn $name(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
                construct(&arguments[0], DataType::$data_type)
            }
        )*

        pub(super) fn static_function_descriptions(
        ) -> error::Result<Vec<StaticFunctionDescription>> {
            Ok(vec![
                $(pure(&signature(DataType::$data_type), $name)?,)*
            ])
        }
    };
}

constructors! {
    untyped_atomic => UntypedAtomic,
    string => String,
    token => Token,
    ncname => NCName,
    uuid => Uuid,
    email_address => EmailAddress,
    hostname => Hostname,
    ip_v4_address => IpV4Address,
    ip_v6_address => IpV6Address,
    markup_line => MarkupLine,
    markup_multiline => MarkupMultiline,
    uri_reference => UriReference,
    uri => Uri,
    boolean => Boolean,
    decimal => Decimal,
    integer => Integer,
    non_negative_integer => NonNegativeInteger,
    positive_integer => PositiveInteger,
    date => Date,
    date_with_timezone => DateWithTimezone,
    date_time => DateTime,
    date_time_with_timezone => DateTimeWithTimezone,
    day_time_duration => DayTimeDuration,
    year_month_duration => YearMonthDuration,
    base64 => Base64,
    qname => QName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_concrete_type_has_a_constructor() {
        let descriptions = static_function_descriptions().unwrap();
        let concrete = DataType::ALL
            .iter()
            .filter(|data_type| !data_type.is_abstract())
            .count();
        assert_eq!(descriptions.len(), concrete);
    }

    #[test]
    fn test_signature() {
        assert_eq!(
            signature(DataType::Integer),
            "meta:integer($arg as any-atomic-type?) as integer?"
        );
    }
}
