use metapath_schema_type::DataType;

/// The integer types supported as atomic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerType {
    Integer,
    NonNegativeInteger,
    PositiveInteger,
}

impl IntegerType {
    pub(crate) fn data_type(&self) -> DataType {
        match self {
            IntegerType::Integer => DataType::Integer,
            IntegerType::NonNegativeInteger => DataType::NonNegativeInteger,
            IntegerType::PositiveInteger => DataType::PositiveInteger,
        }
    }

    pub(crate) fn from_data_type(data_type: DataType) -> Option<Self> {
        match data_type {
            DataType::Integer => Some(IntegerType::Integer),
            DataType::NonNegativeInteger => Some(IntegerType::NonNegativeInteger),
            DataType::PositiveInteger => Some(IntegerType::PositiveInteger),
            _ => None,
        }
    }
}

/// The types of string supported as atomic values.
///
/// URIs are not strings in the type lattice, but they are stored the same
/// way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringType {
    String,
    Token,
    NCName,
    Uuid,
    EmailAddress,
    Hostname,
    IpV4Address,
    IpV6Address,
    MarkupLine,
    MarkupMultiline,
    UriReference,
    Uri,
}

impl StringType {
    pub(crate) fn data_type(&self) -> DataType {
        match self {
            StringType::String => DataType::String,
            StringType::Token => DataType::Token,
            StringType::NCName => DataType::NCName,
            StringType::Uuid => DataType::Uuid,
            StringType::EmailAddress => DataType::EmailAddress,
            StringType::Hostname => DataType::Hostname,
            StringType::IpV4Address => DataType::IpV4Address,
            StringType::IpV6Address => DataType::IpV6Address,
            StringType::MarkupLine => DataType::MarkupLine,
            StringType::MarkupMultiline => DataType::MarkupMultiline,
            StringType::UriReference => DataType::UriReference,
            StringType::Uri => DataType::Uri,
        }
    }

    pub(crate) fn from_data_type(data_type: DataType) -> Option<Self> {
        Some(match data_type {
            DataType::String => StringType::String,
            DataType::Token => StringType::Token,
            DataType::NCName => StringType::NCName,
            DataType::Uuid => StringType::Uuid,
            DataType::EmailAddress => StringType::EmailAddress,
            DataType::Hostname => StringType::Hostname,
            DataType::IpV4Address => StringType::IpV4Address,
            DataType::IpV6Address => StringType::IpV6Address,
            DataType::MarkupLine => StringType::MarkupLine,
            DataType::MarkupMultiline => StringType::MarkupMultiline,
            DataType::UriReference => StringType::UriReference,
            DataType::Uri => StringType::Uri,
            _ => return None,
        })
    }

    /// Whether the lexical form has its whitespace collapsed before it is
    /// checked.
    pub(crate) fn collapses_whitespace(&self) -> bool {
        !matches!(
            self,
            StringType::String | StringType::MarkupLine | StringType::MarkupMultiline
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateType {
    Date,
    DateWithTimezone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeType {
    DateTime,
    DateTimeWithTimezone,
}
