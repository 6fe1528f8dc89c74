const METAPATH_NAMESPACE: &str = "http://csrc.nist.gov/ns/metaschema/metapath";

/// The atomic data types, arranged as a single-inheritance lattice rooted at
/// `any-atomic-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DataType {
    AnyAtomicType,
    UntypedAtomic,
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
    Boolean,
    Numeric,
    Decimal,
    Integer,
    NonNegativeInteger,
    PositiveInteger,
    Date,
    DateWithTimezone,
    DateTime,
    DateTimeWithTimezone,
    Duration,
    DayTimeDuration,
    YearMonthDuration,
    Base64,
    QName,
}

impl DataType {
    pub const ALL: [DataType; 29] = [
        DataType::AnyAtomicType,
        DataType::UntypedAtomic,
        DataType::String,
        DataType::Token,
        DataType::NCName,
        DataType::Uuid,
        DataType::EmailAddress,
        DataType::Hostname,
        DataType::IpV4Address,
        DataType::IpV6Address,
        DataType::MarkupLine,
        DataType::MarkupMultiline,
        DataType::UriReference,
        DataType::Uri,
        DataType::Boolean,
        DataType::Numeric,
        DataType::Decimal,
        DataType::Integer,
        DataType::NonNegativeInteger,
        DataType::PositiveInteger,
        DataType::Date,
        DataType::DateWithTimezone,
        DataType::DateTime,
        DataType::DateTimeWithTimezone,
        DataType::Duration,
        DataType::DayTimeDuration,
        DataType::YearMonthDuration,
        DataType::Base64,
        DataType::QName,
    ];

    pub fn by_name(namespace: Option<&str>, local_name: &str) -> Option<Self> {
        if namespace == Some(METAPATH_NAMESPACE) {
            DataType::by_local_name(local_name)
        } else {
            None
        }
    }

    pub fn by_local_name(local_name: &str) -> Option<Self> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.local_name() == local_name)
    }

    pub fn namespace() -> &'static str {
        METAPATH_NAMESPACE
    }

    pub fn local_name(&self) -> &'static str {
        use DataType::*;
        match self {
            AnyAtomicType => "any-atomic-type",
            UntypedAtomic => "untyped-atomic",
            String => "string",
            Token => "token",
            NCName => "ncname",
            Uuid => "uuid",
            EmailAddress => "email-address",
            Hostname => "hostname",
            IpV4Address => "ip-v4-address",
            IpV6Address => "ip-v6-address",
            MarkupLine => "markup-line",
            MarkupMultiline => "markup-multiline",
            UriReference => "uri-reference",
            Uri => "uri",
            Boolean => "boolean",
            Numeric => "numeric",
            Decimal => "decimal",
            Integer => "integer",
            NonNegativeInteger => "non-negative-integer",
            PositiveInteger => "positive-integer",
            Date => "date",
            DateWithTimezone => "date-with-timezone",
            DateTime => "date-time",
            DateTimeWithTimezone => "date-time-with-timezone",
            Duration => "duration",
            DayTimeDuration => "day-time-duration",
            YearMonthDuration => "year-month-duration",
            Base64 => "base64",
            QName => "qname",
        }
    }

    pub fn parent(&self) -> Option<DataType> {
        use DataType::*;
        match self {
            AnyAtomicType => None,
            UntypedAtomic => Some(AnyAtomicType),
            String => Some(AnyAtomicType),
            Token => Some(String),
            NCName => Some(Token),
            Uuid => Some(String),
            EmailAddress => Some(String),
            Hostname => Some(String),
            IpV4Address => Some(String),
            IpV6Address => Some(String),
            MarkupLine => Some(String),
            MarkupMultiline => Some(String),
            UriReference => Some(AnyAtomicType),
            Uri => Some(UriReference),
            Boolean => Some(AnyAtomicType),
            Numeric => Some(AnyAtomicType),
            Decimal => Some(Numeric),
            Integer => Some(Decimal),
            NonNegativeInteger => Some(Integer),
            PositiveInteger => Some(NonNegativeInteger),
            Date => Some(AnyAtomicType),
            DateWithTimezone => Some(Date),
            DateTime => Some(AnyAtomicType),
            DateTimeWithTimezone => Some(DateTime),
            Duration => Some(AnyAtomicType),
            DayTimeDuration => Some(Duration),
            YearMonthDuration => Some(Duration),
            Base64 => Some(AnyAtomicType),
            QName => Some(AnyAtomicType),
        }
    }

    pub fn derives_from(&self, other: DataType) -> bool {
        if self == &other {
            return true;
        }
        match self.parent() {
            Some(parent_type) => parent_type.derives_from(other),
            None => false,
        }
    }

    /// Abstract types have no values of their own; they cannot be the
    /// target of a cast.
    pub fn is_abstract(&self) -> bool {
        matches!(
            self,
            DataType::AnyAtomicType | DataType::Numeric | DataType::Duration
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.derives_from(DataType::Numeric)
    }

    pub fn is_string_like(&self) -> bool {
        self.derives_from(DataType::String)
            || self.derives_from(DataType::UriReference)
            || *self == DataType::UntypedAtomic
    }
}
