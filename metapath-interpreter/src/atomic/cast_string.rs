use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use iri_string::types::{UriReferenceStr, UriStr};
use regex::Regex;

use crate::error;

use super::types::StringType;

/// Collapse runs of whitespace into a single space and trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check (and normalize) the lexical form of a string subtype.
pub(crate) fn validate_string(string_type: StringType, s: &str) -> error::Result<String> {
    let s = if string_type.collapses_whitespace() {
        collapse_whitespace(s)
    } else {
        s.to_string()
    };
    let valid = match string_type {
        StringType::String
        | StringType::Token
        | StringType::MarkupLine
        | StringType::MarkupMultiline => true,
        StringType::NCName => ncname_regex().is_match(&s),
        StringType::Uuid => uuid_regex().is_match(&s),
        StringType::EmailAddress => email_regex().is_match(&s),
        StringType::Hostname => !s.is_empty() && !s.contains(' '),
        StringType::IpV4Address => s.parse::<Ipv4Addr>().is_ok(),
        StringType::IpV6Address => s.parse::<Ipv6Addr>().is_ok(),
        StringType::UriReference => UriReferenceStr::new(&s).is_ok(),
        StringType::Uri => UriStr::new(&s).is_ok(),
    };
    if valid {
        Ok(s)
    } else {
        Err(error::Error::FORG0001)
    }
}

fn ncname_regex() -> &'static Regex {
    static NCNAME: OnceLock<Regex> = OnceLock::new();
    NCNAME.get_or_init(|| {
        Regex::new(r"^[\p{L}_][\p{L}\p{N}_.\-\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}]*$")
            .expect("valid regex")
    })
}

fn uuid_regex() -> &'static Regex {
    static UUID: OnceLock<Regex> = OnceLock::new();
    UUID.get_or_init(|| {
        Regex::new(
            r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[45][0-9A-Fa-f]{3}-[89ABab][0-9A-Fa-f]{3}-[0-9A-Fa-f]{12}$",
        )
        .expect("valid regex")
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        assert_eq!(collapse_whitespace("  a \n b\t c "), "a b c");
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            validate_string(StringType::Token, " a  b ").unwrap(),
            "a b"
        );
        assert!(validate_string(StringType::NCName, "foo-bar").is_ok());
        assert!(validate_string(StringType::NCName, "foo:bar").is_err());
        assert!(validate_string(StringType::NCName, "1foo").is_err());
        assert!(
            validate_string(StringType::Uuid, "0b4c2d8e-4f0e-4c1c-9d3a-2f6a0b1c2d3e").is_ok()
        );
        assert!(validate_string(StringType::Uuid, "not-a-uuid").is_err());
        assert!(validate_string(StringType::IpV4Address, "192.168.0.1").is_ok());
        assert!(validate_string(StringType::IpV4Address, "192.168.0.256").is_err());
        assert!(validate_string(StringType::IpV6Address, "::1").is_ok());
        assert!(validate_string(StringType::EmailAddress, "a@example.com").is_ok());
        assert!(validate_string(StringType::Uri, "http://example.com/a").is_ok());
        assert!(validate_string(StringType::Uri, "relative/path").is_err());
        assert!(validate_string(StringType::UriReference, "relative/path").is_ok());
    }
}
