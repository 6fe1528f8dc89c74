use std::fmt;

use crate::namespaces::NamespaceLookup;

/// A qualified name: a local name with an optional namespace.
///
/// The prefix is retained for display purposes only; two names are equal
/// when their local name and namespace are equal.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Name {
    name: String,
    prefix: Option<String>,
    namespace: Option<String>,
}

// a custom hasher that ignores the prefix
impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.namespace.hash(state);
    }
}

// and partial eq that ignores the prefix
impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.namespace == other.namespace
    }
}

impl Name {
    pub fn new(name: String, namespace: Option<String>, prefix: Option<String>) -> Self {
        Name {
            name,
            namespace,
            prefix,
        }
    }

    pub fn prefixed(prefix: &str, name: &str, namespaces: impl NamespaceLookup) -> Option<Self> {
        let namespace = namespaces.by_prefix(prefix)?;
        Some(Name {
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
            prefix: Some(prefix.to_string()),
        })
    }

    pub fn unprefixed(name: &str) -> Self {
        Name {
            name: name.to_string(),
            namespace: None,
            prefix: None,
        }
    }

    pub fn uri_qualified(uri: &str, name: &str) -> Self {
        let namespace = if uri.is_empty() {
            None
        } else {
            Some(uri.to_string())
        };
        Name {
            name: name.to_string(),
            namespace,
            prefix: None,
        }
    }

    pub fn with_default_namespace(self, uri: Option<&str>) -> Self {
        if let Some(uri) = uri {
            if self.namespace.is_none() {
                return Name {
                    name: self.name,
                    namespace: Some(uri.to_string()),
                    prefix: None,
                };
            }
        }
        self
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// The name as written, `prefix:local` if there is a non-empty prefix.
    pub fn to_full_name(&self) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, self.name),
            _ => self.name.clone(),
        }
    }

    /// The name in `Q{namespace}local` notation, which does not depend on
    /// prefixes.
    pub fn to_uri_qualified(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("Q{{{}}}{}", namespace, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_full_name())
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name::unprefixed(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::Namespaces;

    #[test]
    fn test_prefix_ignored_for_equality() {
        let a = Name::new(
            "a".to_string(),
            Some("http://example.com".to_string()),
            Some("x".to_string()),
        );
        let b = Name::new(
            "a".to_string(),
            Some("http://example.com".to_string()),
            Some("y".to_string()),
        );
        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_prefixed_lookup() {
        let namespaces = Namespaces::default();
        let name = Name::prefixed("fn", "count", &namespaces).unwrap();
        assert_eq!(name.namespace(), Some(crate::FN_NAMESPACE));
        assert_eq!(name.to_full_name(), "fn:count");
        assert!(Name::prefixed("nope", "count", &namespaces).is_none());
    }

    #[test]
    fn test_uri_qualified_display() {
        let name = Name::uri_qualified("http://example.com", "a");
        assert_eq!(name.to_uri_qualified(), "Q{http://example.com}a");
        assert_eq!(Name::unprefixed("b").to_uri_qualified(), "b");
        assert_eq!(Name::uri_qualified("", "c").namespace(), None);
    }

    #[test]
    fn test_with_default_namespace() {
        let name = Name::unprefixed("a").with_default_namespace(Some("http://example.com"));
        assert_eq!(name.namespace(), Some("http://example.com"));
        let name = Name::uri_qualified("http://other.com", "a")
            .with_default_namespace(Some("http://example.com"));
        assert_eq!(name.namespace(), Some("http://other.com"));
    }
}
