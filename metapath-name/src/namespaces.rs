use ahash::{HashMap, HashMapExt};

use crate::Name;

pub const FN_NAMESPACE: &str = "http://csrc.nist.gov/ns/metaschema/metapath-functions";
pub const MATH_NAMESPACE: &str = "http://csrc.nist.gov/ns/metaschema/metapath-functions/math";
pub const ARRAY_NAMESPACE: &str = "http://csrc.nist.gov/ns/metaschema/metapath-functions/array";
pub const MAP_NAMESPACE: &str = "http://csrc.nist.gov/ns/metaschema/metapath-functions/map";
pub const EXTENDED_NAMESPACE: &str =
    "http://csrc.nist.gov/ns/metaschema/metapath-functions/extended";
/// The namespace of the intrinsic data types.
pub const METAPATH_NAMESPACE: &str = "http://csrc.nist.gov/ns/metaschema/metapath";

/// Prefixes that are always bound, unless an explicit binding shadows them
/// with the same URI.
pub const STATIC_NAMESPACES: [(&str, &str); 6] = [
    ("fn", FN_NAMESPACE),
    ("math", MATH_NAMESPACE),
    ("array", ARRAY_NAMESPACE),
    ("map", MAP_NAMESPACE),
    ("mp", EXTENDED_NAMESPACE),
    ("meta", METAPATH_NAMESPACE),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The prefix has no namespace binding.
    UnknownPrefix(String),
    /// A well-known prefix was bound to a different namespace.
    ReservedPrefix(String),
}

/// The kind of name being resolved. Each kind has its own fallback when a
/// name has no prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Flag,
    Variable,
    Model,
    Function,
    DataType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    namespaces: HashMap<String, String>,
    default_model_namespace: Option<String>,
    default_function_namespace: Option<String>,
}

impl Namespaces {
    pub fn new(
        namespaces: HashMap<String, String>,
        default_model_namespace: Option<String>,
        default_function_namespace: Option<String>,
    ) -> Self {
        Self {
            namespaces,
            default_model_namespace,
            default_function_namespace,
        }
    }

    /// Add explicit bindings. An empty prefix sets the default model
    /// namespace.
    ///
    /// Binding a well-known prefix to another namespace is an error; the
    /// bindings before the offending one are kept.
    pub fn add(&mut self, namespace_pairs: &[(&str, &str)]) -> Result<(), Error> {
        for (prefix, uri) in namespace_pairs {
            if prefix.is_empty() {
                self.default_model_namespace = Some(uri.to_string());
                continue;
            }
            if let Some((_, known)) = STATIC_NAMESPACES.iter().find(|(p, _)| p == prefix) {
                if known != uri {
                    return Err(Error::ReservedPrefix(prefix.to_string()));
                }
            }
            self.namespaces.insert(prefix.to_string(), uri.to_string());
        }
        Ok(())
    }

    /// Explicit bindings first, then the well-known bindings.
    pub fn by_prefix(&self, prefix: &str) -> Option<&str> {
        if let Some(uri) = self.namespaces.get(prefix) {
            return Some(uri.as_str());
        }
        STATIC_NAMESPACES
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, uri)| *uri)
    }

    pub fn explicit_bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    pub fn default_model_namespace(&self) -> Option<&str> {
        self.default_model_namespace.as_deref()
    }

    pub fn default_function_namespace(&self) -> Option<&str> {
        self.default_function_namespace.as_deref()
    }

    pub fn set_default_model_namespace(&mut self, uri: Option<String>) {
        self.default_model_namespace = uri;
    }

    pub fn set_default_function_namespace(&mut self, uri: Option<String>) {
        self.default_function_namespace = uri;
    }

    fn default_namespace_for(&self, kind: NameKind) -> Option<&str> {
        match kind {
            NameKind::Flag | NameKind::Variable => None,
            NameKind::Model => self.default_model_namespace(),
            NameKind::Function => self.default_function_namespace(),
            NameKind::DataType => Some(METAPATH_NAMESPACE),
        }
    }

    /// Resolve a lexical name of the given kind.
    ///
    /// A non-empty prefix must be bound. Without a prefix the name falls
    /// into the default namespace for its kind, if any.
    pub fn resolve(
        &self,
        kind: NameKind,
        prefix: Option<&str>,
        local_name: &str,
    ) -> Result<Name, Error> {
        match prefix {
            Some(prefix) if !prefix.is_empty() => Name::prefixed(prefix, local_name, self)
                .ok_or_else(|| Error::UnknownPrefix(prefix.to_string())),
            _ => Ok(Name::unprefixed(local_name)
                .with_default_namespace(self.default_namespace_for(kind))),
        }
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::new(HashMap::new(), None, Some(FN_NAMESPACE.to_string()))
    }
}

pub trait NamespaceLookup {
    fn by_prefix(&self, prefix: &str) -> Option<&str>;
}

impl NamespaceLookup for Namespaces {
    fn by_prefix(&self, prefix: &str) -> Option<&str> {
        Namespaces::by_prefix(self, prefix)
    }
}

impl<T: NamespaceLookup> NamespaceLookup for &T {
    fn by_prefix(&self, prefix: &str) -> Option<&str> {
        (**self).by_prefix(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_kind() {
        let mut namespaces = Namespaces::default();
        namespaces
            .add(&[("", "http://example.com/model")])
            .unwrap();

        let flag = namespaces.resolve(NameKind::Flag, None, "id").unwrap();
        assert_eq!(flag.namespace(), None);

        let model = namespaces.resolve(NameKind::Model, None, "catalog").unwrap();
        assert_eq!(model.namespace(), Some("http://example.com/model"));

        let function = namespaces.resolve(NameKind::Function, None, "count").unwrap();
        assert_eq!(function.namespace(), Some(FN_NAMESPACE));

        let data_type = namespaces.resolve(NameKind::DataType, Some(""), "string").unwrap();
        assert_eq!(data_type.namespace(), Some(METAPATH_NAMESPACE));
    }

    #[test]
    fn test_explicit_binding_wins() {
        let mut namespaces = Namespaces::default();
        namespaces.add(&[("ex", "http://example.com")]).unwrap();
        let name = namespaces
            .resolve(NameKind::Variable, Some("ex"), "v")
            .unwrap();
        assert_eq!(name.namespace(), Some("http://example.com"));
        assert_eq!(name.prefix(), Some("ex"));
    }

    #[test]
    fn test_unknown_prefix() {
        let namespaces = Namespaces::default();
        assert_eq!(
            namespaces.resolve(NameKind::Model, Some("nope"), "a"),
            Err(Error::UnknownPrefix("nope".to_string()))
        );
    }

    #[test]
    fn test_rebinding_well_known_prefix() {
        let mut namespaces = Namespaces::default();
        assert_eq!(
            namespaces.add(&[("fn", "http://example.com")]),
            Err(Error::ReservedPrefix("fn".to_string()))
        );
        // the same binding again is harmless
        assert_eq!(namespaces.add(&[("fn", FN_NAMESPACE)]), Ok(()));
    }
}
