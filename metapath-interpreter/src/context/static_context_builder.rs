use std::rc::Rc;

use iri_string::types::IriAbsoluteString;
use metapath_name::{Namespaces, FN_NAMESPACE, STATIC_NAMESPACES};

use crate::error;
use crate::function::FunctionRegistry;

use super::StaticContext;

/// A builder for a [`StaticContext`].
#[derive(Debug, Clone, Default)]
pub struct StaticContextBuilder {
    namespaces: Vec<(String, String)>,
    default_model_namespace: Option<String>,
    default_function_namespace: Option<String>,
    static_base_uri: Option<IriAbsoluteString>,
    use_wildcard_when_namespace_not_defaulted: bool,
    function_registry: Option<Rc<FunctionRegistry>>,
}

impl StaticContextBuilder {
    pub(super) fn from_static_context(static_context: &StaticContext) -> Self {
        let namespaces = &static_context.namespaces;
        Self {
            namespaces: namespaces
                .explicit_bindings()
                .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
                .collect(),
            default_model_namespace: namespaces.default_model_namespace().map(str::to_string),
            default_function_namespace: namespaces
                .default_function_namespace()
                .map(str::to_string),
            static_base_uri: static_context.static_base_uri.clone(),
            use_wildcard_when_namespace_not_defaulted: static_context
                .use_wildcard_when_namespace_not_defaulted,
            function_registry: Some(static_context.function_registry.clone()),
        }
    }

    /// Add namespace prefixes that expressions can use.
    ///
    /// This is an iterable of tuples where the first element is the prefix
    /// and the second element is the namespace URI. An empty prefix sets the
    /// default model namespace.
    pub fn namespaces<'a>(
        &mut self,
        namespaces: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> &mut Self {
        for (prefix, uri) in namespaces {
            if prefix.is_empty() {
                self.default_model_namespace = Some(uri.to_string());
            } else {
                self.namespaces.push((prefix.to_string(), uri.to_string()));
            }
        }
        self
    }

    /// Set the namespace of unprefixed assembly and field names.
    pub fn default_model_namespace(&mut self, uri: &str) -> &mut Self {
        self.default_model_namespace = Some(uri.to_string());
        self
    }

    /// Set the namespace of unprefixed function names. Without this it is
    /// the core function namespace.
    pub fn default_function_namespace(&mut self, uri: &str) -> &mut Self {
        self.default_function_namespace = Some(uri.to_string());
        self
    }

    /// Set the static base URI
    pub fn static_base_uri(&mut self, static_base_uri: Option<IriAbsoluteString>) -> &mut Self {
        self.static_base_uri = static_base_uri;
        self
    }

    pub fn use_wildcard_when_namespace_not_defaulted(&mut self, value: bool) -> &mut Self {
        self.use_wildcard_when_namespace_not_defaulted = value;
        self
    }

    /// Use these functions instead of the built-in library.
    pub fn function_registry(&mut self, function_registry: FunctionRegistry) -> &mut Self {
        self.function_registry = Some(Rc::new(function_registry));
        self
    }

    /// Build the static context.
    ///
    /// The well-known prefixes are always available. Rebinding one of them
    /// to another namespace, or binding another prefix to one of their
    /// namespaces, is `MPST0070`.
    pub fn build(&self) -> error::Result<StaticContext> {
        for (prefix, uri) in &self.namespaces {
            let reserved = STATIC_NAMESPACES
                .iter()
                .any(|(known_prefix, known_uri)| known_uri == uri && known_prefix != prefix);
            if reserved {
                return Err(error::Error::MPST0070);
            }
        }
        let mut namespaces = Namespaces::default();
        let pairs = self
            .namespaces
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
            .collect::<Vec<_>>();
        namespaces.add(&pairs)?;
        namespaces.set_default_model_namespace(self.default_model_namespace.clone());
        namespaces.set_default_function_namespace(Some(
            self.default_function_namespace
                .clone()
                .unwrap_or_else(|| FN_NAMESPACE.to_string()),
        ));
        let function_registry = match &self.function_registry {
            Some(function_registry) => function_registry.clone(),
            None => Rc::new(FunctionRegistry::builtin()?),
        };
        log::debug!(
            "built static context with {} namespace bindings",
            self.namespaces.len()
        );
        Ok(StaticContext {
            namespaces,
            static_base_uri: self.static_base_uri.clone(),
            use_wildcard_when_namespace_not_defaulted: self
                .use_wildcard_when_namespace_not_defaulted,
            function_registry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use metapath_name::{NameKind, MATH_NAMESPACE};

    #[test]
    fn test_default_behavior() {
        let static_context = StaticContextBuilder::default().build().unwrap();
        assert_eq!(static_context.default_model_namespace(), None);
        assert_eq!(static_context.default_function_namespace(), Some(FN_NAMESPACE));
        assert_eq!(
            static_context.namespaces().by_prefix("math"),
            Some(MATH_NAMESPACE)
        );
        assert!(!static_context.function_registry().is_empty());
    }

    #[test]
    fn test_empty_prefix_sets_default_model_namespace() {
        let static_context = StaticContextBuilder::default()
            .namespaces([("", "http://example.com/model"), ("ex", "http://example.com")])
            .build()
            .unwrap();
        assert_eq!(
            static_context.default_model_namespace(),
            Some("http://example.com/model")
        );
        let name = static_context
            .namespaces()
            .resolve(NameKind::Model, Some("ex"), "a")
            .unwrap();
        assert_eq!(name.namespace(), Some("http://example.com"));
    }

    #[test]
    fn test_rebinding_well_known_prefix() {
        let result = StaticContextBuilder::default()
            .namespaces([("fn", "http://example.com")])
            .build();
        assert_eq!(result.unwrap_err(), error::Error::MPST0070);
    }

    #[test]
    fn test_binding_reserved_namespace() {
        let result = StaticContextBuilder::default()
            .namespaces([("f", FN_NAMESPACE)])
            .build();
        assert_eq!(result.unwrap_err(), error::Error::MPST0070);
    }

    #[test]
    fn test_derive_does_not_change_original() {
        let original = StaticContextBuilder::default()
            .namespaces([("ex", "http://example.com")])
            .build()
            .unwrap();
        let derived = original
            .derive()
            .default_model_namespace("http://example.com/model")
            .build()
            .unwrap();
        assert_eq!(original.default_model_namespace(), None);
        assert_eq!(
            derived.default_model_namespace(),
            Some("http://example.com/model")
        );
        assert_eq!(
            derived.namespaces().by_prefix("ex"),
            Some("http://example.com")
        );
    }
}
