use std::rc::Rc;

use iri_string::types::IriAbsoluteString;
use metapath_name::Namespaces;

use crate::function::FunctionRegistry;

use super::StaticContextBuilder;

/// The environment an expression is compiled in.
///
/// A static context is immutable once built and can be shared by any
/// number of compiled expressions. Use [`StaticContext::derive`] to make a
/// variant of an existing context.
#[derive(Debug, Clone)]
pub struct StaticContext {
    pub(super) namespaces: Namespaces,
    pub(super) static_base_uri: Option<IriAbsoluteString>,
    pub(super) use_wildcard_when_namespace_not_defaulted: bool,
    pub(super) function_registry: Rc<FunctionRegistry>,
}

impl StaticContext {
    /// Start building a static context.
    pub fn builder() -> StaticContextBuilder {
        StaticContextBuilder::default()
    }

    /// A builder seeded with the settings of this context.
    pub fn derive(&self) -> StaticContextBuilder {
        StaticContextBuilder::from_static_context(self)
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    pub fn default_model_namespace(&self) -> Option<&str> {
        self.namespaces.default_model_namespace()
    }

    pub fn default_function_namespace(&self) -> Option<&str> {
        self.namespaces.default_function_namespace()
    }

    pub fn static_base_uri(&self) -> Option<&IriAbsoluteString> {
        self.static_base_uri.as_ref()
    }

    /// Whether an unprefixed model name matches in any namespace when no
    /// default model namespace is set.
    pub fn use_wildcard_when_namespace_not_defaulted(&self) -> bool {
        self.use_wildcard_when_namespace_not_defaulted
    }

    pub fn function_registry(&self) -> &FunctionRegistry {
        &self.function_registry
    }
}
