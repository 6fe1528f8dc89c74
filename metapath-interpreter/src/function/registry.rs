use std::rc::Rc;

use ahash::{HashMap, HashMapExt};
use metapath_name::Name;

use crate::error;
use crate::library::static_function_descriptions;

use super::{StaticFunction, StaticFunctionDescription};

/// The functions available to the compiler, keyed by name and arity.
///
/// A registry is an owned value: the static context carries one, and
/// embedders can extend a copy of the built-in registry.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    by_name: HashMap<(Name, usize), Rc<StaticFunction>>,
}

impl FunctionRegistry {
    /// A registry without any functions.
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// A registry holding the built-in function library.
    pub fn builtin() -> error::Result<Self> {
        let mut registry = Self::new();
        for description in static_function_descriptions()? {
            registry.register(description);
        }
        Ok(registry)
    }

    /// Register a function. Each arity variant the description generates
    /// is registered; an existing function with the same name and arity is
    /// replaced.
    pub fn register(&mut self, description: StaticFunctionDescription) -> &mut Self {
        for function in description.functions() {
            let key = (function.name().clone(), function.arity());
            if self.by_name.contains_key(&key) {
                log::warn!(
                    "replacing function {}#{}",
                    function.name().to_full_name(),
                    function.arity()
                );
            }
            self.by_name.insert(key, Rc::new(function));
        }
        self
    }

    /// Look up a function by its exact name and arity.
    pub fn get(&self, name: &Name, arity: usize) -> Option<Rc<StaticFunction>> {
        self.by_name.get(&(name.clone(), arity)).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use metapath_name::FN_NAMESPACE;

    use crate::atomic::Atomic;
    use crate::context::DynamicContext;
    use crate::function::FunctionFlags;
    use crate::sequence::Sequence;

    fn one(_context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
        Ok(Atomic::from(1i64).into())
    }

    #[test]
    fn test_builtin_lookup() {
        let registry = FunctionRegistry::builtin().unwrap();
        let count = Name::new("count".to_string(), Some(FN_NAMESPACE.to_string()), None);
        assert!(registry.get(&count, 1).is_some());
        assert!(registry.get(&count, 2).is_none());
    }

    #[test]
    fn test_context_variants_registered() {
        let registry = FunctionRegistry::builtin().unwrap();
        let string = Name::new("string".to_string(), Some(FN_NAMESPACE.to_string()), None);
        assert!(registry.get(&string, 0).is_some());
        assert!(registry.get(&string, 1).is_some());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = FunctionRegistry::new();
        registry.register(
            StaticFunctionDescription::new(
                "Q{http://example.com}one() as integer",
                FunctionFlags::DETERMINISTIC,
                one,
            )
            .unwrap(),
        );
        registry.register(
            StaticFunctionDescription::new(
                "Q{http://example.com}one() as integer",
                FunctionFlags::DETERMINISTIC,
                one,
            )
            .unwrap(),
        );
        assert_eq!(registry.len(), 1);
    }
}
