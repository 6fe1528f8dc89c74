use std::rc::Rc;

use ahash::HashMap;
use chrono::{DateTime, FixedOffset};
use metapath_name::Name;

use crate::node::Node;
use crate::sequence;

use super::StaticContext;

pub type Variables = HashMap<Name, sequence::Sequence>;

/// Documents available to `doc()`, by URI.
pub type Documents = HashMap<String, Node>;

#[derive(Debug)]
pub(super) struct Environment {
    pub(super) current_datetime: DateTime<FixedOffset>,
    pub(super) implicit_timezone: FixedOffset,
    pub(super) documents: Documents,
}

/// The context of one evaluation.
///
/// Variable bindings are scoped: a sub-context sees the bindings of its
/// parent, but bindings made in the sub-context are not visible to the
/// parent.
#[derive(Debug)]
pub struct DynamicContext<'a> {
    static_context: Rc<StaticContext>,
    environment: Rc<Environment>,
    variables: Variables,
    parent: Option<&'a DynamicContext<'a>>,
}

impl<'a> DynamicContext<'a> {
    pub(super) fn new(
        static_context: Rc<StaticContext>,
        environment: Environment,
        variables: Variables,
    ) -> Self {
        Self {
            static_context,
            environment: Rc::new(environment),
            variables,
            parent: None,
        }
    }

    /// A child context that reads through to this one.
    pub fn sub_context(&self) -> DynamicContext<'_> {
        DynamicContext {
            static_context: self.static_context.clone(),
            environment: self.environment.clone(),
            variables: Variables::default(),
            parent: Some(self),
        }
    }

    /// Bind a variable in this context, shadowing any binding of the same
    /// name in a parent.
    pub fn bind(&mut self, name: Name, value: sequence::Sequence) {
        self.variables.insert(name, value);
    }

    /// Look up a variable, first locally, then through the parents.
    pub fn variable(&self, name: &Name) -> Option<&sequence::Sequence> {
        match self.variables.get(name) {
            Some(value) => Some(value),
            None => self.parent.and_then(|parent| parent.variable(name)),
        }
    }

    pub fn static_context(&self) -> &StaticContext {
        &self.static_context
    }

    pub fn current_datetime(&self) -> DateTime<FixedOffset> {
        self.environment.current_datetime
    }

    pub fn implicit_timezone(&self) -> FixedOffset {
        self.environment.implicit_timezone
    }

    pub fn document(&self, uri: &str) -> Option<&Node> {
        self.environment.documents.get(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::atomic::Atomic;
    use crate::context::{DynamicContextBuilder, StaticContextBuilder};

    fn int(i: i64) -> sequence::Sequence {
        Atomic::from(i).into()
    }

    #[test]
    fn test_sub_context_scoping() {
        let static_context = StaticContextBuilder::default().build().unwrap();
        let x = Name::from("x");
        let y = Name::from("y");
        let context = DynamicContextBuilder::new(static_context)
            .variable(x.clone(), Atomic::from(1i64).into())
            .build();
        {
            let mut sub = context.sub_context();
            sub.bind(y.clone(), Atomic::from(2i64).into());
            sub.bind(x.clone(), Atomic::from(3i64).into());
            assert_eq!(sub.variable(&y), Some(&int(2)));
            assert_eq!(sub.variable(&x), Some(&int(3)));
        }
        assert_eq!(context.variable(&y), None);
        assert_eq!(context.variable(&x), Some(&int(1)));
    }
}
