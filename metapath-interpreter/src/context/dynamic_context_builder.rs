use std::rc::Rc;

use chrono::{DateTime, FixedOffset};
use metapath_name::Name;

use crate::atomic::utc;
use crate::node::Node;
use crate::sequence;

use super::dynamic_context::Environment;
use super::{Documents, DynamicContext, StaticContext, Variables};

/// A builder for constructing a [`DynamicContext`].
///
/// This needs to be supplied a [`StaticContext`] in order to construct it.
#[derive(Debug, Clone)]
pub struct DynamicContextBuilder {
    static_context: Rc<StaticContext>,
    variables: Variables,
    current_datetime: Option<DateTime<FixedOffset>>,
    implicit_timezone: Option<FixedOffset>,
    documents: Documents,
}

impl DynamicContextBuilder {
    /// Construct a new `DynamicContextBuilder` with the given `StaticContext`.
    pub fn new(static_context: impl Into<Rc<StaticContext>>) -> Self {
        Self {
            static_context: static_context.into(),
            variables: Variables::default(),
            current_datetime: None,
            implicit_timezone: None,
            documents: Documents::default(),
        }
    }

    /// Bind a variable.
    pub fn variable(&mut self, name: Name, value: sequence::Sequence) -> &mut Self {
        self.variables.insert(name, value);
        self
    }

    /// Bind several variables, in addition to those already bound.
    pub fn variables(
        &mut self,
        variables: impl IntoIterator<Item = (Name, sequence::Sequence)>,
    ) -> &mut Self {
        self.variables.extend(variables);
        self
    }

    /// Set the current datetime.
    ///
    /// Without this, the current datetime is taken when the context is
    /// built.
    pub fn current_datetime(&mut self, current_datetime: DateTime<FixedOffset>) -> &mut Self {
        self.current_datetime = Some(current_datetime);
        self
    }

    /// Set the timezone of dates and times that have none. Without this it
    /// is UTC.
    pub fn implicit_timezone(&mut self, implicit_timezone: FixedOffset) -> &mut Self {
        self.implicit_timezone = Some(implicit_timezone);
        self
    }

    /// Make documents available by URI.
    pub fn documents(&mut self, documents: impl IntoIterator<Item = (String, Node)>) -> &mut Self {
        self.documents.extend(documents);
        self
    }

    /// Build the `DynamicContext`.
    pub fn build(&self) -> DynamicContext<'static> {
        let implicit_timezone = self.implicit_timezone.unwrap_or_else(utc);
        let current_datetime = self
            .current_datetime
            .unwrap_or_else(|| chrono::Utc::now().with_timezone(&implicit_timezone));
        DynamicContext::new(
            self.static_context.clone(),
            Environment {
                current_datetime,
                implicit_timezone,
                documents: self.documents.clone(),
            },
            self.variables.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::context::StaticContextBuilder;

    #[test]
    fn test_defaults() {
        let static_context = StaticContextBuilder::default().build().unwrap();
        let context = DynamicContextBuilder::new(static_context).build();
        assert_eq!(context.implicit_timezone(), utc());
        assert!(context.document("http://example.com").is_none());
    }

    #[test]
    fn test_fixed_datetime() {
        let static_context = StaticContextBuilder::default().build().unwrap();
        let datetime = DateTime::parse_from_rfc3339("2024-02-29T12:00:00+02:00").unwrap();
        let context = DynamicContextBuilder::new(static_context)
            .current_datetime(datetime)
            .build();
        assert_eq!(context.current_datetime(), datetime);
    }
}
