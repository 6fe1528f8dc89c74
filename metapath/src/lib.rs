//! Metapath is an expression language for querying Metaschema-based
//! documents. This crate is the embedder-facing entry point.
//!
//! An expression is compiled once against a [`StaticContext`] and can then
//! be evaluated any number of times, each time against an optional focus
//! item and a [`DynamicContext`].
//!
//! ```
//! use metapath::{compile, DynamicContextBuilder, StaticContextBuilder};
//!
//! let static_context = StaticContextBuilder::default().build().unwrap();
//! let expression = compile("sum(1 to 4)", &static_context).unwrap();
//! let context = DynamicContextBuilder::new(static_context).build();
//! assert_eq!(expression.evaluate_as_string(None, &context).unwrap(), "10");
//! ```
mod compiled;

pub use compiled::{compile, CompiledExpression};

pub use metapath_interpreter::atomic::{self, Atomic};
pub use metapath_interpreter::context::{
    self, DynamicContext, DynamicContextBuilder, Focus, StaticContext, StaticContextBuilder,
};
pub use metapath_interpreter::error::{self, Error, ErrorFamily, SpannedError};
pub use metapath_interpreter::function::{
    self, FunctionFlags, FunctionRegistry, StaticFunctionDescription,
};
pub use metapath_interpreter::node::{self, DocumentBuilder, Node, NodeItem, NodeKind};
pub use metapath_interpreter::sequence::{self, Item, Sequence};
pub use metapath_interpreter::{expr, span, types};
pub use metapath_name::{
    Name, Namespaces, ARRAY_NAMESPACE, EXTENDED_NAMESPACE, FN_NAMESPACE, MAP_NAMESPACE,
    MATH_NAMESPACE, METAPATH_NAMESPACE,
};
pub use metapath_schema_type::DataType;
