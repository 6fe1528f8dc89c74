//! The Metapath expression engine: compile an expression once against a
//! static context, then evaluate it as often as needed against a focus and
//! a dynamic context.
pub mod atomic;
pub mod compiler;
pub mod context;
pub mod error;
mod eval;
pub mod expr;
pub mod function;
mod library;
pub mod node;
pub mod sequence;
pub mod span;
pub mod types;

pub use compiler::{compile, compile_ast};
pub use metapath_name::{Name, Namespaces};
