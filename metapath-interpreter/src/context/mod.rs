/// The static context is used during compile time. The dynamic context
/// holds what an evaluation needs at runtime: variables, the current
/// date and time and the available documents.
mod dynamic_context;
mod dynamic_context_builder;
mod focus;
mod static_context;
mod static_context_builder;

pub use dynamic_context::{Documents, DynamicContext, Variables};
pub use dynamic_context_builder::DynamicContextBuilder;
pub use focus::Focus;
pub use static_context::StaticContext;
pub use static_context_builder::StaticContextBuilder;
