/// Function items (maps and arrays) and the static functions that calls
/// resolve to.
mod array;
mod function_core;
mod map;
mod registry;
mod signature;
mod static_function;

pub use array::Array;
pub use function_core::Function;
pub use map::Map;
pub use registry::FunctionRegistry;
pub use signature::Signature;
pub use static_function::{
    FunctionFlags, FunctionHandler, FunctionKind, StaticFunction, StaticFunctionDescription,
};
