mod ast_core;
mod types;

pub use ast_core::*;
pub use types::*;
