//! The compiled expression tree. One variant per language construct; the
//! tree is built once by the compiler and never changes afterwards.
mod display;
mod expr_core;

pub use expr_core::{
    ArithmeticOperator, Expr, KeySpecifier, NodeComparisonOperator, NodeTest, Quantifier, Step,
};
