use std::fmt;

use metapath_interpreter::atomic::Atomic;
use metapath_interpreter::context::{DynamicContext, Focus, StaticContext};
use metapath_interpreter::error;
use metapath_interpreter::expr::Expr;
use metapath_interpreter::sequence::{Item, Sequence};
use metapath_schema_type::DataType;
use rust_decimal::Decimal;

/// Compile an expression against a static context.
///
/// Compilation either produces a complete expression or fails with a single
/// static error carrying the span of the offending construct.
pub fn compile(
    source: &str,
    static_context: &StaticContext,
) -> error::SpannedResult<CompiledExpression> {
    let expr = metapath_interpreter::compile(source, static_context)?;
    Ok(CompiledExpression {
        source: source.to_string(),
        expr,
    })
}

/// A compiled expression, ready to be evaluated.
///
/// The expression does not hold on to the static context it was compiled
/// with, and evaluating it never changes it.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    source: String,
    expr: Expr,
}

impl CompiledExpression {
    /// The source text the expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the expression, with `focus` as the context item.
    pub fn evaluate(&self, focus: Option<Item>, context: &DynamicContext) -> error::Result<Sequence> {
        let focus = focus.map(Focus::from);
        self.expr.evaluate(context, focus.as_ref())
    }

    /// The effective boolean value of the result.
    pub fn evaluate_as_boolean(
        &self,
        focus: Option<Item>,
        context: &DynamicContext,
    ) -> error::Result<bool> {
        self.evaluate(focus, context)?.effective_boolean_value()
    }

    /// The string value of the first item of the result, or `""` when the
    /// result is empty.
    pub fn evaluate_as_string(
        &self,
        focus: Option<Item>,
        context: &DynamicContext,
    ) -> error::Result<String> {
        match self.evaluate(focus, context)?.get(0) {
            Some(item) => item.string_value(),
            None => Ok(String::new()),
        }
    }

    /// The first item of the result as a decimal, or `None` when the result
    /// is empty.
    ///
    /// Numeric values are taken as they are; anything else is cast to
    /// decimal.
    pub fn evaluate_as_decimal(
        &self,
        focus: Option<Item>,
        context: &DynamicContext,
    ) -> error::Result<Option<Decimal>> {
        let sequence = self.evaluate(focus, context)?;
        let Some(item) = sequence.get(0) else {
            return Ok(None);
        };
        let atomic = Sequence::from(item.clone()).atomized_one()?;
        let atomic = if atomic.is_numeric() {
            atomic
        } else {
            atomic.cast_to(DataType::Decimal)?
        };
        atomic.to_decimal().map(Some)
    }

    /// The result as at most one item. More than one item is a type error.
    pub fn evaluate_as_item(
        &self,
        focus: Option<Item>,
        context: &DynamicContext,
    ) -> error::Result<Option<Item>> {
        self.evaluate(focus, context)?.option()
    }

    /// The result as exactly one atomic value.
    pub fn evaluate_as_atomic(
        &self,
        focus: Option<Item>,
        context: &DynamicContext,
    ) -> error::Result<Atomic> {
        self.evaluate(focus, context)?.atomized_one()
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
