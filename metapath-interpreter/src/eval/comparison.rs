use crate::atomic::AtomicCompareValue;
use crate::context::{DynamicContext, Focus};
use crate::error;
use crate::expr::{Expr, NodeComparisonOperator};
use crate::sequence::{Item, Sequence};

use super::evaluate;

/// `eq`, `ne`, `lt` and friends: both operands atomize to at most one
/// value, and an empty operand gives the empty sequence.
pub(super) fn value_comparison(
    operator: AtomicCompareValue,
    left: &Expr,
    right: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let left = evaluate(left, context, focus)?.atomized_option()?;
    let right = evaluate(right, context, focus)?.atomized_option()?;
    match (left, right) {
        (Some(left), Some(right)) => Ok(left
            .compare(right, operator, context.implicit_timezone())?
            .into()),
        _ => Ok(Sequence::Empty),
    }
}

/// `=`, `!=`, `<` and friends: true if any pair of atomized values
/// compares true.
pub(super) fn general_comparison(
    operator: AtomicCompareValue,
    left: &Expr,
    right: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let left = evaluate(left, context, focus)?.atomized()?;
    let right = evaluate(right, context, focus)?.atomized()?;
    let offset = context.implicit_timezone();
    for a in &left {
        for b in &right {
            if a.clone().general_compare(b.clone(), operator, offset)? {
                return Ok(true.into());
            }
        }
    }
    Ok(false.into())
}

pub(super) fn node_comparison(
    operator: NodeComparisonOperator,
    left: &Expr,
    right: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let left = evaluate(left, context, focus)?.option()?;
    let right = evaluate(right, context, focus)?.option()?;
    let (left, right) = match (left, right) {
        (Some(Item::Node(left)), Some(Item::Node(right))) => (left, right),
        (None, _) | (_, None) => return Ok(Sequence::Empty),
        _ => return Err(error::Error::MPTY0004),
    };
    let result = match operator {
        NodeComparisonOperator::Is => left == right,
        NodeComparisonOperator::Precedes => left < right,
        NodeComparisonOperator::Follows => left > right,
    };
    Ok(result.into())
}
