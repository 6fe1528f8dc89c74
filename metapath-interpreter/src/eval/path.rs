use metapath_ast::ast::Axis;

use crate::atomic::Atomic;
use crate::context::{DynamicContext, Focus};
use crate::error;
use crate::expr::{Expr, NodeTest, Step};
use crate::node::{document_order, Node};
use crate::sequence::{Item, Sequence};
use crate::types::kind_test_matches;

use super::{context_item, evaluate};

/// The root of the tree that contains the context node.
pub(super) fn root(focus: Option<&Focus>) -> error::Result<Sequence> {
    let node = match context_item(focus)? {
        Item::Node(node) => node.clone(),
        _ => return Err(error::Error::MPTY0020),
    };
    let root = node.ancestors().pop().unwrap_or(node);
    Ok(root.into())
}

/// `base/step`. Node results are sorted into document order without
/// duplicates. Atomic results are returned as computed.
pub(super) fn path(
    base: &Expr,
    step: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let base = evaluate(base, context, focus)?;
    let size = base.len();
    let mut items = Vec::new();
    for (i, item) in base.iter().enumerate() {
        if !matches!(item, Item::Node(_)) {
            return Err(error::Error::MPTY0019);
        }
        let focus = Focus::new(item.clone(), i + 1, size);
        items.extend(evaluate(step, context, Some(&focus))?.into_items());
    }
    let node_count = items
        .iter()
        .filter(|item| matches!(item, Item::Node(_)))
        .count();
    if node_count == items.len() {
        let nodes = items
            .into_iter()
            .filter_map(|item| match item {
                Item::Node(node) => Some(node),
                _ => None,
            })
            .collect();
        Ok(document_order(nodes).into())
    } else if node_count == 0 {
        Ok(Sequence::new(items))
    } else {
        Err(error::Error::MPTY0004)
    }
}

/// An axis step from the context node.
pub(super) fn step(
    step: &Step,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let node = match context_item(focus)? {
        Item::Node(node) => node,
        _ => return Err(error::Error::MPTY0020),
    };
    let mut items: Vec<Item> = node
        .axis(step.axis)
        .into_iter()
        .filter(|candidate| node_test_matches(&step.node_test, step.axis, candidate))
        .map(Item::Node)
        .collect();
    // predicates see positions in axis order
    for predicate in &step.predicates {
        items = apply_predicate(items, predicate, context)?;
    }
    let nodes = items
        .into_iter()
        .filter_map(|item| match item {
            Item::Node(node) => Some(node),
            _ => None,
        })
        .collect();
    Ok(document_order(nodes).into())
}

fn node_test_matches(node_test: &NodeTest, axis: Axis, node: &Node) -> bool {
    match node_test {
        NodeTest::Kind(kind_test) => kind_test_matches(kind_test, node),
        NodeTest::Name(name) => node.is_principal(axis) && node.name().as_ref() == Some(name),
        NodeTest::AnyName => node.is_principal(axis),
        NodeTest::Namespace(namespace) => {
            node.is_principal(axis)
                && node
                    .name()
                    .is_some_and(|name| name.namespace().unwrap_or("") == namespace)
        }
        NodeTest::LocalName(local_name) => {
            node.is_principal(axis)
                && node
                    .name()
                    .is_some_and(|name| name.local_name() == local_name)
        }
    }
}

/// Filter items by a predicate. A numeric singleton selects by position;
/// anything else is taken by its effective boolean value.
pub(super) fn apply_predicate(
    items: Vec<Item>,
    predicate: &Expr,
    context: &DynamicContext,
) -> error::Result<Vec<Item>> {
    let size = items.len();
    let mut result = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        let focus = Focus::new(item, i + 1, size);
        let value = evaluate(predicate, context, Some(&focus))?;
        let keep = match &value {
            Sequence::One(Item::Atomic(atomic)) if atomic.is_numeric() => {
                numeric_position_matches(atomic, i + 1)?
            }
            _ => value.effective_boolean_value()?,
        };
        if keep {
            result.push(focus.item().clone());
        }
    }
    Ok(result)
}

fn numeric_position_matches(atomic: &Atomic, position: usize) -> error::Result<bool> {
    Ok(atomic.to_decimal()? == rust_decimal::Decimal::from(position))
}

pub(super) fn union(
    left: &Expr,
    right: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let mut nodes = node_operand(left, context, focus)?;
    nodes.extend(node_operand(right, context, focus)?);
    Ok(document_order(nodes).into())
}

/// `intersect` when `keep_common` is set, `except` otherwise.
pub(super) fn intersect_except(
    left: &Expr,
    right: &Expr,
    keep_common: bool,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let left = node_operand(left, context, focus)?;
    let right: ahash::HashSet<Node> = node_operand(right, context, focus)?.into_iter().collect();
    let nodes = left
        .into_iter()
        .filter(|node| right.contains(node) == keep_common)
        .collect();
    Ok(document_order(nodes).into())
}

fn node_operand(
    expr: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Vec<Node>> {
    evaluate(expr, context, focus)?.nodes()
}
