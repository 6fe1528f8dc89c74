use std::rc::Rc;

use crate::atomic::{offset_to_duration, Atomic, DateTimeType, DateType, NaiveDateTimeWithOffset, NaiveDateWithOffset};
use crate::context::DynamicContext;
use crate::error;
use crate::function::{FunctionKind, StaticFunctionDescription};
use crate::node::{document_order, Node, PathFormat};
use crate::sequence::{Item, Sequence};

use super::{contextual, pure, string_arg, uri};

fn data(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].atomized()?.into())
}

fn string(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    match arguments[0].get(0) {
        Some(item) => Ok(item.string_value()?.into()),
        None => Ok("".into()),
    }
}

fn optional_node(argument: &Sequence) -> error::Result<Option<Node>> {
    argument.clone().option()?.map(|item| item.to_node()).transpose()
}

fn base_uri(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(optional_node(&arguments[0])?
        .and_then(|node| node.base_uri())
        .map(|value| uri(&value))
        .into())
}

fn document_uri(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(optional_node(&arguments[0])?
        .and_then(|node| node.document_uri())
        .map(|value| uri(&value))
        .into())
}

fn static_base_uri(context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(context
        .static_context()
        .static_base_uri()
        .map(|base| uri(base.as_str()))
        .into())
}

fn position(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].clone())
}

fn last(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].clone())
}

fn current_date_time(context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    let now = NaiveDateTimeWithOffset::from_date_time_stamp(context.current_datetime());
    Ok(Atomic::DateTime(DateTimeType::DateTimeWithTimezone, Rc::new(now)).into())
}

fn current_date(context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    let now = context.current_datetime();
    let today = NaiveDateWithOffset::new(now.date_naive(), Some(*now.offset()));
    Ok(Atomic::Date(DateType::DateWithTimezone, Rc::new(today)).into())
}

fn implicit_timezone(context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(Atomic::from(offset_to_duration(context.implicit_timezone())).into())
}

fn path(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(optional_node(&arguments[0])?
        .map(|node| Atomic::from(node.path(PathFormat::Metapath)))
        .into())
}

fn root(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(optional_node(&arguments[0])?
        .map(|node| Item::Node(node.ancestors().pop().unwrap_or(node)))
        .into())
}

fn name(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let name = optional_node(&arguments[0])?.and_then(|node| node.name());
    Ok(name.map(|name| name.to_full_name()).unwrap_or_default().into())
}

fn local_name(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let name = optional_node(&arguments[0])?.and_then(|node| node.name());
    Ok(name
        .map(|name| name.local_name().to_string())
        .unwrap_or_default()
        .into())
}

fn namespace_uri(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let name = optional_node(&arguments[0])?.and_then(|node| node.name());
    let namespace = name
        .as_ref()
        .and_then(|name| name.namespace())
        .unwrap_or("");
    Ok(uri(namespace).into())
}

fn node_name(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(optional_node(&arguments[0])?
        .and_then(|node| node.name())
        .map(Atomic::from)
        .into())
}

fn has_children(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let has_children = optional_node(&arguments[0])?
        .map(|node| !node.children().is_empty())
        .unwrap_or(false);
    Ok(has_children.into())
}

/// The nodes that have no descendant in the set.
fn innermost(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let nodes = document_order(arguments[0].nodes()?);
    let result = nodes
        .iter()
        .filter(|node| {
            !nodes
                .iter()
                .any(|other| other != *node && other.is_descendant_or_self_of(node))
        })
        .cloned()
        .collect::<Vec<_>>();
    Ok(result.into())
}

/// The nodes that have no ancestor in the set.
fn outermost(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let nodes = document_order(arguments[0].nodes()?);
    let result = nodes
        .iter()
        .filter(|node| {
            !nodes
                .iter()
                .any(|other| other != *node && node.is_descendant_or_self_of(other))
        })
        .cloned()
        .collect::<Vec<_>>();
    Ok(result.into())
}

fn doc(context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    if arguments[0].is_empty() {
        return Ok(Sequence::Empty);
    }
    let uri = string_arg(&arguments[0])?;
    context
        .document(&uri)
        .cloned()
        .map(Sequence::from)
        .ok_or(error::Error::FODC0002)
}

fn doc_available(context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let uri = string_arg(&arguments[0])?;
    Ok(context.document(&uri).is_some().into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("fn:data($arg as item()*) as any-atomic-type*", data)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:string($arg as item()?) as string", string)?.with_kind(FunctionKind::ItemFirst),
        pure("fn:base-uri($arg as node()?) as uri?", base_uri)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:document-uri($arg as node()?) as uri?", document_uri)?
            .with_kind(FunctionKind::ItemFirst),
        contextual("fn:static-base-uri() as uri?", static_base_uri)?,
        pure("fn:position() as integer", position)?.with_kind(FunctionKind::Position),
        pure("fn:last() as integer", last)?.with_kind(FunctionKind::Size),
        contextual("fn:current-date-time() as date-time-with-timezone", current_date_time)?,
        contextual("fn:current-date() as date-with-timezone", current_date)?,
        contextual("fn:implicit-timezone() as day-time-duration", implicit_timezone)?,
        pure("fn:path($arg as node()?) as string?", path)?.with_kind(FunctionKind::ItemFirst),
        pure("fn:root($arg as node()?) as node()?", root)?.with_kind(FunctionKind::ItemFirst),
        pure("fn:name($arg as node()?) as string", name)?.with_kind(FunctionKind::ItemFirst),
        pure("fn:local-name($arg as node()?) as string", local_name)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:namespace-uri($arg as node()?) as uri", namespace_uri)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:node-name($arg as node()?) as qname?", node_name)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:has-children($arg as node()?) as boolean", has_children)?
            .with_kind(FunctionKind::ItemFirst),
        pure("fn:innermost($nodes as node()*) as node()*", innermost)?,
        pure("fn:outermost($nodes as node()*) as node()*", outermost)?,
        contextual("fn:doc($uri as string?) as document-node()?", doc)?,
        contextual("fn:doc-available($uri as string?) as boolean", doc_available)?,
    ])
}
