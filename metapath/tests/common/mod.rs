// each test binary uses a different subset of these helpers
#![allow(dead_code)]

use std::rc::Rc;

use metapath::node::InMemoryDocument;
use metapath::{
    compile, error, DocumentBuilder, DynamicContextBuilder, Item, Sequence, StaticContext,
    StaticContextBuilder,
};

pub(crate) fn static_context() -> StaticContext {
    StaticContextBuilder::default()
        .build()
        .expect("default static context builds")
}

/// Compile and evaluate without a focus. Compile errors are reported
/// without their span.
pub(crate) fn run(s: &str) -> error::Result<Sequence> {
    run_with_focus(s, None)
}

pub(crate) fn run_with_focus(s: &str, focus: Option<Item>) -> error::Result<Sequence> {
    let static_context = static_context();
    let expression = compile(s, &static_context).map_err(|e| e.error)?;
    let context = DynamicContextBuilder::new(static_context).build();
    expression.evaluate(focus, &context)
}

/// The display representation of each item, joined by spaces.
pub(crate) fn show(s: &str) -> String {
    match run(s) {
        Ok(sequence) => sequence.display_representation(),
        Err(e) => e.code(),
    }
}

/// The string values of a result, for checks that do not care about types.
pub(crate) fn strings(sequence: &Sequence) -> Vec<String> {
    sequence
        .iter()
        .map(|item| item.string_value().expect("item has a string value"))
        .collect()
}

/// A small catalog:
///
/// ```text
/// catalog @id=c1
///   title "Catalog"
///   group @id=g1
///     control @id=ac-1 @class=policy
///       title "Access Policy"
///     control @id=ac-2
///       title "Account Management"
///   group @id=g2
///     control @id=au-1 @class=policy
///       title "Audit Policy"
/// ```
pub(crate) fn catalog() -> Rc<InMemoryDocument> {
    let mut builder = DocumentBuilder::new();
    builder.document_uri("http://example.com/catalog.json");
    let catalog = builder.root_assembly("catalog".into());
    builder.flag(catalog, "id".into(), "c1");
    builder.field(catalog, "title".into(), "Catalog");
    let g1 = builder.assembly(catalog, "group".into());
    builder.flag(g1, "id".into(), "g1");
    let ac1 = builder.assembly(g1, "control".into());
    builder.flag(ac1, "id".into(), "ac-1");
    builder.flag(ac1, "class".into(), "policy");
    builder.field(ac1, "title".into(), "Access Policy");
    let ac2 = builder.assembly(g1, "control".into());
    builder.flag(ac2, "id".into(), "ac-2");
    builder.field(ac2, "title".into(), "Account Management");
    let g2 = builder.assembly(catalog, "group".into());
    builder.flag(g2, "id".into(), "g2");
    let au1 = builder.assembly(g2, "control".into());
    builder.flag(au1, "id".into(), "au-1");
    builder.flag(au1, "class".into(), "policy");
    builder.field(au1, "title".into(), "Audit Policy");
    builder.build()
}

pub(crate) fn run_catalog(s: &str) -> error::Result<Sequence> {
    let document = catalog();
    run_with_focus(s, Some(document.root().into()))
}
