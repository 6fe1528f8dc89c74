use chrono::{DateTime, FixedOffset};
use iri_string::types::IriAbsoluteStr;
use metapath::{
    compile, error, Atomic, DynamicContext, DynamicContextBuilder, Error, FunctionFlags,
    FunctionRegistry, Name, Sequence, StaticContextBuilder, StaticFunctionDescription,
};

mod common;

use common::{catalog, static_context, strings};

fn evaluate(s: &str, context: &DynamicContext) -> error::Result<Sequence> {
    let expression = compile(s, context.static_context()).map_err(|e| e.error)?;
    expression.evaluate(None, context)
}

#[test]
fn test_variables() {
    let context = DynamicContextBuilder::new(static_context())
        .variable(Name::from("x"), Atomic::from(2i64).into())
        .variable(Name::from("names"), vec![Atomic::from("a"), Atomic::from("b")].into())
        .build();
    assert_eq!(strings(&evaluate("$x * 3", &context).unwrap()), ["6"]);
    assert_eq!(
        strings(&evaluate("string-join($names, '+')", &context).unwrap()),
        ["a+b"]
    );
    assert_eq!(
        strings(&evaluate("let $x := 10 return $x", &context).unwrap()),
        ["10"]
    );
    assert_eq!(strings(&evaluate("$x", &context).unwrap()), ["2"]);
}

#[test]
fn test_current_date_time() {
    let now = DateTime::parse_from_rfc3339("2024-02-29T12:30:00+02:00").unwrap();
    let context = DynamicContextBuilder::new(static_context())
        .current_datetime(now)
        .implicit_timezone(FixedOffset::east_opt(2 * 3600).unwrap())
        .build();
    assert_eq!(
        strings(&evaluate("year-from-date-time(current-date-time())", &context).unwrap()),
        ["2024"]
    );
    assert_eq!(
        strings(&evaluate("hours-from-date-time(current-date-time())", &context).unwrap()),
        ["12"]
    );
    assert_eq!(
        strings(&evaluate("day-from-date(current-date())", &context).unwrap()),
        ["29"]
    );
    assert_eq!(
        strings(&evaluate("current-date-time() eq current-date-time()", &context).unwrap()),
        ["true"]
    );
    assert_eq!(
        strings(&evaluate("implicit-timezone()", &context).unwrap()),
        ["PT2H"]
    );
}

#[test]
fn test_implicit_timezone_in_comparison() {
    let context = DynamicContextBuilder::new(static_context())
        .implicit_timezone(FixedOffset::east_opt(3600).unwrap())
        .build();
    let result = evaluate(
        "meta:date-time('2024-01-01T10:00:00') eq meta:date-time('2024-01-01T09:00:00Z')",
        &context,
    )
    .unwrap();
    assert_eq!(strings(&result), ["true"]);
}

#[test]
fn test_documents() {
    let document = catalog();
    let context = DynamicContextBuilder::new(static_context())
        .documents([("catalog.json".to_string(), document.root())])
        .build();
    assert_eq!(
        strings(&evaluate("doc('catalog.json')/catalog/@id", &context).unwrap()),
        ["c1"]
    );
    assert_eq!(
        strings(&evaluate("doc-available('catalog.json')", &context).unwrap()),
        ["true"]
    );
    assert_eq!(
        strings(&evaluate("doc-available('missing.json')", &context).unwrap()),
        ["false"]
    );
    assert_eq!(
        evaluate("doc('missing.json')", &context),
        Err(Error::FODC0002)
    );
}

#[test]
fn test_static_base_uri() {
    let base = IriAbsoluteStr::new("http://example.com/base/").unwrap().to_owned();
    let static_context = StaticContextBuilder::default()
        .static_base_uri(Some(base))
        .build()
        .unwrap();
    let context = DynamicContextBuilder::new(static_context).build();
    assert_eq!(
        strings(&evaluate("static-base-uri()", &context).unwrap()),
        ["http://example.com/base/"]
    );
    assert_eq!(
        strings(&evaluate("resolve-uri('doc.json')", &context).unwrap()),
        ["http://example.com/base/doc.json"]
    );
}

#[test]
fn test_default_model_namespace() {
    let mut builder = metapath::DocumentBuilder::new();
    let root = builder.root_assembly(Name::new(
        "catalog".to_string(),
        Some("http://example.com/model".to_string()),
        None,
    ));
    builder.flag(root, "id".into(), "c1");
    let document = builder.build();

    let plain = static_context();
    let expression = compile("/catalog/@id", &plain).unwrap();
    let context = DynamicContextBuilder::new(plain).build();
    let result = expression
        .evaluate(Some(document.root().into()), &context)
        .unwrap();
    assert!(result.is_empty());

    let defaulted = StaticContextBuilder::default()
        .default_model_namespace("http://example.com/model")
        .build()
        .unwrap();
    let expression = compile("/catalog/@id", &defaulted).unwrap();
    let context = DynamicContextBuilder::new(defaulted).build();
    let result = expression
        .evaluate(Some(document.root().into()), &context)
        .unwrap();
    assert_eq!(strings(&result), ["c1"]);

    let prefixed = StaticContextBuilder::default()
        .namespaces([("m", "http://example.com/model")])
        .build()
        .unwrap();
    let expression = compile("/m:catalog/@id", &prefixed).unwrap();
    let context = DynamicContextBuilder::new(prefixed).build();
    let result = expression
        .evaluate(Some(document.root().into()), &context)
        .unwrap();
    assert_eq!(strings(&result), ["c1"]);

    let wildcard = StaticContextBuilder::default()
        .use_wildcard_when_namespace_not_defaulted(true)
        .build()
        .unwrap();
    let expression = compile("/catalog/@id", &wildcard).unwrap();
    let context = DynamicContextBuilder::new(wildcard).build();
    let result = expression
        .evaluate(Some(document.root().into()), &context)
        .unwrap();
    assert_eq!(strings(&result), ["c1"]);
}

fn shout(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    let value = arguments[0].atomized_one()?.string_value();
    Ok(format!("{}!", value.to_uppercase()).into())
}

#[test]
fn test_registered_function() {
    let mut registry = FunctionRegistry::builtin().unwrap();
    registry.register(
        StaticFunctionDescription::new(
            "shout($value as string) as string",
            FunctionFlags::DETERMINISTIC,
            shout,
        )
        .unwrap(),
    );
    let static_context = StaticContextBuilder::default()
        .function_registry(registry)
        .build()
        .unwrap();
    let expression = compile("shout('hi') || shout('x')", &static_context).unwrap();
    let context = DynamicContextBuilder::new(static_context).build();
    assert_eq!(
        expression.evaluate_as_string(None, &context).unwrap(),
        "HI!X!"
    );

    let err = compile("shout('hi')", &common::static_context()).unwrap_err();
    assert_eq!(err.error, Error::MPST0017);
}

#[test]
fn test_registered_function_checks_arguments() {
    let mut registry = FunctionRegistry::new();
    registry.register(
        StaticFunctionDescription::new(
            "shout($value as string) as string",
            FunctionFlags::DETERMINISTIC,
            shout,
        )
        .unwrap(),
    );
    let static_context = StaticContextBuilder::default()
        .function_registry(registry)
        .build()
        .unwrap();
    let expression = compile("shout((1, 2))", &static_context).unwrap();
    let context = DynamicContextBuilder::new(static_context).build();
    assert_eq!(expression.evaluate(None, &context), Err(Error::MPTY0004));
}

fn mumble(_context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(Sequence::Empty)
}

#[test]
fn test_registered_function_checks_result_cardinality() {
    let mut registry = FunctionRegistry::new();
    registry.register(
        StaticFunctionDescription::new(
            "mumble($value as string) as string",
            FunctionFlags::DETERMINISTIC,
            mumble,
        )
        .unwrap(),
    );
    registry.register(
        StaticFunctionDescription::new(
            "mumble($value as string, $loud as boolean) as string?",
            FunctionFlags::DETERMINISTIC,
            mumble,
        )
        .unwrap(),
    );
    let static_context = StaticContextBuilder::default()
        .function_registry(registry)
        .build()
        .unwrap();
    let context = DynamicContextBuilder::new(static_context.clone()).build();
    let expression = compile("mumble('hi')", &static_context).unwrap();
    assert_eq!(expression.evaluate(None, &context), Err(Error::MPTY0004));
    let expression = compile("mumble('hi', 1 = 1)", &static_context).unwrap();
    assert_eq!(expression.evaluate(None, &context), Ok(Sequence::Empty));
}

#[test]
fn test_conversions() {
    let static_context = static_context();
    let context = DynamicContextBuilder::new(static_context.clone()).build();
    let compiled = |s: &str| compile(s, &static_context).unwrap();

    assert!(compiled("(1, 2)[2]").evaluate_as_boolean(None, &context).unwrap());
    assert!(!compiled("()").evaluate_as_boolean(None, &context).unwrap());
    assert_eq!(compiled("()").evaluate_as_string(None, &context).unwrap(), "");
    assert_eq!(
        compiled("('a', 'b')").evaluate_as_string(None, &context).unwrap(),
        "a"
    );
    assert_eq!(
        compiled("'2.50'").evaluate_as_decimal(None, &context).unwrap(),
        Some(rust_decimal_macros::dec!(2.5))
    );
    assert_eq!(compiled("()").evaluate_as_decimal(None, &context).unwrap(), None);
    assert_eq!(
        compiled("'x'").evaluate_as_decimal(None, &context),
        Err(Error::FOCA0002)
    );
    assert_eq!(compiled("()").evaluate_as_item(None, &context).unwrap(), None);
    assert_eq!(
        compiled("(1, 2)").evaluate_as_item(None, &context),
        Err(Error::MPTY0004)
    );
    assert_eq!(
        compiled("1 + 1").evaluate_as_atomic(None, &context).unwrap(),
        Atomic::from(2i64)
    );
}

#[test]
fn test_compiled_expression_is_reusable() -> anyhow::Result<()> {
    let document = catalog();
    let static_context = static_context();
    let expression = compile("count(child::*)", &static_context)?;
    let context = DynamicContextBuilder::new(static_context).build();
    let root = document.root();
    let catalog = root.children().remove(0);
    let on_root = expression.evaluate(Some(root.into()), &context)?;
    let on_catalog = expression.evaluate(Some(catalog.into()), &context)?;
    assert_eq!(strings(&on_root), ["1"]);
    assert_eq!(strings(&on_catalog), ["3"]);
    assert_eq!(expression.source(), "count(child::*)");
    Ok(())
}
