use metapath::{
    compile, Atomic, DynamicContextBuilder, Error, ErrorFamily, Item, Sequence,
};
use rust_decimal_macros::dec;

mod common;

use common::{run, run_with_focus, show, static_context};

#[test]
fn test_context_item_returns_focus() {
    let focus: Item = Atomic::from("focus").into();
    let result = run_with_focus(".", Some(focus.clone())).unwrap();
    assert_eq!(result, Sequence::from(focus));
}

#[test]
fn test_context_item_compiles_without_parser() {
    let expression = compile(" . ", &static_context()).unwrap();
    assert_eq!(expression.to_string(), "(context-item)");
}

#[test]
fn test_context_item_without_focus() {
    assert_eq!(run("."), Err(Error::MPDY0002));
}

#[test]
fn test_integer_addition_is_decimal() {
    let static_context = static_context();
    let expression = compile("1 + 2", &static_context).unwrap();
    let context = DynamicContextBuilder::new(static_context).build();
    assert_eq!(
        expression.evaluate_as_decimal(None, &context).unwrap(),
        Some(dec!(3))
    );
    assert_eq!(show("(1 + 2) instance of decimal"), "true()");
    assert_eq!(show("(1 + 2) instance of integer"), "true()");
}

#[test]
fn test_starts_with_empty() {
    assert_eq!(show("starts-with('abc', '')"), "true()");
    assert_eq!(show("starts-with('', '')"), "true()");
    assert_eq!(show("starts-with('', 'x')"), "false()");
}

#[test]
fn test_vacuous_quantifiers() {
    assert_eq!(show("every $x in () satisfies false()"), "true()");
    assert_eq!(show("some $x in () satisfies true()"), "false()");
}

#[test]
fn test_quantifiers() {
    assert_eq!(show("every $x in (1, 2, 3) satisfies $x gt 0"), "true()");
    assert_eq!(show("some $x in (1, 2, 3) satisfies $x gt 2"), "true()");
    assert_eq!(show("every $x in (1, 2, 3) satisfies $x gt 1"), "false()");
    assert_eq!(show("some $x in (1, 2, 3) satisfies $x gt 3"), "false()");
}

#[test]
fn test_quantifier_short_circuits() {
    // the division by zero is never reached
    assert_eq!(
        show("some $x in (1, 0) satisfies 1 div $x eq 1"),
        "true()"
    );
    assert_eq!(
        show("every $x in (0, 1) satisfies $x ne 0 and 1 div $x eq 1"),
        "false()"
    );
}

#[test]
fn test_quantifier_over_several_bindings() {
    assert_eq!(
        show("some $x in (1, 2), $y in (3, 4) satisfies $x + $y eq 6"),
        "true()"
    );
    assert_eq!(
        show("every $x in (1, 2), $y in ($x, 3) satisfies $y ge $x"),
        "true()"
    );
}

#[test]
fn test_range() {
    assert_eq!(show("1 to 5"), "(1, 2, 3, 4, 5)");
    assert_eq!(show("5 to 1"), "()");
    assert_eq!(show("3 to 3"), "3");
    assert_eq!(show("() to 3"), "()");
}

#[test]
fn test_reverse() {
    assert_eq!(show("reverse((1, 2, 3))"), "(3, 2, 1)");
    assert_eq!(show("reverse(())"), "()");
}

#[test]
fn test_unknown_function_is_static_error() {
    let err = compile("unknown-function(1)", &static_context()).unwrap_err();
    assert_eq!(err.error, Error::MPST0017);
    assert_eq!(err.error.family(), ErrorFamily::Static);
    assert!(err.span.is_some());
}

#[test]
fn test_wrong_arity_is_static_error() {
    let err = compile("starts-with('a')", &static_context()).unwrap_err();
    assert_eq!(err.error, Error::MPST0017);
}

#[test]
fn test_malformed_syntax() {
    let err = compile("1 +", &static_context()).unwrap_err();
    assert_eq!(err.error, Error::MPST0003);
    let err = compile("(1, 2", &static_context()).unwrap_err();
    assert_eq!(err.error, Error::MPST0003);
}

#[test]
fn test_step_on_non_node_focus() {
    let focus: Item = Atomic::from(1i64).into();
    assert_eq!(
        run_with_focus("child::*", Some(focus.clone())),
        Err(Error::MPTY0020)
    );
    assert_eq!(run_with_focus("title", Some(focus)), Err(Error::MPTY0020));
}

#[test]
fn test_step_without_focus() {
    assert_eq!(run("title"), Err(Error::MPDY0002));
}

#[test]
fn test_printing_is_stable() {
    let source = "for $x in 1 to 3 return $x * 2";
    let first = compile(source, &static_context()).unwrap().to_string();
    let second = compile(source, &static_context()).unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn test_print_arithmetic() {
    let expression = compile("1 + 2", &static_context()).unwrap();
    insta::assert_snapshot!(expression.to_string(), @"(add (literal 1) (literal 2))");
}
