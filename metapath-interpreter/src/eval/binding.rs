use metapath_name::Name;

use crate::context::{DynamicContext, Focus};
use crate::error;
use crate::expr::{Expr, Quantifier};
use crate::sequence::Sequence;

use super::evaluate;

pub(super) fn for_expr(
    var_name: &Name,
    binding: &Expr,
    return_expr: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let binding = evaluate(binding, context, focus)?;
    let mut items = Vec::new();
    for item in binding.iter() {
        let mut scope = context.sub_context();
        scope.bind(var_name.clone(), item.clone().into());
        items.extend(evaluate(return_expr, &scope, focus)?.into_items());
    }
    Ok(Sequence::new(items))
}

pub(super) fn let_expr(
    var_name: &Name,
    binding: &Expr,
    return_expr: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let value = evaluate(binding, context, focus)?;
    let mut scope = context.sub_context();
    scope.bind(var_name.clone(), value);
    evaluate(return_expr, &scope, focus)
}

/// `some` and `every`. Each binding is evaluated in the scope of the ones
/// before it, and iteration stops as soon as the outcome is known.
pub(super) fn quantified(
    quantifier: Quantifier,
    bindings: &[(Name, Expr)],
    satisfies: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let found = search(quantifier, bindings, satisfies, context, focus)?;
    let result = match quantifier {
        Quantifier::Some => found,
        Quantifier::Every => !found,
    };
    Ok(result.into())
}

/// Look for a combination of bindings that decides the quantifier: one
/// that satisfies for `some`, one that fails for `every`.
fn search(
    quantifier: Quantifier,
    bindings: &[(Name, Expr)],
    satisfies: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<bool> {
    let ((name, binding), rest) = match bindings.split_first() {
        Some(first) => first,
        None => {
            let satisfied = evaluate(satisfies, context, focus)?.effective_boolean_value()?;
            return Ok(match quantifier {
                Quantifier::Some => satisfied,
                Quantifier::Every => !satisfied,
            });
        }
    };
    let values = evaluate(binding, context, focus)?;
    for item in values.iter() {
        let mut scope = context.sub_context();
        scope.bind(name.clone(), item.clone().into());
        if search(quantifier, rest, satisfies, &scope, focus)? {
            return Ok(true);
        }
    }
    Ok(false)
}
