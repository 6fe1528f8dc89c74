//! The evaluator: a tree walk over the compiled expression.
mod binding;
mod comparison;
mod function_item;
mod path;

use ibig::IBig;

use crate::atomic::{self, Atomic};
use crate::context::{DynamicContext, Focus};
use crate::error;
use crate::expr::{ArithmeticOperator, Expr};
use crate::sequence::{Item, Sequence};

impl Expr {
    /// Evaluate the expression against an optional focus.
    pub fn evaluate(&self, context: &DynamicContext, focus: Option<&Focus>) -> error::Result<Sequence> {
        evaluate(self, context, focus)
    }
}

pub(crate) fn evaluate(
    expr: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    match expr {
        Expr::Literal(atomic) => Ok(atomic.clone().into()),
        Expr::Empty => Ok(Sequence::Empty),
        Expr::Sequence(exprs) => {
            let mut items = Vec::new();
            for expr in exprs {
                items.extend(evaluate(expr, context, focus)?.into_items());
            }
            Ok(Sequence::new(items))
        }
        Expr::ContextItem => Ok(context_item(focus)?.clone().into()),
        Expr::VariableRef(name) => context
            .variable(name)
            .cloned()
            .ok_or(error::Error::MPST0008),
        Expr::Root => path::root(focus),
        Expr::Path { base, step } => path::path(base, step, context, focus),
        Expr::Step(step) => path::step(step, context, focus),
        Expr::Filter { base, predicate } => {
            let items = evaluate(base, context, focus)?.into_items();
            Ok(path::apply_predicate(items, predicate, context)?.into())
        }
        Expr::And(left, right) => {
            let result = evaluate(left, context, focus)?.effective_boolean_value()?
                && evaluate(right, context, focus)?.effective_boolean_value()?;
            Ok(result.into())
        }
        Expr::Or(left, right) => {
            let result = evaluate(left, context, focus)?.effective_boolean_value()?
                || evaluate(right, context, focus)?.effective_boolean_value()?;
            Ok(result.into())
        }
        Expr::ValueComparison {
            operator,
            left,
            right,
        } => comparison::value_comparison(*operator, left, right, context, focus),
        Expr::GeneralComparison {
            operator,
            left,
            right,
        } => comparison::general_comparison(*operator, left, right, context, focus),
        Expr::NodeComparison {
            operator,
            left,
            right,
        } => comparison::node_comparison(*operator, left, right, context, focus),
        Expr::StringConcat(left, right) => {
            let left = string_operand(left, context, focus)?;
            let right = string_operand(right, context, focus)?;
            Ok(Atomic::from(left + &right).into())
        }
        Expr::Range(left, right) => range(left, right, context, focus),
        Expr::Arithmetic {
            operator,
            left,
            right,
        } => arithmetic(*operator, left, right, context, focus),
        Expr::Negate(operand) => unary(operand, atomic::op_unary_minus, context, focus),
        Expr::UnaryPlus(operand) => unary(operand, atomic::op_unary_plus, context, focus),
        Expr::Union(left, right) => path::union(left, right, context, focus),
        Expr::Intersect(left, right) => path::intersect_except(left, right, true, context, focus),
        Expr::Except(left, right) => path::intersect_except(left, right, false, context, focus),
        Expr::SimpleMap(left, right) => {
            let left = evaluate(left, context, focus)?;
            let size = left.len();
            let mut items = Vec::new();
            for (i, item) in left.iter().enumerate() {
                let focus = Focus::new(item.clone(), i + 1, size);
                items.extend(evaluate(right, context, Some(&focus))?.into_items());
            }
            Ok(Sequence::new(items))
        }
        Expr::For {
            var_name,
            binding,
            return_expr,
        } => binding::for_expr(var_name, binding, return_expr, context, focus),
        Expr::Let {
            var_name,
            binding,
            return_expr,
        } => binding::let_expr(var_name, binding, return_expr, context, focus),
        Expr::Quantified {
            quantifier,
            bindings,
            satisfies,
        } => binding::quantified(*quantifier, bindings, satisfies, context, focus),
        Expr::If {
            condition,
            then,
            else_,
        } => {
            if evaluate(condition, context, focus)?.effective_boolean_value()? {
                evaluate(then, context, focus)
            } else {
                evaluate(else_, context, focus)
            }
        }
        Expr::FunctionCall {
            function,
            arguments,
        } => {
            let arguments = arguments
                .iter()
                .map(|argument| evaluate(argument, context, focus))
                .collect::<error::Result<Vec<_>>>()?;
            function.invoke(context, focus, arguments)
        }
        Expr::DynamicCall { base, arguments } => {
            function_item::dynamic_call(base, arguments, context, focus)
        }
        Expr::Lookup { base, key } => {
            let base = evaluate(base, context, focus)?;
            function_item::lookup(&base, key, context, focus)
        }
        Expr::UnaryLookup(key) => {
            let base: Sequence = context_item(focus)?.clone().into();
            function_item::lookup(&base, key, context, focus)
        }
        Expr::MapConstructor(entries) => function_item::map_constructor(entries, context, focus),
        Expr::SquareArray(members) => {
            let members = members
                .iter()
                .map(|member| evaluate(member, context, focus))
                .collect::<error::Result<Vec<_>>>()?;
            Ok(crate::function::Array::new(members).into())
        }
        Expr::CurlyArray(expr) => {
            let members = evaluate(expr, context, focus)?
                .into_items()
                .into_iter()
                .map(Sequence::from)
                .collect();
            Ok(crate::function::Array::new(members).into())
        }
        Expr::InstanceOf {
            expr,
            sequence_type,
        } => {
            let sequence = evaluate(expr, context, focus)?;
            Ok(sequence_type.matches(&sequence).into())
        }
        Expr::Treat {
            expr,
            sequence_type,
        } => {
            let sequence = evaluate(expr, context, focus)?;
            if sequence_type.matches(&sequence) {
                Ok(sequence)
            } else {
                Err(error::Error::MPDY0050)
            }
        }
        Expr::Castable {
            expr,
            data_type,
            optional,
        } => {
            let atomized = evaluate(expr, context, focus)?.atomized()?;
            let castable = match atomized.as_slice() {
                [] => *optional,
                [atomic] => atomic.castable_to(*data_type)?,
                _ => false,
            };
            Ok(castable.into())
        }
        Expr::Cast {
            expr,
            data_type,
            optional,
        } => match evaluate(expr, context, focus)?.atomized_option()? {
            Some(atomic) => Ok(atomic.cast_to(*data_type)?.into()),
            None if *optional => Ok(Sequence::Empty),
            None => Err(error::Error::MPTY0004),
        },
    }
}

pub(crate) fn context_item(focus: Option<&Focus>) -> error::Result<&Item> {
    focus.map(|focus| focus.item()).ok_or(error::Error::MPDY0002)
}

fn string_operand(
    expr: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<String> {
    Ok(evaluate(expr, context, focus)?
        .atomized_option()?
        .map(|atomic| atomic.string_value())
        .unwrap_or_default())
}

/// `a to b`: the ascending integers from `a` to `b` inclusive, empty when
/// either side is empty or `a` is greater than `b`.
fn range(
    left: &Expr,
    right: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let left = evaluate(left, context, focus)?.atomized_option()?;
    let right = evaluate(right, context, focus)?.atomized_option()?;
    let (left, right) = match (left, right) {
        (Some(left), Some(right)) => (range_bound(left)?, range_bound(right)?),
        _ => return Ok(Sequence::Empty),
    };
    let mut items = Vec::new();
    let mut current = left;
    while current <= right {
        items.push(Item::from(current.clone()));
        current += IBig::from(1u8);
    }
    Ok(Sequence::new(items))
}

fn range_bound(atomic: Atomic) -> error::Result<IBig> {
    match atomic {
        Atomic::Integer(_, i) => Ok(i.as_ref().clone()),
        Atomic::Untyped(_) => atomic.cast_to(metapath_schema_type::DataType::Integer)?.to_integer(),
        _ => Err(error::Error::MPTY0004),
    }
}

fn arithmetic(
    operator: ArithmeticOperator,
    left: &Expr,
    right: &Expr,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    let left = evaluate(left, context, focus)?.atomized_option()?;
    let right = evaluate(right, context, focus)?.atomized_option()?;
    let (left, right) = match (left, right) {
        (Some(left), Some(right)) => (left, right),
        _ => return Ok(Sequence::Empty),
    };
    let result = match operator {
        ArithmeticOperator::Add => atomic::op_add(left, right)?,
        ArithmeticOperator::Sub => atomic::op_subtract(left, right, context.implicit_timezone())?,
        ArithmeticOperator::Mul => atomic::op_multiply(left, right)?,
        ArithmeticOperator::Div => atomic::op_div(left, right)?,
        ArithmeticOperator::IntDiv => atomic::op_idiv(left, right)?,
        ArithmeticOperator::Mod => atomic::op_mod(left, right)?,
    };
    Ok(result.into())
}

fn unary(
    operand: &Expr,
    op: fn(Atomic) -> error::Result<Atomic>,
    context: &DynamicContext,
    focus: Option<&Focus>,
) -> error::Result<Sequence> {
    match evaluate(operand, context, focus)?.atomized_option()? {
        Some(atomic) => Ok(op(atomic)?.into()),
        None => Ok(Sequence::Empty),
    }
}
