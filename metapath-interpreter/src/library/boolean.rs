use crate::context::DynamicContext;
use crate::error;
use crate::function::StaticFunctionDescription;
use crate::sequence::Sequence;

use super::pure;

fn true_(_context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(true.into())
}

fn false_(_context: &DynamicContext, _arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(false.into())
}

fn not(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok((!arguments[0].effective_boolean_value()?).into())
}

fn boolean(_context: &DynamicContext, arguments: &[Sequence]) -> error::Result<Sequence> {
    Ok(arguments[0].effective_boolean_value()?.into())
}

pub(super) fn static_function_descriptions() -> error::Result<Vec<StaticFunctionDescription>> {
    Ok(vec![
        pure("fn:true() as boolean", true_)?,
        pure("fn:false() as boolean", false_)?,
        pure("fn:not($arg as item()*) as boolean", not)?,
        pure("fn:boolean($arg as item()*) as boolean", boolean)?,
    ])
}
