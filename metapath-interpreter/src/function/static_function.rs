use std::fmt::{Debug, Formatter};

use metapath_name::{Name, NameKind, Namespaces};

use crate::atomic::Atomic;
use crate::context::{DynamicContext, Focus};
use crate::error;
use crate::sequence;
use crate::types::{resolve_name, SequenceType};

use super::Signature;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Copy)]
pub enum FunctionKind {
    // generate a function with one less arity that takes the
    // context item as the first argument
    ItemFirst,
    // generate a function with one less arity that takes the context
    // item as the last argument
    ItemLast,
    // this function takes the context position as the implicit only
    // argument
    Position,
    // this function takes the context size as the implicit only argument
    Size,
}

/// How a function depends on its environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionFlags {
    /// Repeated calls with the same arguments give the same result.
    pub deterministic: bool,
    /// The function consults the dynamic context.
    pub context_dependent: bool,
    /// The function consults the focus.
    pub focus_dependent: bool,
}

impl FunctionFlags {
    pub const DETERMINISTIC: FunctionFlags = FunctionFlags {
        deterministic: true,
        context_dependent: false,
        focus_dependent: false,
    };

    pub const CONTEXT_DEPENDENT: FunctionFlags = FunctionFlags {
        deterministic: true,
        context_dependent: true,
        focus_dependent: false,
    };

    pub const FOCUS_DEPENDENT: FunctionFlags = FunctionFlags {
        deterministic: true,
        context_dependent: true,
        focus_dependent: true,
    };
}

impl Default for FunctionFlags {
    fn default() -> Self {
        FunctionFlags::DETERMINISTIC
    }
}

/// The handler a static function dispatches to. It receives the argument
/// sequences after conversion to the parameter types, with any implicit
/// context argument filled in.
pub type FunctionHandler =
    fn(context: &DynamicContext, arguments: &[sequence::Sequence]) -> error::Result<sequence::Sequence>;

/// A function declared by its signature string and handler, ready to be
/// registered.
///
/// ```
/// use metapath_interpreter::error;
/// use metapath_interpreter::function::{FunctionFlags, StaticFunctionDescription};
/// use metapath_interpreter::sequence::Sequence;
///
/// fn answer(
///     _context: &metapath_interpreter::context::DynamicContext,
///     _arguments: &[Sequence],
/// ) -> error::Result<Sequence> {
///     Ok(metapath_interpreter::atomic::Atomic::from(42i64).into())
/// }
///
/// let description = StaticFunctionDescription::new(
///     "Q{http://example.com}answer() as integer",
///     FunctionFlags::DETERMINISTIC,
///     answer,
/// )
/// .unwrap();
/// assert_eq!(description.name().local_name(), "answer");
/// ```
#[derive(Debug, Clone)]
pub struct StaticFunctionDescription {
    name: Name,
    signature: Signature,
    flags: FunctionFlags,
    function_kind: Option<FunctionKind>,
    handler: FunctionHandler,
}

impl StaticFunctionDescription {
    /// Declare a function from a signature such as
    /// `fn:substring($source as string?, $start as decimal) as string`.
    ///
    /// Names in the signature resolve against the well-known namespaces.
    /// Unprefixed function names fall into the core function namespace.
    pub fn new(
        signature: &str,
        flags: FunctionFlags,
        handler: FunctionHandler,
    ) -> error::Result<Self> {
        let namespaces = Namespaces::default();
        let signature = metapath_ast::parse_signature(signature)
            .map_err(|e| error::SpannedError::from(e).error)?;
        let name = resolve_name(&namespaces, &signature.name.value, NameKind::Function)?;
        let signature = Signature::from_ast(&signature, &namespaces).map_err(|e| e.error)?;
        Ok(Self {
            name,
            signature,
            flags,
            function_kind: None,
            handler,
        })
    }

    /// Also generate the variants that take an implicit argument from the
    /// focus.
    pub fn with_kind(mut self, function_kind: FunctionKind) -> Self {
        self.function_kind = Some(function_kind);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn functions(&self) -> Vec<StaticFunction> {
        if let Some(function_kind) = &self.function_kind {
            self.signature
                .alternative_signatures(*function_kind)
                .into_iter()
                .map(|(signature, function_kind)| self.function(signature, function_kind))
                .collect()
        } else {
            vec![self.function(self.signature.clone(), None)]
        }
    }

    fn function(&self, signature: Signature, function_kind: Option<FunctionKind>) -> StaticFunction {
        let context_parameter = match function_kind {
            Some(FunctionKind::ItemFirst) => self.signature.parameter_types().first().cloned(),
            Some(FunctionKind::ItemLast) => self.signature.parameter_types().last().cloned(),
            _ => None,
        };
        let flags = if function_kind.is_some() {
            FunctionFlags::FOCUS_DEPENDENT
        } else {
            self.flags
        };
        StaticFunction {
            name: self.name.clone(),
            arity: signature.arity(),
            signature,
            context_parameter,
            flags,
            function_kind,
            handler: self.handler,
        }
    }
}

/// A function with a fixed name and arity, as resolved by the compiler.
pub struct StaticFunction {
    name: Name,
    signature: Signature,
    arity: usize,
    context_parameter: Option<SequenceType>,
    flags: FunctionFlags,
    function_kind: Option<FunctionKind>,
    handler: FunctionHandler,
}

impl Debug for StaticFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("function_kind", &self.function_kind)
            .finish()
    }
}

impl StaticFunction {
    /// Call the function. Arguments are converted to the parameter types
    /// first, and the focus supplies the implicit argument if the function
    /// takes one.
    pub(crate) fn invoke(
        &self,
        context: &DynamicContext,
        focus: Option<&Focus>,
        arguments: Vec<sequence::Sequence>,
    ) -> error::Result<sequence::Sequence> {
        log::trace!("invoking {}#{}", self.name.to_full_name(), self.arity);
        if arguments.len() != self.arity {
            return Err(error::Error::MPTY0004);
        }
        let mut converted = Vec::with_capacity(arguments.len() + 1);
        for (argument, parameter_type) in arguments
            .into_iter()
            .zip(self.signature.parameter_types())
        {
            converted.push(argument.sequence_type_matching_function_conversion(parameter_type)?);
        }

        let result = match self.function_kind {
            None => (self.handler)(context, &converted),
            Some(FunctionKind::ItemFirst) => {
                converted.insert(0, self.context_argument(focus)?);
                (self.handler)(context, &converted)
            }
            Some(FunctionKind::ItemLast) => {
                converted.push(self.context_argument(focus)?);
                (self.handler)(context, &converted)
            }
            Some(FunctionKind::Position) => {
                let focus = focus.ok_or(error::Error::MPDY0002)?;
                converted.insert(0, Atomic::from(focus.position()).into());
                (self.handler)(context, &converted)
            }
            Some(FunctionKind::Size) => {
                let focus = focus.ok_or(error::Error::MPDY0002)?;
                converted.insert(0, Atomic::from(focus.size()).into());
                (self.handler)(context, &converted)
            }
        }?;
        // Handlers may hand back a subtype of the declared item type, so
        // only the occurrence is enforced.
        if !self.signature.return_type().cardinality_matches(result.len()) {
            log::debug!(
                "{}#{} returned {} items, declared {}",
                self.name.to_full_name(),
                self.arity,
                result.len(),
                self.signature.return_type()
            );
            return Err(error::Error::MPTY0004);
        }
        Ok(result)
    }

    fn context_argument(&self, focus: Option<&Focus>) -> error::Result<sequence::Sequence> {
        let item = focus.ok_or(error::Error::MPDY0002)?.item().clone();
        let sequence = sequence::Sequence::from(item);
        match &self.context_parameter {
            Some(parameter_type) => {
                sequence.sequence_type_matching_function_conversion(parameter_type)
            }
            None => Ok(sequence),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn flags(&self) -> FunctionFlags {
        self.flags
    }

    pub fn display_representation(&self) -> String {
        format!("{}{}", self.name.to_full_name(), self.signature)
    }
}
