use std::fmt;

use metapath_ast::ast;
use metapath_name::Namespaces;

use crate::error;
use crate::types::SequenceType;

use super::static_function::FunctionKind;

/// A function signature: the types of the parameters and of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    parameter_types: Vec<SequenceType>,
    return_type: SequenceType,
}

impl Signature {
    pub fn new(parameter_types: Vec<SequenceType>, return_type: SequenceType) -> Self {
        Self {
            parameter_types,
            return_type,
        }
    }

    pub(crate) fn from_ast(
        signature: &ast::Signature,
        namespaces: &Namespaces,
    ) -> error::SpannedResult<Self> {
        let parameter_types = signature
            .params
            .iter()
            .map(|param| SequenceType::from_ast(&param.type_, namespaces))
            .collect::<error::SpannedResult<Vec<_>>>()?;
        let return_type = SequenceType::from_ast(&signature.return_type, namespaces)?;
        Ok(Self {
            parameter_types,
            return_type,
        })
    }

    /// The signatures generated for a function kind, each with the kind it
    /// is invoked with.
    ///
    /// The context item variants drop the parameter the context item fills
    /// in. The explicit variant is kept alongside.
    pub(crate) fn alternative_signatures(
        &self,
        function_kind: FunctionKind,
    ) -> Vec<(Signature, Option<FunctionKind>)> {
        let fills_parameter = matches!(function_kind, FunctionKind::ItemFirst | FunctionKind::ItemLast);
        if fills_parameter && self.parameter_types.is_empty() {
            return vec![(self.clone(), None)];
        }
        match function_kind {
            FunctionKind::ItemFirst => vec![
                (
                    Self {
                        parameter_types: self.parameter_types[1..].to_vec(),
                        return_type: self.return_type.clone(),
                    },
                    Some(function_kind),
                ),
                (self.clone(), None),
            ],
            FunctionKind::ItemLast => vec![
                (
                    Self {
                        parameter_types: self.parameter_types[..self.parameter_types.len() - 1]
                            .to_vec(),
                        return_type: self.return_type.clone(),
                    },
                    Some(function_kind),
                ),
                (self.clone(), None),
            ],
            FunctionKind::Position | FunctionKind::Size => vec![(self.clone(), Some(function_kind))],
        }
    }

    /// The parameter types of the function.
    pub fn parameter_types(&self) -> &[SequenceType] {
        &self.parameter_types
    }

    /// The return type of the function.
    pub fn return_type(&self) -> &SequenceType {
        &self.return_type
    }

    /// Return the arity of the function signature.
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters = self
            .parameter_types
            .iter()
            .map(|parameter_type| parameter_type.to_string())
            .collect::<Vec<_>>();
        write!(f, "({}) as {}", parameters.join(", "), self.return_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(s: &str) -> Signature {
        let ast = metapath_ast::parse_signature(s).unwrap();
        Signature::from_ast(&ast, &Namespaces::default()).unwrap()
    }

    #[test]
    fn test_display() {
        let signature = signature("fn:substring($source as string?, $start as decimal) as string");
        assert_eq!(signature.to_string(), "(string?, decimal) as string");
        assert_eq!(signature.arity(), 2);
    }

    #[test]
    fn test_item_first_alternatives() {
        let signature = signature("fn:string($arg as item()?) as string");
        let alternatives = signature.alternative_signatures(FunctionKind::ItemFirst);
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[0].0.arity(), 0);
        assert_eq!(alternatives[0].1, Some(FunctionKind::ItemFirst));
        assert_eq!(alternatives[1].0.arity(), 1);
        assert_eq!(alternatives[1].1, None);
    }

    #[test]
    fn test_position_keeps_signature() {
        let signature = signature("fn:position() as integer");
        let alternatives = signature.alternative_signatures(FunctionKind::Position);
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].0.arity(), 0);
    }
}
