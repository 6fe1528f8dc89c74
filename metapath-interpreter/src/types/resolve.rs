use metapath_ast::ast;
use metapath_name::{Name, NameKind, Namespaces, METAPATH_NAMESPACE};
use metapath_schema_type::DataType;

use crate::error;

/// Resolve a name as written into a qualified name. Unprefixed names fall
/// into the default namespace for their kind.
pub(crate) fn resolve_name(
    namespaces: &Namespaces,
    name: &ast::EQName,
    kind: NameKind,
) -> error::Result<Name> {
    match name {
        ast::EQName::Unprefixed(local_name) => Ok(namespaces.resolve(kind, None, local_name)?),
        ast::EQName::Prefixed { prefix, local_name } => {
            Ok(namespaces.resolve(kind, Some(prefix), local_name)?)
        }
        ast::EQName::URIQualified { uri, local_name } => Ok(Name::uri_qualified(uri, local_name)),
    }
}

/// Resolve the name of a data type. Unknown types are `MPST0051`.
pub(crate) fn resolve_data_type(
    namespaces: &Namespaces,
    name: &ast::NameS,
) -> error::SpannedResult<DataType> {
    let resolved = resolve_name(namespaces, &name.value, NameKind::DataType)
        .map_err(|e| e.with_ast_span(name.span))?;
    match resolved.namespace() {
        Some(METAPATH_NAMESPACE) => DataType::by_local_name(resolved.local_name()),
        _ => None,
    }
    .ok_or_else(|| error::Error::MPST0051.with_ast_span(name.span))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ast::NameS {
        ast::NameS::new(
            ast::EQName::Unprefixed(s.to_string()),
            metapath_ast::Span::new(0, s.len()),
        )
    }

    #[test]
    fn test_data_type() {
        let namespaces = Namespaces::default();
        assert_eq!(
            resolve_data_type(&namespaces, &name("integer")).unwrap(),
            DataType::Integer
        );
        let error = resolve_data_type(&namespaces, &name("nope")).unwrap_err();
        assert_eq!(error.error, error::Error::MPST0051);
    }

    #[test]
    fn test_unknown_prefix() {
        let namespaces = Namespaces::default();
        let name = ast::EQName::Prefixed {
            prefix: "x".to_string(),
            local_name: "a".to_string(),
        };
        assert_eq!(
            resolve_name(&namespaces, &name, NameKind::Model),
            Err(error::Error::MPST0081)
        );
    }
}
