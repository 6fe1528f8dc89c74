use std::fmt;

use metapath_ast::ast;
use metapath_name::{Name, NameKind, Namespaces};
use metapath_schema_type::DataType;

use crate::error;

use super::resolve::{resolve_data_type, resolve_name};

pub use metapath_ast::ast::Occurrence;

/// A sequence type with its names resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceType {
    /// `empty-sequence()`
    Empty,
    Item {
        item_type: ItemType,
        occurrence: Occurrence,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemType {
    /// `item()`
    Item,
    Atomic(DataType),
    Kind(KindTest),
    Map(MapTest),
    Array(ArrayTest),
}

/// A test on nodes. A missing name matches any name.
#[derive(Debug, Clone, PartialEq)]
pub enum KindTest {
    Any,
    Document,
    Assembly(Option<Name>),
    Field(Option<Name>),
    Flag(Option<Name>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapTest {
    Any,
    Typed {
        key_type: DataType,
        value_type: Box<SequenceType>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayTest {
    Any,
    Typed(Box<SequenceType>),
}

impl SequenceType {
    /// `item()*`, the type that matches everything.
    pub fn any() -> Self {
        SequenceType::Item {
            item_type: ItemType::Item,
            occurrence: Occurrence::Many,
        }
    }

    pub fn atomic(data_type: DataType, occurrence: Occurrence) -> Self {
        SequenceType::Item {
            item_type: ItemType::Atomic(data_type),
            occurrence,
        }
    }

    /// Resolve the names in a sequence type as written.
    pub fn from_ast(
        sequence_type: &ast::SequenceType,
        namespaces: &Namespaces,
    ) -> error::SpannedResult<Self> {
        match sequence_type {
            ast::SequenceType::Empty => Ok(SequenceType::Empty),
            ast::SequenceType::Item(item) => Ok(SequenceType::Item {
                item_type: ItemType::from_ast(&item.item_type, namespaces)?,
                occurrence: item.occurrence,
            }),
        }
    }

    /// The item type, unless this is the empty sequence type.
    pub fn item_type(&self) -> Option<&ItemType> {
        match self {
            SequenceType::Empty => None,
            SequenceType::Item { item_type, .. } => Some(item_type),
        }
    }
}

impl ItemType {
    fn from_ast(item_type: &ast::ItemType, namespaces: &Namespaces) -> error::SpannedResult<Self> {
        match item_type {
            ast::ItemType::Item => Ok(ItemType::Item),
            ast::ItemType::AtomicOrUnionType(name) => {
                Ok(ItemType::Atomic(resolve_data_type(namespaces, name)?))
            }
            ast::ItemType::KindTest(kind_test) => {
                Ok(ItemType::Kind(KindTest::from_ast(kind_test, namespaces)?))
            }
            ast::ItemType::MapTest(ast::MapTest::AnyMap) => Ok(ItemType::Map(MapTest::Any)),
            ast::ItemType::MapTest(ast::MapTest::TypedMap {
                key_type,
                value_type,
            }) => Ok(ItemType::Map(MapTest::Typed {
                key_type: resolve_data_type(namespaces, key_type)?,
                value_type: Box::new(SequenceType::from_ast(value_type, namespaces)?),
            })),
            ast::ItemType::ArrayTest(ast::ArrayTest::AnyArray) => {
                Ok(ItemType::Array(ArrayTest::Any))
            }
            ast::ItemType::ArrayTest(ast::ArrayTest::TypedArray(member_type)) => Ok(
                ItemType::Array(ArrayTest::Typed(Box::new(SequenceType::from_ast(
                    member_type,
                    namespaces,
                )?))),
            ),
        }
    }
}

impl KindTest {
    pub(crate) fn from_ast(
        kind_test: &ast::KindTest,
        namespaces: &Namespaces,
    ) -> error::SpannedResult<Self> {
        let resolve = |name: &Option<ast::NameOrWildcard>, kind: NameKind| match name {
            Some(ast::NameOrWildcard::Name(name)) => resolve_name(namespaces, &name.value, kind)
                .map(Some)
                .map_err(|e| e.with_ast_span(name.span)),
            Some(ast::NameOrWildcard::Wildcard) | None => Ok(None),
        };
        match kind_test {
            ast::KindTest::Any => Ok(KindTest::Any),
            ast::KindTest::Document => Ok(KindTest::Document),
            ast::KindTest::Assembly(name) => Ok(KindTest::Assembly(resolve(name, NameKind::Model)?)),
            ast::KindTest::Field(name) => Ok(KindTest::Field(resolve(name, NameKind::Model)?)),
            ast::KindTest::Flag(name) => Ok(KindTest::Flag(resolve(name, NameKind::Flag)?)),
        }
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceType::Empty => write!(f, "empty-sequence()"),
            SequenceType::Item {
                item_type,
                occurrence,
            } => {
                write!(f, "{}", item_type)?;
                match occurrence {
                    Occurrence::One => Ok(()),
                    Occurrence::Option => write!(f, "?"),
                    Occurrence::Many => write!(f, "*"),
                    Occurrence::NonEmpty => write!(f, "+"),
                }
            }
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Item => write!(f, "item()"),
            ItemType::Atomic(data_type) => write!(f, "{}", data_type.local_name()),
            ItemType::Kind(kind_test) => write!(f, "{}", kind_test),
            ItemType::Map(MapTest::Any) => write!(f, "map(*)"),
            ItemType::Map(MapTest::Typed {
                key_type,
                value_type,
            }) => write!(f, "map({}, {})", key_type.local_name(), value_type),
            ItemType::Array(ArrayTest::Any) => write!(f, "array(*)"),
            ItemType::Array(ArrayTest::Typed(member_type)) => write!(f, "array({})", member_type),
        }
    }
}

impl fmt::Display for KindTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, name) = match self {
            KindTest::Any => return write!(f, "node()"),
            KindTest::Document => return write!(f, "document-node()"),
            KindTest::Assembly(name) => ("assembly", name),
            KindTest::Field(name) => ("field", name),
            KindTest::Flag(name) => ("flag", name),
        };
        match name {
            Some(name) => write!(f, "{}({})", kind, name.to_uri_qualified()),
            None => write!(f, "{}()", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> SequenceType {
        let ast = metapath_ast::parse_sequence_type(s).unwrap();
        SequenceType::from_ast(&ast, &Namespaces::default()).unwrap()
    }

    #[test]
    fn test_resolve_atomic() {
        assert_eq!(
            parse("integer?"),
            SequenceType::atomic(DataType::Integer, Occurrence::Option)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("map(string, integer*)").to_string(), "map(string, integer*)");
        assert_eq!(parse("array(*)+").to_string(), "array(*)+");
        assert_eq!(parse("flag(id)").to_string(), "flag(id)");
        assert_eq!(parse("empty-sequence()").to_string(), "empty-sequence()");
    }

    #[test]
    fn test_unknown_type() {
        let ast = metapath_ast::parse_sequence_type("nope").unwrap();
        let error = SequenceType::from_ast(&ast, &Namespaces::default()).unwrap_err();
        assert_eq!(error.error, error::Error::MPST0051);
    }
}
