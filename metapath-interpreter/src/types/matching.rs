// Sequence type matching, used by `instance of` and `treat as`, and with
// function conversion rules applied, by function calls.

use metapath_schema_type::DataType;

use crate::atomic::Atomic;
use crate::error;
use crate::node::NodeKind;
use crate::sequence::{Item, Sequence};

use super::sequence_type::{ArrayTest, ItemType, KindTest, MapTest, Occurrence, SequenceType};

impl SequenceType {
    /// Whether the sequence matches this type as is.
    pub fn matches(&self, sequence: &Sequence) -> bool {
        sequence.clone().sequence_type_matching(self).is_ok()
    }

    /// Whether a sequence of `len` items satisfies the occurrence of this
    /// type. Item types are not looked at.
    pub(crate) fn cardinality_matches(&self, len: usize) -> bool {
        match self {
            SequenceType::Empty => len == 0,
            SequenceType::Item { occurrence, .. } => occurrence_matches(*occurrence, len),
        }
    }
}

fn occurrence_matches(occurrence: Occurrence, len: usize) -> bool {
    match occurrence {
        Occurrence::One => len == 1,
        Occurrence::Option => len <= 1,
        Occurrence::Many => true,
        Occurrence::NonEmpty => len > 0,
    }
}

impl Sequence {
    /// Check the sequence against a sequence type, without conversion.
    pub(crate) fn sequence_type_matching(self, sequence_type: &SequenceType) -> error::Result<Self> {
        self.sequence_type_matching_convert(sequence_type, &|sequence, _| Ok(sequence.clone()))
    }

    /// Check the sequence against a parameter type, applying the function
    /// conversion rules: atomization, casting of untyped values and
    /// numeric and URI promotion.
    pub(crate) fn sequence_type_matching_function_conversion(
        self,
        sequence_type: &SequenceType,
    ) -> error::Result<Self> {
        self.sequence_type_matching_convert(sequence_type, &convert_atomic)
    }

    fn sequence_type_matching_convert(
        self,
        sequence_type: &SequenceType,
        convert_atomic: &impl Fn(&Sequence, DataType) -> error::Result<Sequence>,
    ) -> error::Result<Self> {
        match sequence_type {
            SequenceType::Empty => {
                if self.is_empty() {
                    Ok(self)
                } else {
                    Err(error::Error::MPTY0004)
                }
            }
            SequenceType::Item {
                item_type,
                occurrence,
            } => {
                let sequence = match item_type {
                    ItemType::Atomic(data_type) => convert_atomic(&self, *data_type)?,
                    _ => self,
                };
                if !occurrence_matches(*occurrence, sequence.len()) {
                    return Err(error::Error::MPTY0004);
                }
                for item in sequence.iter() {
                    item.item_type_matching(item_type, convert_atomic)?;
                }
                Ok(sequence)
            }
        }
    }
}

impl Item {
    fn item_type_matching(
        &self,
        item_type: &ItemType,
        convert_atomic: &impl Fn(&Sequence, DataType) -> error::Result<Sequence>,
    ) -> error::Result<()> {
        let matched = match item_type {
            ItemType::Item => true,
            ItemType::Atomic(data_type) => self.to_atomic()?.data_type().derives_from(*data_type),
            ItemType::Kind(kind_test) => match self {
                Item::Node(node) => kind_test_matches(kind_test, node),
                _ => false,
            },
            ItemType::Map(MapTest::Any) => self.is_map(),
            ItemType::Map(MapTest::Typed {
                key_type,
                value_type,
            }) => {
                let map = self.to_map()?;
                for (key, value) in map.entries() {
                    if !key.data_type().derives_from(*key_type) {
                        return Err(error::Error::MPTY0004);
                    }
                    value
                        .clone()
                        .sequence_type_matching_convert(value_type, convert_atomic)?;
                }
                true
            }
            ItemType::Array(ArrayTest::Any) => self.is_array(),
            ItemType::Array(ArrayTest::Typed(member_type)) => {
                let array = self.to_array()?;
                for member in array.iter() {
                    member
                        .clone()
                        .sequence_type_matching_convert(member_type, convert_atomic)?;
                }
                true
            }
        };
        if matched {
            Ok(())
        } else {
            Err(error::Error::MPTY0004)
        }
    }
}

pub(crate) fn kind_test_matches(kind_test: &KindTest, node: &crate::node::Node) -> bool {
    let named = |kind: NodeKind, name: &Option<metapath_name::Name>| {
        node.node_kind() == kind
            && match name {
                Some(name) => node.name().as_ref() == Some(name),
                None => true,
            }
    };
    match kind_test {
        KindTest::Any => true,
        KindTest::Document => node.node_kind() == NodeKind::Document,
        KindTest::Assembly(name) => named(NodeKind::Assembly, name),
        KindTest::Field(name) => named(NodeKind::Field, name),
        KindTest::Flag(name) => named(NodeKind::Flag, name),
    }
}

fn convert_atomic(sequence: &Sequence, data_type: DataType) -> error::Result<Sequence> {
    let mut items = Vec::new();
    for atom in sequence.atomized()? {
        let atom = if atom.is_untyped() {
            cast_untyped(atom, data_type)?
        } else {
            atom
        };
        items.push(Item::from(type_promote(atom, data_type)?));
    }
    Ok(Sequence::new(items))
}

fn cast_untyped(atom: Atomic, data_type: DataType) -> error::Result<Atomic> {
    match data_type {
        DataType::AnyAtomicType | DataType::UntypedAtomic => Ok(atom),
        DataType::Numeric => atom.cast_to(DataType::Decimal),
        _ if data_type.is_abstract() => Ok(atom),
        _ => atom.cast_to(data_type),
    }
}

// Integers are decimals already; URIs promote to strings.
fn type_promote(atom: Atomic, data_type: DataType) -> error::Result<Atomic> {
    if atom.data_type().derives_from(data_type) {
        return Ok(atom);
    }
    match data_type {
        DataType::String if atom.is_string_like() => Ok(atom.cast_to_string()),
        _ => Ok(atom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use metapath_name::Namespaces;

    fn sequence_type(s: &str) -> SequenceType {
        let ast = metapath_ast::parse_sequence_type(s).unwrap();
        SequenceType::from_ast(&ast, &Namespaces::default()).unwrap()
    }

    #[test]
    fn test_occurrence() {
        let empty = Sequence::Empty;
        let one = Sequence::from(Atomic::from(1i64));
        let two = Sequence::from(vec![Item::from(1i64), Item::from(2i64)]);
        assert!(sequence_type("integer?").matches(&empty));
        assert!(!sequence_type("integer").matches(&empty));
        assert!(!sequence_type("integer+").matches(&empty));
        assert!(sequence_type("integer+").matches(&two));
        assert!(!sequence_type("integer?").matches(&two));
        assert!(sequence_type("decimal").matches(&one));
        assert!(!sequence_type("string").matches(&one));
        assert!(sequence_type("empty-sequence()").matches(&empty));
        assert!(!sequence_type("empty-sequence()").matches(&one));
    }

    #[test]
    fn test_function_conversion_casts_untyped() {
        let untyped = Sequence::from(Atomic::Untyped("12".into()));
        let converted = untyped
            .sequence_type_matching_function_conversion(&sequence_type("integer"))
            .unwrap();
        assert_eq!(converted, Sequence::from(Atomic::from(12i64)));
    }

    #[test]
    fn test_function_conversion_rejects_wrong_type() {
        let string = Sequence::from("a");
        assert_eq!(
            string.sequence_type_matching_function_conversion(&sequence_type("integer")),
            Err(error::Error::MPTY0004)
        );
    }

    #[test]
    fn test_map_test() {
        let map = crate::function::Map::new(vec![(Atomic::from("a"), Sequence::from(Atomic::from(1i64)))])
            .unwrap();
        let sequence = Sequence::from(map);
        assert!(sequence_type("map(*)").matches(&sequence));
        assert!(sequence_type("map(string, integer)").matches(&sequence));
        assert!(!sequence_type("map(integer, integer)").matches(&sequence));
        assert!(!sequence_type("array(*)").matches(&sequence));
    }
}
