use std::rc::Rc;

use crate::atomic;
use crate::error;
use crate::function;
use crate::node::Node;

use super::item::Item;

/// An ordered sequence of items.
///
/// Sequences never nest: concatenating sequences gives a flat sequence.
/// The representation is normalized so that a sequence with one item is
/// always `One` and an empty one is always `Empty`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Sequence {
    #[default]
    Empty,
    One(Item),
    Many(Rc<Vec<Item>>),
}

impl Sequence {
    pub fn new(mut items: Vec<Item>) -> Self {
        match items.len() {
            0 => Sequence::Empty,
            1 => Sequence::One(items.remove(0)),
            _ => Sequence::Many(Rc::new(items)),
        }
    }

    pub fn empty() -> Self {
        Sequence::Empty
    }

    /// The items in the sequence.
    pub fn items(&self) -> &[Item] {
        match self {
            Sequence::Empty => &[],
            Sequence::One(item) => std::slice::from_ref(item),
            Sequence::Many(items) => items.as_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items().iter()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Sequence::Empty)
    }

    /// The item at a 0-based index.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items().get(index)
    }

    /// Get a single item from the sequence, if it only contains one item.
    pub fn one(self) -> error::Result<Item> {
        match self {
            Sequence::One(item) => Ok(item),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// Get an optional item from the sequence.
    pub fn option(self) -> error::Result<Option<Item>> {
        match self {
            Sequence::Empty => Ok(None),
            Sequence::One(item) => Ok(Some(item)),
            Sequence::Many(_) => Err(error::Error::MPTY0004),
        }
    }

    /// Atomize the sequence.
    ///
    /// Nodes give their typed value and arrays are atomized member by
    /// member. Maps cannot be atomized.
    pub fn atomized(&self) -> error::Result<Vec<atomic::Atomic>> {
        let mut result = Vec::new();
        for item in self.iter() {
            atomize_item(item, &mut result)?;
        }
        Ok(result)
    }

    /// Atomize to at most one value.
    pub fn atomized_option(&self) -> error::Result<Option<atomic::Atomic>> {
        let mut atomized = self.atomized()?;
        match atomized.len() {
            0 => Ok(None),
            1 => Ok(atomized.pop()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// Atomize to exactly one value.
    pub fn atomized_one(&self) -> error::Result<atomic::Atomic> {
        self.atomized_option()?.ok_or(error::Error::MPTY0004)
    }

    /// The nodes in the sequence. An error is returned if any item is not a
    /// node.
    pub fn nodes(&self) -> error::Result<Vec<Node>> {
        self.iter().map(|item| item.to_node()).collect()
    }

    /// The maps in the sequence.
    pub fn maps(&self) -> error::Result<Vec<function::Map>> {
        self.iter().map(|item| item.to_map()).collect()
    }

    /// Obtain the effective boolean value of the sequence.
    ///
    /// An empty sequence is false. A sequence starting with a node is true.
    /// A singleton atomic value has its own effective boolean value. All
    /// other sequences are an error.
    pub fn effective_boolean_value(&self) -> error::Result<bool> {
        match self {
            Sequence::Empty => Ok(false),
            Sequence::One(item) => item.effective_boolean_value(),
            Sequence::Many(items) => match items.first() {
                Some(Item::Node(_)) => Ok(true),
                _ => Err(error::Error::FORG0006),
            },
        }
    }

    /// Concatenate two sequences.
    pub fn concat(self, other: Sequence) -> Sequence {
        match (self, other) {
            (Sequence::Empty, other) => other,
            (this, Sequence::Empty) => this,
            (this, other) => {
                let mut items = this.into_items();
                items.extend(other.into_items());
                Sequence::new(items)
            }
        }
    }

    /// Take the items out of the sequence.
    pub fn into_items(self) -> Vec<Item> {
        match self {
            Sequence::Empty => Vec::new(),
            Sequence::One(item) => vec![item],
            Sequence::Many(items) => Rc::try_unwrap(items).unwrap_or_else(|items| (*items).clone()),
        }
    }

    /// A representation of the sequence for display: single items are shown
    /// as is, other sequences are parenthesized.
    pub fn display_representation(&self) -> String {
        match self {
            Sequence::One(item) => item.display_representation(),
            _ => {
                let items = self
                    .iter()
                    .map(|item| item.display_representation())
                    .collect::<Vec<_>>();
                format!("({})", items.join(", "))
            }
        }
    }
}

fn atomize_item(item: &Item, result: &mut Vec<atomic::Atomic>) -> error::Result<()> {
    match item {
        Item::Atomic(atomic) => result.push(atomic.clone()),
        Item::Node(node) => result.push(node.atomize()?),
        Item::Function(function::Function::Array(array)) => {
            for member in array.iter() {
                for item in member.iter() {
                    atomize_item(item, result)?;
                }
            }
        }
        Item::Function(function::Function::Map(_)) => return Err(error::Error::FOTY0013),
    }
    Ok(())
}

impl From<Item> for Sequence {
    fn from(item: Item) -> Self {
        Sequence::One(item)
    }
}

impl From<Option<Item>> for Sequence {
    fn from(item: Option<Item>) -> Self {
        match item {
            Some(item) => Sequence::One(item),
            None => Sequence::Empty,
        }
    }
}

impl From<Vec<Item>> for Sequence {
    fn from(items: Vec<Item>) -> Self {
        Sequence::new(items)
    }
}

impl From<atomic::Atomic> for Sequence {
    fn from(atomic: atomic::Atomic) -> Self {
        Sequence::One(Item::Atomic(atomic))
    }
}

impl From<Option<atomic::Atomic>> for Sequence {
    fn from(atomic: Option<atomic::Atomic>) -> Self {
        atomic.map(Item::Atomic).into()
    }
}

impl From<Vec<atomic::Atomic>> for Sequence {
    fn from(atomics: Vec<atomic::Atomic>) -> Self {
        Sequence::new(atomics.into_iter().map(Item::Atomic).collect())
    }
}

impl From<Node> for Sequence {
    fn from(node: Node) -> Self {
        Sequence::One(Item::Node(node))
    }
}

impl From<Vec<Node>> for Sequence {
    fn from(nodes: Vec<Node>) -> Self {
        Sequence::new(nodes.into_iter().map(Item::Node).collect())
    }
}

impl From<bool> for Sequence {
    fn from(b: bool) -> Self {
        atomic::Atomic::from(b).into()
    }
}

impl From<String> for Sequence {
    fn from(s: String) -> Self {
        atomic::Atomic::from(s).into()
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        atomic::Atomic::from(s).into()
    }
}

impl From<function::Map> for Sequence {
    fn from(map: function::Map) -> Self {
        Sequence::One(map.into())
    }
}

impl From<function::Array> for Sequence {
    fn from(array: function::Array) -> Self {
        Sequence::One(array.into())
    }
}

impl FromIterator<Item> for Sequence {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Sequence::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized() {
        assert_eq!(Sequence::new(vec![]), Sequence::Empty);
        assert_eq!(
            Sequence::new(vec![Item::from(1i64)]),
            Sequence::One(Item::from(1i64))
        );
    }

    #[test]
    fn test_concat_flattens() {
        let a: Sequence = vec![Item::from(1i64), Item::from(2i64)].into();
        let b: Sequence = Item::from(3i64).into();
        let c = a.concat(Sequence::Empty).concat(b);
        assert_eq!(c.len(), 3);
        assert_eq!(c.get(2), Some(&Item::from(3i64)));
    }

    #[test]
    fn test_effective_boolean_value() {
        assert!(!Sequence::Empty.effective_boolean_value().unwrap());
        assert!(Sequence::from("a").effective_boolean_value().unwrap());
        let many: Sequence = vec![Item::from(1i64), Item::from(2i64)].into();
        assert_eq!(
            many.effective_boolean_value(),
            Err(error::Error::FORG0006)
        );
    }

    #[test]
    fn test_atomize_array() {
        let array = function::Array::new(vec![
            Sequence::from(Item::from(1i64)),
            vec![Item::from(2i64), Item::from(3i64)].into(),
        ]);
        let sequence = Sequence::from(array);
        assert_eq!(
            sequence.atomized().unwrap(),
            vec![
                atomic::Atomic::from(1i64),
                atomic::Atomic::from(2i64),
                atomic::Atomic::from(3i64)
            ]
        );
    }

    #[test]
    fn test_atomize_map_fails() {
        let map = function::Map::new(vec![]).unwrap();
        assert_eq!(
            Sequence::from(map).atomized(),
            Err(error::Error::FOTY0013)
        );
    }
}
