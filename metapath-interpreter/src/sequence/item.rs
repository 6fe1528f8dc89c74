use crate::atomic;
use crate::error;
use crate::function;
use crate::node::Node;

/// A Metapath item. These are the items that make up a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// An atomic value.
    ///
    /// One of the data types defined by Metapath, such as `integer` or
    /// `string`.
    Atomic(atomic::Atomic),
    /// A node in a document.
    Node(Node),
    /// A function item: a map or an array.
    Function(function::Function),
}

impl Item {
    /// Try to get the atomic value of the item.
    pub fn to_atomic(&self) -> error::Result<atomic::Atomic> {
        match self {
            Item::Atomic(a) => Ok(a.clone()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// Try to get the node value of the item.
    pub fn to_node(&self) -> error::Result<Node> {
        match self {
            Item::Node(n) => Ok(n.clone()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// Try to get the function value of the item.
    pub fn to_function(&self) -> error::Result<function::Function> {
        match self {
            Item::Function(f) => Ok(f.clone()),
            _ => Err(error::Error::MPTY0004),
        }
    }

    /// Try to get the value as a map.
    pub fn to_map(&self) -> error::Result<function::Map> {
        if let Item::Function(function::Function::Map(map)) = self {
            Ok(map.clone())
        } else {
            Err(error::Error::MPTY0004)
        }
    }

    /// Try to get the value as an array.
    pub fn to_array(&self) -> error::Result<function::Array> {
        if let Item::Function(function::Function::Array(array)) = self {
            Ok(array.clone())
        } else {
            Err(error::Error::MPTY0004)
        }
    }

    /// Obtain the effective boolean value of the item.
    ///
    /// - If the item is a node, it's true.
    ///
    /// - If the item is a boolean, it's the value of the boolean.
    ///
    /// - If the item is a string, it's false if it's empty, otherwise true.
    ///
    /// - If the item is numeric, it's false if it's zero, otherwise true.
    ///
    /// - Functions are always errors.
    pub fn effective_boolean_value(&self) -> error::Result<bool> {
        match self {
            Item::Atomic(a) => a.effective_boolean_value(),
            Item::Node(_) => Ok(true),
            Item::Function(_) => Err(error::Error::FORG0006),
        }
    }

    /// Construct the string value.
    ///
    /// - For an atomic value, it's the canonical lexical representation.
    ///
    /// - For a node, it's the string value of its typed value, or the empty
    ///   string if it has none.
    ///
    /// - For a function, it errors.
    pub fn string_value(&self) -> error::Result<String> {
        match self {
            Item::Atomic(atomic) => Ok(atomic.string_value()),
            Item::Node(node) => Ok(node.string_value()),
            Item::Function(_) => Err(error::Error::FOTY0014),
        }
    }

    /// Display representation of an item.
    ///
    /// For atomics this is a parseable Metapath expression. Nodes are shown
    /// by their path.
    pub fn display_representation(&self) -> String {
        match self {
            Item::Atomic(atomic) => atomic.display_representation(),
            Item::Node(node) => node.path(crate::node::PathFormat::Metapath),
            Item::Function(function) => function.display_representation(),
        }
    }

    pub(crate) fn is_map(&self) -> bool {
        matches!(self, Item::Function(function::Function::Map(_)))
    }

    pub(crate) fn is_array(&self) -> bool {
        matches!(self, Item::Function(function::Function::Array(_)))
    }
}

impl<T> From<T> for Item
where
    T: Into<atomic::Atomic>,
{
    fn from(a: T) -> Self {
        Self::Atomic(a.into())
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<function::Function> for Item {
    fn from(function: function::Function) -> Self {
        Self::Function(function)
    }
}

impl From<function::Map> for Item {
    fn from(map: function::Map) -> Self {
        Self::Function(function::Function::Map(map))
    }
}

impl From<function::Array> for Item {
    fn from(array: function::Array) -> Self {
        Self::Function(function::Function::Array(array))
    }
}
