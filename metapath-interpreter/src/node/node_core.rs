use std::fmt;
use std::rc::Rc;

use metapath_name::Name;

use crate::atomic::Atomic;
use crate::error;

/// The kinds of node in a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    /// A node with model children and flags, but no value.
    Assembly,
    /// A node with a value, and optionally flags.
    Field,
    Flag,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Assembly => "assembly",
            NodeKind::Field => "field",
            NodeKind::Flag => "flag",
        }
    }
}

/// The identity of a node: the document it belongs to, and its position
/// within that document in document order.
///
/// Ordering by identity gives a stable document order, including between
/// documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdentity {
    pub document: usize,
    pub order: usize,
}

/// The capabilities a document tree exposes to the engine.
///
/// Implementors supply the structural accessors; the axes are derived from
/// them.
pub trait NodeItem: fmt::Debug {
    fn node_kind(&self) -> NodeKind;

    /// The name of the node. Documents have no name.
    fn name(&self) -> Option<Name>;

    fn parent(&self) -> Option<Node>;

    /// Model children (assemblies and fields) in document order. Flags are
    /// not children.
    fn children(&self) -> Vec<Node>;

    fn flags(&self) -> Vec<Node>;

    /// The typed value of fields and flags. Assemblies and documents have
    /// none.
    fn typed_value(&self) -> Option<Atomic>;

    fn document_uri(&self) -> Option<String>;

    fn identity(&self) -> NodeIdentity;

    /// The base URI of the node; by default the URI of its document.
    fn base_uri(&self) -> Option<String> {
        self.document_uri()
    }

    fn ancestors(&self) -> Vec<Node> {
        let mut result = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            result.push(node);
        }
        result
    }

    fn descendants(&self) -> Vec<Node> {
        let mut result = Vec::new();
        for child in self.children() {
            result.push(child.clone());
            result.extend(child.descendants());
        }
        result
    }

    fn following_siblings(&self) -> Vec<Node> {
        let identity = self.identity();
        self.siblings()
            .into_iter()
            .filter(|sibling| sibling.identity() > identity)
            .collect()
    }

    /// Preceding siblings, nearest first.
    fn preceding_siblings(&self) -> Vec<Node> {
        let identity = self.identity();
        let mut result: Vec<Node> = self
            .siblings()
            .into_iter()
            .filter(|sibling| sibling.identity() < identity)
            .collect();
        result.reverse();
        result
    }

    /// Flags have no siblings.
    fn siblings(&self) -> Vec<Node> {
        if self.node_kind() == NodeKind::Flag {
            return Vec::new();
        }
        match self.parent() {
            Some(parent) => parent.children(),
            None => Vec::new(),
        }
    }

    /// Nodes after this one in document order, excluding its descendants
    /// and all flags.
    fn following(&self) -> Vec<Node> {
        let identity = self.identity();
        let last = self
            .descendants()
            .last()
            .map(|n| n.identity())
            .unwrap_or(identity);
        self.root()
            .descendants()
            .into_iter()
            .filter(|n| n.identity() > last)
            .collect()
    }

    /// Nodes before this one in document order, excluding its ancestors
    /// and all flags, nearest first.
    fn preceding(&self) -> Vec<Node> {
        let identity = self.identity();
        let ancestors: Vec<NodeIdentity> = self.ancestors().iter().map(|n| n.identity()).collect();
        let mut result: Vec<Node> = self
            .root()
            .descendants()
            .into_iter()
            .filter(|n| n.identity() < identity && !ancestors.contains(&n.identity()))
            .collect();
        result.reverse();
        result
    }

    fn root(&self) -> Node {
        match self.ancestors().pop() {
            Some(root) => root,
            None => self.to_node(),
        }
    }

    /// A handle to this node.
    fn to_node(&self) -> Node;
}

/// A node in a document tree, as held by an item.
///
/// Two nodes are equal when they have the same identity.
#[derive(Clone)]
pub struct Node(Rc<dyn NodeItem>);

impl Node {
    pub fn new(item: Rc<dyn NodeItem>) -> Self {
        Node(item)
    }

    /// The atomized value of the node.
    pub fn atomize(&self) -> error::Result<Atomic> {
        self.typed_value().ok_or(error::Error::FOTY0012)
    }

    /// The string value of the node; empty for nodes without a value.
    pub fn string_value(&self) -> String {
        self.typed_value()
            .map(|value| value.string_value())
            .unwrap_or_default()
    }

    /// Whether this node is `other` or one of its descendants.
    pub fn is_descendant_or_self_of(&self, other: &Node) -> bool {
        self == other || self.ancestors().iter().any(|ancestor| ancestor == other)
    }
}

impl std::ops::Deref for Node {
    type Target = dyn NodeItem;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sort nodes into document order and remove duplicates.
pub(crate) fn document_order(mut nodes: Vec<Node>) -> Vec<Node> {
    nodes.sort();
    nodes.dedup();
    nodes
}
