use std::rc::Rc;

use metapath_name::Name;

use crate::atomic::Atomic;

use super::node_core::{Node, NodeIdentity, NodeItem, NodeKind};

/// A handle to a node under construction or in a built document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    name: Option<Name>,
    parent: Option<usize>,
    children: Vec<usize>,
    flags: Vec<usize>,
    value: Option<Atomic>,
    order: usize,
}

/// A document held in memory as an arena of nodes.
#[derive(Debug)]
pub struct InMemoryDocument {
    nodes: Vec<NodeData>,
    document_uri: Option<String>,
}

impl InMemoryDocument {
    /// The document node.
    pub fn root(self: &Rc<Self>) -> Node {
        self.node(NodeId(0))
    }

    pub fn node(self: &Rc<Self>, id: NodeId) -> Node {
        Node::new(Rc::new(DocumentNode {
            document: self.clone(),
            id: id.0,
        }))
    }

    fn identity(self: &Rc<Self>) -> usize {
        Rc::as_ptr(self) as *const () as usize
    }
}

/// Builds an [`InMemoryDocument`].
///
/// ```
/// use metapath_interpreter::node::DocumentBuilder;
///
/// let mut builder = DocumentBuilder::new();
/// let catalog = builder.root_assembly("catalog".into());
/// builder.flag(catalog, "id".into(), "c1");
/// builder.field(catalog, "title".into(), "Example");
/// let document = builder.build();
/// assert_eq!(document.root().children().len(), 1);
/// ```
#[derive(Debug)]
pub struct DocumentBuilder {
    nodes: Vec<NodeData>,
    document_uri: Option<String>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                name: None,
                parent: None,
                children: Vec::new(),
                flags: Vec::new(),
                value: None,
                order: 0,
            }],
            document_uri: None,
        }
    }

    pub fn document_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.document_uri = Some(uri.into());
        self
    }

    /// The document node.
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    /// Add the top-level assembly.
    pub fn root_assembly(&mut self, name: Name) -> NodeId {
        self.add(NodeId(0), NodeKind::Assembly, name, None)
    }

    pub fn assembly(&mut self, parent: NodeId, name: Name) -> NodeId {
        self.add(parent, NodeKind::Assembly, name, None)
    }

    pub fn field(&mut self, parent: NodeId, name: Name, value: impl Into<Atomic>) -> NodeId {
        self.add(parent, NodeKind::Field, name, Some(value.into()))
    }

    pub fn flag(&mut self, parent: NodeId, name: Name, value: impl Into<Atomic>) -> NodeId {
        self.add(parent, NodeKind::Flag, name, Some(value.into()))
    }

    fn add(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: Name,
        value: Option<Atomic>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            kind,
            name: Some(name),
            parent: Some(parent.0),
            children: Vec::new(),
            flags: Vec::new(),
            value,
            order: 0,
        });
        let parent = &mut self.nodes[parent.0];
        if kind == NodeKind::Flag {
            parent.flags.push(id);
        } else {
            parent.children.push(id);
        }
        NodeId(id)
    }

    /// Finish the document, numbering its nodes in document order: a node,
    /// then its flags, then its children.
    pub fn build(mut self) -> Rc<InMemoryDocument> {
        let mut order = 0;
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            self.nodes[id].order = order;
            order += 1;
            for flag in self.nodes[id].flags.clone() {
                self.nodes[flag].order = order;
                order += 1;
            }
            stack.extend(self.nodes[id].children.iter().rev());
        }
        Rc::new(InMemoryDocument {
            nodes: self.nodes,
            document_uri: self.document_uri,
        })
    }
}

#[derive(Debug)]
struct DocumentNode {
    document: Rc<InMemoryDocument>,
    id: usize,
}

impl DocumentNode {
    fn data(&self) -> &NodeData {
        &self.document.nodes[self.id]
    }

    fn nodes(&self, ids: &[usize]) -> Vec<Node> {
        ids.iter()
            .map(|id| self.document.node(NodeId(*id)))
            .collect()
    }
}

impl NodeItem for DocumentNode {
    fn node_kind(&self) -> NodeKind {
        self.data().kind
    }

    fn name(&self) -> Option<Name> {
        self.data().name.clone()
    }

    fn parent(&self) -> Option<Node> {
        self.data()
            .parent
            .map(|parent| self.document.node(NodeId(parent)))
    }

    fn children(&self) -> Vec<Node> {
        self.nodes(&self.data().children)
    }

    fn flags(&self) -> Vec<Node> {
        self.nodes(&self.data().flags)
    }

    fn typed_value(&self) -> Option<Atomic> {
        self.data().value.clone()
    }

    fn document_uri(&self) -> Option<String> {
        self.document.document_uri.clone()
    }

    fn identity(&self) -> NodeIdentity {
        NodeIdentity {
            document: self.document.identity(),
            order: self.data().order,
        }
    }

    fn to_node(&self) -> Node {
        self.document.node(NodeId(self.id))
    }
}
