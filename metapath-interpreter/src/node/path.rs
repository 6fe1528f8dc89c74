use super::node_core::{Node, NodeKind};

/// How [`Node::path`] renders the location of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathFormat {
    /// `/catalog[1]/group[2]/@id`
    #[default]
    Metapath,
    /// `/catalog/group/@id`
    MetapathNoPositions,
    /// The document URI with the path as its fragment:
    /// `file:///catalog.json#/catalog[1]/group[2]/@id`. Without a document
    /// URI only the path is given.
    Uri,
}

impl PathFormat {
    pub fn by_name(name: &str) -> Option<PathFormat> {
        match name {
            "metapath" => Some(PathFormat::Metapath),
            "metapath-no-positions" => Some(PathFormat::MetapathNoPositions),
            "uri" => Some(PathFormat::Uri),
            _ => None,
        }
    }
}

impl Node {
    /// A stable rendering of the location of this node in its document.
    pub fn path(&self, format: PathFormat) -> String {
        let mut segments: Vec<Node> = self.ancestors();
        segments.reverse();
        segments.push(self.clone());
        let positions = format != PathFormat::MetapathNoPositions;
        let mut path = String::new();
        for node in segments
            .iter()
            .filter(|node| node.node_kind() != NodeKind::Document)
        {
            path.push('/');
            path.push_str(&segment(node, positions));
        }
        if path.is_empty() {
            path.push('/');
        }
        match (format, self.document_uri()) {
            (PathFormat::Uri, Some(uri)) => format!("{}#{}", uri, path),
            _ => path,
        }
    }
}

fn segment(node: &Node, positions: bool) -> String {
    let local_name = node
        .name()
        .map(|name| name.local_name().to_string())
        .unwrap_or_default();
    match node.node_kind() {
        NodeKind::Flag => format!("@{}", local_name),
        _ if positions => format!("{}[{}]", local_name, position(node)),
        _ => local_name,
    }
}

// The 1-based position among siblings of the same name.
fn position(node: &Node) -> usize {
    let name = node.name();
    1 + node
        .preceding_siblings()
        .iter()
        .filter(|sibling| sibling.name() == name)
        .count()
}
