use metapath_ast::ast::Axis;

use super::node_core::{Node, NodeKind};

impl Node {
    /// The nodes on an axis, in axis order: reverse axes list the nearest
    /// node first.
    pub fn axis(&self, axis: Axis) -> Vec<Node> {
        log::trace!("axis {} from {:?}", axis.name(), self.identity());
        match axis {
            Axis::Ancestor => self.ancestors(),
            Axis::AncestorOrSelf => {
                let mut result = vec![self.clone()];
                result.extend(self.ancestors());
                result
            }
            Axis::Child => self.children(),
            Axis::Descendant => self.descendants(),
            Axis::DescendantOrSelf => {
                let mut result = vec![self.clone()];
                result.extend(self.descendants());
                result
            }
            Axis::Flag => self.flags(),
            Axis::Following => self.following(),
            Axis::FollowingSibling => self.following_siblings(),
            Axis::Parent => self.parent().into_iter().collect(),
            Axis::Preceding => self.preceding(),
            Axis::PrecedingSibling => self.preceding_siblings(),
            Axis::Self_ => vec![self.clone()],
        }
    }

    /// Name tests select flags on the flag axis and model nodes on all
    /// others.
    pub(crate) fn is_principal(&self, axis: Axis) -> bool {
        match axis {
            Axis::Flag => self.node_kind() == NodeKind::Flag,
            _ => matches!(self.node_kind(), NodeKind::Assembly | NodeKind::Field),
        }
    }
}
