//! Nodes of the document tree.
//!
//! The engine navigates documents through the [`NodeItem`] trait. Any tree
//! can take part in evaluation by implementing it; [`InMemoryDocument`] is a
//! ready-made implementation.
mod axis;
mod document;
mod node_core;
mod path;

pub use document::{DocumentBuilder, InMemoryDocument, NodeId};
pub(crate) use node_core::document_order;
pub use node_core::{Node, NodeIdentity, NodeItem, NodeKind};
pub use path::PathFormat;
