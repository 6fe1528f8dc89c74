/// A sequence is a list of items, where each item is either an atomic
/// value, a node or a function item. Metapath is defined around sequences.
mod deep_equal;
mod item;
mod sequence_core;

pub use item::Item;
pub use sequence_core::Sequence;
