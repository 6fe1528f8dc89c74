use chrono::FixedOffset;

use crate::error;
use crate::function::Function;
use crate::node::Node;

use super::{Item, Sequence};

impl Sequence {
    /// Structural equality of two sequences, item by item.
    pub(crate) fn deep_equal(
        &self,
        other: &Sequence,
        default_offset: FixedOffset,
    ) -> error::Result<bool> {
        if self.len() != other.len() {
            return Ok(false);
        }
        for (a, b) in self.iter().zip(other.iter()) {
            if !a.deep_equal(b, default_offset)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Item {
    pub(crate) fn deep_equal(&self, other: &Item, default_offset: FixedOffset) -> error::Result<bool> {
        match (self, other) {
            (Item::Atomic(a), Item::Atomic(b)) => Ok(a.same_key(b)),
            (Item::Node(a), Item::Node(b)) => node_deep_equal(a, b),
            (Item::Function(Function::Map(a)), Item::Function(Function::Map(b))) => {
                a.deep_equal(b, default_offset)
            }
            (Item::Function(Function::Array(a)), Item::Function(Function::Array(b))) => {
                a.deep_equal(b, default_offset)
            }
            _ => Ok(false),
        }
    }
}

/// Nodes are equal when they have the same kind, name and typed value, the
/// same set of flags and pairwise equal children.
fn node_deep_equal(a: &Node, b: &Node) -> error::Result<bool> {
    if a == b {
        return Ok(true);
    }
    if a.node_kind() != b.node_kind() || a.name() != b.name() {
        return Ok(false);
    }
    let values_equal = match (a.typed_value(), b.typed_value()) {
        (Some(x), Some(y)) => x.same_key(&y),
        (None, None) => true,
        _ => false,
    };
    if !values_equal {
        return Ok(false);
    }
    let a_flags = a.flags();
    let b_flags = b.flags();
    if a_flags.len() != b_flags.len() {
        return Ok(false);
    }
    for flag in &a_flags {
        let mut found = false;
        for other in &b_flags {
            if node_deep_equal(flag, other)? {
                found = true;
                break;
            }
        }
        if !found {
            return Ok(false);
        }
    }
    let a_children = a.children();
    let b_children = b.children();
    if a_children.len() != b_children.len() {
        return Ok(false);
    }
    for (x, y) in a_children.iter().zip(b_children.iter()) {
        if !node_deep_equal(x, y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    use crate::atomic::Atomic;
    use crate::function::Array;
    use crate::node::DocumentBuilder;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_numeric_types_compare_equal() {
        let a: Sequence = Atomic::from(1i64).into();
        let b: Sequence = Atomic::from(dec!(1.0)).into();
        assert!(a.deep_equal(&b, utc()).unwrap());
    }

    #[test]
    fn test_nested_arrays() {
        let a = Sequence::from(Array::new(vec![Atomic::from("x").into()]));
        let b = Sequence::from(Array::new(vec![Atomic::from("x").into()]));
        let c = Sequence::from(Array::new(vec![Atomic::from("y").into()]));
        assert!(a.deep_equal(&b, utc()).unwrap());
        assert!(!a.deep_equal(&c, utc()).unwrap());
    }

    #[test]
    fn test_structurally_equal_nodes() {
        let build = || {
            let mut builder = DocumentBuilder::new();
            let root = builder.root_assembly("a".into());
            builder.field(root, "b".into(), "text");
            builder.build()
        };
        let one = build().root();
        let two = build().root();
        assert_ne!(one, two);
        assert!(node_deep_equal(&one, &two).unwrap());
    }
}
