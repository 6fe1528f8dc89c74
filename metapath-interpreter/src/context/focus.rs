use crate::sequence::Item;

/// The focus of an evaluation: the context item with its position in, and
/// the size of, the sequence being iterated.
#[derive(Debug, Clone, PartialEq)]
pub struct Focus {
    item: Item,
    position: usize,
    size: usize,
}

impl Focus {
    /// A focus at a 1-based position.
    pub fn new(item: Item, position: usize, size: usize) -> Self {
        Self {
            item,
            position,
            size,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl From<Item> for Focus {
    fn from(item: Item) -> Self {
        Self::new(item, 1, 1)
    }
}
