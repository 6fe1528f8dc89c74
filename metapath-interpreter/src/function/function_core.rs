use super::{Array, Map};

/// A function item. Maps and arrays are the function items the language can
/// construct; both can be called with a key or a position.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    Map(Map),
    Array(Array),
}

impl Function {
    pub fn display_representation(&self) -> String {
        match self {
            Function::Map(map) => map.display_representation(),
            Function::Array(array) => array.display_representation(),
        }
    }
}
