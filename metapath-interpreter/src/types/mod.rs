//! The type system: item types and sequence types, and the rules for
//! matching sequences against them.
mod matching;
mod resolve;
mod sequence_type;

pub(crate) use matching::kind_test_matches;
pub(crate) use resolve::{resolve_data_type, resolve_name};
pub use sequence_type::{ArrayTest, ItemType, KindTest, MapTest, Occurrence, SequenceType};
