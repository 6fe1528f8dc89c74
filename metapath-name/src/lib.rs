mod name;
mod namespaces;

pub use name::Name;
pub use namespaces::{
    Error, NameKind, NamespaceLookup, Namespaces, ARRAY_NAMESPACE, EXTENDED_NAMESPACE,
    FN_NAMESPACE, MAP_NAMESPACE, MATH_NAMESPACE, METAPATH_NAMESPACE, STATIC_NAMESPACES,
};
