//! The backing store of a Stackform node: an ordered property document and the
//! value types that can be stored in it.

/// Primitive and composite property values.
pub mod value;

/// Ordered mapping from property name to value.
pub mod document;

/// Non-owning references to other nodes.
pub mod reference;

/// Key/value annotations stored under the reserved `Tags` property.
pub mod tag;

pub use document::{NotAnArray, PropertyDocument};
pub use reference::{Ref, Referenceable};
pub use tag::Tag;
pub use value::{Primitive, PropertyValue, ValueKind};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::document::PropertyDocument;
    pub use crate::reference::Ref;
    pub use crate::value::{Primitive, PropertyValue};
    pub use thisisplural::Plural;
}
