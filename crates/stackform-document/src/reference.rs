use core::fmt::{self, Display};

use crate::prelude_internal::*;

/// A pointer to another node by identifier.
///
/// The target does not need to exist when the reference is created; it is only
/// resolved when the assembled document is consumed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ref {
    target: String,
}

impl Ref {
    /// Reserved key of the single-entry reference construct.
    pub const KEY: &'static str = "Ref";

    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The reference construct as an explicit document: `{ Ref: <target> }`.
    pub fn to_document(&self) -> PropertyDocument {
        PropertyDocument::from_iter([(Self::KEY.to_string(), self.target.as_str().into())])
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Self::KEY, self.target)
    }
}

/// Values that can stand in for a reference to themselves.
pub trait Referenceable {
    fn reference(&self) -> Ref;
}

impl Referenceable for Ref {
    fn reference(&self) -> Ref {
        self.clone()
    }
}
