use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use stackform_document::{Primitive, PropertyDocument, PropertyValue, Ref, Referenceable, Tag};

use crate::error::ArgError;
use crate::handle::NodeHandle;

/// The live property document of a node, shared with its handle.
pub type SharedProperties = Rc<RefCell<PropertyDocument>>;

/// An argument passed to [`NodeHandle::invoke`].
#[derive(Clone)]
pub enum Arg {
    Null,
    Value(PropertyValue),
    /// Stored as a reference to the node.
    Node(NodeHandle),
    /// Stored as the reference it produces.
    Referenceable(Rc<dyn Referenceable>),
    /// Elements of a variadic argument, or a sequence value.
    List(Vec<Arg>),
}

impl core::fmt::Debug for Arg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Node(h) => f.debug_tuple("Node").field(h).finish(),
            Self::Referenceable(r) => f.debug_tuple("Referenceable").field(&r.reference()).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl Arg {
    pub fn referenceable(value: impl Referenceable + 'static) -> Self {
        Self::Referenceable(Rc::new(value))
    }

    /// Converts a JSON value; `null` anywhere in it is dropped.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ArgError> {
        Ok(stackform_json::json_to_value(json)?.map_or(Arg::Null, Arg::Value))
    }

    /// Converts any serializable value through its JSON form.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ArgError> {
        Self::from_json(&serde_json::to_value(value)?)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The property value this argument stores as. `None` means "do not store".
    pub fn into_property(self) -> Option<PropertyValue> {
        match self {
            Self::Null => None,
            Self::Value(value) => Some(value),
            Self::Node(handle) => Some(PropertyValue::Ref(handle.reference())),
            Self::Referenceable(r) => Some(PropertyValue::Ref(r.reference())),
            Self::List(items) => Some(PropertyValue::Array(
                items.into_iter().filter_map(Arg::into_property).collect(),
            )),
        }
    }

    /// String form used for tag keys and values. Only scalar-like arguments
    /// have one.
    pub(crate) fn tag_text(&self) -> Option<String> {
        match self {
            Self::Value(PropertyValue::Primitive(p)) => Some(p.to_string()),
            Self::Value(PropertyValue::Ref(r)) => Some(r.target().to_string()),
            Self::Node(handle) => Some(handle.id().to_string()),
            Self::Referenceable(r) => Some(r.reference().target().to_string()),
            Self::Null | Self::Value(_) | Self::List(_) => None,
        }
    }
}

impl From<PropertyValue> for Arg {
    fn from(value: PropertyValue) -> Self {
        Arg::Value(value)
    }
}

impl From<PropertyDocument> for Arg {
    fn from(doc: PropertyDocument) -> Self {
        Arg::Value(PropertyValue::Object(doc))
    }
}

impl From<Ref> for Arg {
    fn from(r: Ref) -> Self {
        Arg::Value(PropertyValue::Ref(r))
    }
}

impl From<Tag> for Arg {
    fn from(tag: Tag) -> Self {
        Arg::Value(tag.to_value())
    }
}

impl From<NodeHandle> for Arg {
    fn from(handle: NodeHandle) -> Self {
        Arg::Node(handle)
    }
}

impl From<&NodeHandle> for Arg {
    fn from(handle: &NodeHandle) -> Self {
        Arg::Node(handle.clone())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Value(b.into())
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Arg::Value(i.into())
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg::Value(i.into())
    }
}

impl From<u32> for Arg {
    fn from(u: u32) -> Self {
        Arg::Value(u.into())
    }
}

impl From<u64> for Arg {
    fn from(u: u64) -> Self {
        Arg::Value(u.into())
    }
}

/// NaN and infinities convert to [`Arg::Null`].
impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Primitive::from_f64(f).map_or(Arg::Null, |p| Arg::Value(p.into()))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(s.into())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Value(s.into())
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Value(s.as_str().into())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Null, Into::into)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

/// What a call on a node handle returns.
#[derive(Debug, Clone)]
pub enum CallResult {
    Unit,
    Node(NodeHandle),
    Ref(Ref),
    Tag(Tag),
    Text(String),
    Bool(bool),
    Hash(u64),
    Properties(SharedProperties),
    /// A property read back by a getter; `None` when it was never set.
    Value(Option<PropertyValue>),
}

impl CallResult {
    pub fn into_node(self) -> Option<NodeHandle> {
        if let Self::Node(handle) = self {
            Some(handle)
        } else {
            None
        }
    }

    pub fn into_ref(self) -> Option<Ref> {
        if let Self::Ref(r) = self {
            Some(r)
        } else {
            None
        }
    }

    pub fn into_tag(self) -> Option<Tag> {
        if let Self::Tag(tag) = self {
            Some(tag)
        } else {
            None
        }
    }

    pub fn into_text(self) -> Option<String> {
        if let Self::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }

    pub fn into_value(self) -> Option<PropertyValue> {
        if let Self::Value(value) = self {
            value
        } else {
            None
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}
