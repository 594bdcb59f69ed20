use crate::prelude_internal::*;

/// A key/value annotation on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    key: String,
    value: String,
}

impl Tag {
    /// Reserved property holding a node's tags.
    pub const PROPERTY: &'static str = "Tags";
    pub const KEY_FIELD: &'static str = "Key";
    pub const VALUE_FIELD: &'static str = "Value";

    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Renders as `{ Key: <key>, Value: <value> }`.
    pub fn to_value(&self) -> PropertyValue {
        PropertyValue::Object(PropertyDocument::from_iter([
            (Self::KEY_FIELD.to_string(), self.key.as_str().into()),
            (Self::VALUE_FIELD.to_string(), self.value.as_str().into()),
        ]))
    }

    /// Reads back a rendered tag. Returns `None` for anything else.
    pub fn from_value(value: &PropertyValue) -> Option<Self> {
        let doc = value.as_object()?;
        if doc.len() != 2 {
            return None;
        }
        let key = doc.get(Self::KEY_FIELD)?.as_str()?;
        let value = doc.get(Self::VALUE_FIELD)?.as_str()?;
        Some(Self::new(key, value))
    }
}
