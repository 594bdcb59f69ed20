use crate::prelude_internal::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    I64,
    U64,
    F64,
    String,
    Ref,
    Object,
    Array,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::I64 => write!(f, "i64"),
            Self::U64 => write!(f, "u64"),
            Self::F64 => write!(f, "f64"),
            Self::String => write!(f, "string"),
            Self::Ref => write!(f, "ref"),
            Self::Object => write!(f, "object"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// A scalar property value.
///
/// There is no null primitive: an unset property is simply absent from its
/// [`PropertyDocument`].
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    I64(i64),
    /// Only holds values above `i64::MAX`. Use [`Primitive::from_u64`] to
    /// build one.
    U64(u64),
    /// Always finite. Use [`Primitive::from_f64`] to build one.
    F64(f64),
    String(String),
}

impl Primitive {
    /// Returns `None` for NaN and infinities, which have no document form.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self::F64(value))
    }

    /// Integers that fit in `i64` are stored as [`Primitive::I64`], matching
    /// how they read back from JSON.
    pub fn from_u64(value: u64) -> Self {
        i64::try_from(value).map_or(Self::U64(value), Self::I64)
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::I64(_) => ValueKind::I64,
            Self::U64(_) => ValueKind::U64,
            Self::F64(_) => ValueKind::F64,
            Self::String(_) => ValueKind::String,
        }
    }
}

impl core::fmt::Display for Primitive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::I64(i) => write!(f, "{i}"),
            Self::U64(u) => write!(f, "{u}"),
            Self::F64(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// A value stored under a property name.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Primitive(Primitive),
    Ref(Ref),
    Object(PropertyDocument),
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Primitive(p) => p.kind(),
            Self::Ref(_) => ValueKind::Ref,
            Self::Object(_) => ValueKind::Object,
            Self::Array(_) => ValueKind::Array,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::Primitive(p) = self {
            p.as_str()
        } else {
            None
        }
    }

    pub fn as_reference(&self) -> Option<&Ref> {
        if let Self::Ref(r) = self {
            Some(r)
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&PropertyDocument> {
        if let Self::Object(doc) = self {
            Some(doc)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        if let Self::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }
}

impl From<Primitive> for PropertyValue {
    fn from(p: Primitive) -> Self {
        PropertyValue::Primitive(p)
    }
}

impl From<Ref> for PropertyValue {
    fn from(r: Ref) -> Self {
        PropertyValue::Ref(r)
    }
}

impl From<PropertyDocument> for PropertyValue {
    fn from(doc: PropertyDocument) -> Self {
        PropertyValue::Object(doc)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(items)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Primitive::Bool(b).into()
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        Primitive::I64(i64::from(i)).into()
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Primitive::I64(i).into()
    }
}

impl From<u32> for PropertyValue {
    fn from(u: u32) -> Self {
        Primitive::I64(i64::from(u)).into()
    }
}

impl From<u64> for PropertyValue {
    fn from(u: u64) -> Self {
        Primitive::from_u64(u).into()
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Primitive::String(s).into()
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Primitive::String(s.to_string()).into()
    }
}
