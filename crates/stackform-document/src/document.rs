use indexmap::IndexMap;
use thiserror::Error;

use crate::prelude_internal::*;
use crate::value::ValueKind;

/// A property that was expected to hold a sequence holds something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected an array, found {found}")]
pub struct NotAnArray {
    pub found: ValueKind,
}

/// The mutable state of one node: property name to value, in insertion order.
#[derive(Debug, Clone, PartialEq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct PropertyDocument(IndexMap<String, PropertyValue>);

impl Default for PropertyDocument {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyDocument {
    fn from_iter<T: IntoIterator<Item = (String, PropertyValue)>>(iter: T) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

impl PropertyDocument {
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyValue> {
        self.0.get_mut(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets `name`, keeping its original position if it was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
        self.0.insert(name.into(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the sequence stored under `name`, creating an empty one if the
    /// property is absent.
    ///
    /// A non-sequence value already stored under `name` is left untouched and
    /// reported as [`NotAnArray`].
    pub fn array_mut(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Vec<PropertyValue>, NotAnArray> {
        let slot = self
            .0
            .entry(name.into())
            .or_insert_with(|| PropertyValue::Array(Vec::new()));
        let found = slot.kind();
        let PropertyValue::Array(items) = slot else {
            return Err(NotAnArray { found });
        };
        Ok(items)
    }
}
