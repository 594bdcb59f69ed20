//! Conversion between Stackform property values and `serde_json` values.
//!
//! References render as `{"Ref": "<id>"}` and a single-entry object of that
//! shape is read back as a [`Ref`]. JSON `null` has no property form: it is
//! dropped wherever it appears.

mod config;
mod error;

pub use config::Config;
pub use error::Error;
use serde_json::Value as JsonValue;
use stackform_document::{Primitive, PropertyDocument, PropertyValue, Ref};

/// Top-level key holding a serialized node's resource type.
pub const TYPE_KEY: &str = "Type";
/// Top-level key holding a serialized node's property document.
pub const PROPERTIES_KEY: &str = "Properties";

pub fn value_to_json(value: &PropertyValue) -> JsonValue {
    match value {
        PropertyValue::Primitive(prim) => primitive_to_json(prim),
        PropertyValue::Ref(r) => {
            let mut map = serde_json::Map::new();
            map.insert(Ref::KEY.to_string(), JsonValue::String(r.target().to_string()));
            JsonValue::Object(map)
        }
        PropertyValue::Object(doc) => JsonValue::Object(document_to_json(doc)),
        PropertyValue::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
    }
}

fn primitive_to_json(prim: &Primitive) -> JsonValue {
    match prim {
        Primitive::Bool(b) => JsonValue::Bool(*b),
        Primitive::I64(i) => JsonValue::Number((*i).into()),
        Primitive::U64(u) => JsonValue::Number((*u).into()),
        // Primitive::F64 is finite by construction
        Primitive::F64(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Primitive::String(s) => JsonValue::String(s.clone()),
    }
}

pub fn document_to_json(doc: &PropertyDocument) -> serde_json::Map<String, JsonValue> {
    doc.iter()
        .map(|(name, value)| (name.clone(), value_to_json(value)))
        .collect()
}

/// Renders one node as `{"Type": .., "Properties": {..}}`.
pub fn node_to_json(resource_type: &str, properties: &PropertyDocument, config: &Config) -> JsonValue {
    let mut map = serde_json::Map::new();
    map.insert(TYPE_KEY.to_string(), JsonValue::String(resource_type.to_string()));
    if !(config.omit_empty_properties && properties.is_empty()) {
        map.insert(
            PROPERTIES_KEY.to_string(),
            JsonValue::Object(document_to_json(properties)),
        );
    }
    JsonValue::Object(map)
}

/// Converts a JSON value. Returns `Ok(None)` for `null`.
pub fn json_to_value(json: &JsonValue) -> Result<Option<PropertyValue>, Error> {
    match json {
        JsonValue::Null => Ok(None),
        JsonValue::Bool(b) => Ok(Some(Primitive::Bool(*b).into())),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(Primitive::I64(i).into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Some(Primitive::U64(u).into()))
            } else if let Some(f) = n.as_f64().and_then(Primitive::from_f64) {
                Ok(Some(f.into()))
            } else {
                Err(Error::InvalidNumber(n.to_string()))
            }
        }
        JsonValue::String(s) => Ok(Some(Primitive::String(s.clone()).into())),
        JsonValue::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                if let Some(value) = json_to_value(item)? {
                    values.push(value);
                }
            }
            Ok(Some(PropertyValue::Array(values)))
        }
        JsonValue::Object(obj) => {
            if obj.len() == 1
                && let Some(target) = obj.get(Ref::KEY)
            {
                return match target {
                    JsonValue::String(id) => Ok(Some(PropertyValue::Ref(Ref::new(id.as_str())))),
                    other => Err(Error::InvalidReference(other.to_string())),
                };
            }
            Ok(Some(PropertyValue::Object(json_to_document(obj)?)))
        }
    }
}

pub fn json_to_document(obj: &serde_json::Map<String, JsonValue>) -> Result<PropertyDocument, Error> {
    let mut doc = PropertyDocument::new();
    for (name, value) in obj {
        if let Some(value) = json_to_value(value)? {
            doc.insert(name.as_str(), value);
        }
    }
    Ok(doc)
}

/// Reads a node rendered by [`node_to_json`], returning its resource type and
/// property document. A missing `Properties` entry reads as an empty document.
pub fn json_to_node(json: &JsonValue) -> Result<(String, PropertyDocument), Error> {
    let JsonValue::Object(obj) = json else {
        return Err(Error::InvalidNode(format!("expected an object, found {json}")));
    };
    let resource_type = match obj.get(TYPE_KEY) {
        None => return Err(Error::MissingType),
        Some(JsonValue::String(t)) => t.clone(),
        Some(other) => {
            return Err(Error::InvalidNode(format!(
                "`{TYPE_KEY}` must be a string, found {other}"
            )));
        }
    };
    let properties = match obj.get(PROPERTIES_KEY) {
        None | Some(JsonValue::Null) => PropertyDocument::new(),
        Some(JsonValue::Object(props)) => json_to_document(props)?,
        Some(other) => {
            return Err(Error::InvalidNode(format!(
                "`{PROPERTIES_KEY}` must be an object, found {other}"
            )));
        }
    };
    Ok((resource_type, properties))
}
