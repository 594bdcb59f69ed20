//! Schema descriptions: the declared shape a node handle answers to.
//!
//! A [`Schema`] is built once, typically into a `static`, and shared by every
//! node of its resource type. Calls on a handle are classified by looking the
//! method name up in the schema's method table.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{CallError, ConfigurationError};
use crate::handle::NodeHandle;
use crate::naming;
use crate::{Arg, CallResult};

/// Body of a default method. Receives the handle it was invoked on, so it may
/// call other methods of the same schema through [`NodeHandle::invoke`].
pub type DefaultBody =
    Arc<dyn Fn(&NodeHandle, &[Arg]) -> Result<CallResult, CallError> + Send + Sync>;

/// Parameter shape of a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// One value stored under the property.
    Single,
    /// A sequence of values appended under the property.
    Variadic,
}

/// What a setter hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    Unit,
    /// The handle itself, for chaining.
    Node,
}

#[derive(Clone)]
pub enum MethodShape {
    Getter,
    Setter { param: Param, returns: Returns },
    Default { arity: usize, body: DefaultBody },
}

impl core::fmt::Debug for MethodShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Getter => write!(f, "Getter"),
            Self::Setter { param, returns } => f
                .debug_struct("Setter")
                .field("param", param)
                .field("returns", returns)
                .finish(),
            Self::Default { arity, .. } => f
                .debug_struct("Default")
                .field("arity", arity)
                .finish_non_exhaustive(),
        }
    }
}

/// One declared method.
#[derive(Debug, Clone)]
pub struct MethodSpec {
    name: String,
    property: String,
    shape: MethodShape,
}

impl MethodSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property this method reads or writes.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn shape(&self) -> &MethodShape {
        &self.shape
    }
}

#[derive(Debug)]
pub struct Schema {
    name: String,
    resource_types: Vec<String>,
    methods: IndexMap<String, MethodSpec>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            resource_types: Vec::new(),
            methods: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The single resource type this schema declares.
    pub fn resource_type(&self) -> Result<&str, ConfigurationError> {
        match self.resource_types.as_slice() {
            [] => Err(ConfigurationError::MissingResourceType {
                schema: self.name.clone(),
            }),
            [t] if t.is_empty() => Err(ConfigurationError::EmptyResourceType {
                schema: self.name.clone(),
            }),
            [t] => Ok(t.as_str()),
            found => Err(ConfigurationError::ConflictingResourceTypes {
                schema: self.name.clone(),
                found: found.to_vec(),
            }),
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.methods.values()
    }
}

pub struct SchemaBuilder {
    name: String,
    resource_types: Vec<String>,
    methods: IndexMap<String, MethodSpec>,
}

impl SchemaBuilder {
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_types.push(resource_type.into());
        self
    }

    pub fn setter(self, name: impl Into<String>, returns: Returns) -> Self {
        self.method(
            name.into(),
            MethodShape::Setter {
                param: Param::Single,
                returns,
            },
        )
    }

    pub fn variadic_setter(self, name: impl Into<String>, returns: Returns) -> Self {
        self.method(
            name.into(),
            MethodShape::Setter {
                param: Param::Variadic,
                returns,
            },
        )
    }

    /// Declares a zero-argument `get`-prefixed method that reads its property.
    pub fn getter(self, name: impl Into<String>) -> Self {
        self.method(name.into(), MethodShape::Getter)
    }

    pub fn default_method<F>(self, name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&NodeHandle, &[Arg]) -> Result<CallResult, CallError> + Send + Sync + 'static,
    {
        self.method(
            name.into(),
            MethodShape::Default {
                arity,
                body: Arc::new(body),
            },
        )
    }

    /// Overrides the property name derived for an already declared method.
    pub fn property_name(mut self, method: &str, property: impl Into<String>) -> Self {
        if let Some(spec) = self.methods.get_mut(method) {
            spec.property = property.into();
        }
        self
    }

    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema {
            name: self.name,
            resource_types: self.resource_types,
            methods: self.methods,
        })
    }

    fn method(mut self, name: String, shape: MethodShape) -> Self {
        let property = naming::property_name(&name);
        self.methods.insert(
            name.clone(),
            MethodSpec {
                name,
                property,
                shape,
            },
        );
        self
    }
}
