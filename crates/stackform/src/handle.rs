//! The resource adapter and the node handles it produces.
//!
//! Every call on a [`NodeHandle`] goes through [`NodeHandle::invoke`], which
//! classifies it against the schema's method table and translates it into a
//! read or a mutation of the node's property document.

use std::cell::{OnceCell, RefCell};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use stackform_document::{PropertyDocument, PropertyValue, Ref, Referenceable, Tag};
use stackform_json::Config;

use crate::arg::{Arg, CallResult, SharedProperties};
use crate::error::{CallError, ConfigurationError};
use crate::naming;
use crate::schema::{DefaultBody, MethodShape, MethodSpec, Param, Returns, Schema};

const REF_METHOD: &str = "ref";
const TAG_METHOD: &str = "tag";

struct NodeState {
    schema: Arc<Schema>,
    id: String,
    resource_type: String,
    properties: SharedProperties,
}

/// Owns one node's state and hands out its handle.
pub struct ResourceAdapter {
    state: Rc<NodeState>,
    handle: OnceCell<NodeHandle>,
}

impl ResourceAdapter {
    /// Creates an empty node of the schema's resource type.
    pub fn new(schema: Arc<Schema>, id: impl Into<String>) -> Result<Self, ConfigurationError> {
        let resource_type = schema.resource_type()?.to_string();
        let id = id.into();
        tracing::debug!(schema = schema.name(), %id, %resource_type, "created resource adapter");
        Ok(Self::from_state(NodeState {
            schema,
            id,
            resource_type,
            properties: SharedProperties::default(),
        }))
    }

    /// Recreates a node from previously produced state. The resource type is
    /// taken as given.
    pub fn rehydrate(
        schema: Arc<Schema>,
        resource_type: impl Into<String>,
        id: impl Into<String>,
        properties: PropertyDocument,
    ) -> Self {
        let resource_type = resource_type.into();
        let id = id.into();
        tracing::debug!(
            schema = schema.name(),
            %id,
            %resource_type,
            properties = properties.len(),
            "rehydrated resource adapter"
        );
        Self::from_state(NodeState {
            schema,
            id,
            resource_type,
            properties: Rc::new(RefCell::new(properties)),
        })
    }

    /// Rehydrates a node from its serialized `{"Type": .., "Properties": ..}` form.
    pub fn from_json(
        schema: Arc<Schema>,
        id: impl Into<String>,
        json: &serde_json::Value,
    ) -> Result<Self, ConfigurationError> {
        let (resource_type, properties) = stackform_json::json_to_node(json)?;
        Ok(Self::rehydrate(schema, resource_type, id, properties))
    }

    fn from_state(state: NodeState) -> Self {
        Self {
            state: Rc::new(state),
            handle: OnceCell::new(),
        }
    }

    /// Returns the handle bound to this adapter. Always the same handle.
    pub fn produce_handle(&self) -> NodeHandle {
        self.handle
            .get_or_init(|| NodeHandle {
                state: Rc::clone(&self.state),
            })
            .clone()
    }

    pub fn id(&self) -> &str {
        &self.state.id
    }

    pub fn resource_type(&self) -> &str {
        &self.state.resource_type
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.state.schema
    }

    pub fn properties(&self) -> SharedProperties {
        Rc::clone(&self.state.properties)
    }
}

/// A classified call.
#[derive(Clone, Copy)]
enum Call<'s> {
    Ref,
    Id,
    Type,
    Properties,
    Getter(&'s MethodSpec),
    Equals,
    ToString,
    Hash,
    Tag,
    Default(&'s DefaultBody),
    Setter(&'s MethodSpec, Param, Returns),
}

impl Call<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Call::Ref => "ref",
            Call::Id | Call::Type | Call::Properties => "meta",
            Call::Getter(_) => "getter",
            Call::Equals | Call::ToString | Call::Hash => "object",
            Call::Tag => "tag",
            Call::Default(_) => "default",
            Call::Setter(_, Param::Single, _) => "setter",
            Call::Setter(_, Param::Variadic, _) => "array-setter",
        }
    }
}

/// A live node. Clones share the same node; equality is identity.
#[derive(Clone)]
pub struct NodeHandle {
    state: Rc<NodeState>,
}

impl NodeHandle {
    pub fn id(&self) -> &str {
        &self.state.id
    }

    pub fn resource_type(&self) -> &str {
        &self.state.resource_type
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.state.schema
    }

    /// The live property document.
    pub fn properties(&self) -> SharedProperties {
        Rc::clone(&self.state.properties)
    }

    pub fn ptr_eq(&self, other: &NodeHandle) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Appends a tag to the reserved `Tags` property.
    ///
    /// Fails with [`CallError::NotAnArray`] if `Tags` was set to a
    /// non-sequence value, which is then kept as it is.
    pub fn tag(&self, key: impl Into<String>, value: impl Into<String>) -> Result<Tag, CallError> {
        let tag = Tag::new(key, value);
        self.append(Tag::PROPERTY, vec![tag.to_value()])?;
        Ok(tag)
    }

    /// Tags set on this node, in the order they were added.
    pub fn tags(&self) -> Vec<Tag> {
        self.state
            .properties
            .borrow()
            .get(Tag::PROPERTY)
            .and_then(|tags| tags.as_array())
            .map(|tags| tags.iter().filter_map(Tag::from_value).collect())
            .unwrap_or_default()
    }

    pub fn to_json(&self, config: &Config) -> serde_json::Value {
        stackform_json::node_to_json(
            &self.state.resource_type,
            &self.state.properties.borrow(),
            config,
        )
    }

    /// Routes a call by method name.
    ///
    /// Calls are classified in this order: identity getters (`ref`, `getId`,
    /// `getType`, `getProperties`) and declared getters; object behaviors
    /// (`eq`, `to_string`, `hash`); `tag(key, value)`; declared default
    /// methods; declared setters. Anything else is
    /// [`CallError::UnsupportedOperation`].
    pub fn invoke(&self, method: &str, args: Vec<Arg>) -> Result<CallResult, CallError> {
        let call = self.classify(method, args.len())?;
        tracing::trace!(
            schema = self.state.schema.name(),
            id = %self.state.id,
            method,
            kind = call.kind(),
            "invoke"
        );
        match call {
            Call::Ref => Ok(CallResult::Ref(self.reference())),
            Call::Id => Ok(CallResult::Text(self.state.id.clone())),
            Call::Type => Ok(CallResult::Text(self.state.resource_type.clone())),
            Call::Properties => Ok(CallResult::Properties(self.properties())),
            Call::Getter(spec) => Ok(CallResult::Value(
                self.state.properties.borrow().get(spec.property()).cloned(),
            )),
            Call::Equals => Ok(CallResult::Bool(
                matches!(&args[0], Arg::Node(other) if self == other),
            )),
            Call::ToString => Ok(CallResult::Text(self.to_string())),
            Call::Hash => Ok(CallResult::Hash(
                ahash::RandomState::with_seeds(0, 0, 0, 0).hash_one(self),
            )),
            Call::Tag => self.invoke_tag(method, &args),
            Call::Default(body) => body(self, &args),
            Call::Setter(spec, param, returns) => {
                let mut args = args;
                if let Some(value) = args.pop() {
                    self.set(spec.property(), param, value)?;
                }
                Ok(match returns {
                    Returns::Node => CallResult::Node(self.clone()),
                    Returns::Unit => CallResult::Unit,
                })
            }
        }
    }

    fn classify<'s>(&'s self, method: &str, arity: usize) -> Result<Call<'s>, CallError> {
        let schema = &self.state.schema;
        if arity == 0 {
            if method == REF_METHOD {
                return Ok(Call::Ref);
            }
            if naming::is_getter(method) {
                match naming::property_name(method).as_str() {
                    "Id" => return Ok(Call::Id),
                    "Type" => return Ok(Call::Type),
                    "Properties" => return Ok(Call::Properties),
                    _ => {}
                }
                if let Some(spec) = schema.method(method)
                    && matches!(spec.shape(), MethodShape::Getter)
                {
                    return Ok(Call::Getter(spec));
                }
            }
        }
        match (method, arity) {
            ("eq" | "equals", 1) => return Ok(Call::Equals),
            ("to_string" | "toString", 0) => return Ok(Call::ToString),
            ("hash" | "hashCode", 0) => return Ok(Call::Hash),
            (TAG_METHOD, 2) => return Ok(Call::Tag),
            _ => {}
        }
        match schema.method(method).map(|spec| (spec, spec.shape())) {
            Some((_, MethodShape::Default { arity: declared, body })) if *declared == arity => {
                Ok(Call::Default(body))
            }
            Some((spec, MethodShape::Setter { param, returns })) if arity == 1 => {
                Ok(Call::Setter(spec, *param, *returns))
            }
            _ => Err(self.unsupported(method, arity)),
        }
    }

    fn invoke_tag(&self, method: &str, args: &[Arg]) -> Result<CallResult, CallError> {
        let text = |index: usize| {
            args[index]
                .tag_text()
                .ok_or_else(|| CallError::InvalidArgument {
                    method: method.to_string(),
                    index,
                    reason: format!("tag arguments must be scalar, found {:?}", args[index]),
                })
        };
        let key = text(0)?;
        let value = text(1)?;
        Ok(CallResult::Tag(self.tag(key, value)?))
    }

    fn set(&self, property: &str, param: Param, value: Arg) -> Result<(), CallError> {
        match (param, value) {
            (Param::Variadic, Arg::Null) => Ok(()),
            (Param::Variadic, Arg::List(items)) => self.append(
                property,
                items.into_iter().filter_map(Arg::into_property).collect(),
            ),
            (Param::Variadic, item) => {
                self.append(property, item.into_property().into_iter().collect())
            }
            (Param::Single, value) => {
                if let Some(value) = value.into_property() {
                    self.state.properties.borrow_mut().insert(property, value);
                }
                Ok(())
            }
        }
    }

    fn append(&self, property: &str, items: Vec<PropertyValue>) -> Result<(), CallError> {
        let mut properties = self.state.properties.borrow_mut();
        let array = properties
            .array_mut(property)
            .map_err(|err| CallError::NotAnArray {
                property: property.to_string(),
                found: err.found,
            })?;
        array.extend(items);
        Ok(())
    }

    fn unsupported(&self, method: &str, arity: usize) -> CallError {
        CallError::UnsupportedOperation {
            schema: self.state.schema.name().to_string(),
            method: method.to_string(),
            arity,
        }
    }
}

impl Referenceable for NodeHandle {
    fn reference(&self) -> Ref {
        Ref::new(self.state.id.as_str())
    }
}

impl PartialEq for NodeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for NodeHandle {}

impl Hash for NodeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.state).hash(state);
    }
}

impl core::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.state.id, self.state.resource_type)
    }
}

impl core::fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeHandle")
            .field("id", &self.state.id)
            .field("resource_type", &self.state.resource_type)
            .field("properties", &self.state.properties.try_borrow().ok())
            .finish()
    }
}
