//! Describe CloudFormation-style resources through declared schemas.
//!
//! A [`Schema`] names the accessors a resource answers to. A
//! [`ResourceAdapter`] built from a schema and a node identifier produces a
//! [`NodeHandle`]; every call on the handle is translated into a read or a
//! mutation of the node's [`PropertyDocument`]. The [`resource!`] macro
//! generates typed wrappers over handles from the same description.
//!
//! ```
//! use stackform::{Arg, ResourceAdapter, Returns, Schema};
//!
//! let schema = Schema::builder("Instance")
//!     .resource_type("AWS::EC2::Instance")
//!     .setter("imageId", Returns::Node)
//!     .build();
//! let adapter = ResourceAdapter::new(schema, "Web1").unwrap();
//! let web = adapter.produce_handle();
//! web.invoke("imageId", vec![Arg::from("ami-123")]).unwrap();
//! assert!(web.properties().borrow().contains_key("ImageId"));
//! ```

mod arg;
mod error;
mod handle;
/// Property-name derivation from accessor names.
pub mod naming;
mod resource;
/// Schema descriptions and their builder.
pub mod schema;

pub use arg::{Arg, CallResult, SharedProperties};
pub use error::{ArgError, CallError, ConfigurationError};
pub use handle::{NodeHandle, ResourceAdapter};
pub use resource::Resource;
pub use schema::{DefaultBody, MethodShape, MethodSpec, Param, Returns, Schema, SchemaBuilder};
pub use stackform_document::{
    Primitive, PropertyDocument, PropertyValue, Ref, Referenceable, Tag, ValueKind,
};
pub use stackform_json::Config;
