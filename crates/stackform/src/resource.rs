use stackform_document::Tag;
use stackform_json::Config;

use crate::arg::SharedProperties;
use crate::error::CallError;
use crate::handle::NodeHandle;

/// Surface shared by node handles and the typed wrappers generated by
/// [`resource!`](crate::resource).
pub trait Resource {
    fn handle(&self) -> &NodeHandle;

    fn id(&self) -> &str {
        self.handle().id()
    }

    fn resource_type(&self) -> &str {
        self.handle().resource_type()
    }

    fn properties(&self) -> SharedProperties {
        self.handle().properties()
    }

    fn tag(&self, key: impl Into<String>, value: impl Into<String>) -> Result<Tag, CallError>
    where
        Self: Sized,
    {
        self.handle().tag(key, value)
    }

    fn to_json(&self, config: &Config) -> serde_json::Value {
        self.handle().to_json(config)
    }
}

impl Resource for NodeHandle {
    fn handle(&self) -> &NodeHandle {
        self
    }
}

/// Declares a typed resource wrapper together with its [`Schema`](crate::Schema).
///
/// Every generated method routes through [`NodeHandle::invoke`], so the
/// wrapper and a dynamically driven handle behave identically.
///
/// - `scalars` declare single-value setters,
/// - `lists` declare variadic setters taking any iterator of arguments,
/// - `getters` declare `get_`-prefixed readers,
/// - `defaults` bind a method of the given parameters to a plain function
///   `fn(&NodeHandle, &[Arg]) -> Result<CallResult, CallError>`.
///
/// Setters return the wrapper for chaining. Property names are derived from
/// the method names, so `image_id` writes `ImageId`.
///
/// # Example
///
/// ```
/// use stackform::{Arg, CallError, CallResult, NodeHandle};
///
/// fn name(handle: &NodeHandle, args: &[Arg]) -> Result<CallResult, CallError> {
///     handle.invoke("tag", vec![Arg::from("Name"), args[0].clone()])?;
///     Ok(CallResult::Node(handle.clone()))
/// }
///
/// stackform::resource! {
///     /// An EC2 instance.
///     pub struct Instance: "AWS::EC2::Instance" {
///         scalars { image_id, instance_type, subnet_id }
///         lists { security_group_ids }
///         getters { get_image_id }
///         defaults { name(name) => name; }
///     }
/// }
///
/// let web = Instance::new("Web1").unwrap();
/// web.image_id("ami-123").unwrap().security_group_ids(["sg-1", "sg-2"]).unwrap();
/// web.name("web").unwrap();
/// assert_eq!(web.get_image_id().unwrap(), Some("ami-123".into()));
/// assert_eq!(web.tags()[0].value(), "web");
/// ```
#[macro_export]
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $resource_type:literal {
            $( scalars { $($scalar:ident),* $(,)? } )?
            $( lists { $($list:ident),* $(,)? } )?
            $( getters { $($getter:ident),* $(,)? } )?
            $( defaults { $( $default:ident ( $($param:ident),* ) => $body:path ; )* } )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name($crate::NodeHandle);

        impl $name {
            pub const RESOURCE_TYPE: &'static str = $resource_type;

            pub fn schema() -> ::std::sync::Arc<$crate::Schema> {
                static SCHEMA: ::std::sync::LazyLock<::std::sync::Arc<$crate::Schema>> =
                    ::std::sync::LazyLock::new(|| {
                        let builder = $crate::Schema::builder(stringify!($name))
                            .resource_type($resource_type);
                        $($(
                            let builder = builder.setter(stringify!($scalar), $crate::Returns::Node);
                        )*)?
                        $($(
                            let builder =
                                builder.variadic_setter(stringify!($list), $crate::Returns::Node);
                        )*)?
                        $($(
                            let builder = builder.getter(stringify!($getter));
                        )*)?
                        $($(
                            let builder = builder.default_method(
                                stringify!($default),
                                <[&str]>::len(&[$(stringify!($param)),*]),
                                $body,
                            );
                        )*)?
                        builder.build()
                    });
                ::std::sync::Arc::clone(&SCHEMA)
            }

            pub fn new(id: impl Into<String>) -> Result<Self, $crate::ConfigurationError> {
                let adapter = $crate::ResourceAdapter::new(Self::schema(), id)?;
                Ok(Self(adapter.produce_handle()))
            }

            /// Wraps a handle of the same resource type.
            pub fn from_handle(handle: $crate::NodeHandle) -> Option<Self> {
                (handle.resource_type() == $resource_type).then_some(Self(handle))
            }

            pub fn into_handle(self) -> $crate::NodeHandle {
                self.0
            }

            pub fn tags(&self) -> Vec<$crate::Tag> {
                self.0.tags()
            }

            $($(
                pub fn $scalar(&self, value: impl Into<$crate::Arg>) -> Result<Self, $crate::CallError> {
                    self.0.invoke(stringify!($scalar), vec![value.into()])?;
                    Ok(self.clone())
                }
            )*)?

            $($(
                pub fn $list<I>(&self, values: I) -> Result<Self, $crate::CallError>
                where
                    I: IntoIterator,
                    I::Item: Into<$crate::Arg>,
                {
                    let values = values.into_iter().map(Into::into).collect();
                    self.0.invoke(stringify!($list), vec![$crate::Arg::List(values)])?;
                    Ok(self.clone())
                }
            )*)?

            $($(
                pub fn $getter(&self) -> Result<Option<$crate::PropertyValue>, $crate::CallError> {
                    Ok(self.0.invoke(stringify!($getter), Vec::new())?.into_value())
                }
            )*)?

            $($(
                pub fn $default(
                    &self,
                    $($param: impl Into<$crate::Arg>),*
                ) -> Result<$crate::CallResult, $crate::CallError> {
                    self.0.invoke(stringify!($default), vec![$($param.into()),*])
                }
            )*)?
        }

        impl $crate::Resource for $name {
            fn handle(&self) -> &$crate::NodeHandle {
                &self.0
            }
        }

        impl $crate::Referenceable for $name {
            fn reference(&self) -> $crate::Ref {
                $crate::Referenceable::reference(&self.0)
            }
        }

        impl From<&$name> for $crate::Arg {
            fn from(resource: &$name) -> Self {
                $crate::Arg::Node(resource.0.clone())
            }
        }

        impl From<$name> for $crate::Arg {
            fn from(resource: $name) -> Self {
                $crate::Arg::Node(resource.0)
            }
        }
    };
}
