use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use stackform::{
    Arg, CallError, CallResult, Config, ConfigurationError, NodeHandle, PropertyValue, Ref,
    ResourceAdapter, Returns, Schema, Tag, ValueKind,
};

fn name_and_tag(handle: &NodeHandle, args: &[Arg]) -> Result<CallResult, CallError> {
    handle.invoke("setKeyName", vec![args[0].clone()])?;
    handle.invoke("tag", vec![Arg::from("Name"), args[0].clone()])?;
    Ok(CallResult::Node(handle.clone()))
}

fn validate(handle: &NodeHandle, _args: &[Arg]) -> Result<CallResult, CallError> {
    if !handle.properties().borrow().contains_key("ImageId") {
        return Err(CallError::Default {
            method: "validate".to_string(),
            message: "no image set".to_string(),
        });
    }
    Ok(CallResult::Unit)
}

fn instance_schema() -> Arc<Schema> {
    Schema::builder("Instance")
        .resource_type("AWS::EC2::Instance")
        .setter("imageId", Returns::Node)
        .setter("instanceType", Returns::Node)
        .setter("setKeyName", Returns::Unit)
        .setter("subnetId", Returns::Node)
        .variadic_setter("securityGroupIds", Returns::Node)
        .variadic_setter("availabilityZone", Returns::Node)
        .getter("getImageId")
        .default_method("name", 1, name_and_tag)
        .default_method("validate", 0, validate)
        .build()
}

fn instance(id: &str) -> NodeHandle {
    ResourceAdapter::new(instance_schema(), id)
        .unwrap()
        .produce_handle()
}

#[test]
fn test_produce_handle_is_memoized() {
    let adapter = ResourceAdapter::new(instance_schema(), "Web1").unwrap();
    let first = adapter.produce_handle();
    let second = adapter.produce_handle();
    assert!(first.ptr_eq(&second));
}

#[test]
fn test_missing_resource_type_fails_at_construction() {
    let schema = Schema::builder("Untyped")
        .setter("imageId", Returns::Node)
        .build();
    let result = ResourceAdapter::new(schema, "Web1");
    assert!(matches!(
        result,
        Err(ConfigurationError::MissingResourceType { .. })
    ));
}

#[test]
fn test_empty_resource_type_fails_at_construction() {
    let schema = Schema::builder("Blank").resource_type("").build();
    let result = ResourceAdapter::new(schema, "Web1");
    assert_eq!(
        result.err(),
        Some(ConfigurationError::EmptyResourceType {
            schema: "Blank".to_string()
        })
    );
}

#[test]
fn test_property_name_independent_of_accessor_verb() {
    let schema = Schema::builder("Thing")
        .resource_type("Custom::Thing")
        .setter("setFoo", Returns::Unit)
        .setter("bar", Returns::Unit)
        .setter("set_baz", Returns::Unit)
        .getter("getFoo")
        .build();
    let thing = ResourceAdapter::new(schema, "T").unwrap().produce_handle();
    thing.invoke("setFoo", vec![Arg::from(1)]).unwrap();
    thing.invoke("bar", vec![Arg::from(2)]).unwrap();
    thing.invoke("set_baz", vec![Arg::from(3)]).unwrap();
    let keys: Vec<String> = thing
        .properties()
        .borrow()
        .keys()
        .map(String::from)
        .collect();
    assert_eq!(keys, vec!["Foo", "Bar", "Baz"]);
    let read = thing.invoke("getFoo", vec![]).unwrap().into_value();
    assert_eq!(read, Some(PropertyValue::from(1)));
}

#[test]
fn test_null_setter_is_noop() {
    let web = instance("Web1");
    web.invoke("imageId", vec![Arg::from("ami-1")]).unwrap();
    let before = web.properties().borrow().len();
    web.invoke("instanceType", vec![Arg::Null]).unwrap();
    web.invoke("subnetId", vec![Arg::from(None::<String>)]).unwrap();
    assert_eq!(web.properties().borrow().len(), before);
    assert!(!web.properties().borrow().contains_key("InstanceType"));
}

#[test]
fn test_variadic_setter_drops_nulls_in_order() {
    let web = instance("Web1");
    web.invoke(
        "securityGroupIds",
        vec![Arg::List(vec![
            Arg::from("sg-1"),
            Arg::Null,
            Arg::from("sg-2"),
            Arg::Null,
            Arg::from("sg-3"),
        ])],
    )
    .unwrap();
    assert_eq!(
        web.to_json(&Config::default())["Properties"]["SecurityGroupIds"],
        json!(["sg-1", "sg-2", "sg-3"])
    );
}

#[test]
fn test_variadic_setter_with_only_nulls_yields_empty_sequence() {
    let web = instance("Web1");
    web.invoke(
        "securityGroupIds",
        vec![Arg::List(vec![Arg::Null, Arg::Null])],
    )
    .unwrap();
    assert_eq!(
        web.to_json(&Config::default())["Properties"],
        json!({ "SecurityGroupIds": [] })
    );
}

#[test]
fn test_variadic_setter_appends_across_calls() {
    let web = instance("Web1");
    web.invoke("availabilityZone", vec![Arg::from(vec!["us-east-1a"])])
        .unwrap();
    web.invoke("availabilityZone", vec![Arg::from("us-east-1b")])
        .unwrap();
    assert_eq!(
        web.to_json(&Config::default())["Properties"]["AvailabilityZone"],
        json!(["us-east-1a", "us-east-1b"])
    );
}

#[test]
fn test_tags_keep_call_order() {
    let web = instance("Web1");
    let first = web
        .invoke("tag", vec![Arg::from("Name"), Arg::from("prod")])
        .unwrap()
        .into_tag();
    web.invoke("tag", vec![Arg::from("Env"), Arg::from("test")])
        .unwrap();
    assert_eq!(first, Some(Tag::new("Name", "prod")));
    assert_eq!(
        web.to_json(&Config::default())["Properties"]["Tags"],
        json!([
            { "Key": "Name", "Value": "prod" },
            { "Key": "Env", "Value": "test" }
        ])
    );
}

#[test]
fn test_tag_arguments_are_coerced_to_strings() {
    let web = instance("Web1");
    web.invoke("tag", vec![Arg::from("Port"), Arg::from(8080)])
        .unwrap();
    assert_eq!(web.tags(), vec![Tag::new("Port", "8080")]);
}

#[test]
fn test_null_tag_argument_is_rejected() {
    let web = instance("Web1");
    let result = web.invoke("tag", vec![Arg::from("Name"), Arg::Null]);
    assert!(matches!(
        result,
        Err(CallError::InvalidArgument { index: 1, .. })
    ));
    assert!(web.tags().is_empty());
}

#[test]
fn test_tag_keeps_non_sequence_tags_property() {
    let schema = Schema::builder("Topic")
        .resource_type("AWS::SNS::Topic")
        .setter("tags", Returns::Node)
        .build();
    let topic = ResourceAdapter::new(schema, "Alerts").unwrap().produce_handle();
    topic.invoke("tags", vec![Arg::from("keep-me")]).unwrap();

    let result = topic.invoke("tag", vec![Arg::from("Env"), Arg::from("test")]);
    assert_eq!(
        result.err(),
        Some(CallError::NotAnArray {
            property: "Tags".to_string(),
            found: ValueKind::String,
        })
    );
    assert!(topic.tag("Env", "test").is_err());
    assert_eq!(
        topic.to_json(&Config::default())["Properties"],
        json!({ "Tags": "keep-me" })
    );
}

#[test]
fn test_variadic_setter_keeps_scalar_property() {
    let schema = Schema::builder("Group")
        .resource_type("AWS::EC2::SecurityGroup")
        .setter("groupName", Returns::Node)
        .variadic_setter("setGroupNames", Returns::Node)
        .property_name("setGroupNames", "GroupName")
        .build();
    let group = ResourceAdapter::new(schema, "Sg").unwrap().produce_handle();
    group.invoke("groupName", vec![Arg::from("web")]).unwrap();
    let result = group.invoke("setGroupNames", vec![Arg::from(vec!["db"])]);
    assert!(matches!(
        result,
        Err(CallError::NotAnArray { found: ValueKind::String, .. })
    ));
    assert_eq!(
        group.properties().borrow().get("GroupName"),
        Some(&PropertyValue::from("web"))
    );
}

#[test]
fn test_ref_renders_reference_construct() {
    let web = instance("Web1");
    let r = web.invoke("ref", vec![]).unwrap().into_ref().unwrap();
    assert_eq!(r, Ref::new("Web1"));
    assert_eq!(
        stackform_json::value_to_json(&PropertyValue::Ref(r)),
        json!({ "Ref": "Web1" })
    );
}

#[test]
fn test_ref_and_node_argument_store_identically() {
    let subnet = ResourceAdapter::new(
        Schema::builder("Subnet")
            .resource_type("AWS::EC2::Subnet")
            .build(),
        "Subnet1",
    )
    .unwrap()
    .produce_handle();
    let by_ref = instance("A");
    let by_node = instance("B");
    let r = subnet.invoke("ref", vec![]).unwrap().into_ref().unwrap();
    by_ref.invoke("subnetId", vec![Arg::from(r)]).unwrap();
    by_node.invoke("subnetId", vec![Arg::from(&subnet)]).unwrap();
    assert_eq!(
        by_ref.properties().borrow().get("SubnetId"),
        by_node.properties().borrow().get("SubnetId")
    );
    assert_eq!(
        by_node.to_json(&Config::default())["Properties"]["SubnetId"],
        json!({ "Ref": "Subnet1" })
    );
}

#[test]
fn test_identity_getters() {
    let web = instance("Web1");
    web.invoke("imageId", vec![Arg::from("ami-1")]).unwrap();
    assert_eq!(
        web.invoke("getId", vec![]).unwrap().into_text().as_deref(),
        Some("Web1")
    );
    assert_eq!(
        web.invoke("getid", vec![]).unwrap().into_text().as_deref(),
        Some("Web1")
    );
    assert_eq!(
        web.invoke("get_type", vec![]).unwrap().into_text().as_deref(),
        Some("AWS::EC2::Instance")
    );
    let CallResult::Properties(props) = web.invoke("getProperties", vec![]).unwrap() else {
        panic!("expected the property document");
    };
    // The document is live: later setters show up through it.
    web.invoke("instanceType", vec![Arg::from("t2.micro")])
        .unwrap();
    assert_eq!(props.borrow().len(), 2);
}

#[test]
fn test_undeclared_getter_is_unsupported() {
    let web = instance("Web1");
    assert!(matches!(
        web.invoke("getUserData", vec![]),
        Err(CallError::UnsupportedOperation { arity: 0, .. })
    ));
}

#[test]
fn test_setter_returns_handle_only_when_declared() {
    let web = instance("Web1");
    let chained = web.invoke("imageId", vec![Arg::from("ami-1")]).unwrap();
    assert!(chained.into_node().unwrap().ptr_eq(&web));
    let unit = web.invoke("setKeyName", vec![Arg::from("ops")]).unwrap();
    assert!(unit.is_unit());
}

#[test]
fn test_default_method_calls_back_into_handle() {
    let web = instance("Web1");
    let result = web.invoke("name", vec![Arg::from("web")]).unwrap();
    assert!(result.into_node().unwrap().ptr_eq(&web));
    assert_eq!(
        web.to_json(&Config::default()),
        json!({
            "Type": "AWS::EC2::Instance",
            "Properties": {
                "KeyName": "web",
                "Tags": [{ "Key": "Name", "Value": "web" }]
            }
        })
    );
}

#[test]
fn test_default_method_error_propagates() {
    let web = instance("Web1");
    assert_eq!(
        web.invoke("validate", vec![]).err(),
        Some(CallError::Default {
            method: "validate".to_string(),
            message: "no image set".to_string(),
        })
    );
    web.invoke("imageId", vec![Arg::from("ami-1")]).unwrap();
    assert!(web.invoke("validate", vec![]).unwrap().is_unit());
}

#[test]
fn test_object_behaviors() {
    let web = instance("Web1");
    let other = instance("Web1");
    let same = web.invoke("eq", vec![Arg::from(&web)]).unwrap();
    let different = web.invoke("equals", vec![Arg::from(&other)]).unwrap();
    assert!(matches!(same, CallResult::Bool(true)));
    assert!(matches!(different, CallResult::Bool(false)));
    assert_eq!(
        web.invoke("to_string", vec![]).unwrap().into_text().as_deref(),
        Some("Web1 (AWS::EC2::Instance)")
    );
    let CallResult::Hash(a) = web.invoke("hash", vec![]).unwrap() else {
        panic!("expected a hash");
    };
    let CallResult::Hash(b) = web.clone().invoke("hashCode", vec![]).unwrap() else {
        panic!("expected a hash");
    };
    assert_eq!(a, b);
}

#[test]
fn test_unclassifiable_calls_fail() {
    let web = instance("Web1");
    assert!(matches!(
        web.invoke("launch", vec![]),
        Err(CallError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        web.invoke("imageId", vec![Arg::from("a"), Arg::from("b")]),
        Err(CallError::UnsupportedOperation { arity: 2, .. })
    ));
    assert!(matches!(
        web.invoke("name", vec![]),
        Err(CallError::UnsupportedOperation { arity: 0, .. })
    ));
    assert!(matches!(
        web.invoke("userData", vec![Arg::from("#!/bin/sh")]),
        Err(CallError::UnsupportedOperation { .. })
    ));
}
