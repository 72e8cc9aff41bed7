use super::*;
use crate::config::{DEFAULT_MARKER, DEFAULT_SPEC_ARGUMENT};
use crate::processor::testing::{kotlin, live_data, state_store, FakeResolver};
use serde_json::json;

#[test]
fn test_first_marker_annotation_wins() {
    let target = FakeResolver::class("app.Sample")
        .annotation(state_store("app.FirstSpec"))
        .annotation(state_store("app.SecondSpec"))
        .build();
    let resolver = FakeResolver::new();

    let spec = resolver.get_annotation_argument(&target, DEFAULT_MARKER, DEFAULT_SPEC_ARGUMENT);

    assert_eq!(spec.map(|s| s.name().to_string()), Some("app.FirstSpec".to_string()));
}

#[test]
fn test_literal_argument_is_not_a_type() {
    let target = FakeResolver::class("app.Sample")
        .annotation(Annotation {
            short_name: "StateStore".to_string(),
            qualified_name: Some(DEFAULT_MARKER.to_string()),
            arguments: vec![AnnotationArgument {
                name: Some(DEFAULT_SPEC_ARGUMENT.to_string()),
                value: ArgumentValue::Literal("\"SampleSpec\"".to_string()),
            }],
        })
        .build();
    let resolver = FakeResolver::new();

    assert!(resolver
        .get_annotation_argument(&target, DEFAULT_MARKER, DEFAULT_SPEC_ARGUMENT)
        .is_none());
}

#[test]
fn test_annotation_matching_prefers_qualified_name() {
    let foreign = Annotation {
        short_name: "StateStore".to_string(),
        qualified_name: Some("other.StateStore".to_string()),
        arguments: Vec::new(),
    };
    let unresolved = Annotation {
        qualified_name: None,
        ..foreign.clone()
    };

    assert!(!foreign.is(DEFAULT_MARKER));
    assert!(unresolved.is(DEFAULT_MARKER));
}

#[test]
fn test_all_properties_own_first_then_supertypes() {
    let resolver = FakeResolver::new()
        .with(
            FakeResolver::interface("app.Root")
                .property("root", live_data(kotlin("Int")))
                .build(),
        )
        .with(
            FakeResolver::interface("app.Left")
                .super_type(TypeReference::declaration("app.Root"))
                .property("left", live_data(kotlin("Int")))
                .build(),
        )
        .with(
            FakeResolver::interface("app.Right")
                .super_type(TypeReference::declaration("app.Root"))
                .property("right", live_data(kotlin("Int")))
                .build(),
        )
        .with(
            FakeResolver::interface("app.Spec")
                .super_type(TypeReference::declaration("app.Left"))
                .super_type(TypeReference::declaration("app.Right"))
                .super_type(TypeReference::declaration("app.Unknown"))
                .property("own", live_data(kotlin("Int")))
                .build(),
        );
    let spec = resolver
        .resolve_declaration(&TypeReference::declaration("app.Spec"))
        .unwrap();

    let names: Vec<String> = resolver
        .get_all_properties(&spec)
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(names, vec!["own", "left", "root", "right"]);
}

#[test]
fn test_all_properties_survives_cyclic_supertypes() {
    let resolver = FakeResolver::new()
        .with(
            FakeResolver::interface("app.A")
                .super_type(TypeReference::declaration("app.B"))
                .property("a", kotlin("Int"))
                .build(),
        )
        .with(
            FakeResolver::interface("app.B")
                .super_type(TypeReference::declaration("app.A"))
                .property("b", kotlin("Int"))
                .build(),
        );
    let a = resolver
        .resolve_declaration(&TypeReference::declaration("app.A"))
        .unwrap();

    assert_eq!(resolver.get_all_properties(&a).len(), 2);
}

#[test]
fn test_type_reference_json_shape() {
    let reference: TypeReference = serde_json::from_value(json!({
        "declaration": "androidx.lifecycle.LiveData",
        "arguments": [
            { "variance": "covariant", "type": { "parameter": "T", "nullable": true } },
            { "variance": "star" }
        ]
    }))
    .unwrap();

    assert_eq!(
        reference,
        TypeReference::declaration("androidx.lifecycle.LiveData").with_arguments(vec![
            TypeArgument::covariant(TypeReference::parameter("T").nullable()),
            TypeArgument::star(),
        ])
    );
    assert_eq!(reference.simple_name(), "LiveData");
}

#[test]
fn test_declaration_kind_descriptions() {
    assert_eq!(DeclarationKind::Class(ClassKind::Object).describe(), "an object");
    assert_eq!(DeclarationKind::Function.describe(), "a function");
    assert_eq!(
        DeclarationKind::TypeAlias {
            target: kotlin("Int")
        }
        .describe(),
        "a type alias"
    );
}

fn parameter(name: &str) -> TypeParameter {
    TypeParameter {
        name: name.to_string(),
        bounds: Vec::new(),
        variance: Variance::Invariant,
    }
}

#[test]
fn test_all_properties_follow_alias_supertypes() {
    let resolver = FakeResolver::new()
        .with(
            FakeResolver::interface("app.Base")
                .property("inherited", live_data(kotlin("Int")))
                .file("app/Base.kt")
                .build(),
        )
        .with(
            FakeResolver::declaration(
                "app.BaseAlias",
                DeclarationKind::TypeAlias {
                    target: TypeReference::declaration("app.Base"),
                },
            )
            .file("app/Aliases.kt")
            .build(),
        )
        .with(
            FakeResolver::interface("app.Spec")
                .super_type(TypeReference::declaration("app.BaseAlias"))
                .property("own", live_data(kotlin("Int")))
                .file("app/Spec.kt")
                .build(),
        );
    let spec = resolver
        .resolve_declaration(&TypeReference::declaration("app.Spec"))
        .unwrap();

    let collection = resolver.collect_properties(&spec);

    let names: Vec<&str> = collection
        .properties
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["own", "inherited"]);
    let origins: Vec<&str> = collection.origins.iter().map(|f| f.path()).collect();
    assert_eq!(origins, vec!["app/Aliases.kt", "app/Base.kt", "app/Spec.kt"]);
}

#[test]
fn test_inherited_property_types_use_supertype_arguments() {
    let resolver = FakeResolver::new()
        .with(
            FakeResolver::interface("app.Base")
                .type_parameter(parameter("T"))
                .property("value", live_data(TypeReference::parameter("T")))
                .build(),
        )
        .with(
            FakeResolver::interface("app.Middle")
                .type_parameter(parameter("U"))
                .super_type(
                    TypeReference::declaration("app.Base").with_arguments(vec![
                        TypeArgument::invariant(TypeReference::parameter("U").nullable()),
                    ]),
                )
                .build(),
        )
        .with(
            FakeResolver::interface("app.Spec")
                .super_type(
                    TypeReference::declaration("app.Middle")
                        .with_arguments(vec![TypeArgument::invariant(kotlin("Int"))]),
                )
                .build(),
        );
    let spec = resolver
        .resolve_declaration(&TypeReference::declaration("app.Spec"))
        .unwrap();

    let properties = resolver.get_all_properties(&spec);

    assert_eq!(properties.len(), 1);
    assert_eq!(
        properties[0].declared_type,
        live_data(kotlin("Int").nullable())
    );
}
