use serde_json::json;
use statestore_compiler_cli::config::DEFAULT_MARKER;
use statestore_compiler_cli::host::{JsonProgramHost, ProgramModel};
use statestore_compiler_cli::processor::reflection::{ClassKind, Resolver, TypeReference};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> ProgramModel {
        serde_json::from_value(json!({
            "files": [
                {
                    "path": "app/sample/Sample.kt",
                    "package": "app.sample",
                    "declarations": [
                        {
                            "qualified_name": "app.sample.Sample",
                            "simple_name": "Sample",
                            "kind": { "class": "class" },
                            "annotations": [
                                {
                                    "short_name": "StateStore",
                                    "qualified_name": DEFAULT_MARKER,
                                    "arguments": [
                                        {
                                            "name": "stateSpec",
                                            "value": { "type": { "declaration": "app.sample.SampleSpec" } }
                                        }
                                    ]
                                }
                            ]
                        }
                    ]
                },
                {
                    "path": "app/sample/SampleSpec.kt",
                    "package": "app.sample",
                    "declarations": [
                        {
                            "qualified_name": "app.sample.SampleSpec",
                            "simple_name": "SampleSpec",
                            "kind": { "class": "interface" },
                            "properties": [
                                {
                                    "name": "value",
                                    "type": {
                                        "declaration": "androidx.lifecycle.LiveData",
                                        "arguments": [ { "type": { "declaration": "kotlin.Int" } } ]
                                    }
                                }
                            ]
                        }
                    ]
                }
            ],
            "declarations": [
                {
                    "qualified_name": "app.sample.Alias",
                    "package": "app.sample",
                    "simple_name": "Alias",
                    "kind": { "type_alias": { "target": { "declaration": "app.sample.SampleSpec" } } }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn should_inherit_file_and_package_from_source_unit() {
        let host = JsonProgramHost::from_model(sample_model()).unwrap();

        let spec = host.get("app.sample.SampleSpec").unwrap();
        assert_eq!(spec.package, "app.sample");
        assert_eq!(
            spec.containing_file.as_ref().map(|f| f.path()),
            Some("app/sample/SampleSpec.kt")
        );
        assert_eq!(spec.class_kind(), Some(ClassKind::Interface));

        let alias = host.get("app.sample.Alias").unwrap();
        assert!(alias.containing_file.is_none());
    }

    #[test]
    fn should_find_annotated_and_resolve_references() {
        let host = JsonProgramHost::from_model(sample_model()).unwrap();

        let targets = host.find_annotated(DEFAULT_MARKER);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].qualified_name, "app.sample.Sample");

        let spec = host
            .get_annotation_argument(&targets[0], DEFAULT_MARKER, "stateSpec")
            .unwrap();
        let resolved = host.resolve_declaration(&spec).unwrap();
        assert_eq!(host.get_all_properties(&resolved).len(), 1);
        assert!(host
            .resolve_declaration(&TypeReference::parameter("T"))
            .is_none());
    }

    #[test]
    fn should_order_declarations_by_qualified_name() {
        let model: ProgramModel = serde_json::from_value(json!({
            "declarations": [
                {
                    "qualified_name": "b.Second",
                    "simple_name": "Second",
                    "kind": { "class": "class" },
                    "annotations": [ { "short_name": "StateStore" } ]
                },
                {
                    "qualified_name": "a.First",
                    "simple_name": "First",
                    "kind": { "class": "class" },
                    "annotations": [ { "short_name": "StateStore" } ]
                }
            ]
        }))
        .unwrap();
        let host = JsonProgramHost::from_model(model).unwrap();

        let names: Vec<String> = host
            .find_annotated(DEFAULT_MARKER)
            .into_iter()
            .map(|d| d.qualified_name)
            .collect();
        assert_eq!(names, vec!["a.First", "b.Second"]);
    }

    #[test]
    fn should_reject_duplicate_declarations() {
        let mut host = JsonProgramHost::from_model(sample_model()).unwrap();

        assert!(host.add_model(sample_model()).is_err());
    }

    #[test]
    fn should_reject_unknown_top_level_keys() {
        let result = serde_json::from_value::<ProgramModel>(json!({ "classes": [] }));

        assert!(result.is_err());
    }

    #[test]
    fn should_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.json");
        std::fs::write(&path, serde_json::to_string(&sample_model()).unwrap()).unwrap();

        let host = JsonProgramHost::load(&[&path]).unwrap();

        assert_eq!(host.len(), 3);
        assert!(JsonProgramHost::load(&[dir.path().join("missing.json")]).is_err());
    }
}
