use statestore_compiler::{ClassName, TypeName};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_guess_package_from_lowercase_segments() {
        let name = ClassName::best_guess("androidx.lifecycle.LiveData").unwrap();
        assert_eq!(name.package, "androidx.lifecycle");
        assert_eq!(name.simple_names, vec!["LiveData".to_string()]);
    }

    #[test]
    fn should_guess_nested_classes() {
        let name = ClassName::best_guess("a.b.Outer.Inner").unwrap();
        assert_eq!(name.package, "a.b");
        assert_eq!(name.simple_name(), "Inner");
        assert_eq!(name.top_level_name(), "Outer");
        assert_eq!(name.canonical_name(), "a.b.Outer.Inner");
    }

    #[test]
    fn should_reject_names_without_class_segment() {
        assert!(ClassName::best_guess("only.lower.case").is_err());
    }

    #[test]
    fn should_split_qualified_name_with_known_package() {
        let name = ClassName::from_qualified("app.sample", "app.sample.MainActivity.LocalStore")
            .unwrap();
        assert_eq!(
            name.simple_names,
            vec!["MainActivity".to_string(), "LocalStore".to_string()]
        );
        assert!(ClassName::from_qualified("other", "app.sample.Spec").is_err());
    }

    #[test]
    fn should_copy_nullability() {
        let name = TypeName::class(ClassName::new("kotlin", "String")).copy(true);
        assert!(matches!(name, TypeName::Class { nullable: true, .. }));
        assert_eq!(TypeName::Star.copy(true), TypeName::Star);
    }

    #[test]
    fn should_collect_referenced_classes_in_order() {
        let map = ClassName::new("kotlin.collections", "Map").parameterized_by(vec![
            TypeName::class(ClassName::new("kotlin", "String")),
            TypeName::producer_of(TypeName::class(ClassName::new("p", "Item"))),
        ]);
        let mut out = Vec::new();
        map.referenced_classes(&mut out);
        let names: Vec<String> = out.iter().map(|c| c.canonical_name()).collect();
        assert_eq!(names, vec!["kotlin.collections.Map", "kotlin.String", "p.Item"]);
    }

    #[test]
    fn should_serialize_type_names() {
        let name = ClassName::new("p", "Item").parameterized_by(vec![TypeName::Star]);
        let json = serde_json::to_string(&name).unwrap();
        let back: TypeName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}
