use statestore_compiler::{
    AnnotationSpec, ClassName, CodeBlock, FileSpec, KotlinEmitter, Modifiers, PropertySpec,
    TypeName, TypeSpec, TypeVariableName,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn live_data(inner: TypeName) -> TypeName {
        ClassName::new("androidx.lifecycle", "LiveData").parameterized_by(vec![inner])
    }

    fn mutable_live_data(inner: TypeName) -> TypeName {
        ClassName::new("androidx.lifecycle", "MutableLiveData").parameterized_by(vec![inner])
    }

    fn int() -> TypeName {
        TypeName::class(ClassName::new("kotlin", "Int"))
    }

    fn sample_type() -> TypeSpec {
        TypeSpec::class_builder("AbsSample")
            .add_kdoc("Auto generated class from StateStore")
            .add_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .add_annotation(
                AnnotationSpec::new(ClassName::new("kotlin", "Suppress"))
                    .add_member(CodeBlock::builder().string("MemberVisibilityCanBePrivate"))
                    .add_member(CodeBlock::builder().string("PropertyName")),
            )
            .add_superinterface(TypeName::class(ClassName::new("app.sample", "SampleSpec")))
            .add_property(
                PropertySpec::builder("value", live_data(int()))
                    .add_modifiers(Modifiers::PUBLIC | Modifiers::OVERRIDE)
                    .getter(CodeBlock::builder().name("_value")),
            )
            .add_property(
                PropertySpec::builder("_value", mutable_live_data(int()))
                    .add_modifiers(Modifiers::PROTECTED)
                    .mutable()
                    .initializer(CodeBlock::construct(mutable_live_data(int()))),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn should_emit_abstract_class_with_backing_fields() {
        let file = FileSpec::get("app.sample", sample_type());
        let source = KotlinEmitter::new().emit_file(&file).unwrap();

        let expected = "\
package app.sample

import androidx.lifecycle.LiveData
import androidx.lifecycle.MutableLiveData

/**
 * Auto generated class from StateStore
 */
@Suppress(\"MemberVisibilityCanBePrivate\", \"PropertyName\")
public abstract class AbsSample : SampleSpec {
  public override val value: LiveData<Int>
    get() = _value

  protected var _value: MutableLiveData<Int> = MutableLiveData<Int>()
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn should_emit_empty_class_without_body() {
        let spec = TypeSpec::class_builder("AbsEmpty")
            .add_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .add_superinterface(TypeName::class(ClassName::new("app.sample", "EmptySpec")))
            .build()
            .unwrap();
        let source = KotlinEmitter::new()
            .emit_file(&FileSpec::get("app.sample", spec))
            .unwrap();

        assert_eq!(
            source,
            "package app.sample\n\npublic abstract class AbsEmpty : EmptySpec\n"
        );
    }

    #[test]
    fn should_omit_package_line_for_root_package() {
        let spec = TypeSpec::class_builder("AbsRoot")
            .add_superinterface(TypeName::class(ClassName::new("", "RootSpec")))
            .build()
            .unwrap();
        let source = KotlinEmitter::new().emit_file(&FileSpec::get("", spec)).unwrap();
        assert_eq!(source, "class AbsRoot : RootSpec\n");
    }

    #[test]
    fn should_import_root_package_classes_into_named_package() {
        let spec = TypeSpec::class_builder("AbsSample")
            .add_property(PropertySpec::builder(
                "state",
                TypeName::class(ClassName::new("", "RootState")),
            ))
            .build()
            .unwrap();
        let source = KotlinEmitter::new()
            .emit_file(&FileSpec::get("app", spec))
            .unwrap();
        assert!(source.contains("package app\n\nimport RootState\n"));
        assert!(source.contains("val state: RootState"));
    }

    #[test]
    fn should_emit_type_variables_with_bounds_and_variance() {
        let any = TypeName::class(ClassName::new("kotlin", "Any"));
        let comparable = ClassName::new("kotlin", "Comparable")
            .parameterized_by(vec![TypeName::variable("T")]);
        let spec = TypeSpec::class_builder("AbsBox")
            .add_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .add_type_variables(vec![
                TypeVariableName::new("T").with_bounds(vec![any, comparable]),
                TypeVariableName::new("R").with_variance(Some(statestore_compiler::Variance::Out)),
            ])
            .add_superinterface(TypeName::class(ClassName::new("p", "BoxSpec")))
            .build()
            .unwrap();
        let source = KotlinEmitter::new().emit_file(&FileSpec::get("p", spec)).unwrap();
        assert!(source
            .contains("public abstract class AbsBox<T : Any, out R> : BoxSpec where T : Comparable<T>\n"));
    }

    #[test]
    fn should_escape_keyword_property_names() {
        let spec = TypeSpec::class_builder("AbsK")
            .add_property(
                PropertySpec::builder("object", live_data(int()))
                    .add_modifiers(Modifiers::PUBLIC | Modifiers::OVERRIDE)
                    .getter(CodeBlock::builder().name("_object")),
            )
            .build()
            .unwrap();
        let source = KotlinEmitter::new().emit_file(&FileSpec::get("p", spec)).unwrap();
        assert!(source.contains("public override val `object`: LiveData<Int>"));
        assert!(source.contains("get() = _object"));
    }

    #[test]
    fn should_render_nested_classes_through_top_level_import() {
        let nested = ClassName::nested("q", vec!["Outer".to_string(), "Inner".to_string()]).unwrap();
        let spec = TypeSpec::class_builder("AbsN")
            .add_property(PropertySpec::builder("inner", live_data(TypeName::class(nested))))
            .build()
            .unwrap();
        let source = KotlinEmitter::new().emit_file(&FileSpec::get("p", spec)).unwrap();
        assert!(source.contains("import q.Outer\n"));
        assert!(source.contains("val inner: LiveData<Outer.Inner>"));
    }

    #[test]
    fn should_qualify_class_clashing_with_generated_type() {
        let spec = TypeSpec::class_builder("AbsC")
            .add_property(PropertySpec::builder(
                "other",
                TypeName::class(ClassName::new("elsewhere", "AbsC")),
            ))
            .build()
            .unwrap();
        let source = KotlinEmitter::new().emit_file(&FileSpec::get("p", spec)).unwrap();
        assert!(!source.contains("import elsewhere.AbsC"));
        assert!(source.contains("val other: elsewhere.AbsC"));
    }

    #[test]
    fn should_be_deterministic() {
        let file = FileSpec::get("app.sample", sample_type());
        let emitter = KotlinEmitter::new();
        assert_eq!(emitter.emit_file(&file).unwrap(), emitter.emit_file(&file).unwrap());
    }

    #[test]
    fn should_reject_duplicate_properties() {
        let result = TypeSpec::class_builder("AbsD")
            .add_property(PropertySpec::builder("a", int()))
            .add_property(PropertySpec::builder("a", int()))
            .build();
        assert!(result.is_err());
    }
}
