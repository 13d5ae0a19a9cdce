use super::*;

#[test]
fn round_trips_nested_generic_union() {
    let source = "int|array<string, Foo>|null";
    let union: UnionType = source.parse().unwrap();
    assert_eq!(union.len(), 3);
    assert_eq!(union.to_string(), source);
    assert_eq!(union.to_string().parse::<UnionType>().unwrap(), union);
}

#[test]
fn keywords_map_to_atomic_types() {
    let union: UnionType = "mixed|void|float|bool|array|self|static|parent".parse().unwrap();
    assert_eq!(
        union.types(),
        &[
            AtomicType::Mixed,
            AtomicType::Void,
            AtomicType::Scalar(ScalarKind::Float),
            AtomicType::Scalar(ScalarKind::Bool),
            AtomicType::ArrayLike,
            AtomicType::SelfPlaceholder,
            AtomicType::StaticPlaceholder,
            AtomicType::ParentPlaceholder,
        ]
    );
}

#[test]
fn true_and_false_collapse_to_bool() {
    let union: UnionType = "true|false".parse().unwrap();
    assert_eq!(union, UnionType::bool());
}

#[test]
fn dollar_this_is_the_static_placeholder() {
    let union: UnionType = "$this".parse().unwrap();
    assert_eq!(union.types(), &[AtomicType::StaticPlaceholder]);
}

#[test]
fn dollar_names_are_type_variables() {
    let union: UnionType = "$input".parse().unwrap();
    assert_eq!(union.types(), &[AtomicType::TypeVariable("input".to_string())]);
    assert_eq!(union.to_string(), "$input");
}

#[test]
fn namespaced_class_names_are_kept_verbatim() {
    let union: UnionType = "Foo\\Bar|null".parse().unwrap();
    assert_eq!(union.types()[0], AtomicType::object("Foo\\Bar"));
}

#[test]
fn generic_base_array_is_normalized() {
    let union: UnionType = "Array<int, string>".parse().unwrap();
    assert_eq!(union.to_string(), "array<int, string>");
}

#[test]
fn empty_string_is_the_empty_union() {
    let union: UnionType = "  ".parse().unwrap();
    assert!(union.is_empty());
    assert_eq!(union.to_string(), "");
}

#[test]
fn whitespace_inside_generics_is_tolerated() {
    let union: UnionType = "array< int ,Foo | null >".parse().unwrap();
    assert_eq!(union.to_string(), "array<int, Foo|null>");
}

#[test]
fn malformed_input_is_rejected() {
    assert!(matches!(
        "int|".parse::<UnionType>(),
        Err(TypeParseError::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        "array<int".parse::<UnionType>(),
        Err(TypeParseError::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        "int string".parse::<UnionType>(),
        Err(TypeParseError::UnexpectedChar { found: 's', .. })
    ));
    assert_eq!(
        "Foo<>".parse::<UnionType>(),
        Err(TypeParseError::EmptyGeneric {
            base: "Foo".to_string()
        })
    );
}
