use autoprop::{
    prelude::*,
    schema::input::{MemberMarker, SerializableMarker, SourceMember, UnionEntry},
};
use serde_json::Value;

fn serializable(id: &str, kind: TypeKind, bases: &[&str]) -> TypeDecl {
    TypeDecl {
        id: id.into(),
        name: id.into(),
        kind,
        accessibility: Accessibility::Public,
        is_partial: true,
        serializable: Some(SerializableMarker::default()),
        bases: bases.iter().map(ToString::to_string).collect(),
        ..Default::default()
    }
}

fn metadata(output: &GenerationOutput, name: &str) -> Value {
    serde_json::from_str(&output.unit(&format!("{name}.meta.json")).unwrap().source).unwrap()
}

#[test]
fn key_names_follow_type_convention_unless_aliased() {
    let mut decl = serializable("Weapon", TypeKind::Class, &[]);
    decl.serializable = Some(SerializableMarker {
        naming: Some(NamingConvention::Kebab),
    });
    let mut aliased = SourceMember::new("CritChance", "float");
    aliased.member = Some(MemberMarker {
        alias: Some("crit".into()),
        order: None,
    });
    decl.members = vec![
        SourceMember::new("BaseDamage", "int"),
        aliased,
        SourceMember::new("ReadIOBuffer", "int"),
    ];

    let output = generate_serialization(
        &Compilation {
            types: vec![decl],
            ..Default::default()
        },
        &GeneratorOptions::default(),
    );
    let json = metadata(&output, "Weapon");
    let keys: Vec<_> = json["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["key_name"].as_str().unwrap().to_string())
        .collect();

    assert!(output.diagnostics.is_empty());
    assert_eq!(keys[0], mutate("BaseDamage", NamingConvention::Kebab));
    assert_eq!(keys[1], "crit");
    assert_eq!(keys[2], "read-io-buffer");
}

#[test]
fn default_naming_applies_without_marker_convention() {
    let mut decl = serializable("Npc", TypeKind::Class, &[]);
    decl.members = vec![SourceMember::new("DisplayName", "string")];
    let options = GeneratorOptions {
        default_naming: NamingConvention::Snake,
        ..GeneratorOptions::default()
    };

    let output = generate_serialization(
        &Compilation {
            types: vec![decl],
            ..Default::default()
        },
        &options,
    );

    assert_eq!(metadata(&output, "Npc")["members"][0]["key_name"], "display_name");
}

#[test]
fn union_metadata_lists_tags() {
    let mut shape = serializable("Shape", TypeKind::Class, &[]);
    shape.is_abstract = true;
    shape.unions = vec![
        UnionEntry {
            tag: "circle".into(),
            subtype: "Circle".into(),
        },
        UnionEntry {
            tag: "square".into(),
            subtype: "Square".into(),
        },
    ];
    let compilation = Compilation {
        types: vec![
            shape,
            serializable("Circle", TypeKind::Class, &["Shape"]),
            serializable("Square", TypeKind::Class, &["Shape"]),
        ],
        ..Default::default()
    };

    let output = generate_serialization(&compilation, &GeneratorOptions::default());
    let json = metadata(&output, "Shape");

    assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
    assert_eq!(output.units.len(), 3);
    assert_eq!(json["unions"][0]["tag"], "circle");
    assert_eq!(json["unions"][1]["subtype"], "Square");
}

#[test]
fn invalid_union_rejects_only_its_type() {
    let mut shape = serializable("IShape", TypeKind::Interface, &[]);
    shape.unions = vec![
        UnionEntry {
            tag: "p".into(),
            subtype: "Point".into(),
        },
        UnionEntry {
            tag: "p".into(),
            subtype: "Other".into(),
        },
    ];
    let compilation = Compilation {
        types: vec![
            shape,
            serializable("Point", TypeKind::Struct, &[]),
            serializable("Other", TypeKind::Class, &["IShape"]),
        ],
        ..Default::default()
    };

    let output = generate_serialization(&compilation, &GeneratorOptions::default());
    let diags = &output.diagnostics;

    assert!(output.unit("IShape.meta.json").is_none());
    assert!(output.unit("Point.meta.json").is_some());
    assert!(output.unit("Other.meta.json").is_some());
    assert!(diags.contains(DiagnosticId::UnionTagDuplicate));
    assert!(diags.contains(DiagnosticId::UnionMemberNotAllowStruct));
    assert!(diags.contains(DiagnosticId::UnionMemberTypeNotImplementBaseType));
}

#[test]
fn nested_type_is_rejected() {
    let mut inner = serializable("Inner", TypeKind::Class, &[]);
    inner.is_nested = true;
    inner.location = Some(Location::new("Outer.cs", 12, 9));

    let output = generate_serialization(
        &Compilation {
            types: vec![inner],
            ..Default::default()
        },
        &GeneratorOptions::default(),
    );
    let d = output.diagnostics.iter().next().unwrap();

    assert!(output.units.is_empty());
    assert_eq!(d.id, DiagnosticId::NestedNotAllow);
    assert_eq!(
        d.to_string(),
        "error AUTOPROP006: The serializable type 'Inner' must not be a nested type at Outer.cs:12:9"
    );
}
