use super::*;
use crate::dom::{DeclMeta, ObjectTypeMember};

fn empty_parent_map() -> ParentMap {
    ParentMap::default()
}

#[test]
fn prints_a_namespace_with_members() {
    let mut arena = DeclArena::new();
    let method = arena.add(Declaration::Method {
        name: "add".to_string(),
        params: vec![Parameter {
            name: "n".to_string(),
            ty: Type::Number,
            optional: false,
        }],
        return_type: Type::This,
    });
    let class = arena.add(Declaration::Class {
        name: "Calculator".to_string(),
        members: vec![method],
        base: None,
    });
    let namespace = arena.add(Declaration::Namespace {
        name: "math".to_string(),
        members: vec![class],
    });
    let parent_map = empty_parent_map();
    let mut printer = DeclarationPrinter::new(&arena, &parent_map);

    let output = printer.print_top_level(namespace);
    assert!(output.contains("declare namespace math {"), "{output}");
    assert!(output.contains("    class Calculator {"), "{output}");
    assert!(output.contains("        add(n: number): this;"), "{output}");
}

#[test]
fn base_types_use_the_qualified_path() {
    let mut arena = DeclArena::new();
    let base = arena.add(Declaration::Class {
        name: "Node".to_string(),
        members: Vec::new(),
        base: None,
    });
    let derived = arena.add(Declaration::Class {
        name: "Sprite".to_string(),
        members: Vec::new(),
        base: Some(base),
    });
    let mut parent_map = empty_parent_map();
    parent_map.insert(
        base,
        DeclMeta {
            direct_parent: None,
            full_path: "__unpacked.__scene.Node".to_string(),
        },
    );
    let mut printer = DeclarationPrinter::new(&arena, &parent_map);

    let output = printer.print_top_level(derived);
    assert!(
        output.contains("declare class Sprite extends __unpacked.__scene.Node {"),
        "{output}"
    );
}

#[test]
fn read_only_property_and_enum_shell() {
    let mut arena = DeclArena::new();
    let property = arena.add(Declaration::Property {
        name: "x".to_string(),
        ty: Type::Number,
        read_only: true,
    });
    let class = arena.add(Declaration::Class {
        name: "Point".to_string(),
        members: vec![property],
        base: None,
    });
    let shell = arena.add(Declaration::Enum {
        name: "Direction".to_string(),
    });
    let parent_map = empty_parent_map();
    let mut printer = DeclarationPrinter::new(&arena, &parent_map);

    let class_output = printer.print_top_level(class);
    assert!(class_output.contains("readonly x: number;"), "{class_output}");
    let enum_output = printer.print_top_level(shell);
    assert!(enum_output.contains("declare enum Direction {"), "{enum_output}");
}

#[test]
fn type_printing_covers_composites() {
    let arena = DeclArena::new();
    let parent_map = empty_parent_map();
    let printer = DeclarationPrinter::new(&arena, &parent_map);

    assert_eq!(
        printer.print_type(&Type::Union(vec![
            Type::Named("Foo".to_string()),
            Type::Null
        ])),
        "Foo | null"
    );
    assert_eq!(
        printer.print_type(&Type::Array(Box::new(Type::Union(vec![
            Type::String,
            Type::Number
        ])))),
        "(string | number)[]"
    );
    assert_eq!(printer.print_type(&Type::StringLiteral("up".to_string())), "\"up\"");
    assert_eq!(printer.print_type(&Type::NumberLiteral(3.0)), "3");
    assert_eq!(
        printer.print_type(&Type::ObjectType(vec![ObjectTypeMember {
            name: "x".to_string(),
            ty: Type::Number,
            optional: true,
        }])),
        "{ x?: number }"
    );
    assert_eq!(
        printer.print_type(&Type::FunctionType {
            params: vec![Parameter {
                name: "e".to_string(),
                ty: Type::Named("Event".to_string()),
                optional: false,
            }],
            return_type: Box::new(Type::Void),
        }),
        "(e: Event) => void"
    );
}
