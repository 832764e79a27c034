//! End-to-end runs over a serialized symbol table: load, emit, write.

use std::fs;
use std::path::PathBuf;

use jsdts::frontend::{SourceNode, TypeExpr};
use jsdts::{
    Destination, DiagnosticCategory, EmitError, EmitterOptions, Symbol, SymbolId,
    SymbolTableBuilder, emit, load_table, symbol_flags, write_output,
};

fn module_with_class(
    builder: &mut SymbolTableBuilder,
    path: &str,
    class_name: &str,
) -> SymbolId {
    let class_node = builder.add_node(SourceNode::Class {
        name: Some(class_name.to_string()),
        heritage: Vec::new(),
    });
    let method_node = builder.add_node(SourceNode::Method {
        params: Vec::new(),
        return_type: Some(TypeExpr::Number),
    });
    let method =
        builder.add_symbol(Symbol::new("area", symbol_flags::METHOD).with_decl(method_node));
    let mut class = Symbol::new(class_name, symbol_flags::CLASS).with_decl(class_node);
    class.members = vec![method];
    let class = builder.add_symbol(class);
    builder.symbol_mut(method).parent = class;

    let file = builder.add_node(SourceNode::SourceFile {
        path: path.to_string(),
    });
    let mut module = Symbol::new(path, symbol_flags::VALUE_MODULE).with_decl(file);
    module.exports = vec![class];
    let module = builder.add_symbol(module);
    builder.add_module(path, module);
    module
}

#[test]
fn table_round_trips_through_json_and_emits_to_a_directory() {
    let mut builder = SymbolTableBuilder::new();
    module_with_class(&mut builder, "engine/shape.js", "Shape");
    let table = builder.finish();

    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("table.json");
    fs::write(&table_path, serde_json::to_string(&table).unwrap()).unwrap();

    let loaded = load_table(&table_path).unwrap();
    let out_dir = dir.path().join("out");
    let options = EmitterOptions {
        inputs: vec![PathBuf::from("engine/shape.js")],
        destination: Destination::Directory(out_dir.clone()),
        source_root: PathBuf::from("engine"),
        name: "engine".to_string(),
        ..Default::default()
    };

    let output = emit(&loaded, &options).unwrap();
    write_output(&output, &options).unwrap();

    let text = fs::read_to_string(out_dir.join("engine.d.ts")).unwrap();
    assert!(text.contains("declare namespace __unpacked {"), "{text}");
    assert!(text.contains("namespace __shape_js {"), "{text}");
    assert!(text.contains("class Shape {"), "{text}");
    assert!(text.contains("area(): number;"), "{text}");
    assert!(out_dir.join("namespaces.log").exists());
}

#[test]
fn run_aborts_when_no_input_has_a_module_symbol() {
    let mut builder = SymbolTableBuilder::new();
    module_with_class(&mut builder, "engine/shape.js", "Shape");
    let table = builder.finish();

    let options = EmitterOptions {
        inputs: vec![PathBuf::from("engine/missing.js")],
        ..Default::default()
    };
    let err = emit(&table, &options).unwrap_err();
    assert!(matches!(err, EmitError::EntryNotFound));
}

#[test]
fn one_missing_input_is_reported_but_does_not_abort() {
    let mut builder = SymbolTableBuilder::new();
    module_with_class(&mut builder, "engine/shape.js", "Shape");
    let table = builder.finish();

    let options = EmitterOptions {
        inputs: vec![
            PathBuf::from("engine/shape.js"),
            PathBuf::from("engine/missing.js"),
        ],
        source_root: PathBuf::from("engine"),
        ..Default::default()
    };
    let output = emit(&table, &options).unwrap();
    assert!(output.declarations.contains("class Shape {"));
    assert_eq!(
        output.diagnostics.count_of(DiagnosticCategory::MissingModule),
        1
    );
}

#[test]
fn excluded_modules_are_left_out_of_the_output() {
    let mut builder = SymbolTableBuilder::new();
    module_with_class(&mut builder, "engine/shape.js", "Shape");
    module_with_class(&mut builder, "engine/internal/debug.js", "DebugPanel");
    let table = builder.finish();

    let options = EmitterOptions {
        excludes: vec!["internal".to_string()],
        source_root: PathBuf::from("engine"),
        ..Default::default()
    };
    let output = emit(&table, &options).unwrap();
    assert!(output.declarations.contains("class Shape {"));
    assert!(!output.declarations.contains("DebugPanel"));
}

#[test]
fn invalid_exclude_pattern_is_a_configuration_error() {
    let table = SymbolTableBuilder::new().finish();
    let options = EmitterOptions {
        excludes: vec!["[unclosed".to_string()],
        ..Default::default()
    };
    let err = emit(&table, &options).unwrap_err();
    assert!(matches!(err, EmitError::InvalidExclude { .. }));
}

#[test]
fn console_destination_writes_no_files() {
    let mut builder = SymbolTableBuilder::new();
    module_with_class(&mut builder, "engine/shape.js", "Shape");
    let table = builder.finish();

    let dir = tempfile::tempdir().unwrap();
    let options = EmitterOptions {
        destination: Destination::Console,
        source_root: PathBuf::from("engine"),
        ..Default::default()
    };
    let output = emit(&table, &options).unwrap();
    write_output(&output, &options).unwrap();
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unreadable_table_surfaces_the_path() {
    let err = load_table(std::path::Path::new("/no/such/table.json")).unwrap_err();
    assert!(matches!(err, EmitError::TableRead { .. }));
}
