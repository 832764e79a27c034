//! Front-end contract: the semantic symbol table this crate consumes.
//!
//! The parser/type-checker that builds the table is an external collaborator.
//! It hands over one already-checked `SymbolTable` per run, serialized as
//! JSON. This module defines the shape of that table: an arena of symbols, an
//! arena of source-side declaration nodes, and the JSDoc type expressions
//! attached to them.
//!
//! Symbols are referenced by `SymbolId` and nodes by `NodeId`; both are plain
//! `u32` indices into their arenas, with a reserved `NONE` sentinel.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub mod nodes;

pub use nodes::{
    AccessorKind, FunctionTypeParam, HeritageClause, HeritageKind, JsDocProperty, ParamDecl,
    SourceNode, TypeExpr, TypeLiteralMember, ValueExpr,
};

/// Symbol kind flags. A symbol's flag word can have several bits set at once
/// (e.g. a namespace that is also a value module), so dispatch over these is
/// ordered, not exclusive.
pub mod symbol_flags {
    /// A source-file module (the symbol of a file with top-level exports).
    pub const VALUE_MODULE: u32 = 1 << 0;
    pub const CLASS: u32 = 1 << 1;
    pub const INTERFACE: u32 = 1 << 2;
    pub const FUNCTION: u32 = 1 << 3;
    pub const NAMESPACE: u32 = 1 << 4;
    pub const ENUM: u32 = 1 << 5;
    pub const CONSTRUCTOR: u32 = 1 << 6;
    pub const PROPERTY: u32 = 1 << 7;
    pub const METHOD: u32 = 1 << 8;
    pub const GET_ACCESSOR: u32 = 1 << 9;
    pub const SET_ACCESSOR: u32 = 1 << 10;
    pub const ALIAS: u32 = 1 << 11;
    pub const TYPE_ALIAS: u32 = 1 << 12;
    pub const PROTOTYPE: u32 = 1 << 13;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 14;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 15;
    /// Set on members created by assignment onto a dotted path
    /// (`Foo.bar = ...`) rather than by declaration.
    pub const ASSIGNMENT: u32 = 1 << 16;
    pub const OBJECT_LITERAL: u32 = 1 << 17;

    pub const ACCESSOR: u32 = GET_ACCESSOR | SET_ACCESSOR;
}

/// Index of a symbol in the table's symbol arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == SymbolId::NONE
    }

    fn none() -> SymbolId {
        SymbolId::NONE
    }
}

/// Index of a declaration node in the table's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == NodeId::NONE
    }

    fn none() -> NodeId {
        NodeId::NONE
    }
}

/// A named program entity, as bound by the front end.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Bitmask over [`symbol_flags`].
    pub flags: u32,
    /// Primary declaration node, `NodeId::NONE` when the symbol has none
    /// (ambient or synthesized symbols).
    #[serde(default = "NodeId::none")]
    pub value_decl: NodeId,
    /// Owning class/namespace/object-literal symbol, if any.
    #[serde(default = "SymbolId::none")]
    pub parent: SymbolId,
    /// For alias symbols: the symbol the alias resolves to.
    #[serde(default = "SymbolId::none")]
    pub aliased: SymbolId,
    /// Member table (class members, namespace locals, object-literal props).
    #[serde(default)]
    pub members: Vec<SymbolId>,
    /// Exported symbols, for module/namespace symbols.
    #[serde(default)]
    pub exports: Vec<SymbolId>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, flags: u32) -> Symbol {
        Symbol {
            name: name.into(),
            flags,
            value_decl: NodeId::NONE,
            parent: SymbolId::NONE,
            aliased: SymbolId::NONE,
            members: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn with_decl(mut self, decl: NodeId) -> Symbol {
        self.value_decl = decl;
        self
    }

    pub fn with_parent(mut self, parent: SymbolId) -> Symbol {
        self.parent = parent;
        self
    }

    pub fn with_aliased(mut self, aliased: SymbolId) -> Symbol {
        self.aliased = aliased;
        self
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags & flag) != 0
    }
}

/// The front end's complete output for one checked program.
///
/// Queries mirror the capabilities the synthesizer needs: symbol flags,
/// declarations, alias resolution, and module export enumeration. All lookups
/// are total over valid ids and return `None` for the `NONE` sentinels.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    pub symbols: Vec<Symbol>,
    pub nodes: Vec<SourceNode>,
    /// Module symbols in source order, one per input file.
    pub modules: Vec<SymbolId>,
    /// Normalized file path -> module symbol, for entry lookup.
    #[serde(default)]
    pub files: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        if id.is_none() {
            None
        } else {
            self.symbols.get(id.0 as usize)
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&SourceNode> {
        if id.is_none() {
            None
        } else {
            self.nodes.get(id.0 as usize)
        }
    }

    /// The symbol's primary declaration node, if it has one.
    pub fn decl_of(&self, id: SymbolId) -> Option<&SourceNode> {
        self.symbol(id).and_then(|s| self.node(s.value_decl))
    }

    /// Resolve an alias symbol to its target. Returns the symbol itself when
    /// it is not an alias.
    pub fn aliased_symbol(&self, id: SymbolId) -> SymbolId {
        match self.symbol(id) {
            Some(sym) if sym.has_flag(symbol_flags::ALIAS) && !sym.aliased.is_none() => sym.aliased,
            _ => id,
        }
    }

    /// Exported symbols of a module or namespace symbol, in source order.
    pub fn exports_of(&self, id: SymbolId) -> &[SymbolId] {
        self.symbol(id).map(|s| s.exports.as_slice()).unwrap_or(&[])
    }

    /// Module symbol for a normalized file path.
    pub fn module_for_file(&self, path: &str) -> Option<SymbolId> {
        self.files.get(path).copied()
    }
}

/// Builder used by front ends (and tests) to assemble a table.
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    table: SymbolTable,
}

impl SymbolTableBuilder {
    pub fn new() -> SymbolTableBuilder {
        SymbolTableBuilder::default()
    }

    pub fn add_node(&mut self, node: SourceNode) -> NodeId {
        let id = NodeId(self.table.nodes.len() as u32);
        self.table.nodes.push(node);
        id
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.table.symbols.len() as u32);
        self.table.symbols.push(symbol);
        id
    }

    /// Register a module symbol for a source file path. The path must already
    /// be normalized the way the host normalizes input paths.
    pub fn add_module(&mut self, path: impl Into<String>, symbol: SymbolId) {
        let path = path.into();
        self.table.modules.push(symbol);
        self.table.files.insert(path, symbol);
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.table.symbols[id.0 as usize]
    }

    pub fn finish(self) -> SymbolTable {
        self.table
    }
}
