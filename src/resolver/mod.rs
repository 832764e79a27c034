//! Symbol resolver and memoizer.
//!
//! The emitter walks the front end's symbol graph and decides, once per
//! symbol, what output declaration (if any) it becomes. The graph is
//! arbitrarily cyclic, so resolution is memoized with an explicit
//! reservation step: a placeholder [`SymbolInfo`] is registered in the memo
//! table *before* the symbol's declaration is computed, and any reentrant
//! resolution triggered during the computation observes the placeholder as
//! unresolved and terminates that branch. Once the per-kind rule finishes,
//! the same table slot is populated in place.
//!
//! Per-kind rules live in `declarations`, heritage relinking in `heritage`,
//! namespace assembly and export propagation in `modules`, and type
//! translation in `types`.

mod declarations;
mod heritage;
mod modules;
mod types;


use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::{debug, error};

use crate::diagnostics::{DiagnosticBag, DiagnosticCategory};
use crate::dom::{DeclArena, DeclId, DeclMeta, Declaration, ParentMap};
use crate::frontend::{SourceNode, SymbolId, SymbolTable, symbol_flags};
use crate::options::EmitterOptions;
use crate::printer::DeclarationPrinter;

/// Reserved internal name of the namespace that collects every purely
/// path-derived module namespace.
pub const MODULES_ROOT_NAME: &str = "__unpacked";

/// Resolution record for one visited symbol.
///
/// `resolved` iff a declaration is present. The parent field records the
/// declaration this symbol's output was attached under; it is set at most
/// once per run, first attachment wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymbolInfo {
    pub decl: Option<DeclId>,
    pub parent: Option<DeclId>,
}

impl SymbolInfo {
    pub fn resolved(&self) -> bool {
        self.decl.is_some()
    }
}

/// Everything one emit run produces.
#[derive(Clone, Debug)]
pub struct EmitOutput {
    /// The declaration-file text.
    pub declarations: String,
    /// One line per plain (non-module) namespace encountered, for auditing.
    pub namespaces_log: String,
    pub diagnostics: DiagnosticBag,
}

/// The declaration synthesizer. One instance per run; all state is discarded
/// once the output is produced.
pub struct Emitter<'a> {
    pub(crate) table: &'a SymbolTable,
    pub(crate) options: &'a EmitterOptions,
    pub(crate) arena: DeclArena,
    /// Memo table: every symbol maps to at most one SymbolInfo per run.
    symbols: FxHashMap<SymbolId, SymbolInfo>,
    /// Symbols surfaced at the top level of the output, in discovery order.
    pub(crate) exported: IndexSet<SymbolId>,
    pub(crate) parent_map: ParentMap,
    pub(crate) namespaces_log: Vec<String>,
    /// Root of the path-derived module namespace tree.
    pub(crate) modules_root: DeclId,
    pub(crate) diagnostics: DiagnosticBag,
}

impl<'a> Emitter<'a> {
    pub fn new(table: &'a SymbolTable, options: &'a EmitterOptions) -> Emitter<'a> {
        let mut arena = DeclArena::new();
        let modules_root = arena.add(Declaration::Namespace {
            name: MODULES_ROOT_NAME.to_string(),
            members: Vec::new(),
        });
        let mut parent_map = ParentMap::default();
        parent_map.insert(
            modules_root,
            DeclMeta {
                direct_parent: None,
                full_path: MODULES_ROOT_NAME.to_string(),
            },
        );
        Emitter {
            table,
            options,
            arena,
            symbols: FxHashMap::default(),
            exported: IndexSet::new(),
            parent_map,
            namespaces_log: Vec::new(),
            modules_root,
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Resolve every module symbol whose source file lives under the
    /// configured source root and is not excluded.
    pub fn run(&mut self) {
        let table = self.table;
        let excludes: Vec<regex::Regex> = self
            .options
            .excludes
            .iter()
            .filter_map(|pattern| match regex::Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    self.diagnostics.warning(
                        DiagnosticCategory::General,
                        format!("invalid exclude pattern `{pattern}`: {err}"),
                    );
                    None
                }
            })
            .collect();
        for &module in &table.modules {
            let Some(SourceNode::SourceFile { path }) = table.decl_of(module) else {
                continue;
            };
            if !self.is_under_source_root(path) {
                continue;
            }
            if excludes.iter().any(|re| re.is_match(path)) {
                continue;
            }
            self.resolve(module);
        }
    }

    /// Resolve a symbol, memoized. Repeated calls return the same record;
    /// a call that reenters for a symbol still being computed observes the
    /// unresolved placeholder.
    pub fn resolve(&mut self, symbol: SymbolId) -> SymbolInfo {
        if let Some(info) = self.symbols.get(&symbol) {
            return *info;
        }
        // Reservation: the placeholder is the cycle guard.
        self.symbols.insert(symbol, SymbolInfo::default());
        self.resolve_symbol(symbol);
        self.symbols[&symbol]
    }

    /// The memoized record for a symbol, if it was ever visited.
    pub fn info(&self, symbol: SymbolId) -> Option<SymbolInfo> {
        self.symbols.get(&symbol).copied()
    }

    /// Populate the reserved slot. A slot is finalized at most once; rules
    /// that return without calling this leave the symbol unresolved.
    pub(crate) fn finalize(&mut self, symbol: SymbolId, decl: DeclId) {
        if let Some(info) = self.symbols.get_mut(&symbol) {
            if info.decl.is_none() {
                info.decl = Some(decl);
            }
        }
    }

    /// Dispatch over the symbol's flag word. The order is a contract: a
    /// symbol can match several kinds, and the first match wins.
    fn resolve_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(sym) = table.symbol(symbol) else {
            return;
        };
        debug!(name = %sym.name, flags = sym.flags, "resolving symbol");

        let flags = sym.flags;

        if flags == symbol_flags::VALUE_MODULE {
            self.resolve_file_module_symbol(symbol);
        } else if (flags & symbol_flags::CLASS) != 0 {
            self.resolve_class_symbol(symbol);
        } else if (flags & symbol_flags::FUNCTION) != 0 {
            self.resolve_function_symbol(symbol);
        } else if (flags & symbol_flags::NAMESPACE) != 0 {
            if (flags & symbol_flags::ENUM) != 0 {
                self.resolve_enum_symbol(symbol);
            } else {
                self.resolve_plain_namespace_symbol(symbol);
            }
        } else if (flags & symbol_flags::CONSTRUCTOR) != 0 {
            self.resolve_constructor_symbol(symbol);
        } else if (flags & symbol_flags::PROPERTY) != 0 {
            self.resolve_property_symbol(symbol);
        } else if (flags & symbol_flags::METHOD) != 0 {
            self.resolve_method_symbol(symbol);
        } else if (flags & symbol_flags::ACCESSOR) != 0 {
            self.resolve_accessor_symbol(symbol);
        } else if (flags & symbol_flags::ALIAS) != 0 {
            self.resolve_alias_symbol(symbol);
        } else if (flags & symbol_flags::TYPE_ALIAS) != 0 {
            self.resolve_type_alias_symbol(symbol);
        } else if (flags & symbol_flags::PROTOTYPE) != 0 {
            // Prototype symbols have no declaration counterpart.
        } else if (flags
            & (symbol_flags::BLOCK_SCOPED_VARIABLE | symbol_flags::FUNCTION_SCOPED_VARIABLE))
            != 0
        {
            // Block- and function-scoped variables are ignored.
        } else {
            error!(name = %sym.name, flags, "unprocessed symbol");
            self.diagnostics.warning(
                DiagnosticCategory::General,
                format!("unprocessed symbol `{}` (flags {:#x})", sym.name, flags),
            );
        }
    }

    /// Attach a resolved member declaration under a parent declaration.
    ///
    /// The metadata table is the de-duplication guard: a declaration already
    /// recorded under some parent is never attached again, even through a
    /// different symbol (paired accessors and multi-module re-exports share
    /// declarations). Returns whether the member list was extended.
    pub(crate) fn attach(
        &mut self,
        member_symbol: SymbolId,
        member_decl: DeclId,
        parent_decl: DeclId,
    ) -> bool {
        let already_placed = self
            .parent_map
            .get(&member_decl)
            .is_some_and(|meta| meta.direct_parent.is_some());
        if already_placed {
            return false;
        }
        if let Some(info) = self.symbols.get_mut(&member_symbol) {
            if info.parent.is_some() {
                return false;
            }
            info.parent = Some(parent_decl);
        }
        let full_path = format!(
            "{}.{}",
            self.full_path_of(parent_decl),
            self.arena.get(member_decl).name()
        );
        self.parent_map.insert(
            member_decl,
            DeclMeta {
                direct_parent: Some(parent_decl),
                full_path,
            },
        );
        self.arena.push_member(parent_decl, member_decl);
        true
    }

    /// Fully qualified path recorded for a declaration, empty when none is.
    pub(crate) fn full_path_of(&self, decl: DeclId) -> String {
        self.parent_map
            .get(&decl)
            .map(|meta| meta.full_path.clone())
            .unwrap_or_default()
    }

    /// Output name for a symbol: the declared name when its declaration
    /// carries one, the symbol name otherwise; `default` is renamed so the
    /// output stays identifier-safe.
    pub(crate) fn resolved_name(&self, symbol: SymbolId) -> String {
        let table = self.table;
        let name = table
            .decl_of(symbol)
            .and_then(|node| match node {
                SourceNode::Class { name, .. } | SourceNode::Function { name, .. } => name.clone(),
                _ => None,
            })
            .or_else(|| table.symbol(symbol).map(|s| s.name.clone()))
            .unwrap_or_default();
        if name == "default" {
            "__default".to_string()
        } else {
            name
        }
    }

    fn is_under_source_root(&self, path: &str) -> bool {
        let root = self.options.source_root.to_string_lossy();
        if root.is_empty() || root == "." {
            return true;
        }
        path.starts_with(root.as_ref())
    }

    /// Assemble the final artifacts. Consumes nothing; the emitter can still
    /// be inspected afterwards in tests.
    pub fn finish(&self) -> EmitOutput {
        let mut printer = DeclarationPrinter::new(&self.arena, &self.parent_map);

        // Top-level declarations surface in discovery order, but only those
        // that were never attached as a member of another declaration.
        let mut output = String::new();
        for &symbol in &self.exported {
            let Some(info) = self.info(symbol) else {
                continue;
            };
            let Some(decl) = info.decl else {
                continue;
            };
            if !self.arena.get(decl).is_top_level() || info.parent.is_some() {
                continue;
            }
            output.push_str(&printer.print_top_level(decl));
        }
        output.push_str(&printer.print_top_level(self.modules_root));

        EmitOutput {
            declarations: output,
            namespaces_log: self.namespaces_log.join("\n"),
            diagnostics: self.diagnostics.clone(),
        }
    }
}
