//! Namespace tree assembly and export propagation.
//!
//! Each source-file module symbol is placed in a namespace chain derived from
//! its path relative to the configured source root, under the synthetic
//! `__unpacked` root. One namespace node exists per unique path segment
//! regardless of discovery order: the current namespace's members are
//! searched by name before a new node is created. Segment names are mangled
//! to be identifier-safe and prefixed so they cannot collide with reserved
//! words.
//!
//! Exports are then attached into the module's namespace. The metadata table
//! is checked before every insertion, so a declaration re-exported from
//! several modules lands in exactly one member list, the first to propagate
//! it.

use crate::dom::{DeclId, DeclMeta, Declaration};
use crate::frontend::{SourceNode, SymbolId, symbol_flags};

use super::Emitter;

impl<'a> Emitter<'a> {
    pub(crate) fn resolve_file_module_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(SourceNode::SourceFile { path }) = table.decl_of(symbol) else {
            self.malformed(symbol, "module symbol without a source-file declaration");
            return;
        };
        let relative = self.relative_to_source_root(path);

        let mut current = self.modules_root;
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            let name = file_module_name(segment);
            current = match self.arena.find_member(current, &name) {
                Some(existing) => existing,
                None => {
                    let member = self.arena.add(Declaration::Namespace {
                        name: name.clone(),
                        members: Vec::new(),
                    });
                    self.arena.push_member(current, member);
                    // Recorded at creation time: declarations referencing
                    // this namespace may be finalized before the whole tree
                    // is built.
                    let full_path = format!("{}.{name}", self.full_path_of(current));
                    self.parent_map.insert(
                        member,
                        DeclMeta {
                            direct_parent: Some(current),
                            full_path,
                        },
                    );
                    member
                }
            };
        }

        self.finalize(symbol, current);
        self.resolve_exports(symbol, current);
    }

    /// Enumerate and attach a module's exports. When the module symbol is an
    /// alias, exports are read from the true exporting symbol behind it.
    pub(crate) fn resolve_exports(&mut self, symbol: SymbolId, namespace: DeclId) {
        let table = self.table;
        let exporting = if table
            .symbol(symbol)
            .is_some_and(|s| s.has_flag(symbol_flags::ALIAS))
        {
            table.aliased_symbol(symbol)
        } else {
            symbol
        };
        let exports = table.exports_of(exporting).to_vec();
        for export in exports {
            let info = self.resolve(export);
            // Unresolved exports are dropped; ambient and type-only exports
            // commonly have no declaration counterpart.
            if let Some(decl) = info.decl {
                self.attach(export, decl, namespace);
            }
        }
    }

    fn relative_to_source_root(&self, path: &str) -> String {
        let normalized = path.replace('\\', "/");
        let root = self
            .options
            .source_root
            .to_string_lossy()
            .replace('\\', "/");
        let stripped = normalized
            .strip_prefix(root.trim_end_matches('/'))
            .unwrap_or(&normalized);
        stripped.trim_start_matches('/').to_string()
    }
}

/// Identifier-safe namespace segment for a path component: periods and
/// hyphens replaced, `__` prefix to dodge reserved words.
pub(crate) fn file_module_name(segment: &str) -> String {
    format!("__{}", segment.replace(['.', '-'], "_"))
}
