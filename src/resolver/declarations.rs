//! Per-kind declaration synthesis rules.
//!
//! Each rule computes the output declaration for one symbol kind and recurses
//! into dependents (members, heritage targets, aliased symbols) through the
//! memoizing `resolve`. A rule that cannot interpret its symbol's declaration
//! node records a diagnostic and returns without finalizing, leaving the
//! symbol unresolved; unresolved is a normal terminal state, never an error.

use tracing::{debug, error};

use crate::diagnostics::DiagnosticCategory;
use crate::dom::{DeclId, Declaration, Type};
use crate::frontend::{SourceNode, SymbolId, ValueExpr, symbol_flags};

use super::Emitter;

impl<'a> Emitter<'a> {
    pub(crate) fn resolve_class_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(SourceNode::Class { heritage, .. }) = table.decl_of(symbol) else {
            self.malformed(symbol, "class symbol without a class declaration");
            return;
        };
        let heritage = heritage.clone();

        let decl = self.arena.add(Declaration::Class {
            name: self.resolved_name(symbol),
            members: Vec::new(),
            base: None,
        });
        for clause in &heritage {
            self.resolve_heritage(decl, clause);
        }
        self.finalize(symbol, decl);
        self.resolve_members(symbol, decl);
    }

    pub(crate) fn resolve_enum_symbol(&mut self, symbol: SymbolId) {
        if self.table.decl_of(symbol).is_none() {
            return;
        }
        // Shell only; member population is a known gap in the resolution
        // rules and is preserved as such.
        let decl = self.arena.add(Declaration::Enum {
            name: self.resolved_name(symbol),
        });
        self.finalize(symbol, decl);
    }

    pub(crate) fn resolve_plain_namespace_symbol(&mut self, symbol: SymbolId) {
        let name = self.resolved_name(symbol);
        let flags = self.table.symbol(symbol).map(|s| s.flags).unwrap_or(0);
        self.namespaces_log
            .push(format!("Namespace {name} flags: {flags:#x}"));
        let decl = self.arena.add(Declaration::Namespace {
            name,
            members: Vec::new(),
        });
        self.finalize(symbol, decl);
    }

    pub(crate) fn resolve_function_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(SourceNode::Function {
            params,
            return_type,
            ..
        }) = table.decl_of(symbol)
        else {
            self.malformed(symbol, "function symbol without a function declaration");
            return;
        };
        let (params, return_type) = (params.clone(), return_type.clone());

        let params = self.make_params(&params);
        let return_type = self.make_return_type(return_type.as_ref());
        let decl = self.arena.add(Declaration::Function {
            name: self.resolved_name(symbol),
            params,
            return_type,
        });
        self.finalize(symbol, decl);
    }

    pub(crate) fn resolve_constructor_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(SourceNode::Constructor { params }) = table.decl_of(symbol) else {
            self.malformed(symbol, "constructor symbol without a constructor declaration");
            return;
        };
        let params = params.clone();

        let params = self.make_params(&params);
        let decl = self.arena.add(Declaration::Constructor { params });
        self.finalize(symbol, decl);
    }

    pub(crate) fn resolve_method_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(SourceNode::Method {
            params,
            return_type,
        }) = table.decl_of(symbol)
        else {
            self.malformed(symbol, "method symbol without a callable declaration");
            return;
        };
        let (params, return_type) = (params.clone(), return_type.clone());

        let params = self.make_params(&params);
        let return_type = self.make_return_type(return_type.as_ref());
        let name = table.symbol(symbol).map(|s| s.name.clone()).unwrap_or_default();
        let Some(decl) = self.make_function_member(symbol, name, params, return_type) else {
            return;
        };
        self.finalize(symbol, decl);
    }

    pub(crate) fn resolve_property_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(sym) = table.symbol(symbol) else {
            return;
        };
        match table.node(sym.value_decl) {
            Some(SourceNode::Property { type_tag }) => {
                let type_tag = type_tag.clone();
                let ty = type_tag
                    .as_ref()
                    .map(|t| self.translate_type(t))
                    .unwrap_or(Type::Any);
                if let Some(decl) = self.make_data_member(symbol, ty, false) {
                    self.finalize(symbol, decl);
                }
            }
            Some(SourceNode::Assignment { value }) if sym.has_flag(symbol_flags::ASSIGNMENT) => {
                let value = value.clone();
                debug!(name = %sym.name, "resolving assignment-based property");
                self.resolve_assignment_value(symbol, &value);
            }
            Some(SourceNode::ShorthandProperty { value_symbol }) => {
                let value_symbol = *value_symbol;
                let info = self.resolve(value_symbol);
                if let Some(decl) = info.decl {
                    self.finalize(symbol, decl);
                }
            }
            Some(other) => {
                let kind = format!("{other:?}");
                let name = sym.name.clone();
                error!(name = %name, node = %kind, "cannot resolve property");
                self.diagnostics.error(
                    DiagnosticCategory::MalformedDeclaration,
                    format!("cannot resolve property `{name}` from {kind}"),
                );
            }
            None => {}
        }
    }

    /// Accessors default to read-only; a same-named setter anywhere among the
    /// owning symbol's members makes the property mutable. A getter/setter
    /// pair collapses to one output property: when a paired sibling has
    /// already produced a declaration, this visit adopts it instead of
    /// emitting a second one.
    pub(crate) fn resolve_accessor_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let Some(sym) = table.symbol(symbol) else {
            return;
        };
        let Some(SourceNode::Accessor { type_tag, .. }) = table.node(sym.value_decl) else {
            self.malformed(symbol, "accessor symbol without an accessor declaration");
            return;
        };
        let type_tag = type_tag.clone();
        let name = sym.name.clone();

        // Scan the full sibling list, order-independent.
        let mut has_setter = sym.has_flag(symbol_flags::SET_ACCESSOR);
        let mut siblings: Vec<SymbolId> = Vec::new();
        if let Some(parent) = table.symbol(sym.parent) {
            for &member in &parent.members {
                if member == symbol {
                    continue;
                }
                let Some(member_sym) = table.symbol(member) else {
                    continue;
                };
                if member_sym.name == name && member_sym.has_flag(symbol_flags::ACCESSOR) {
                    siblings.push(member);
                    if member_sym.has_flag(symbol_flags::SET_ACCESSOR) {
                        has_setter = true;
                    }
                }
            }
        }

        for sibling in siblings {
            if let Some(info) = self.info(sibling) {
                if let Some(decl) = info.decl {
                    // Absorbed into the pair's existing property.
                    self.finalize(symbol, decl);
                    return;
                }
            }
        }

        let ty = type_tag
            .as_ref()
            .map(|t| self.translate_type(t))
            .unwrap_or(Type::Any);
        if let Some(decl) = self.make_data_member(symbol, ty, !has_setter) {
            self.finalize(symbol, decl);
        }
    }

    /// Re-export under a new local name. A class target is wrapped as a named
    /// alias referencing the class declaration, so later heritage and type
    /// lookups still see a class; any other resolved kind becomes a shallow
    /// copy with the name replaced.
    pub(crate) fn resolve_alias_symbol(&mut self, symbol: SymbolId) {
        let original = self.table.aliased_symbol(symbol);
        if original == symbol {
            self.malformed(symbol, "alias symbol without an aliased target");
            return;
        }
        let info = self.resolve(original);
        let Some(target) = info.decl else {
            return;
        };
        let decl = if self.arena.get(target).is_class() {
            self.arena.add(Declaration::Alias {
                name: self.resolved_name(symbol),
                target,
            })
        } else {
            let name = self
                .table
                .symbol(symbol)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            let copy = self.arena.get(target).copy_with_name(&name);
            self.arena.add(copy)
        };
        self.finalize(symbol, decl);
    }

    pub(crate) fn resolve_type_alias_symbol(&mut self, symbol: SymbolId) {
        let table = self.table;
        let ty = match table.decl_of(symbol) {
            Some(SourceNode::TypeAlias { ty }) => Some(ty.clone()),
            Some(SourceNode::Typedef { ty }) => Some(ty.clone().unwrap_or(crate::frontend::TypeExpr::Any)),
            _ => None,
        };
        let Some(ty) = ty else {
            return;
        };
        let ty = self.translate_type(&ty);
        let name = table.symbol(symbol).map(|s| s.name.clone()).unwrap_or_default();
        let decl = self.arena.add(Declaration::TypeAlias { name, ty });
        self.finalize(symbol, decl);
    }

    /// A value assigned onto a dotted path. An object-literal value becomes a
    /// fresh namespace populated from the literal's property symbols; any
    /// other value resolves its target symbol and applies the alias-vs-copy
    /// rule.
    pub(crate) fn resolve_assignment_value(&mut self, symbol: SymbolId, value: &ValueExpr) {
        match value {
            ValueExpr::ObjectLiteral { properties } => {
                let name = self
                    .table
                    .symbol(symbol)
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                let namespace = self.arena.add(Declaration::Namespace {
                    name,
                    members: Vec::new(),
                });
                self.finalize(symbol, namespace);
                for (_, property_symbol) in properties.clone() {
                    if property_symbol.is_none() {
                        continue;
                    }
                    let info = self.resolve(property_symbol);
                    if let Some(decl) = info.decl {
                        self.attach(property_symbol, decl, namespace);
                    }
                }
            }
            ValueExpr::Reference { target } => {
                if target.is_none() {
                    return;
                }
                let target = *target;
                let info = self.resolve(target);
                let Some(target_decl) = info.decl else {
                    return;
                };
                let name = self
                    .table
                    .symbol(symbol)
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                let decl = if self.arena.get(target_decl).is_class() {
                    // The renamed class surfaces at the top level; the
                    // assignment itself becomes a reference to it.
                    self.exported.insert(target);
                    self.arena.add(Declaration::Alias {
                        name,
                        target: target_decl,
                    })
                } else {
                    let copy = self.arena.get(target_decl).copy_with_name(&name);
                    self.arena.add(copy)
                };
                self.finalize(symbol, decl);
            }
        }
    }

    /// Resolve each member of the owning symbol and append the resolved ones
    /// to the parent declaration, recording parent metadata exactly once.
    pub(crate) fn resolve_members(&mut self, symbol: SymbolId, parent_decl: DeclId) {
        let Some(sym) = self.table.symbol(symbol) else {
            return;
        };
        let members = sym.members.clone();
        for member in members {
            let info = self.resolve(member);
            if let Some(decl) = info.decl {
                self.attach(member, decl, parent_decl);
            }
        }
    }

    /// Class members become properties; namespace and object-literal members
    /// become variables. Any other owner is a malformed declaration.
    fn make_data_member(&mut self, symbol: SymbolId, ty: Type, read_only: bool) -> Option<DeclId> {
        let table = self.table;
        let sym = table.symbol(symbol)?;
        let name = sym.name.clone();
        let Some(parent) = table.symbol(sym.parent) else {
            self.malformed(symbol, "member symbol without an owning symbol");
            return None;
        };
        if parent.has_flag(symbol_flags::CLASS) {
            Some(self.arena.add(Declaration::Property {
                name,
                ty,
                read_only,
            }))
        } else if parent.has_flag(symbol_flags::NAMESPACE)
            || parent.has_flag(symbol_flags::OBJECT_LITERAL)
        {
            Some(self.arena.add(Declaration::Variable { name, ty }))
        } else {
            self.malformed(symbol, "member symbol with an unsupported owner kind");
            None
        }
    }

    fn make_function_member(
        &mut self,
        symbol: SymbolId,
        name: String,
        params: Vec<crate::dom::Parameter>,
        return_type: Type,
    ) -> Option<DeclId> {
        let table = self.table;
        let sym = table.symbol(symbol)?;
        let Some(parent) = table.symbol(sym.parent) else {
            self.malformed(symbol, "member symbol without an owning symbol");
            return None;
        };
        if parent.has_flag(symbol_flags::CLASS) {
            Some(self.arena.add(Declaration::Method {
                name,
                params,
                return_type,
            }))
        } else if parent.has_flag(symbol_flags::NAMESPACE)
            || parent.has_flag(symbol_flags::OBJECT_LITERAL)
        {
            Some(self.arena.add(Declaration::Function {
                name,
                params,
                return_type,
            }))
        } else {
            self.malformed(symbol, "member symbol with an unsupported owner kind");
            None
        }
    }

    pub(crate) fn malformed(&mut self, symbol: SymbolId, what: &str) {
        let name = self
            .table
            .symbol(symbol)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        error!(name = %name, "{what}");
        self.diagnostics.error(
            DiagnosticCategory::MalformedDeclaration,
            format!("{what} (`{name}`)"),
        );
    }
}
