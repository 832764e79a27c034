//! Declaration serializer.
//!
//! Renders a synthesized declaration tree to declaration-file text. Named
//! cross-references (base types, class aliases) are printed with the fully
//! qualified path recorded in the metadata table, falling back to the bare
//! declared name when a declaration was never placed in the tree.

#[cfg(test)]
mod tests;

use crate::dom::{DeclArena, DeclId, Declaration, Parameter, ParentMap, Type};

/// Prints declarations as TypeScript declaration syntax.
pub struct DeclarationPrinter<'a> {
    arena: &'a DeclArena,
    parent_map: &'a ParentMap,
    writer: String,
    indent_level: u32,
}

impl<'a> DeclarationPrinter<'a> {
    pub fn new(arena: &'a DeclArena, parent_map: &'a ParentMap) -> DeclarationPrinter<'a> {
        DeclarationPrinter {
            arena,
            parent_map,
            writer: String::with_capacity(4096),
            indent_level: 0,
        }
    }

    /// Render one top-level declaration (with its subtree) to text.
    pub fn print_top_level(&mut self, decl: DeclId) -> String {
        self.writer.clear();
        self.indent_level = 0;
        self.emit_decl(decl, true);
        std::mem::take(&mut self.writer)
    }

    fn emit_decl(&mut self, id: DeclId, top_level: bool) {
        let declare = if top_level { "declare " } else { "" };
        match self.arena.get(id) {
            Declaration::Namespace { name, members } => {
                let members = members.clone();
                self.line(&format!("{declare}namespace {name} {{"));
                self.indent_level += 1;
                for member in members {
                    self.emit_decl(member, false);
                }
                self.indent_level -= 1;
                self.line("}");
            }
            Declaration::Class {
                name,
                members,
                base,
            } => {
                let members = members.clone();
                let heritage = base
                    .map(|b| {
                        let keyword = if self.arena.get(b).is_interface() {
                            "implements"
                        } else {
                            "extends"
                        };
                        format!(" {keyword} {}", self.qualified_name(b))
                    })
                    .unwrap_or_default();
                self.line(&format!("{declare}class {name}{heritage} {{"));
                self.indent_level += 1;
                for member in members {
                    self.emit_decl(member, false);
                }
                self.indent_level -= 1;
                self.line("}");
            }
            Declaration::Interface {
                name,
                members,
                base,
            } => {
                let members = members.clone();
                let heritage = base
                    .map(|b| format!(" extends {}", self.qualified_name(b)))
                    .unwrap_or_default();
                self.line(&format!("{declare}interface {name}{heritage} {{"));
                self.indent_level += 1;
                for member in members {
                    self.emit_decl(member, false);
                }
                self.indent_level -= 1;
                self.line("}");
            }
            Declaration::Enum { name } => {
                self.line(&format!("{declare}enum {name} {{"));
                self.line("}");
            }
            Declaration::Function {
                name,
                params,
                return_type,
            } => {
                let params = self.print_params(params);
                let ret = self.print_type(return_type);
                self.line(&format!("{declare}function {name}({params}): {ret};"));
            }
            Declaration::Method {
                name,
                params,
                return_type,
            } => {
                let params = self.print_params(params);
                let ret = self.print_type(return_type);
                self.line(&format!("{name}({params}): {ret};"));
            }
            Declaration::Constructor { params } => {
                let params = self.print_params(params);
                self.line(&format!("constructor({params});"));
            }
            Declaration::Property {
                name,
                ty,
                read_only,
            } => {
                let modifier = if *read_only { "readonly " } else { "" };
                let ty = self.print_type(ty);
                self.line(&format!("{modifier}{name}: {ty};"));
            }
            Declaration::Variable { name, ty } => {
                let ty = self.print_type(ty);
                self.line(&format!("{declare}let {name}: {ty};"));
            }
            Declaration::Alias { name, target } => {
                let target = self.qualified_name(*target);
                self.line(&format!("{declare}type {name} = {target};"));
            }
            Declaration::TypeAlias { name, ty } => {
                let ty = self.print_type(ty);
                self.line(&format!("{declare}type {name} = {ty};"));
            }
        }
    }

    /// Qualified reference to a declaration: its recorded full path when it
    /// was placed in the tree, its bare name otherwise.
    fn qualified_name(&self, decl: DeclId) -> String {
        match self.parent_map.get(&decl) {
            Some(meta) if !meta.full_path.is_empty() => meta.full_path.clone(),
            _ => self.arena.get(decl).name().to_string(),
        }
    }

    fn print_params(&self, params: &[Parameter]) -> String {
        params
            .iter()
            .map(|param| {
                let marker = if param.optional { "?" } else { "" };
                format!("{}{marker}: {}", param.name, self.print_type(&param.ty))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn print_type(&self, ty: &Type) -> String {
        match ty {
            Type::Any => "any".to_string(),
            Type::Number => "number".to_string(),
            Type::Boolean => "boolean".to_string(),
            Type::String => "string".to_string(),
            Type::Object => "object".to_string(),
            Type::Void => "void".to_string(),
            Type::This => "this".to_string(),
            Type::Null => "null".to_string(),
            Type::Undefined => "undefined".to_string(),
            Type::Named(name) => name.clone(),
            Type::Array(element) => {
                let inner = self.print_type(element);
                if matches!(**element, Type::Union(_) | Type::FunctionType { .. }) {
                    format!("({inner})[]")
                } else {
                    format!("{inner}[]")
                }
            }
            Type::Union(members) => members
                .iter()
                .map(|m| self.print_type(m))
                .collect::<Vec<_>>()
                .join(" | "),
            Type::NumberLiteral(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            Type::StringLiteral(value) => format!("\"{value}\""),
            Type::ObjectType(members) => {
                if members.is_empty() {
                    return "{}".to_string();
                }
                let body = members
                    .iter()
                    .map(|member| {
                        let marker = if member.optional { "?" } else { "" };
                        format!("{}{marker}: {}", member.name, self.print_type(&member.ty))
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("{{ {body} }}")
            }
            Type::FunctionType {
                params,
                return_type,
            } => {
                let params = self.print_params(params);
                format!("({params}) => {}", self.print_type(return_type))
            }
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.writer.push_str("    ");
        }
        self.writer.push_str(text);
        self.writer.push('\n');
    }
}
