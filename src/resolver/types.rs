//! Type translation: JSDoc type expressions to output types.
//!
//! This is a total function. Keywords map directly, composite shapes recurse,
//! and anything unrecognized erodes to `any` with a logged diagnostic; the
//! translator never fails a run. Import-type expressions resolve their
//! referenced symbol through the memoizing resolver and emit a reference to
//! its already-synthesized name.

use tracing::error;

use crate::diagnostics::DiagnosticCategory;
use crate::dom::{ObjectTypeMember, Parameter, Type};
use crate::frontend::{ParamDecl, TypeExpr};

use super::Emitter;

impl<'a> Emitter<'a> {
    pub(crate) fn translate_type(&mut self, expr: &TypeExpr) -> Type {
        match expr {
            TypeExpr::Any | TypeExpr::Unknown => Type::Any,
            TypeExpr::Number => Type::Number,
            TypeExpr::Boolean => Type::Boolean,
            TypeExpr::String => Type::String,
            TypeExpr::Object => Type::Object,
            TypeExpr::Void => Type::Void,
            TypeExpr::This => Type::This,
            TypeExpr::Null => Type::Null,
            // The undefined keyword carries no information on its own.
            TypeExpr::Undefined => Type::Any,

            TypeExpr::Named { name } => Type::Named(name.clone()),
            TypeExpr::Array { element } => Type::Array(Box::new(self.translate_type(element))),
            TypeExpr::Union { members } => {
                Type::Union(members.iter().map(|m| self.translate_type(m)).collect())
            }
            TypeExpr::NumberLiteral { value } => Type::NumberLiteral(*value),
            TypeExpr::StringLiteral { value } => Type::StringLiteral(value.clone()),

            TypeExpr::TypeLiteral { members } => Type::ObjectType(
                members
                    .iter()
                    .map(|member| ObjectTypeMember {
                        name: member.name.clone(),
                        ty: member
                            .ty
                            .as_ref()
                            .map(|t| self.translate_type(t))
                            .unwrap_or(Type::Any),
                        optional: false,
                    })
                    .collect(),
            ),

            TypeExpr::FunctionType {
                params,
                return_type,
            } => {
                let params = params
                    .iter()
                    .enumerate()
                    .map(|(index, param)| {
                        let name = match &param.name {
                            Some(name) => name.clone(),
                            None => {
                                let synthetic = format!("param_{index}");
                                error!(param = %synthetic, "unnamed parameter in function type");
                                self.diagnostics.warning(
                                    DiagnosticCategory::UnrepresentableType,
                                    format!(
                                        "unnamed parameter in function type renamed to `{synthetic}`"
                                    ),
                                );
                                synthetic
                            }
                        };
                        Parameter {
                            name,
                            ty: param
                                .ty
                                .as_ref()
                                .map(|t| self.translate_type(t))
                                .unwrap_or(Type::Any),
                            optional: false,
                        }
                    })
                    .collect();
                Type::FunctionType {
                    params,
                    return_type: Box::new(
                        return_type
                            .as_ref()
                            .map(|t| self.translate_type(t))
                            .unwrap_or(Type::Any),
                    ),
                }
            }

            TypeExpr::JsDocAll => Type::Any,
            TypeExpr::JsDocOptional { inner } => {
                Type::Union(vec![self.translate_type(inner), Type::Undefined])
            }
            TypeExpr::JsDocNullable { inner } => {
                Type::Union(vec![self.translate_type(inner), Type::Null])
            }
            TypeExpr::JsDocTypeLiteral {
                properties,
                is_array,
            } => {
                let members = properties
                    .iter()
                    .map(|prop| ObjectTypeMember {
                        // Qualified property names keep only their last part.
                        name: prop
                            .name
                            .rsplit('.')
                            .next()
                            .unwrap_or(&prop.name)
                            .to_string(),
                        ty: prop
                            .ty
                            .as_ref()
                            .map(|t| self.translate_type(t))
                            .unwrap_or(Type::Any),
                        optional: prop.bracketed,
                    })
                    .collect();
                let object = Type::ObjectType(members);
                if *is_array {
                    Type::Array(Box::new(object))
                } else {
                    object
                }
            }

            TypeExpr::Import { symbol } => {
                if symbol.is_none() {
                    error!("import type expression has no symbol");
                    self.diagnostics.error(
                        DiagnosticCategory::UnrepresentableType,
                        "import type expression has no symbol",
                    );
                    return Type::Any;
                }
                let info = self.resolve(*symbol);
                match info.decl {
                    Some(decl) => Type::Named(self.arena.get(decl).name().to_string()),
                    None => {
                        error!("import type expression has an unresolved symbol");
                        self.diagnostics.error(
                            DiagnosticCategory::UnrepresentableType,
                            "import type expression has an unresolved symbol",
                        );
                        Type::Any
                    }
                }
            }

            TypeExpr::Unsupported { text } => {
                error!(text = %text, "unrecognized type");
                self.diagnostics.error(
                    DiagnosticCategory::UnrepresentableType,
                    format!("unrecognized type `{text}`"),
                );
                Type::Any
            }
        }
    }

    /// Parameters for a function-like declaration; undocumented parameters
    /// default to `any`.
    pub(crate) fn make_params(&mut self, params: &[ParamDecl]) -> Vec<Parameter> {
        params
            .iter()
            .map(|param| Parameter {
                name: param.name.clone(),
                ty: param
                    .ty
                    .as_ref()
                    .map(|t| self.translate_type(t))
                    .unwrap_or(Type::Any),
                optional: param.optional,
            })
            .collect()
    }

    pub(crate) fn make_return_type(&mut self, return_type: Option<&TypeExpr>) -> Type {
        return_type
            .map(|t| self.translate_type(t))
            .unwrap_or(Type::Any)
    }
}
