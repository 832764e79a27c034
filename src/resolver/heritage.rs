//! Heritage resolution: extends/implements clauses to base-type links.
//!
//! A class declaration carries a single base-type slot. `extends` must
//! resolve to a class and `implements` to an interface; any mismatch or
//! unresolved target is logged and the link is left unset. Resolution
//! failures here never abort anything.

use tracing::error;

use crate::diagnostics::DiagnosticCategory;
use crate::dom::{DeclId, Declaration};
use crate::frontend::{HeritageClause, HeritageKind};

use super::Emitter;

impl<'a> Emitter<'a> {
    pub(crate) fn resolve_heritage(&mut self, class_decl: DeclId, clause: &HeritageClause) {
        if clause.target.is_none() {
            return;
        }
        let class_name = self.arena.get(class_decl).name().to_string();
        let info = self.resolve(clause.target);
        let Some(base) = info.decl else {
            error!(class = %class_name, heritage = %clause.written_name, "heritage cannot be resolved");
            self.diagnostics.error(
                DiagnosticCategory::UnrepresentableHeritage,
                format!(
                    "`{class_name}`'s heritage `{}` cannot be resolved",
                    clause.written_name
                ),
            );
            return;
        };

        let base_ok = match clause.keyword {
            HeritageKind::Extends => self.arena.get(base).is_class(),
            HeritageKind::Implements => self.arena.get(base).is_interface(),
        };
        if !base_ok {
            let expected = match clause.keyword {
                HeritageKind::Extends => "a class",
                HeritageKind::Implements => "an interface",
            };
            error!(class = %class_name, heritage = %clause.written_name, "heritage resolved to wrong kind");
            self.diagnostics.error(
                DiagnosticCategory::UnrepresentableHeritage,
                format!(
                    "`{class_name}`'s heritage `{}` shall resolve to {expected}",
                    clause.written_name
                ),
            );
            return;
        }

        // Single base-type slot; the first resolvable entry wins.
        if let Declaration::Class {
            base: slot, ..
        } = self.arena.get_mut(class_decl)
        {
            if slot.is_none() {
                *slot = Some(base);
            } else {
                self.diagnostics.warning(
                    DiagnosticCategory::UnrepresentableHeritage,
                    format!(
                        "`{class_name}` already has a base type; `{}` is not represented",
                        clause.written_name
                    ),
                );
            }
        }
    }
}
