//! Diagnostic infrastructure.
//!
//! Recoverable problems never abort a run; they are logged through `tracing`
//! and collected here so a host can inspect what degraded. Each diagnostic
//! carries the taxonomy category of the failure it records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning = 2,
    Error = 1,
}

impl DiagnosticSeverity {
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Recoverable failure categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    /// A symbol's declaration node does not match its kind's expectation.
    MalformedDeclaration,
    /// An extends/implements target resolved to the wrong kind, or not at all.
    UnrepresentableHeritage,
    /// A type shape was not recognized and eroded to `any`.
    UnrepresentableType,
    /// A configured source file had no module symbol in the table.
    MissingModule,
    /// Anything else worth surfacing (unprocessed symbol kinds etc.).
    General,
}

/// A single recoverable diagnostic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub category: DiagnosticCategory,
    pub message: String,
}

impl Diagnostic {
    pub fn format(&self) -> String {
        format!("{}: {}", self.severity, self.message)
    }
}

/// A collection of diagnostics for one emit run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> DiagnosticBag {
        DiagnosticBag::default()
    }

    pub fn error(&mut self, category: DiagnosticCategory, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: DiagnosticSeverity::Error,
            category,
            message: message.into(),
        });
    }

    pub fn warning(&mut self, category: DiagnosticCategory, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: DiagnosticSeverity::Warning,
            category,
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Count of diagnostics in a given category.
    pub fn count_of(&self, category: DiagnosticCategory) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == category)
            .count()
    }
}
