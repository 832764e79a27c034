//! jsdts — declaration-file generation from JSDoc-annotated JavaScript.
//!
//! An external front end parses and type-checks the sources and hands this
//! crate one semantic [`frontend::SymbolTable`]. The [`resolver::Emitter`]
//! walks that symbol graph, synthesizes one output declaration per symbol
//! (memoized, cycle-safe), assembles a namespace hierarchy mirroring the
//! module structure, relinks inheritance, and translates JSDoc type
//! expressions. The [`printer`] renders the finished tree into a single
//! declaration-file document; the [`driver`] wires configuration, table
//! loading, and artifact writing together for the CLI.
//!
//! Unrepresentable constructs degrade instead of failing: unsupported
//! symbols stay unresolved, unknown types erode to `any`, and the run always
//! completes with diagnostics for whatever it could not represent.

pub mod diagnostics;
pub mod dom;
pub mod driver;
pub mod frontend;
pub mod options;
pub mod printer;
pub mod resolver;
pub mod tracing_config;

pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCategory, DiagnosticSeverity};
pub use driver::{EmitError, emit, gather_inputs, load_table, write_output};
pub use frontend::{NodeId, Symbol, SymbolId, SymbolTable, SymbolTableBuilder, symbol_flags};
pub use options::{Destination, EmitterOptions};
pub use resolver::{EmitOutput, Emitter, SymbolInfo};
