//! Host-side orchestration.
//!
//! The driver owns everything the core treats as external: loading the front
//! end's symbol table, discovering input files, applying exclude patterns,
//! and writing the artifacts. The core's only fatal condition surfaces here:
//! a run whose configured inputs cannot be located in the front end's output
//! aborts before any resolution happens.

use std::fs;
use std::path::Path;

use regex::Regex;
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

use crate::diagnostics::DiagnosticCategory;
use crate::frontend::SymbolTable;
use crate::options::{Destination, EmitterOptions};
use crate::resolver::{EmitOutput, Emitter};

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot read symbol table `{path}`: {source}")]
    TableRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse symbol table `{path}`: {source}")]
    TableParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid exclude pattern `{pattern}`: {source}")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("no configured input resolves to a module in the front end's output")]
    EntryNotFound,
    #[error("cannot write output `{path}`: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load a front-end symbol table from its JSON serialization.
pub fn load_table(path: &Path) -> Result<SymbolTable, EmitError> {
    let text = fs::read_to_string(path).map_err(|source| EmitError::TableRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| EmitError::TableParse {
        path: path.display().to_string(),
        source,
    })
}

/// Collect the normalized `.js` paths named by the configured inputs.
/// Directories are searched recursively; excluded paths are skipped entirely.
pub fn gather_inputs(options: &EmitterOptions) -> Result<Vec<String>, EmitError> {
    let excludes = compile_excludes(&options.excludes)?;
    let mut inputs = Vec::new();
    let mut add_file = |path: &Path| {
        let normalized = normalize_path(path);
        if excludes.iter().any(|re| re.is_match(&normalized)) {
            return;
        }
        inputs.push(normalized);
    };
    for input in &options.inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).into_iter().filter_map(Result::ok) {
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "js") {
                    add_file(path);
                }
            }
        } else {
            add_file(input);
        }
    }
    Ok(inputs)
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Regex>, EmitError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| EmitError::InvalidExclude {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Run one emit over an already-loaded table.
///
/// When inputs are configured, each file must be present in the table; files
/// without a module symbol are reported, and a run where *none* of them
/// resolves aborts with [`EmitError::EntryNotFound`]. With no inputs, every
/// module under the source root is processed.
pub fn emit(table: &SymbolTable, options: &EmitterOptions) -> Result<EmitOutput, EmitError> {
    let inputs = gather_inputs(options)?;
    let mut emitter = Emitter::new(table, options);

    if !inputs.is_empty() {
        let mut located = 0usize;
        for input in &inputs {
            if table.module_for_file(input).is_some() {
                located += 1;
            } else {
                warn!(file = %input, "source file has no module symbol");
                emitter.diagnostics.warning(
                    DiagnosticCategory::MissingModule,
                    format!("source file `{input}` has no module symbol"),
                );
            }
        }
        if located == 0 {
            return Err(EmitError::EntryNotFound);
        }
    }

    emitter.run();
    Ok(emitter.finish())
}

/// Write the artifacts to the configured destination. The `console` sentinel
/// prints the declaration text to stdout and writes no log file.
pub fn write_output(output: &EmitOutput, options: &EmitterOptions) -> Result<(), EmitError> {
    match &options.destination {
        Destination::Console => {
            println!("{}", output.declarations);
            Ok(())
        }
        Destination::Directory(dir) => {
            fs::create_dir_all(dir).map_err(|source| EmitError::OutputWrite {
                path: dir.display().to_string(),
                source,
            })?;
            let dts_path = dir.join(format!("{}.d.ts", options.name));
            fs::write(&dts_path, &output.declarations).map_err(|source| {
                EmitError::OutputWrite {
                    path: dts_path.display().to_string(),
                    source,
                }
            })?;
            let log_path = dir.join("namespaces.log");
            fs::write(&log_path, &output.namespaces_log).map_err(|source| {
                EmitError::OutputWrite {
                    path: log_path.display().to_string(),
                    source,
                }
            })
        }
    }
}
