//! Emitter configuration.

use std::path::PathBuf;

/// Where the primary artifact goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Write `<name>.d.ts` and `namespaces.log` into this directory,
    /// creating it if needed.
    Directory(PathBuf),
    /// Print the declaration text to stdout; no log file is written.
    Console,
}

impl Destination {
    /// Parse the CLI destination value; the literal `console` is a sentinel.
    pub fn parse(value: &str) -> Destination {
        if value == "console" {
            Destination::Console
        } else {
            Destination::Directory(PathBuf::from(value))
        }
    }
}

/// Options for one emit run. Consumed by the driver and the emitter core.
#[derive(Clone, Debug)]
pub struct EmitterOptions {
    /// Input file or directory paths. Directories are searched recursively
    /// for `.js` sources.
    pub inputs: Vec<PathBuf>,
    pub destination: Destination,
    /// Regular expressions tested against normalized file paths; matching
    /// files are skipped entirely.
    pub excludes: Vec<String>,
    /// Root used to derive namespace path segments.
    pub source_root: PathBuf,
    /// Base name of the primary artifact (`<name>.d.ts`).
    pub name: String,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        EmitterOptions {
            inputs: Vec::new(),
            destination: Destination::Console,
            excludes: Vec::new(),
            source_root: PathBuf::from("."),
            name: "library".to_string(),
        }
    }
}
