//! Command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use jsdts::options::{Destination, EmitterOptions};
use jsdts::{driver, tracing_config};

/// Generate a TypeScript declaration file from a front-end symbol table.
#[derive(Parser, Debug)]
#[command(name = "jsdts", version, about)]
struct CliArgs {
    /// Front-end symbol table (JSON) for the checked program.
    #[arg(short = 't', long)]
    table: PathBuf,

    /// Output directory, or `console` to print to stdout.
    #[arg(short = 'd', long, default_value = "console")]
    destination: String,

    /// Regular expressions for input paths to skip entirely.
    #[arg(short = 'e', long = "exclude")]
    excludes: Vec<String>,

    /// Root path used to derive namespace segments.
    #[arg(short = 'r', long = "source-root", default_value = ".")]
    source_root: PathBuf,

    /// Base name of the generated declaration file (`<name>.d.ts`).
    #[arg(short = 'n', long, default_value = "library")]
    name: String,

    /// Input source files or directories; directories are searched
    /// recursively for `.js` files. With no inputs, every module under the
    /// source root is emitted.
    inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_config::init_tracing();
    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jsdts: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let options = EmitterOptions {
        inputs: args.inputs,
        destination: Destination::parse(&args.destination),
        excludes: args.excludes,
        source_root: args.source_root,
        name: args.name,
    };

    let table = driver::load_table(&args.table)
        .with_context(|| format!("loading {}", args.table.display()))?;
    let output = driver::emit(&table, &options)?;
    driver::write_output(&output, &options)?;

    for diagnostic in output.diagnostics.iter() {
        eprintln!("{}", diagnostic.format());
    }
    Ok(())
}
