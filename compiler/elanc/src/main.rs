//! `elanc`: a small CLI wiring `FileSystemImporter`, `Essentials`, and
//! the Build-Graph/Name-Resolution phases together over a directory of
//! `.sp` modules, grounded on `snowc`'s clap-derive `Cli`/`Commands`
//! shape (`oric` itself predates clap in this workspace's dependency
//! set, so the CLI surface is borrowed from the other pack member that
//! already does this).

mod source_parser;
mod tracing_setup;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use elan_check::{BuildGraphPass, DefnTable, NameResolutionPass, PendingTypes};
use elan_driver::{Compiler, Phase};
use elan_ir::Path;

use source_parser::StubSourceParser;

#[derive(Parser)]
#[command(name = "elanc", version, about = "Semantic-analysis front end for elan")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build-Graph and Name-Resolution every `.sp` module under `root`,
    /// printing any diagnostics raised.
    Check {
        root: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_setup::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check { root } => match check(&root) {
            Ok(()) => ExitCode::SUCCESS,
            Err(()) => ExitCode::FAILURE,
        },
    }
}

/// Recursively collects every `.sp` file under `root`, paired with its
/// dotted module path relative to `root` (`app/main.sp` -> `app.main`).
/// `elan_ir::Path::read_dir_names` only lists immediate children
/// (`spec.md` §8.2 has no recursive variant), so the walk is plain
/// `std::fs` recursion instead.
fn discover_modules(root: &std::path::Path) -> Vec<String> {
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out
}

fn walk(root: &std::path::Path, dir: &std::path::Path, out: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, out);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "sp") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let mut parts: Vec<String> = relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
        if let Some(last) = parts.last_mut() {
            if let Some(stem) = last.strip_suffix(".sp") {
                *last = stem.to_string();
            }
        }
        out.push(parts.join("."));
    }
}

fn check(root: &std::path::Path) -> Result<(), ()> {
    if !root.is_dir() {
        eprintln!("error: {} is not a directory", root.display());
        return Err(());
    }

    let mut compiler = Compiler::new(Box::new(StubSourceParser));
    compiler.add_root(Path::new(root.to_path_buf()));
    compiler.load_essentials();

    for dotted in discover_modules(root) {
        compiler.import_module(&dotted);
    }

    let defs = DefnTable::new();
    let pending = PendingTypes::new();
    let mut build_graph = Phase::new("BuildGraph", vec![Box::new(BuildGraphPass::new(defs.clone(), pending.clone()))]);
    let mut name_resolution = Phase::new("NameResolution", vec![Box::new(NameResolutionPass::new(defs, pending))]);

    compiler.run_phase(&mut build_graph);
    compiler.run_phase(&mut name_resolution);

    let diagnostics = compiler.context.reporter.diagnostics();
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    if compiler.context.reporter.has_errors() {
        eprintln!("elanc: {} error(s), {} module(s) seen", compiler.context.reporter.error_count(), compiler.module_count());
        Err(())
    } else {
        eprintln!("elanc: ok, {} module(s) checked", compiler.module_count());
        Ok(())
    }
}
