//! Runs a Cinder program and prints the final canvas.
//!
//! Usage: `cinder <file>` or `cinder -c <code>`, plus `--ast` /
//! `--canonical` to inspect instead of run.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use cinder_grammar::{Grammar, SYMBOLIC, VERBOSE};
use cinder_runtime::{Context, Renderer};

#[derive(Parser, Debug)]
#[command(name = "cinder")]
#[command(about = "Run a Cinder program and print the drawn canvas")]
struct Args {
    /// Path to the program file.
    file: Option<PathBuf>,

    /// Inline program code instead of a file.
    #[arg(short = 'c', long = "code")]
    code: Option<String>,

    /// Parse with the verbose keyword syntax instead of the symbolic
    /// one.
    #[arg(long = "verbose-syntax")]
    verbose_syntax: bool,

    /// Print the parse tree instead of running.
    #[arg(long)]
    ast: bool,

    /// Print the canonical symbolic spelling instead of running.
    #[arg(long)]
    canonical: bool,

    /// Queue an input line (repeatable).
    #[arg(short = 'i', long = "input")]
    inputs: Vec<String>,

    /// Seed the RNG for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

/// Initialize logging with a default filter; `RUST_LOG` overrides.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cinder_parser=info,cinder_runtime=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Renderer for `Dump`/`Refresh` frames: each frame replaces nothing,
/// it just prints with a separating blank line.
struct StdoutRenderer;

impl Renderer for StdoutRenderer {
    fn frame(&mut self, snapshot: &str) {
        println!("{snapshot}");
        println!();
    }
}

fn main() {
    init_logging();
    let args = Args::parse();

    let source = match (&args.code, &args.file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                error!("failed to read {}: {err}", path.display());
                process::exit(1);
            }
        },
        (None, None) => {
            error!("no program: pass a file or -c <code>");
            process::exit(2);
        }
    };
    // File programs end with the editor's trailing newline; it is not
    // part of the program.
    let source = source.trim_end_matches('\n');

    let grammar: &Grammar = if args.verbose_syntax {
        &VERBOSE
    } else {
        &SYMBOLIC
    };

    if args.ast {
        match cinder_parser::parse_ast(source, grammar) {
            Ok(tree) => print!("{}", tree.outline()),
            Err(err) => {
                error!("{err}");
                process::exit(1);
            }
        }
        return;
    }

    if args.canonical {
        match cinder_parser::canonicalize(source, grammar) {
            Ok(canonical) => println!("{canonical}"),
            Err(err) => {
                error!("{err}");
                process::exit(1);
            }
        }
        return;
    }

    let program = match cinder_parser::compile(source, grammar) {
        Ok(program) => program,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    let mut ctx = match args.seed {
        Some(seed) => Context::with_seed(seed),
        None => Context::new(),
    };
    for input in &args.inputs {
        ctx.queue_input(input.clone());
    }
    ctx.install_renderer(Box::new(StdoutRenderer));

    if let Err(err) = program.run(&mut ctx) {
        error!("runtime error: {err}");
        process::exit(1);
    }
    info!(cells = ctx.canvas.len(), "run finished");
    let canvas = ctx.snapshot();
    if !canvas.is_empty() {
        println!("{canvas}");
    }
}
