#![allow(clippy::print_stderr, clippy::print_stdout)]

use anyhow::{Context, Result};
use autoinject_cli::args::{CliArgs, EmitMode};
use autoinject_cli::driver::{self, render_json, render_sources};
use autoinject_cli::reporter::Reporter;
use autoinject_cli::tracing_config::init_tracing;
use autoinject_common::DiagnosticKind;
use clap::Parser;
use std::io::IsTerminal;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS_PRESENT: i32 = 1;

fn main() -> Result<()> {
    // AUTOINJECT_LOG / RUST_LOG gate; format via AUTOINJECT_LOG_FORMAT.
    init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(&args, &cwd)?;

    if args.list_files {
        for file in &result.files_read {
            println!("{}", file.display());
        }
    }

    if result.settings.out_dir.is_none() {
        match result.settings.emit {
            EmitMode::Source => print!("{}", render_sources(&result.generated)),
            EmitMode::Json => println!("{}", render_json(&result.generated, &result.diagnostics)?),
            EmitMode::None => {}
        }
    }

    let reportable: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.kind != DiagnosticKind::TypeProcessed)
        .cloned()
        .collect();
    if !reportable.is_empty() {
        let pretty = result
            .settings
            .pretty
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        let reporter = Reporter::new(pretty);
        eprint!("{}", reporter.render(&reportable));
        eprintln!("{}", reporter.summary(&reportable));
    }

    if result.has_errors() {
        std::process::exit(EXIT_DIAGNOSTICS_PRESENT);
    }
    std::process::exit(EXIT_SUCCESS);
}
