//! One generator run: load declarations, resolve, synthesize, write.

use anyhow::{Context, Result, bail};
use autoinject_common::{Diagnostic, DiagnosticCategory};
use autoinject_decl::{DeclarationSource, DeclarationStore};
use autoinject_emitter::{GeneratedFile, generate_batch};
use autoinject_resolver::BatchResolver;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};
use walkdir::WalkDir;

use crate::args::{CliArgs, EmitMode};
use crate::config::{
    CONFIG_FILE_NAME, ResolvedSettings, load_config, resolve_config_path, resolve_settings,
};

/// File written for `--emit json` when an output directory is set.
pub const JSON_OUTPUT_NAME: &str = "autoinject.generated.json";

#[derive(Debug, Clone)]
pub struct RunResult {
    pub diagnostics: Vec<Diagnostic>,
    pub generated: Vec<GeneratedFile>,
    /// Files written under the output directory.
    pub emitted_files: Vec<PathBuf>,
    pub files_read: Vec<PathBuf>,
    pub settings: ResolvedSettings,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }
}

/// `--emit json` document.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'r> {
    pub files: &'r [GeneratedFile],
    pub diagnostics: &'r [Diagnostic],
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let config_path = resolve_config_path(cwd, args.project.as_deref())?;
    let config = config_path.as_deref().map(load_config).transpose()?;
    let config_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(cwd)
        .to_path_buf();
    let settings = resolve_settings(config.as_ref(), &config_dir, args, cwd)?;
    debug!(?settings, "resolved settings");

    let files = collect_input_files(&settings.inputs)?;
    if files.is_empty() {
        bail!(
            "no declaration files found; pass files or directories, or list them under `files` in {CONFIG_FILE_NAME}"
        );
    }
    let store = load_store(&files)?;

    let _span = info_span!("run", files = files.len(), types = store.len()).entered();
    let batch = store.annotated_types();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut resolver = BatchResolver::new(&store, settings.options.clone());
    let results = resolver.resolve_batch(&batch, &mut diagnostics);
    info!(
        resolved = results.len(),
        dequeues = resolver.stats().total_dequeues(),
        deferrals = resolver.stats().deferrals(),
        "batch resolved"
    );
    let generated = generate_batch(&results);

    let emitted_files = match (&settings.out_dir, settings.emit) {
        (Some(out_dir), EmitMode::Source) => write_sources(out_dir, &generated)?,
        (Some(out_dir), EmitMode::Json) => {
            vec![write_json(out_dir, &generated, &diagnostics)?]
        }
        _ => Vec::new(),
    };

    Ok(RunResult {
        diagnostics,
        generated,
        emitted_files,
        files_read: files,
        settings,
    })
}

/// Expand directories into the `.json` declaration files below them, in a
/// stable order. The config file itself is never an input.
pub fn collect_input_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen = FxHashSet::default();
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(true)
                .sort_by_file_name()
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(
                            path = %err.path().unwrap_or(input.as_path()).display(),
                            error = %err,
                            "skipping unreadable entry"
                        );
                        continue;
                    }
                };
                let path = entry.path();
                if is_declaration_file(path) && seen.insert(path.to_path_buf()) {
                    files.push(path.to_path_buf());
                }
            }
        } else if input.is_file() {
            if seen.insert(input.clone()) {
                files.push(input.clone());
            }
        } else {
            bail!("input not found: {}", input.display());
        }
    }
    Ok(files)
}

fn is_declaration_file(path: &Path) -> bool {
    path.is_file()
        && path.extension().is_some_and(|ext| ext == "json")
        && path
            .file_name()
            .is_some_and(|name| name != CONFIG_FILE_NAME && name != JSON_OUTPUT_NAME)
}

pub fn load_store(files: &[PathBuf]) -> Result<DeclarationStore> {
    let mut store = DeclarationStore::new();
    for file in files {
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read declarations: {}", file.display()))?;
        let ids = store
            .extend_from_json_str(&source)
            .with_context(|| format!("failed to load declarations: {}", file.display()))?;
        debug!(file = %file.display(), types = ids.len(), "loaded declarations");
    }
    Ok(store)
}

fn write_sources(out_dir: &Path, generated: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    let mut written = Vec::with_capacity(generated.len());
    for file in generated {
        let path = out_dir.join(&file.hint_name);
        std::fs::write(&path, &file.source)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn write_json(out_dir: &Path, generated: &[GeneratedFile], diagnostics: &[Diagnostic]) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    let path = out_dir.join(JSON_OUTPUT_NAME);
    std::fs::write(&path, render_json(generated, diagnostics)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn render_json(generated: &[GeneratedFile], diagnostics: &[Diagnostic]) -> Result<String> {
    let report = JsonReport {
        files: generated,
        diagnostics,
    };
    serde_json::to_string_pretty(&report).context("failed to serialize output")
}

/// Generated sources concatenated for stdout, each preceded by its file name.
pub fn render_sources(generated: &[GeneratedFile]) -> String {
    let mut out = String::new();
    for file in generated {
        out.push_str("// ");
        out.push_str(&file.hint_name);
        out.push('\n');
        out.push_str(&file.source);
        out.push('\n');
    }
    out
}
