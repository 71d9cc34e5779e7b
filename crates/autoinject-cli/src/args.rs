use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// CLI arguments for the autoinject binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "autoinject",
    version,
    about = "Generate dependency-injecting constructors for [AutoInject] partial classes"
)]
pub struct CliArgs {
    /// Declaration files (JSON) or directories to scan for them.
    pub inputs: Vec<PathBuf>,

    /// Path to autoinject.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Directory to write generated files to. Without it, output goes to stdout.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// What to produce.
    #[arg(long, value_enum, ignore_case = true)]
    pub emit: Option<EmitMode>,

    /// Name of the post-construction initializer method.
    #[arg(long = "initializerMethodName", alias = "initializer-method-name")]
    pub initializer_method_name: Option<String>,

    /// Fully qualified type of the control-marker parameter.
    #[arg(long = "controlMarkerType", alias = "control-marker-type")]
    pub control_marker_type: Option<String>,

    /// Declared name of the control-marker parameter.
    #[arg(long = "controlMarkerName", alias = "control-marker-name")]
    pub control_marker_name: Option<String>,

    /// Enable color in diagnostic output.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Print names of the declaration files read.
    #[arg(long = "listFiles", alias = "list-files")]
    pub list_files: bool,
}

/// Output produced by a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// One C# file per annotated type.
    #[default]
    Source,
    /// Synthesized constructors, generated text and diagnostics as JSON.
    Json,
    /// Resolve and report only.
    None,
}
