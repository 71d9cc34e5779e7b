//! `autoinject.json` loading and option layering.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! the config file, command-line flags.

use anyhow::{Context, Result, bail};
use autoinject_resolver::ResolverOptions;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::args::{CliArgs, EmitMode};

pub const CONFIG_FILE_NAME: &str = "autoinject.json";

/// Accept `true`/`false` as booleans or strings.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoInjectConfig {
    #[serde(default)]
    pub initializer_method_name: Option<String>,
    #[serde(default)]
    pub control_marker_type: Option<String>,
    #[serde(default)]
    pub control_marker_name: Option<String>,
    /// Relative to the config file's directory.
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub emit: Option<EmitMode>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub pretty: Option<bool>,
    /// Declaration files or directories, relative to the config file.
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

/// Fully layered settings for one run.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub options: ResolverOptions,
    pub out_dir: Option<PathBuf>,
    pub emit: EmitMode,
    pub pretty: Option<bool>,
    pub inputs: Vec<PathBuf>,
}

pub fn parse_config(source: &str) -> Result<AutoInjectConfig> {
    let config = serde_json::from_str(source).context("failed to parse autoinject.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<AutoInjectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// `autoinject.json` in `cwd`, if present.
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Locate the config file named by `--project`, or look in `cwd`.
pub fn resolve_config_path(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        return Ok(find_config(cwd));
    };

    let mut candidate = absolutize(cwd, project);
    if candidate.is_dir() {
        candidate = candidate.join(CONFIG_FILE_NAME);
    }
    if !candidate.exists() {
        bail!("config not found at {}", candidate.display());
    }
    if !candidate.is_file() {
        bail!("project path is not a file: {}", candidate.display());
    }
    Ok(Some(candidate))
}

/// Layer defaults, the config file and command-line flags.
///
/// Paths from the config file are relative to `config_dir`; paths from the
/// command line are relative to `cwd`. Fails when a configured name is not
/// a usable identifier.
pub fn resolve_settings(
    config: Option<&AutoInjectConfig>,
    config_dir: &Path,
    args: &CliArgs,
    cwd: &Path,
) -> Result<ResolvedSettings> {
    let defaults = AutoInjectConfig::default();
    let config = config.unwrap_or(&defaults);
    let mut options = ResolverOptions::default();

    let pick = |flag: &Option<String>, file: &Option<String>| flag.clone().or_else(|| file.clone());
    if let Some(name) = pick(&args.initializer_method_name, &config.initializer_method_name) {
        options.initializer_method_name = name;
    }
    if let Some(ty) = pick(&args.control_marker_type, &config.control_marker_type) {
        options.control_marker_type = ty;
    }
    if let Some(name) = pick(&args.control_marker_name, &config.control_marker_name) {
        options.control_marker_name = name;
    }

    let out_dir = match (&args.out_dir, &config.out_dir) {
        (Some(dir), _) => Some(absolutize(cwd, dir)),
        (None, Some(dir)) => Some(absolutize(config_dir, Path::new(dir))),
        (None, None) => None,
    };

    let inputs = if args.inputs.is_empty() {
        config
            .files
            .iter()
            .flatten()
            .map(|file| absolutize(config_dir, Path::new(file)))
            .collect()
    } else {
        args.inputs.iter().map(|input| absolutize(cwd, input)).collect()
    };

    options
        .validate()
        .context("invalid initializerMethodName or controlMarkerName")?;

    Ok(ResolvedSettings {
        options,
        out_dir,
        emit: args.emit.or(config.emit).unwrap_or_default(),
        pretty: args.pretty.or(config.pretty),
        inputs,
    })
}

pub(crate) fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
