use std::path::{Path, PathBuf};

use super::args::{CliArgs, EmitMode};
use super::config::{
    AutoInjectConfig, CONFIG_FILE_NAME, parse_config, resolve_config_path, resolve_settings,
};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn test_parses_camel_case_keys() {
    let config = parse_config(
        r#"{
          "initializerMethodName": "Setup",
          "controlMarkerType": "Demo.NoInit",
          "controlMarkerName": "noInit",
          "outDir": "generated",
          "emit": "json",
          "files": ["decls", "extra/one.json"]
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.initializer_method_name.as_deref(), Some("Setup"));
    assert_eq!(config.control_marker_type.as_deref(), Some("Demo.NoInit"));
    assert_eq!(config.control_marker_name.as_deref(), Some("noInit"));
    assert_eq!(config.out_dir.as_deref(), Some("generated"));
    assert_eq!(config.emit, Some(EmitMode::Json));
    assert_eq!(
        config.files,
        Some(vec!["decls".to_string(), "extra/one.json".to_string()])
    );
    assert_eq!(config.pretty, None);
}

#[test]
fn test_pretty_accepts_bool_or_string() {
    let as_bool = parse_config(r#"{ "pretty": true }"#).expect("bool pretty");
    assert_eq!(as_bool.pretty, Some(true));

    let as_string = parse_config(r#"{ "pretty": "off" }"#).expect("string pretty");
    assert_eq!(as_string.pretty, Some(false));

    let err = parse_config(r#"{ "pretty": "sometimes" }"#).expect_err("invalid pretty");
    assert!(format!("{err:#}").contains("invalid boolean value"));
}

#[test]
fn test_empty_config_parses_to_defaults() {
    let config = parse_config("{}").expect("empty config");
    assert!(config.initializer_method_name.is_none());
    assert!(config.files.is_none());
    assert!(config.emit.is_none());
}

#[test]
fn test_settings_default_without_config_or_flags() {
    let cwd = Path::new("/work");
    let settings =
        resolve_settings(None, cwd, &CliArgs::default(), cwd).expect("default settings");

    assert_eq!(settings.options.initializer_method_name, "Initialize");
    assert_eq!(settings.options.control_marker_name, "@skipInitialize");
    assert_eq!(settings.emit, EmitMode::Source);
    assert!(settings.out_dir.is_none());
    assert!(settings.pretty.is_none());
    assert!(settings.inputs.is_empty());
}

#[test]
fn test_config_file_overrides_defaults() {
    let config = AutoInjectConfig {
        initializer_method_name: Some("Setup".to_string()),
        out_dir: Some("generated".to_string()),
        emit: Some(EmitMode::None),
        files: Some(vec!["decls".to_string()]),
        ..AutoInjectConfig::default()
    };
    let settings = resolve_settings(
        Some(&config),
        Path::new("/project"),
        &CliArgs::default(),
        Path::new("/work"),
    )
    .expect("file settings");

    assert_eq!(settings.options.initializer_method_name, "Setup");
    assert_eq!(settings.emit, EmitMode::None);
    assert_eq!(settings.out_dir, Some(PathBuf::from("/project/generated")));
    assert_eq!(settings.inputs, vec![PathBuf::from("/project/decls")]);
}

#[test]
fn test_flags_override_config_file() {
    let config = AutoInjectConfig {
        initializer_method_name: Some("Setup".to_string()),
        control_marker_name: Some("noInit".to_string()),
        out_dir: Some("generated".to_string()),
        emit: Some(EmitMode::None),
        pretty: Some(true),
        files: Some(vec!["decls".to_string()]),
        ..AutoInjectConfig::default()
    };
    let args = CliArgs {
        inputs: vec![PathBuf::from("local.json"), PathBuf::from("/abs/other.json")],
        out_dir: Some(PathBuf::from("out")),
        emit: Some(EmitMode::Json),
        initializer_method_name: Some("Init".to_string()),
        pretty: Some(false),
        ..CliArgs::default()
    };
    let settings = resolve_settings(Some(&config), Path::new("/project"), &args, Path::new("/work"))
        .expect("flag settings");

    assert_eq!(settings.options.initializer_method_name, "Init");
    assert_eq!(settings.options.control_marker_name, "noInit");
    assert_eq!(settings.emit, EmitMode::Json);
    assert_eq!(settings.pretty, Some(false));
    assert_eq!(settings.out_dir, Some(PathBuf::from("/work/out")));
    assert_eq!(
        settings.inputs,
        vec![
            PathBuf::from("/work/local.json"),
            PathBuf::from("/abs/other.json")
        ]
    );
}

#[test]
fn test_unusable_control_marker_name_is_rejected() {
    let config = AutoInjectConfig {
        control_marker_name: Some("@".to_string()),
        ..AutoInjectConfig::default()
    };
    let err = resolve_settings(
        Some(&config),
        Path::new("/project"),
        &CliArgs::default(),
        Path::new("/work"),
    )
    .expect_err("'@' is not an identifier");
    let text = format!("{err:#}");
    assert!(text.contains("controlMarkerName"));
    assert!(text.contains("'@' is not a usable identifier"));

    let args = CliArgs {
        control_marker_name: Some("@noInit".to_string()),
        ..CliArgs::default()
    };
    let settings = resolve_settings(Some(&config), Path::new("/project"), &args, Path::new("/work"))
        .expect("flag overrides the unusable name");
    assert_eq!(settings.options.control_marker_name, "@noInit");
}

#[test]
fn test_config_path_found_in_cwd() {
    let temp = tempfile::tempdir().expect("temp dir");
    assert_eq!(resolve_config_path(temp.path(), None).expect("no config"), None);

    let path = write_file(temp.path(), CONFIG_FILE_NAME, "{}");
    assert_eq!(
        resolve_config_path(temp.path(), None).expect("config in cwd"),
        Some(path)
    );
}

#[test]
fn test_project_flag_accepts_directory_or_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let nested = temp.path().join("nested");
    std::fs::create_dir_all(&nested).expect("nested dir");
    let path = write_file(&nested, CONFIG_FILE_NAME, "{}");

    let from_dir = resolve_config_path(temp.path(), Some(Path::new("nested")))
        .expect("directory project");
    assert_eq!(from_dir, Some(path.clone()));

    let from_file = resolve_config_path(temp.path(), Some(&path)).expect("file project");
    assert_eq!(from_file, Some(path));
}

#[test]
fn test_project_flag_reports_missing_config() {
    let temp = tempfile::tempdir().expect("temp dir");
    let err = resolve_config_path(temp.path(), Some(Path::new("missing.json")))
        .expect_err("missing config");
    assert!(err.to_string().contains("config not found"));
}
