//! Integration Tests for Configuration Loading

use pasteport::config::loader::LoadOptions;
use pasteport::{init_with_config, Config, ConfigLoader, Dispatcher, Error, ProcessDescriptor};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_partial_toml_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[upload]
manual_copy_command = "rsync -av"

[clipboard]
timeout_ms = 500
use_native = false
"#,
    )
    .unwrap();

    let config = init_with_config(&path).unwrap();
    assert_eq!(config.upload.manual_copy_command, "rsync -av");
    assert_eq!(config.upload.upload_root, "/tmp/uploads");
    assert_eq!(config.clipboard.timeout_ms, 500);
    assert!(!config.clipboard.use_native);
    assert!(!config.clipboard.mechanisms.is_empty());
    assert_eq!(config.detection, Config::default().detection);
}

#[test]
fn test_json_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "detection": { "multiplexer_commands": ["mosh", "et"] } }"#,
    )
    .unwrap();

    let config = init_with_config(&path).unwrap();
    assert_eq!(config.detection.multiplexer_commands, vec!["mosh", "et"]);
    assert_eq!(config.detection.wrapper_command, "kitten");
}

#[test]
fn test_parse_errors_name_the_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = init_with_config(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParseFailed { ref format, .. } if format == "JSON"));
}

#[test]
fn test_validation_rejects_empty_subcommands() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[detection]\nwrapper_subcommands = []\n").unwrap();

    assert!(matches!(
        init_with_config(&path),
        Err(Error::ConfigValidationFailed { .. })
    ));
}

#[test]
fn test_loaded_tokens_drive_classification() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[detection]\nremote_shell_command = \"dbclient\"\n",
    )
    .unwrap();

    let mut loader = ConfigLoader::new();
    loader.set_search_path(dir.path().to_path_buf());
    let config = loader.load_with_options(LoadOptions::default()).unwrap();

    let dispatcher = Dispatcher::new(&config);
    let session = [ProcessDescriptor::from_argv(1, ["dbclient", "user@box"])];
    assert_eq!(dispatcher.classifier().classify(&session).host(), Some("user@box"));
}

#[test]
fn test_save_round_trip_in_both_formats() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new();

    let mut config = Config::default();
    config.upload.host_placeholder = "REMOTE".to_string();
    config.clipboard.mechanisms = vec![vec!["wl-paste".to_string(), "-n".to_string()]];

    for name in ["config.toml", "config.json"] {
        let path = dir.path().join("out").join(name);
        loader.save_to_path(&config, &path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }
}
