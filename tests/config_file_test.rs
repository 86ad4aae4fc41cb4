// Integration test for configuration file support

use ilog::{IlogError, Level, LoggerConfig, WriteErrorPolicy};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ilog.toml");

    let toml_content = r#"
        level = "INFO"
        stdout_enabled = false
        log_dir = "/var/log/app/"
        log_file = "app.log"
        prefix = "[app]"
        rotate_size = 1048576
        rotate_backup = false
        millisecond_precision = true
        write_error_policy = "abort"
    "#;
    fs::write(&config_path, toml_content).unwrap();

    let config = LoggerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.level, Level::Info);
    assert!(!config.stdout_enabled);
    assert_eq!(config.log_dir, "/var/log/app");
    assert_eq!(config.log_file, "app.log");
    assert_eq!(config.prefix, "[app]");
    assert_eq!(config.rotate_size, 1024 * 1024);
    assert!(!config.rotate_backup);
    assert!(config.millisecond_precision);
    assert_eq!(config.write_error_policy, WriteErrorPolicy::Abort);
}

#[test]
fn test_load_json_config_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ilog.json");

    fs::write(&config_path, r#"{ "level": "error", "log_file": "x.log" }"#).unwrap();

    let config = LoggerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.level, Level::Error);
    assert!(config.stdout_enabled);
    assert!(config.rotate_backup);
    assert_eq!(config.rotate_size, 0);
    // only half of the file destination is configured
    assert!(config.file_path().is_none());
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ilog.yaml");
    fs::write(&config_path, "level: info").unwrap();

    let result = LoggerConfig::from_file(&config_path);
    assert!(matches!(result, Err(IlogError::InvalidConfig(_))));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = LoggerConfig::from_file(&temp_dir.path().join("missing.toml"));
    assert!(matches!(result, Err(IlogError::ConfigError(_))));
}

#[test]
fn test_invalid_log_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ilog.toml");
    fs::write(&config_path, r#"log_file = "nested/app.log""#).unwrap();

    let result = LoggerConfig::from_file(&config_path);
    assert!(matches!(result, Err(IlogError::InvalidConfig(_))));
}

#[test]
fn test_toml_output_round_trips() {
    let mut config = LoggerConfig::default();
    config.level = Level::Warn;
    config.log_dir = "/tmp/logs".to_string();
    config.log_file = "a.log".to_string();

    let rendered = config.to_toml().unwrap();
    assert!(rendered.contains("level = \"warn\""));

    let parsed = LoggerConfig::parse_toml(&rendered).unwrap();
    assert_eq!(parsed.level, Level::Warn);
    assert_eq!(parsed.file_path(), config.file_path());
}
