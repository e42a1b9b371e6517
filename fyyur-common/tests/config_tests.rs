//! Configuration resolution tests
//!
//! Covers the CLI > environment > TOML > default priority order and TOML
//! file loading. Tests that touch process environment variables are
//! serialized.

use fyyur_common::config::{
    load_toml_config, locate_config_file, CliOverrides, ServiceConfig, TomlConfig, DEFAULT_HOST,
    DEFAULT_PORT, ENV_CONFIG, ENV_DATABASE, ENV_HOST, ENV_PORT,
};
use fyyur_common::Error;
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_env() {
    for key in [ENV_DATABASE, ENV_HOST, ENV_PORT, ENV_CONFIG] {
        std::env::remove_var(key);
    }
}

fn toml_with_everything() -> TomlConfig {
    toml::from_str(
        r#"
        database_path = "/from/toml.db"
        host = "10.0.0.1"
        port = 7000
        "#,
    )
    .unwrap()
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_env();

    let config = ServiceConfig::resolve(&CliOverrides::default(), TomlConfig::default()).unwrap();

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.database_path.file_name().unwrap(), "fyyur.db");
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();

    let config = ServiceConfig::resolve(&CliOverrides::default(), toml_with_everything()).unwrap();

    assert_eq!(config.database_path, PathBuf::from("/from/toml.db"));
    assert_eq!(config.host, "10.0.0.1");
    assert_eq!(config.port, 7000);
}

#[test]
#[serial]
fn test_environment_overrides_toml() {
    clear_env();
    std::env::set_var(ENV_DATABASE, "/from/env.db");
    std::env::set_var(ENV_HOST, "0.0.0.0");
    std::env::set_var(ENV_PORT, "8080");

    let config = ServiceConfig::resolve(&CliOverrides::default(), toml_with_everything()).unwrap();
    clear_env();

    assert_eq!(config.database_path, PathBuf::from("/from/env.db"));
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
}

#[test]
#[serial]
fn test_cli_overrides_environment() {
    clear_env();
    std::env::set_var(ENV_DATABASE, "/from/env.db");
    std::env::set_var(ENV_PORT, "8080");

    let cli = CliOverrides {
        database: Some(PathBuf::from("/from/cli.db")),
        host: None,
        port: Some(9000),
    };
    let config = ServiceConfig::resolve(&cli, toml_with_everything()).unwrap();
    clear_env();

    assert_eq!(config.database_path, PathBuf::from("/from/cli.db"));
    assert_eq!(config.port, 9000);
    // Host not given on CLI or env: TOML value survives
    assert_eq!(config.host, "10.0.0.1");
}

#[test]
#[serial]
fn test_invalid_port_environment_is_config_error() {
    clear_env();
    std::env::set_var(ENV_PORT, "not-a-port");

    let result = ServiceConfig::resolve(&CliOverrides::default(), TomlConfig::default());
    clear_env();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_toml_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        "port = 5001\n[logging]\nlevel = \"warn\"\nfile = \"error.log\"\n",
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.port, Some(5001));
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.file, Some(PathBuf::from("error.log")));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = \"five thousand").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_explicit_config_file_must_exist() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.toml");

    let result = locate_config_file(Some(&missing));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_config_file_from_environment() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fyyur.toml");
    std::fs::write(&path, "").unwrap();
    std::env::set_var(ENV_CONFIG, &path);

    let located = locate_config_file(None).unwrap();
    clear_env();

    assert_eq!(located, Some(path));
}
