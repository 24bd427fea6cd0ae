//! Loading grep configurations from files.

use grep_directive::{GrepConfig, GrepError, Param, RegexpSection};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grep.yaml");
    fs::write(&path, "regexp:\n  - key: level\n    pattern: /error/\n").unwrap();

    let config = GrepConfig::from_path(&path).unwrap();
    assert_eq!(config.regexp, vec![RegexpSection::new("level", "/error/")]);
}

#[test]
fn test_load_json_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grep.json");
    fs::write(
        &path,
        r#"{"or": [{"exclude": [{"key": "path", "pattern": "/health/"}]}]}"#,
    )
    .unwrap();

    let config = GrepConfig::from_path(&path).unwrap();
    assert_eq!(config.or.len(), 1);
    assert_eq!(config.or[0].exclude[0].key, Param::plain("path"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yml");

    match GrepConfig::from_path(&path) {
        Err(GrepError::IoError(msg)) => assert!(msg.contains("absent.yml")),
        other => panic!("Expected IoError, got {other:?}"),
    }
}

#[test]
fn test_malformed_files_report_format_errors() {
    let dir = TempDir::new().unwrap();

    let yaml_path = dir.path().join("bad.yml");
    fs::write(&yaml_path, "regexp: [\n").unwrap();
    assert!(matches!(
        GrepConfig::from_path(&yaml_path),
        Err(GrepError::YamlError(_))
    ));

    let json_path = dir.path().join("bad.json");
    fs::write(&json_path, "{\"regexp\": ").unwrap();
    assert!(matches!(
        GrepConfig::from_path(&json_path),
        Err(GrepError::JsonError(_))
    ));
}

#[test]
fn test_fixture_round_trips_through_yaml() {
    let config = GrepConfig::from_path("tests/configs/secret_backed.yml").unwrap();
    let yaml = config.to_yaml().unwrap();
    assert_eq!(GrepConfig::from_yaml(&yaml).unwrap(), config);
    assert_eq!(config.rule_count(), 3);
}
