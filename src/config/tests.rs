//! Configuration tests
//!
//! Guard the file format: every field written by `to_toml()` must parse back
//! into the same value, and env overrides must win over the file.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap()
}

/// Verify that the serialized default config parses back to the same values.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved, config);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.api_url = "http://localhost:4000".to_string();
    config.session_file = PathBuf::from("C:\\Users\\ops\\session.json");
    config.countdown_secs = 10;
    config.theme = "light".to_string();
    config.endpoints.policy = "legal-policy".to_string();
    config.endpoints.signup = "auth/signup".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let resolved = Config::resolve(parse(&config.to_toml()), no_env);
    assert_eq!(resolved, config);
}

#[test]
fn test_missing_sections_use_defaults() {
    let resolved = Config::resolve(parse("api_url = \"http://x\"\n"), no_env);
    assert_eq!(resolved.api_url, "http://x");
    assert_eq!(resolved.endpoints, Endpoints::default());
    assert_eq!(resolved.logging, LoggingConfig::default());
    assert_eq!(resolved.countdown_secs, 3);
}

#[test]
fn test_env_overrides_file() {
    let env: HashMap<&str, &str> = [
        ("SEARCHKRO_API_URL", "http://env-host/"),
        ("SEARCHKRO_COUNTDOWN_SECS", "9"),
        ("SEARCHKRO_SESSION_FILE", "/tmp/s.json"),
    ]
    .into_iter()
    .collect();

    let file = parse("api_url = \"http://file-host\"\ncountdown_secs = 5\n");
    let resolved = Config::resolve(file, |k| env.get(k).map(|v| v.to_string()));

    // Trailing slash is trimmed so endpoint joins stay clean
    assert_eq!(resolved.api_url, "http://env-host");
    assert_eq!(resolved.countdown_secs, 9);
    assert_eq!(resolved.session_file, PathBuf::from("/tmp/s.json"));
}

#[test]
fn test_unparseable_env_number_falls_back_to_file() {
    let file = parse("countdown_secs = 5\n");
    let resolved = Config::resolve(file, |k| {
        (k == "SEARCHKRO_COUNTDOWN_SECS").then(|| "soon".to_string())
    });
    assert_eq!(resolved.countdown_secs, 5);
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api_url = [not a string").unwrap();

    let err = Config::read_file_config(&path).err().unwrap();
    assert!(format!("{:#}", err).contains("config.toml"));

    let missing = Config::read_file_config(&dir.path().join("absent.toml")).unwrap();
    assert!(missing.api_url.is_none());
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
}
