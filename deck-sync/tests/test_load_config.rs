use deck_sync::load_config::{load_config, API_KEY_VAR};
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
#[serial]
fn test_load_config_full_file_and_env_key() {
    let config_yaml = r#"
anki:
  endpoint: http://anki.local:8765
  default_deck: Inbox
enhancement:
  enabled: true
  model: gpt-4o-mini
  prompt: Keep it short.
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();
    env::set_var(API_KEY_VAR, "sk-test");

    let config = load_config(Some(config_file.path())).expect("Config should load");

    assert_eq!(config.sync.anki.endpoint, "http://anki.local:8765");
    assert_eq!(config.sync.anki.default_deck, "Inbox");
    assert!(config.sync.enhancement.enabled);
    assert_eq!(config.sync.enhancement.model, "gpt-4o-mini");
    assert_eq!(config.sync.enhancement.prompt, "Keep it short.");
    assert_eq!(
        config.sync.enhancement.endpoint,
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    env::remove_var(API_KEY_VAR);
}

#[test]
#[serial]
fn test_load_config_defaults_without_file() {
    env::remove_var(API_KEY_VAR);

    let config = load_config(None::<&Path>).expect("Defaults should load");

    assert_eq!(config.sync.anki.endpoint, "http://localhost:8765");
    assert_eq!(config.sync.anki.default_deck, "Default");
    assert!(!config.sync.enhancement.enabled);
    assert_eq!(config.sync.enhancement.model, "gpt-4o");
    assert!(config.api_key.is_none(), "missing key is not a load error");
}

#[test]
#[serial]
fn test_load_config_partial_file_keeps_other_defaults() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "enhancement:\n  enabled: true\n").unwrap();
    env::set_var(API_KEY_VAR, "   ");

    let config = load_config(Some(config_file.path())).expect("Config should load");

    assert!(config.sync.enhancement.enabled);
    assert_eq!(config.sync.anki.endpoint, "http://localhost:8765");
    assert!(config.api_key.is_none(), "blank key counts as missing");
    env::remove_var(API_KEY_VAR);
}

#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let err = load_config(Some(config_file.path())).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_errors_for_missing_file() {
    let err = load_config(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn test_loaded_config_debug_output_hides_api_key() {
    env::set_var(API_KEY_VAR, "sk-secret-value");

    let config = load_config(None::<&Path>).expect("Defaults should load");
    let debug = format!("{config:?}");

    assert!(debug.contains("<redacted>"), "got: {debug}");
    assert!(!debug.contains("sk-secret-value"), "key leaked: {debug}");
    env::remove_var(API_KEY_VAR);
}
