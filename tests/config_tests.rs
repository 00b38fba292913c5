//! Integration tests for configuration management

use sn_lists::config::{Config, ConfigOverrides, COCO_ROOT_ENV};
use sn_lists::core::ListVariant;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that change process environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.list_dir.is_empty(),
        "Default list_dir should not be empty"
    );
    assert!(config.editor.atomic_write, "Atomic writes should default on");
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
list_dir = "/data/coco/lists"

[editor]
atomic_write = false
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.list_dir, "/data/coco/lists");
    assert!(!config.editor.atomic_write);
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields fall back to serde defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.list_dir, "");
    assert!(config.editor.atomic_write);
}

#[test]
fn test_config_variable_expansion() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    std::env::set_var(COCO_ROOT_ENV, "/opt/coco");

    let toml_str = r#"
[logging]
file = "$SN_LISTS/test.log"

[paths]
list_dir = "$COCO_ROOT_DIR/lists"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    // Stored values keep their variables
    assert_eq!(config.paths.list_dir, "$COCO_ROOT_DIR/lists");
    assert_eq!(config.logging.file, "$SN_LISTS/test.log");

    let log_file = config.resolved_log_file().expect("Log file should be set");
    assert!(log_file.to_string_lossy().contains("snlists"));
    assert!(!log_file.to_string_lossy().contains("$SN_LISTS"));
    assert_eq!(config.resolved_list_dir(), PathBuf::from("/opt/coco/lists"));
    assert_eq!(config.editor_config().list_dir, PathBuf::from("/opt/coco/lists"));
}

#[test]
fn test_empty_log_file_resolves_to_none() {
    let config = Config::from_toml("[logging]\nfile = \"\"\n").expect("Failed to parse TOML");
    assert!(config.resolved_log_file().is_none());
}

#[cfg(target_os = "linux")]
#[test]
fn test_saved_config_follows_coco_root_changes() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let config_home = TempDir::new().expect("Failed to create temp dir");
    let previous_home = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", config_home.path());

    std::env::set_var(COCO_ROOT_ENV, "/first");
    let first = Config::load();
    let saved = fs::read_to_string(Config::get_config_file_path()).expect("Config should be saved");

    std::env::set_var(COCO_ROOT_ENV, "/second");
    let second = Config::load();

    let mut unset = second.clone();
    unset
        .set("list_dir", "/elsewhere")
        .expect("Failed to set list_dir");
    unset
        .unset("list_dir", &Config::from_defaults())
        .expect("Failed to unset list_dir");

    match previous_home {
        Some(home) => std::env::set_var("XDG_CONFIG_HOME", home),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert!(saved.contains("$COCO_ROOT_DIR/lists"), "saved config: {saved}");
    assert_eq!(first.resolved_list_dir(), PathBuf::from("/first/lists"));
    assert_eq!(second.resolved_list_dir(), PathBuf::from("/second/lists"));
    assert_eq!(unset.resolved_list_dir(), PathBuf::from("/second/lists"));
}

#[test]
fn test_editor_config_from_config() {
    let toml_str = r#"
[paths]
list_dir = "/data/coco/lists"

[editor]
atomic_write = false
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");
    let editor = config.editor_config();

    assert_eq!(editor.list_dir, PathBuf::from("/data/coco/lists"));
    assert!(!editor.atomic_write);
    assert_eq!(
        editor.list_path("SN2011dh", ListVariant::Annotated),
        PathBuf::from("/data/coco/lists/SN2011dh-B.list")
    );
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("list-dir", "/data/lists")
        .expect("Failed to set list_dir");
    assert_eq!(config.get("list_dir").unwrap(), "/data/lists");

    config
        .set("atomic_write", "false")
        .expect("Failed to set atomic_write");
    assert_eq!(config.get("atomic-write").unwrap(), "false");

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("atomic_write", "sometimes").is_err());

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("list_dir", "/elsewhere").expect("Failed to set list_dir");
    config
        .set("atomic_write", "false")
        .expect("Failed to set atomic_write");

    config
        .unset("list_dir", &defaults)
        .expect("Failed to unset list_dir");
    config
        .unset("atomic_write", &defaults)
        .expect("Failed to unset atomic_write");

    assert_eq!(config.paths.list_dir, defaults.paths.list_dir);
    assert_eq!(config.editor.atomic_write, defaults.editor.atomic_write);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("list_dir", "/data/lists").expect("Failed to set list_dir");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.paths.list_dir, "/data/lists");
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        list_dir: Some("/override/lists".to_string()),
        atomic_write: Some(false),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.list_dir, "/override/lists");
    assert!(!config.editor.atomic_write);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let list_dir = config.paths.list_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..Default::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.list_dir, list_dir);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[editor]"));
    assert!(display_str.contains("list_dir"));
    assert!(display_str.contains("atomic_write"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""

[paths]
list_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.list_dir, defaults.paths.list_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[paths]
list_dir = "/my/lists"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.list_dir, "/my/lists");
}

#[test]
fn test_get_snlists_dir() {
    let dir = Config::get_snlists_dir();

    assert!(dir.to_string_lossy().contains("snlists"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
