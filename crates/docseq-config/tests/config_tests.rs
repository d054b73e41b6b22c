use std::fs;

use docseq_config::{Config, ConfigError, ConfigManager, StrategyKind};
use docseq_domain::OverflowPolicy;
use tempfile::tempdir;

#[test]
fn config_defaults_when_file_missing() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let config = manager.load().expect("load");
    assert_eq!(config, Config::default());
    assert!(!manager.config_path().exists());
}

#[test]
fn config_save_and_reload() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let config = Config {
        max_attempts: 5,
        backoff_ms: 10,
        sequence_width: 4,
        overflow: OverflowPolicy::Reject,
        strategy: StrategyKind::AtomicCounter,
        store_file: Some(dir.path().join("books.json")),
    };
    manager.save(&config).expect("save");

    let loaded = manager.load().expect("reload");
    assert_eq!(loaded, config);
    assert_eq!(
        manager.config_path(),
        dir.path().join("config").join("config.json")
    );
}

#[test]
fn config_rejects_invalid_file_contents() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), r#"{ "max_attempts": 0 }"#).expect("write");

    let err = manager.load().expect_err("zero attempts");
    assert!(matches!(err, ConfigError::Invalid(_)));

    fs::write(manager.config_path(), "not json").expect("write");
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}

#[test]
fn config_refuses_to_save_invalid_settings() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let config = Config {
        sequence_width: 0,
        ..Config::default()
    };
    assert!(manager.save(&config).is_err());
    assert!(!manager.config_path().exists());
}

#[test]
fn config_save_replaces_file_without_leftovers() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    manager.save(&Config::default()).expect("first save");
    let updated = Config {
        backoff_ms: 5,
        ..Config::default()
    };
    manager.save(&updated).expect("second save");

    assert_eq!(manager.load().expect("reload"), updated);
    let leftovers: Vec<_> = fs::read_dir(dir.path().join("config"))
        .expect("config dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
