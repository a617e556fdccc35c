//! Integration tests for logging initialization

use cookbook::config::LoggingConfig;
use cookbook::domain::CookbookError;
use cookbook::logging::{init_logging, LOG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.local_path.is_empty());
}

#[test]
fn test_rejects_unknown_rotation() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        local_enabled: true,
        local_path: temp_dir.path().to_string_lossy().to_string(),
        local_rotation: "weekly".to_string(),
    };
    assert!(matches!(
        init_logging("info", &config),
        Err(CookbookError::Configuration(_))
    ));
}

#[test]
fn test_rejects_unknown_level() {
    let config = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };
    assert!(matches!(
        init_logging("chatty", &config),
        Err(CookbookError::Configuration(_))
    ));
}

// The global subscriber can only be installed once per process, so the
// whole lifecycle lives in one test.
#[test]
fn test_file_logging_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());
    assert!(log_path.join(LOG_FILE_NAME).is_file());
    tracing::info!(operation = "get", path = "RECIPES/r1", "written to file");

    let second = init_logging("info", &config);
    assert!(matches!(second, Err(CookbookError::Configuration(_))));

    drop(guard);
}
