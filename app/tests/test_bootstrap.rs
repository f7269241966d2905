//! FILENAME: tests/test_bootstrap.rs
//! Integration tests for application startup from a data directory.

use app_lib::settings::{get_settings, update_settings, StoreSettings};
use app_lib::{bootstrap, get_log_path, init_console_logger, STORAGE_FILE_NAME};

#[test]
fn test_bootstrap_logs_and_persists() {
    let dir = tempfile::tempdir().unwrap();

    let state = bootstrap(dir.path());
    // The console backend is installed by the first bootstrap
    assert!(!init_console_logger());
    let log_path = get_log_path().unwrap();
    assert!(log_path.starts_with(dir.path()));

    let settings = StoreSettings {
        store_name: "Harbor Cafe".to_string(),
        ..get_settings(&state).unwrap()
    };
    update_settings(&state, settings).unwrap();
    assert!(dir.path().join(STORAGE_FILE_NAME).exists());

    let restarted = bootstrap(dir.path());
    assert_eq!(get_settings(&restarted).unwrap().store_name, "Harbor Cafe");

    let log = std::fs::read_to_string(log_path).unwrap();
    assert!(log.lines().any(|l| l.contains("|I|SYS|Opened local storage")));
}
