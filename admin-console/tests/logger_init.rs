// admin-console/tests/logger_init.rs
// Installs the global subscriber, so it lives in its own test binary

use admin_console::init_logger;
use tempfile::TempDir;

#[test]
fn test_file_logging_writes_daily_file() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");

    let guard = init_logger("debug", Some(&log_dir)).unwrap();
    assert!(guard.is_some());

    tracing::info!(target: "admin_console", "logger smoke line");
    drop(guard);

    let files: Vec<String> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("admin-console.log"));

    let content = std::fs::read_to_string(log_dir.join(&files[0])).unwrap();
    assert!(content.contains("logger smoke line"));
}
