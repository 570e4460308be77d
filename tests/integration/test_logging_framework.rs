use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use workflow_overlay::logging::config::LoggingConfig;
use workflow_overlay::logging::layers::file::{log_file_path, LOG_FILE_NAME};
use workflow_overlay::logging::{self, ConsoleOutput, ExecutionContext};

fn write_logging_config(root: &std::path::Path, body: &str) {
    let path = LoggingConfig::config_path(root);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// The global subscriber can only be installed once per process, so the whole
/// init lifecycle lives in one test.
#[test]
#[serial]
fn test_init_writes_file_and_rejects_second_init() {
    env::remove_var("RUST_LOG");
    env::remove_var("WORKFLOW_OVERLAY_LOG_LEVEL");
    env::remove_var("WORKFLOW_OVERLAY_BACKGROUND_JOB");
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    write_logging_config(
        temp_dir.path(),
        "[logging]\ndefault_level = \"info\"\nconsole_output = \"stdout\"\n",
    );

    let guard = logging::init(ExecutionContext::Test, Some(temp_dir.path()))
        .expect("logging init failed");
    assert_eq!(guard.context(), ExecutionContext::Test);
    assert_eq!(guard.console_output(), ConsoleOutput::None);
    let log_file = guard.log_file_path().to_path_buf();
    assert_eq!(
        log_file,
        temp_dir
            .path()
            .join(".workflow-overlay")
            .join("logs")
            .join(LOG_FILE_NAME)
    );

    tracing::info!(marker = "overlay-log-marker", "logging integration event");
    tracing::debug!("filtered debug event");

    let second = logging::init(ExecutionContext::Request, Some(temp_dir.path()));
    assert!(second.unwrap_err().to_string().contains("already initialized"));

    drop(guard);
    let contents = fs::read_to_string(&log_file).expect("failed to read log file");
    assert!(contents.contains("overlay-log-marker"));
    assert!(contents.contains("logging integration event"));
    assert!(!contents.contains("filtered debug event"));
}

#[test]
#[serial]
fn test_custom_relative_log_dir() {
    env::remove_var("WORKFLOW_OVERLAY_LOG_LEVEL");
    let temp_dir = TempDir::new().unwrap();
    write_logging_config(temp_dir.path(), "[logging]\nlog_dir = \"var/log\"\n");

    let config = LoggingConfig::load(Some(temp_dir.path())).unwrap();
    let path = log_file_path(&config, Some(temp_dir.path())).unwrap();
    assert_eq!(path, temp_dir.path().join("var").join("log").join(LOG_FILE_NAME));
}

#[test]
#[serial]
fn test_log_dir_escaping_root_rejected() {
    env::remove_var("WORKFLOW_OVERLAY_LOG_LEVEL");
    let temp_dir = TempDir::new().unwrap();
    write_logging_config(temp_dir.path(), "[logging]\nlog_dir = \"../../tmp\"\n");

    let config = LoggingConfig::load(Some(temp_dir.path())).unwrap();
    assert_eq!(config.log_dir, Some(PathBuf::from("../../tmp")));
    assert!(log_file_path(&config, Some(temp_dir.path())).is_err());
}

#[test]
#[serial]
fn test_unparseable_logging_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_logging_config(temp_dir.path(), "[logging\n");

    let err = LoggingConfig::load(Some(temp_dir.path())).unwrap_err();
    assert!(err.to_string().contains("failed to parse logging config"));
}
