//! Telemetry module tests for the panel recorder.

use log_to_panel::telemetry::{
    init_logging, init_metrics, record_dispatch_failure, record_dump_failure,
    record_message_recorded, DispatchSpan, LogConfig, LogError, LogFormat, SpanExt,
    DISPATCH_FAILURES, DUMP_FAILURES, HANDLING_DURATION, MESSAGES_RECORDED,
};
use log_to_panel::config::{ENV_LOG, ENV_LOG_FORMAT};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Span;

// Serialize env-mutating tests to avoid cross-test pollution.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_log_env() {
    std::env::remove_var(ENV_LOG);
    std::env::remove_var(ENV_LOG_FORMAT);
}

// =============================================================================
// LogConfig Tests
// =============================================================================

#[test]
fn log_config_default_is_pretty() {
    let config = LogConfig::default();
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.level, "info");
    assert!(config.output_path.is_none());
}

#[test]
fn log_config_custom_level() {
    let config = LogConfig {
        format: LogFormat::Compact,
        level: "log_to_panel=debug".to_string(),
        output_path: None,
    };
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, "log_to_panel=debug");
}

#[test]
fn log_config_with_output_path() {
    let config = LogConfig {
        format: LogFormat::Json,
        level: "trace".to_string(),
        output_path: Some(PathBuf::from("/tmp/panel.log")),
    };
    assert_eq!(config.output_path, Some(PathBuf::from("/tmp/panel.log")));
}

#[test]
fn log_format_equality() {
    assert_eq!(LogFormat::Json, LogFormat::Json);
    assert_ne!(LogFormat::Json, LogFormat::Pretty);
    assert_eq!(LogFormat::default(), LogFormat::Pretty);
}

#[test]
fn log_config_from_env_reads_format_and_level() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_log_env();
    std::env::set_var(ENV_LOG_FORMAT, "compact");
    std::env::set_var(ENV_LOG, "log_to_panel=debug");

    let config = LogConfig::from_env();
    clear_log_env();

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, "log_to_panel=debug");
    assert!(config.output_path.is_none());
}

#[test]
fn log_config_from_env_falls_back_on_invalid_format() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_log_env();
    std::env::set_var(ENV_LOG_FORMAT, "xml");

    let config = LogConfig::from_env();
    clear_log_env();

    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.level, "info");
}

#[test]
fn log_config_from_env_accepts_uppercase_json() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_log_env();
    std::env::set_var(ENV_LOG_FORMAT, " JSON ");

    let config = LogConfig::from_env();
    clear_log_env();

    assert_eq!(config.format, LogFormat::Json);
}

#[test]
fn init_logging_rejects_invalid_filter() {
    let config = LogConfig {
        level: "log_to_panel=loud".to_string(),
        ..LogConfig::default()
    };
    let err = init_logging(&config).unwrap_err();
    assert!(matches!(err, LogError::InvalidFilter(_)));
}

// =============================================================================
// LogError Tests
// =============================================================================

#[test]
fn log_error_invalid_filter_display() {
    let error = LogError::InvalidFilter("bad filter".to_string());
    assert!(error.to_string().contains("Invalid log filter"));
    assert!(error.to_string().contains("bad filter"));
}

#[test]
fn log_error_file_open_display() {
    let error = LogError::FileOpen("permission denied".to_string());
    assert!(error.to_string().contains("Failed to open log file"));
    assert!(error.to_string().contains("permission denied"));
}

#[test]
fn log_error_already_initialized_display() {
    let error = LogError::AlreadyInitialized;
    assert!(error.to_string().contains("already initialized"));
}

// =============================================================================
// SpanExt Tests
// =============================================================================

#[test]
fn span_ext_record_result_ok() {
    let span = Span::none();
    let result: Result<i32, &str> = Ok(42);
    // Should not panic
    span.record_result(&result);
}

#[test]
fn span_ext_record_result_err() {
    let span = Span::none();
    let result: Result<i32, &str> = Err("rejected");
    // Should not panic
    span.record_result(&result);
}

#[test]
fn span_ext_record_duration() {
    let span = Span::none();
    span.record_duration_ms(1.235);
}

// =============================================================================
// DispatchSpan Tests
// =============================================================================

#[test]
fn dispatch_span_creates_span_without_panic() {
    // Without a subscriber, spans are disabled by default.
    let span = DispatchSpan::new("command.bus", "Ping");
    let _guard = span.enter();
}

#[test]
fn dispatch_spans_nest_without_panic() {
    let outer = DispatchSpan::new("command.bus", "CreateOrder");
    let inner = DispatchSpan::new("event.bus", "OrderCreated");
    let _outer = outer.enter();
    let _inner = inner.enter();
    inner.record_duration_ms(0.5);
}

// =============================================================================
// Metrics Tests
// =============================================================================

#[test]
fn metric_names_are_prefixed() {
    for name in [
        MESSAGES_RECORDED,
        DISPATCH_FAILURES,
        DUMP_FAILURES,
        HANDLING_DURATION,
    ] {
        assert!(name.starts_with("panel_"), "{name}");
    }
}

#[test]
fn metrics_init_no_panic() {
    // Multiple calls should not panic
    init_metrics();
    init_metrics();
}

#[test]
fn record_message_recorded_no_panic() {
    record_message_recorded("command.bus", 1.234);
    record_message_recorded("command.bus", 0.0);
}

#[test]
fn record_failures_no_panic() {
    record_dispatch_failure("command.bus");
    record_dump_failure("query.bus");
}

// =============================================================================
// Integration Tests
// =============================================================================

#[test]
fn span_with_metrics_integration() {
    let span = DispatchSpan::new("command.bus", "Ping");
    let _guard = span.enter();

    let result: Result<u64, &str> = Ok(42);
    span.record_result(&result);
    span.record_duration_ms(0.25);

    record_message_recorded("command.bus", 0.25);
}

#[test]
fn span_with_failure_metrics_integration() {
    let span = DispatchSpan::new("command.bus", "Ping");
    let _guard = span.enter();

    let result: Result<u64, &str> = Err("no handler");
    span.record_result(&result);

    record_dispatch_failure("command.bus");
}
