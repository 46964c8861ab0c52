//! Tests for the built-in sink backends.

use sectlog::{
    Channel, Config, FanoutSink, FileSink, JsonSink, LogId, MemorySink, Sink, TerminalSink,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn file_sink_appends_tagged_lines() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new()
        .base_dir(dir.path().to_string_lossy().into_owned())
        .app_name("test");

    sink.accept_message("hello", &LogId::from("req-1"));
    sink.accept_diagnostic("broken", &LogId::default());

    let content = fs::read_to_string(dir.path().join("test.log")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[INFO] req-1  hello"));
    assert!(lines[1].contains("[ERROR]  broken"));
}

#[test]
fn file_sink_creates_missing_directories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let sink = FileSink::new()
        .base_dir(nested.to_string_lossy().into_owned())
        .app_name("test");

    sink.accept_message("first", &LogId::default());
    assert!(nested.join("test.log").exists());
}

#[test]
fn json_sink_writes_one_valid_record_per_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    let sink = JsonSink::new().file_path(&path);

    sink.accept_message("hello", &LogId::from("req-1"));
    sink.report_error("mismatch", &LogId::default());

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["channel"], "message");
    assert_eq!(first["text"], "hello");
    assert_eq!(first["log_id"], "req-1");
    // ULID entry ids are 26 chars.
    assert_eq!(first["id"].as_str().unwrap().len(), 26);
    assert!(first["ts"].as_str().is_some());

    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["channel"], "report");
    // Empty log ids are omitted entirely.
    assert!(second.get("log_id").is_none());
}

#[test]
fn memory_sink_routes_channels_and_clears() {
    let sink = MemorySink::new();
    sink.accept_message("a", &LogId::default());
    sink.accept_diagnostic("b", &LogId::default());
    sink.report_error("c", &LogId::default());

    assert_eq!(sink.len(), 3);
    assert_eq!(sink.on_channel(Channel::Message).len(), 1);
    assert_eq!(sink.on_channel(Channel::Diagnostic).len(), 1);
    assert_eq!(sink.on_channel(Channel::Report).len(), 1);

    sink.clear();
    assert!(sink.is_empty());
}

#[test]
fn fanout_reaches_every_member() {
    let mem = Arc::new(MemorySink::new());
    let fanout = FanoutSink::new()
        .with(Arc::clone(&mem))
        .with(Arc::clone(&mem));

    fanout.accept_message("hello", &LogId::default());
    assert_eq!(mem.len(), 2);
}

#[test]
fn fanout_from_config_honors_enabled_flags() {
    let mut config = Config::default();
    config.terminal.enabled = false;
    assert_eq!(FanoutSink::from_config(&config).sink_count(), 0);

    config.terminal.enabled = true;
    config.json.enabled = true;
    assert_eq!(FanoutSink::from_config(&config).sink_count(), 2);
}

#[test]
fn terminal_sink_write_does_not_panic() {
    let sink = TerminalSink::new()
        .timestamps(true)
        .timestamp_format("%H:%M:%S");
    sink.accept_message("smoke", &LogId::from("req-1"));
    sink.report_error("smoke", &LogId::default());
}
