//! Config-driven decoding tests.
//!
//! Loads demo configuration files from disk and decodes raw codes through
//! the resulting layout: shipped default config, custom wide layouts,
//! invalid layouts rejected at load time.

use respack_demo::app::{AppResult, Category, SubCategory};
use respack_demo::config::{ConfigError, ConfigLoader, DemoConfig, LogLevel};
use respack_demo::report::{DecodeReport, DemoError, LayoutReport, Render};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` as `respack_demo.toml` in `dir`.
fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("respack_demo.toml");
    fs::write(&path, content).unwrap();
    path
}

fn inputs(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

// ─── Tests ──────────────────────────────────────────────────────────

/// Test: the shipped config describes the sample application's layout.
#[test]
fn shipped_config_matches_app_layout() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/respack_demo.toml");
    let config = DemoConfig::load(&path).expect("shipped config should load");
    config.validate().expect("shipped config should be valid");

    let layout = config.layout.to_runtime().unwrap();
    assert_eq!(layout.storage_bits(), 8);
    assert_eq!(layout.code().width, AppResult::CODE_WIDTH);

    let r = AppResult::make((Category(2), SubCategory(3)), 2);
    let report = DecodeReport::new(&config.layout, &[r.raw().to_string()], false).unwrap();
    let decoded = &report.entries[0].results[0];
    assert_eq!(decoded.categories[0].1, 2);
    assert_eq!(decoded.categories[1].1, 3);
    assert_eq!(decoded.code, 2);
}

/// Test: a 32-bit layout with three categories decodes aggregates of two.
#[test]
fn wide_layout_decodes_aggregates() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        r#"
[shared]
log_level = "trace"
service_name = "wide"

[layout]
storage_bits = 32
aggregate_bits = 64

[[layout.categories]]
name = "vendor"
width = 12

[[layout.categories]]
name = "device"
width = 8

[[layout.categories]]
name = "channel"
width = 4
"#,
    );

    let config = DemoConfig::load(&path).expect("should load");
    assert_eq!(config.shared.log_level, LogLevel::Trace);

    let layout = LayoutReport::new(&config.layout).unwrap();
    assert_eq!(layout.capacity, 2);
    assert_eq!(layout.fields[0].offset, 20);
    assert_eq!(layout.fields[3].width, 8);

    let report = DecodeReport::new(&config.layout, &inputs(&["0x00000001_ABC5A9FF"]), true).unwrap();
    let results = &report.entries[0].results;
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].categories,
        vec![
            ("vendor".to_string(), 0xABC),
            ("device".to_string(), 0x5A),
            ("channel".to_string(), 0x9),
        ]
    );
    assert_eq!(results[0].code, 0xFF);
    assert_eq!(results[1].code, 1);
    assert!(report.render().contains("2 result(s)"));
}

/// Test: a layout wider than its storage is rejected by validation.
#[test]
fn overfull_layout_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        r#"
[shared]
service_name = "broken"

[layout]
storage_bits = 8

[[layout.categories]]
name = "a"
width = 5

[[layout.categories]]
name = "b"
width = 4
"#,
    );

    let config = DemoConfig::load(&path).expect("syntax is fine");
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Layout(_)));
    assert!(err.to_string().contains("9"));

    let report = LayoutReport::new(&config.layout);
    assert!(matches!(report, Err(DemoError::Config(ConfigError::Layout(_)))));
}

/// Test: unsupported storage width is rejected.
#[test]
fn unsupported_storage_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        r#"
[layout]
storage_bits = 12

[[layout.categories]]
name = "a"
width = 2
"#,
    );

    let config = DemoConfig::load(&path).unwrap();
    assert!(config.validate().is_err());
}

/// Test: empty service name fails shared validation first.
#[test]
fn empty_service_name_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        r#"
[shared]
service_name = ""
"#,
    );

    let config = DemoConfig::load(&path).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(_))
    ));
}
