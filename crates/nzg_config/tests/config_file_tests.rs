// crates/nzg_config/tests/config_file_tests.rs

//! 配置文件读写测试

use nzg_config::{ConfigError, NzgConfig};
use std::path::Path;

/// 测试保存后重新加载
#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nzg.json");

    let mut config = NzgConfig::default();
    config.grid.path = Some(dir.path().join("nzgd2k.asc"));
    config.output.precision_degrees = 10;
    config.parallel_threshold = 64;
    config.to_file(&path).unwrap();

    let loaded = NzgConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

/// 测试加载时执行验证
#[test]
fn test_invalid_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"parallel_threshold": 0}"#).unwrap();
    assert!(matches!(
        NzgConfig::from_file(&path),
        Err(ConfigError::InvalidValue { .. })
    ));
}

/// 测试文件不存在
#[test]
fn test_missing_file() {
    let err = NzgConfig::from_file(Path::new("/nonexistent/nzg.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
