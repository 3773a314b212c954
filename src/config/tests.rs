//! Config module tests

use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.log.level, "info");
    assert_eq!(config.probe.target, None);
    assert_eq!(config.probe.connect_timeout, Duration::from_secs(2));
    assert_eq!(config.probe.settle, Duration::from_millis(100));
    assert_eq!(config.probe.buffer_options(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
[log]
level = "debug"

[probe]
target = "127.0.0.1:8080"
connect_timeout = "500ms"
settle = "1s"
unsent_threshold = 1024
keepalive_idle = "30s"
keepalive_interval = "5s"
keepalive_probes = 4
"#,
    )
    .unwrap();

    assert_eq!(config.log.level, "debug");
    assert_eq!(
        config.probe.target,
        Some("127.0.0.1:8080".parse().unwrap())
    );
    assert_eq!(config.probe.connect_timeout, Duration::from_millis(500));
    assert_eq!(config.probe.settle, Duration::from_secs(1));
    assert_eq!(
        config.probe.buffer_options(),
        Some(BufferOptions {
            unsent_threshold: 1024
        })
    );
    assert_eq!(config.probe.keepalive_idle, Some(Duration::from_secs(30)));
    assert_eq!(config.probe.keepalive_interval, Some(Duration::from_secs(5)));
    assert_eq!(config.probe.keepalive_probes, Some(4));
}

#[test]
fn test_parse_partial_config_keeps_defaults() {
    let config = Config::parse("[probe]\nunsent_threshold = 16384\n").unwrap();
    assert_eq!(config.log.level, "info");
    assert_eq!(config.probe.connect_timeout, Duration::from_secs(2));
    assert_eq!(config.probe.unsent_threshold, Some(16384));
}

#[test]
fn test_parse_rejects_bad_toml() {
    let err = Config::parse("[probe\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_validation_unknown_log_level() {
    let err = Config::parse("[log]\nlevel = \"loud\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_validation_threshold_must_fit_c_int() {
    let err = Config::parse("[probe]\nunsent_threshold = 4294967295\n").unwrap_err();
    match err {
        ConfigError::Validation(msg) => assert!(msg.contains("unsent_threshold")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_validation_zero_probes() {
    let err = Config::parse("[probe]\nkeepalive_probes = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_validation_zero_keepalive_idle() {
    let err = Config::parse("[probe]\nkeepalive_idle = \"0s\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_validation_zero_connect_timeout() {
    let mut config = Config::default();
    config.probe.connect_timeout = Duration::ZERO;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.probe.connect_timeout, Duration::from_secs(2));
    assert_eq!(config.probe.settle, Duration::from_millis(100));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tcpopt.toml");
    std::fs::write(
        &path,
        r#"
[probe]
target = "10.0.0.1:443"
settle = "250ms"
keepalive_probes = 3
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.probe.target, Some("10.0.0.1:443".parse().unwrap()));
    assert_eq!(config.probe.settle, Duration::from_millis(250));
    assert_eq!(config.probe.keepalive_probes, Some(3));
    assert_eq!(config.probe.connect_timeout, Duration::from_secs(2));
}

#[test]
fn test_load_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tcpopt.toml");
    std::fs::write(&path, "[probe]\nunsent_threshold = 512\n").unwrap();

    std::env::set_var("TCPOPT__PROBE__UNSENT_THRESHOLD", "2048");
    let result = Config::load(&path);
    std::env::remove_var("TCPOPT__PROBE__UNSENT_THRESHOLD");

    assert_eq!(result.unwrap().probe.unsent_threshold, Some(2048));
}

#[test]
fn test_load_invalid_file_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tcpopt.toml");
    std::fs::write(&path, "[probe]\nkeepalive_probes = 0\n").unwrap();

    assert!(matches!(
        Config::load(&path),
        Err(ConfigError::Validation(_))
    ));
}
