use mcpshim::config::{DEFAULT_MCP_VERSION, DEFAULT_PORT, LaunchConfig, RunMode};
use mcpshim::errors::ConfigError;

#[test]
fn defaults_apply_when_nothing_is_set() {
    let cfg = LaunchConfig::resolve(None, None, None).unwrap();

    assert_eq!(cfg.mode, RunMode::Stdio);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.mcp_version, DEFAULT_MCP_VERSION);
}

#[test]
fn web_mode_with_explicit_port_and_version() {
    let cfg = LaunchConfig::resolve(
        Some("web".into()),
        Some("9090".into()),
        Some("1.2.3".into()),
    )
    .unwrap();

    assert_eq!(cfg.mode, RunMode::Web);
    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.mcp_version, "1.2.3");
}

#[test]
fn run_mode_parsing_ignores_case_and_whitespace() {
    let cfg = LaunchConfig::resolve(Some(" WEB ".into()), None, None).unwrap();
    assert_eq!(cfg.mode, RunMode::Web);

    let cfg = LaunchConfig::resolve(Some("Stdio".into()), None, None).unwrap();
    assert_eq!(cfg.mode, RunMode::Stdio);
}

#[test]
fn unknown_run_mode_is_rejected() {
    let err = LaunchConfig::resolve(Some("daemon".into()), None, None).unwrap_err();

    assert!(matches!(err, ConfigError::UnknownRunMode(ref raw) if raw == "daemon"));
}

#[test]
fn unparsable_port_is_rejected() {
    let err = LaunchConfig::resolve(None, Some("not-a-port".into()), None).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "not-a-port"));
}

#[test]
fn out_of_range_port_is_rejected() {
    let err = LaunchConfig::resolve(None, Some("70000".into()), None).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidPort { .. }));
}
