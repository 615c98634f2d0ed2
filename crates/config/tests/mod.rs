//! Proxy configuration tests against the public surface of `cn-config`.

use cn_config::{routes, ConfigError, ProxyConfig, CORE_RPC_STATUS_BUSY, CORE_RPC_STATUS_OK};
use std::time::Duration;

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ProxyConfig::load_from_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("proxy.toml");
    std::fs::write(&path, "node_host = \"\"\n").unwrap();

    assert!(matches!(
        ProxyConfig::load_from_file(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn full_document_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("proxy.toml");
    std::fs::write(
        &path,
        r#"
node_host = "192.168.1.20"
node_port = 32348
poll_interval_ms = 5000
rpc_timeout_ms = 2500
rpc_user = "wallet"
rpc_password = "hunter2"
"#,
    )
    .unwrap();

    let config = ProxyConfig::load_from_file(&path).unwrap();
    assert_eq!(config.node_host, "192.168.1.20");
    assert_eq!(config.node_port, 32348);
    assert_eq!(config.poll_interval(), Duration::from_secs(5));
    assert_eq!(config.rpc_timeout(), Duration::from_millis(2500));
    assert_eq!(config.rpc_user.as_deref(), Some("wallet"));
    assert_eq!(
        config.base_url().unwrap().as_str(),
        "http://192.168.1.20:32348/"
    );
}

#[test]
fn binary_routes_use_bin_suffix() {
    for route in [
        routes::GET_RANDOM_OUTS,
        routes::GET_BLOCKS,
        routes::GET_OUTPUT_INDEXES,
        routes::QUERY_BLOCKS,
    ] {
        assert!(route.starts_with('/') && route.ends_with(".bin"), "{route}");
    }
    assert_ne!(CORE_RPC_STATUS_OK, CORE_RPC_STATUS_BUSY);
}
