use std::io::Write;
use std::path::PathBuf;

use plainhttp::config::{Config, ConfigError};

// Only this test touches LISTEN; others avoid asserting on listen_addr after
// loading through the environment.
#[test]
fn test_config_listen_env_override() {
    unsafe {
        std::env::remove_var("LISTEN");
    }
    let cfg = Config::load();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:4221");

    unsafe {
        std::env::set_var("LISTEN", "127.0.0.1:8000");
    }
    let cfg = Config::load();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8000");

    unsafe {
        std::env::remove_var("LISTEN");
    }
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:4221");
    assert_eq!(cfg.server.backlog, 5);
    assert_eq!(cfg.server.max_request_size, 1024);
    assert!(cfg.files.enabled);
    assert_eq!(cfg.files.directory, PathBuf::from("/tmp"));
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
    assert_eq!(cfg1.files.directory, cfg2.files.directory);
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("files:\n  directory: /srv/data\n").unwrap();

    assert_eq!(cfg.files.directory, PathBuf::from("/srv/data"));
    assert!(cfg.files.enabled);
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:4221");
    assert_eq!(cfg.server.max_request_size, 1024);
}

#[test]
fn test_config_full_yaml() {
    let yaml = r#"
server:
  listen_addr: "127.0.0.1:9000"
  backlog: 64
  max_request_size: 65536
files:
  enabled: false
  directory: /var/tmp
"#;
    let cfg = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.server.backlog, 64);
    assert_eq!(cfg.server.max_request_size, 65536);
    assert!(!cfg.files.enabled);
    assert_eq!(cfg.files.directory, PathBuf::from("/var/tmp"));
}

#[test]
fn test_config_bad_yaml() {
    let result = Config::from_yaml_str("server: [not, a, map]");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  max_request_size: 4096\nfiles:\n  directory: /data").unwrap();

    let cfg = Config::from_file(file.path()).unwrap();

    assert_eq!(cfg.server.max_request_size, 4096);
    assert_eq!(cfg.files.directory, PathBuf::from("/data"));
}

#[test]
fn test_config_missing_file() {
    let result = Config::from_file(std::path::Path::new("/nonexistent/plainhttp.yaml"));

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_config_validation() {
    let mut cfg = Config::default();
    cfg.server.listen_addr = "not-an-address".to_string();
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

    let mut cfg = Config::default();
    cfg.server.max_request_size = 0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

    let mut cfg = Config::default();
    cfg.server.backlog = 0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}
