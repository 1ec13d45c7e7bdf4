use std::time::Duration;

use crate::config::{
    StorageConfig,
    constants::{HTTP_TIMEOUT_SECS, LOG_FILE_PATH, STATE_DB_PATH, TURN_TIMEOUT_SECS, WS_BASE_URL},
};

use super::*;

#[test]
fn test_load_configuration() {
    let config = load_configuration("./testdata/config.toml").expect("failed to load config");

    assert_eq!(config.general.verbose, true);

    let log = &config.log;
    assert_eq!(log.level.as_deref(), Some("debug"));
    let log_filters = log.filters.as_deref().unwrap_or_default();
    assert_eq!(log_filters.len(), 1);
    assert_eq!(log_filters[0].module.as_deref(), Some("fnchat::transport"));
    assert_eq!(log_filters[0].level.as_deref(), Some("trace"));
    assert_eq!(log.file.path, "/var/log/fnchat.log");
    assert_eq!(log.file.append, true);

    let api = &config.api;
    assert_eq!(api.base_url, "https://chat.example.com/api");
    assert_eq!(api.ws_url, "wss://chat.example.com");
    assert_eq!(api.timeout(), Duration::from_secs(30));

    assert_eq!(config.chat.turn_timeout(), None);
    assert_eq!(config.chat.default_model, Some(7));

    match &config.storage {
        StorageConfig::Sqlite(sqlite) => {
            assert_eq!(sqlite.path(), Some("/var/lib/fnchat/state.db"));
        }
    }
}

#[test]
fn test_load_configuration_with_some_default_fields() {
    let config =
        load_configuration("./testdata/config_with_default.toml").expect("failed to load config");

    assert_eq!(config.general.verbose, false);
    assert_eq!(config.log.level.as_deref(), Some("info"));
    assert_eq!(config.log.file.path, LOG_FILE_PATH);

    assert_eq!(config.api.base_url, "http://10.0.0.2:8080/api");
    assert_eq!(config.api.ws_url, WS_BASE_URL);
    assert_eq!(config.api.timeout_secs, HTTP_TIMEOUT_SECS);

    assert_eq!(
        config.chat.turn_timeout(),
        Some(Duration::from_secs(TURN_TIMEOUT_SECS))
    );
    assert_eq!(config.chat.default_model, None);

    match &config.storage {
        StorageConfig::Sqlite(sqlite) => assert_eq!(sqlite.path(), Some(STATE_DB_PATH)),
    }
}

#[test]
fn test_load_configuration_missing_file() {
    let err = load_configuration("./testdata/does_not_exist.toml").unwrap_err();
    assert!(format!("{err}").contains("does_not_exist.toml"));
}

#[test]
fn test_resolve_path() {
    let ret = resolve_path("$FNCHAT_TEST_PATH/${FNCHAT_USER_PATH}/config.toml")
        .expect("failed to resolve path");
    assert_eq!(ret, "//config.toml");

    let dir = "/tmp/test";
    let user_path = "user_path";
    unsafe {
        std::env::set_var("FNCHAT_TEST_PATH", dir);
        std::env::set_var("FNCHAT_USER_PATH", user_path);
    }
    let ret = resolve_path("$FNCHAT_TEST_PATH/${FNCHAT_USER_PATH}/config.toml")
        .expect("failed to resolve path");
    assert_eq!(ret, format!("{dir}/{user_path}/config.toml"));
}

#[test]
fn test_basename() {
    assert_eq!(basename("src/chat/reducer.rs"), "reducer.rs");
    assert_eq!(basename("main.rs"), "main.rs");
}
