use super::constants::*;

pub(crate) fn api_base_url() -> String {
    API_BASE_URL.to_string()
}

pub(crate) fn ws_base_url() -> String {
    WS_BASE_URL.to_string()
}

pub(crate) fn http_timeout_secs() -> u64 {
    HTTP_TIMEOUT_SECS
}

pub(crate) fn turn_timeout_secs() -> u64 {
    TURN_TIMEOUT_SECS
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}

pub(crate) fn state_db_path() -> Option<String> {
    Some(STATE_DB_PATH.to_string())
}
