/// Base URL of the REST API
pub const API_BASE_URL: &str = "http://localhost:8080/api";

/// Base URL of the chat socket, `/ws/chat/{id}` is appended per conversation
pub const WS_BASE_URL: &str = "ws://localhost:8080";

pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Abort a turn when no frame arrived for this long while the assistant is
/// still thinking
pub const TURN_TIMEOUT_SECS: u64 = 120;

pub const LOG_FILE_PATH: &str = "/tmp/fnchat.log";

pub const STATE_DB_PATH: &str = "${HOME}/.config/fnchat/state.db";

pub const DEFAULT_LOCALE: &str = "en";
