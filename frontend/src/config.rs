//! Build-time settings. Values come from the environment `trunk build` runs
//! in and fall back to a local development backend.

use std::str::FromStr;

const DEFAULT_PREDICT_URL: &str = "http://localhost:5000/predict";
const DEFAULT_CHAT_URL: &str = "http://localhost:5000/api/chat";

pub fn predict_url() -> &'static str {
    option_env!("LEAF_PREDICT_URL").unwrap_or(DEFAULT_PREDICT_URL)
}

pub fn chat_url() -> &'static str {
    option_env!("LEAF_CHAT_URL").unwrap_or(DEFAULT_CHAT_URL)
}

/// Console log level, `LEAF_LOG=debug` to see discarded responses.
pub fn log_level() -> log::Level {
    option_env!("LEAF_LOG")
        .and_then(|level| log::Level::from_str(level).ok())
        .unwrap_or(log::Level::Info)
}
