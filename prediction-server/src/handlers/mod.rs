//! HTTP handlers

pub mod fallback;
pub mod health;
pub mod model_info;
pub mod predict;

use chrono::{SecondsFormat, Utc};

/// ISO-8601 timestamp, taken when the response is built
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
