//! Application-wide constants

pub const DEFAULT_SESSION_NAME: &str = "_my_session_id";
pub const DEFAULT_SESSION_DURATION: i64 = 0;
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 5000;
pub const API_PREFIX: &str = "/api/v1";

/// Timestamp layout used when records are written to the flat-file store
pub const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Timestamp layout used in JSON responses
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
