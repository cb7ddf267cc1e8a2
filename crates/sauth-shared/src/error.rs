//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    TelemetryError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_wrapped() {
        let err: AppError = config::ConfigError::NotFound("session.name".into()).into();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
