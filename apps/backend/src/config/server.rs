use std::env;

use crate::error::AppError;

/// Listener address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `BACKEND_HOST` (default `0.0.0.0`) and `BACKEND_PORT` (default `3001`).
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'")))?,
            Err(_) => 3001,
        };
        Ok(Self { host, port })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn defaults_and_overrides() {
        env::remove_var("BACKEND_HOST");
        env::remove_var("BACKEND_PORT");
        let cfg = ServerConfig::from_env().unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3001);

        env::set_var("BACKEND_PORT", "8080");
        assert_eq!(ServerConfig::from_env().unwrap().port, 8080);

        env::set_var("BACKEND_PORT", "not-a-port");
        assert!(ServerConfig::from_env().is_err());
        env::remove_var("BACKEND_PORT");
    }
}
