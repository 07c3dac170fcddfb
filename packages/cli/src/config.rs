// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Every knob has a default suitable for local development

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: Option<PathBuf>,
    pub blob_dir: Option<PathBuf>,
    pub max_upload_bytes: u64,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "4001".to_string());
        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let database_path = env::var("SAMRAT_DB_PATH").ok().map(PathBuf::from);
        let blob_dir = env::var("SAMRAT_BLOB_DIR").ok().map(PathBuf::from);

        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES", value))?,
            Err(_) => samrat_api::db::DEFAULT_MAX_UPLOAD_BYTES,
        };

        let session_ttl_hours = match env::var("SESSION_TTL_HOURS") {
            Ok(value) => value
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue("SESSION_TTL_HOURS", value))?,
            Err(_) => samrat_api::db::DEFAULT_SESSION_TTL_HOURS,
        };

        Ok(Config {
            port,
            cors_origin,
            database_path,
            blob_dir,
            max_upload_bytes,
            session_ttl_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; run serially via a lock
    use std::sync::Mutex;
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");
        env::remove_var("MAX_UPLOAD_BYTES");
        env::remove_var("SESSION_TTL_HOURS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 4001);
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
        assert_eq!(config.session_ttl_hours, 24);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
        env::remove_var("PORT");
    }

    #[test]
    fn test_port_zero_is_out_of_range() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("PORT", "0");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortOutOfRange(0)));
        env::remove_var("PORT");
    }
}
