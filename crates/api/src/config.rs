use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Which persistence backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "Unknown storage backend '{other}'. Expected 'postgres' or 'memory'"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    /// Required when `storage` is [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    pub min_password_length: usize,
    /// Whether self-registration may request the warden role.
    pub allow_warden_signup: bool,
    /// Overdue fee sweep period in seconds; `0` disables the sweep.
    pub overdue_sweep_interval_secs: u64,
    /// Directory holding the built dashboard client, served as the fallback.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `8001`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `STORAGE_BACKEND`             | `postgres`              |
    /// | `DATABASE_URL`                | --                      |
    /// | `DB_MAX_CONNECTIONS`          | `20`                    |
    /// | `MIN_PASSWORD_LENGTH`         | `8`                     |
    /// | `ALLOW_WARDEN_SIGNUP`         | `true`                  |
    /// | `OVERDUE_SWEEP_INTERVAL_SECS` | `3600`                  |
    /// | `STATIC_DIR`                  | --                      |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, or when the Postgres backend is selected
    /// without `DATABASE_URL`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage: StorageBackend = std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("STORAGE_BACKEND: {e}"));

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if storage == StorageBackend::Postgres {
            assert!(
                database_url.is_some(),
                "DATABASE_URL must be set when STORAGE_BACKEND=postgres"
            );
        }

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let min_password_length: usize = std::env::var("MIN_PASSWORD_LENGTH")
            .unwrap_or_else(|_| "8".into())
            .parse()
            .expect("MIN_PASSWORD_LENGTH must be a valid usize");

        let allow_warden_signup = std::env::var("ALLOW_WARDEN_SIGNUP")
            .map(|v| parse_flag(&v).expect("ALLOW_WARDEN_SIGNUP must be true or false"))
            .unwrap_or(true);

        let overdue_sweep_interval_secs: u64 = std::env::var("OVERDUE_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("OVERDUE_SWEEP_INTERVAL_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            database_url,
            db_max_connections,
            jwt: JwtConfig::from_env(),
            min_password_length,
            allow_warden_signup,
            overdue_sweep_interval_secs,
            static_dir,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn storage_backend_parses() {
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!("Postgres".parse::<StorageBackend>(), Ok(StorageBackend::Postgres));
        assert!("mongo".parse::<StorageBackend>().is_err());
    }
}
