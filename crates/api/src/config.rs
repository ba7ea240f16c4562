use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token lifetime in days (default: `7`).
    pub session_ttl_days: i64,
    /// Storage adapter tuning.
    pub store: StoreConfig,
}

/// Retry, timeout, and maintenance settings for the storage adapter.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Attempts per storage operation, including the first (default: `3`).
    pub retry_attempts: u32,
    /// Backoff before the second attempt in milliseconds; doubles per
    /// retry (default: `50`).
    pub retry_backoff_ms: u64,
    /// Per-operation timeout in milliseconds (default: `2000`).
    pub op_timeout_ms: u64,
    /// Interval between background merge/sweep passes in seconds
    /// (default: `60`).
    pub maintenance_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `HOST`                       | `0.0.0.0`                  |
    /// | `PORT`                       | `3000`                     |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                       |
    /// | `SESSION_TTL_DAYS`           | `7`                        |
    /// | `STORE_RETRY_ATTEMPTS`       | `3`                        |
    /// | `STORE_RETRY_BACKOFF_MS`     | `50`                       |
    /// | `STORE_OP_TIMEOUT_MS`        | `2000`                     |
    /// | `MAINTENANCE_INTERVAL_SECS`  | `60`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_ttl_days: i64 = std::env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| "7".into())
            .parse()
            .expect("SESSION_TTL_DAYS must be a valid i64");

        let retry_attempts: u32 = std::env::var("STORE_RETRY_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("STORE_RETRY_ATTEMPTS must be a valid u32");

        let retry_backoff_ms: u64 = std::env::var("STORE_RETRY_BACKOFF_MS")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("STORE_RETRY_BACKOFF_MS must be a valid u64");

        let op_timeout_ms: u64 = std::env::var("STORE_OP_TIMEOUT_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("STORE_OP_TIMEOUT_MS must be a valid u64");

        let maintenance_interval_secs: u64 = std::env::var("MAINTENANCE_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("MAINTENANCE_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_days,
            store: StoreConfig {
                retry_attempts,
                retry_backoff_ms,
                op_timeout_ms,
                maintenance_interval_secs,
            },
        }
    }

    /// Session lifetime as a chrono duration.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.session_ttl_days)
    }

    /// Maintenance cadence as a std duration.
    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.store.maintenance_interval_secs)
    }
}

impl StoreConfig {
    /// Backoff seed as a std duration.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Per-operation timeout as a std duration.
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }
}
