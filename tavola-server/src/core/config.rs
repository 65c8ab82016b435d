use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// Every knob can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | {WORK_DIR}/tavola.db | SQLite database file |
/// | LOG_LEVEL | info | tracing filter directive |
/// | LOG_TO_FILE | false | Also write daily-rotated log files |
/// | ENVIRONMENT | development | Runtime environment |
/// | KITCHEN_FEED_CAPACITY | 1024 | Retained kitchen events |
/// | KITCHEN_HEARTBEAT_SECS | 3 | SSE keep-alive interval |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/tavola HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// tracing filter directive (e.g. "info", "tavola_server=debug")
    pub log_level: String,
    /// Write daily-rotated log files under {work_dir}/logs
    pub log_to_file: bool,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Bounded history of the in-process kitchen event feed
    pub kitchen_feed_capacity: usize,
    /// SSE keep-alive interval in seconds
    pub kitchen_heartbeat_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/tavola.db"));
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_to_file: std::env::var("LOG_TO_FILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            kitchen_feed_capacity: std::env::var("KITCHEN_FEED_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
            kitchen_heartbeat_secs: std::env::var("KITCHEN_HEARTBEAT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            work_dir,
        }
    }

    /// Override the paths and port; used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = format!("{}/tavola.db", config.work_dir);
        config.http_port = http_port;
        config
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
