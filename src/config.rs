//! Connection configuration.

use crate::constants::MIN_OUTPUT_BUFFER_SIZE;
use crate::error::{Error, Result};
use std::time::Duration;

/// Settings for a [`Connection`](crate::Connection).
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Connection name, used in log events.
    pub name: String,
    /// Prefix prepended to every table name the grammar renders.
    pub table_prefix: String,
    /// Buffer size in bytes for the RETURNING-INTO output bind (default: 8).
    pub output_buffer_size: usize,
    /// `chrono` format used to render timestamps for binding.
    pub date_format: String,
    /// Whether executed statements are kept in the query log.
    pub log_queries: bool,
    /// Statements slower than this are logged at WARN (default: 1 second).
    pub slow_statement_threshold: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            name: "oracle".to_string(),
            table_prefix: String::new(),
            output_buffer_size: MIN_OUTPUT_BUFFER_SIZE,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            log_queries: false,
            slow_statement_threshold: Duration::from_secs(1),
        }
    }
}

impl ConnectionConfig {
    /// Create a configuration with defaults and the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the table prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use oracle_adapter_rs::ConnectionConfig;
    ///
    /// let config = ConnectionConfig::new("orders").with_table_prefix("app_");
    /// assert_eq!(config.table_prefix, "app_");
    /// ```
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the output bind buffer size in bytes; must be at least 8.
    pub fn with_output_buffer_size(mut self, size: usize) -> Self {
        self.output_buffer_size = size;
        self
    }

    /// Set the `chrono` format used to render timestamp binds.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Keep executed statements in the connection's query log.
    pub fn with_query_log(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Statements running longer than `threshold` are logged at WARN.
    pub fn with_slow_statement_threshold(mut self, threshold: Duration) -> Self {
        self.slow_statement_threshold = threshold;
        self
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.output_buffer_size < MIN_OUTPUT_BUFFER_SIZE {
            return Err(Error::invalid_config(format!(
                "output buffer size {} is too small for a 64-bit identifier (minimum {})",
                self.output_buffer_size, MIN_OUTPUT_BUFFER_SIZE
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(Error::invalid_config("date format must not be empty"));
        }
        if self.table_prefix.contains('"') {
            return Err(Error::invalid_config(format!(
                "table prefix contains a double quote: {}",
                self.table_prefix
            )));
        }
        Ok(())
    }

    /// Load settings from the environment, reading a `.env` file first if
    /// one exists.
    ///
    /// Recognized variables: `ORACLE_ADAPTER_NAME`,
    /// `ORACLE_ADAPTER_TABLE_PREFIX`, `ORACLE_ADAPTER_OUTPUT_BUFFER_SIZE`,
    /// `ORACLE_ADAPTER_LOG_QUERIES`, `ORACLE_ADAPTER_SLOW_STATEMENT_MS`.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; variables may come from the process.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("ORACLE_ADAPTER_NAME") {
            config.name = name;
        }
        if let Some(prefix) = lookup("ORACLE_ADAPTER_TABLE_PREFIX") {
            config.table_prefix = prefix;
        }
        if let Some(size) = lookup("ORACLE_ADAPTER_OUTPUT_BUFFER_SIZE") {
            config.output_buffer_size = size.trim().parse().map_err(|_| {
                Error::invalid_config(format!("Invalid output buffer size: {}", size))
            })?;
        }
        if let Some(flag) = lookup("ORACLE_ADAPTER_LOG_QUERIES") {
            config.log_queries = parse_flag(&flag).ok_or_else(|| {
                Error::invalid_config(format!("Invalid boolean for query log: {}", flag))
            })?;
        }
        if let Some(ms) = lookup("ORACLE_ADAPTER_SLOW_STATEMENT_MS") {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                Error::invalid_config(format!("Invalid slow statement threshold: {}", ms))
            })?;
            config.slow_statement_threshold = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
