//! Error types for the Oracle adapter.

use crate::types::{BindKey, BindType};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for driver implementations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Error type for adapter operations.
///
/// The three statement variants name the step that failed; the driver's
/// own error is kept as the source.
#[derive(Error, Debug)]
pub enum Error {
    /// The driver could not prepare the statement.
    #[error("Failed to prepare statement: {source} (SQL: {sql})")]
    Prepare {
        sql: String,
        #[source]
        source: DriverError,
    },

    /// The statement rejected a bind.
    #[error("Failed to bind parameter {key}: {source}")]
    Bind {
        key: BindKey,
        #[source]
        source: DriverError,
    },

    /// The statement failed while executing.
    #[error("Statement execution failed: {source} (SQL: {sql})")]
    Execution {
        sql: String,
        #[source]
        source: DriverError,
    },

    /// Invalid connection configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The grammar could not build the requested statement.
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },
}

impl Error {
    /// Create a prepare error.
    pub fn prepare(sql: impl Into<String>, source: DriverError) -> Self {
        Self::Prepare {
            sql: sql.into(),
            source,
        }
    }

    /// Create a bind error.
    pub fn bind(key: BindKey, source: DriverError) -> Self {
        Self::Bind { key, source }
    }

    /// Create an execution error.
    pub fn execution(sql: impl Into<String>, source: DriverError) -> Self {
        Self::Execution {
            sql: sql.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a query error.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// The underlying driver error, if this error came from the driver.
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            Error::Prepare { source, .. }
            | Error::Bind { source, .. }
            | Error::Execution { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The ORA error code reported by the database, if any.
    pub fn ora_code(&self) -> Option<u32> {
        match self.driver_error()? {
            DriverError::Oracle { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_prepare(&self) -> bool {
        matches!(self, Error::Prepare { .. })
    }

    pub fn is_bind(&self) -> bool {
        matches!(self, Error::Bind { .. })
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, Error::Execution { .. })
    }
}

/// Error reported by a [`Driver`](crate::driver::Driver) or its statements.
#[derive(Error, Debug)]
pub enum DriverError {
    /// I/O error during network communication.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Oracle database error.
    #[error("ORA-{code:05}: {message}")]
    Oracle { code: u32, message: String },

    /// Connection closed.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Statement closed or already consumed.
    #[error("Statement closed")]
    StatementClosed,

    /// Bind position outside the statement's placeholders.
    #[error("Bind position {position} out of range (placeholders: {count})")]
    BindPositionOutOfRange { position: usize, count: usize },

    /// Bind name not present in the statement.
    #[error("Unknown bind name: {name}")]
    UnknownBindName { name: String },

    /// The driver refused the bind type for this placeholder.
    #[error("Type mismatch binding {key}: expected {expected}")]
    TypeMismatch { key: BindKey, expected: BindType },

    /// No value was written back for an output bind.
    #[error("No output value available for bind :{position}")]
    OutputNotAvailable { position: usize },

    /// The driver gave up waiting for the server.
    #[error("Operation timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

impl DriverError {
    /// Create an Oracle database error.
    pub fn oracle(code: u32, message: impl Into<String>) -> Self {
        Self::Oracle {
            code,
            message: message.into(),
        }
    }
}
