//! Statement timing and `tracing` output.

use crate::error::Error;
use crate::types::Bindings;
use std::time::{Duration, Instant};

/// `tracing` target for statement events.
pub const QUERY_TARGET: &str = "oracle_adapter::query";

/// A statement recorded in the connection's query log.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedQuery {
    pub sql: String,
    pub bindings: Bindings,
    pub elapsed: Duration,
    /// Whether the statement completed without error.
    pub succeeded: bool,
}

/// Times one statement and reports it when finished.
pub struct QueryLogger<'q> {
    connection: &'q str,
    sql: &'q str,
    bind_count: usize,
    start: Instant,
    slow_threshold: Duration,
}

impl<'q> QueryLogger<'q> {
    /// Start timing `sql` on the named connection.
    pub fn new(
        connection: &'q str,
        sql: &'q str,
        bind_count: usize,
        slow_threshold: Duration,
    ) -> Self {
        Self {
            connection,
            sql,
            bind_count,
            start: Instant::now(),
            slow_threshold,
        }
    }

    /// Emit the statement event and return the elapsed time.
    pub fn finish(self, error: Option<&Error>) -> Duration {
        let elapsed = self.start.elapsed();
        let summary = parse_query_summary(self.sql);

        if let Some(error) = error {
            tracing::warn!(
                target: QUERY_TARGET,
                connection = self.connection,
                summary,
                db.statement = self.sql,
                binds = self.bind_count,
                ?elapsed,
                %error,
                "statement failed"
            );
        } else if elapsed >= self.slow_threshold {
            tracing::warn!(
                target: QUERY_TARGET,
                connection = self.connection,
                summary,
                db.statement = self.sql,
                binds = self.bind_count,
                ?elapsed,
                elapsed_secs = elapsed.as_secs_f64(),
                slow_threshold = ?self.slow_threshold,
                "slow statement: execution time exceeded alert threshold"
            );
        } else {
            tracing::debug!(
                target: QUERY_TARGET,
                connection = self.connection,
                summary,
                binds = self.bind_count,
                ?elapsed,
                elapsed_secs = elapsed.as_secs_f64(),
            );
        }

        elapsed
    }
}

/// First four words of the statement.
pub fn parse_query_summary(sql: &str) -> String {
    sql.split_whitespace()
        .take(4)
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        assert_eq!(
            parse_query_summary("insert into \"users\"\n (\"name\") values (:1)"),
            "insert into \"users\" (\"name\")"
        );
        assert_eq!(parse_query_summary("commit"), "commit");
    }

    #[test]
    fn test_finish_reports_elapsed() {
        let logger = QueryLogger::new("oracle", "select 1 from dual", 0, Duration::from_secs(60));
        let elapsed = logger.finish(None);
        assert!(elapsed < Duration::from_secs(60));
    }
}
