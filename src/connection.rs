//! High-level Connection API for the Oracle adapter.

use crate::bind::{bind_all, prepare_bindings};
use crate::config::ConnectionConfig;
use crate::driver::{Driver, OutputSlot, Statement};
use crate::error::{Error, Result};
use crate::grammar::QueryGrammar;
use crate::logger::{LoggedQuery, QueryLogger};
use crate::processor::Processor;
use crate::types::{BindValue, Bindings};

/// Whether a connection has issued writes.
///
/// Read by higher layers deciding whether read caches are stale or reads
/// must stick to the primary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ModificationState {
    records_modified: bool,
}

impl ModificationState {
    /// Once set, stays set until explicitly overwritten.
    fn records_have_been_modified(&mut self, value: bool) {
        if !self.records_modified {
            self.records_modified = value;
        }
    }
}

/// An Oracle connection wrapping a prepared-statement [`Driver`].
///
/// Statement-running methods take `&mut self`: one connection runs one
/// statement at a time.
#[derive(Debug)]
pub struct Connection<D> {
    driver: D,
    config: ConnectionConfig,
    grammar: QueryGrammar,
    processor: Processor,
    state: ModificationState,
    logging_queries: bool,
    query_log: Vec<LoggedQuery>,
}

impl<D: Driver> Connection<D> {
    /// Wrap `driver` with the given configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use oracle_adapter_rs::testing::RecordingDriver;
    /// use oracle_adapter_rs::{Bindings, Connection, ConnectionConfig};
    ///
    /// let driver = RecordingDriver::returning_ids_from(42);
    /// let mut conn = Connection::new(driver, ConnectionConfig::default())?;
    /// let id = conn.insert_returning_id(
    ///     "insert into users (name, age) values (:1, :2) returning id into :3",
    ///     Bindings::positional(["Alice", "30"]),
    /// )?;
    /// assert_eq!(id, 42);
    /// # Ok::<(), oracle_adapter_rs::Error>(())
    /// ```
    pub fn new(driver: D, config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let grammar = QueryGrammar::new()
            .with_table_prefix(config.table_prefix.clone())
            .with_date_format(config.date_format.clone());
        Ok(Self {
            driver,
            logging_queries: config.log_queries,
            config,
            grammar,
            processor: Processor,
            state: ModificationState::default(),
            query_log: Vec::new(),
        })
    }

    /// Connection name from the configuration.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configuration this connection was created with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the underlying driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Unwrap the underlying driver.
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// The query grammar, carrying this connection's table prefix.
    pub fn query_grammar(&self) -> &QueryGrammar {
        &self.grammar
    }

    /// The post-processor used by [`insert_get_id`](Self::insert_get_id).
    pub fn post_processor(&self) -> &Processor {
        &self.processor
    }

    /// Change the table prefix used by the grammar.
    pub fn set_table_prefix(&mut self, prefix: impl Into<String>) {
        self.config.table_prefix = prefix.into();
        self.grammar = self
            .grammar
            .clone()
            .with_table_prefix(self.config.table_prefix.clone());
    }

    /// Normalize bindings for a write (timestamps to text, booleans to 0/1).
    pub fn prepare_bindings(&self, bindings: Bindings) -> Bindings {
        prepare_bindings(bindings, self.grammar.date_format())
    }

    /// Run an insert whose `RETURNING ... INTO` clause writes the generated
    /// id into the bind right after `bindings`, and return that id.
    ///
    /// The connection is marked as modified before the statement executes,
    /// so it stays marked when execution fails. On failure the insert may or
    /// may not have been applied.
    pub fn insert_returning_id(&mut self, sql: &str, bindings: Bindings) -> Result<i64> {
        let bindings = self.prepare_bindings(bindings);
        let output_buffer_size = self.config.output_buffer_size;

        self.run(sql, &bindings, |driver, state| {
            let mut statement = driver.prepare(sql).map_err(|e| Error::prepare(sql, e))?;

            bind_all(&mut statement, &bindings)?;

            // The output slot goes after the last supplied binding.
            let mut slot = OutputSlot::integer(bindings.len() + 1, output_buffer_size);
            tracing::trace!(
                target: "oracle_adapter::bind",
                position = slot.position(),
                max_size = slot.max_size(),
                "binding output slot"
            );
            statement
                .bind_output(&slot)
                .map_err(|e| Error::bind(slot.key(), e))?;

            // Mark before executing: a failed write still counts as attempted.
            state.records_have_been_modified(true);

            statement.execute().map_err(|e| Error::execution(sql, e))?;

            statement
                .read_output(&mut slot)
                .map_err(|e| Error::execution(sql, e))?;
            Ok(slot.value())
        })
    }

    /// Insert `values` into `table` and return the generated key from the
    /// `sequence` column (default `id`).
    pub fn insert_get_id<I, C, V>(
        &mut self,
        table: &str,
        values: I,
        sequence: Option<&str>,
    ) -> Result<i64>
    where
        I: IntoIterator<Item = (C, V)>,
        C: AsRef<str>,
        V: Into<BindValue>,
    {
        let (columns, values): (Vec<C>, Vec<BindValue>) =
            values.into_iter().map(|(c, v)| (c, v.into())).unzip();
        let columns: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();

        let sql = self
            .grammar
            .compile_insert_get_id(table, &columns, sequence)?;
        let processor = self.processor;
        processor.process_insert_get_id(self, &sql, Bindings::positional(values), sequence)
    }

    /// Record that this connection has modified records. Has no effect
    /// once the connection is already marked.
    pub fn records_have_been_modified(&mut self, value: bool) {
        self.state.records_have_been_modified(value);
    }

    /// Overwrite the modification state.
    pub fn set_records_modified(&mut self, value: bool) {
        self.state.records_modified = value;
    }

    /// Whether this connection has issued a write.
    pub fn has_modified_records(&self) -> bool {
        self.state.records_modified
    }

    /// Start recording statements in the query log.
    pub fn enable_query_log(&mut self) {
        self.logging_queries = true;
    }

    /// Stop recording statements; the existing log is kept.
    pub fn disable_query_log(&mut self) {
        self.logging_queries = false;
    }

    /// Whether the query log is enabled.
    pub fn logging_queries(&self) -> bool {
        self.logging_queries
    }

    /// Statements recorded while the query log was enabled.
    pub fn query_log(&self) -> &[LoggedQuery] {
        &self.query_log
    }

    /// Clear the query log.
    pub fn flush_query_log(&mut self) {
        self.query_log.clear();
    }

    /// Run one statement: time it, log it, and record it in the query log.
    fn run<T, F>(&mut self, sql: &str, bindings: &Bindings, f: F) -> Result<T>
    where
        F: FnOnce(&mut D, &mut ModificationState) -> Result<T>,
    {
        let logger = QueryLogger::new(
            &self.config.name,
            sql,
            bindings.len(),
            self.config.slow_statement_threshold,
        );

        let result = f(&mut self.driver, &mut self.state);

        let elapsed = logger.finish(result.as_ref().err());
        if self.logging_queries {
            self.query_log.push(LoggedQuery {
                sql: sql.to_string(),
                bindings: bindings.clone(),
                elapsed,
                succeeded: result.is_ok(),
            });
        }

        result
    }
}
