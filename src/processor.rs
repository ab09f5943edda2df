//! Post-processing of compiled statements.

use crate::connection::Connection;
use crate::driver::Driver;
use crate::error::Result;
use crate::grammar::DEFAULT_SEQUENCE_COLUMN;
use crate::types::Bindings;

/// Oracle post-processor.
///
/// Oracle has no "last insert id" call, so insert-get-id is routed through
/// the connection's RETURNING-INTO capture instead of a follow-up query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Processor;

impl Processor {
    /// Run a compiled insert-get-id statement and return the generated key.
    pub fn process_insert_get_id<D: Driver>(
        &self,
        connection: &mut Connection<D>,
        sql: &str,
        values: Bindings,
        sequence: Option<&str>,
    ) -> Result<i64> {
        let id = connection.insert_returning_id(sql, values)?;
        tracing::trace!(
            target: "oracle_adapter::processor",
            sequence = sequence.unwrap_or(DEFAULT_SEQUENCE_COLUMN),
            id,
            "captured generated key"
        );
        Ok(id)
    }
}
