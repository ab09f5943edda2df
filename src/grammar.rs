//! Oracle query grammar for insert statements.
//!
//! Renders identifiers with the connection's table prefix, numbered
//! placeholders (`:1`, `:2`, ...) and the `RETURNING ... INTO` clause used to
//! capture generated keys.

use crate::error::{Error, Result};

/// Column that receives the generated key when none is given.
pub const DEFAULT_SEQUENCE_COLUMN: &str = "id";

/// SQL renderer for the Oracle dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryGrammar {
    table_prefix: String,
    date_format: String,
}

impl Default for QueryGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryGrammar {
    /// A grammar with no table prefix and the default date format.
    pub fn new() -> Self {
        Self {
            table_prefix: String::new(),
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }

    /// Set the prefix prepended to table names.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the `chrono` format used for timestamp binds.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// `chrono` format for timestamp binds.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Quote a single identifier segment. `*` is left bare.
    pub fn wrap_value(&self, value: &str) -> String {
        if value == "*" {
            return value.to_string();
        }
        format!("\"{}\"", value.replace('"', "\"\""))
    }

    /// Quote a possibly qualified column name (`users.id`).
    pub fn wrap(&self, column: &str) -> String {
        column
            .split('.')
            .map(|segment| self.wrap_value(segment.trim()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quote a table name, applying the prefix to the table segment.
    /// A schema qualifier (`hr.employees`) is kept unprefixed.
    pub fn wrap_table(&self, table: &str) -> String {
        match table.rsplit_once('.') {
            Some((schema, name)) => format!(
                "{}.{}",
                self.wrap_value(schema.trim()),
                self.wrap_value(&format!("{}{}", self.table_prefix, name.trim()))
            ),
            None => self.wrap_value(&format!("{}{}", self.table_prefix, table.trim())),
        }
    }

    /// Placeholder for the bind at 1-based `position`.
    pub fn parameter(&self, position: usize) -> String {
        format!(":{}", position)
    }

    /// `insert into "t" ("a", "b") values (:1, :2)`
    pub fn compile_insert(&self, table: &str, columns: &[&str]) -> Result<String> {
        check_table(table)?;
        if columns.is_empty() {
            return Err(Error::invalid_query(format!(
                "insert into {} needs at least one column",
                table
            )));
        }
        let names = columns
            .iter()
            .map(|c| self.wrap(c))
            .collect::<Vec<_>>()
            .join(", ");
        let params = (1..=columns.len())
            .map(|p| self.parameter(p))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "insert into {} ({}) values ({})",
            self.wrap_table(table),
            names,
            params
        ))
    }

    /// Insert that writes the generated `sequence` column into the bind
    /// following the last value placeholder.
    ///
    /// Without columns the sequence column is inserted as `default`, since
    /// Oracle has no `default values` form.
    pub fn compile_insert_get_id(
        &self,
        table: &str,
        columns: &[&str],
        sequence: Option<&str>,
    ) -> Result<String> {
        let sequence = sequence.unwrap_or(DEFAULT_SEQUENCE_COLUMN);
        let insert = if columns.is_empty() {
            check_table(table)?;
            format!(
                "insert into {} ({}) values (default)",
                self.wrap_table(table),
                self.wrap(sequence)
            )
        } else {
            self.compile_insert(table, columns)?
        };
        Ok(format!(
            "{} {}",
            insert,
            self.compile_returning_into(sequence, columns.len() + 1)
        ))
    }

    /// `returning "id" into :n`
    pub fn compile_returning_into(&self, column: &str, position: usize) -> String {
        format!(
            "returning {} into {}",
            self.wrap(column),
            self.parameter(position)
        )
    }
}

fn check_table(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(Error::invalid_query("table name must not be empty"));
    }
    Ok(())
}
