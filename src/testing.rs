//! In-memory driver for exercising the adapter without a database.
//!
//! [`RecordingDriver`] prepares statements against nothing: it scans the
//! SQL for placeholders, checks every bind against them, records each call
//! as a [`DriverEvent`], and on execute writes generated ids into output
//! binds the way a `RETURNING ... INTO` clause would.

use crate::driver::{Driver, OutputSlot, Statement};
use crate::error::{DriverError, DriverResult};
use crate::types::{BindKey, BindType, BindValue};
use std::collections::HashMap;

/// One call made against the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Prepare {
        sql: String,
    },
    BindValue {
        key: BindKey,
        value: BindValue,
        bind_type: BindType,
    },
    /// Output binds are recorded the way they are described on the wire:
    /// Oracle type number and TNS direction code.
    BindOutput {
        position: usize,
        type_num: u16,
        direction: u8,
        max_size: usize,
        value: i64,
    },
    Execute {
        sql: String,
    },
    ReadOutput {
        position: usize,
        value: i64,
    },
}

/// Scripted driver that records every call.
#[derive(Debug)]
pub struct RecordingDriver {
    events: Vec<DriverEvent>,
    next_id: i64,
    prepare_error: Option<DriverError>,
    execute_error: Option<DriverError>,
    closed: bool,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDriver {
    /// A driver whose generated ids start at 1.
    pub fn new() -> Self {
        Self::returning_ids_from(1)
    }

    /// A driver whose generated ids start at `first`.
    pub fn returning_ids_from(first: i64) -> Self {
        Self {
            events: Vec::new(),
            next_id: first,
            prepare_error: None,
            execute_error: None,
            closed: false,
        }
    }

    /// Make the next `prepare` fail with `error`.
    pub fn fail_next_prepare(&mut self, error: DriverError) {
        self.prepare_error = Some(error);
    }

    /// Make the next `execute` fail with `error`.
    pub fn fail_next_execute(&mut self, error: DriverError) {
        self.execute_error = Some(error);
    }

    /// Simulate a lost connection; every later call fails.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Every call recorded so far, oldest first.
    pub fn events(&self) -> &[DriverEvent] {
        &self.events
    }

    /// The id the next output bind will receive.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    fn check_open(&self) -> DriverResult<()> {
        if self.closed {
            return Err(DriverError::ConnectionClosed);
        }
        Ok(())
    }
}

impl Driver for RecordingDriver {
    type Statement<'c> = RecordingStatement<'c>;

    fn prepare(&mut self, sql: &str) -> DriverResult<RecordingStatement<'_>> {
        self.check_open()?;
        if let Some(error) = self.prepare_error.take() {
            return Err(error);
        }
        if sql.trim().is_empty() {
            return Err(DriverError::oracle(900, "invalid SQL statement"));
        }
        self.events.push(DriverEvent::Prepare {
            sql: sql.to_string(),
        });
        Ok(RecordingStatement {
            placeholders: scan_placeholders(sql),
            sql: sql.to_string(),
            outputs: Vec::new(),
            written: HashMap::new(),
            driver: self,
        })
    }
}

/// Statement handle produced by [`RecordingDriver`].
#[derive(Debug)]
pub struct RecordingStatement<'c> {
    driver: &'c mut RecordingDriver,
    sql: String,
    placeholders: Vec<Placeholder>,
    outputs: Vec<usize>,
    written: HashMap<usize, i64>,
}

impl RecordingStatement<'_> {
    fn check_key(&self, key: &BindKey) -> DriverResult<()> {
        match key {
            BindKey::Position(position) => {
                if *position == 0 || *position > self.placeholders.len() {
                    return Err(DriverError::BindPositionOutOfRange {
                        position: *position,
                        count: self.placeholders.len(),
                    });
                }
            }
            BindKey::Name(name) => {
                let found = self.placeholders.iter().any(|p| match p {
                    Placeholder::Named(n) => n.eq_ignore_ascii_case(name),
                    _ => false,
                });
                if !found {
                    return Err(DriverError::UnknownBindName { name: name.clone() });
                }
            }
        }
        Ok(())
    }
}

impl Statement for RecordingStatement<'_> {
    fn bind_value(
        &mut self,
        key: &BindKey,
        value: &BindValue,
        bind_type: BindType,
    ) -> DriverResult<()> {
        self.driver.check_open()?;
        self.check_key(key)?;
        if let Some(text) = value.as_str() {
            let limit = bind_type.max_size();
            if limit > 0 && text.len() > limit {
                return Err(DriverError::oracle(
                    1461,
                    "can bind a LONG value only for insert into a LONG column",
                ));
            }
        }
        self.driver.events.push(DriverEvent::BindValue {
            key: key.clone(),
            value: value.clone(),
            bind_type,
        });
        Ok(())
    }

    fn bind_output(&mut self, slot: &OutputSlot) -> DriverResult<()> {
        self.driver.check_open()?;
        self.check_key(&slot.key())?;
        if slot.bind_type() != BindType::Integer {
            return Err(DriverError::TypeMismatch {
                key: slot.key(),
                expected: BindType::Integer,
            });
        }
        self.outputs.push(slot.position());
        self.driver.events.push(DriverEvent::BindOutput {
            position: slot.position(),
            type_num: slot.bind_type().type_num(),
            direction: slot.direction().code(),
            max_size: slot.max_size(),
            value: slot.value(),
        });
        Ok(())
    }

    fn execute(&mut self) -> DriverResult<u64> {
        self.driver.check_open()?;
        if let Some(error) = self.driver.execute_error.take() {
            return Err(error);
        }
        self.driver.events.push(DriverEvent::Execute {
            sql: self.sql.clone(),
        });
        for position in &self.outputs {
            self.written.insert(*position, self.driver.next_id);
            self.driver.next_id = self.driver.next_id.wrapping_add(1);
        }
        Ok(1)
    }

    fn read_output(&mut self, slot: &mut OutputSlot) -> DriverResult<()> {
        let value = *self
            .written
            .get(&slot.position())
            .ok_or(DriverError::OutputNotAvailable {
                position: slot.position(),
            })?;
        slot.set_value(value);
        self.driver.events.push(DriverEvent::ReadOutput {
            position: slot.position(),
            value,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Placeholder {
    /// `?` or `:1`
    Positional,
    /// `:name`
    Named(String),
}

/// Find bind placeholders, skipping quoted text and identifiers.
fn scan_placeholders(sql: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                for inner in chars.by_ref() {
                    if inner == c {
                        break;
                    }
                }
            }
            '?' => placeholders.push(Placeholder::Positional),
            ':' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    continue;
                }
                if name.chars().all(|ch| ch.is_ascii_digit()) {
                    placeholders.push(Placeholder::Positional);
                } else {
                    placeholders.push(Placeholder::Named(name));
                }
            }
            _ => {}
        }
    }

    placeholders
}
