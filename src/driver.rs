//! Driver seam: the prepared-statement API the adapter binds into.
//!
//! A [`Driver`] wraps a live Oracle client connection. The adapter never
//! speaks the wire protocol itself; it prepares a [`Statement`], binds
//! values into it, executes it, and reads output binds back.

use crate::constants::MIN_OUTPUT_BUFFER_SIZE;
use crate::error::DriverResult;
use crate::types::{BindDirection, BindKey, BindType, BindValue};

/// A connection able to prepare statements.
pub trait Driver {
    /// Statement handle; borrows the connection for its lifetime.
    type Statement<'c>: Statement
    where
        Self: 'c;

    /// Parse `sql` and return a handle ready for binding.
    fn prepare(&mut self, sql: &str) -> DriverResult<Self::Statement<'_>>;
}

/// A prepared statement handle.
pub trait Statement {
    /// Bind an input value at `key` with the given type.
    fn bind_value(&mut self, key: &BindKey, value: &BindValue, bind_type: BindType)
        -> DriverResult<()>;

    /// Register an output capture slot. The slot's current value is sent as
    /// the input half of an input/output bind.
    fn bind_output(&mut self, slot: &OutputSlot) -> DriverResult<()>;

    /// Run the statement, returning the number of rows affected.
    fn execute(&mut self) -> DriverResult<u64>;

    /// Copy the value the server wrote for `slot` into it.
    ///
    /// Only meaningful after a successful [`execute`](Self::execute).
    fn read_output(&mut self, slot: &mut OutputSlot) -> DriverResult<()>;
}

/// Integer cell bound in both directions so the server can write a value
/// back, e.g. the target of `RETURNING id INTO :n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSlot {
    position: usize,
    bind_type: BindType,
    direction: BindDirection,
    max_size: usize,
    value: i64,
}

impl OutputSlot {
    /// An integer input/output slot at `position`, starting at 0.
    pub fn integer(position: usize, max_size: usize) -> Self {
        Self {
            position,
            bind_type: BindType::Integer,
            direction: BindDirection::InputOutput,
            max_size: max_size.max(MIN_OUTPUT_BUFFER_SIZE),
            value: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Positional key of the slot.
    pub fn key(&self) -> BindKey {
        BindKey::Position(self.position)
    }

    pub fn bind_type(&self) -> BindType {
        self.bind_type
    }

    pub fn direction(&self) -> BindDirection {
        self.direction
    }

    /// Buffer size in bytes the driver must reserve for the returned value.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Current value: 0 until the driver writes one back.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Store the value the server returned.
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }
}
