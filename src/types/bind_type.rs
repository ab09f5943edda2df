//! Bind types and directions.

use crate::constants::{
    MAX_VARCHAR_BIND_SIZE, ORA_TYPE_NUM_BLOB, ORA_TYPE_NUM_BOOLEAN, ORA_TYPE_NUM_NUMBER,
    ORA_TYPE_NUM_VARCHAR, TNS_BIND_DIR_INPUT, TNS_BIND_DIR_INPUT_OUTPUT, TNS_BIND_DIR_OUTPUT,
};

/// How a value is presented to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindType {
    Integer,
    Boolean,
    Null,
    LargeObject,
    String,
}

impl BindType {
    /// Oracle type number the driver should describe the bind with.
    ///
    /// NULL binds travel as VARCHAR2, which Oracle converts to any column type.
    pub fn type_num(&self) -> u16 {
        match self {
            BindType::Integer => ORA_TYPE_NUM_NUMBER,
            BindType::Boolean => ORA_TYPE_NUM_BOOLEAN,
            BindType::Null | BindType::String => ORA_TYPE_NUM_VARCHAR,
            BindType::LargeObject => ORA_TYPE_NUM_BLOB,
        }
    }

    /// Default buffer size for an input bind of this type, 0 when the
    /// driver sizes it from the value.
    pub fn max_size(&self) -> usize {
        match self {
            BindType::String | BindType::Null => MAX_VARCHAR_BIND_SIZE,
            _ => 0,
        }
    }
}

impl std::fmt::Display for BindType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindType::Integer => write!(f, "INTEGER"),
            BindType::Boolean => write!(f, "BOOLEAN"),
            BindType::Null => write!(f, "NULL"),
            BindType::LargeObject => write!(f, "LOB"),
            BindType::String => write!(f, "STRING"),
        }
    }
}

/// Direction of a bind parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindDirection {
    #[default]
    Input,
    Output,
    /// Sent to the server and written back after execution.
    InputOutput,
}

impl BindDirection {
    /// TNS direction code.
    pub fn code(&self) -> u8 {
        match self {
            BindDirection::Input => TNS_BIND_DIR_INPUT,
            BindDirection::Output => TNS_BIND_DIR_OUTPUT,
            BindDirection::InputOutput => TNS_BIND_DIR_INPUT_OUTPUT,
        }
    }
}
