//! Oracle wire constants used when describing binds to a driver.
//!
//! Values match the python-oracledb thin client.

// Bind directions
pub const TNS_BIND_DIR_OUTPUT: u8 = 16;
pub const TNS_BIND_DIR_INPUT: u8 = 32;
pub const TNS_BIND_DIR_INPUT_OUTPUT: u8 = 48;

// Oracle data type numbers
pub const ORA_TYPE_NUM_VARCHAR: u16 = 1;
pub const ORA_TYPE_NUM_NUMBER: u16 = 2;
pub const ORA_TYPE_NUM_BLOB: u16 = 113;
pub const ORA_TYPE_NUM_BOOLEAN: u16 = 252;

/// Smallest output buffer able to hold a 64-bit identifier.
pub const MIN_OUTPUT_BUFFER_SIZE: usize = 8;

/// Maximum bytes accepted by a VARCHAR2 bind in standard string mode.
pub const MAX_VARCHAR_BIND_SIZE: usize = 4000;
