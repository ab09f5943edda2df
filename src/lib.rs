//! Oracle adapter for prepared-statement drivers
//!
//! Binds values into prepared statements with a type chosen from the value
//! itself, and runs inserts that hand back the generated key through an
//! Oracle `RETURNING ... INTO` output bind, since Oracle has no "last insert
//! id" call.
//!
//! # Example
//!
//! ```
//! use oracle_adapter_rs::testing::RecordingDriver;
//! use oracle_adapter_rs::{BindValue, Connection, ConnectionConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = ConnectionConfig::new("app").with_table_prefix("app_");
//!     let mut conn = Connection::new(RecordingDriver::returning_ids_from(1001), config)?;
//!
//!     // insert into "app_users" ("name", "age") values (:1, :2) returning "id" into :3
//!     let id = conn.insert_get_id(
//!         "users",
//!         [("name", BindValue::from("Alice")), ("age", BindValue::from(30))],
//!         None,
//!     )?;
//!     assert_eq!(id, 1001);
//!     assert!(conn.has_modified_records());
//!
//!     Ok(())
//! }
//! ```

pub mod bind;
pub mod config;
pub mod connection;
pub mod constants;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod logger;
pub mod processor;
pub mod testing;
pub mod types;

// Re-export main types
pub use bind::{bind_all, infer_type, prepare_bindings};
pub use config::ConnectionConfig;
pub use connection::Connection;
pub use driver::{Driver, OutputSlot, Statement};
pub use error::{DriverError, DriverResult, Error, Result};
pub use grammar::QueryGrammar;
pub use logger::LoggedQuery;
pub use processor::Processor;
pub use types::{BindDirection, BindKey, BindType, BindValue, Bindings};
