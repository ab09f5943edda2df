//! Integration tests for insert-returning-id against the recording driver.
//!
//! Run with: cargo test --test test_insert_returning_id

use oracle_adapter_rs::testing::{DriverEvent, RecordingDriver};
use oracle_adapter_rs::{
    BindKey, BindType, BindValue, Bindings, Connection, ConnectionConfig,
    DriverError, Error,
};

const INSERT_SQL: &str =
    "INSERT INTO people (name, age) VALUES (:1, :2) RETURNING id INTO :3";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn connect(driver: RecordingDriver) -> Connection<RecordingDriver> {
    init_tracing();
    Connection::new(driver, ConnectionConfig::new("test")).unwrap()
}

#[test]
fn test_steps_run_in_order() {
    let mut conn = connect(RecordingDriver::returning_ids_from(42));
    let bindings = Bindings::new().with(1usize, "Alice").with(2usize, 30);

    let id = conn.insert_returning_id(INSERT_SQL, bindings).unwrap();
    assert_eq!(id, 42);

    let events = conn.driver().events();
    assert_eq!(
        events,
        &[
            DriverEvent::Prepare {
                sql: INSERT_SQL.to_string()
            },
            DriverEvent::BindValue {
                key: BindKey::Position(1),
                value: BindValue::String("Alice".to_string()),
                bind_type: BindType::String,
            },
            DriverEvent::BindValue {
                key: BindKey::Position(2),
                value: BindValue::Integer(30),
                bind_type: BindType::Integer,
            },
            DriverEvent::BindOutput {
                // NUMBER, input/output
                position: 3,
                type_num: 2,
                direction: 48,
                max_size: 8,
                value: 0,
            },
            DriverEvent::Execute {
                sql: INSERT_SQL.to_string()
            },
            DriverEvent::ReadOutput {
                position: 3,
                value: 42
            },
        ]
    );
}

#[test]
fn test_each_insert_gets_its_own_id() {
    let mut conn = connect(RecordingDriver::returning_ids_from(10));
    let first = conn
        .insert_returning_id(INSERT_SQL, Bindings::positional(["Alice", "30"]))
        .unwrap();
    let second = conn
        .insert_returning_id(INSERT_SQL, Bindings::positional(["Bob", "41"]))
        .unwrap();
    assert_eq!((first, second), (10, 11));
}

#[test]
fn test_large_identifiers_pass_through() {
    let mut conn = connect(RecordingDriver::returning_ids_from(i64::MAX));
    let id = conn
        .insert_returning_id(
            "insert into big (v) values (:1) returning id into :2",
            Bindings::positional([1]),
        )
        .unwrap();
    assert_eq!(id, i64::MAX);

    let named = conn
        .insert_returning_id(
            "insert into big (a, b) values (:a, :b) returning id into :3",
            Bindings::new().with("a", 1).with("b", 2),
        )
        .unwrap();
    assert_eq!(named, i64::MIN);
}

#[test]
fn test_configured_output_buffer_size() {
    init_tracing();
    let config = ConnectionConfig::default().with_output_buffer_size(22);
    let mut conn = Connection::new(RecordingDriver::new(), config).unwrap();
    conn.insert_returning_id(INSERT_SQL, Bindings::positional(["Alice", "30"]))
        .unwrap();

    let max_size = conn.driver().events().iter().find_map(|e| match e {
        DriverEvent::BindOutput { max_size, .. } => Some(*max_size),
        _ => None,
    });
    assert_eq!(max_size, Some(22));
}

#[test]
fn test_execution_error_after_marking() {
    let mut driver = RecordingDriver::new();
    driver.fail_next_execute(DriverError::oracle(
        1,
        "unique constraint (APP.PEOPLE_PK) violated",
    ));
    let mut conn = connect(driver);
    assert!(!conn.has_modified_records());

    let err = conn
        .insert_returning_id(INSERT_SQL, Bindings::positional(["Alice", "30"]))
        .unwrap_err();

    assert!(matches!(err, Error::Execution { .. }));
    assert!(err.to_string().contains("ORA-00001"));
    assert!(conn.has_modified_records());
    assert!(!conn
        .driver()
        .events()
        .iter()
        .any(|e| matches!(e, DriverEvent::Execute { .. } | DriverEvent::ReadOutput { .. })));
}

#[test]
fn test_connection_loss_during_execute() {
    let mut driver = RecordingDriver::new();
    driver.fail_next_execute(DriverError::ConnectionClosed);
    let mut conn = connect(driver);

    let err = conn
        .insert_returning_id(INSERT_SQL, Bindings::positional(["Alice", "30"]))
        .unwrap_err();
    assert!(err.is_execution());
    assert!(matches!(
        err.driver_error(),
        Some(DriverError::ConnectionClosed)
    ));
}

#[test]
fn test_invalid_sql_is_prepare_error() {
    let mut driver = RecordingDriver::new();
    driver.fail_next_prepare(DriverError::oracle(933, "SQL command not properly ended"));
    let mut conn = connect(driver);

    let err = conn
        .insert_returning_id("INSERT INTO people VALUES", Bindings::new())
        .unwrap_err();
    assert!(err.is_prepare());
    assert_eq!(err.ora_code(), Some(933));
    assert!(!conn.has_modified_records());
    assert!(conn.driver().events().is_empty());
}

#[test]
fn test_no_bindings_puts_output_at_first_position() {
    let mut conn = connect(RecordingDriver::returning_ids_from(5));
    let id = conn
        .insert_returning_id(
            "insert into counters (id) values (default) returning id into :1",
            Bindings::new(),
        )
        .unwrap();
    assert_eq!(id, 5);
    assert!(conn.driver().events().iter().any(|e| matches!(
        e,
        DriverEvent::BindOutput { position: 1, .. }
    )));
}

#[test]
fn test_insert_get_id_with_sequence_column() {
    let mut conn = connect(RecordingDriver::returning_ids_from(900));
    let id = conn
        .insert_get_id(
            "orders",
            vec![("customer", BindValue::from("ACME")), ("paid", BindValue::from(false))],
            Some("order_id"),
        )
        .unwrap();
    assert_eq!(id, 900);

    let events = conn.driver().events();
    assert_eq!(
        events[0],
        DriverEvent::Prepare {
            sql: "insert into \"orders\" (\"customer\", \"paid\") values (:1, :2) returning \"order_id\" into :3"
                .to_string()
        }
    );
    // Booleans are written as NUMBER(1) values.
    assert_eq!(
        events[2],
        DriverEvent::BindValue {
            key: BindKey::Position(2),
            value: BindValue::Integer(0),
            bind_type: BindType::Integer,
        }
    );
}

#[test]
fn test_query_log_when_enabled_by_config() {
    init_tracing();
    let config = ConnectionConfig::default().with_query_log(true);
    let mut conn = Connection::new(RecordingDriver::new(), config).unwrap();
    assert!(conn.logging_queries());

    conn.insert_returning_id(INSERT_SQL, Bindings::positional(["Alice", "30"]))
        .unwrap();
    conn.disable_query_log();
    conn.insert_returning_id(INSERT_SQL, Bindings::positional(["Bob", "31"]))
        .unwrap();

    assert_eq!(conn.query_log().len(), 1);
    assert_eq!(conn.query_log()[0].sql, INSERT_SQL);
}
