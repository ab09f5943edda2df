//! Type-directed parameter binding.

use crate::driver::Statement;
use crate::error::{Error, Result};
use crate::types::{BindType, BindValue, Bindings};

type Predicate = fn(&BindValue) -> bool;

/// Classification rules, tried in order. The first match wins; anything
/// left over binds as a string.
///
/// `Integer(1)` is also boolean-like, so Integer must come before Boolean.
const TYPE_RULES: [(Predicate, BindType); 4] = [
    (BindValue::is_integer, BindType::Integer),
    (BindValue::is_boolean_like, BindType::Boolean),
    (BindValue::is_null, BindType::Null),
    (BindValue::is_lob, BindType::LargeObject),
];

/// Pick the bind type for `value`.
pub fn infer_type(value: &BindValue) -> BindType {
    TYPE_RULES
        .iter()
        .find(|(matches, _)| matches(value))
        .map_or(BindType::String, |(_, bind_type)| *bind_type)
}

/// Bind every entry of `bindings` into `statement`, in order.
///
/// Stops at the first rejected bind. Binds already applied stay on the
/// statement; the caller is expected to drop it.
pub fn bind_all<S: Statement + ?Sized>(statement: &mut S, bindings: &Bindings) -> Result<()> {
    for (key, value) in bindings.iter() {
        let bind_type = infer_type(value);
        tracing::trace!(target: "oracle_adapter::bind", %key, %bind_type, "binding value");
        statement
            .bind_value(key, value, bind_type)
            .map_err(|source| Error::bind(key.clone(), source))?;
    }
    Ok(())
}

/// Normalize values before they are bound for a write.
///
/// Timestamps are rendered with `date_format` and booleans become 0/1,
/// so NUMBER(1) flag columns work on servers without a BOOLEAN type.
pub fn prepare_bindings(bindings: Bindings, date_format: &str) -> Bindings {
    bindings.map_values(|value| match value {
        BindValue::Timestamp(dt) => BindValue::String(dt.format(date_format).to_string()),
        BindValue::Boolean(b) => BindValue::Integer(i64::from(b)),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::OutputSlot;
    use crate::error::{DriverError, DriverResult};
    use crate::types::BindKey;
    use bytes::Bytes;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct CaptureStatement {
        binds: Vec<(BindKey, BindType)>,
        reject: Option<BindKey>,
    }

    impl Statement for CaptureStatement {
        fn bind_value(
            &mut self,
            key: &BindKey,
            _value: &BindValue,
            bind_type: BindType,
        ) -> DriverResult<()> {
            if self.reject.as_ref() == Some(key) {
                return Err(DriverError::StatementClosed);
            }
            self.binds.push((key.clone(), bind_type));
            Ok(())
        }

        fn bind_output(&mut self, _slot: &OutputSlot) -> DriverResult<()> {
            panic!("bind_all must not touch output slots");
        }

        fn execute(&mut self) -> DriverResult<u64> {
            Ok(0)
        }

        fn read_output(&mut self, _slot: &mut OutputSlot) -> DriverResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_infer_each_kind() {
        assert_eq!(infer_type(&BindValue::Integer(42)), BindType::Integer);
        assert_eq!(infer_type(&BindValue::Boolean(true)), BindType::Boolean);
        assert_eq!(infer_type(&BindValue::Null), BindType::Null);
        assert_eq!(
            infer_type(&BindValue::Bytes(Bytes::from_static(b"\x00\x01"))),
            BindType::LargeObject
        );
        assert_eq!(infer_type(&BindValue::from("Alice")), BindType::String);
        assert_eq!(infer_type(&BindValue::Float(1.5)), BindType::String);
    }

    #[test]
    fn test_integer_wins_over_boolean() {
        assert!(BindValue::Integer(1).is_boolean_like());
        assert_eq!(infer_type(&BindValue::Integer(1)), BindType::Integer);
        assert_eq!(infer_type(&BindValue::Integer(0)), BindType::Integer);
    }

    #[test]
    fn test_null_always_null() {
        assert_eq!(infer_type(&BindValue::from(None::<bool>)), BindType::Null);
        assert_eq!(infer_type(&BindValue::from(None::<Vec<u8>>)), BindType::Null);
    }

    #[test]
    fn test_infer_is_deterministic() {
        let values = [
            BindValue::Integer(1),
            BindValue::Boolean(false),
            BindValue::Null,
            BindValue::from("x"),
        ];
        for value in &values {
            assert_eq!(infer_type(value), infer_type(value));
        }
    }

    #[test]
    fn test_bind_all_empty_is_noop() {
        let mut stmt = CaptureStatement::default();
        bind_all(&mut stmt, &Bindings::new()).unwrap();
        assert!(stmt.binds.is_empty());
    }

    #[test]
    fn test_bind_all_named_and_positional() {
        let mut stmt = CaptureStatement::default();
        let bindings = Bindings::new()
            .with(1usize, "Alice")
            .with("active", true)
            .with(3usize, None::<i64>);
        bind_all(&mut stmt, &bindings).unwrap();
        assert_eq!(
            stmt.binds,
            vec![
                (BindKey::Position(1), BindType::String),
                (BindKey::Name("active".into()), BindType::Boolean),
                (BindKey::Position(3), BindType::Null),
            ]
        );
    }

    #[test]
    fn test_bind_all_stops_at_rejected_key() {
        let mut stmt = CaptureStatement {
            reject: Some(BindKey::Position(2)),
            ..Default::default()
        };
        let err = bind_all(&mut stmt, &Bindings::positional([10, 20, 30])).unwrap_err();
        match err {
            Error::Bind { key, .. } => assert_eq!(key, BindKey::Position(2)),
            other => panic!("Expected Bind error, got {:?}", other),
        }
        assert_eq!(stmt.binds.len(), 1);
    }

    #[test]
    fn test_prepare_bindings() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 1)
            .unwrap();
        let prepared = prepare_bindings(
            Bindings::positional([
                BindValue::from(dt),
                BindValue::from(true),
                BindValue::from(false),
                BindValue::from("keep"),
            ]),
            "%Y-%m-%d %H:%M:%S",
        );
        let values: Vec<_> = prepared.into_iter().map(|(_, v)| v).collect();
        assert_eq!(
            values,
            vec![
                BindValue::String("2023-12-31 23:59:01".into()),
                BindValue::Integer(1),
                BindValue::Integer(0),
                BindValue::String("keep".into()),
            ]
        );
    }
}
