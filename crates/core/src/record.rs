//! Record serialization: data rows to ordered JSON mappings.
//!
//! A "record" is the plain-mapping form of a data-model row. Conversion
//! rules are uniform across the codebase:
//!
//! - date-times render as `YYYY-MM-DD HH:MM:SS`,
//! - fixed-point decimals round to 2 fractional digits and render as a
//!   string (`3.1` becomes `"3.10"`),
//! - nested records convert recursively,
//! - everything else passes through as its natural JSON value.
//!
//! Key order in the produced map equals field-emission order (serde_json
//! is built with `preserve_order`).

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use uuid::Uuid;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A field value after the uniform conversion rules have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue(Value);

impl FieldValue {
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_owned()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self(Value::Bool(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self(Value::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self(Value::String(value.format(DATETIME_FORMAT).to_string()))
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self(Value::String(value.format(DATETIME_FORMAT).to_string()))
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        // Quantize to 2 dp (half-even, like the decimal type's default),
        // then render with exactly 2 fractional digits.
        Self(Value::String(format!("{:.2}", value.round_dp(2))))
    }
}

impl<T> From<Option<T>> for FieldValue
where
    FieldValue: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => FieldValue::from(inner),
            None => Self(Value::Null),
        }
    }
}

/// Ordered builder for a record's fields.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one field. Insertion order is preserved in the output.
    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields
            .insert(name.to_owned(), value.into().into_value());
        self
    }

    pub fn finish(self) -> Map<String, Value> {
        self.fields
    }
}

/// Conversion of a data-model row to its plain-mapping form.
///
/// Implementors emit their real fields through [`Record`]; nested rows are
/// emitted with `child.to_record()` and convert recursively.
pub trait ToRecord {
    fn to_record(&self) -> Map<String, Value>;
}

/// Serialize a record to JSON text, non-ASCII preserved literally.
pub fn to_json(row: &impl ToRecord) -> String {
    Value::Object(row.to_record()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Account {
        id: i64,
        name: String,
        balance: Decimal,
        opened_at: NaiveDateTime,
        closed_at: Option<NaiveDateTime>,
        owner: Owner,
    }

    struct Owner {
        name: String,
        vip: bool,
    }

    impl ToRecord for Owner {
        fn to_record(&self) -> Map<String, Value> {
            Record::new()
                .field("name", self.name.as_str())
                .field("vip", self.vip)
                .finish()
        }
    }

    impl ToRecord for Account {
        fn to_record(&self) -> Map<String, Value> {
            Record::new()
                .field("id", self.id)
                .field("name", self.name.as_str())
                .field("balance", self.balance)
                .field("opened_at", self.opened_at)
                .field("closed_at", self.closed_at)
                .field("owner", self.owner.to_record())
                .finish()
        }
    }

    fn sample() -> Account {
        Account {
            id: 7,
            name: "储蓄".to_owned(),
            balance: Decimal::new(31, 1), // 3.1
            opened_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            closed_at: None,
            owner: Owner {
                name: "ada".to_owned(),
                vip: true,
            },
        }
    }

    #[test]
    fn datetime_formats_without_sub_second_noise() {
        let rec = sample().to_record();
        assert_eq!(rec["opened_at"], Value::String("2024-01-01 00:00:00".into()));
    }

    #[test]
    fn decimal_renders_with_two_fraction_digits() {
        let rec = sample().to_record();
        assert_eq!(rec["balance"], Value::String("3.10".into()));

        let rounded = Record::new()
            .field("v", Decimal::new(31415, 4)) // 3.1415
            .finish();
        assert_eq!(rounded["v"], Value::String("3.14".into()));
    }

    #[test]
    fn none_becomes_json_null() {
        let rec = sample().to_record();
        assert_eq!(rec["closed_at"], Value::Null);
    }

    #[test]
    fn nested_record_converts_recursively() {
        let rec = sample().to_record();
        assert_eq!(rec["owner"]["name"], Value::String("ada".into()));
        assert_eq!(rec["owner"]["vip"], Value::Bool(true));
    }

    #[test]
    fn key_order_matches_emission_order() {
        let rec = sample().to_record();
        let keys: Vec<&str> = rec.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["id", "name", "balance", "opened_at", "closed_at", "owner"]
        );
    }

    #[test]
    fn to_json_keeps_non_ascii_literal() {
        let text = to_json(&sample());
        assert!(text.contains("储蓄"));
        assert!(!text.contains("\\u"));
    }
}
