//! Fixed response envelope.
//!
//! Every standardized API response carries the same four fields, in the
//! same order: `code`, `status`, `message`, `data`. Serialization keeps
//! non-ASCII characters literal (serde_json never escapes them).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coarse outcome marker carried alongside the numeric code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Fail,
}

/// Standard response envelope.
///
/// Field declaration order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: u16,
    pub status: Status,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    /// Success envelope: code 200, status OK.
    pub fn ok(data: impl Into<Value>) -> Self {
        Self {
            code: 200,
            status: Status::Ok,
            message: String::new(),
            data: data.into(),
        }
    }

    /// Failure envelope with empty-string data.
    pub fn fail(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            status: Status::Fail,
            message: message.into(),
            data: Value::String(String::new()),
        }
    }

    /// Canonical 401 body emitted when no valid session is present.
    pub fn session_expired() -> Self {
        Self::fail(401, "session expired, please log in again")
    }

    /// Canonical 403 body.
    pub fn forbidden() -> Self {
        Self::fail(403, "Forbidden")
    }

    /// The envelope as an ordered JSON object.
    pub fn to_value(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("code".to_owned(), Value::from(self.code));
        fields.insert(
            "status".to_owned(),
            Value::String(
                match self.status {
                    Status::Ok => "OK",
                    Status::Fail => "FAIL",
                }
                .to_owned(),
            ),
        );
        fields.insert("message".to_owned(), Value::String(self.message.clone()));
        fields.insert("data".to_owned(), self.data.clone());
        Value::Object(fields)
    }

    /// Compact JSON text, non-ASCII preserved literally.
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_envelope_has_fixed_shape_and_order() {
        let body = Envelope::forbidden().to_json_string();
        assert_eq!(
            body,
            r#"{"code":403,"status":"FAIL","message":"Forbidden","data":""}"#
        );
    }

    #[test]
    fn session_expired_envelope_matches_contract() {
        let body = Envelope::session_expired().to_json_string();
        assert_eq!(
            body,
            r#"{"code":401,"status":"FAIL","message":"session expired, please log in again","data":""}"#
        );
    }

    #[test]
    fn non_ascii_is_preserved_literally() {
        let env = Envelope::ok(Value::String("日本語".to_owned()));
        let body = env.to_json_string();
        assert!(body.contains("日本語"));
        assert!(!body.contains("\\u"));
    }

    #[test]
    fn envelope_round_trips_through_serde() {
        let env = Envelope::fail(403, "Forbidden");
        let text = serde_json::to_string(&env).expect("serialize");
        let back: Envelope = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, env);
        // Derived serialization matches the hand-built ordered value.
        assert_eq!(text, env.to_json_string());
    }
}
