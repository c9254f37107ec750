//! Response writers with exact content-type headers.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use plinth_core::Envelope;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// JSON response body. Serialization keeps non-ASCII literal; the
/// content type is exactly `application/json; charset=UTF-8`.
pub struct JsonBody<T>(pub T);

impl<T: Serialize> IntoResponse for JsonBody<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
            Err(err) => {
                error!(error = %err, "failed to serialize JSON response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Pre-serialized JSON emitted verbatim (the caller already holds text).
pub struct RawJson(pub String);

impl IntoResponse for RawJson {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], self.0).into_response()
    }
}

/// XML response body, emitted verbatim with content type
/// `text/xml; charset=UTF-8`.
pub struct XmlBody(pub String);

impl IntoResponse for XmlBody {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], self.0).into_response()
    }
}

/// Envelope response whose HTTP status mirrors the envelope's `code`.
pub fn envelope_response(envelope: Envelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, JsonBody(envelope)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn content_type(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .expect("content type")
    }

    #[tokio::test]
    async fn json_body_serializes_with_exact_content_type() {
        let response = JsonBody(Envelope::forbidden()).into_response();
        assert_eq!(content_type(&response), JSON_CONTENT_TYPE);
        assert_eq!(
            body_text(response).await,
            Envelope::forbidden().to_json_string()
        );
    }

    #[tokio::test]
    async fn raw_json_passes_text_through_unchanged() {
        let response = RawJson(r#"{"a":"日本語"}"#.to_owned()).into_response();
        assert_eq!(content_type(&response), JSON_CONTENT_TYPE);
        assert_eq!(body_text(response).await, r#"{"a":"日本語"}"#);
    }

    #[tokio::test]
    async fn xml_body_is_verbatim_with_xml_content_type() {
        let response = XmlBody("<pong/>".to_owned()).into_response();
        assert_eq!(content_type(&response), XML_CONTENT_TYPE);
        assert_eq!(body_text(response).await, "<pong/>");
    }

    #[tokio::test]
    async fn envelope_response_status_follows_its_code() {
        let response = envelope_response(Envelope::session_expired());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = envelope_response(Envelope::fail(9999, "bad code"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
