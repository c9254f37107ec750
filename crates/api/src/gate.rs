//! Authentication gate middleware.
//!
//! Wraps gated routes: looks the current user up through the configured
//! [`Authenticator`], answers 401/403 envelopes itself, and otherwise
//! hands the request on with the user stored in request extensions.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::error;

use plinth_auth::{AuthError, AuthOutcome, Authenticator};
use plinth_core::Envelope;

use crate::respond::JsonBody;

/// Cookie consulted when no bearer token is present.
pub const SESSION_COOKIE: &str = "session";

/// Request extension holding the authenticated user for downstream
/// handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser<U>(pub U);

/// Middleware state: the authenticator shared across requests.
pub struct GateState<A> {
    authenticator: Arc<A>,
}

impl<A> GateState<A> {
    pub fn new(authenticator: A) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
        }
    }
}

impl<A> Clone for GateState<A> {
    fn clone(&self) -> Self {
        Self {
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

/// Lookup failure escaping the gate. This is the framework error path,
/// not an authentication failure.
#[derive(Debug)]
pub struct GateError(pub AuthError);

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "current-user lookup failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            JsonBody(Envelope::fail(500, "internal server error")),
        )
            .into_response()
    }
}

/// The gate itself.
///
/// - no valid session → 401 with the session-expired envelope, inner
///   handler never runs;
/// - denied → 403 with the forbidden envelope, inner handler never runs;
/// - authenticated → [`CurrentUser`] inserted, request passed through
///   unchanged;
/// - lookup error → [`GateError`] (nothing is caught here).
pub async fn gate<A: Authenticator>(
    State(state): State<GateState<A>>,
    mut req: Request,
    next: Next,
) -> Result<Response, GateError> {
    let credential = extract_credential(req.headers());

    let outcome = state
        .authenticator
        .authenticate(credential.as_deref())
        .await
        .map_err(GateError)?;

    Ok(match outcome {
        AuthOutcome::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            JsonBody(Envelope::session_expired()),
        )
            .into_response(),
        AuthOutcome::Denied => {
            (StatusCode::FORBIDDEN, JsonBody(Envelope::forbidden())).into_response()
        }
        AuthOutcome::Authenticated(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
    })
}

/// Bearer token first, session cookie second.
fn extract_credential(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_owned());
                }
            }
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::try_from(*name).expect("header name"),
                HeaderValue::from_str(value).expect("header value"),
            );
        }
        map
    }

    #[test]
    fn bearer_token_wins_over_cookie() {
        let map = headers(&[
            ("authorization", "Bearer tok-1"),
            ("cookie", "session=tok-2"),
        ]);
        assert_eq!(extract_credential(&map).as_deref(), Some("tok-1"));
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let map = headers(&[("cookie", "theme=dark; session=sid-9; lang=en")]);
        assert_eq!(extract_credential(&map).as_deref(), Some("sid-9"));
    }

    #[test]
    fn empty_or_missing_credentials_yield_none() {
        assert_eq!(extract_credential(&HeaderMap::new()), None);
        assert_eq!(
            extract_credential(&headers(&[("authorization", "Bearer   ")])),
            None
        );
        assert_eq!(
            extract_credential(&headers(&[("cookie", "session=")])),
            None
        );
        assert_eq!(
            extract_credential(&headers(&[("authorization", "Basic abc")])),
            None
        );
    }
}
