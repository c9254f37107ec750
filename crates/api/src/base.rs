//! Routing defaults: GET-as-POST delegation and the forbidden-by-default
//! route.

use axum::handler::Handler;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{self, MethodRouter};

use plinth_core::Envelope;

use crate::respond::JsonBody;

/// 403 with the fixed forbidden envelope. The default behavior of any
/// route a service has not taken over.
pub async fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, JsonBody(Envelope::forbidden())).into_response()
}

/// Register one handler for both GET and POST: GET requests behave as
/// POST.
pub fn get_as_post<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: Handler<T, S> + Clone,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    routing::post(handler.clone()).get(handler)
}

/// Abstract-by-default route: both methods answer the forbidden
/// envelope until a service supplies a real handler.
pub fn forbidden_route<S>() -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get_as_post(forbidden)
}
