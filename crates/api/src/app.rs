//! Demo application wiring (the router used by `main.rs` and the
//! black-box tests).

use axum::Router;
use axum::body::Bytes;
use axum::extract::Extension;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::Value;

use plinth_auth::{MemorySessionStore, SessionAuthenticator, SessionUser};
use plinth_core::{Envelope, ToRecord};

use crate::base;
use crate::body::{json_arguments, xml_arguments};
use crate::gate::{self, CurrentUser, GateState};
use crate::respond::{JsonBody, XmlBody, envelope_response};

pub type DemoAuthenticator = SessionAuthenticator<MemorySessionStore>;

/// Build the demo router: one gated area, open XML endpoints, and the
/// forbidden-by-default fallback.
pub fn build_app(authenticator: DemoAuthenticator) -> Router {
    let state = GateState::new(authenticator);

    let gated = Router::new()
        .route("/whoami", base::get_as_post(whoami))
        .route("/echo", post(echo))
        .layer(axum::middleware::from_fn_with_state(
            state,
            gate::gate::<DemoAuthenticator>,
        ));

    Router::new()
        .route("/ping.xml", get(ping_xml))
        .route("/echo.xml", post(echo_xml))
        .route("/legacy", base::forbidden_route())
        .merge(gated)
        .fallback(base::forbidden)
}

async fn whoami(Extension(user): Extension<CurrentUser<SessionUser>>) -> Response {
    JsonBody(Envelope::ok(Value::Object(user.0.to_record()))).into_response()
}

async fn echo(body: Bytes) -> Response {
    let args = json_arguments(&body);
    JsonBody(Envelope::ok(Value::Object(args.into_inner()))).into_response()
}

async fn ping_xml() -> Response {
    XmlBody("<pong/>".to_owned()).into_response()
}

async fn echo_xml(body: Bytes) -> Response {
    match xml_arguments(&body) {
        Some(root) => XmlBody(format!("<ack root=\"{}\"/>", root.tag)).into_response(),
        None => envelope_response(Envelope::fail(400, "malformed XML body")),
    }
}
