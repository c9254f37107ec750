use plinth_auth::{MemorySessionStore, SessionAuthenticator};

#[tokio::main]
async fn main() {
    plinth_observability::init();

    let addr = std::env::var("PLINTH_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let authenticator = SessionAuthenticator::new(MemorySessionStore::new());
    let app = plinth_api::app::build_app(authenticator);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
