//! Helpers shared by tests that talk to the outbound HTTP clients.

use axum::Router;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL. The
/// server lives as long as the test runtime.
pub async fn serve_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
