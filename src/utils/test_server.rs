use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral loopback port. The listener is bound before
/// returning, so requests can be sent right away.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub const REFUSED_URL: &str = "http://127.0.0.1:1/";

/// Serves one response that promises `Content-Length: 100`, sends `partial`
/// and then hangs up.
pub async fn serve_truncated(partial: &'static [u8]) -> SocketAddr {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf).await.unwrap();
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n")
            .await
            .unwrap();
        stream.write_all(partial).await.unwrap();
        stream.shutdown().await.unwrap();
    });
    addr
}
