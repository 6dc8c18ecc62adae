//! Transport behaviour against a one-shot local HTTP server.

use std::time::Duration;

use rstest::rstest;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::*;
use crate::domain::ports::CookieJar;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Serve one canned response and hand back the raw request head.
async fn serve_once(response: &'static str) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut received = Vec::new();
        let mut buf = [0_u8; 1024];
        while !received.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.expect("read");
            if read == 0 {
                break;
            }
            received.extend_from_slice(&buf[..read]);
        }
        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&received).into_owned()
    });
    let root = Url::parse(&format!("http://{addr}/api/v1")).expect("root url");
    (root, handle)
}

#[rstest]
#[case("http://localhost:6543/api/v1", "/nominees", "http://localhost:6543/api/v1/nominees")]
#[case("http://localhost:6543/api/v1/", "/feedback/alice/", "http://localhost:6543/api/v1/feedback/alice/")]
#[case(
    "http://localhost:6543/api/v1",
    "/generate-population.csv?businessUnit=Tech+%26+Ops",
    "http://localhost:6543/api/v1/generate-population.csv?businessUnit=Tech+%26+Ops"
)]
fn paths_hang_off_the_api_root(#[case] root: &str, #[case] path: &str, #[case] expected: &str) {
    let root = Url::parse(root).expect("root url");
    assert_eq!(endpoint(&root, path).expect("endpoint").as_str(), expected);
}

#[tokio::test]
async fn reports_status_reason_and_sends_cookies() {
    let (root, server) = serve_once(
        "HTTP/1.1 401 Unauthorized\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
    )
    .await;
    let transport = ReqwestTransport::new(root, TIMEOUT).expect("client builds");
    transport.cookie_jar().write("session=abc");

    let response = transport
        .send(ApiRequest::get("/user-data"))
        .await
        .expect("response arrives");

    assert_eq!(response.status, 401);
    assert_eq!(response.reason, "Unauthorized");
    assert_eq!(response.body, b"{}");
    let head = server.await.expect("server finishes").to_ascii_lowercase();
    assert!(head.starts_with("get /api/v1/user-data http/1.1"));
    assert!(head.contains("cookie: session=abc"));
}

#[tokio::test]
async fn backend_cookies_become_visible_to_the_jar() {
    let (root, server) = serve_once(
        "HTTP/1.1 200 OK\r\nset-cookie: session=xyz; Path=/\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    )
    .await;
    let transport = ReqwestTransport::new(root, TIMEOUT).expect("client builds");

    let response = transport
        .send(ApiRequest::post("/logout", RequestBody::Empty))
        .await
        .expect("response arrives");

    assert!(response.is_success());
    assert_eq!(transport.cookie_jar().cookie_header(), "session=xyz");
    server.await.expect("server finishes");
}

#[tokio::test]
async fn silent_backends_time_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.expect("accept");
        tokio::time::sleep(Duration::from_secs(5)).await;
    });
    let root = Url::parse(&format!("http://{addr}/api/v1")).expect("root url");
    let transport = ReqwestTransport::new(root, Duration::from_millis(100)).expect("client builds");

    let error = transport
        .send(ApiRequest::get("/metadata"))
        .await
        .expect_err("request times out");

    assert!(matches!(error, TransportError::Timeout { .. }));
    server.abort();
}

#[tokio::test]
async fn refused_connections_are_connection_errors() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let root = Url::parse(&format!("http://{addr}/api/v1")).expect("root url");
    let transport = ReqwestTransport::new(root, TIMEOUT).expect("client builds");

    let error = transport
        .send(ApiRequest::get("/metadata"))
        .await
        .expect_err("nothing listens");

    assert!(matches!(error, TransportError::Connection { .. }));
}
