//! HTTP client integration tests
//!
//! Each test stands up a one-shot TCP listener that plays the remote post
//! service, captures the raw request and answers with a canned response.

use libpostfeed::client::http::HttpPostClient;
use libpostfeed::client::PostClient;
use libpostfeed::config::ServiceConfig;
use libpostfeed::{Draft, PostfeedError, ServiceError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one request, returning (base_url, handle yielding the raw request)
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}", addr), handle)
}

/// Read headers and, if announced, the body of one HTTP request
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    lower
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn client_for(base_url: &str) -> HttpPostClient {
    HttpPostClient::new(&ServiceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_list_posts_sends_limit_and_decodes() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"[{"userId":1,"id":1,"title":"A","body":"X"},{"userId":1,"id":2,"title":"B","body":"Y"}]"#,
    )
    .await;

    let posts = client_for(&base_url).list_posts(10).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /posts?_limit=10 HTTP/1.1"));
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "A");
    assert_eq!(posts[1].body, "Y");
}

#[tokio::test]
async fn test_create_post_sends_json_body() {
    let (base_url, server) = serve_once(
        "201 Created",
        r#"{"id":101,"title":"Hi","body":"Bye"}"#,
    )
    .await;

    let post = client_for(&base_url)
        .create_post(&Draft::new("Hi", "Bye"))
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /posts HTTP/1.1"));
    assert!(request
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"title":"Hi","body":"Bye"}"#));

    assert_eq!(post.id, 101);
    assert_eq!(post.title, "Hi");
    assert_eq!(post.body, "Bye");
}

#[tokio::test]
async fn test_create_post_sends_empty_fields_unvalidated() {
    let (base_url, server) = serve_once("201 Created", r#"{"id":101,"title":"","body":""}"#).await;

    let post = client_for(&base_url)
        .create_post(&Draft::default())
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert!(request.ends_with(r#"{"title":"","body":""}"#));
    assert_eq!(post.id, 101);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let err = client_for(&base_url).list_posts(10).await.unwrap_err();
    server.await.unwrap();

    match err {
        PostfeedError::Service(ServiceError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("boom"));
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"not":"a list"}"#).await;

    let err = client_for(&base_url).list_posts(10).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(
        err,
        PostfeedError::Service(ServiceError::Decode(_))
    ));
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(&format!("http://{}", addr))
        .list_posts(10)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PostfeedError::Service(ServiceError::Network(_))
    ));
    assert_eq!(err.exit_code(), 1);
}
