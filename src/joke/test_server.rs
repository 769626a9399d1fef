//! Minimal HTTP server serving canned responses, for tests.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// Serve `responses` in order, one per accepted connection
pub async fn serve(responses: Vec<String>) -> Url {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();

  tokio::spawn(async move {
    for response in responses {
      let (mut socket, _) = listener.accept().await.unwrap();
      let mut request = Vec::new();
      let mut buf = [0u8; 1024];
      while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
          Ok(0) | Err(_) => break,
          Ok(n) => request.extend_from_slice(&buf[..n]),
        }
      }
      let _ = socket.write_all(response.as_bytes()).await;
      let _ = socket.shutdown().await;
    }
  });

  Url::parse(&format!("http://{}/random_joke", addr)).unwrap()
}

pub fn http_response(status: &str, body: &str) -> String {
  format!(
    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
    status,
    body.len(),
    body
  )
}

/// A 200 response carrying joke `id`
pub fn joke_response(id: i64) -> String {
  http_response(
    "200 OK",
    &format!(
      r#"{{"type":"general","setup":"setup {}","punchline":"punchline {}","id":{}}}"#,
      id, id, id
    ),
  )
}
