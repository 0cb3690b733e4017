//! Loopback HTTP stub for exercising the API client without the network.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub(crate) struct StubResponse {
    status: u16,
    body: &'static str,
    retry_after: Option<&'static str>,
}

impl StubResponse {
    pub(crate) fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            retry_after: None,
        }
    }

    pub(crate) fn rate_limited(retry_after: &'static str) -> Self {
        Self {
            status: 429,
            body: "",
            retry_after: Some(retry_after),
        }
    }
}

/// Minimal HTTP/1.1 server on an ephemeral loopback port. Answers one
/// request per connection and records the path of every request seen.
/// The router gets the request path and the zero-based hit index.
pub(crate) struct StubServer {
    pub(crate) base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub(crate) async fn start<R>(router: R) -> Self
    where
        R: Fn(&str, usize) -> StubResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            let mut hits = 0;
            while let Ok((mut socket, _)) = listener.accept().await {
                let path = read_request(&mut socket).await;
                recorded.lock().unwrap().push(path.clone());
                let response = router(&path, hits);
                hits += 1;
                write_response(&mut socket, &response).await;
            }
        });

        Self { base_url, requests }
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Read a full request (headers plus declared body) and return its path.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            break;
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(header_end) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]);
            let content_length = headers
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string()
}

async fn write_response(socket: &mut TcpStream, response: &StubResponse) {
    let reason = match response.status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    };
    let mut payload = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
        response.status,
        reason,
        response.body.len()
    );
    if let Some(retry_after) = response.retry_after {
        payload.push_str(&format!("retry-after: {}\r\n", retry_after));
    }
    payload.push_str("\r\n");
    payload.push_str(response.body);

    let _ = socket.write_all(payload.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
