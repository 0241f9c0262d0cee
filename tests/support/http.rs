//! Minimal HTTP/1.1 stub for exercising the real Polymarket client.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One canned reply.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: "{}".to_string(),
        }
    }
}

/// A route matched on the request line prefix, e.g. `GET /events`.
///
/// Replies are served in order; the last one repeats forever.
struct Route {
    prefix: &'static str,
    replies: VecDeque<Reply>,
}

/// Request line and body of a received request.
#[derive(Clone, Debug)]
pub struct Received {
    pub line: String,
    pub body: String,
}

pub struct StubServer {
    pub base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl StubServer {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.received
            .lock()
            .iter()
            .filter(|r| r.line.starts_with(prefix))
            .count()
    }
}

pub async fn serve(routes: Vec<(&'static str, Vec<Reply>)>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(Mutex::new(
        routes
            .into_iter()
            .map(|(prefix, replies)| Route {
                prefix,
                replies: replies.into(),
            })
            .collect::<Vec<_>>(),
    ));
    let received = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&received);
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            tokio::spawn(async move {
                let _ = handle(socket, routes, log).await;
            });
        }
    });

    StubServer {
        base_url: format!("http://{addr}"),
        received,
    }
}

async fn handle(
    mut socket: TcpStream,
    routes: Arc<Mutex<Vec<Route>>>,
    log: Arc<Mutex<Vec<Received>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let line = head.lines().next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    log.lock().push(Received {
        line: line.clone(),
        body,
    });

    let reply = {
        let mut routes = routes.lock();
        routes
            .iter_mut()
            .find(|route| line.starts_with(route.prefix))
            .and_then(|route| {
                if route.replies.len() > 1 {
                    route.replies.pop_front()
                } else {
                    route.replies.front().cloned()
                }
            })
            .unwrap_or_else(|| Reply::status(404))
    };

    let response = format!(
        "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
