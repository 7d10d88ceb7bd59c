//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use soundcloud_proxy::config::ProxyConfig;
use soundcloud_proxy::http::HttpServer;
use soundcloud_proxy::lifecycle::Shutdown;

/// What the mock upstream saw.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request target, e.g. `/search/tracks?q=test&limit=10&client_id=X`.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First value of a query parameter, form-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.target.split_once('?').map(|(_, q)| q).unwrap_or("");
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `respond` gets the request target and returns `(status, body)`; every
/// request is also sent on the returned channel.
pub async fn start_upstream<F, Fut>(respond: F) -> (SocketAddr, mpsc::UnboundedReceiver<RecordedRequest>)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        loop {
            let (socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let respond = respond.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let (read_half, mut write_half) = socket.into_split();
                let mut reader = BufReader::new(read_half);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).await.is_err() {
                    return;
                }
                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();

                let mut headers = Vec::new();
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) => {}
                    }
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        headers.push((name.trim().to_lowercase(), value.trim().to_string()));
                    }
                }

                let _ = tx.send(RecordedRequest {
                    target: target.clone(),
                    headers,
                });

                let (status, body) = respond(target).await;
                let response = format!(
                    "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = write_half.write_all(response.as_bytes()).await;
                let _ = write_half.shutdown().await;
            });
        }
    });

    (addr, rx)
}

/// Start a mock upstream that always answers the same thing.
#[allow(dead_code)]
pub async fn start_fixed_upstream(
    status: u16,
    body: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<RecordedRequest>) {
    start_upstream(move |_| async move { (status, body.to_string()) }).await
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Proxy config pointed at `upstream`, with no fallback credential.
pub fn test_config(upstream: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.soundcloud.api_base_url = format!("http://{}", upstream);
    config.soundcloud.use_env_proxy = false;
    config.soundcloud.client_id = None;
    config
}

/// Start the proxy on an ephemeral port. Keep the `Shutdown` alive for
/// the duration of the test.
pub async fn start_proxy(config: ProxyConfig) -> (String, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.signal();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (format!("http://{}", addr), shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
