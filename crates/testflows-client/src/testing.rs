//! Test doubles shared by the unit tests of this crate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use testflows_common::{ChatEvent, SessionId};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::transport::{ExchangeError, WebhookTransport};

type Responder = Box<dyn Fn(&str) -> Result<serde_json::Value, ExchangeError> + Send + Sync>;

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub endpoint: String,
    pub session_id: SessionId,
    pub message: String,
    /// Value of the observed waiting flag when the request went out.
    pub waiting: Option<bool>,
    /// Chat events published before the request went out.
    pub events_seen: Vec<ChatEvent>,
}

/// In-process transport that records calls and answers via a closure.
pub(crate) struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responder: Responder,
    hang: bool,
    waiting: OnceLock<Arc<AtomicBool>>,
    events: Mutex<Option<broadcast::Receiver<ChatEvent>>>,
}

impl MockTransport {
    pub fn with_responder(
        responder: impl Fn(&str) -> Result<serde_json::Value, ExchangeError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            hang: false,
            waiting: OnceLock::new(),
            events: Mutex::new(None),
        }
    }

    /// Answers every request with `body`.
    pub fn replying(body: serde_json::Value) -> Self {
        Self::with_responder(move |_| Ok(body.clone()))
    }

    /// Fails every request with an HTTP 500.
    pub fn failing() -> Self {
        Self::with_responder(|_| {
            Err(ExchangeError::Status {
                status: 500,
                body: "internal error".into(),
            })
        })
    }

    /// Never answers.
    pub fn hanging() -> Self {
        let mut transport = Self::replying(serde_json::Value::Null);
        transport.hang = true;
        transport
    }

    pub fn observe_waiting(&self, flag: Arc<AtomicBool>) {
        let _ = self.waiting.set(flag);
    }

    pub fn observe_events(&self, rx: broadcast::Receiver<ChatEvent>) {
        *self.events.lock().unwrap() = Some(rx);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until at least `n` requests were recorded.
    pub async fn wait_for_calls(&self, n: usize) -> Vec<RecordedCall> {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if self.calls.lock().unwrap().len() >= n {
                    return self.calls();
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for webhook calls")
    }

    fn drain_events(&self) -> Vec<ChatEvent> {
        let mut seen = Vec::new();
        if let Some(rx) = self.events.lock().unwrap().as_mut() {
            while let Ok(event) = rx.try_recv() {
                seen.push(event);
            }
        }
        seen
    }
}

#[async_trait]
impl WebhookTransport for MockTransport {
    async fn post_message(
        &self,
        endpoint: &str,
        session_id: &SessionId,
        message: &str,
    ) -> Result<serde_json::Value, ExchangeError> {
        let call = RecordedCall {
            endpoint: endpoint.to_string(),
            session_id: session_id.clone(),
            message: message.to_string(),
            waiting: self.waiting.get().map(|flag| flag.load(Ordering::Acquire)),
            events_seen: self.drain_events(),
        };
        self.calls.lock().unwrap().push(call);

        if self.hang {
            std::future::pending::<()>().await;
        }
        (self.responder)(message)
    }
}

/// Minimal HTTP/1.1 server answering every request with a fixed response.
pub(crate) struct WebhookStub {
    addr: std::net::SocketAddr,
    requests: tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>,
    shutdown: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

impl WebhookStub {
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = body.to_string();
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accept = listener.accept() => {
                        if let Ok((mut socket, _)) = accept {
                            let body = body.clone();
                            let request_tx = request_tx.clone();
                            tokio::spawn(async move {
                                let request = read_request(&mut socket).await;
                                let _ = request_tx.send(request);

                                let reason = if status == 200 { "OK" } else { "Stub" };
                                let response = format!(
                                    "HTTP/1.1 {status} {reason}\r\n\
                                     Content-Type: application/json\r\n\
                                     Content-Length: {}\r\n\
                                     Connection: close\r\n\
                                     \r\n\
                                     {}",
                                    body.len(),
                                    body
                                );
                                let _ = socket.write_all(response.as_bytes()).await;
                            });
                        }
                    }
                }
            }
        });

        Self {
            addr,
            requests: tokio::sync::Mutex::new(request_rx),
            shutdown: shutdown_tx,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/webhook/test", self.addr)
    }

    /// Raw text of the next request received, headers and body.
    pub async fn next_request(&self) -> String {
        let mut requests = self.requests.lock().await;
        tokio::time::timeout(Duration::from_secs(5), requests.recv())
            .await
            .expect("timed out waiting for request")
            .expect("stub closed")
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

/// URL of a local port nothing listens on.
pub(crate) async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/webhook")
}
