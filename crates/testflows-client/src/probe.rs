//! Session-start probe.
//!
//! Each time the session becomes configured with a new (endpoint, id)
//! pair, the webhook gets one request carrying the init sentinel so it can
//! tell a new session apart from real user input. The probe's outcome is
//! never shown to the user.

use std::sync::Arc;

use testflows_common::SessionId;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::SessionSnapshot;
use crate::transport::WebhookTransport;

/// Send the init sentinel once, discarding any failure.
pub async fn send_init_probe(
    transport: &dyn WebhookTransport,
    endpoint: &str,
    session_id: &SessionId,
    sentinel: &str,
) {
    match transport.post_message(endpoint, session_id, sentinel).await {
        Ok(_) => debug!(session = %session_id, "Init probe delivered"),
        Err(e) => debug!(session = %session_id, error = %e, "Init probe failed, ignoring"),
    }
}

/// Watches session snapshots and fires the probe for each new ready one.
pub struct ProbeReactor {
    transport: Arc<dyn WebhookTransport>,
    sentinel: String,
    rx: watch::Receiver<SessionSnapshot>,
    last_fired: Option<(String, SessionId)>,
}

impl ProbeReactor {
    pub fn new(
        transport: Arc<dyn WebhookTransport>,
        sentinel: impl Into<String>,
        rx: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self {
            transport,
            sentinel: sentinel.into(),
            rx,
            last_fired: None,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// React to the current snapshot, then to every change until the
    /// session manager is dropped.
    pub async fn run(mut self) {
        loop {
            let snapshot = self.rx.borrow_and_update().clone();
            if let Some(probe) = self.react(snapshot) {
                tokio::spawn(probe);
            }
            if self.rx.changed().await.is_err() {
                debug!("Session closed, probe reactor stopping");
                break;
            }
        }
    }

    /// The probe to fire for `snapshot`, if any. Each (endpoint, id) pair
    /// is probed at most once.
    fn react(
        &mut self,
        snapshot: SessionSnapshot,
    ) -> Option<impl std::future::Future<Output = ()> + Send + 'static> {
        if !snapshot.is_ready() {
            return None;
        }
        let key = (snapshot.endpoint.clone(), snapshot.session_id.clone());
        if self.last_fired.as_ref() == Some(&key) {
            return None;
        }
        self.last_fired = Some(key);

        let transport = Arc::clone(&self.transport);
        let sentinel = self.sentinel.clone();
        Some(async move {
            send_init_probe(
                transport.as_ref(),
                &snapshot.endpoint,
                &snapshot.session_id,
                &sentinel,
            )
            .await;
        })
    }
}
