use futures::future::join_all;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::trace;

use super::controller::SessionCommand;
use super::types::SessionId;

/// Address of one open session held by the registry.
#[derive(Debug, Clone)]
pub(crate) struct SessionLink {
    pub(crate) id: SessionId,
    pub(crate) sender: mpsc::UnboundedSender<SessionCommand>,
}

/// Process-wide registry of open playback sessions. Sessions register on
/// open and unregister on close; a play request queries it (never mutating)
/// to pause every sibling first, which keeps at most one session playing
/// across the application.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, SessionLink>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry used when the host does not supply its own.
    pub fn global() -> Arc<SessionRegistry> {
        static REGISTRY: Lazy<Arc<SessionRegistry>> = Lazy::new(|| {
            tracing::info!("Initializing global session registry");
            Arc::new(SessionRegistry::new())
        });
        REGISTRY.clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn register(&self, link: SessionLink) {
        trace!("Registering playback session {}", link.id);
        self.sessions.lock().unwrap().insert(link.id, link);
    }

    pub(crate) fn unregister(&self, id: SessionId) {
        trace!("Unregistering playback session {}", id);
        self.sessions.lock().unwrap().remove(&id);
    }

    /// Ask every other registered session to pause and wait until each live
    /// one has done so. Sessions that are already shutting down are skipped.
    pub(crate) async fn pause_siblings(&self, exclude: SessionId) {
        let links: Vec<SessionLink> = {
            let sessions = self.sessions.lock().unwrap();
            sessions
                .values()
                .filter(|link| link.id != exclude)
                .cloned()
                .collect()
        };

        let mut acks = Vec::new();
        for link in links {
            let (tx, rx) = oneshot::channel();
            if link
                .sender
                .send(SessionCommand::Pause {
                    respond_to: Some(tx),
                })
                .is_ok()
            {
                acks.push(rx);
            }
        }

        // A sibling closing mid-request drops its ack; that is fine, it is
        // not playing anymore either way.
        let _ = join_all(acks).await;
    }
}
