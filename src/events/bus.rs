use tokio::sync::broadcast;
use tracing::trace;

use super::types::InputEvent;

const BUS_CAPACITY: usize = 64;

/// Process-wide fan-out of environment input events, standing in for the
/// window-global keydown and fullscreen-change listeners. The host emits
/// events here; each open playback session holds subscriptions whose
/// forwarder tasks are released on session close.
#[derive(Debug)]
pub struct InputBus {
    sender: broadcast::Sender<InputEvent>,
}

impl InputBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    /// Broadcast an event to every live subscriber. Events emitted while no
    /// session is open are simply dropped.
    pub fn emit(&self, event: InputEvent) {
        trace!("Input event: {:?}", event);
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InputEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new()
    }
}
