use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::traits::MediaSurface;

/// Lifecycle of one playback session. `Closed` is terminal; a session is
/// never reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Unopened,
    Active,
    Closed,
}

/// Cancellation handle for one input-bus subscription. The forwarder task is
/// aborted when the subscription is released (or dropped), so no listener
/// survives its session.
#[derive(Debug)]
pub(crate) struct InputSubscription {
    task: JoinHandle<()>,
}

impl InputSubscription {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Resources acquired when a session opens and released exactly once when it
/// closes. Absent before open and after close: no handle outlives its
/// session.
#[derive(Default)]
pub(crate) struct ResourceGuards {
    pub(crate) surface: Option<Arc<dyn MediaSurface>>,
    pub(crate) keydown_sub: Option<InputSubscription>,
    pub(crate) fullscreen_sub: Option<InputSubscription>,
}

impl ResourceGuards {
    /// Release the global listeners and reset the media surface. Each step
    /// is independently best-effort: a failing surface reset is logged and
    /// never blocks the remaining teardown. Safe to call more than once.
    pub(crate) async fn release(&mut self) {
        if let Some(sub) = self.keydown_sub.take() {
            drop(sub);
            debug!("Released keydown subscription");
        }
        if let Some(sub) = self.fullscreen_sub.take() {
            drop(sub);
            debug!("Released fullscreen subscription");
        }

        if let Some(surface) = self.surface.take()
            && let Err(e) = surface.reset().await
        {
            warn!("Media surface reset failed during teardown: {:#}", e);
        }
    }
}

impl std::fmt::Debug for ResourceGuards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGuards")
            .field("surface", &self.surface.is_some())
            .field("keydown_sub", &self.keydown_sub.is_some())
            .field("fullscreen_sub", &self.fullscreen_sub.is_some())
            .finish()
    }
}
