use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::controller::SessionCommand;

/// Control visibility state machine states
#[derive(Debug)]
pub(crate) enum ControlState {
    /// Controls are hidden
    Hidden,
    /// Controls are visible, with the inactivity timer pending while the
    /// handle is present
    Visible { timer: Option<JoinHandle<()>> },
}

/// Owns the on-screen controls visibility and the single-shot inactivity
/// timer behind it. Re-arming cancels the pending timer task; an epoch
/// carried by the timeout command discards expiries from cancelled arms.
#[derive(Debug)]
pub(crate) struct OverlayControls {
    state: ControlState,
    epoch: u64,
    window: Duration,
}

impl OverlayControls {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            state: ControlState::Visible { timer: None },
            epoch: 0,
            window,
        }
    }

    pub(crate) fn visible(&self) -> bool {
        !matches!(self.state, ControlState::Hidden)
    }

    /// Show the controls and restart the inactivity window. At most one
    /// timer is pending per session: any previous one is cancelled first.
    pub(crate) fn show_and_arm(&mut self, sender: &mpsc::UnboundedSender<SessionCommand>) {
        self.cancel();
        self.epoch += 1;

        let epoch = self.epoch;
        let window = self.window;
        let sender = sender.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = sender.send(SessionCommand::ControlsTimeout { epoch });
        });

        self.state = ControlState::Visible { timer: Some(timer) };
    }

    /// React to the inactivity timer firing. Hides the controls only while
    /// playback is running; while paused the controls stay visible until the
    /// next interaction re-arms the window. Returns whether visibility
    /// changed.
    pub(crate) fn on_timeout(&mut self, epoch: u64, playing: bool) -> bool {
        if epoch != self.epoch {
            debug!("Ignoring stale overlay timer (epoch {})", epoch);
            return false;
        }

        if let ControlState::Visible { timer } = &mut self.state {
            timer.take();
        }

        if playing {
            self.state = ControlState::Hidden;
            true
        } else {
            false
        }
    }

    /// Cancel any pending timer without changing visibility. Called on
    /// teardown and before every re-arm.
    pub(crate) fn cancel(&mut self) {
        self.epoch += 1;
        if let ControlState::Visible { timer } = &mut self.state
            && let Some(timer) = timer.take()
        {
            timer.abort();
        }
    }
}
