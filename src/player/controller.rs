use tokio::sync::{mpsc, oneshot, watch};

use crate::error::PlayerError;
use crate::events::KeyPress;

use super::lifecycle::LifecyclePhase;
use super::types::{PlaybackRate, PlaybackStatus, Quality, SessionId};

/// Commands processed by the session event loop. User operations carry a
/// `respond_to` acknowledged once the command has been applied; environment
/// notifications forwarded from the input bus arrive without one.
#[derive(Debug)]
pub enum SessionCommand {
    /// Toggle play/pause, pausing sibling sessions before any play request
    TogglePlay {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Skip by a signed number of seconds, clamped into the duration
    SeekRelative {
        delta_secs: f64,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Seek to a fraction of the duration (progress-track click)
    SeekToFraction {
        fraction: f64,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Direct volume write (slider path)
    SetVolume {
        volume: f64,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Step volume up by the configured step
    IncreaseVolume {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Step volume down by the configured step
    DecreaseVolume {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Flip muted without changing the volume level
    ToggleMute {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Set playback speed; rates outside the menu set are ignored
    SetPlaybackRate {
        rate: f64,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Record a quality selection (re-selection is a no-op)
    SetQuality {
        quality: Quality,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Request fullscreen entry or exit on the hosting window
    ToggleFullscreen {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Keyboard input; replies whether the key was handled (and the host
    /// must suppress its default handling)
    KeyDown {
        press: KeyPress,
        respond_to: Option<oneshot::Sender<bool>>,
    },
    /// Pointer moved over the player: show controls, re-arm the hide timer
    PointerMoved {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Click on the video surface toggles playback
    SurfaceClicked {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Click on the progress track at `offset_x` of a `track_width` wide bar
    ProgressClicked {
        offset_x: f64,
        track_width: f64,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Media metadata resolved; the duration is now known
    MetadataLoaded {
        duration_secs: f64,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Periodic position report from the media surface
    TimeUpdate {
        position_secs: f64,
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Environment fullscreen notification, the single source of truth
    FullscreenChanged(bool),
    /// Pause request from a sibling session about to start playing
    Pause {
        respond_to: Option<oneshot::Sender<()>>,
    },
    /// Read the current state
    Snapshot {
        respond_to: oneshot::Sender<SessionSnapshot>,
    },
    /// Close the session and tear down every held resource
    Close {
        respond_to: Option<oneshot::Sender<()>>,
    },

    // Internal events re-entering the loop
    /// Resolution of an in-flight play request; stale epochs are discarded
    PlayResolved {
        epoch: u64,
        result: Result<(), anyhow::Error>,
    },
    /// Overlay inactivity timer fired; stale epochs are discarded
    ControlsTimeout { epoch: u64 },
}

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: LifecyclePhase,
    pub status: PlaybackStatus,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: f64,
    pub muted: bool,
    pub playback_rate: PlaybackRate,
    pub quality: Quality,
    pub controls_visible: bool,
    pub fullscreen_active: bool,
    /// True when the descriptor could not be resolved to a playable source;
    /// the session still renders and closes normally.
    pub degraded: bool,
    pub title: String,
}

impl SessionSnapshot {
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.position_secs / self.duration_secs) * 100.0
        } else {
            0.0
        }
    }

    pub fn volume_percent(&self) -> f64 {
        self.volume * 100.0
    }
}

/// Handle to a running playback session. Cloneable; all methods go through
/// the session's command queue and return [`PlayerError::SessionClosed`]
/// once the session has shut down (except [`close`](Self::close), which is
/// idempotent).
#[derive(Clone)]
pub struct SessionHandle {
    pub(crate) id: SessionId,
    pub(crate) sender: mpsc::UnboundedSender<SessionCommand>,
    pub(crate) state_rx: watch::Receiver<SessionSnapshot>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("sender", &"<UnboundedSender>")
            .field("state_rx", &"<watch::Receiver>")
            .finish()
    }
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Watch channel mirroring the session state after every processed
    /// command. Stays readable (with the final snapshot) after close.
    pub fn state(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_rx.clone()
    }

    pub async fn toggle_play(&self) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::TogglePlay { respond_to })
            .await
    }

    pub async fn seek_relative(&self, delta_secs: f64) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::SeekRelative {
            delta_secs,
            respond_to,
        })
        .await
    }

    pub async fn seek_to_fraction(&self, fraction: f64) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::SeekToFraction {
            fraction,
            respond_to,
        })
        .await
    }

    pub async fn set_volume(&self, volume: f64) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::SetVolume { volume, respond_to })
            .await
    }

    pub async fn increase_volume(&self) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::IncreaseVolume { respond_to })
            .await
    }

    pub async fn decrease_volume(&self) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::DecreaseVolume { respond_to })
            .await
    }

    pub async fn toggle_mute(&self) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::ToggleMute { respond_to })
            .await
    }

    pub async fn set_playback_rate(&self, rate: f64) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::SetPlaybackRate { rate, respond_to })
            .await
    }

    pub async fn set_quality(&self, quality: Quality) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::SetQuality {
            quality,
            respond_to,
        })
        .await
    }

    pub async fn toggle_fullscreen(&self) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::ToggleFullscreen { respond_to })
            .await
    }

    /// Deliver a key press, returning whether it was handled. A `true` reply
    /// means the host must suppress its default handling for the key.
    pub async fn key_down(&self, press: KeyPress) -> Result<bool, PlayerError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::KeyDown {
                press,
                respond_to: Some(tx),
            })
            .map_err(|_| PlayerError::SessionClosed)?;
        rx.await.map_err(|_| PlayerError::SessionClosed)
    }

    pub async fn pointer_moved(&self) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::PointerMoved { respond_to })
            .await
    }

    pub async fn surface_clicked(&self) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::SurfaceClicked { respond_to })
            .await
    }

    pub async fn progress_clicked(
        &self,
        offset_x: f64,
        track_width: f64,
    ) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::ProgressClicked {
            offset_x,
            track_width,
            respond_to,
        })
        .await
    }

    pub async fn metadata_loaded(&self, duration_secs: f64) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::MetadataLoaded {
            duration_secs,
            respond_to,
        })
        .await
    }

    pub async fn time_update(&self, position_secs: f64) -> Result<(), PlayerError> {
        self.acked(|respond_to| SessionCommand::TimeUpdate {
            position_secs,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, PlayerError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Snapshot { respond_to: tx })
            .map_err(|_| PlayerError::SessionClosed)?;
        rx.await.map_err(|_| PlayerError::SessionClosed)
    }

    /// Close the session, completing teardown before returning. Safe to call
    /// any number of times; calls after the session has shut down succeed.
    pub async fn close(&self) -> Result<(), PlayerError> {
        let (tx, rx) = oneshot::channel();
        if self
            .sender
            .send(SessionCommand::Close {
                respond_to: Some(tx),
            })
            .is_err()
        {
            // Loop already gone: a previous close completed teardown.
            return Ok(());
        }
        let _ = rx.await;
        Ok(())
    }

    async fn acked(
        &self,
        command: impl FnOnce(Option<oneshot::Sender<()>>) -> SessionCommand,
    ) -> Result<(), PlayerError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(command(Some(tx)))
            .map_err(|_| PlayerError::SessionClosed)?;
        rx.await.map_err(|_| PlayerError::SessionClosed)
    }
}
