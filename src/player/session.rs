use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, error, info, trace, warn};

use crate::config::PlaybackConfig;
use crate::error::PlayerError;
use crate::events::{InputBus, InputEvent, KeyPress};
use crate::models::MediaDescriptor;

use super::controller::{SessionCommand, SessionHandle, SessionSnapshot};
use super::input::{self, InputAction};
use super::lifecycle::{InputSubscription, LifecyclePhase, ResourceGuards};
use super::overlay::OverlayControls;
use super::registry::{SessionLink, SessionRegistry};
use super::state::SessionState;
use super::traits::{HostWindow, MediaResolver, MediaSurface};
use super::types::{PlaybackStatus, SessionId};

/// Collaborators a session is wired to when it opens.
pub struct SessionDeps {
    pub resolver: Arc<dyn MediaResolver>,
    pub surface: Arc<dyn MediaSurface>,
    pub window: Arc<dyn HostWindow>,
    pub bus: Arc<InputBus>,
    pub registry: Arc<SessionRegistry>,
    pub config: PlaybackConfig,
}

/// One open player: owns the session state, the overlay timer and every
/// acquired resource, and processes commands one at a time.
pub struct PlaybackSession {
    id: SessionId,
    title: String,
    phase: LifecyclePhase,
    state: SessionState,
    overlay: OverlayControls,
    guards: ResourceGuards,
    window: Arc<dyn HostWindow>,
    registry: Arc<SessionRegistry>,
    config: PlaybackConfig,
    receiver: mpsc::UnboundedReceiver<SessionCommand>,
    sender: mpsc::UnboundedSender<SessionCommand>,
    state_tx: watch::Sender<SessionSnapshot>,
    degraded: bool,
    /// Monotonic counter pairing play requests with their resolutions, so a
    /// resolution arriving after another toggle (or teardown) is discarded.
    play_epoch: u64,
    play_pending: bool,
    /// Shared with in-flight play tasks: once set, they must not touch the
    /// surface anymore.
    closed: Arc<AtomicBool>,
    /// Whether this session engaged fullscreen, and therefore owes the
    /// environment an exit request on teardown.
    fullscreen_engaged: bool,
}

impl PlaybackSession {
    /// Open a session for the given catalog item: resolve the descriptor,
    /// bind the media surface and the global listeners, start the overlay
    /// timer and register with the session registry. The caller spawns
    /// [`run`](Self::run) to drive the event loop.
    ///
    /// A descriptor that cannot be resolved (or a source that fails to load)
    /// yields a degraded session with no playable surface rather than an
    /// error; it renders and closes like any other.
    pub async fn open(descriptor: MediaDescriptor, deps: SessionDeps) -> (SessionHandle, PlaybackSession) {
        let id = SessionId::new();
        let (sender, receiver) = mpsc::unbounded_channel();

        info!("Opening playback session {} for \"{}\"", id, descriptor.title);

        let surface = match deps.resolver.resolve(&descriptor).await {
            Ok(url) => match deps.surface.load(&url).await {
                Ok(()) => Some(deps.surface.clone()),
                Err(e) => {
                    error!("Failed to load media source: {:#}", e);
                    None
                }
            },
            Err(e) => {
                error!("{}", PlayerError::Resolution(format!("{e:#}")));
                None
            }
        };
        let degraded = surface.is_none();
        if degraded {
            warn!("Session {} opens without a playable source", id);
        }

        let guards = ResourceGuards {
            surface,
            keydown_sub: Some(Self::spawn_keydown_forwarder(&deps.bus, sender.clone())),
            fullscreen_sub: Some(Self::spawn_fullscreen_forwarder(&deps.bus, sender.clone())),
        };

        let mut overlay = OverlayControls::new(deps.config.controls_timeout());
        overlay.show_and_arm(&sender);

        let state = SessionState::new(deps.config.default_volume, deps.config.default_quality);

        let mut session = PlaybackSession {
            id,
            title: descriptor.title,
            phase: LifecyclePhase::Unopened,
            state,
            overlay,
            guards,
            window: deps.window,
            registry: deps.registry,
            config: deps.config,
            receiver,
            sender: sender.clone(),
            state_tx: watch::channel(SessionSnapshot {
                phase: LifecyclePhase::Unopened,
                status: PlaybackStatus::Idle,
                position_secs: 0.0,
                duration_secs: 0.0,
                volume: 1.0,
                muted: false,
                playback_rate: Default::default(),
                quality: Default::default(),
                controls_visible: true,
                fullscreen_active: false,
                degraded,
                title: String::new(),
            })
            .0,
            degraded,
            play_epoch: 0,
            play_pending: false,
            closed: Arc::new(AtomicBool::new(false)),
            fullscreen_engaged: false,
        };

        session.phase = LifecyclePhase::Active;
        session.registry.register(SessionLink {
            id,
            sender: sender.clone(),
        });

        let state_rx = session.state_tx.subscribe();
        session.publish_state();

        let handle = SessionHandle {
            id,
            sender,
            state_rx,
        };
        (handle, session)
    }

    /// Run the session event loop until the session closes.
    pub async fn run(mut self) {
        debug!("Playback session {} event loop started", self.id);

        while let Some(command) = self.receiver.recv().await {
            self.handle_command(command).await;
            self.publish_state();
            if self.phase == LifecyclePhase::Closed {
                break;
            }
        }

        debug!("Playback session {} event loop terminated", self.id);
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::TogglePlay { respond_to } => {
                trace!("Toggling playback");
                self.toggle_play().await;
                ack(respond_to);
            }
            SessionCommand::SeekRelative {
                delta_secs,
                respond_to,
            } => {
                trace!("Seeking by {}s", delta_secs);
                self.seek_relative(delta_secs).await;
                ack(respond_to);
            }
            SessionCommand::SeekToFraction {
                fraction,
                respond_to,
            } => {
                trace!("Seeking to fraction {}", fraction);
                self.seek_to_fraction(fraction).await;
                ack(respond_to);
            }
            SessionCommand::SetVolume { volume, respond_to } => {
                trace!("Setting volume to {}", volume);
                self.state.set_volume(volume);
                self.apply_volume().await;
                ack(respond_to);
            }
            SessionCommand::IncreaseVolume { respond_to } => {
                trace!("Increasing volume");
                self.state.increase_volume(self.config.volume_step);
                self.apply_volume().await;
                ack(respond_to);
            }
            SessionCommand::DecreaseVolume { respond_to } => {
                trace!("Decreasing volume");
                self.state.decrease_volume(self.config.volume_step);
                self.apply_volume().await;
                ack(respond_to);
            }
            SessionCommand::ToggleMute { respond_to } => {
                trace!("Toggling mute");
                self.state.toggle_mute();
                self.apply_muted().await;
                ack(respond_to);
            }
            SessionCommand::SetPlaybackRate { rate, respond_to } => {
                trace!("Setting playback rate to {}", rate);
                if let Some(rate) = self.state.set_playback_rate(rate)
                    && let Some(surface) = self.guards.surface.clone()
                    && let Err(e) = surface.set_rate(rate.as_f64()).await
                {
                    warn!("Rate change failed: {:#}", e);
                }
                ack(respond_to);
            }
            SessionCommand::SetQuality {
                quality,
                respond_to,
            } => {
                if self.state.set_quality(quality) {
                    // Position and rate carry over; rebinding the source to
                    // the new rendition is the streaming backend's job.
                    debug!("Quality set to {} (source re-resolution not wired up)", quality);
                }
                ack(respond_to);
            }
            SessionCommand::ToggleFullscreen { respond_to } => {
                trace!("Toggling fullscreen");
                self.toggle_fullscreen();
                ack(respond_to);
            }
            SessionCommand::KeyDown { press, respond_to } => {
                let handled = self.handle_key(press).await;
                if let Some(tx) = respond_to {
                    let _ = tx.send(handled);
                }
            }
            SessionCommand::PointerMoved { respond_to } => {
                self.overlay.show_and_arm(&self.sender);
                ack(respond_to);
            }
            SessionCommand::SurfaceClicked { respond_to } => {
                trace!("Video surface clicked");
                self.toggle_play().await;
                ack(respond_to);
            }
            SessionCommand::ProgressClicked {
                offset_x,
                track_width,
                respond_to,
            } => {
                if track_width > 0.0 {
                    let fraction = (offset_x / track_width).clamp(0.0, 1.0);
                    trace!("Progress track clicked at fraction {}", fraction);
                    self.seek_to_fraction(fraction).await;
                }
                ack(respond_to);
            }
            SessionCommand::MetadataLoaded {
                duration_secs,
                respond_to,
            } => {
                debug!("Media metadata loaded, duration {}s", duration_secs);
                self.state.set_duration(duration_secs);
                ack(respond_to);
            }
            SessionCommand::TimeUpdate {
                position_secs,
                respond_to,
            } => {
                self.state.set_position(position_secs);
                ack(respond_to);
            }
            SessionCommand::FullscreenChanged(active) => {
                debug!("Fullscreen changed: {}", active);
                self.state.set_fullscreen(active);
                if !active {
                    self.fullscreen_engaged = false;
                }
            }
            SessionCommand::Pause { respond_to } => {
                trace!("Sibling pause request");
                let was_pending = self.play_pending;
                if was_pending {
                    self.play_epoch += 1;
                    self.play_pending = false;
                }
                if self.state.status().is_playing() || was_pending {
                    if let Some(surface) = self.guards.surface.clone() {
                        self.pause_surface(&surface).await;
                    } else {
                        self.state.set_status(PlaybackStatus::Paused);
                    }
                }
                ack(respond_to);
            }
            SessionCommand::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
            SessionCommand::Close { respond_to } => {
                self.close_session().await;
                ack(respond_to);
            }
            SessionCommand::PlayResolved { epoch, result } => {
                if self.phase != LifecyclePhase::Active || epoch != self.play_epoch {
                    trace!("Discarding stale play resolution (epoch {})", epoch);
                    return;
                }
                self.play_pending = false;
                match result {
                    Ok(()) => {
                        debug!("Playback started");
                        self.state.set_status(PlaybackStatus::Playing);
                    }
                    Err(e) => {
                        // Not surfaced to the user beyond staying paused.
                        error!("{}", PlayerError::PlaybackRejected(format!("{e:#}")));
                        self.state.set_status(PlaybackStatus::Paused);
                    }
                }
            }
            SessionCommand::ControlsTimeout { epoch } => {
                self.overlay
                    .on_timeout(epoch, self.state.status().is_playing());
            }
        }
    }

    async fn toggle_play(&mut self) {
        let Some(surface) = self.guards.surface.clone() else {
            debug!("Ignoring play toggle without a playable source");
            return;
        };

        match self.state.status() {
            PlaybackStatus::Playing => {
                self.play_epoch += 1;
                self.play_pending = false;
                self.pause_surface(&surface).await;
            }
            _ if self.play_pending => {
                // Toggled again before the play request resolved: the latest
                // intent is pause. The surface serializes its own play/pause
                // calls, so pausing now is safe.
                self.play_epoch += 1;
                self.play_pending = false;
                self.pause_surface(&surface).await;
            }
            _ => {
                self.play_epoch += 1;
                self.play_pending = true;
                let epoch = self.play_epoch;
                let id = self.id;
                let registry = self.registry.clone();
                let sender = self.sender.clone();
                let closed = self.closed.clone();
                tokio::spawn(async move {
                    // At most one playing session across the application:
                    // every sibling is paused before this one starts.
                    registry.pause_siblings(id).await;
                    if closed.load(Ordering::SeqCst) {
                        return;
                    }
                    let result = surface.play().await;
                    let _ = sender.send(SessionCommand::PlayResolved { epoch, result });
                });
            }
        }
    }

    async fn pause_surface(&mut self, surface: &Arc<dyn MediaSurface>) {
        if let Err(e) = surface.pause().await {
            warn!("Pause request failed: {:#}", e);
        }
        self.state.set_status(PlaybackStatus::Paused);
    }

    async fn seek_relative(&mut self, delta_secs: f64) {
        let position = self.state.seek_relative(delta_secs);
        self.push_seek(position).await;
    }

    async fn seek_to_fraction(&mut self, fraction: f64) {
        if let Some(position) = self.state.seek_to_fraction(fraction) {
            self.push_seek(position).await;
        }
    }

    async fn push_seek(&mut self, position_secs: f64) {
        if let Some(surface) = self.guards.surface.clone()
            && let Err(e) = surface.seek(Duration::from_secs_f64(position_secs)).await
        {
            warn!("Seek request failed: {:#}", e);
        }
    }

    async fn apply_volume(&mut self) {
        if let Some(surface) = self.guards.surface.clone() {
            if let Err(e) = surface.set_volume(self.state.volume()).await {
                warn!("Volume change failed: {:#}", e);
            }
        }
        self.apply_muted().await;
    }

    async fn apply_muted(&mut self) {
        if let Some(surface) = self.guards.surface.clone()
            && let Err(e) = surface.set_muted(self.state.muted()).await
        {
            warn!("Mute change failed: {:#}", e);
        }
    }

    fn toggle_fullscreen(&mut self) {
        if self.state.fullscreen_active() {
            if let Err(e) = self.window.exit_fullscreen() {
                debug!("{}", PlayerError::Fullscreen(format!("{e:#}")));
            }
            self.state.set_fullscreen(false);
        } else {
            match self.window.request_fullscreen() {
                Ok(()) => {
                    // Optimistic: the environment's fullscreen-change
                    // notification is the source of truth and corrects a
                    // denied request.
                    self.state.set_fullscreen(true);
                    self.fullscreen_engaged = true;
                }
                Err(e) => debug!("{}", PlayerError::Fullscreen(format!("{e:#}"))),
            }
        }
    }

    async fn handle_key(&mut self, press: KeyPress) -> bool {
        let Some(action) = input::map_key(&press) else {
            return false;
        };
        trace!("Key {:?} -> {:?}", press.key, action);

        // Every handled key is a qualifying interaction for the overlay.
        self.overlay.show_and_arm(&self.sender);

        match action {
            InputAction::TogglePlay => self.toggle_play().await,
            InputAction::SeekBackward => self.seek_relative(-self.config.seek_step_secs).await,
            InputAction::SeekForward => self.seek_relative(self.config.seek_step_secs).await,
            InputAction::VolumeUp => {
                self.state.increase_volume(self.config.volume_step);
                self.apply_volume().await;
            }
            InputAction::VolumeDown => {
                self.state.decrease_volume(self.config.volume_step);
                self.apply_volume().await;
            }
            InputAction::ToggleMute => {
                self.state.toggle_mute();
                self.apply_muted().await;
            }
            InputAction::ToggleFullscreen => self.toggle_fullscreen(),
            InputAction::ExitFullscreenOrClose => {
                if self.state.fullscreen_active() {
                    if let Err(e) = self.window.exit_fullscreen() {
                        debug!("{}", PlayerError::Fullscreen(format!("{e:#}")));
                    }
                    self.state.set_fullscreen(false);
                } else {
                    self.close_session().await;
                }
            }
        }
        true
    }

    /// Teardown. Idempotent; every step is best-effort and failures never
    /// block the remaining steps.
    async fn close_session(&mut self) {
        if self.phase == LifecyclePhase::Closed {
            debug!("Close requested on an already closed session");
            return;
        }
        info!("Closing playback session {}", self.id);

        // Supersede any in-flight play request; a late resolution is
        // discarded against the closed phase.
        self.play_epoch += 1;
        self.play_pending = false;
        self.closed.store(true, Ordering::SeqCst);

        // 1. Stop the overlay timer.
        self.overlay.cancel();

        // 2./3. Release the global listeners, stop and reset the surface.
        self.guards.release().await;

        // 4. Leave fullscreen if this session engaged it.
        if self.fullscreen_engaged {
            if let Err(e) = self.window.exit_fullscreen() {
                debug!("Ignoring fullscreen exit failure during teardown: {:#}", e);
            }
            self.fullscreen_engaged = false;
            self.state.set_fullscreen(false);
        }

        self.registry.unregister(self.id);
        self.state.set_status(PlaybackStatus::Idle);
        self.state.set_position(0.0);
        self.phase = LifecyclePhase::Closed;
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            status: self.state.status(),
            position_secs: self.state.position_secs(),
            duration_secs: self.state.duration_secs(),
            volume: self.state.volume(),
            muted: self.state.muted(),
            playback_rate: self.state.playback_rate(),
            quality: self.state.quality(),
            controls_visible: self.overlay.visible(),
            fullscreen_active: self.state.fullscreen_active(),
            degraded: self.degraded,
            title: self.title.clone(),
        }
    }

    fn publish_state(&self) {
        self.state_tx.send_replace(self.snapshot());
    }

    fn spawn_keydown_forwarder(
        bus: &InputBus,
        sender: mpsc::UnboundedSender<SessionCommand>,
    ) -> InputSubscription {
        let mut events = bus.subscribe();
        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(InputEvent::KeyDown(press)) => {
                        if sender
                            .send(SessionCommand::KeyDown {
                                press,
                                respond_to: None,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Keydown subscription lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        InputSubscription::new(task)
    }

    fn spawn_fullscreen_forwarder(
        bus: &InputBus,
        sender: mpsc::UnboundedSender<SessionCommand>,
    ) -> InputSubscription {
        let mut events = bus.subscribe();
        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(InputEvent::FullscreenChanged(active)) => {
                        if sender
                            .send(SessionCommand::FullscreenChanged(active))
                            .is_err()
                        {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(
                            "Fullscreen subscription lagged, skipped {} events",
                            skipped
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        InputSubscription::new(task)
    }
}

fn ack(respond_to: Option<oneshot::Sender<()>>) {
    if let Some(tx) = respond_to {
        let _ = tx.send(());
    }
}
