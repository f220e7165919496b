use thiserror::Error;

/// Errors raised by the playback controller. None of these are fatal to the
/// hosting application: resolution and playback failures degrade the session,
/// fullscreen failures are reconciled by the environment notification.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("media resolution failed: {0}")]
    Resolution(String),

    #[error("playback start rejected: {0}")]
    PlaybackRejected(String),

    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),

    #[error("playback session closed")]
    SessionClosed,
}
