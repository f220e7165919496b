use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::models::MediaDescriptor;

/// The media element a session is bound to. Implemented by the host over
/// whatever actually decodes video (a toolkit video widget, a test double).
///
/// `play` is the only call that is expected to fail in normal operation
/// (unsupported format, autoplay policy); the session swallows that failure
/// and stays paused.
#[async_trait]
pub trait MediaSurface: Send + Sync {
    async fn load(&self, url: &Url) -> Result<()>;
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek(&self, position: Duration) -> Result<()>;
    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn set_muted(&self, muted: bool) -> Result<()>;
    async fn set_rate(&self, rate: f64) -> Result<()>;
    /// Stop and fully reset: pause, rewind to zero, detach the source.
    /// Called exactly once during teardown.
    async fn reset(&self) -> Result<()>;
}

/// Fullscreen surface of the hosting window. Requests are best-effort; the
/// environment's fullscreen-change notification on the input bus is the
/// single source of truth for the resulting state.
pub trait HostWindow: Send + Sync {
    fn request_fullscreen(&self) -> Result<()>;
    fn exit_fullscreen(&self) -> Result<()>;
}

/// Resolves a catalog descriptor to a playable URL. Authentication tokens and
/// rendition selection live behind this seam.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, descriptor: &MediaDescriptor) -> Result<Url>;
}
