/// Common types shared by the playback session concerns.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one open playback session, used by the session registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackStatus::Playing)
    }
}

/// Playback speed, restricted to the rates offered by the speed menu.
/// Arbitrary floats from the host are rejected at the boundary via
/// [`PlaybackRate::from_f64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackRate {
    X0_25,
    X0_5,
    X0_75,
    #[default]
    X1_0,
    X1_25,
    X1_5,
    X1_75,
    X2_0,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 8] = [
        PlaybackRate::X0_25,
        PlaybackRate::X0_5,
        PlaybackRate::X0_75,
        PlaybackRate::X1_0,
        PlaybackRate::X1_25,
        PlaybackRate::X1_5,
        PlaybackRate::X1_75,
        PlaybackRate::X2_0,
    ];

    pub fn as_f64(&self) -> f64 {
        match self {
            PlaybackRate::X0_25 => 0.25,
            PlaybackRate::X0_5 => 0.5,
            PlaybackRate::X0_75 => 0.75,
            PlaybackRate::X1_0 => 1.0,
            PlaybackRate::X1_25 => 1.25,
            PlaybackRate::X1_5 => 1.5,
            PlaybackRate::X1_75 => 1.75,
            PlaybackRate::X2_0 => 2.0,
        }
    }

    pub fn from_f64(rate: f64) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_f64() == rate)
    }
}

impl std::fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.as_f64())
    }
}

/// Rendition label offered by the quality menu. Selecting a label records it;
/// re-resolving the source against the new rendition is the streaming
/// backend's concern and not wired up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    Auto,
    #[serde(rename = "1080p")]
    Q1080p,
    #[serde(rename = "720p")]
    Q720p,
    #[serde(rename = "480p")]
    Q480p,
}

impl Quality {
    pub const CANDIDATES: [Quality; 4] =
        [Quality::Q1080p, Quality::Q720p, Quality::Q480p, Quality::Auto];

    pub fn label(&self) -> &'static str {
        match self {
            Quality::Auto => "Auto",
            Quality::Q1080p => "1080p",
            Quality::Q720p => "720p",
            Quality::Q480p => "480p",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
