use tracing::debug;

use super::types::{PlaybackRate, PlaybackStatus, Quality};

/// Authoritative record of one session's playback state. All setters are
/// synchronous and idempotent; every position write is clamped into
/// `[0, duration]` and every volume write into `[0, 1]`.
#[derive(Debug, Clone)]
pub struct SessionState {
    status: PlaybackStatus,
    position_secs: f64,
    duration_secs: f64,
    volume: f64,
    muted: bool,
    playback_rate: PlaybackRate,
    quality: Quality,
    fullscreen_active: bool,
}

impl SessionState {
    pub fn new(default_volume: f64, default_quality: Quality) -> Self {
        Self {
            status: PlaybackStatus::Idle,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: default_volume.clamp(0.0, 1.0),
            muted: false,
            playback_rate: PlaybackRate::default(),
            quality: default_quality,
            fullscreen_active: false,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn set_status(&mut self, status: PlaybackStatus) {
        self.status = status;
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn playback_rate(&self) -> PlaybackRate {
        self.playback_rate
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn fullscreen_active(&self) -> bool {
        self.fullscreen_active
    }

    /// Duration becomes known once the media metadata resolves.
    pub fn set_duration(&mut self, duration_secs: f64) {
        self.duration_secs = duration_secs.max(0.0);
        self.position_secs = self.position_secs.clamp(0.0, self.duration_secs);
    }

    pub fn set_position(&mut self, position_secs: f64) {
        self.position_secs = position_secs.clamp(0.0, self.duration_secs);
    }

    /// Skip by `delta_secs` (negative for backward), clamped at both ends.
    /// Returns the resulting position.
    pub fn seek_relative(&mut self, delta_secs: f64) -> f64 {
        self.set_position(self.position_secs + delta_secs);
        self.position_secs
    }

    /// Seek to a fraction of the duration, as computed from a click on the
    /// progress track. No-op while the duration is unknown.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Option<f64> {
        if self.duration_secs <= 0.0 {
            return None;
        }
        self.set_position(fraction.clamp(0.0, 1.0) * self.duration_secs);
        Some(self.position_secs)
    }

    /// Direct volume write (the slider path). Muted tracks whether the new
    /// volume is exactly zero.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        self.muted = self.volume == 0.0;
    }

    /// Step volume up. Any increase unmutes.
    pub fn increase_volume(&mut self, step: f64) -> f64 {
        self.volume = Self::snap(self.volume + step);
        self.muted = false;
        self.volume
    }

    /// Step volume down. Landing exactly on zero mutes.
    pub fn decrease_volume(&mut self, step: f64) -> f64 {
        self.volume = Self::snap(self.volume - step);
        self.muted = self.volume == 0.0;
        self.volume
    }

    /// Flip muted without touching the volume level.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Accept only rates from the fixed menu set; anything else is a no-op.
    pub fn set_playback_rate(&mut self, rate: f64) -> Option<PlaybackRate> {
        match PlaybackRate::from_f64(rate) {
            Some(rate) => {
                self.playback_rate = rate;
                Some(rate)
            }
            None => {
                debug!("Rejecting playback rate outside the menu set: {}", rate);
                None
            }
        }
    }

    /// Record a quality selection. Re-selecting the current label is a no-op;
    /// position and rate are untouched either way. Returns whether the label
    /// changed.
    pub fn set_quality(&mut self, quality: Quality) -> bool {
        if self.quality == quality {
            return false;
        }
        self.quality = quality;
        true
    }

    pub fn set_fullscreen(&mut self, active: bool) {
        self.fullscreen_active = active;
    }

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

    // Steps are snapped to a hundredth grid so that repeated 0.1 steps land
    // exactly on 0.0 and 1.0 instead of drifting.
    fn snap(volume: f64) -> f64 {
        ((volume * 100.0).round() / 100.0).clamp(0.0, 1.0)
    }
}
