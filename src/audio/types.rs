//! Small types shared between the engine thread and the rest of the app.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Lifecycle phase of the media output.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TransportState {
    /// No track loaded.
    #[default]
    Idle,
    /// A load is in flight (fetching/decoding).
    Loading,
    Playing,
    Paused,
    /// The last load or decode failed; cleared by the next load.
    Errored,
}

impl TransportState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }

    /// Whether a track is loaded and transport commands apply to it.
    pub fn has_media(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

/// Commands accepted by the engine thread.
#[derive(Debug)]
pub enum EngineCmd {
    /// Fetch and decode the track at `url`; resets position, stays paused.
    Load { url: String },
    /// Resume playback of the loaded track. No-op without one.
    Play,
    /// Pause playback.
    Pause,
    /// Seek to a fraction of the known duration. No-op when the duration
    /// is unknown.
    Seek(f32),
    /// Set the output volume, clamped to [0, 1].
    SetVolume(f32),
    /// Mute, or restore the pre-mute volume.
    ToggleMute,
    /// Shut the engine thread down.
    Quit,
}

/// Events the engine reports upward. Failures arrive here as data; the
/// engine never panics across this boundary.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A load finished; `duration` is `None` when the decoder could not
    /// determine it.
    Loaded { duration: Option<Duration> },
    Started,
    Paused,
    /// The loaded track played to its end.
    Ended,
    Failed { message: String },
}

/// Snapshot of engine state shared with the UI.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    pub state: TransportState,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    pub muted: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            state: TransportState::Idle,
            position: Duration::ZERO,
            duration: None,
            volume: 0.5,
            muted: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Absolute position for a seek to `fraction` of the track.
///
/// `None` when the duration is unknown: there is nothing to multiply
/// against, so the seek must be a no-op. The fraction is clamped to [0, 1].
pub fn seek_target(duration: Option<Duration>, fraction: f32) -> Option<Duration> {
    duration.map(|d| d.mul_f32(fraction.clamp(0.0, 1.0)))
}

/// Volume and mute bookkeeping.
///
/// Muting remembers the level it replaced; setting the volume to zero counts
/// as muted, and unmuting restores the last non-zero level.
#[derive(Debug, Clone)]
pub struct VolumeState {
    level: f32,
    restore: f32,
}

impl VolumeState {
    pub fn new(initial: f32) -> Self {
        let level = initial.clamp(0.0, 1.0);
        Self {
            level,
            restore: if level > 0.0 { level } else { 0.5 },
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn muted(&self) -> bool {
        self.level == 0.0
    }

    /// Set the level (clamped). A non-zero level becomes the restore point.
    pub fn set(&mut self, v: f32) -> f32 {
        self.level = v.clamp(0.0, 1.0);
        if self.level > 0.0 {
            self.restore = self.level;
        }
        self.level
    }

    /// Mute or unmute, returning the new level.
    pub fn toggle_mute(&mut self) -> f32 {
        if self.level > 0.0 {
            self.restore = self.level;
            self.level = 0.0;
        } else {
            self.level = self.restore;
        }
        self.level
    }
}
