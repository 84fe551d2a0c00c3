//! Session controller: binds user intent to the server client, the playlist
//! store and the playback engine.
//!
//! This is the only place that changes the current selection, and it only
//! does so from server-confirmed responses. Server failures are logged and
//! reported on the status line; every failure path either leaves prior state
//! intact or forces a refresh.

use std::path::PathBuf;

use crate::api::{ServerClient, Song, SongResponse};
use crate::app::App;
use crate::audio::{AudioEngine, EngineCmd, EngineEvent, PlaybackInfo};
use crate::reorder::order_payload;
use crate::upload;

pub struct Session {
    client: ServerClient,
    engine: AudioEngine,
}

/// What a successful play/next/previous response asks the engine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NavOutcome {
    pub song: Song,
    pub resume: bool,
}

/// Decide how to react to a navigation response.
///
/// `None` means the server had nothing to navigate to: the caller must not
/// touch the selection and must not issue any engine command.
pub(crate) fn navigation_outcome(resp: SongResponse, was_playing: bool) -> Option<NavOutcome> {
    if !resp.success {
        return None;
    }
    resp.song.map(|song| NavOutcome {
        song,
        resume: was_playing,
    })
}

impl Session {
    pub fn new(client: ServerClient, engine: AudioEngine) -> Self {
        Self { client, engine }
    }

    pub fn playback(&self) -> PlaybackInfo {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    pub fn try_engine_event(&self) -> Option<EngineEvent> {
        self.engine.try_event()
    }

    /// Replace the store with the server's playlist and selection.
    pub fn refresh(&self, app: &mut App) {
        match self.client.songs() {
            Ok(resp) => app.apply_refresh(resp),
            Err(e) => {
                log::warn!("playlist refresh failed: {e}");
                app.set_status(format!("could not reach server: {e}"));
            }
        }
    }

    /// Ask the server to select `id`, then load it and start playback.
    pub fn play_track(&self, app: &mut App, id: &str) {
        match self.client.play(id) {
            // A play request always attempts to start; an engine-level
            // refusal later degrades to paused without a fatal error.
            Ok(resp) => {
                if let Some(outcome) = navigation_outcome(resp, true) {
                    self.apply_outcome(app, outcome);
                } else {
                    log::debug!("server refused to play {id}");
                }
            }
            Err(e) => {
                log::warn!("play request failed: {e}");
                app.set_status(format!("play failed: {e}"));
            }
        }
    }

    /// Server-computed next track. Resumes only if we were already playing.
    pub fn next(&self, app: &mut App) {
        let was_playing = self.playback().state.is_playing();
        self.advance(app, Direction::Next, was_playing);
    }

    /// Server-computed previous track.
    pub fn previous(&self, app: &mut App) {
        let was_playing = self.playback().state.is_playing();
        self.advance(app, Direction::Previous, was_playing);
    }

    fn advance(&self, app: &mut App, direction: Direction, resume: bool) {
        let result = match direction {
            Direction::Next => self.client.next(),
            Direction::Previous => self.client.previous(),
        };
        match result {
            Ok(resp) => {
                if let Some(outcome) = navigation_outcome(resp, resume) {
                    self.apply_outcome(app, outcome);
                } else {
                    // Empty playlist or at a boundary: state stays as it is.
                    log::debug!("no {direction:?} track available");
                }
            }
            Err(e) => {
                log::warn!("{direction:?} request failed: {e}");
                app.set_status(format!("navigation failed: {e}"));
            }
        }
    }

    /// Play/pause toggle. With nothing loaded this plays the first track of
    /// a non-empty playlist and otherwise does nothing.
    pub fn toggle(&self, app: &mut App) {
        if app.current.is_none() {
            if let Some(first) = app.first_song() {
                let id = first.id.clone();
                self.play_track(app, &id);
            }
            return;
        }

        let snapshot = self.playback();
        if snapshot.state.is_playing() {
            let _ = self.engine.send(EngineCmd::Pause);
        } else if snapshot.state.has_media() {
            let _ = self.engine.send(EngineCmd::Play);
        } else if let Some(current) = app.current.clone() {
            // Selection exists but nothing is loaded (after an error or a
            // finished track): re-request it from the server.
            self.play_track(app, &current.id);
        }
    }

    /// React to an engine event. Track end is the sole automatic-advance
    /// path; it resumes playback on the next track.
    pub fn handle_engine_event(&self, app: &mut App, event: EngineEvent) {
        match event {
            EngineEvent::Ended => self.advance(app, Direction::Next, true),
            EngineEvent::Failed { message } => {
                app.set_status(format!("playback error: {message}"));
            }
            EngineEvent::Started => app.clear_status(),
            EngineEvent::Loaded { .. } | EngineEvent::Paused => {}
        }
    }

    /// Delete `id` on the server. Callers must have confirmed with the user
    /// already; this issues the request unconditionally.
    pub fn remove_track(&self, app: &mut App, id: &str) {
        match self.client.remove(id) {
            Ok(resp) if resp.success => {
                // If the removed track was current, the refresh response
                // decides what is current now; no local guessing.
                self.refresh(app);
            }
            Ok(_) => app.set_status("server refused to remove track"),
            Err(e) => {
                log::warn!("remove request failed: {e}");
                app.set_status(format!("remove failed: {e}"));
            }
        }
    }

    /// Submit the rendered order as the new canonical order.
    ///
    /// On success the follow-up refresh re-derives the authoritative copy.
    /// On failure the rendered order is deliberately left as dragged; the
    /// next refresh will correct any visual drift. No retry: a stale gesture
    /// may no longer match user intent.
    pub fn submit_reorder(&self, app: &mut App) {
        if app.rendered().is_empty() {
            return;
        }
        match self.client.reorder(order_payload(app.rendered())) {
            Ok(()) => self.refresh(app),
            Err(e) => {
                log::warn!("reorder submission failed: {e}");
                app.set_status(format!("reorder failed: {e}"));
            }
        }
    }

    /// Upload a whitespace-separated list of file paths, then refresh once.
    pub fn upload_paths(&self, app: &mut App, input: &str) {
        let files: Vec<PathBuf> = input.split_whitespace().map(PathBuf::from).collect();
        if files.is_empty() {
            return;
        }

        match upload::run_batch(&files, |p| self.client.upload(p)) {
            None => {
                app.set_status("no audio files selected (mp3/wav/ogg/m4a)");
            }
            Some(report) => {
                for failure in &report.failures {
                    log::warn!("upload failed: {failure}");
                }
                if report.failures.is_empty() {
                    app.set_status(format!("uploaded {} file(s)", report.uploaded));
                } else {
                    app.set_status(format!(
                        "uploaded {} of {}; first failure: {}",
                        report.uploaded, report.accepted, report.failures[0]
                    ));
                }
                // One refresh per batch, whatever the per-file outcomes.
                self.refresh(app);
            }
        }
    }

    fn apply_outcome(&self, app: &mut App, outcome: NavOutcome) {
        let url = match self.client.audio_url(&outcome.song.filename) {
            Ok(u) => u.to_string(),
            Err(e) => {
                log::warn!("bad audio url for {}: {e}", outcome.song.filename);
                app.set_status(format!("bad audio url: {e}"));
                return;
            }
        };

        app.current = Some(outcome.song);
        let _ = self.engine.send(EngineCmd::Load { url });
        if outcome.resume {
            let _ = self.engine.send(EngineCmd::Play);
        }
    }

    pub fn quit(&self) {
        self.engine.quit();
    }
}

#[derive(Debug, Copy, Clone)]
enum Direction {
    Next,
    Previous,
}

#[cfg(test)]
mod tests;
