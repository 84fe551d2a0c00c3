//! Playback engine: a dedicated thread wrapping the single audio output.
//!
//! The rest of the app never touches the output directly; it sends
//! [`EngineCmd`]s, drains [`EngineEvent`]s, and reads the shared
//! [`PlaybackInfo`] snapshot.

mod engine;
mod types;

pub use types::*;

use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use engine::spawn_engine_thread;

pub struct AudioEngine {
    tx: Sender<EngineCmd>,
    events: Receiver<EngineEvent>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioEngine {
    pub fn new(initial_volume: f32) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo {
            volume: initial_volume.clamp(0.0, 1.0),
            ..PlaybackInfo::default()
        }));

        let handle = spawn_engine_thread(rx, event_tx, playback.clone(), initial_volume);

        Self {
            tx,
            events: event_rx,
            playback,
            join: Mutex::new(Some(handle)),
        }
    }

    /// A snapshot of the current playback state.
    pub fn snapshot(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }

    pub fn send(&self, cmd: EngineCmd) -> Result<(), SendError<EngineCmd>> {
        self.tx.send(cmd)
    }

    /// Pop the next pending engine event, if any.
    pub fn try_event(&self) -> Option<EngineEvent> {
        self.events.try_recv().ok()
    }

    /// Ask the engine thread to shut down and wait for it.
    pub fn quit(&self) {
        let _ = self.send(EngineCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

#[cfg(test)]
mod tests;
