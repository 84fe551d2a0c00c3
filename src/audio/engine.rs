//! The engine thread: exclusive owner of the audio output handle.
//!
//! Commands come in over a channel, notable transitions go back out as
//! [`EngineEvent`]s, and a shared [`PlaybackHandle`] snapshot feeds the UI.
//! Every failure path degrades to a paused or errored snapshot plus a
//! `Failed` event; nothing escapes this thread as a panic.

use std::io::Cursor;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::types::{
    EngineCmd, EngineEvent, PlaybackHandle, TransportState, VolumeState, seek_target,
};

/// How often the thread wakes up to publish position and check for track end.
const TICK: Duration = Duration::from_millis(200);

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
    playback: PlaybackHandle,
    initial_volume: f32,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = events.send(EngineEvent::Failed {
                    message: format!("no audio output device: {e}"),
                });
                if let Ok(mut info) = playback.lock() {
                    info.state = TransportState::Errored;
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which corrupts
        // the alternate screen.
        stream.log_on_drop(false);

        // Track downloads can be large; give them more slack than API calls.
        let http = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                let _ = events.send(EngineEvent::Failed {
                    message: format!("http client setup failed: {e}"),
                });
                if let Ok(mut info) = playback.lock() {
                    info.state = TransportState::Errored;
                }
                return;
            }
        };

        let mut engine = Engine::new(stream, http, events, playback, initial_volume);

        loop {
            match rx.recv_timeout(TICK) {
                Ok(EngineCmd::Quit) => {
                    engine.stop();
                    break;
                }
                Ok(cmd) => engine.handle(cmd),
                Err(RecvTimeoutError::Timeout) => engine.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

struct Engine {
    stream: OutputStream,
    http: reqwest::blocking::Client,
    events: Sender<EngineEvent>,
    playback: PlaybackHandle,
    sink: Option<Sink>,
    duration: Option<Duration>,
    volume: VolumeState,
    state: TransportState,
}

impl Engine {
    fn new(
        stream: OutputStream,
        http: reqwest::blocking::Client,
        events: Sender<EngineEvent>,
        playback: PlaybackHandle,
        initial_volume: f32,
    ) -> Self {
        let volume = VolumeState::new(initial_volume);
        let mut engine = Self {
            stream,
            http,
            events,
            playback,
            sink: None,
            duration: None,
            volume,
            state: TransportState::Idle,
        };
        engine.publish();
        engine
    }

    fn handle(&mut self, cmd: EngineCmd) {
        match cmd {
            EngineCmd::Load { url } => self.load(&url),
            EngineCmd::Play => {
                if let Some(s) = self.sink.as_ref() {
                    s.play();
                    self.state = TransportState::Playing;
                    self.publish();
                    let _ = self.events.send(EngineEvent::Started);
                }
            }
            EngineCmd::Pause => {
                if let Some(s) = self.sink.as_ref() {
                    s.pause();
                    self.state = TransportState::Paused;
                    self.publish();
                    let _ = self.events.send(EngineEvent::Paused);
                }
            }
            EngineCmd::Seek(fraction) => self.seek(fraction),
            EngineCmd::SetVolume(v) => {
                let level = self.volume.set(v);
                self.apply_volume(level);
            }
            EngineCmd::ToggleMute => {
                let level = self.volume.toggle_mute();
                self.apply_volume(level);
            }
            // Quit is handled by the outer loop.
            EngineCmd::Quit => {}
        }
    }

    /// Fetch `url` and hand the decoded source to a fresh paused sink.
    fn load(&mut self, url: &str) {
        self.stop();
        self.state = TransportState::Loading;
        self.publish();

        let bytes = match self.http.get(url).send().and_then(|r| r.error_for_status()) {
            Ok(resp) => match resp.bytes() {
                Ok(b) => b.to_vec(),
                Err(e) => return self.fail(format!("fetching {url}: {e}")),
            },
            Err(e) => return self.fail(format!("fetching {url}: {e}")),
        };

        let source = match Decoder::new(Cursor::new(bytes)) {
            Ok(s) => s,
            Err(e) => return self.fail(format!("decoding {url}: {e}")),
        };
        let duration = source.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume.level());
        sink.append(source);
        sink.pause();

        self.sink = Some(sink);
        self.duration = duration;
        self.state = TransportState::Paused;
        self.publish();
        let _ = self.events.send(EngineEvent::Loaded { duration });
    }

    /// Seek to a fraction of the loaded track. A no-op without a loaded
    /// sink or a known duration.
    fn seek(&mut self, fraction: f32) {
        let (Some(sink), Some(target)) = (self.sink.as_ref(), seek_target(self.duration, fraction))
        else {
            return;
        };
        if let Err(e) = sink.try_seek(target) {
            log::debug!("seek not supported for current source: {e}");
        }
        self.publish();
    }

    fn apply_volume(&mut self, level: f32) {
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(level);
        }
        self.publish();
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.duration = None;
        self.state = TransportState::Idle;
    }

    fn fail(&mut self, message: String) {
        self.sink = None;
        self.duration = None;
        self.state = TransportState::Errored;
        self.publish();
        log::warn!("playback engine: {message}");
        let _ = self.events.send(EngineEvent::Failed { message });
    }

    /// Periodic wakeup: publish the position and detect natural track end.
    fn tick(&mut self) {
        let ended = self.state.is_playing()
            && self.sink.as_ref().map(|s| s.empty()).unwrap_or(false);
        if ended {
            self.stop();
            self.publish();
            let _ = self.events.send(EngineEvent::Ended);
            return;
        }
        self.publish();
    }

    /// Mirror current engine state into the shared snapshot.
    fn publish(&self) {
        if let Ok(mut info) = self.playback.lock() {
            info.state = self.state;
            info.position = self
                .sink
                .as_ref()
                .map(|s| s.get_pos())
                .unwrap_or(Duration::ZERO);
            info.duration = self.duration;
            info.volume = self.volume.level();
            info.muted = self.volume.muted();
        }
    }
}
