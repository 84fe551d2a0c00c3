use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Prompt};
use crate::audio::EngineCmd;
use crate::config;
use crate::reorder::{apply_move, drop_target, rows_for_list};
use crate::session::Session;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Index of the first visible playlist row.
    pub scroll: usize,
    /// Whether the active drag gesture actually moved a row; a plain click
    /// must not submit a reorder.
    pub drag_moved: bool,
}

/// Main terminal event loop: drains engine events, handles input, and
/// redraws. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &Session,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.ui.tick_ms);

    loop {
        // Track end, load results and failures arrive asynchronously.
        while let Some(ev) = session.try_engine_event() {
            session.handle_engine_event(app, ev);
        }

        let playback = session.playback();

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        keep_selected_visible(app, state, ui::visible_rows(area));

        terminal.draw(|f| ui::draw(f, app, &playback, state.scroll))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(key, settings, app, session, &playback) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(mouse, area, app, session, state),
                _ => {}
            }
        }
    }
}

fn keep_selected_visible(app: &App, state: &mut EventLoopState, rows: usize) {
    if rows == 0 {
        return;
    }
    if app.selected < state.scroll {
        state.scroll = app.selected;
    } else if app.selected >= state.scroll + rows {
        state.scroll = app.selected + 1 - rows;
    }
}

/// Handle one key event. Returns `true` when the app should quit.
fn handle_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &Session,
    playback: &crate::audio::PlaybackInfo,
) -> bool {
    // Prompts capture the keyboard until answered or cancelled.
    match app.prompt.clone() {
        Prompt::ConfirmRemove { id, .. } => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.prompt = Prompt::None;
                    session.remove_track(app, &id);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    // Cancelled: no request goes out.
                    app.prompt = Prompt::None;
                }
                _ => {}
            }
            return false;
        }
        Prompt::UploadPath { mut input } => {
            match key.code {
                KeyCode::Esc => app.prompt = Prompt::None,
                KeyCode::Enter => {
                    app.prompt = Prompt::None;
                    session.upload_paths(app, &input);
                }
                KeyCode::Backspace => {
                    input.pop();
                    app.prompt = Prompt::UploadPath { input };
                }
                KeyCode::Char(c) if !c.is_control() => {
                    input.push(c);
                    app.prompt = Prompt::UploadPath { input };
                }
                _ => {}
            }
            return false;
        }
        Prompt::None => {}
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter => {
            if let Some(song) = app.selected_song() {
                let id = song.id.clone();
                session.play_track(app, &id);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => session.toggle(app),
        KeyCode::Char('l') => session.next(app),
        KeyCode::Char('h') => session.previous(app),
        KeyCode::Char('d') => {
            if let Some((id, title)) = app
                .selected_song()
                .map(|s| (s.id.clone(), s.title.clone()))
            {
                app.prompt = Prompt::ConfirmRemove { id, title };
            }
        }
        KeyCode::Char('u') => {
            app.prompt = Prompt::UploadPath {
                input: String::new(),
            };
        }
        KeyCode::Char('R') => session.refresh(app),
        KeyCode::Char('m') => {
            let _ = session.engine().send(EngineCmd::ToggleMute);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let _ = session
                .engine()
                .send(EngineCmd::SetVolume(playback.volume + settings.ui.volume_step));
        }
        KeyCode::Char('-') => {
            let _ = session
                .engine()
                .send(EngineCmd::SetVolume(playback.volume - settings.ui.volume_step));
        }
        _ => {}
    }

    false
}

fn handle_mouse(
    mouse: MouseEvent,
    area: Rect,
    app: &mut App,
    session: &Session,
    state: &mut EventLoopState,
) {
    let regions = ui::layout(area);
    let inner = regions.playlist_inner;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(inner, mouse.column, mouse.row) {
                let row = state.scroll + (mouse.row - inner.y) as usize;
                if let Some(id) = app.rendered().get(row).cloned() {
                    app.set_selected(row);
                    app.start_drag(id);
                    state.drag_moved = false;
                }
            } else if let Some(fraction) = gauge_fraction(&regions, mouse.column, mouse.row) {
                // Clicking the progress bar seeks; a no-op while the
                // duration is still unknown.
                let _ = session.engine().send(EngineCmd::Seek(fraction));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(dragged) = app.dragging.clone() else {
                return;
            };
            // Pointer sits at the vertical center of its character cell.
            let pointer_y = mouse.row as f32 + 0.5;

            let bounds = rows_for_list(app.rendered(), inner.y, 1, state.scroll);
            let candidates: Vec<_> = bounds.into_iter().filter(|r| r.id != dragged).collect();
            let target = drop_target(&candidates, pointer_y).map(str::to_string);

            let new_order = apply_move(app.rendered(), &dragged, target.as_deref());
            if new_order != app.rendered() {
                app.apply_local_order(new_order);
                state.drag_moved = true;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.end_drag().is_some() && state.drag_moved {
                state.drag_moved = false;
                session.submit_reorder(app);
            }
        }
        MouseEventKind::ScrollDown => app.cursor_down(),
        MouseEventKind::ScrollUp => app.cursor_up(),
        _ => {}
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Map a click on the progress gauge to a fraction of the track.
fn gauge_fraction(regions: &ui::UiLayout, x: u16, y: u16) -> Option<f32> {
    let block = regions.now_playing;
    // The gauge is the third inner row of the now-playing block.
    let gauge_y = block.y.saturating_add(3);
    let inner_x = block.x.saturating_add(1);
    let inner_width = block.width.saturating_sub(2);

    if y != gauge_y || inner_width == 0 || x < inner_x || x >= inner_x + inner_width {
        return None;
    }
    Some((x - inner_x) as f32 / inner_width as f32)
}
