//! UI rendering helpers for the terminal user interface.
//!
//! Layout is computed by [`layout`] so the event loop can map mouse
//! coordinates onto the same rectangles the renderer used.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use crate::app::{App, Prompt};
use crate::audio::{PlaybackInfo, TransportState};
use crate::format::format_duration;

/// Screen regions, stable between rendering and input handling.
pub struct UiLayout {
    pub now_playing: Rect,
    pub playlist: Rect,
    /// The playlist area minus its borders: one rendered row per line.
    pub playlist_inner: Rect,
    pub status: Rect,
}

/// Split the whole terminal area into the fixed regions.
pub fn layout(area: Rect) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    let playlist = chunks[1];
    let playlist_inner = Rect {
        x: playlist.x.saturating_add(1),
        y: playlist.y.saturating_add(1),
        width: playlist.width.saturating_sub(2),
        height: playlist.height.saturating_sub(2),
    };

    UiLayout {
        now_playing: chunks[0],
        playlist,
        playlist_inner,
        status: chunks[2],
    }
}

/// Number of playlist rows that fit on screen.
pub fn visible_rows(area: Rect) -> usize {
    layout(area).playlist_inner.height as usize
}

/// Render the whole frame. `scroll` is the index of the first visible row.
pub fn draw(f: &mut Frame, app: &App, playback: &PlaybackInfo, scroll: usize) {
    let regions = layout(f.area());
    draw_now_playing(f, regions.now_playing, app, playback);
    draw_playlist(f, regions.playlist, app, scroll);
    draw_status(f, regions.status, app, playback);
}

fn draw_now_playing(f: &mut Frame, area: Rect, app: &App, playback: &PlaybackInfo) {
    let block = Block::default().borders(Borders::ALL).title(" vinilo ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let title_line = match &app.current {
        Some(song) => Line::from(vec![
            Span::styled(song.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" - "),
            Span::raw(song.artist.clone()),
        ]),
        None => Line::from("Nothing playing".dim()),
    };
    f.render_widget(Paragraph::new(title_line), rows[0]);

    // Prefer the decoded duration; fall back to the server's display string.
    let total = match playback.duration {
        Some(d) => format_duration(d),
        None => app
            .current
            .as_ref()
            .map(|s| s.duration.clone())
            .unwrap_or_else(|| "0:00".to_string()),
    };
    let time_line = format!(
        "{} / {}   {}   {}",
        format_duration(playback.position),
        total,
        state_label(playback.state),
        volume_label(playback.volume, playback.muted),
    );
    f.render_widget(Paragraph::new(time_line), rows[1]);

    let ratio = match playback.duration {
        Some(d) if !d.is_zero() => {
            (playback.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    };
    let gauge = Gauge::default().ratio(ratio).label("");
    f.render_widget(gauge, rows[2]);
}

fn draw_playlist(f: &mut Frame, area: Rect, app: &App, scroll: usize) {
    let title = format!(" playlist - {} songs ", app.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.is_empty() {
        let placeholder = Paragraph::new("Playlist is empty. Press 'u' to upload songs.")
            .block(block)
            .dim();
        f.render_widget(placeholder, area);
        return;
    }

    let height = area.height.saturating_sub(2) as usize;
    let songs = app.rendered_songs();

    let items: Vec<ListItem> = songs
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, song)| {
            let marker = if app.is_current(&song.id) { "▶ " } else { "  " };
            let text = format!(
                "{marker}{:>2}. {} - {}  [{}]",
                i + 1,
                song.title,
                song.artist,
                song.duration
            );

            let mut style = Style::default();
            if app.is_current(&song.id) {
                style = style.add_modifier(Modifier::BOLD);
            }
            if i == app.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if app.dragging.as_deref() == Some(song.id.as_str()) {
                style = style.add_modifier(Modifier::ITALIC);
            }
            ListItem::new(text).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App, playback: &PlaybackInfo) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let status_line = match &app.prompt {
        Prompt::ConfirmRemove { title, .. } => {
            Line::from(format!("remove '{title}'? (y/n)").bold())
        }
        Prompt::UploadPath { input } => Line::from(format!("upload paths: {input}_")),
        Prompt::None => match &app.status {
            Some(msg) => Line::from(msg.clone()),
            None if playback.state == TransportState::Loading => Line::from("loading...".dim()),
            None => Line::from(""),
        },
    };
    f.render_widget(Paragraph::new(status_line), rows[0]);

    let controls = "[enter] play  [space] pause  [h/l] prev/next  [j/k] move  \
                    [d] remove  [u] upload  [R] refresh  [-/+] volume  [m] mute  [q] quit";
    f.render_widget(Paragraph::new(controls).dim(), rows[1]);
}

fn state_label(state: TransportState) -> &'static str {
    match state {
        TransportState::Idle => "idle",
        TransportState::Loading => "loading",
        TransportState::Playing => "playing",
        TransportState::Paused => "paused",
        TransportState::Errored => "error",
    }
}

/// Textual stand-in for the volume icon tiers: muted, low, high.
fn volume_label(volume: f32, muted: bool) -> String {
    if muted || volume == 0.0 {
        "vol x".to_string()
    } else if volume < 0.5 {
        format!("vol - {:.0}%", volume * 100.0)
    } else {
        format!("vol + {:.0}%", volume * 100.0)
    }
}
