//! Application model: the playlist store and client-local session state.

use crate::api::{PlaylistResponse, Song};

/// A modal prompt shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Prompt {
    #[default]
    None,
    /// Destructive removals need an explicit yes before any request goes out.
    ConfirmRemove { id: String, title: String },
    /// Free-text entry of file paths to upload.
    UploadPath { input: String },
}

/// The main application model.
///
/// Ordering is two-tier: `songs` is the authoritative copy, replaced
/// wholesale by [`App::apply_refresh`] and nothing else; `rendered` is the
/// projection the list widget shows, which a drag gesture may mutate through
/// [`App::apply_local_order`] while a reorder submission is in flight.
pub struct App {
    songs: Vec<Song>,
    rendered: Vec<String>,
    /// The server-confirmed "now playing" track. Only session code updates
    /// this, and only from server responses.
    pub current: Option<Song>,
    /// Cursor position as an index into the rendered order.
    pub selected: usize,
    /// Id of the row being dragged, if a drag gesture is active.
    pub dragging: Option<String>,
    /// Transient user-visible message (errors, confirmations).
    pub status: Option<String>,
    pub prompt: Prompt,
}

impl App {
    pub fn new() -> Self {
        Self {
            songs: Vec::new(),
            rendered: Vec::new(),
            current: None,
            selected: 0,
            dragging: None,
            status: None,
            prompt: Prompt::None,
        }
    }

    /// Replace the authoritative playlist and selection with the server's.
    ///
    /// The rendered order is rebuilt from scratch here, which also clears
    /// any drift left behind by a failed reorder submission.
    pub fn apply_refresh(&mut self, resp: PlaylistResponse) {
        self.rendered = resp.songs.iter().map(|s| s.id.clone()).collect();
        self.songs = resp.songs;
        self.current = resp.current;
        self.dragging = None;
        self.clamp_selected();
    }

    /// Replace the rendered projection only. Used by the reorder gesture;
    /// the authoritative copy is untouched.
    pub fn apply_local_order(&mut self, order: Vec<String>) {
        self.rendered = order;
        self.clamp_selected();
    }

    /// The authoritative playlist, in server order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Song ids in the order the list currently shows them.
    pub fn rendered(&self) -> &[String] {
        &self.rendered
    }

    /// The songs in rendered order. Ids with no authoritative entry are
    /// skipped; they can only appear transiently between a removal and the
    /// refresh that follows it.
    pub fn rendered_songs(&self) -> Vec<&Song> {
        self.rendered
            .iter()
            .filter_map(|id| self.song_by_id(id))
            .collect()
    }

    pub fn song_by_id(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// First song in rendered order, used by toggle-with-nothing-loaded.
    pub fn first_song(&self) -> Option<&Song> {
        self.rendered.first().and_then(|id| self.song_by_id(id))
    }

    /// The song under the cursor.
    pub fn selected_song(&self) -> Option<&Song> {
        self.rendered.get(self.selected).and_then(|id| self.song_by_id(id))
    }

    /// Whether `id` is the server-confirmed current track.
    pub fn is_current(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|c| c.id == id)
    }

    pub fn cursor_down(&mut self) {
        if self.selected + 1 < self.rendered.len() {
            self.selected += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.clamp_selected();
    }

    pub fn start_drag(&mut self, id: String) {
        self.dragging = Some(id);
    }

    /// Clear the drag gesture. Called on both drop and cancel; a gesture
    /// never outlives this.
    pub fn end_drag(&mut self) -> Option<String> {
        self.dragging.take()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    fn clamp_selected(&mut self) {
        if self.rendered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rendered.len() {
            self.selected = self.rendered.len() - 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
