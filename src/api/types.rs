//! Wire types for the playlist server API.

use serde::{Deserialize, Serialize};

/// A track as the server reports it.
///
/// `duration` is preformatted by the server (`M:SS`); `filename` and
/// `album_art` are server-relative names resolved through
/// [`super::ServerClient::audio_url`] and [`super::ServerClient::cover_url`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub filename: String,
    #[serde(default)]
    pub album_art: Option<String>,
}

/// Response to `GET /api/songs`: the full ordered playlist plus the
/// server-side current selection.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub songs: Vec<Song>,
    #[serde(default)]
    pub current: Option<Song>,
}

/// Response to play/next/previous. `success: false` means there is nothing
/// to navigate to (empty playlist or unknown id); `song` is absent then.
#[derive(Debug, Clone, Deserialize)]
pub struct SongResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub song: Option<Song>,
}

/// One entry of a reorder submission: `position` is the zero-based slot of
/// `song_id` in the new canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    #[serde(rename = "songId")]
    pub song_id: String,
    pub position: usize,
}

/// Body of `POST /api/reorder`: the full new order, never a delta.
#[derive(Debug, Clone, Serialize)]
pub struct ReorderRequest {
    pub order: Vec<OrderEntry>,
}

/// Response to a single-file upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to `DELETE /api/remove/<id>`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveResponse {
    #[serde(default)]
    pub success: bool,
}
