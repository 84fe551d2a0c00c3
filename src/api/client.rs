use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, multipart};
use thiserror::Error;

use super::types::{
    OrderEntry, PlaylistResponse, RemoveResponse, ReorderRequest, SongResponse, UploadResponse,
};

/// Errors surfaced by [`ServerClient`].
///
/// Call sites treat any of these as "the operation did not happen": they
/// get logged and reported, never propagated as a crash.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid url: {0}")]
    Url(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Blocking HTTP client for the playlist server.
pub struct ServerClient {
    http: Client,
    base: Url,
}

impl ServerClient {
    /// Build a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized).map_err(|e| ApiError::Url(e.to_string()))?;

        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Url(e.to_string()))
    }

    /// The URL the audio bytes for `filename` are served from.
    pub fn audio_url(&self, filename: &str) -> Result<Url, ApiError> {
        self.endpoint(&format!("static/uploads/{filename}"))
    }

    /// The URL the cover art image `name` is served from.
    pub fn cover_url(&self, name: &str) -> Result<Url, ApiError> {
        self.endpoint(&format!("static/uploads/covers/{name}"))
    }

    /// Fetch the full ordered playlist and the current selection.
    pub fn songs(&self) -> Result<PlaylistResponse, ApiError> {
        let resp = self.http.get(self.endpoint("api/songs")?).send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json()?)
    }

    /// Ask the server to make `id` the current track.
    pub fn play(&self, id: &str) -> Result<SongResponse, ApiError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("api/play/{id}"))?)
            .send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json()?)
    }

    /// Ask the server for the next track in its order.
    pub fn next(&self) -> Result<SongResponse, ApiError> {
        let resp = self.http.get(self.endpoint("api/next")?).send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json()?)
    }

    /// Ask the server for the previous track in its order.
    pub fn previous(&self) -> Result<SongResponse, ApiError> {
        let resp = self.http.get(self.endpoint("api/prev")?).send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json()?)
    }

    /// Submit a full new canonical order. The server acknowledges with a
    /// success status and no required body.
    pub fn reorder(&self, order: Vec<OrderEntry>) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.endpoint("api/reorder")?)
            .json(&ReorderRequest { order })
            .send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }

    /// Upload a single audio file as a multipart form.
    ///
    /// Rejections (bad format, missing file) come back as a JSON body with
    /// `error` set on a non-success status; that body is still parsed so the
    /// caller can report the server's message.
    pub fn upload(&self, path: &Path) -> Result<UploadResponse, ApiError> {
        let form = multipart::Form::new().file("file", path)?;
        let resp = self
            .http
            .post(self.endpoint("api/upload")?)
            .multipart(form)
            .send()?;

        let status = resp.status();
        match resp.json::<UploadResponse>() {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(ApiError::Status(status)),
            Err(e) => Err(ApiError::Transport(e)),
        }
    }

    /// Delete the track with the given id.
    pub fn remove(&self, id: &str) -> Result<RemoveResponse, ApiError> {
        let resp = self
            .http
            .delete(self.endpoint(&format!("api/remove/{id}"))?)
            .send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json()?)
    }
}
