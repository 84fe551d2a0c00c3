use super::*;

fn client() -> ServerClient {
    ServerClient::new("http://localhost:5000").unwrap()
}

#[test]
fn audio_and_cover_urls_follow_the_server_layout() {
    let c = client();
    assert_eq!(
        c.audio_url("song.mp3").unwrap().as_str(),
        "http://localhost:5000/static/uploads/song.mp3"
    );
    assert_eq!(
        c.cover_url("abc123.jpg").unwrap().as_str(),
        "http://localhost:5000/static/uploads/covers/abc123.jpg"
    );
}

#[test]
fn base_url_with_trailing_slash_resolves_the_same() {
    let c = ServerClient::new("http://localhost:5000/").unwrap();
    assert_eq!(
        c.audio_url("a.ogg").unwrap().as_str(),
        "http://localhost:5000/static/uploads/a.ogg"
    );
}

#[test]
fn bad_base_url_is_rejected() {
    assert!(ServerClient::new("not a url").is_err());
}

#[test]
fn reorder_request_serializes_with_song_id_key() {
    let req = ReorderRequest {
        order: vec![
            OrderEntry {
                song_id: "b".into(),
                position: 0,
            },
            OrderEntry {
                song_id: "a".into(),
                position: 1,
            },
        ],
    };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "order": [
                { "songId": "b", "position": 0 },
                { "songId": "a", "position": 1 },
            ]
        })
    );
}

#[test]
fn playlist_response_tolerates_extra_fields_and_null_current() {
    let body = r#"{
        "songs": [
            { "id": "1", "title": "T", "artist": "A", "duration": "3:05",
              "filename": "t.mp3", "album_art": null }
        ],
        "current": null,
        "total": 1
    }"#;
    let resp: PlaylistResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.songs.len(), 1);
    assert_eq!(resp.songs[0].duration, "3:05");
    assert!(resp.songs[0].album_art.is_none());
    assert!(resp.current.is_none());
}

#[test]
fn song_response_defaults_to_no_success_without_song() {
    let resp: SongResponse =
        serde_json::from_str(r#"{ "success": false, "message": "empty" }"#).unwrap();
    assert!(!resp.success);
    assert!(resp.song.is_none());

    let resp: SongResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn upload_response_carries_server_error_message() {
    let resp: UploadResponse =
        serde_json::from_str(r#"{ "error": "invalid file format" }"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("invalid file format"));
}
