use super::*;
use crate::api::SongResponse;

fn song(id: &str) -> Song {
    Song {
        id: id.into(),
        title: format!("Title {id}"),
        artist: "Artist".into(),
        duration: "2:10".into(),
        filename: format!("{id}.mp3"),
        album_art: None,
    }
}

#[test]
fn no_success_response_produces_no_outcome() {
    // Empty playlist and at-boundary responses look the same on the wire.
    let resp = SongResponse {
        success: false,
        song: None,
    };
    assert!(navigation_outcome(resp, true).is_none());
}

#[test]
fn success_without_song_is_treated_as_no_outcome() {
    let resp = SongResponse {
        success: true,
        song: None,
    };
    assert!(navigation_outcome(resp, true).is_none());
}

#[test]
fn outcome_resumes_only_when_session_was_playing() {
    let resp = SongResponse {
        success: true,
        song: Some(song("a")),
    };
    let outcome = navigation_outcome(resp.clone(), true).unwrap();
    assert!(outcome.resume);
    assert_eq!(outcome.song.id, "a");

    let outcome = navigation_outcome(resp, false).unwrap();
    assert!(!outcome.resume);
}

#[test]
fn ended_at_final_track_leaves_selection_untouched() {
    // The server answers a next request at the end of a non-wrapping order
    // with success: false. No outcome means the caller makes no engine call
    // and the selection stays what it was.
    let mut app = App::new();
    app.current = Some(song("last"));

    let resp = SongResponse {
        success: false,
        song: None,
    };
    if let Some(_outcome) = navigation_outcome(resp, true) {
        panic!("no-success response must not produce an outcome");
    }

    assert_eq!(app.current.as_ref().unwrap().id, "last");
}
