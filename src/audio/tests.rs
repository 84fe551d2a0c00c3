use std::time::Duration;

use super::types::{TransportState, VolumeState, seek_target};

#[test]
fn toggle_mute_restores_the_premute_level_exactly() {
    let mut v = VolumeState::new(0.7);
    assert_eq!(v.level(), 0.7);
    assert!(!v.muted());

    v.toggle_mute();
    assert_eq!(v.level(), 0.0);
    assert!(v.muted());

    v.toggle_mute();
    assert_eq!(v.level(), 0.7);
    assert!(!v.muted());
}

#[test]
fn volume_zero_counts_as_already_muted() {
    let mut v = VolumeState::new(0.4);
    v.set(0.0);
    assert!(v.muted());

    // Unmuting from an explicit zero goes back to the last non-zero level.
    v.toggle_mute();
    assert_eq!(v.level(), 0.4);
}

#[test]
fn set_volume_clamps_to_unit_range() {
    let mut v = VolumeState::new(0.5);
    assert_eq!(v.set(1.7), 1.0);
    assert_eq!(v.set(-0.3), 0.0);
}

#[test]
fn initial_zero_volume_has_a_sane_restore_point() {
    let mut v = VolumeState::new(0.0);
    assert!(v.muted());
    v.toggle_mute();
    assert!(v.level() > 0.0);
}

#[test]
fn seek_with_unknown_duration_yields_no_target() {
    assert_eq!(seek_target(None, 0.5), None);
    assert_eq!(seek_target(None, 0.0), None);
}

#[test]
fn seek_fraction_is_clamped_to_the_track() {
    let d = Duration::from_secs(100);
    assert_eq!(seek_target(Some(d), 0.25), Some(Duration::from_secs(25)));
    assert_eq!(seek_target(Some(d), 1.5), Some(d));
    assert_eq!(seek_target(Some(d), -0.5), Some(Duration::ZERO));
}

#[test]
fn transport_state_predicates() {
    assert!(TransportState::Playing.is_playing());
    assert!(!TransportState::Paused.is_playing());

    assert!(TransportState::Playing.has_media());
    assert!(TransportState::Paused.has_media());
    assert!(!TransportState::Idle.has_media());
    assert!(!TransportState::Loading.has_media());
    assert!(!TransportState::Errored.has_media());
}
