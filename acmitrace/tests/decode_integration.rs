//! Integration tests for the full decode pipeline.
//!
//! These tests run whole recordings through the decoder and verify the
//! resulting object model end to end:
//! - Reference setup → recentered position decoding
//! - Elapsed-time directives → event and sample timestamps
//! - Weapon creation → launcher attribution
//!
//! Run with: `cargo test --test decode_integration`

use chrono::{DateTime, Duration};

use acmitrace::{fallback_epoch, Decoder, EventKind, MemoryRecording, PropertyValue};

// ============================================================================
// Test Helpers
// ============================================================================

/// Decode a recording from literal lines, failing the test on any error.
fn decode(lines: &[&str]) -> Decoder {
    let source = MemoryRecording::from_lines(lines);
    let mut decoder = Decoder::new();
    decoder.decode(&source).expect("recording should decode cleanly");
    decoder
}

/// The fallback epoch plus an offset in seconds.
fn offset_secs(secs: i64) -> DateTime<chrono::Utc> {
    fallback_epoch() + Duration::seconds(secs)
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_minimal_sortie_with_weapon_attribution() {
    let decoder = decode(&[
        "0,ReferenceLongitude=10.0,ReferenceLatitude=50.0",
        "#0",
        "100,T=0.001|0.001|1000|,Type=Air+FixedWing,Pilot=Pilot1",
        "#5",
        "200,T=0.002|0.0015|500|,Type=Weapon+Missile",
    ]);

    // Entity 100: one Created event at offset 0
    let aircraft = decoder.object(0x100).expect("aircraft registered");
    let created = aircraft.events_by_kind(EventKind::Created);
    assert_eq!(created.len(), 1);
    assert_eq!(created.times(), vec![offset_secs(0)]);

    // Pose at offset 0 is recentered onto the reference coordinates
    let pose = aircraft.position().at(offset_secs(0)).expect("pose recorded");
    assert!((pose.longitude - 10.001).abs() < 1e-9);
    assert!((pose.latitude - 50.001).abs() < 1e-9);
    assert_eq!(pose.altitude, 1000.0);

    // Entity 200 resolves its launcher to entity 100
    let weapon = decoder.object(0x200).expect("weapon registered");
    assert_eq!(weapon.parent(), Some(0x100));
    assert_eq!(
        weapon.events_by_kind(EventKind::Created).times(),
        vec![offset_secs(5)]
    );
}

#[test]
fn test_parent_resolves_to_nearest_of_several_platforms() {
    let decoder = decode(&[
        "0,ReferenceLongitude=0.0,ReferenceLatitude=0.0",
        "#0",
        "1,T=10.0|10.0|8000,Type=Air+FixedWing,Pilot=Far",
        "2,T=20.0|20.0|8000,Type=Air+FixedWing,Pilot=Launcher",
        "3,T=30.0|30.0|8000,Type=Sea+Watercraft",
        "#12",
        "a1,T=20.1|19.9|6000,Type=Weapon+Missile",
    ]);

    let weapon = decoder.object(0xa1).expect("weapon registered");
    assert_eq!(
        weapon.parent(),
        Some(2),
        "weapon created nearest to platform 2 must attribute to it"
    );
}

#[test]
fn test_sparse_updates_accumulate_across_time() {
    let decoder = decode(&[
        "0,ReferenceLongitude=5.0,ReferenceLatitude=45.0",
        "#0",
        "7,T=1.0|1.0|3000|10|5|90,Type=Air+FixedWing",
        "#10",
        "7,T=|||||180",
        "#20",
        "7,T=1.2|1.1|",
    ]);

    let track = decoder.object(7).unwrap().position();

    // At t=10 only yaw changed; everything else carried forward
    let mid = track.at(offset_secs(10)).unwrap();
    assert_eq!(mid.yaw, 180.0);
    assert_eq!(mid.altitude, 3000.0);
    assert!((mid.longitude - 6.0).abs() < 1e-9);

    // At t=20 the position moved but the attitude carried forward
    let late = track.at(offset_secs(20)).unwrap();
    assert!((late.longitude - 6.2).abs() < 1e-9);
    assert!((late.latitude - 46.1).abs() < 1e-9);
    assert_eq!(late.yaw, 180.0);
    assert_eq!(late.roll, 10.0);
}

#[test]
fn test_removal_annotates_without_deleting() {
    let decoder = decode(&[
        "#0",
        "42,Type=Ground+Vehicle,Name=Truck",
        "#30",
        "-42",
        "-ffff", // never registered: no-op
    ]);

    let truck = decoder.object(0x42).expect("removal must not delete");
    assert_eq!(truck.events_by_kind(EventKind::Removed).times(), vec![offset_secs(30)]);
    assert_eq!(truck.property_text("Name"), Some("Truck"));
    assert_eq!(decoder.registry().len(), 1);
}

#[test]
fn test_no_anchor_timestamps_start_at_year_one() {
    let decoder = decode(&["#0", "9,Type=Air+FixedWing"]);

    let expected = "0001-01-01T00:00:00+00:00"
        .parse::<DateTime<chrono::Utc>>()
        .unwrap();
    assert_eq!(
        decoder.object(9).unwrap().created_at(),
        Some(expected),
        "recordings without an absolute anchor count from year one"
    );
}

#[test]
fn test_absolute_anchor_shifts_all_timestamps() {
    let decoder = decode(&[
        "0,ReferenceTime=2011-06-02T05:00:00Z",
        "#90",
        "9,Type=Air+FixedWing",
    ]);

    let expected = "2011-06-02T05:01:30+00:00"
        .parse::<DateTime<chrono::Utc>>()
        .unwrap();
    let entity = decoder.object(9).unwrap();
    assert_eq!(entity.created_at(), Some(expected));
}

#[test]
fn test_query_by_once_recorded_property() {
    let decoder = decode(&[
        "#0",
        "1,Type=Air,Pilot=Alpha",
        "2,Type=Air,Pilot=Beta",
    ]);

    let hits = decoder.objects_by_property("Pilot", &PropertyValue::Text("Beta".into()));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), 2);
}

#[test]
fn test_comments_events_and_noise_do_not_disturb_the_model() {
    let decoder = decode(&[
        "FileType=text/acmi/tacview // header noise, single field",
        "// full-line comment",
        "",
        "0,Title=Clean Run",
        "#0",
        "0,Event=Message|1|engaged", // recognized, not decoded
        "1,Type=Air+FixedWing",
    ]);

    assert_eq!(decoder.registry().len(), 1);
    assert_eq!(
        decoder.object(0).unwrap().property_text("Title"),
        Some("Clean Run")
    );
}
