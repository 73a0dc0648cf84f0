mod common;

use common::*;
use flparse::prelude::*;
use pretty_assertions::assert_eq;

fn decode_versioned(version: &str) -> (Project, TextEncoding) {
    let mut w = versioned(1, version);
    let encoding = w.text_encoding();
    w.text(EventId::Title, "Ünïcode title").unwrap();
    (Project::parse(&w.finish()).unwrap(), encoding)
}

#[test]
fn text_width_and_array_sizes_follow_the_version() {
    let cases = [
        ("11.0.0", TextEncoding::Narrow, 105, 199),
        ("11.4.9", TextEncoding::Narrow, 105, 199),
        ("11.5.0", TextEncoding::Wide, 127, 199),
        ("12.3", TextEncoding::Wide, 127, 199),
        ("19.9.9", TextEncoding::Wide, 127, 199),
        ("20.0.0", TextEncoding::Wide, 127, 502),
        ("20.8.4.2576", TextEncoding::Wide, 127, 502),
    ];
    for (version, encoding, inserts, tracks) in cases {
        let (project, written) = decode_versioned(version);
        assert_eq!(written, encoding, "{version}");
        assert_eq!(project.title, "Ünïcode title", "{version}");
        assert_eq!(project.inserts.len(), inserts, "{version}");
        assert_eq!(project.tracks.len(), tracks, "{version}");
        assert_eq!(project.version_string, version);
    }
}

#[test]
fn packed_version_number() {
    let (project, _) = decode_versioned("20.8.4");
    assert_eq!(project.version, (20 << 8) + (8 << 4) + 4);
}

#[test]
fn default_names() {
    let (project, _) = decode_versioned("20.8.4");
    assert_eq!(project.inserts[0].name, "Master");
    assert_eq!(project.inserts[1].name, "Insert 1");
    assert_eq!(project.inserts[126].name, "Insert 126");
    assert_eq!(project.tracks[0].name, "Track 0");
    assert_eq!(project.tracks[501].name, "Track 501");
}

#[test]
fn arrays_are_sized_once() {
    let mut w = versioned(1, "11.0.0");
    w.text(EventId::Version, "20.0.0").unwrap();
    let project = Project::parse(&w.finish()).unwrap();
    assert_eq!(project.inserts.len(), 105);
    assert_eq!(project.tracks.len(), 199);
    assert_eq!(project.version_string, "20.0.0");
}

#[test]
fn unparsable_version_leaves_arrays_unsized() {
    let w = versioned(1, "beta");
    let decoded = lenient(&w.finish());
    assert_eq!(
        kinds(&decoded),
        vec![AnomalyKind::UnparsableVersion("beta".into())]
    );
    assert!(decoded.project.inserts.is_empty());
    assert_eq!(decoded.project.version_string, "beta");
}

#[test]
fn mixer_events_before_the_version_are_fatal() {
    let mut w = writer(1);
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    let err = Project::parse(&w.finish()).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &DecodeErrorKind::OutOfRange(RangeError::Unsized(Collection::Inserts))
    );

    let mut w = writer(1);
    w.data(EventId::PlaylistItems, &playlist_record(0, 20480, 1, 96, 0))
        .unwrap();
    let err = Project::parse(&w.finish()).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &DecodeErrorKind::OutOfRange(RangeError::Unsized(Collection::Tracks))
    );
}
