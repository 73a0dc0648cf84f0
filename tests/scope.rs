mod common;

use common::*;
use flparse::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn shared_ids_switch_target_at_the_first_insert() {
    let mut w = versioned(2, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.byte(EventId::ChannelEnabled, 0).unwrap();
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.byte(EventId::ChannelEnabled, 1).unwrap();
    w.word(EventId::CurrentSlotNumber, 3).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty(), "{:?}", decoded.anomalies);
    let project = decoded.project;
    assert!(!project.channels[0].enabled);
    assert!(project.channels[1].enabled);
    assert!(project.inserts[0].slots[3].enabled);
    assert!(!project.inserts[0].slots[0].enabled);
}

#[test]
fn channel_only_events_are_ignored_in_mixer_scope() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.byte(EventId::ChannelType, 5).unwrap();
    w.word(EventId::NewChannel, 0).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty());
    assert_eq!(decoded.project.channels[0].kind, ChannelKind::Sampler);
}

#[test]
fn inserts_are_selected_in_order() {
    let mut w = versioned(1, "20.8.4");
    for flags in [0, InsertFlags::SOLO.bits(), InsertFlags::LOCK.bits()] {
        w.data(EventId::InsertFlags, &insert_flags(flags)).unwrap();
    }
    w.text(EventId::InsertName, "Drums").unwrap();
    w.dword(EventId::InsertColor, 0x00FF_0000).unwrap();

    let project = Project::parse(&w.finish()).unwrap();
    assert_eq!(project.inserts[1].flags, InsertFlags::SOLO);
    assert_eq!(project.inserts[2].flags, InsertFlags::LOCK);
    assert_eq!(project.inserts[2].name, "Drums");
    assert_eq!(project.inserts[2].color, Color::rgb(0, 0, 0xFF));
    assert_eq!(project.inserts[0].name, "Master");
}

#[test]
fn slot_events_assemble_a_slot() {
    let plugin = Plugin {
        name: "Pro-Q 3".into(),
        vendor_name: "FabFilter".into(),
        ..Plugin::default()
    };

    let mut w = versioned(1, "20.8.4");
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.text(EventId::PluginDefaultName, "Fruity Wrapper").unwrap();
    w.data(EventId::PluginParams, &plugin.to_blob()).unwrap();
    w.text(EventId::PluginName, "EQ").unwrap();
    w.dword(EventId::PluginIcon, 7).unwrap();
    w.word(EventId::CurrentSlotNumber, 0).unwrap();

    let project = Project::parse(&w.finish()).unwrap();
    let slot = &project.inserts[1].slots[0];
    assert_eq!(slot.default_name, "Fruity Wrapper");
    assert_eq!(slot.name, "EQ");
    assert_eq!(slot.icon, 7);
    assert_eq!(slot.plugin, Some(plugin));
    assert!(project.inserts[0].slots.iter().all(InsertSlot::is_empty));
}

#[test]
fn dangling_slot_and_insert() {
    let mut w = versioned(1, "11.0.0");
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.text(EventId::PluginName, "Limiter").unwrap();
    w.word(EventId::CurrentSlotNumber, 10).unwrap();
    for _ in 1..=105 {
        w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    }

    let decoded = lenient(&w.finish());
    assert_eq!(
        kinds(&decoded),
        vec![
            AnomalyKind::Dangling(Reference::Slot {
                insert: 0,
                slot: 10
            }),
            AnomalyKind::Dangling(Reference::Insert(105)),
        ]
    );
}

#[test]
fn slot_without_a_number_is_dropped() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.byte(EventId::ChannelEnabled, 0).unwrap();
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.byte(EventId::ChannelEnabled, 1).unwrap();
    w.text(EventId::PluginName, "Limiter").unwrap();

    let decoded = lenient(&w.finish());
    assert_eq!(kinds(&decoded), vec![AnomalyKind::UnplacedSlot]);
    assert!(!decoded.project.channels[0].enabled);
    assert!(
        decoded
            .project
            .inserts
            .iter()
            .flat_map(|insert| &insert.slots)
            .all(|slot| !slot.enabled && slot.name.is_empty())
    );
}

#[test]
fn next_insert_drops_an_unplaced_slot() {
    let mut w = versioned(1, "20.8.4");
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.byte(EventId::ChannelEnabled, 1).unwrap();
    w.text(EventId::PluginName, "Limiter").unwrap();
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.word(EventId::CurrentSlotNumber, 0).unwrap();

    let decoded = lenient(&w.finish());
    assert_eq!(kinds(&decoded), vec![AnomalyKind::UnplacedSlot]);
    assert_eq!(decoded.anomalies[0].event, EventId::InsertFlags.byte());
    assert_eq!(decoded.project.inserts[1].slots[0], InsertSlot::default());
}

#[test]
fn unplaced_slot_is_not_fatal_in_strict_mode() {
    let mut w = versioned(1, "20.8.4");
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.dword(EventId::PluginIcon, 4).unwrap();
    let options = DecodeOptions::new().strict(true);

    let decoded = decode_with_diagnostics(&w.finish(), &options).unwrap();
    assert_eq!(kinds(&decoded), vec![AnomalyKind::UnplacedSlot]);
}

#[test]
fn insert_parameters() {
    let mut records = Vec::new();
    for record in [
        insert_param(0x00, 2, 4, 1),
        insert_param(0x01, 2, 4, 80),
        insert_param(0x02, 2, 4, 64),
        insert_param(0xC0, 3, 0, 9000),
        insert_param(0xD0, 3, 0, -150),
        insert_param(0xD9, 3, 0, 40000),
        insert_param(0xE2, 3, 0, 12000),
        insert_param(0x40 + 5, 1, 0, 99),
        insert_param(0x40 + 105, 1, 0, 7),
        insert_param(0x40 + 106, 1, 0, 7),
        insert_param(0x00, 2, 10, 1),
        insert_param(0xC0, 120, 0, 1),
    ] {
        records.extend_from_slice(&record);
    }
    let mut w = versioned(1, "11.0.0");
    w.data(EventId::InsertParams, &records).unwrap();

    let decoded = lenient(&w.finish());
    assert_eq!(
        kinds(&decoded),
        vec![
            AnomalyKind::Dangling(Reference::SendTarget {
                insert: 1,
                target: 105
            }),
            AnomalyKind::Dangling(Reference::Slot {
                insert: 2,
                slot: 10
            }),
            AnomalyKind::Dangling(Reference::Insert(120)),
        ]
    );

    let inserts = &decoded.project.inserts;
    let slot = &inserts[2].slots[4];
    assert!(slot.enabled);
    assert_eq!((slot.volume, slot.dry_wet), (80, 64));
    assert_eq!(inserts[3].volume, 9000);
    assert_eq!(inserts[3].eq[0].level, -150);
    assert_eq!(inserts[3].eq[1].frequency, 40000);
    assert_eq!(inserts[3].eq[2].width, 12000);
    assert_eq!(inserts[1].route_volumes.len(), 105);
    assert_eq!(inserts[1].route_volumes[5], 99);
    assert_eq!(inserts[1].route_volumes[104], DEFAULT_INSERT_VOLUME);
    assert_eq!(inserts[1].volume, DEFAULT_INSERT_VOLUME);
}

#[test]
fn insert_routes() {
    let mut routes = vec![0u8; 110];
    routes[2] = 1;
    routes[4] = 1;
    routes[108] = 1;

    let mut w = versioned(1, "11.0.0");
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.data(EventId::InsertFlags, &insert_flags(0)).unwrap();
    w.data(EventId::InsertRoutes, &routes).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty(), "{:?}", decoded.anomalies);
    let inserts = &decoded.project.inserts;
    assert_eq!(inserts[1].routes.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
    assert!(inserts[0].routes.is_empty());
}
