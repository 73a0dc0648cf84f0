mod common;

use common::*;
use flparse::prelude::*;
use pretty_assertions::assert_eq;

fn envelope(attack: u32) -> Vec<u8> {
    let mut payload = vec![EnvLfoFlags::LFO_TEMPO.bits(), 0, 0, 0];
    let words: [u32; 12] = [1, 100, attack, 20000, 30000, 50, 20000, 0, 100, 20000, 0, 32950];
    for word in words {
        payload.extend_from_slice(&word.to_le_bytes());
    }
    payload.push(1);
    for tension in [0i32, -64, 64] {
        payload.extend_from_slice(&tension.to_le_bytes());
    }
    payload
}

#[test]
fn channel_identity() {
    let mut w = versioned(3, "20.8.4");
    w.word(EventId::NewChannel, 1).unwrap();
    w.byte(EventId::ChannelType, 2).unwrap();
    w.text(EventId::PluginDefaultName, "Sytrus").unwrap();
    w.text(EventId::PluginName, "Lead").unwrap();
    w.dword(EventId::Color, 0x0000_FF00).unwrap();
    w.dword(EventId::PluginIcon, 12).unwrap();
    w.dword(EventId::ChannelFilterNumber, 2).unwrap();
    w.word(EventId::NewChannel, 2).unwrap();
    w.text(EventId::SampleFileName, "%FLStudioFactoryData%/kick.wav")
        .unwrap();

    let project = Project::parse(&w.finish()).unwrap();
    let lead = &project.channels[1];
    assert_eq!(lead.kind, ChannelKind::Plugin);
    assert_eq!(lead.name, "Lead");
    assert_eq!(lead.generator_name(), Some("Sytrus"));
    assert_eq!(lead.color, Color::rgb(0, 0xFF, 0));
    assert_eq!(lead.icon, 12);
    assert!(lead.filters.contains(&2));

    let kick = project.channels[2].data.as_generator().unwrap();
    assert_eq!(kick.name, "Sampler");
    assert_eq!(kick.sample.file_name, "%FLStudioFactoryData%/kick.wav");
    assert_eq!(project.channels[0], Channel::new(0));
}

#[test]
fn generator_parameters() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    let mut basic = 3200u32.to_le_bytes().to_vec();
    basic.extend_from_slice(&8000u32.to_le_bytes());
    basic.extend_from_slice(&(-200i32).to_le_bytes());
    w.data(EventId::BasicChannelParams, &basic).unwrap();
    let mut polyphony = 8u32.to_le_bytes().to_vec();
    polyphony.extend_from_slice(&500u32.to_le_bytes());
    polyphony.push(PolyphonyFlags::MONO.bits());
    w.data(EventId::ChannelPolyphony, &polyphony).unwrap();
    w.dword(EventId::MiddleNote, 51).unwrap();
    w.dword(EventId::CutCutBy, 0x0002_0001).unwrap();
    w.data(EventId::EnvelopeLfoParams, &envelope(1000)).unwrap();
    w.data(EventId::EnvelopeLfoParams, &envelope(2000)).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty(), "{:?}", decoded.anomalies);
    let generator = decoded.project.channels[0].data.as_generator().unwrap();
    assert_eq!(generator.mix.pan, 3200);
    assert_eq!(generator.mix.volume, 8000);
    assert_eq!(generator.mix.pitch, -200);
    assert_eq!(generator.polyphony.max, 8);
    assert_eq!(generator.polyphony.flags, PolyphonyFlags::MONO);
    assert_eq!(generator.base_note, 60);
    assert_eq!((generator.group_cut, generator.group_cut_by), (1, 2));

    let [first, second, third, ..] = &generator.envelopes;
    assert_eq!(first.attack, 1000);
    assert_eq!(first.flags, EnvLfoFlags::LFO_TEMPO);
    assert_eq!(first.decay_tension, -64);
    assert_eq!(second.attack, 2000);
    assert_eq!(second.flags, EnvLfoFlags::empty());
    assert_eq!(third, &EnvelopeLfo::default());
}

#[test]
fn sixth_envelope_dangles() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    for _ in 0..6 {
        w.data(EventId::EnvelopeLfoParams, &envelope(1)).unwrap();
    }
    let decoded = lenient(&w.finish());
    assert_eq!(
        kinds(&decoded),
        vec![AnomalyKind::Dangling(Reference::EnvelopeSlot(5))]
    );
}

#[test]
fn short_payload_leaves_fields_untouched() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.data(EventId::BasicChannelParams, &[1, 2, 3, 4, 5]).unwrap();

    let decoded = lenient(&w.finish());
    assert_eq!(kinds(&decoded), vec![AnomalyKind::ShortPayload(5)]);
    let generator = decoded.project.channels[0].data.as_generator().unwrap();
    assert_eq!(generator.mix, Mix::default());
}

#[test]
fn generator_events_skip_other_kinds() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.byte(EventId::ChannelType, 5).unwrap();
    w.dword(EventId::MiddleNote, 51).unwrap();
    w.text(EventId::SampleFileName, "ignored.wav").unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty());
    let channel = &decoded.project.channels[0];
    assert_eq!(channel.data, ChannelData::Automation(AutomationData::default()));
}

#[test]
fn automation_targets() {
    let mut w = versioned(4, "20.8.4");
    let mut records = automation_record(0, 3, 1);
    records.extend(automation_record(1, 0x8000 | 7, 2));
    records.extend(automation_record(2, 0, 5));
    records.extend(automation_record(3, 0, AutomationTarget::slot_destination(3, 2)));
    records.extend(automation_record(3, 0, 4));
    records.extend(automation_record(3, 0, AutomationTarget::slot_destination(3, 12)));
    w.data(EventId::AutomationChannels, &records).unwrap();

    let decoded = lenient(&w.finish());
    assert_eq!(
        kinds(&decoded),
        vec![
            AnomalyKind::Dangling(Reference::Channel(4)),
            AnomalyKind::Dangling(Reference::Slot {
                insert: 3,
                slot: 12
            }),
        ]
    );
    let targets: Vec<_> = decoded
        .project
        .automation_channels()
        .map(|(channel, data)| (channel.id, data.target, data.parameter))
        .collect();
    assert_eq!(
        targets,
        vec![
            (
                0,
                AutomationTarget::Channel {
                    channel: 1,
                    vst_parameter: false
                },
                3
            ),
            (
                1,
                AutomationTarget::Channel {
                    channel: 2,
                    vst_parameter: true
                },
                7
            ),
            (2, AutomationTarget::Tempo, 0),
            (3, AutomationTarget::InsertSlot { insert: 3, slot: 2 }, 0),
        ]
    );
}

#[test]
fn automation_keyframes() {
    let mut payload = vec![0; 17];
    payload.extend_from_slice(&2u32.to_le_bytes());
    for (position, value) in [(0.0f64, 0.25f64), (4.0, 1.0)] {
        payload.extend_from_slice(&position.to_le_bytes());
        payload.extend_from_slice(&value.to_le_bytes());
        payload.extend_from_slice(&0.5f32.to_le_bytes());
        payload.extend_from_slice(&[0; 4]);
    }

    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.byte(EventId::ChannelType, 5).unwrap();
    w.data(EventId::AutomationData, &payload).unwrap();

    let project = Project::parse(&w.finish()).unwrap();
    let automation = project.channels[0].data.as_automation().unwrap();
    assert_eq!(
        automation.keyframes,
        vec![
            AutomationKeyframe {
                position: 0,
                value: 0.25,
                tension: 0.5
            },
            AutomationKeyframe {
                position: 4 * i64::from(PPQ),
                value: 1.0,
                tension: 0.5
            },
        ]
    );
}

#[test]
fn unsupported_plugin_kind_keeps_raw_settings() {
    let mut blob = 10i32.to_le_bytes().to_vec();
    blob.extend_from_slice(&[1, 2, 3, 4]);

    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.data(EventId::PluginParams, &blob).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty());
    let generator = decoded.project.channels[0].data.as_generator().unwrap();
    assert_eq!(generator.plugin, None);
    assert_eq!(generator.plugin_settings.as_deref(), Some(blob.as_slice()));
}

#[test]
fn malformed_plugin_is_an_anomaly() {
    let mut blob = flparse::plugin::VST_WRAPPER_KIND.to_le_bytes().to_vec();
    blob.extend_from_slice(&54i32.to_le_bytes());
    blob.extend_from_slice(&(-1i64).to_le_bytes());

    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.data(EventId::PluginParams, &blob).unwrap();

    let decoded = lenient(&w.finish());
    assert!(matches!(
        kinds(&decoded).as_slice(),
        [AnomalyKind::MalformedPlugin(PluginError::Length { length: -1, .. })]
    ));
    assert_eq!(decoded.project.channels[0].plugin(), None);
}

#[test]
fn pattern_notes() {
    let note = Note {
        position: 96,
        length: 48,
        key: 60,
        velocity: 100,
        pan: 64,
        ..Note::default()
    };
    let mut records = flparse::writer::note_record(1, &note).to_vec();
    records.extend(flparse::writer::note_record(9, &note));

    let mut w = versioned(2, "20.8.4");
    w.word(EventId::NewPattern, 2).unwrap();
    w.text(EventId::PatternName, "Hook").unwrap();
    w.data(EventId::PatternNotes, &records).unwrap();

    let decoded = lenient(&w.finish());
    assert_eq!(
        kinds(&decoded),
        vec![AnomalyKind::Dangling(Reference::Channel(9))]
    );
    let patterns = &decoded.project.patterns;
    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[1].id, 2);
    assert_eq!(patterns[1].name, "Hook");
    assert_eq!(patterns[1].notes_for(1), &[note]);
    assert_eq!(patterns[1].note_count(), 1);
    assert!(patterns[0].notes.is_empty());
}

fn tracking(mid: u32) -> Vec<u8> {
    let mut payload = mid.to_le_bytes().to_vec();
    for value in [-5i32, 3, 7] {
        payload.extend_from_slice(&value.to_le_bytes());
    }
    payload
}

#[test]
fn tracking_fills_velocity_then_key() {
    let mut w = versioned(2, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.data(EventId::ChannelTracking, &tracking(11)).unwrap();
    w.data(EventId::ChannelTracking, &tracking(22)).unwrap();
    w.data(EventId::ChannelTracking, &tracking(33)).unwrap();
    w.word(EventId::NewChannel, 1).unwrap();
    w.data(EventId::ChannelTracking, &tracking(44)).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty(), "{:?}", decoded.anomalies);
    let first = decoded.project.channels[0].data.as_generator().unwrap();
    assert_eq!((first.tracking[0].mid, first.tracking[1].mid), (11, 33));
    assert_eq!(first.tracking[0].pan, -5);
    assert_eq!((first.tracking[0].mod_x, first.tracking[0].mod_y), (3, 7));

    let second = decoded.project.channels[1].data.as_generator().unwrap();
    assert_eq!((second.tracking[0].mid, second.tracking[1].mid), (44, 60));
}

#[test]
fn delay_and_its_mod_words() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.dword(EventId::DelayModXY, 0x0002_0001).unwrap();
    let mut delay = Vec::new();
    for value in [25600i32, -100, 1200, 4, 144] {
        delay.extend_from_slice(&value.to_le_bytes());
    }
    w.data(EventId::ChannelDelay, &delay).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty(), "{:?}", decoded.anomalies);
    let generator = decoded.project.channels[0].data.as_generator().unwrap();
    assert_eq!(
        generator.delay,
        Delay {
            feedback: 25600,
            pan: -100,
            pitch_shift: 1200,
            echoes: 4,
            time: 144,
            mod_x: 2,
            mod_y: 1,
        }
    );
}

fn level_offsets() -> Vec<u8> {
    let mut payload = Vec::new();
    for value in [10u32, 6400, 99, 30, 40] {
        payload.extend_from_slice(&value.to_le_bytes());
    }
    payload
}

#[test]
fn level_offsets_skip_the_unused_word() {
    let mut w = versioned(1, "20.8.4");
    w.word(EventId::NewChannel, 0).unwrap();
    w.data(EventId::ChannelLevelOffsets, &level_offsets()).unwrap();

    let project = Project::parse(&w.finish()).unwrap();
    let generator = project.channels[0].data.as_generator().unwrap();
    assert_eq!(
        generator.levels,
        Levels {
            pan_offset: 10,
            volume_multiplier: 6400,
            mod_x: 30,
            mod_y: 40,
        }
    );
}

#[test]
fn layer_children_and_flags() {
    let mut w = versioned(3, "20.8.4");
    w.word(EventId::NewChannel, 2).unwrap();
    w.byte(EventId::ChannelType, 3).unwrap();
    w.word(EventId::LayerParentOf, 0).unwrap();
    w.word(EventId::LayerParentOf, 1).unwrap();
    w.word(EventId::LayerParentOf, 0).unwrap();
    w.dword(EventId::LayerFlags, 5).unwrap();
    w.data(EventId::ChannelLevelOffsets, &level_offsets()).unwrap();
    w.word(EventId::NewChannel, 0).unwrap();
    w.word(EventId::LayerParentOf, 1).unwrap();
    w.dword(EventId::LayerFlags, 9).unwrap();

    let decoded = lenient(&w.finish());
    assert!(decoded.anomalies.is_empty(), "{:?}", decoded.anomalies);
    let project = decoded.project;
    assert_eq!(project.channels[2].kind, ChannelKind::Layer);
    let layer = project.channels[2].data.as_layer().unwrap();
    assert_eq!(layer.children.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(layer.flags, 5);
    assert_eq!(layer.levels.volume_multiplier, 6400);
    assert!(project.channels[0].data.as_layer().is_none());
}
