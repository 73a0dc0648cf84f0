#![doc = r#"
Handlers for data events.

Payloads are parsed into locals first and applied only once the whole
record has been read, so a short payload never leaves half-written state.
Record lists are parsed one record at a time; a record with a dangling
index is skipped and the rest of the list still applies.

```text
note            24 bytes   pos u32  flags u16  chan u8  _ u8  len u32  key u16  _ i16
                           fine u8  _ u8  rel u8  midi u8  pan u8  vel u8  x u8  y u8
insert param    12 bytes   _ u32  param u8  _ u8  address u16  value i32
automation ch.  20 bytes   _ u16  chan u8  _ u32  _ u8  param u16  dest u16  _ u64
playlist item   32 bytes   pos i32  base u16  source u16  len i32  track u16  group u16
                           _ u16  flags u16  _ u32  start [4]  end [4]
keyframe        24 bytes   pos f64  value f64  tension f32  _ u32
```
"#]

use super::{AnomalyKind, Entity, ProjectDecoder, Reference, Scope};
use crate::{
    event::EventId,
    plugin::Plugin,
    project::{
        Arpeggiator, AutomationData, AutomationKeyframe, AutomationTarget, ChannelData, Clip,
        Color, Delay, EnvLfoFlags, EnvelopeLfo, Insert, InsertFlags, InsertParam, LfoShape, Note,
        Performance, PlaylistItem, PolyphonyFlags, SEND_PARAM_BASE, SLOT_COUNT, SaveTimestamp,
        SlotAddress, Tracking,
    },
    reader::{Collection, DecodeResult, Reader},
};

const NOTE_RECORD: usize = 24;
const INSERT_PARAM_RECORD: usize = 12;
const AUTOMATION_CHANNEL_RECORD: usize = 20;
const PLAYLIST_RECORD: usize = 32;
const TRACK_INFO: usize = 22;
const TRACK_INFO_PERFORMANCE: usize = 47;
const MUTED: u16 = 0x2000;
const VST_PARAMETER: u16 = 0x8000;

impl ProjectDecoder<'_> {
    pub(super) fn on_data(&mut self, id: EventId, payload: &[u8], base: usize) -> DecodeResult<()> {
        match id {
            EventId::ChannelDelay => {
                if let Some(delay) = self.parse(payload, base, read_delay)? {
                    self.with_generator(|g| {
                        g.delay = Delay {
                            mod_x: g.delay.mod_x,
                            mod_y: g.delay.mod_y,
                            ..delay
                        }
                    })?;
                }
            }
            EventId::PluginParams => self.on_plugin(payload, base)?,
            EventId::ChannelParams => {
                if let Some(arp) = self.parse(payload, base, read_arpeggiator)? {
                    self.with_generator(|g| g.arpeggiator = arp)?;
                }
            }
            EventId::EnvelopeLfoParams => self.on_envelope(payload, base)?,
            EventId::BasicChannelParams => {
                if let Some((pan, volume, pitch)) = self.parse(payload, base, |r| {
                    Ok((r.read_u32()?, r.read_u32()?, r.read_i32()?))
                })? {
                    self.with_channel(|c| {
                        if let Some(mix) = c.data.mix_mut() {
                            mix.pan = pan;
                            mix.volume = volume;
                            mix.pitch = pitch;
                        }
                    })?;
                }
            }
            EventId::ChannelPolyphony => {
                if let Some((max, slide, flags)) = self.parse(payload, base, |r| {
                    Ok((r.read_u32()?, r.read_u32()?, r.read_u8()?))
                })? {
                    self.with_generator(|g| {
                        g.polyphony.max = max;
                        g.polyphony.slide = slide;
                        g.polyphony.flags = PolyphonyFlags::from_bits_retain(flags);
                    })?;
                }
            }
            EventId::ChannelTracking => {
                if let Some(tracking) = self.parse(payload, base, |r| {
                    Ok(Tracking {
                        mid: r.read_u32()?,
                        pan: r.read_i32()?,
                        mod_x: r.read_i32()?,
                        mod_y: r.read_i32()?,
                    })
                })? {
                    if self.ctx.scope == Scope::Channel {
                        let slot = self.ctx.next_tracking_slot();
                        self.with_generator(|g| g.tracking[slot] = tracking)?;
                    }
                }
            }
            EventId::ChannelLevelOffsets => {
                if let Some([pan, volume, _, x, y]) = self.parse(payload, base, |r| {
                    Ok([r.read_u32()?, r.read_u32()?, r.read_u32()?, r.read_u32()?, r.read_u32()?])
                })? {
                    self.with_channel(|c| {
                        if let Some(levels) = c.data.levels_mut() {
                            levels.pan_offset = pan;
                            levels.volume_multiplier = volume;
                            levels.mod_x = x;
                            levels.mod_y = y;
                        }
                    })?;
                }
            }
            EventId::PatternNotes => self.on_notes(payload, base)?,
            EventId::InsertParams => self.on_insert_params(payload, base)?,
            EventId::AutomationChannels => self.on_automation_channels(payload, base)?,
            EventId::AutomationData => {
                let ppq = f64::from(self.project.ppq);
                if let Some(keyframes) = self.parse(payload, base, |r| read_keyframes(r, ppq))? {
                    self.with_channel(|c| {
                        if let Some(automation) = c.data.as_automation_mut() {
                            automation.keyframes = keyframes;
                        }
                    })?;
                }
            }
            EventId::PlaylistItems => self.on_playlist(payload, base)?,
            EventId::InsertRoutes => self.with_insert(|insert| {
                let count = insert.route_volumes.len();
                for (target, &routed) in payload.iter().enumerate().take(count) {
                    if routed != 0 {
                        insert.routes.insert(target);
                    }
                }
            })?,
            EventId::InsertFlags => self.on_insert_flags(payload, base)?,
            EventId::SaveTimestamp => {
                if let Some((created_days, work_time_days)) =
                    self.parse(payload, base, |r| Ok((r.read_f64()?, r.read_f64()?)))?
                {
                    self.project.timestamp = Some(SaveTimestamp {
                        created_days,
                        work_time_days,
                    });
                }
            }
            EventId::PlaylistTrackInfo => self.on_track_info(payload, base)?,
            _ => self.ignore(id),
        }
        Ok(())
    }

    /// Parse a payload, mapping truncation to a short-payload anomaly.
    fn parse<T>(
        &mut self,
        payload: &[u8],
        base: usize,
        f: impl FnOnce(&mut Reader<'_>) -> DecodeResult<T>,
    ) -> DecodeResult<Option<T>> {
        let parsed = f(&mut Reader::with_base(payload, base));
        self.payload(parsed, payload.len())
    }

    /// Report bytes left over after the last whole record.
    fn trailing(&mut self, reader: &Reader<'_>, length: usize) -> DecodeResult<()> {
        if reader.is_empty() {
            Ok(())
        } else {
            self.report(AnomalyKind::ShortPayload(length))
        }
    }

    fn on_plugin(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        let plugin = match Plugin::parse_at(payload, base) {
            Ok(plugin) => plugin,
            Err(err) => {
                self.report(AnomalyKind::MalformedPlugin(err))?;
                None
            }
        };
        match self.ctx.scope {
            Scope::Channel => self.with_generator(|g| {
                g.plugin_settings = Some(payload.to_vec());
                g.plugin = plugin;
            }),
            Scope::Mixer => {
                let slot = self.pending_slot();
                slot.plugin_settings = Some(payload.to_vec());
                slot.plugin = plugin;
                Ok(())
            }
        }
    }

    fn on_envelope(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        let Some(mut envelope) = self.parse(payload, base, read_envelope)? else {
            return Ok(());
        };
        let slot = self.ctx.envelope;
        // the producer salts the second record's flags with a per-project value
        if slot == 1 {
            envelope.flags = EnvLfoFlags::empty();
        }

        let mut placed = None;
        self.with_generator(|g| placed = Some(g.envelopes.get_mut(slot).map(|e| *e = envelope)))?;
        match placed {
            Some(Some(())) => self.ctx.envelope += 1,
            Some(None) => self.report(Reference::EnvelopeSlot(slot).into())?,
            None => {}
        }
        Ok(())
    }

    fn on_notes(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        let Some(pattern) = self.ctx.pattern else {
            return self.report(Reference::NoSelection(Entity::Pattern).into());
        };
        let mut reader = Reader::with_base(payload, base);
        while reader.remaining() >= NOTE_RECORD {
            let (channel, note) = read_note(&mut reader)?;
            if channel >= self.project.channels.len() {
                self.report(Reference::Channel(channel).into())?;
                continue;
            }
            if let Some(pattern) = self.project.patterns.get_mut(pattern) {
                pattern.notes.entry(channel).or_default().push(note);
            }
        }
        self.trailing(&reader, payload.len())
    }

    fn on_insert_params(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        self.limits(Collection::Inserts)?;
        let mut reader = Reader::with_base(payload, base);
        while reader.remaining() >= INSERT_PARAM_RECORD {
            reader.skip(4)?;
            let param = reader.read_u8()?;
            reader.skip(1)?;
            let address = SlotAddress::unpack(reader.read_u16()?);
            let value = reader.read_i32()?;

            let applied = match self.project.inserts.get_mut(address.insert) {
                Some(insert) => apply_insert_param(insert, param, address, value),
                None => Err(Reference::Insert(address.insert)),
            };
            if let Err(reference) = applied {
                self.report(reference.into())?;
            }
        }
        self.trailing(&reader, payload.len())
    }

    fn on_automation_channels(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        let count = self.project.channels.len();
        let mut reader = Reader::with_base(payload, base);
        while reader.remaining() >= AUTOMATION_CHANNEL_RECORD {
            reader.skip(2)?;
            let channel = usize::from(reader.read_u8()?);
            reader.skip(5)?;
            let param = reader.read_u16()?;
            let destination = reader.read_u16()?;
            reader.skip(8)?;

            let target =
                AutomationTarget::from_destination(destination, param & VST_PARAMETER != 0, count);
            let dangling = match target {
                AutomationTarget::Channel { channel, .. } if channel >= count => {
                    Some(Reference::Channel(channel))
                }
                AutomationTarget::InsertSlot { insert, slot } if slot >= SLOT_COUNT => {
                    Some(Reference::Slot { insert, slot })
                }
                _ => None,
            };
            if let Some(reference) = dangling {
                self.report(reference.into())?;
                continue;
            }

            let Some(automated) = self.project.channels.get_mut(channel) else {
                self.report(Reference::Channel(channel).into())?;
                continue;
            };
            let parameter = param & !VST_PARAMETER;
            match &mut automated.data {
                ChannelData::Automation(automation) => {
                    automation.target = target;
                    automation.parameter = parameter;
                }
                data => {
                    *data = ChannelData::Automation(AutomationData {
                        target,
                        parameter,
                        keyframes: Vec::new(),
                    });
                }
            }
        }
        self.trailing(&reader, payload.len())
    }

    fn on_playlist(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        let limits = self.limits(Collection::Tracks)?;
        let ppq = f32::from(self.project.ppq);
        let mut reader = Reader::with_base(payload, base);
        while reader.remaining() >= PLAYLIST_RECORD {
            let position = reader.read_i32()?;
            let pattern_base = reader.read_u16()?;
            let clip_source = reader.read_u16()?;
            let length = reader.read_i32()?;
            let raw_track = usize::from(reader.read_u16()?);
            let group = reader.read_u16()?;
            reader.skip(2)?;
            let flags = reader.read_u16()?;
            reader.skip(4)?;
            let start = reader.read_exact_size::<4>()?;
            let end = reader.read_exact_size::<4>()?;

            let Some(track) = limits.tracks.checked_sub(raw_track + 1) else {
                self.report(Reference::Track(raw_track).into())?;
                continue;
            };

            let (clip, start_offset, end_offset) = if clip_source <= pattern_base {
                let channel = usize::from(clip_source);
                if channel >= self.project.channels.len() {
                    self.report(Reference::Channel(channel).into())?;
                    continue;
                }
                let scale = |bytes| (f32::from_le_bytes(bytes) * ppq) as u32;
                (Clip::Channel(channel), scale(start), scale(end))
            } else {
                let pattern = usize::from(clip_source - pattern_base - 1);
                if pattern >= self.project.patterns.len() {
                    self.report(Reference::Pattern(pattern).into())?;
                    continue;
                }
                (
                    Clip::Pattern(pattern),
                    u32::from_le_bytes(start),
                    u32::from_le_bytes(end),
                )
            };

            if let Some(track) = self.project.tracks.get_mut(track) {
                track.items.push(PlaylistItem {
                    position,
                    length,
                    start_offset,
                    end_offset,
                    muted: flags & MUTED != 0,
                    group,
                    clip,
                });
            }
        }
        self.trailing(&reader, payload.len())
    }

    fn on_insert_flags(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        self.ctx.enter_mixer();
        let limits = self.limits(Collection::Inserts)?;
        let flags = self.parse(payload, base, |r| {
            r.skip(4)?;
            r.read_u32()
        })?;

        if self.ctx.slot.take().is_some() {
            self.report(AnomalyKind::UnplacedSlot)?;
        }
        let index = self.ctx.next_insert;
        self.ctx.next_insert += 1;
        if index >= limits.inserts {
            self.ctx.insert = None;
            return self.report(Reference::Insert(index).into());
        }
        self.ctx.insert = Some(index);
        if let (Some(flags), Some(insert)) = (flags, self.project.inserts.get_mut(index)) {
            insert.flags = InsertFlags::from_bits_retain(flags);
        }
        Ok(())
    }

    fn on_track_info(&mut self, payload: &[u8], base: usize) -> DecodeResult<()> {
        let limits = self.limits(Collection::Tracks)?;
        if payload.len() < TRACK_INFO {
            return self.report(AnomalyKind::ShortPayload(payload.len()));
        }
        let Some(info) = self.parse(payload, base, read_track_info)? else {
            return Ok(());
        };

        let index = info.number as usize;
        if index >= limits.tracks {
            self.ctx.track = None;
            return self.report(Reference::Track(index).into());
        }
        self.ctx.track = Some(index);
        if let Some(track) = self.project.tracks.get_mut(index) {
            track.color = Color(info.color);
            track.icon = info.icon;
            track.enabled = info.enabled;
            track.height = info.height;
            track.locked_height = info.locked_height;
            track.locked_to_content = info.locked_to_content;
            if info.performance.is_some() {
                track.performance = info.performance;
            }
        }
        Ok(())
    }
}

/// Apply one insert-parameter record, returning the reference that dangled.
fn apply_insert_param(
    insert: &mut Insert,
    param: u8,
    address: SlotAddress,
    value: i32,
) -> Result<(), Reference> {
    let dangling_slot = Reference::Slot {
        insert: address.insert,
        slot: address.slot,
    };
    match InsertParam::try_from(param) {
        Ok(InsertParam::SlotEnabled) => {
            insert.slots.get_mut(address.slot).ok_or(dangling_slot)?.enabled = value != 0;
        }
        Ok(InsertParam::SlotVolume) => {
            insert.slots.get_mut(address.slot).ok_or(dangling_slot)?.volume = value;
        }
        Ok(InsertParam::SlotDryWet) => {
            insert.slots.get_mut(address.slot).ok_or(dangling_slot)?.dry_wet = value;
        }
        Ok(InsertParam::Volume) => insert.volume = value,
        Ok(InsertParam::Pan) => insert.pan = value,
        Ok(InsertParam::StereoSeparation) => insert.stereo_separation = value,
        Ok(InsertParam::LowLevel) => insert.eq[0].level = value,
        Ok(InsertParam::BandLevel) => insert.eq[1].level = value,
        Ok(InsertParam::HighLevel) => insert.eq[2].level = value,
        Ok(InsertParam::LowFrequency) => insert.eq[0].frequency = value,
        Ok(InsertParam::BandFrequency) => insert.eq[1].frequency = value,
        Ok(InsertParam::HighFrequency) => insert.eq[2].frequency = value,
        Ok(InsertParam::LowWidth) => insert.eq[0].width = value,
        Ok(InsertParam::BandWidth) => insert.eq[1].width = value,
        Ok(InsertParam::HighWidth) => insert.eq[2].width = value,
        Err(_) if param >= SEND_PARAM_BASE => {
            let target = usize::from(param - SEND_PARAM_BASE);
            let count = insert.route_volumes.len();
            if target > count {
                tracing::trace!(param, "unknown insert parameter");
                return Ok(());
            }
            *insert
                .route_volumes
                .get_mut(target)
                .ok_or(Reference::SendTarget {
                    insert: address.insert,
                    target,
                })? = value;
        }
        Err(_) => tracing::trace!(param, "unknown insert parameter"),
    }
    Ok(())
}

fn read_delay(r: &mut Reader<'_>) -> DecodeResult<Delay> {
    Ok(Delay {
        feedback: r.read_i32()?,
        pan: r.read_i32()?,
        pitch_shift: r.read_i32()?,
        echoes: r.read_i32()?,
        time: r.read_i32()?,
        ..Delay::default()
    })
}

fn read_arpeggiator(r: &mut Reader<'_>) -> DecodeResult<Arpeggiator> {
    r.skip(40)?;
    let direction = r.read_i32()?.into();
    let range = r.read_i32()?;
    let chord = r.read_i32()?;
    let time = f64::from(r.read_i32()?) + 1.;
    let gate = f64::from(r.read_i32()?);
    let slide = r.read_bool()?;
    r.skip(31)?;
    let repeat = r.read_i32()?;
    Ok(Arpeggiator {
        direction,
        range,
        chord,
        repeat,
        time,
        gate,
        slide,
    })
}

fn read_envelope(r: &mut Reader<'_>) -> DecodeResult<EnvelopeLfo> {
    let flags = EnvLfoFlags::from_bits_retain(r.read_u8()?);
    r.skip(3)?;
    let mut envelope = EnvelopeLfo {
        flags,
        enabled: r.read_u32()? != 0,
        delay: r.read_u32()?,
        attack: r.read_u32()?,
        hold: r.read_u32()?,
        decay: r.read_u32()?,
        sustain: r.read_i32()?,
        release: r.read_u32()?,
        amount: r.read_i32()?,
        lfo_delay: r.read_u32()?,
        lfo_attack: r.read_u32()?,
        lfo_amount: r.read_i32()?,
        lfo_speed: r.read_u32()?,
        lfo_shape: LfoShape::from(r.read_u8()?),
        ..EnvelopeLfo::default()
    };
    envelope.attack_tension = r.read_i32()?;
    envelope.decay_tension = r.read_i32()?;
    envelope.release_tension = r.read_i32()?;
    Ok(envelope)
}

fn read_note(r: &mut Reader<'_>) -> DecodeResult<(usize, Note)> {
    let position = r.read_u32()?;
    let flags = r.read_u16()?;
    let channel = usize::from(r.read_u8()?);
    r.skip(1)?;
    let length = r.read_u32()?;
    let key = r.read_u16()?;
    r.skip(2)?;
    let fine_pitch = r.read_u8()?;
    r.skip(1)?;
    let note = Note {
        position,
        flags,
        length,
        key,
        fine_pitch,
        release: r.read_u8()?,
        midi_channel: r.read_u8()?,
        pan: r.read_u8()?,
        velocity: r.read_u8()?,
        mod_x: r.read_u8()?,
        mod_y: r.read_u8()?,
    };
    Ok((channel, note))
}

fn read_keyframes(r: &mut Reader<'_>, ppq: f64) -> DecodeResult<Vec<AutomationKeyframe>> {
    r.skip(4 + 4 + 1 + 2 + 2 + 4)?;
    let count = r.read_u32()? as usize;
    let mut keyframes = Vec::with_capacity(count.min(r.remaining() / 24));
    for _ in 0..count {
        let position = r.read_f64()?;
        let value = r.read_f64()?;
        let tension = r.read_f32()?;
        r.skip(4)?;
        keyframes.push(AutomationKeyframe {
            position: (position * ppq) as i64,
            value,
            tension,
        });
    }
    Ok(keyframes)
}

struct TrackInfo {
    number: u32,
    color: u32,
    icon: i32,
    enabled: bool,
    height: f32,
    locked_height: f32,
    locked_to_content: bool,
    performance: Option<Performance>,
}

fn read_track_info(r: &mut Reader<'_>) -> DecodeResult<TrackInfo> {
    let long = r.len() >= TRACK_INFO_PERFORMANCE;
    Ok(TrackInfo {
        number: r.read_u32()?,
        color: r.read_u32()?,
        icon: r.read_i32()?,
        enabled: r.read_bool()?,
        height: r.read_f32()?,
        locked_height: r.read_f32()?,
        locked_to_content: r.read_bool()?,
        performance: if long {
            Some(Performance {
                motion: r.read_i32()?,
                press: r.read_i32()?,
                trigger_sync: r.read_i32()?,
                queued: r.read_i32()?,
                tolerant: r.read_i32()?,
                position_sync: r.read_i32()?,
                grouped_with_above: r.read_bool()?,
            })
        } else {
            None
        },
    })
}
