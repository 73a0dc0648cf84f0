//! Handlers for the one, two and four byte events.

use super::{Entity, ProjectDecoder, Reference, Scope};
use crate::{
    event::EventId,
    project::{ChannelKind, Color, Insert, InsertSlot, Pattern, Reverb, TimeMarker},
    reader::DecodeResult,
};

impl ProjectDecoder<'_> {
    pub(super) fn on_byte(&mut self, id: EventId, value: u8) -> DecodeResult<()> {
        match id {
            EventId::ChannelEnabled => match self.ctx.scope {
                Scope::Channel => self.with_channel(|c| c.enabled = value != 0)?,
                Scope::Mixer => self.pending_slot().enabled = value != 0,
            },
            EventId::ChannelVolume => self.with_generator(|g| g.mix.volume = value.into())?,
            EventId::ChannelPan => self.with_generator(|g| g.mix.pan = value.into())?,
            EventId::ShowInfo => self.project.show_info_on_startup = value != 0,
            EventId::MainVolume => self.project.main_volume = value.into(),
            EventId::UseLoopPoints => self.with_generator(|g| g.sample.use_loop_points = true)?,
            EventId::ChannelType => self.with_channel(|c| c.set_kind(ChannelKind::from(value)))?,
            EventId::ChannelMixerTrack => self.with_generator(|g| g.insert = value.into())?,
            EventId::Apdc => self.project.apdc = value != 0,
            EventId::PlayTruncatedNotes => self.project.play_truncated_notes = value != 0,
            EventId::EeAutoMode => self.project.ee_auto_mode = value != 0,
            EventId::TimeMarkerNumerator => match self.ctx.time_marker.as_mut() {
                Some(marker) => marker.numerator = value,
                None => self.report(Reference::NoSelection(Entity::TimeMarker).into())?,
            },
            EventId::TimeMarkerDenominator => match self.ctx.time_marker.as_mut() {
                Some(marker) => marker.denominator = value,
                None => self.report(Reference::NoSelection(Entity::TimeMarker).into())?,
            },
            _ => self.ignore(id),
        }
        Ok(())
    }

    pub(super) fn on_word(&mut self, id: EventId, value: u16) -> DecodeResult<()> {
        match id {
            EventId::NewChannel => {
                if self.ctx.scope == Scope::Mixer {
                    return Ok(());
                }
                let index = usize::from(value);
                if index < self.project.channels.len() {
                    self.ctx.select_channel(Some(index));
                } else {
                    self.ctx.select_channel(None);
                    self.report(Reference::Channel(index).into())?;
                }
            }
            EventId::NewPattern => {
                let number = usize::from(value);
                if number == 0 {
                    self.ctx.pattern = None;
                    return self.report(Reference::Pattern(0).into());
                }
                while self.project.patterns.len() < number {
                    let next = self.project.patterns.len() + 1;
                    self.project.patterns.push(Pattern::new(next));
                }
                self.ctx.pattern = Some(number - 1);
            }
            EventId::Tempo => self.project.tempo = f32::from(value),
            EventId::TempoFraction => self.project.tempo += f32::from(value) / 1000.,
            EventId::MainPitch => self.project.main_pitch = value as i16,
            EventId::LoopBar => {
                let position = self.project.song_loop_position;
                self.project.song_loop_position = (position & 0xFFFF_0000) | u32::from(value);
            }
            EventId::LoopEndBar => {
                let position = self.project.song_loop_position;
                self.project.song_loop_position = (position & 0xFFFF) | u32::from(value) << 16;
            }
            EventId::SampleEq => self.with_generator(|g| g.sample.eq = value)?,
            EventId::FadeStereo => self.with_generator(|g| {
                g.sample.reversed = value & 0x02 != 0;
                g.sample.reverse_stereo = value & 0x100 != 0;
            })?,
            EventId::Cutoff => self.with_generator(|g| g.sample.cutoff = value)?,
            EventId::PreAmp => self.with_generator(|g| g.sample.pre_amp = value)?,
            EventId::Resonance => self.with_generator(|g| g.sample.resonance = value)?,
            EventId::StereoDelay => self.with_generator(|g| g.sample.stereo_delay = value)?,
            EventId::Pogo => self.with_generator(|g| g.sample.pogo = value)?,
            EventId::ShiftTime => self.with_generator(|g| g.time_shift = value)?,
            EventId::SwingMix => self.with_generator(|g| g.swing = value)?,
            EventId::LayerParentOf => self.with_channel(|c| {
                if let Some(layer) = c.data.as_layer_mut() {
                    layer.children.insert(usize::from(value));
                }
            })?,
            EventId::InsertIcon => self.with_insert(|insert| insert.icon = value)?,
            EventId::CurrentSlotNumber => self.place_slot(usize::from(value))?,
            _ => self.ignore(id),
        }
        Ok(())
    }

    pub(super) fn on_dword(&mut self, id: EventId, value: u32) -> DecodeResult<()> {
        let [a, b, c, d] = value.to_le_bytes();
        let (low, high) = (u16::from_le_bytes([a, b]), u16::from_le_bytes([c, d]));

        match id {
            EventId::Color => match self.ctx.scope {
                Scope::Channel => self.with_channel(|c| c.color = Color(value))?,
                Scope::Mixer => self.pending_slot().color = Color(value),
            },
            EventId::PluginIcon => match self.ctx.scope {
                Scope::Channel => self.with_channel(|c| c.icon = value)?,
                Scope::Mixer => self.pending_slot().icon = value,
            },
            EventId::CutCutBy => self.with_generator(|g| {
                g.group_cut = low;
                g.group_cut_by = high;
            })?,
            EventId::MiddleNote => self.with_generator(|g| g.base_note = value.wrapping_add(9))?,
            EventId::DelayModXY => self.with_generator(|g| {
                g.delay.mod_y = low as i16;
                g.delay.mod_x = high as i16;
            })?,
            EventId::Reverb => self.with_generator(|g| g.sample.reverb = Reverb::from_raw(value))?,
            EventId::LayerFlags => self.with_channel(|c| {
                if let Some(layer) = c.data.as_layer_mut() {
                    layer.flags = value;
                }
            })?,
            EventId::ChannelFilterNumber => {
                self.with_channel(|c| {
                    c.filters.insert(value as i32);
                })?;
            }
            EventId::CurrentFilterNumber => self.project.selected_channel_filter = value as i32,
            EventId::InsertOutput => self.with_insert(|insert| insert.output = value as i32)?,
            EventId::InsertInput => self.with_insert(|insert| insert.input = value as i32)?,
            EventId::InsertColor => self.with_insert(|insert| insert.color = Color(value))?,
            EventId::TimeMarker => {
                if let Some(marker) = self.ctx.time_marker.replace(TimeMarker::new(value)) {
                    self.report(super::AnomalyKind::UnterminatedTimeMarker)?;
                    self.project.time_markers.push(marker);
                }
            }
            EventId::PatternColor => {
                match self.ctx.pattern.and_then(|i| self.project.patterns.get_mut(i)) {
                    Some(pattern) => pattern.color = Color(value),
                    None => self.report(Reference::NoSelection(Entity::Pattern).into())?,
                }
            }
            EventId::SongLoopPosition => self.project.song_loop_position = value,
            EventId::AuSampleRate => self.with_generator(|g| g.sample.au_sample_rate = value)?,
            EventId::FineTempo => self.project.tempo = value as f32 / 1000.,
            _ => self.ignore(id),
        }
        Ok(())
    }

    /// The slot being assembled in mixer scope, started on demand.
    pub(super) fn pending_slot(&mut self) -> &mut InsertSlot {
        self.ctx.slot.get_or_insert_with(InsertSlot::default)
    }

    /// Apply `f` to the current insert.
    pub(super) fn with_insert(&mut self, f: impl FnOnce(&mut Insert)) -> DecodeResult<()> {
        let Some(insert) = self
            .ctx
            .insert
            .and_then(|i| self.project.inserts.get_mut(i))
        else {
            return self.report(Reference::NoSelection(Entity::Insert).into());
        };
        f(insert);
        Ok(())
    }

    /// Move the pending slot into the current insert at `index`.
    fn place_slot(&mut self, index: usize) -> DecodeResult<()> {
        let Some(slot) = self.ctx.slot.take() else {
            return Ok(());
        };
        let Some(insert) = self.ctx.insert else {
            return self.report(Reference::NoSelection(Entity::Insert).into());
        };
        match self
            .project
            .inserts
            .get_mut(insert)
            .and_then(|i| i.slots.get_mut(index))
        {
            Some(target) => *target = slot,
            None => self.report(Reference::Slot { insert, slot: index }.into())?,
        }
        Ok(())
    }
}
