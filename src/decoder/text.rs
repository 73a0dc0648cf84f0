//! Handlers for text events, including the two text ids in the data range.

use super::{AnomalyKind, Entity, ProjectDecoder, Reference, Scope, Version};
use crate::{
    TextEncoding,
    event::EventId,
    project::{ChannelFilter, InsertSlot},
    reader::DecodeResult,
};

impl ProjectDecoder<'_> {
    pub(super) fn on_text(&mut self, id: EventId, text: String) -> DecodeResult<()> {
        match id {
            EventId::Version => self.on_version(text)?,
            EventId::Title => self.project.title = text,
            EventId::Comment => self.project.comment = text,
            EventId::Url => self.project.url = text,
            EventId::Genre => self.project.genre = text,
            EventId::Author => self.project.author = text,
            EventId::DataPath => self.project.data_path = text,
            EventId::DefaultChannelName => self.with_channel(|c| c.name = text)?,
            EventId::PatternName => {
                match self.ctx.pattern.and_then(|i| self.project.patterns.get_mut(i)) {
                    Some(pattern) => pattern.name = text,
                    None => self.report(Reference::NoSelection(Entity::Pattern).into())?,
                }
            }
            EventId::SampleFileName => self.with_generator(|g| {
                if g.name.is_empty() {
                    g.name = "Sampler".to_string();
                }
                g.sample.file_name = text;
            })?,
            EventId::PluginDefaultName => match self.ctx.scope {
                Scope::Channel => self.with_generator(|g| g.name = text)?,
                Scope::Mixer => {
                    self.ctx.slot = Some(InsertSlot {
                        default_name: text,
                        ..Default::default()
                    });
                }
            },
            EventId::PluginName => match self.ctx.scope {
                Scope::Channel => self.with_channel(|c| c.name = text)?,
                Scope::Mixer => self.pending_slot().name = text,
            },
            EventId::InsertName => self.with_insert(|insert| insert.name = text)?,
            EventId::TimeMarkerName => match self.ctx.time_marker.take() {
                Some(mut marker) => {
                    marker.name = text;
                    self.project.time_markers.push(marker);
                }
                None => self.report(Reference::NoSelection(Entity::TimeMarker).into())?,
            },
            EventId::ChannelFilterName => {
                let id = self.project.channel_filters.len();
                self.project
                    .channel_filters
                    .push(ChannelFilter { id, name: text });
            }
            EventId::TrackName => {
                match self.ctx.track.and_then(|i| self.project.tracks.get_mut(i)) {
                    Some(track) => track.name = text,
                    None => self.report(Reference::NoSelection(Entity::Track).into())?,
                }
            }
            _ => self.ignore(id),
        }
        Ok(())
    }

    /// Record the version, switch text width and size the mixer once.
    fn on_version(&mut self, text: String) -> DecodeResult<()> {
        let parsed = Version::parse(&text);
        self.project.version_string = text;
        let Some(version) = parsed else {
            let text = self.project.version_string.clone();
            return self.report(AnomalyKind::UnparsableVersion(text));
        };
        self.project.version = version.packed();
        if version.uses_wide_text() {
            self.ctx.text = TextEncoding::Wide;
        }
        if self.ctx.limits.is_none() {
            let limits = version.limits();
            self.project.allocate_mixer(limits.inserts, limits.tracks);
            self.ctx.limits = Some(limits);
        }
        Ok(())
    }
}
