#![doc = r#"
Writing event streams.

[`EventWriter`] produces a container with a header and an `FLdt` chunk,
then appends events of any width class. It tracks the text width the same
way the decoder does: once a version event for 11.5 or later is written,
text events are written as UTF-16.

[`encode`] writes a [`Project`]'s identity and metadata, channels, patterns
and time markers. Decoding the result gives back those fields; it does not
reproduce the file the project was decoded from. The master volume only has a
one-byte event, so values above 255 come back as 255.
"#]

use crate::{
    TextEncoding,
    decoder::Version,
    event::{Event, EventId, EventKind},
    file::{DATA_MAGIC, ProjectHeader},
    project::{ChannelData, Note, Project},
    reader::RangeError,
    varint,
};
use thiserror::Error;

/// Errors raised while writing events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The id belongs to another width class than the payload given
    #[error("event {id} is not a {expected:?} event")]
    WidthClass {
        /// Raw id
        id: u8,
        /// The class the payload needs
        expected: EventKind,
    },
    /// The project has no channels or too many
    #[error(transparent)]
    ChannelCount(#[from] RangeError),
    /// An index does not fit the field it is written to
    #[error("index {0} does not fit its field")]
    Index(usize),
}

/// Appends events to a new project file
#[derive(Debug, Clone)]
pub struct EventWriter {
    out: Vec<u8>,
    length_at: usize,
    text: TextEncoding,
}

impl EventWriter {
    /// Start a file with the given header
    pub fn new(header: ProjectHeader) -> Self {
        let mut out = Vec::new();
        header.write(&mut out);
        out.extend_from_slice(&DATA_MAGIC);
        let length_at = out.len();
        out.extend_from_slice(&0i32.to_le_bytes());
        Self {
            out,
            length_at,
            text: TextEncoding::Narrow,
        }
    }

    /// Text width used for text events
    pub const fn text_encoding(&self) -> TextEncoding {
        self.text
    }

    fn check(id: EventId, expected: EventKind) -> Result<u8, EncodeError> {
        let raw = id.byte();
        if EventKind::of(raw) == expected {
            Ok(raw)
        } else {
            Err(EncodeError::WidthClass { id: raw, expected })
        }
    }

    /// Write a one-byte event
    pub fn byte(&mut self, id: EventId, value: u8) -> Result<(), EncodeError> {
        let raw = Self::check(id, EventKind::Byte)?;
        self.out.extend_from_slice(&[raw, value]);
        Ok(())
    }

    /// Write a two-byte event
    pub fn word(&mut self, id: EventId, value: u16) -> Result<(), EncodeError> {
        let raw = Self::check(id, EventKind::Word)?;
        self.out.push(raw);
        self.out.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Write a four-byte event
    pub fn dword(&mut self, id: EventId, value: u32) -> Result<(), EncodeError> {
        let raw = Self::check(id, EventKind::DWord)?;
        self.out.push(raw);
        self.out.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Write a text event, including the two text ids of the data range.
    ///
    /// A version event is always single-byte and may switch later text to
    /// UTF-16.
    pub fn text(&mut self, id: EventId, text: &str) -> Result<(), EncodeError> {
        let raw = if id.is_text_payload() {
            id.byte()
        } else {
            Self::check(id, EventKind::Text)?
        };
        if id == EventId::Version {
            self.prefixed(raw, &TextEncoding::Narrow.encode(text));
            if Version::parse(text).is_some_and(|v| v.uses_wide_text()) {
                self.text = TextEncoding::Wide;
            }
        } else {
            let bytes = self.text.encode(text);
            self.prefixed(raw, &bytes);
        }
        Ok(())
    }

    /// Write a data event
    pub fn data(&mut self, id: EventId, payload: &[u8]) -> Result<(), EncodeError> {
        let raw = Self::check(id, EventKind::Data)?;
        self.prefixed(raw, payload);
        Ok(())
    }

    /// Write a raw event, known id or not
    pub fn event(&mut self, event: &Event<'_>) -> Result<(), EncodeError> {
        let id = event.id();
        let expected = match event {
            Event::Byte { .. } => EventKind::Byte,
            Event::Word { .. } => EventKind::Word,
            Event::DWord { .. } => EventKind::DWord,
            Event::Text { .. } => EventKind::Text,
            Event::Data { .. } => EventKind::Data,
        };
        if EventKind::of(id) != expected {
            return Err(EncodeError::WidthClass { id, expected });
        }
        match *event {
            Event::Byte { value, .. } => self.out.extend_from_slice(&[id, value]),
            Event::Word { value, .. } => {
                self.out.push(id);
                self.out.extend_from_slice(&value.to_le_bytes());
            }
            Event::DWord { value, .. } => {
                self.out.push(id);
                self.out.extend_from_slice(&value.to_le_bytes());
            }
            Event::Text { payload, .. } | Event::Data { payload, .. } => {
                self.prefixed(id, payload)
            }
        }
        Ok(())
    }

    fn prefixed(&mut self, id: u8, payload: &[u8]) {
        self.out.push(id);
        varint::encode(payload.len() as u64, &mut self.out);
        self.out.extend_from_slice(payload);
    }

    /// Patch the data chunk length and return the file
    pub fn finish(mut self) -> Vec<u8> {
        let length = (self.out.len() - self.length_at - 4) as u32;
        self.out[self.length_at..self.length_at + 4].copy_from_slice(&length.to_le_bytes());
        self.out
    }
}

/// Encode a note as its 24-byte record
pub fn note_record(channel: u8, note: &Note) -> [u8; 24] {
    let mut record = [0u8; 24];
    record[0..4].copy_from_slice(&note.position.to_le_bytes());
    record[4..6].copy_from_slice(&note.flags.to_le_bytes());
    record[6] = channel;
    record[8..12].copy_from_slice(&note.length.to_le_bytes());
    record[12..14].copy_from_slice(&note.key.to_le_bytes());
    record[16] = note.fine_pitch;
    record[18] = note.release;
    record[19] = note.midi_channel;
    record[20] = note.pan;
    record[21] = note.velocity;
    record[22] = note.mod_x;
    record[23] = note.mod_y;
    record
}

/// Write a project's metadata, channels, patterns and time markers.
pub fn encode(project: &Project) -> Result<Vec<u8>, EncodeError> {
    let count = u16::try_from(project.channels.len())
        .map_err(|_| EncodeError::Index(project.channels.len()))?;
    let mut w = EventWriter::new(ProjectHeader::new(count, project.ppq)?);

    if !project.version_string.is_empty() {
        w.text(EventId::Version, &project.version_string)?;
    }
    for (id, text) in [
        (EventId::Title, &project.title),
        (EventId::Comment, &project.comment),
        (EventId::Url, &project.url),
        (EventId::Genre, &project.genre),
        (EventId::Author, &project.author),
        (EventId::DataPath, &project.data_path),
    ] {
        if !text.is_empty() {
            w.text(id, text)?;
        }
    }
    w.dword(EventId::FineTempo, (project.tempo * 1000.).round() as u32)?;
    // clamped: the only master volume event is one byte wide
    w.byte(
        EventId::MainVolume,
        u8::try_from(project.main_volume).unwrap_or(u8::MAX),
    )?;
    w.word(EventId::MainPitch, project.main_pitch as u16)?;
    w.byte(EventId::ShowInfo, project.show_info_on_startup.into())?;
    w.byte(EventId::Apdc, project.apdc.into())?;
    w.byte(EventId::PlayTruncatedNotes, project.play_truncated_notes.into())?;
    w.byte(EventId::EeAutoMode, project.ee_auto_mode.into())?;
    w.dword(EventId::SongLoopPosition, project.song_loop_position)?;
    w.dword(EventId::CurrentFilterNumber, project.selected_channel_filter as u32)?;
    if let Some(stamp) = project.timestamp {
        let mut payload = stamp.created_days.to_le_bytes().to_vec();
        payload.extend_from_slice(&stamp.work_time_days.to_le_bytes());
        w.data(EventId::SaveTimestamp, &payload)?;
    }
    for filter in &project.channel_filters {
        w.text(EventId::ChannelFilterName, &filter.name)?;
    }

    for (index, channel) in project.channels.iter().enumerate() {
        w.word(
            EventId::NewChannel,
            u16::try_from(index).map_err(|_| EncodeError::Index(index))?,
        )?;
        w.byte(EventId::ChannelType, channel.kind.into())?;
        w.byte(EventId::ChannelEnabled, channel.enabled.into())?;
        w.dword(EventId::Color, channel.color.value())?;
        w.dword(EventId::PluginIcon, channel.icon)?;
        if let ChannelData::Generator(generator) = &channel.data {
            if !generator.name.is_empty() {
                w.text(EventId::PluginDefaultName, &generator.name)?;
            }
        }
        if !channel.name.is_empty() {
            w.text(EventId::PluginName, &channel.name)?;
        }
        for &filter in &channel.filters {
            w.dword(EventId::ChannelFilterNumber, filter as u32)?;
        }
    }

    for pattern in &project.patterns {
        w.word(
            EventId::NewPattern,
            u16::try_from(pattern.id).map_err(|_| EncodeError::Index(pattern.id))?,
        )?;
        if !pattern.name.is_empty() {
            w.text(EventId::PatternName, &pattern.name)?;
        }
        w.dword(EventId::PatternColor, pattern.color.value())?;
        let mut records = Vec::new();
        for (&channel, notes) in &pattern.notes {
            let channel = u8::try_from(channel).map_err(|_| EncodeError::Index(channel))?;
            for note in notes {
                records.extend_from_slice(&note_record(channel, note));
            }
        }
        if !records.is_empty() {
            w.data(EventId::PatternNotes, &records)?;
        }
    }

    for marker in &project.time_markers {
        w.dword(EventId::TimeMarker, marker.value)?;
        w.byte(EventId::TimeMarkerNumerator, marker.numerator)?;
        w.byte(EventId::TimeMarkerDenominator, marker.denominator)?;
        w.text(EventId::TimeMarkerName, &marker.name)?;
    }

    Ok(w.finish())
}
