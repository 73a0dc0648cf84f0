use super::Color;
use std::collections::BTreeMap;

/// A note of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct Note {
    /// Position in pulses
    pub position: u32,
    /// Raw note flags
    pub flags: u16,
    /// Length in pulses
    pub length: u32,
    /// Key, 60 is C5
    pub key: u16,
    pub fine_pitch: u8,
    pub release: u8,
    pub midi_channel: u8,
    pub pan: u8,
    pub velocity: u8,
    pub mod_x: u8,
    pub mod_y: u8,
}

/// A pattern: notes for any number of channels
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    /// Pattern number as the producer counts, starting at 1
    pub id: usize,
    /// Display name
    pub name: String,
    /// Color
    pub color: Color,
    /// Notes keyed by channel index
    pub notes: BTreeMap<usize, Vec<Note>>,
}

impl Pattern {
    /// An empty pattern
    pub fn new(id: usize) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Notes played by a channel
    pub fn notes_for(&self, channel: usize) -> &[Note] {
        self.notes.get(&channel).map_or(&[], Vec::as_slice)
    }

    /// Total number of notes across all channels
    pub fn note_count(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }
}
