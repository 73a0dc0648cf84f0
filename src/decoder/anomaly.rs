use crate::plugin::PluginError;
use core::fmt;
use thiserror::Error;

/// The kinds of entity the decoder keeps a selection of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A channel, selected by a new-channel event
    Channel,
    /// A pattern, selected by a new-pattern event
    Pattern,
    /// An insert, selected by an insert-flags event
    Insert,
    /// An effect slot, pending until its slot-number event
    Slot,
    /// A track, selected by a track-info event
    Track,
    /// A time marker, pending until its name event
    TimeMarker,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Channel => "channel",
            Self::Pattern => "pattern",
            Self::Insert => "insert",
            Self::Slot => "slot",
            Self::Track => "track",
            Self::TimeMarker => "time marker",
        })
    }
}

/// An index-based reference that has no target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    /// Channel index past the channel rack
    Channel(usize),
    /// Pattern index with no pattern
    Pattern(usize),
    /// Insert index past the mixer
    Insert(usize),
    /// Slot index past the insert's slots
    Slot {
        /// Insert index
        insert: usize,
        /// Slot index
        slot: usize,
    },
    /// Track index past the playlist
    Track(usize),
    /// Send towards an insert that does not exist
    SendTarget {
        /// Sending insert
        insert: usize,
        /// Receiving insert
        target: usize,
    },
    /// A sixth envelope record for one channel
    EnvelopeSlot(usize),
    /// An event that needs a current entity arrived with none selected
    NoSelection(Entity),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(i) => write!(f, "channel {i}"),
            Self::Pattern(i) => write!(f, "pattern {i}"),
            Self::Insert(i) => write!(f, "insert {i}"),
            Self::Slot { insert, slot } => write!(f, "slot {slot} of insert {insert}"),
            Self::Track(i) => write!(f, "track {i}"),
            Self::SendTarget { insert, target } => {
                write!(f, "send from insert {insert} to {target}")
            }
            Self::EnvelopeSlot(i) => write!(f, "envelope slot {i}"),
            Self::NoSelection(entity) => write!(f, "the current {entity}, but none is selected"),
        }
    }
}

/// A recoverable problem found while decoding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyKind {
    /// The event id has no known meaning; its payload was skipped
    #[error("unknown event id")]
    UnknownEvent,
    /// A reference had no target; the record was skipped
    #[error("dangling reference to {0}")]
    Dangling(Reference),
    /// The payload is shorter than its record layout; nothing was applied
    #[error("payload of {0} bytes is too short")]
    ShortPayload(usize),
    /// The plugin blob could not be read; raw settings were still kept
    #[error("malformed plugin blob: {0}")]
    MalformedPlugin(PluginError),
    /// A time marker never received its name event
    #[error("time marker without a name")]
    UnterminatedTimeMarker,
    /// An effect slot never received its slot number; it was dropped
    #[error("effect slot without a slot number")]
    UnplacedSlot,
    /// The version string does not parse; inserts and tracks stay unsized
    #[error("unparsable version string {0:?}")]
    UnparsableVersion(String),
}

impl From<Reference> for AnomalyKind {
    fn from(value: Reference) -> Self {
        Self::Dangling(value)
    }
}

/// A recoverable problem, with the event that caused it
#[derive(Debug, Clone, PartialEq, Error)]
#[error("event {event} at position {position}: {kind}")]
pub struct Anomaly {
    /// Offset of the event id byte
    pub position: usize,
    /// Raw event id
    pub event: u8,
    /// What went wrong
    pub kind: AnomalyKind,
}
