#![doc = r#"
Raw events of the `FLdt` stream.

# Overview

Every event starts with a one-byte id. The id's range alone decides how wide
the payload is; what the payload *means* depends on the id and on the
decoder's current context.

```text
  0 ..  64   one byte
 64 .. 128   u16
128 .. 192   u32
192 .. 209   varint length, then text
209 ..=255   varint length, then opaque bytes
```

A handful of text-valued events (channel filter names, track names) were
allocated ids in the data range. They are still read as length-prefixed bytes
and decoded as text by the project decoder.

Ids without a known meaning are still read in full. Skipping them keeps the
cursor aligned and is how newer files stay readable.
"#]

mod id;
pub use id::*;

use crate::reader::{DecodeResult, Reader};

/// First id of the [`EventKind::Word`] range
pub const WORD: u8 = 64;
/// First id of the [`EventKind::DWord`] range
pub const DWORD: u8 = 128;
/// First id of the [`EventKind::Text`] range
pub const TEXT: u8 = 192;
/// First id of the [`EventKind::Data`] range
pub const DATA: u8 = 209;

/// The payload width class of an event id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// One byte
    Byte,
    /// Two bytes, little-endian
    Word,
    /// Four bytes, little-endian
    DWord,
    /// Varint-prefixed text
    Text,
    /// Varint-prefixed bytes
    Data,
}

impl EventKind {
    /// Classify an id
    pub const fn of(id: u8) -> Self {
        match id {
            0..WORD => Self::Byte,
            WORD..DWORD => Self::Word,
            DWORD..TEXT => Self::DWord,
            TEXT..DATA => Self::Text,
            _ => Self::Data,
        }
    }
}

/// One undecoded event, borrowing its payload from the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A one-byte event
    Byte {
        /// Event id
        id: u8,
        /// Payload
        value: u8,
    },
    /// A two-byte event
    Word {
        /// Event id
        id: u8,
        /// Payload
        value: u16,
    },
    /// A four-byte event
    DWord {
        /// Event id
        id: u8,
        /// Payload
        value: u32,
    },
    /// A text event; the bytes still need the project's [`TextEncoding`](crate::TextEncoding)
    Text {
        /// Event id
        id: u8,
        /// Raw text bytes
        payload: &'a [u8],
    },
    /// A data event
    Data {
        /// Event id
        id: u8,
        /// Raw payload bytes
        payload: &'a [u8],
    },
}

impl<'a> Event<'a> {
    /// Read one event from the reader.
    pub fn read(reader: &mut Reader<'a>) -> DecodeResult<Self> {
        let id = reader.read_u8()?;
        Ok(match EventKind::of(id) {
            EventKind::Byte => Self::Byte {
                id,
                value: reader.read_u8()?,
            },
            EventKind::Word => Self::Word {
                id,
                value: reader.read_u16()?,
            },
            EventKind::DWord => Self::DWord {
                id,
                value: reader.read_u32()?,
            },
            EventKind::Text => Self::Text {
                id,
                payload: reader.read_length_prefixed()?,
            },
            EventKind::Data => Self::Data {
                id,
                payload: reader.read_length_prefixed()?,
            },
        })
    }

    /// The raw id byte
    pub const fn id(&self) -> u8 {
        match self {
            Self::Byte { id, .. }
            | Self::Word { id, .. }
            | Self::DWord { id, .. }
            | Self::Text { id, .. }
            | Self::Data { id, .. } => *id,
        }
    }

    /// The width class
    pub const fn kind(&self) -> EventKind {
        EventKind::of(self.id())
    }

    /// The id, if it is one this crate knows about
    pub fn known_id(&self) -> Option<EventId> {
        EventId::try_from(self.id()).ok()
    }
}
