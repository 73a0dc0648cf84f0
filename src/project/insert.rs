use super::{Color, DEFAULT_CHANNEL_COLOR};
use crate::plugin::Plugin;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::collections::BTreeSet;

/// Effect slots per insert
pub const SLOT_COUNT: usize = 10;
/// Default volume of an insert and of each send
pub const DEFAULT_INSERT_VOLUME: i32 = 12800;

bitflags::bitflags! {
    /// Insert state bits. Bits without a name here are kept as they are.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InsertFlags: u32 {
        #[allow(missing_docs)]
        const REVERSE_POLARITY = 1;
        #[allow(missing_docs)]
        const SWAP_CHANNELS = 1 << 1;
        /// Set when the insert is *not* muted
        const UNMUTE = 1 << 3;
        #[allow(missing_docs)]
        const DISABLE_THREADED = 1 << 4;
        #[allow(missing_docs)]
        const DOCKED_MIDDLE = 1 << 6;
        #[allow(missing_docs)]
        const DOCKED_RIGHT = 1 << 7;
        /// Draw a separator before this insert
        const SEPARATOR = 1 << 10;
        #[allow(missing_docs)]
        const LOCK = 1 << 11;
        #[allow(missing_docs)]
        const SOLO = 1 << 12;
    }
}

/// Parameter ids of an insert-parameters record.
///
/// Ids `0x40..=0x40 + insert count` are sends and are not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum InsertParam {
    SlotEnabled = 0x00,
    SlotVolume = 0x01,
    SlotDryWet = 0x02,
    Volume = 0xC0,
    Pan = 0xC1,
    StereoSeparation = 0xC2,
    LowLevel = 0xD0,
    BandLevel = 0xD1,
    HighLevel = 0xD2,
    LowFrequency = 0xD8,
    BandFrequency = 0xD9,
    HighFrequency = 0xDA,
    LowWidth = 0xE0,
    BandWidth = 0xE1,
    HighWidth = 0xE2,
}

/// First parameter id of the send range
pub const SEND_PARAM_BASE: u8 = 0x40;

#[doc = r#"
An insert and slot packed into a 16-bit word.

```text
 15 .. 13 12 ........ 6 5 ....... 0
 [unused] [ insert id  ][ slot id  ]
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotAddress {
    /// Insert index
    pub insert: usize,
    /// Slot index
    pub slot: usize,
}

impl SlotAddress {
    /// Split a packed word
    pub const fn unpack(raw: u16) -> Self {
        Self {
            insert: ((raw >> 6) & 0x7F) as usize,
            slot: (raw & 0x3F) as usize,
        }
    }

    /// Pack back into a word; the unused high bits are zero
    pub const fn pack(&self) -> u16 {
        ((self.insert as u16 & 0x7F) << 6) | (self.slot as u16 & 0x3F)
    }
}

/// One band of the insert EQ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EqBand {
    /// Gain, 0 is 0 dB
    pub level: i32,
    /// Centre frequency
    pub frequency: i32,
    /// Bandwidth
    pub width: i32,
}

impl EqBand {
    const fn new(frequency: i32) -> Self {
        Self {
            level: 0,
            frequency,
            width: 17500,
        }
    }
}

/// An effect slot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertSlot {
    /// Enabled
    pub enabled: bool,
    /// Volume
    pub volume: i32,
    /// Dry/wet mix, `-1` when never set
    pub dry_wet: i32,
    /// Name of the effect, `Fruity Wrapper` for VSTs
    pub default_name: String,
    /// User-assigned name
    pub name: String,
    /// Icon id
    pub icon: u32,
    /// Color
    pub color: Color,
    /// Raw plugin settings
    pub plugin_settings: Option<Vec<u8>>,
    /// Decoded plugin descriptor
    pub plugin: Option<Plugin>,
}

impl Default for InsertSlot {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: 100,
            dry_wet: -1,
            default_name: String::new(),
            name: String::new(),
            icon: 0,
            color: DEFAULT_CHANNEL_COLOR,
            plugin_settings: None,
            plugin: None,
        }
    }
}

impl InsertSlot {
    /// Whether anything has been loaded into the slot
    pub fn is_empty(&self) -> bool {
        self.default_name.is_empty() && self.plugin_settings.is_none()
    }
}

/// A mixer channel strip
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insert {
    /// Index in the mixer
    pub id: usize,
    /// Display name
    pub name: String,
    /// Color
    pub color: Color,
    /// Icon id
    pub icon: u16,
    /// State bits
    pub flags: InsertFlags,
    /// Volume
    pub volume: i32,
    /// Pan
    pub pan: i32,
    /// Stereo separation
    pub stereo_separation: i32,
    /// Low, band and high EQ
    pub eq: [EqBand; 3],
    /// Audio input id, `-1` for none
    pub input: i32,
    /// Audio output id, `-1` for none
    pub output: i32,
    /// Inserts this one sends to
    pub routes: BTreeSet<usize>,
    /// Send volume towards each insert
    pub route_volumes: Vec<i32>,
    /// Effect slots
    pub slots: [InsertSlot; SLOT_COUNT],
}

impl Insert {
    /// A default insert in a mixer of `insert_count` inserts
    pub fn new(id: usize, insert_count: usize) -> Self {
        Self {
            id,
            name: format!("Insert {id}"),
            color: Color::default(),
            icon: 0,
            flags: InsertFlags::empty(),
            volume: DEFAULT_INSERT_VOLUME,
            pan: 0,
            stereo_separation: 0,
            eq: [EqBand::new(5777), EqBand::new(33145), EqBand::new(55825)],
            input: -1,
            output: -1,
            routes: BTreeSet::new(),
            route_volumes: vec![DEFAULT_INSERT_VOLUME; insert_count],
            slots: Default::default(),
        }
    }

    /// Slots with something loaded
    pub fn used_slots(&self) -> impl Iterator<Item = (usize, &InsertSlot)> {
        self.slots.iter().enumerate().filter(|(_, s)| !s.is_empty())
    }
}
