#[doc = r#"
What an automation clip drives.

The target is stored in the file as a 16-bit destination word. Bit 13
clear means the low bits are a channel index, with any value past the
channel count standing for the project tempo. Bit 13 set means the word
addresses an effect slot:

```text
 15 14 13 12 ........ 6 5 ....... 0
 -- -- 1  [ insert id  ][ slot id  ]
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutomationTarget {
    /// Not assigned yet
    #[default]
    Unassigned,
    /// A channel parameter
    Channel {
        /// Channel index
        channel: usize,
        /// Parameter lives on the hosted plugin rather than the channel
        vst_parameter: bool,
    },
    /// The project tempo
    Tempo,
    /// A parameter of an effect slot
    InsertSlot {
        /// Insert index
        insert: usize,
        /// Slot index
        slot: usize,
    },
}

/// Bit selecting a slot destination
pub const SLOT_DESTINATION: u16 = 0x2000;

impl AutomationTarget {
    /// Decode a destination word.
    ///
    /// A channel index equal to `channel_count` is returned as a channel
    /// target; the caller decides whether it dangles.
    pub const fn from_destination(
        destination: u16,
        vst_parameter: bool,
        channel_count: usize,
    ) -> Self {
        if destination & SLOT_DESTINATION == 0 {
            let channel = destination as usize;
            if channel > channel_count {
                Self::Tempo
            } else {
                Self::Channel {
                    channel,
                    vst_parameter,
                }
            }
        } else {
            Self::InsertSlot {
                insert: ((destination >> 6) & 0x7F) as usize,
                slot: (destination & 0x3F) as usize,
            }
        }
    }

    /// Pack an insert slot address back into a destination word
    pub const fn slot_destination(insert: usize, slot: usize) -> u16 {
        SLOT_DESTINATION | ((insert as u16 & 0x7F) << 6) | (slot as u16 & 0x3F)
    }
}

/// One point of an automation curve
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutomationKeyframe {
    /// Position in pulses
    pub position: i64,
    /// Normalised value
    pub value: f64,
    /// Curve tension towards the next point
    pub tension: f32,
}

/// Automation clip state
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutomationData {
    /// Driven parameter
    pub target: AutomationTarget,
    /// Parameter index (15 bits)
    pub parameter: u16,
    /// Curve points, ordered by position
    pub keyframes: Vec<AutomationKeyframe>,
}
