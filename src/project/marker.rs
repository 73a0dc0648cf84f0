/// A named position on the playlist timeline
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeMarker {
    /// Position, usually in pulses
    pub value: u32,
    /// Display name
    pub name: String,
    /// Time signature numerator
    pub numerator: u8,
    /// Time signature denominator
    pub denominator: u8,
}

impl TimeMarker {
    /// A marker with a 4/4 signature and no name
    pub fn new(value: u32) -> Self {
        Self {
            value,
            name: String::new(),
            numerator: 4,
            denominator: 4,
        }
    }
}

/// A named group of channels
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelFilter {
    /// Position in the filter list
    pub id: usize,
    /// Display name
    pub name: String,
}
