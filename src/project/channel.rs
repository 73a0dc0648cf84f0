use super::{AutomationData, Color, GeneratorData, Levels, Mix};
use crate::plugin::Plugin;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::collections::BTreeSet;

/// Default color of a fresh channel
pub const DEFAULT_CHANNEL_COLOR: Color = Color::rgb(0x48, 0x51, 0x56);

/// The raw channel-type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChannelKind {
    /// Built-in sampler
    Sampler = 0,
    /// Hosted generator plugin
    Plugin = 2,
    /// Layer of other channels
    Layer = 3,
    /// Audio clip
    Audio = 4,
    /// Automation clip
    Automation = 5,
    /// A type byte with no known meaning
    #[num_enum(catch_all)]
    Unknown(u8),
}

#[doc = r#"
One entry of the channel rack.

The kind byte and the data variant usually agree, but the variant is what
decides which events the channel accepts: generator events sent to an
automation channel are dropped, and so on.
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    /// Index in the channel rack
    pub id: usize,
    /// Display name
    pub name: String,
    /// Icon id
    pub icon: u32,
    /// Rack color
    pub color: Color,
    /// Enabled
    pub enabled: bool,
    /// Channel filter groups this channel belongs to
    pub filters: BTreeSet<i32>,
    /// Raw type byte
    pub kind: ChannelKind,
    /// Kind-specific state
    pub data: ChannelData,
}

impl Channel {
    /// A fresh sampler channel
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: String::new(),
            icon: 0,
            color: DEFAULT_CHANNEL_COLOR,
            enabled: true,
            filters: BTreeSet::new(),
            kind: ChannelKind::Sampler,
            data: ChannelData::default(),
        }
    }

    /// Switch the channel's type, replacing its data variant when the new
    /// kind needs a different one.
    pub fn set_kind(&mut self, kind: ChannelKind) {
        self.kind = kind;
        match kind {
            ChannelKind::Layer if !matches!(self.data, ChannelData::Layer(_)) => {
                self.data = ChannelData::Layer(LayerData::default());
            }
            ChannelKind::Automation if !matches!(self.data, ChannelData::Automation(_)) => {
                self.data = ChannelData::Automation(AutomationData::default());
            }
            ChannelKind::Sampler | ChannelKind::Plugin | ChannelKind::Audio
                if !matches!(self.data, ChannelData::Generator(_)) =>
            {
                self.data = ChannelData::default();
            }
            _ => {}
        }
    }

    /// Name of the generator, for generator channels
    pub fn generator_name(&self) -> Option<&str> {
        self.data.as_generator().map(|g| g.name.as_str())
    }

    /// Decoded plugin, for generator channels hosting one
    pub fn plugin(&self) -> Option<&Plugin> {
        self.data.as_generator().and_then(|g| g.plugin.as_ref())
    }
}

/// What a channel is
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelData {
    /// Sampler, plugin or audio channel
    Generator(Box<GeneratorData>),
    /// Automation clip
    Automation(AutomationData),
    /// Layer of child channels
    Layer(LayerData),
}

impl Default for ChannelData {
    fn default() -> Self {
        Self::Generator(Box::default())
    }
}

impl ChannelData {
    /// Generator state, if any
    pub fn as_generator(&self) -> Option<&GeneratorData> {
        match self {
            Self::Generator(g) => Some(g),
            _ => None,
        }
    }

    /// Mutable generator state, if any
    pub fn as_generator_mut(&mut self) -> Option<&mut GeneratorData> {
        match self {
            Self::Generator(g) => Some(g),
            _ => None,
        }
    }

    /// Automation state, if any
    pub fn as_automation(&self) -> Option<&AutomationData> {
        match self {
            Self::Automation(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable automation state, if any
    pub fn as_automation_mut(&mut self) -> Option<&mut AutomationData> {
        match self {
            Self::Automation(a) => Some(a),
            _ => None,
        }
    }

    /// Layer state, if any
    pub fn as_layer(&self) -> Option<&LayerData> {
        match self {
            Self::Layer(l) => Some(l),
            _ => None,
        }
    }

    /// Mutable layer state, if any
    pub fn as_layer_mut(&mut self) -> Option<&mut LayerData> {
        match self {
            Self::Layer(l) => Some(l),
            _ => None,
        }
    }

    /// Mix parameters, shared by generators and layers
    pub fn mix_mut(&mut self) -> Option<&mut Mix> {
        match self {
            Self::Generator(g) => Some(&mut g.mix),
            Self::Layer(l) => Some(&mut l.mix),
            Self::Automation(_) => None,
        }
    }

    /// Level offsets, shared by generators and layers
    pub fn levels_mut(&mut self) -> Option<&mut Levels> {
        match self {
            Self::Generator(g) => Some(&mut g.levels),
            Self::Layer(l) => Some(&mut l.levels),
            Self::Automation(_) => None,
        }
    }
}

/// A channel that plays its children together
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerData {
    /// Child channel indices
    pub children: BTreeSet<usize>,
    /// Raw layer flags
    pub flags: u32,
    /// Pan, volume and pitch
    pub mix: Mix,
    /// Level offsets
    pub levels: Levels,
}
