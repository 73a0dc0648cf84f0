use crate::plugin::Plugin;
use num_enum::{FromPrimitive, IntoPrimitive};

/// Number of envelope/LFO records per generator
pub const ENVELOPE_COUNT: usize = 5;

#[doc = r#"
State of a sampler, plugin or audio channel.

Values are kept in the producer's raw units. Volumes and pans are integer
knob positions (`10000` and `6400` are the centre defaults), times are in
the producer's internal ticks.
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorData {
    /// Generator name, `Fruity Wrapper` for hosted VSTs
    pub name: String,
    /// Root note of the generator
    pub base_note: u32,
    /// Mixer insert this channel feeds, `-1` for none
    pub insert: i32,
    /// Pan, volume and pitch
    pub mix: Mix,
    /// Level offsets
    pub levels: Levels,
    /// Cut group
    pub group_cut: u16,
    /// Cut by group
    pub group_cut_by: u16,
    /// Arpeggiator
    pub arpeggiator: Arpeggiator,
    /// Polyphony
    pub polyphony: Polyphony,
    /// Time shift
    pub time_shift: u16,
    /// Swing
    pub swing: u16,
    /// Echo delay / fat mode
    pub delay: Delay,
    /// Velocity (index 0) and key (index 1) tracking
    pub tracking: [Tracking; 2],
    /// Sample playback
    pub sample: Sample,
    /// Envelope/LFO records, one per modulation target
    pub envelopes: [EnvelopeLfo; ENVELOPE_COUNT],
    /// Raw plugin settings as stored in the file
    pub plugin_settings: Option<Vec<u8>>,
    /// Decoded plugin descriptor
    pub plugin: Option<Plugin>,
}

impl Default for GeneratorData {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_note: 57,
            insert: -1,
            mix: Mix::default(),
            levels: Levels::default(),
            group_cut: 0,
            group_cut_by: 0,
            arpeggiator: Arpeggiator::default(),
            polyphony: Polyphony::default(),
            time_shift: 0,
            swing: 128,
            delay: Delay::default(),
            tracking: [Tracking::new(100), Tracking::new(60)],
            sample: Sample::default(),
            envelopes: Default::default(),
            plugin_settings: None,
            plugin: None,
        }
    }
}

impl GeneratorData {
    /// Whether the generator wraps a third-party VST
    pub fn is_vst(&self) -> bool {
        self.name == "Fruity Wrapper"
    }
}

/// Top-right knobs of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mix {
    /// Pan
    pub pan: u32,
    /// Volume
    pub volume: u32,
    /// Pitch shift in cents
    pub pitch: i32,
}

impl Default for Mix {
    fn default() -> Self {
        Self {
            pan: 6400,
            volume: 10000,
            pitch: 0,
        }
    }
}

/// Level adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Levels {
    /// Pan offset
    pub pan_offset: u32,
    /// Volume multiplier
    pub volume_multiplier: u32,
    /// Mod X offset
    pub mod_x: u32,
    /// Mod Y offset
    pub mod_y: u32,
}

impl Default for Levels {
    fn default() -> Self {
        Self {
            pan_offset: 0,
            volume_multiplier: 12800,
            mod_x: 0,
            mod_y: 0,
        }
    }
}

/// Arpeggiator direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
#[allow(missing_docs)]
pub enum ArpDirection {
    Off = 0,
    Up = 1,
    Down = 2,
    UpDownBounce = 3,
    UpDownSticky = 4,
    Random = 5,
    #[num_enum(catch_all)]
    Unknown(i32),
}

/// Arpeggiator settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arpeggiator {
    /// Direction
    pub direction: ArpDirection,
    /// Range in octaves
    pub range: i32,
    /// Chord index
    pub chord: i32,
    /// Repeat count
    pub repeat: i32,
    /// Step time
    pub time: f64,
    /// Gate
    pub gate: f64,
    /// Slide between steps
    pub slide: bool,
}

impl Default for Arpeggiator {
    fn default() -> Self {
        Self {
            direction: ArpDirection::Off,
            range: 0,
            chord: 0,
            repeat: 0,
            time: 100.,
            gate: 100.,
            slide: false,
        }
    }
}

bitflags::bitflags! {
    /// Voice handling flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PolyphonyFlags: u8 {
        /// Monophonic
        const MONO = 0x01;
        /// Portamento
        const PORTA = 0x02;
    }
}

/// Polyphony settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyphony {
    /// Maximum voices, 0 for unlimited
    pub max: u32,
    /// Slide time
    pub slide: u32,
    /// Flags, unknown bits kept
    pub flags: PolyphonyFlags,
}

impl Default for Polyphony {
    fn default() -> Self {
        Self {
            max: 0,
            slide: 820,
            flags: PolyphonyFlags::empty(),
        }
    }
}

/// Echo delay / fat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delay {
    /// Feedback
    pub feedback: i32,
    /// Pan
    pub pan: i32,
    /// Pitch shift
    pub pitch_shift: i32,
    /// Number of echoes
    pub echoes: i32,
    /// Time
    pub time: i32,
    /// Mod X
    pub mod_x: i16,
    /// Mod Y
    pub mod_y: i16,
}

impl Default for Delay {
    fn default() -> Self {
        Self {
            feedback: 0,
            pan: 6400,
            pitch_shift: 0,
            echoes: 4,
            time: 144,
            mod_x: 128,
            mod_y: 128,
        }
    }
}

/// One tracking table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tracking {
    /// Middle value
    pub mid: u32,
    /// Pan
    pub pan: i32,
    /// Mod X
    pub mod_x: i32,
    /// Mod Y
    pub mod_y: i32,
}

impl Tracking {
    const fn new(mid: u32) -> Self {
        Self {
            mid,
            pan: 0,
            mod_x: 0,
            mod_y: 0,
        }
    }
}

/// Precomputed reverb of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reverb {
    /// Reverb A
    #[default]
    A,
    /// Reverb B, at full amount
    B,
}

impl Reverb {
    /// Classify the raw reverb word
    pub const fn from_raw(value: u32) -> Self {
        if value <= 65536 { Self::A } else { Self::B }
    }

    /// Mix amount
    pub const fn amount(&self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 255,
        }
    }
}

/// Sample playback and precomputed effects
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Path of the sample
    pub file_name: String,
    /// AU sample rate
    pub au_sample_rate: u32,
    /// Use loop points
    pub use_loop_points: bool,
    /// Play reversed
    pub reversed: bool,
    /// Swap stereo channels
    pub reverse_stereo: bool,
    /// EQ
    pub eq: u16,
    /// Pre-amp
    pub pre_amp: u16,
    /// Reverb
    pub reverb: Reverb,
    /// Filter cutoff
    pub cutoff: u16,
    /// Filter resonance
    pub resonance: u16,
    /// Stereo delay
    pub stereo_delay: u16,
    /// Pogo
    pub pogo: u16,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            au_sample_rate: 8000,
            use_loop_points: false,
            reversed: false,
            reverse_stereo: false,
            eq: 128,
            pre_amp: 0,
            reverb: Reverb::A,
            cutoff: 1024,
            resonance: 0,
            stereo_delay: 2048,
            pogo: 256,
        }
    }
}

/// LFO waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum LfoShape {
    Sine = 0,
    Triangle = 1,
    Pulse = 2,
    #[num_enum(catch_all)]
    Unknown(u8),
}

bitflags::bitflags! {
    /// Envelope and LFO flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EnvLfoFlags: u8 {
        /// Envelope synced to tempo
        const ENVELOPE_TEMPO = 1 << 0;
        /// LFO synced to tempo
        const LFO_TEMPO = 1 << 1;
        /// LFO shared by all voices
        const LFO_GLOBAL = 1 << 5;
    }
}

/// One envelope/LFO record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct EnvelopeLfo {
    pub flags: EnvLfoFlags,
    pub enabled: bool,
    pub delay: u32,
    pub attack: u32,
    pub hold: u32,
    pub decay: u32,
    pub sustain: i32,
    pub release: u32,
    pub amount: i32,
    pub attack_tension: i32,
    pub decay_tension: i32,
    pub release_tension: i32,
    pub lfo_delay: u32,
    pub lfo_attack: u32,
    pub lfo_amount: i32,
    pub lfo_speed: u32,
    pub lfo_shape: LfoShape,
}

impl Default for EnvelopeLfo {
    fn default() -> Self {
        Self {
            flags: EnvLfoFlags::empty(),
            enabled: false,
            delay: 100,
            attack: 20_000,
            hold: 20_000,
            decay: 30_000,
            sustain: 50,
            release: 20_000,
            amount: 0,
            attack_tension: 0,
            decay_tension: 0,
            release_tension: 0,
            lfo_delay: 100,
            lfo_attack: 20_000,
            lfo_amount: 0,
            lfo_speed: 32950,
            lfo_shape: LfoShape::Sine,
        }
    }
}
