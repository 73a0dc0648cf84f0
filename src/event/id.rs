use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
Every event id with a known meaning.

Ids marked obsolete are still written by old producer versions and are read
for compatibility. Several ids are understood but carry nothing this crate
models (window geometry, step-sequencer dots); the decoder reads and drops
those without flagging them.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum EventId {
    // one byte
    ChannelEnabled = 0,
    NoteOn = 1,
    /// Obsolete
    ChannelVolume = 2,
    /// Obsolete
    ChannelPan = 3,
    MidiChannel = 4,
    MidiNote = 5,
    MidiPatch = 6,
    MidiBank = 7,
    LoopActive = 9,
    ShowInfo = 10,
    Shuffle = 11,
    MainVolume = 12,
    Stretch = 13,
    Pitchable = 14,
    Zipped = 15,
    DelayFlags = 16,
    PatternLength = 17,
    BlockLength = 18,
    UseLoopPoints = 19,
    LoopType = 20,
    ChannelType = 21,
    ChannelMixerTrack = 22,
    StepSequencerLength = 25,
    StepSequencerLoop = 26,
    EffectProperties = 27,
    Apdc = 29,
    PlayTruncatedNotes = 30,
    EeAutoMode = 31,
    TimeMarkerNumerator = 33,
    TimeMarkerDenominator = 34,

    // two bytes
    NewChannel = 64,
    NewPattern = 65,
    /// Obsolete, superseded by [`EventId::FineTempo`]
    Tempo = 66,
    CurrentPatternNumber = 67,
    PatternData = 68,
    SampleEq = 69,
    FadeStereo = 70,
    Cutoff = 71,
    DotVolume = 72,
    DotPan = 73,
    PreAmp = 74,
    Decay = 75,
    Attack = 76,
    DotNote = 77,
    DotPitch = 78,
    DotMix = 79,
    MainPitch = 80,
    RandomChannel = 81,
    MixChannel = 82,
    Resonance = 83,
    /// Obsolete
    LoopBar = 84,
    StereoDelay = 85,
    Pogo = 86,
    DotResonance = 87,
    DotCutoff = 88,
    ShiftTime = 89,
    /// Obsolete
    LoopEndBar = 90,
    Dot = 91,
    DotShift = 92,
    /// Obsolete fractional tempo part
    TempoFraction = 93,
    LayerParentOf = 94,
    InsertIcon = 95,
    DotRelease = 96,
    SwingMix = 97,
    CurrentSlotNumber = 98,

    // four bytes
    Color = 128,
    PlaylistItemLegacy = 129,
    Echo = 130,
    FxSine = 131,
    CutCutBy = 132,
    WindowHeight = 133,
    WindowWidth = 134,
    MiddleNote = 135,
    Reserved = 136,
    MainResonanceCutoff = 137,
    DelayModXY = 138,
    Reverb = 139,
    IntStretch = 140,
    SimSynthNote = 141,
    FineTune = 142,
    LayerFlags = 144,
    ChannelFilterNumber = 145,
    CurrentFilterNumber = 146,
    InsertOutput = 147,
    TimeMarker = 148,
    InsertColor = 149,
    PatternColor = 150,
    SongLoopPosition = 152,
    AuSampleRate = 153,
    InsertInput = 154,
    PluginIcon = 155,
    FineTempo = 156,

    // text
    /// Obsolete
    DefaultChannelName = 192,
    PatternName = 193,
    Title = 194,
    Comment = 195,
    SampleFileName = 196,
    Url = 197,
    CommentRtf = 198,
    Version = 199,
    RegistrationName = 200,
    PluginDefaultName = 201,
    DataPath = 202,
    PluginName = 203,
    InsertName = 204,
    TimeMarkerName = 205,
    Genre = 206,
    Author = 207,
    MidiControls = 208,

    // data
    ChannelDelay = 209,
    Ts404Params = 210,
    /// Obsolete
    DelayLine = 211,
    NewPlugin = 212,
    PluginParams = 213,
    ChannelParams = 215,
    PlaylistSelection = 217,
    EnvelopeLfoParams = 218,
    BasicChannelParams = 219,
    OldFilterParams = 220,
    ChannelPolyphony = 221,
    OldAutomationData = 223,
    PatternNotes = 224,
    InsertParams = 225,
    AutomationChannels = 227,
    ChannelTracking = 228,
    ChannelLevelOffsets = 229,
    /// Text stored in the data range
    ChannelFilterName = 231,
    PlaylistItems = 233,
    AutomationData = 234,
    InsertRoutes = 235,
    InsertFlags = 236,
    SaveTimestamp = 237,
    PlaylistTrackInfo = 238,
    /// Text stored in the data range
    TrackName = 239,
}

impl EventId {
    /// Raw id byte
    pub fn byte(self) -> u8 {
        self.into()
    }

    /// Width class of this id
    pub fn kind(self) -> super::EventKind {
        super::EventKind::of(self.byte())
    }

    /// True for data-range ids whose payload is text
    pub const fn is_text_payload(self) -> bool {
        matches!(self, Self::ChannelFilterName | Self::TrackName)
    }
}

#[test]
fn ids_round_trip_through_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(EventId::try_from(199u8).ok(), Some(EventId::Version));
    assert_eq!(EventId::InsertFlags.byte(), 236);
    assert_eq!(EventId::TrackName.kind(), super::EventKind::Data);
    assert!(EventId::try_from(8u8).is_err());
}
