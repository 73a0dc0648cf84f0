use super::Color;

/// Default color of a playlist track
pub const DEFAULT_TRACK_COLOR: Color = Color::rgb(0x56, 0x51, 0x48);

/// Live performance settings, present in the longer track-info layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct Performance {
    pub motion: i32,
    pub press: i32,
    pub trigger_sync: i32,
    pub queued: i32,
    pub tolerant: i32,
    pub position_sync: i32,
    pub grouped_with_above: bool,
}

impl Default for Performance {
    fn default() -> Self {
        Self {
            motion: 0,
            press: 0,
            trigger_sync: 5,
            queued: 0,
            tolerant: 1,
            position_sync: 0,
            grouped_with_above: false,
        }
    }
}

/// What a playlist item plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clip {
    /// A channel's clip (audio or automation); offsets are in pulses
    Channel(usize),
    /// A pattern, by index into the project's patterns
    Pattern(usize),
}

/// A clip placed on a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaylistItem {
    /// Start in pulses
    pub position: i32,
    /// Length in pulses
    pub length: i32,
    /// Offset into the clip where playback starts
    pub start_offset: u32,
    /// Offset into the clip where playback ends
    pub end_offset: u32,
    /// Muted
    pub muted: bool,
    /// Group id, 0 when ungrouped
    pub group: u16,
    /// The clip
    pub clip: Clip,
}

/// A playlist lane
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    /// Index in the playlist
    pub id: usize,
    /// Display name
    pub name: String,
    /// Color
    pub color: Color,
    /// Icon id
    pub icon: i32,
    /// Enabled
    pub enabled: bool,
    /// Relative height
    pub height: f32,
    /// Height when locked
    pub locked_height: f32,
    /// Height follows content
    pub locked_to_content: bool,
    /// Performance settings, if the file had them
    pub performance: Option<Performance>,
    /// Clips, in file order
    pub items: Vec<PlaylistItem>,
}

impl Track {
    /// A default track
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: format!("Track {id}"),
            color: DEFAULT_TRACK_COLOR,
            icon: 0,
            enabled: true,
            height: 1.,
            locked_height: 1.,
            locked_to_content: false,
            performance: None,
            items: Vec::new(),
        }
    }
}
