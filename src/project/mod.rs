#![doc = r#"
The decoded project.

A [`Project`] owns every collection. Cross references between entities
(a playlist item playing a pattern, an automation clip driving a channel,
the note lists of a pattern) are plain indices into those collections,
checked by the decoder as they are read.

```text
Project
 ├─ channels[]      Channel ── ChannelData::{Generator, Automation, Layer}
 ├─ patterns[]      Pattern ── channel index → [Note]
 ├─ inserts[]       Insert  ── slots[10] ── Plugin
 ├─ tracks[]        Track   ── [PlaylistItem] ── Clip::{Channel, Pattern}
 ├─ channel_filters[]
 └─ time_markers[]
```
"#]

mod automation;
pub use automation::*;

mod channel;
pub use channel::*;

mod color;
pub use color::*;

mod generator;
pub use generator::*;

mod insert;
pub use insert::*;

mod marker;
pub use marker::*;

mod pattern;
pub use pattern::*;

mod track;
pub use track::*;

use crate::{
    decoder::{DecodeOptions, decode},
    file::ProjectHeader,
    reader::DecodeResult,
};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use core::time::Duration;

/// Seconds in a day
const SECONDS_PER_DAY: f64 = 86_400.0;

#[doc = r#"
A decoded music project
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    /// Beats per minute
    pub tempo: f32,
    /// Master volume
    pub main_volume: u16,
    /// Master pitch in cents
    pub main_pitch: i16,
    /// Pulses per quarter note
    pub ppq: u16,
    /// Project title
    pub title: String,
    /// Author
    pub author: String,
    /// Genre
    pub genre: String,
    /// Free-text comment
    pub comment: String,
    /// Project url
    pub url: String,
    /// Version string of the saving application, e.g. `20.8.4.2576`
    pub version_string: String,
    /// Packed version, `major << 8 | minor << 4 | patch`
    pub version: u32,
    /// Project data folder
    pub data_path: String,
    /// Creation date and accumulated work time
    pub timestamp: Option<SaveTimestamp>,
    /// Song loop position
    pub song_loop_position: u32,
    /// Show the project info window when opening
    pub show_info_on_startup: bool,
    /// Automatic plugin delay compensation
    pub apdc: bool,
    /// Event editor auto mode
    pub ee_auto_mode: bool,
    /// Play notes cut off at pattern boundaries
    pub play_truncated_notes: bool,
    /// Channel filter selected in the browser
    pub selected_channel_filter: i32,
    /// Number of events in the stream
    pub event_count: u64,
    /// Channel rack
    pub channels: Vec<Channel>,
    /// Patterns; pattern `n` in the producer's numbering is at index `n - 1`
    pub patterns: Vec<Pattern>,
    /// Mixer inserts, empty until a version event sizes them
    pub inserts: Vec<Insert>,
    /// Playlist tracks, empty until a version event sizes them
    pub tracks: Vec<Track>,
    /// Named channel groups
    pub channel_filters: Vec<ChannelFilter>,
    /// Playlist time markers
    pub time_markers: Vec<TimeMarker>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            tempo: 140.,
            main_volume: 300,
            main_pitch: 0,
            ppq: 0,
            title: String::new(),
            author: String::new(),
            genre: String::new(),
            comment: String::new(),
            url: String::new(),
            version_string: String::new(),
            version: 0x100,
            data_path: String::new(),
            timestamp: None,
            song_loop_position: 0,
            show_info_on_startup: false,
            apdc: true,
            ee_auto_mode: true,
            play_truncated_notes: false,
            selected_channel_filter: 0,
            event_count: 0,
            channels: Vec::new(),
            patterns: Vec::new(),
            inserts: Vec::new(),
            tracks: Vec::new(),
            channel_filters: Vec::new(),
            time_markers: Vec::new(),
        }
    }
}

impl Project {
    /// Parse a project with the default (lenient) options
    pub fn parse(bytes: &[u8]) -> DecodeResult<Self> {
        decode(bytes, &DecodeOptions::default())
    }

    /// An empty project shaped by a container header
    pub fn from_header(header: &ProjectHeader) -> Self {
        Self {
            ppq: header.ppq(),
            channels: (0..usize::from(header.channel_count()))
                .map(Channel::new)
                .collect(),
            ..Default::default()
        }
    }

    /// Allocate the insert and track arrays.
    pub(crate) fn allocate_mixer(&mut self, inserts: usize, tracks: usize) {
        self.inserts = (0..inserts).map(|id| Insert::new(id, inserts)).collect();
        if let Some(master) = self.inserts.first_mut() {
            master.name = "Master".to_string();
        }
        self.tracks = (0..tracks).map(Track::new).collect();
    }

    /// Look up a channel
    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    /// Look up a pattern by index (not by the producer's 1-based number)
    pub fn pattern(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Look up an insert
    pub fn insert(&self, index: usize) -> Option<&Insert> {
        self.inserts.get(index)
    }

    /// Look up a track
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Iterate over every playlist item with the track it sits on
    pub fn playlist(&self) -> impl Iterator<Item = (&Track, &PlaylistItem)> {
        self.tracks
            .iter()
            .flat_map(|track| track.items.iter().map(move |item| (track, item)))
    }

    /// Channels that carry automation clips
    pub fn automation_channels(&self) -> impl Iterator<Item = (&Channel, &AutomationData)> {
        self.channels
            .iter()
            .filter_map(|c| c.data.as_automation().map(|data| (c, data)))
    }
}

/// Creation time and accumulated editing time, in days, as the producer
/// stores them (Delphi `TDateTime`: days since 1899-12-30).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveTimestamp {
    /// Days since 1899-12-30 when the project was created
    pub created_days: f64,
    /// Days spent working on the project
    pub work_time_days: f64,
}

impl SaveTimestamp {
    /// Creation date, if representable
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        if !self.created_days.is_finite() {
            return None;
        }
        let origin = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
        let millis = (self.created_days * SECONDS_PER_DAY * 1000.).round();
        if millis.abs() > i64::MAX as f64 {
            return None;
        }
        origin.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
    }

    /// Total time spent on the project, if representable
    pub fn work_time(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.work_time_days * SECONDS_PER_DAY).ok()
    }
}
