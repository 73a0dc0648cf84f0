use crate::{
    TextEncoding,
    project::{InsertSlot, TimeMarker},
};

/// Which kind of entity the shared event ids address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Before the first insert-flags event: the current channel
    #[default]
    Channel,
    /// From the first insert-flags event on: the current effect slot
    Mixer,
}

/// Sizes of the version-dependent arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Mixer inserts
    pub inserts: usize,
    /// Playlist tracks
    pub tracks: usize,
}

#[doc = r#"
The decoder's memory between events.

Most events carry no address of their own: they apply to whatever the last
boundary event selected. This holds those selections along with the state
that changes how later events read.
"#]
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    pub(crate) scope: Scope,
    pub(crate) channel: Option<usize>,
    pub(crate) pattern: Option<usize>,
    pub(crate) insert: Option<usize>,
    pub(crate) next_insert: usize,
    pub(crate) slot: Option<InsertSlot>,
    pub(crate) track: Option<usize>,
    pub(crate) time_marker: Option<TimeMarker>,
    pub(crate) text: TextEncoding,
    pub(crate) limits: Option<Limits>,
    pub(crate) envelope: usize,
    pub(crate) tracking_written: bool,
}

impl ParserContext {
    /// Current scope
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Selected channel
    pub const fn channel(&self) -> Option<usize> {
        self.channel
    }

    /// Selected pattern, as an index
    pub const fn pattern(&self) -> Option<usize> {
        self.pattern
    }

    /// Selected insert
    pub const fn insert(&self) -> Option<usize> {
        self.insert
    }

    /// Selected track
    pub const fn track(&self) -> Option<usize> {
        self.track
    }

    /// Width of text events
    pub const fn text_encoding(&self) -> TextEncoding {
        self.text
    }

    /// Array sizes, once a version event has been seen
    pub const fn limits(&self) -> Option<Limits> {
        self.limits
    }

    /// Select a channel and reset its per-channel counters
    pub(crate) fn select_channel(&mut self, channel: Option<usize>) {
        self.channel = channel;
        self.envelope = 0;
        self.tracking_written = false;
    }

    /// Switch to mixer scope for good
    pub(crate) fn enter_mixer(&mut self) {
        self.scope = Scope::Mixer;
        self.channel = None;
    }

    /// The tracking slot the next tracking event fills
    pub(crate) fn next_tracking_slot(&mut self) -> usize {
        let slot = usize::from(self.tracking_written);
        self.tracking_written = true;
        slot
    }
}
