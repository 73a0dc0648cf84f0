use super::Limits;
use core::fmt;

/// Inserts in projects saved before 11.5
pub const LEGACY_INSERT_COUNT: usize = 105;
/// Inserts in projects saved by 11.5 and later
pub const INSERT_COUNT: usize = 127;
/// Tracks in projects saved before 20
pub const LEGACY_TRACK_COUNT: usize = 199;
/// Tracks in projects saved by 20 and later
pub const TRACK_COUNT: usize = 502;

/// The producer version parsed from the version event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major
    pub major: u8,
    /// Minor
    pub minor: u8,
    /// Patch
    pub patch: u8,
}

impl Version {
    /// Create a version
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse up to three dot-separated components; further components
    /// (the build number) are ignored and missing ones are zero.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim_end_matches('\0').trim().split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let mut next = || match parts.next() {
            None => Some(0),
            Some(part) => part.trim().parse().ok(),
        };
        let minor = next()?;
        let patch = next()?;
        Some(Self::new(major, minor, patch))
    }

    /// `major << 8 | minor << 4 | patch`, as the project stores it
    pub const fn packed(&self) -> u32 {
        ((self.major as u32) << 8) + ((self.minor as u32) << 4) + self.patch as u32
    }

    /// Whether text events are UTF-16
    pub const fn uses_wide_text(&self) -> bool {
        self.major > 11 || (self.major == 11 && self.minor >= 5)
    }

    /// Insert and track array sizes
    pub const fn limits(&self) -> Limits {
        Limits {
            inserts: if self.uses_wide_text() {
                INSERT_COUNT
            } else {
                LEGACY_INSERT_COUNT
            },
            tracks: if self.major >= 20 {
                TRACK_COUNT
            } else {
                LEGACY_TRACK_COUNT
            },
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
